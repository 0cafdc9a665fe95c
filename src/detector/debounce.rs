/// Whether the event gate would accept an event right now.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Gate {
    Armed,
    Cooling,
}

/// Debounce gate keyed on caller-supplied monotonic milliseconds.
#[derive(Debug, Clone)]
pub struct Debounce {
    interval_ms: f64,
    last_event_ms: Option<f64>,
}

impl Debounce {
    pub fn new(interval_ms: u64) -> Self {
        Self {
            interval_ms: interval_ms as f64,
            last_event_ms: None,
        }
    }

    /// Armed until the first event, then only once strictly more than the
    /// interval has passed. A clock that runs backwards keeps the gate closed.
    pub fn gate(&self, now_ms: f64) -> Gate {
        match self.last_event_ms {
            None => Gate::Armed,
            Some(last) if now_ms - last > self.interval_ms => Gate::Armed,
            Some(_) => Gate::Cooling,
        }
    }

    /// Fire if armed. Returns whether an event was emitted.
    pub fn try_fire(&mut self, now_ms: f64) -> bool {
        if self.gate(now_ms) == Gate::Cooling {
            return false;
        }
        self.last_event_ms = Some(now_ms);
        true
    }

    pub fn last_event_ms(&self) -> Option<f64> {
        self.last_event_ms
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_armed_even_at_time_zero() {
        let d = Debounce::new(500);
        assert_eq!(d.gate(0.0), Gate::Armed);
        assert_eq!(d.last_event_ms(), None);
    }

    #[test]
    fn cools_for_the_interval() {
        let mut d = Debounce::new(500);
        assert!(d.try_fire(0.0));
        assert_eq!(d.last_event_ms(), Some(0.0));
        assert_eq!(d.gate(100.0), Gate::Cooling);
        assert!(!d.try_fire(100.0));
        // Exactly the interval is not enough.
        assert!(!d.try_fire(500.0));
        assert!(d.try_fire(500.5));
        assert_eq!(d.last_event_ms(), Some(500.5));
    }

    #[test]
    fn rejected_attempts_do_not_extend_cooling() {
        let mut d = Debounce::new(500);
        d.try_fire(0.0);
        for t in (10..500).step_by(10) {
            assert!(!d.try_fire(t as f64));
        }
        assert!(d.try_fire(501.0));
    }

    #[test]
    fn backwards_clock_stays_cooling() {
        let mut d = Debounce::new(500);
        d.try_fire(10_000.0);
        assert_eq!(d.gate(0.0), Gate::Cooling);
        assert!(!d.try_fire(-1_000.0));
    }

    #[test]
    fn zero_interval_still_needs_time_to_pass() {
        let mut d = Debounce::new(0);
        assert!(d.try_fire(5.0));
        assert!(!d.try_fire(5.0));
        assert!(d.try_fire(5.1));
    }
}
