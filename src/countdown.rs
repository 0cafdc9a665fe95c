//! Host-side clap countdown. Counts accepted claps down to zero and then
//! schedules a completion action after a short delay.

pub const DEFAULT_COUNT: u32 = 10;
pub const DEFAULT_COMPLETION_DELAY_MS: f64 = 1200.0;

/// What a clap did to the countdown.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CountdownStep {
    /// The counter went down; hosts pulse their display here.
    Decremented { remaining: u32 },
    /// The counter hit zero and completion is due at `at_ms`.
    Scheduled { at_ms: f64 },
    /// Completion is already scheduled.
    Ignored,
}

#[derive(Debug, Clone)]
pub struct Countdown {
    remaining: u32,
    completion_delay_ms: f64,
    due_ms: Option<f64>,
    finished: bool,
}

impl Default for Countdown {
    fn default() -> Self {
        Self::new(DEFAULT_COUNT, DEFAULT_COMPLETION_DELAY_MS)
    }
}

impl Countdown {
    pub fn new(initial: u32, completion_delay_ms: f64) -> Self {
        Self {
            remaining: initial,
            completion_delay_ms,
            due_ms: None,
            finished: false,
        }
    }

    /// Handle one detector event at `now_ms`.
    ///
    /// The event that brings the count to zero reports `Decremented`; the
    /// completion is scheduled in the same call and visible through
    /// [`due_ms`](Self::due_ms). An event arriving while the count is already
    /// zero (a countdown started at 0) reports `Scheduled` instead.
    pub fn on_event(&mut self, now_ms: f64) -> CountdownStep {
        if self.due_ms.is_some() {
            return CountdownStep::Ignored;
        }

        if self.remaining > 0 {
            self.remaining -= 1;
            if self.remaining == 0 {
                self.schedule(now_ms);
            }
            return CountdownStep::Decremented {
                remaining: self.remaining,
            };
        }

        let at_ms = self.schedule(now_ms);
        CountdownStep::Scheduled { at_ms }
    }

    fn schedule(&mut self, now_ms: f64) -> f64 {
        let at_ms = now_ms + self.completion_delay_ms;
        log::info!("Countdown reached zero, completing in {}ms", self.completion_delay_ms);
        self.due_ms = Some(at_ms);
        at_ms
    }

    /// True exactly once, on the first poll at or after the due time.
    pub fn poll(&mut self, now_ms: f64) -> bool {
        match self.due_ms {
            Some(due) if !self.finished && now_ms >= due => {
                self.finished = true;
                true
            }
            _ => false,
        }
    }

    pub fn remaining(&self) -> u32 {
        self.remaining
    }

    pub fn due_ms(&self) -> Option<f64> {
        self.due_ms
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }
}
