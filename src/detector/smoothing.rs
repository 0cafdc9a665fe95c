/// Exponential moving average of the raw level, used for visuals only.
#[derive(Debug, Clone)]
pub struct Smoother {
    attack: f64,
    release: f64,
    value: Option<f64>,
}

impl Smoother {
    /// `release` defaults to `attack`, which gives the plain symmetric EMA.
    pub fn new(attack: f64, release: Option<f64>) -> Self {
        Self {
            attack,
            release: release.unwrap_or(attack),
            value: None,
        }
    }

    /// The first observed level seeds the average directly, no warm-up ramp.
    pub fn update(&mut self, raw_level: f64) -> f64 {
        let next = match self.value {
            None => raw_level,
            Some(prev) => {
                let alpha = if raw_level > prev {
                    self.attack
                } else {
                    self.release
                };
                prev * (1.0 - alpha) + raw_level * alpha
            }
        };
        self.value = Some(next);
        next
    }

    pub fn value(&self) -> Option<f64> {
        self.value
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;

    #[test]
    fn first_sample_seeds_value() {
        let mut s = Smoother::new(0.15, None);
        assert_eq!(s.value(), None);
        assert_eq!(s.update(0.4), 0.4);
        assert_eq!(s.value(), Some(0.4));
    }

    #[test]
    fn follows_ema_formula() {
        let mut s = Smoother::new(0.15, None);
        s.update(0.0);
        assert_relative_eq!(s.update(1.0), 0.15);
        assert_relative_eq!(s.update(1.0), 0.15 * 0.85 + 0.15);
        // Falling uses the same factor when no release is configured.
        let before = s.value().unwrap();
        assert_relative_eq!(s.update(0.0), before * 0.85);
    }

    #[test]
    fn seeded_at_zero_still_smooths() {
        let mut s = Smoother::new(0.5, None);
        s.update(0.0);
        assert_relative_eq!(s.update(0.2), 0.1);
    }

    #[test]
    fn converges_to_constant_input() {
        let mut s = Smoother::new(0.15, None);
        s.update(0.0);
        for _ in 0..200 {
            s.update(0.3);
        }
        assert_relative_eq!(s.value().unwrap(), 0.3, max_relative = 1e-6);
    }

    #[test]
    fn release_alpha_applies_to_falling_levels() {
        let mut s = Smoother::new(0.5, Some(0.1));
        s.update(1.0);
        assert_relative_eq!(s.update(0.0), 0.9);
        assert_relative_eq!(s.update(1.0), 0.95);
    }
}
