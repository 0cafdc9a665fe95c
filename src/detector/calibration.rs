/// Noise floor estimate taken over the first frames of a stream.
#[derive(Debug, Clone)]
pub struct Calibration {
    target: u32,
    accumulator: f64,
    count: u32,
    noise_floor: f64,
    calibrating: bool,
}

impl Calibration {
    /// A `target` of 0 skips calibration entirely and pins the floor at 0.
    pub fn new(target: u32) -> Self {
        Self {
            target,
            accumulator: 0.0,
            count: 0,
            noise_floor: 0.0,
            calibrating: target > 0,
        }
    }

    /// Feed one frame's raw level. Returns true on the single frame that
    /// completes calibration.
    pub fn observe(&mut self, raw_level: f64) -> bool {
        if !self.calibrating {
            return false;
        }

        self.accumulator += raw_level;
        self.count += 1;

        if self.count == self.target {
            self.noise_floor = self.accumulator / self.target as f64;
            self.calibrating = false;
            return true;
        }
        false
    }

    pub fn is_calibrating(&self) -> bool {
        self.calibrating
    }

    /// 0 until calibration has finished.
    pub fn noise_floor(&self) -> f64 {
        self.noise_floor
    }

    pub fn sample_count(&self) -> u32 {
        self.count
    }

    pub fn accumulator(&self) -> f64 {
        self.accumulator
    }
}
