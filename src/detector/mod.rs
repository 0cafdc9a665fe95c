//! Clap detection using RMS level + noise floor calibration + EMA smoothing
//! + debounce gate.

mod calibration;
pub mod config;
mod debounce;
mod normalize;
mod rms;
mod smoothing;

pub use config::DetectorConfig;
pub use debounce::Gate;
pub use normalize::visual_level;
pub use rms::rms;

use calibration::Calibration;
use debounce::Debounce;
use smoothing::Smoother;

use crate::error::{ConfigError, InvalidBuffer};

/// Output of one frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TickResult {
    /// Normalized loudness in [0, 1] for driving visuals.
    pub visual_level: f64,
    /// True on the frame a clap is accepted.
    pub event_emitted: bool,
    /// Unsmoothed RMS of this frame.
    pub raw_level: f64,
}

/// Everything the detector carries from one frame to the next.
#[derive(Debug, Clone)]
pub struct DetectorState {
    raw_level: f64,
    smoother: Smoother,
    calibration: Calibration,
    visual_level: f64,
    debounce: Debounce,
}

impl DetectorState {
    fn new(config: &DetectorConfig) -> Self {
        Self {
            raw_level: 0.0,
            smoother: Smoother::new(config.smoothing_alpha, config.release_alpha),
            calibration: Calibration::new(config.calibration_frames),
            visual_level: 0.0,
            debounce: Debounce::new(config.debounce_ms),
        }
    }

    pub fn raw_level(&self) -> f64 {
        self.raw_level
    }

    /// `None` until the first frame has been accepted.
    pub fn smoothed_level(&self) -> Option<f64> {
        self.smoother.value()
    }

    pub fn calibrating(&self) -> bool {
        self.calibration.is_calibrating()
    }

    /// 0 while calibrating.
    pub fn noise_floor(&self) -> f64 {
        self.calibration.noise_floor()
    }

    pub fn noise_floor_sample_count(&self) -> u32 {
        self.calibration.sample_count()
    }

    pub fn noise_floor_accumulator(&self) -> f64 {
        self.calibration.accumulator()
    }

    pub fn visual_level(&self) -> f64 {
        self.visual_level
    }

    /// Time of the last emitted event, 0 if none has fired yet.
    pub fn last_event_ms(&self) -> f64 {
        self.debounce.last_event_ms().unwrap_or(0.0)
    }

    pub fn has_emitted(&self) -> bool {
        self.debounce.last_event_ms().is_some()
    }

    pub fn gate(&self, now_ms: f64) -> Gate {
        self.debounce.gate(now_ms)
    }
}

/// One detector per mono stream, ticked once per frame by the host.
#[derive(Debug, Clone)]
pub struct Detector {
    config: DetectorConfig,
    state: DetectorState,
}

impl Detector {
    pub fn new(config: DetectorConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let state = DetectorState::new(&config);
        Ok(Self { config, state })
    }

    pub fn config(&self) -> &DetectorConfig {
        &self.config
    }

    pub fn state(&self) -> &DetectorState {
        &self.state
    }

    /// Process one frame of samples (f32, -1..1) captured at `now_ms`
    /// (monotonic milliseconds from the host's clock).
    ///
    /// An empty or non-finite buffer, or a non-finite timestamp, is rejected
    /// before any state changes.
    pub fn tick(&mut self, samples: &[f32], now_ms: f64) -> Result<TickResult, InvalidBuffer> {
        if !now_ms.is_finite() {
            return Err(InvalidBuffer::NonFiniteTime(now_ms));
        }
        let raw = rms(samples)?;
        let state = &mut self.state;
        state.raw_level = raw;

        if state.calibration.observe(raw) {
            log::debug!(
                "Calibration done: noise floor {:.5} over {} frames",
                state.calibration.noise_floor(),
                state.calibration.sample_count(),
            );
        }

        let smoothed = state.smoother.update(raw);

        state.visual_level = visual_level(
            smoothed,
            state.calibration.noise_floor(),
            state.calibration.is_calibrating(),
            self.config.threshold,
            self.config.epsilon,
        );

        // Detection reacts to the raw level; smoothing would only add latency.
        let event_emitted = raw > self.config.threshold && state.debounce.try_fire(now_ms);
        if event_emitted {
            log::debug!("Clap at {:.1}ms (rms {:.4})", now_ms, raw);
        }

        log::trace!(
            "rms {:.5} smoothed {:.5} visual {:.3}",
            raw,
            smoothed,
            state.visual_level,
        );

        Ok(TickResult {
            visual_level: state.visual_level,
            event_emitted,
            raw_level: raw,
        })
    }
}
