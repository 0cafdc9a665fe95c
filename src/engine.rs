use crate::countdown::{Countdown, CountdownStep};
use crate::detector::{Detector, TickResult};
use crate::error::InvalidBuffer;
use crate::types::HostEvent;

/// Per-frame result handed back to the host loop.
#[derive(Debug, Clone, PartialEq)]
pub struct FrameOutcome {
    pub tick: TickResult,
    pub events: Vec<HostEvent>,
}

/// Central clap engine: the detector plus the host's countdown policy.
pub struct ClapEngine {
    detector: Detector,
    countdown: Countdown,
    was_calibrating: bool,
    levels: bool,
}

impl ClapEngine {
    pub fn new(detector: Detector, countdown: Countdown) -> Self {
        let was_calibrating = detector.state().calibrating();
        Self {
            detector,
            countdown,
            was_calibrating,
            levels: false,
        }
    }

    /// Also report a [`HostEvent::Level`] for every processed frame.
    pub fn with_levels(mut self, levels: bool) -> Self {
        self.levels = levels;
        self
    }

    /// Run one frame through the detector and translate the result into
    /// host events.
    pub fn process(&mut self, frame: &[f32], now_ms: f64) -> Result<FrameOutcome, InvalidBuffer> {
        let tick = self.detector.tick(frame, now_ms)?;
        let mut events = Vec::new();

        if self.levels {
            events.push(HostEvent::Level {
                at_ms: now_ms,
                level: tick.visual_level,
            });
        }

        let calibrating = self.detector.state().calibrating();
        if self.was_calibrating && !calibrating {
            events.push(HostEvent::Calibrated {
                noise_floor: self.detector.state().noise_floor(),
            });
        }
        self.was_calibrating = calibrating;

        if tick.event_emitted {
            match self.countdown.on_event(now_ms) {
                CountdownStep::Decremented { remaining } => {
                    events.push(HostEvent::Clap {
                        at_ms: now_ms,
                        rms: tick.raw_level,
                        remaining,
                    });
                }
                CountdownStep::Scheduled { at_ms } => {
                    log::debug!("Clap at {:.1}ms after countdown ended, completing at {:.1}ms", now_ms, at_ms);
                }
                CountdownStep::Ignored => {}
            }
        }

        Ok(FrameOutcome { tick, events })
    }

    /// Completion event, once, when the countdown's delay has run out.
    pub fn poll(&mut self, now_ms: f64) -> Option<HostEvent> {
        self.countdown
            .poll(now_ms)
            .then_some(HostEvent::Complete { at_ms: now_ms })
    }

    pub fn detector(&self) -> &Detector {
        &self.detector
    }

    pub fn countdown(&self) -> &Countdown {
        &self.countdown
    }
}
