//! Clap detection over a live mono sample stream.
//!
//! [`Detector`] turns one buffer of samples per frame into a normalized visual
//! level and a debounced clap event. Where the samples come from and what the
//! host does with an event are left to [`source`] and [`countdown`].

pub mod countdown;
pub mod detector;
pub mod engine;
pub mod error;
pub mod source;
pub mod types;

pub use countdown::{Countdown, CountdownStep};
pub use detector::{Detector, DetectorConfig, DetectorState, Gate, TickResult};
pub use engine::{ClapEngine, FrameOutcome};
pub use error::{ConfigError, InvalidBuffer, SourceUnavailable};
pub use source::{FrameStatus, SampleSource};
pub use types::HostEvent;
