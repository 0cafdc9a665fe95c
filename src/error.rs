use thiserror::Error;

/// A sample buffer the detector refused to process.
///
/// A tick that returns this leaves the detector state untouched.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum InvalidBuffer {
    #[error("sample buffer is empty")]
    Empty,
    #[error("non-finite sample {value} at index {index}")]
    NonFinite { index: usize, value: f32 },
    #[error("non-finite frame timestamp {0}")]
    NonFiniteTime(f64),
}

/// The microphone could not be opened. Reported once, before any tick.
#[derive(Error, Debug)]
pub enum SourceUnavailable {
    #[error("no default input device")]
    NoDefaultDevice,
    #[error("input device '{0}' not found")]
    DeviceNotFound(String),
    #[error("unsupported sample format {0:?} (need f32)")]
    UnsupportedFormat(cpal::SampleFormat),
    #[error("frame length must be at least 1")]
    ZeroFrameLength,
    #[error(transparent)]
    Devices(#[from] cpal::DevicesError),
    #[error(transparent)]
    Config(#[from] cpal::DefaultStreamConfigError),
    #[error(transparent)]
    Build(#[from] cpal::BuildStreamError),
    #[error(transparent)]
    Play(#[from] cpal::PlayStreamError),
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("threshold must be finite and positive, got {0}")]
    Threshold(f64),
    #[error("{name} must be in (0, 1], got {value}")]
    Alpha { name: &'static str, value: f64 },
    #[error("epsilon must be finite and positive, got {0}")]
    Epsilon(f64),
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse config file: {0}")]
    Parse(#[from] serde_json::Error),
}
