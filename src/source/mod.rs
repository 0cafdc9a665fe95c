pub mod mic;
pub mod window;

pub use mic::{list_input_devices, MicSource};
pub use window::FrameWindow;

/// Result of asking a source for the current frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameStatus {
    /// The buffer holds a full frame.
    Ready,
    /// Nothing new to process this frame. Not the same as silence.
    Pending,
}

/// Upstream provider of fixed-length mono frames.
pub trait SampleSource {
    /// Samples per frame delivered by [`read_frame`](Self::read_frame).
    fn frame_len(&self) -> usize;

    /// Replace the contents of `buf` with the latest frame if one is available.
    fn read_frame(&mut self, buf: &mut Vec<f32>) -> FrameStatus;
}
