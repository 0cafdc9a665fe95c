use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use cpal::{SampleFormat, StreamConfig};
use ringbuf::{
    traits::{Producer, Split},
    HeapRb,
};

use super::{FrameStatus, FrameWindow, SampleSource};
use crate::error::SourceUnavailable;

/// Samples per frame the detector sees by default.
pub const DEFAULT_FRAME_LEN: usize = 1024;

/// Live microphone capture feeding a rolling mono frame window.
///
/// The cpal stream stops when this is dropped.
pub struct MicSource {
    _stream: cpal::Stream,
    window: FrameWindow,
    device_name: String,
    sample_rate: u32,
}

impl MicSource {
    /// Open the given input device (or the default one) and start capturing.
    pub fn open(device_name: Option<&str>, frame_len: usize) -> Result<Self, SourceUnavailable> {
        if frame_len == 0 {
            return Err(SourceUnavailable::ZeroFrameLength);
        }

        let host = cpal::default_host();
        let device = if let Some(name) = device_name {
            host.input_devices()?
                .find(|d| d.name().map(|n| n == name).unwrap_or(false))
                .ok_or_else(|| SourceUnavailable::DeviceNotFound(name.to_string()))?
        } else {
            host.default_input_device()
                .ok_or(SourceUnavailable::NoDefaultDevice)?
        };

        let supported = device.default_input_config()?;
        if supported.sample_format() != SampleFormat::F32 {
            return Err(SourceUnavailable::UnsupportedFormat(supported.sample_format()));
        }
        let sample_rate = supported.sample_rate().0;
        let channels = supported.channels() as usize;
        let name = device.name().unwrap_or_default();

        log::info!("Capture device: {} ({}Hz, {}ch)", name, sample_rate, channels);

        // Ring buffer: enough for ~200ms of mono audio
        let buf_size = (sample_rate as usize * 200) / 1000;
        let rb = HeapRb::<f32>::new(buf_size.max(8192).max(frame_len));
        let (mut producer, consumer) = rb.split();

        let config: StreamConfig = supported.config();
        let stream = device.build_input_stream(
            &config,
            move |data: &[f32], _: &cpal::InputCallbackInfo| {
                for frame in data.chunks(channels.max(1)) {
                    // Full buffer means the host fell behind; drop the newest.
                    let _ = producer.try_push(downmix(frame));
                }
            },
            |err| log::error!("cpal input error: {}", err),
            None,
        )?;
        stream.play()?;

        Ok(Self {
            _stream: stream,
            window: FrameWindow::new(consumer, frame_len),
            device_name: name,
            sample_rate,
        })
    }

    pub fn device_name(&self) -> &str {
        &self.device_name
    }

    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }
}

impl SampleSource for MicSource {
    fn frame_len(&self) -> usize {
        self.window.frame_len()
    }

    fn read_frame(&mut self, buf: &mut Vec<f32>) -> FrameStatus {
        self.window.read_frame(buf)
    }
}

/// Average one interleaved frame down to a single mono sample.
fn downmix(frame: &[f32]) -> f32 {
    if frame.len() == 1 {
        return frame[0];
    }
    frame.iter().sum::<f32>() / frame.len() as f32
}

/// List available input devices.
pub fn list_input_devices() -> Vec<String> {
    let host = cpal::default_host();
    host.input_devices()
        .map(|devices| devices.filter_map(|d| d.name().ok()).collect())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn downmix_mono_passthrough() {
        assert_eq!(downmix(&[0.7]), 0.7);
    }

    #[test]
    fn downmix_averages_channels() {
        assert_eq!(downmix(&[0.5, -0.5]), 0.0);
        assert_eq!(downmix(&[0.25, 0.5, 0.75, 1.0]), 0.625);
    }

    #[test]
    fn zero_frame_len_is_rejected_before_touching_devices() {
        assert!(matches!(
            MicSource::open(None, 0),
            Err(SourceUnavailable::ZeroFrameLength)
        ));
    }
}
