use std::io::Write;
use std::path::PathBuf;
use std::time::{Duration, Instant};

use clap::Parser;
use tokio::time::MissedTickBehavior;

use handclap::countdown::{DEFAULT_COMPLETION_DELAY_MS, DEFAULT_COUNT};
use handclap::source::mic::DEFAULT_FRAME_LEN;
use handclap::source::{list_input_devices, MicSource};
use handclap::types::InputDeviceList;
use handclap::{
    ClapEngine, ConfigError, Countdown, Detector, DetectorConfig, FrameStatus, HostEvent,
    SampleSource,
};

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Count down claps picked up by the microphone.
#[derive(Parser)]
#[command(name = "handclap")]
#[command(about = "clap detection from live microphone input")]
struct Cli {
    /// input device name (use --list-devices to see options)
    #[arg(short, long)]
    device: Option<String>,

    /// list available input devices and exit
    #[arg(long)]
    list_devices: bool,

    /// samples per analysis frame
    #[arg(long, default_value_t = DEFAULT_FRAME_LEN)]
    frame_len: usize,

    /// frames analysed per second
    #[arg(long, default_value_t = 60, value_parser = clap::value_parser!(u32).range(1..))]
    fps: u32,

    /// detector settings as JSON; flags below override single fields
    #[arg(long)]
    config: Option<PathBuf>,

    #[arg(long)]
    threshold: Option<f64>,

    #[arg(long)]
    debounce_ms: Option<u64>,

    #[arg(long)]
    calibration_frames: Option<u32>,

    /// EMA weight of the newest frame
    #[arg(long)]
    alpha: Option<f64>,

    /// claps needed to finish
    #[arg(long, default_value_t = DEFAULT_COUNT)]
    count: u32,

    /// delay between the last clap and completion
    #[arg(long, default_value_t = DEFAULT_COMPLETION_DELAY_MS)]
    completion_delay_ms: f64,

    /// write events to stdout as JSON lines
    #[arg(long)]
    json: bool,

    /// also report the normalized visual level every frame
    #[arg(long)]
    levels: bool,
}

impl Cli {
    fn detector_config(&self) -> Result<DetectorConfig, ConfigError> {
        let mut config = match &self.config {
            Some(path) => DetectorConfig::from_json_file(path)?,
            None => DetectorConfig::default(),
        };
        if let Some(threshold) = self.threshold {
            config.threshold = threshold;
        }
        if let Some(debounce_ms) = self.debounce_ms {
            config.debounce_ms = debounce_ms;
        }
        if let Some(frames) = self.calibration_frames {
            config.calibration_frames = frames;
        }
        if let Some(alpha) = self.alpha {
            config.smoothing_alpha = alpha;
        }
        Ok(config)
    }
}

struct Emitter {
    json: bool,
}

impl Emitter {
    fn emit(&self, event: &HostEvent) -> Result<(), BoxError> {
        self.emit_to(&mut std::io::stdout().lock(), event)
    }

    /// A closed pipe surfaces as an error instead of a panic.
    fn emit_to(&self, out: &mut impl Write, event: &HostEvent) -> Result<(), BoxError> {
        if self.json {
            serde_json::to_writer(&mut *out, event)?;
            writeln!(out)?;
            out.flush()?;
            return Ok(());
        }
        match event {
            HostEvent::Level { level, .. } => log::debug!("Level {:.3}", level),
            HostEvent::Calibrated { noise_floor } => {
                log::info!("Calibrated, noise floor {:.4}", noise_floor)
            }
            HostEvent::Clap { remaining, rms, .. } => {
                log::info!("Clap! {} to go (rms {:.3})", remaining, rms)
            }
            HostEvent::Complete { .. } => log::info!("Countdown complete"),
        }
        Ok(())
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), BoxError> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let cli = Cli::parse();
    let emitter = Emitter { json: cli.json };

    if cli.list_devices {
        let list = InputDeviceList {
            inputs: list_input_devices(),
        };
        let mut out = std::io::stdout().lock();
        if cli.json {
            serde_json::to_writer(&mut out, &list)?;
            writeln!(out)?;
        } else {
            for name in &list.inputs {
                writeln!(out, "{}", name)?;
            }
        }
        return Ok(());
    }

    let detector = Detector::new(cli.detector_config()?)?;
    let countdown = Countdown::new(cli.count, cli.completion_delay_ms);

    // The detector only starts once the microphone is up.
    let mut source = MicSource::open(cli.device.as_deref(), cli.frame_len)?;
    log::info!(
        "Listening on {} at {}Hz, {} samples per frame",
        source.device_name(),
        source.sample_rate(),
        source.frame_len(),
    );

    let mut engine = ClapEngine::new(detector, countdown).with_levels(cli.levels);
    run_frame_loop(&mut engine, &mut source, cli.fps, &emitter).await
}

/// Drive the engine at `fps` until the countdown completes or Ctrl-C.
async fn run_frame_loop(
    engine: &mut ClapEngine,
    source: &mut impl SampleSource,
    fps: u32,
    emitter: &Emitter,
) -> Result<(), BoxError> {
    let start = Instant::now();
    let mut interval = tokio::time::interval(Duration::from_secs_f64(1.0 / fps as f64));
    interval.set_missed_tick_behavior(MissedTickBehavior::Skip);

    let ctrl_c = tokio::signal::ctrl_c();
    tokio::pin!(ctrl_c);

    let mut frame = Vec::with_capacity(source.frame_len());

    loop {
        tokio::select! {
            _ = interval.tick() => {}
            _ = &mut ctrl_c => {
                log::info!("Interrupted");
                break;
            }
        }

        let now_ms = start.elapsed().as_secs_f64() * 1000.0;

        if let Some(event) = engine.poll(now_ms) {
            emitter.emit(&event)?;
            break;
        }

        if source.read_frame(&mut frame) == FrameStatus::Pending {
            continue;
        }

        let outcome = match engine.process(&frame, now_ms) {
            Ok(outcome) => outcome,
            Err(e) => {
                log::debug!("Skipping frame: {}", e);
                continue;
            }
        };
        for event in &outcome.events {
            emitter.emit(event)?;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use std::io;

    use super::*;

    struct ClosedPipe;

    impl Write for ClosedPipe {
        fn write(&mut self, _: &[u8]) -> io::Result<usize> {
            Err(io::Error::from(io::ErrorKind::BrokenPipe))
        }

        fn flush(&mut self) -> io::Result<()> {
            Err(io::Error::from(io::ErrorKind::BrokenPipe))
        }
    }

    #[test]
    fn json_events_are_one_per_line() {
        let emitter = Emitter { json: true };
        let mut out = Vec::new();
        emitter
            .emit_to(&mut out, &HostEvent::Level { at_ms: 16.0, level: 0.5 })
            .unwrap();
        emitter
            .emit_to(&mut out, &HostEvent::Complete { at_ms: 32.0 })
            .unwrap();
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "{\"type\":\"level\",\"atMs\":16.0,\"level\":0.5}\n{\"type\":\"complete\",\"atMs\":32.0}\n"
        );
    }

    #[test]
    fn closed_output_is_an_error() {
        let emitter = Emitter { json: true };
        let result = emitter.emit_to(&mut ClosedPipe, &HostEvent::Complete { at_ms: 0.0 });
        assert!(result.is_err());
    }

    #[test]
    fn log_mode_writes_nothing() {
        let emitter = Emitter { json: false };
        let mut out = Vec::new();
        emitter
            .emit_to(&mut out, &HostEvent::Calibrated { noise_floor: 0.01 })
            .unwrap();
        assert!(out.is_empty());
    }
}
