use serde::Serialize;

/// Line-delimited JSON messages the binary writes for a front end.
#[derive(Debug, Serialize, Clone, PartialEq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum HostEvent {
    /// Normalized loudness for driving visuals, one per processed frame.
    Level {
        #[serde(rename = "atMs")]
        at_ms: f64,
        level: f64,
    },
    Calibrated {
        #[serde(rename = "noiseFloor")]
        noise_floor: f64,
    },
    Clap {
        #[serde(rename = "atMs")]
        at_ms: f64,
        rms: f64,
        remaining: u32,
    },
    Complete {
        #[serde(rename = "atMs")]
        at_ms: f64,
    },
}

#[derive(Debug, Serialize, Clone)]
pub struct InputDeviceList {
    pub inputs: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clap_serializes_with_tag() {
        let json = serde_json::to_value(HostEvent::Clap {
            at_ms: 1500.0,
            rms: 0.5,
            remaining: 3,
        })
        .unwrap();
        assert_eq!(
            json,
            serde_json::json!({ "type": "clap", "atMs": 1500.0, "rms": 0.5, "remaining": 3 })
        );
    }

    #[test]
    fn level_serializes_with_tag() {
        let json = serde_json::to_value(HostEvent::Level {
            at_ms: 16.5,
            level: 0.75,
        })
        .unwrap();
        assert_eq!(
            json,
            serde_json::json!({ "type": "level", "atMs": 16.5, "level": 0.75 })
        );
    }

    #[test]
    fn calibrated_serializes() {
        let json = serde_json::to_string(&HostEvent::Calibrated { noise_floor: 0.25 }).unwrap();
        assert_eq!(json, r#"{"type":"calibrated","noiseFloor":0.25}"#);
    }
}
