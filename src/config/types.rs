//! Configuration type definitions

use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::sensor::body::TrackedHand;

/// Where body frames come from
///
/// Parsed from strings like `replay:capture.jsonl`, `stdin`, or
/// `tcp:127.0.0.1:9001`, both on the command line and in TOML.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum SensorSource {
    /// Recorded capture file, played back frame by frame
    Replay(PathBuf),
    /// Capture stream on standard input
    Stdin,
    /// Capture stream from a TCP endpoint
    Tcp(String),
}

impl FromStr for SensorSource {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s == "stdin" {
            return Ok(Self::Stdin);
        }
        if let Some(path) = s.strip_prefix("replay:") {
            if path.is_empty() {
                return Err("replay source needs a path, e.g. replay:capture.jsonl".to_string());
            }
            return Ok(Self::Replay(PathBuf::from(path)));
        }
        if let Some(addr) = s.strip_prefix("tcp:") {
            if addr.is_empty() {
                return Err("tcp source needs an address, e.g. tcp:127.0.0.1:9001".to_string());
            }
            return Ok(Self::Tcp(addr.to_string()));
        }
        Err(format!(
            "unrecognized sensor source '{s}' (expected replay:<path>, stdin, or tcp:<addr>)"
        ))
    }
}

impl fmt::Display for SensorSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Replay(path) => write!(f, "replay:{}", path.display()),
            Self::Stdin => write!(f, "stdin"),
            Self::Tcp(addr) => write!(f, "tcp:{addr}"),
        }
    }
}

impl TryFrom<String> for SensorSource {
    type Error = String;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<SensorSource> for String {
    fn from(source: SensorSource) -> Self {
        source.to_string()
    }
}

/// Sensor acquisition configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SensorConfig {
    /// Frame source (None = no sensor; startup fails)
    #[serde(default)]
    pub source: Option<SensorSource>,

    /// Honor recorded frame timestamps during replay
    #[serde(default = "default_pace_replay")]
    pub pace_replay: bool,
}

fn default_pace_replay() -> bool {
    true
}

impl Default for SensorConfig {
    fn default() -> Self {
        Self {
            source: None,
            pace_replay: default_pace_replay(),
        }
    }
}

/// Pointer injection configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PointerConfig {
    /// Injection backend ("enigo", "null")
    #[serde(default = "default_backend")]
    pub backend: String,

    /// Screen width override in pixels (None = query the backend)
    #[serde(default)]
    pub screen_width: Option<u32>,

    /// Screen height override in pixels (None = query the backend)
    #[serde(default)]
    pub screen_height: Option<u32>,
}

fn default_backend() -> String {
    "enigo".to_string()
}

impl Default for PointerConfig {
    fn default() -> Self {
        Self {
            backend: default_backend(),
            screen_width: None,
            screen_height: None,
        }
    }
}

/// Hand tracking and click gating configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrackingConfig {
    /// Which hand drives the pointer
    #[serde(default)]
    pub hand: TrackedHand,

    /// Minimum milliseconds between left clicks
    #[serde(default = "default_click_cooldown_ms")]
    pub left_click_cooldown_ms: u64,

    /// Minimum milliseconds between right clicks
    #[serde(default = "default_click_cooldown_ms")]
    pub right_click_cooldown_ms: u64,
}

fn default_click_cooldown_ms() -> u64 {
    1000
}

impl Default for TrackingConfig {
    fn default() -> Self {
        Self {
            hand: TrackedHand::default(),
            left_click_cooldown_ms: default_click_cooldown_ms(),
            right_click_cooldown_ms: default_click_cooldown_ms(),
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level ("trace", "debug", "info", "warn", "error")
    #[serde(default = "default_level")]
    pub level: String,

    /// Directory for log files (None = console only)
    #[serde(default)]
    pub log_dir: Option<PathBuf>,
}

fn default_level() -> String {
    "info".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_level(),
            log_dir: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_source_parse_replay() {
        let source: SensorSource = "replay:captures/wave.jsonl".parse().unwrap();
        assert_eq!(
            source,
            SensorSource::Replay(PathBuf::from("captures/wave.jsonl"))
        );
        assert_eq!(source.to_string(), "replay:captures/wave.jsonl");
    }

    #[test]
    fn test_source_parse_stdin_and_tcp() {
        assert_eq!(
            "stdin".parse::<SensorSource>().unwrap(),
            SensorSource::Stdin
        );
        assert_eq!(
            "tcp:127.0.0.1:9001".parse::<SensorSource>().unwrap(),
            SensorSource::Tcp("127.0.0.1:9001".to_string())
        );
    }

    #[test]
    fn test_source_parse_rejects_garbage() {
        assert!("".parse::<SensorSource>().is_err());
        assert!("replay:".parse::<SensorSource>().is_err());
        assert!("tcp:".parse::<SensorSource>().is_err());
        assert!("kinect".parse::<SensorSource>().is_err());
    }

    #[test]
    fn test_source_serde_as_string() {
        #[derive(Deserialize)]
        struct Doc {
            source: SensorSource,
        }
        let doc: Doc = toml::from_str(r#"source = "tcp:10.0.0.5:9001""#).unwrap();
        assert_eq!(doc.source, SensorSource::Tcp("10.0.0.5:9001".to_string()));

        assert!(toml::from_str::<Doc>(r#"source = "usb:0""#).is_err());
    }

    #[test]
    fn test_section_defaults() {
        let sensor = SensorConfig::default();
        assert!(sensor.source.is_none());
        assert!(sensor.pace_replay);

        let pointer = PointerConfig::default();
        assert_eq!(pointer.backend, "enigo");
        assert!(pointer.screen_width.is_none());

        let tracking = TrackingConfig::default();
        assert_eq!(tracking.hand, TrackedHand::Left);
        assert_eq!(tracking.left_click_cooldown_ms, 1000);
        assert_eq!(tracking.right_click_cooldown_ms, 1000);
    }
}
