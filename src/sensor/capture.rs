//! Capture Stream Format
//!
//! Line-oriented JSON format shared by recorded captures and live feeds:
//! one header line describing the sensor, then one [`FrameRecord`] per
//! line. Replay honors `offset_ms` for pacing; live feeds ignore it.
//!
//! ```text
//! {"depth_width":512,"depth_height":424,"body_capacity":6}
//! {"offset_ms":0,"bodies":[{"joints":{"hand_left":{"position":{"x":0.0,"y":0.0,"z":1.2}}},"hand_left":{"pose":"open"}}]}
//! {"offset_ms":33,"bodies":[null]}
//! ```
//!
//! Header fields default to Kinect v2 geometry, so `{}` is a valid
//! header. Unknown header fields are rejected to keep a missing header
//! from being silently confused with a frame line.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::sensor::body::BodySlot;
use crate::sensor::device::{DepthIntrinsics, FrameSize, SensorInfo};
use crate::sensor::error::{Result, SensorError};

/// First line of a capture stream: the sensor's geometry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CaptureHeader {
    /// Depth frame width in pixels
    #[serde(default = "default_depth_width")]
    pub depth_width: u32,
    /// Depth frame height in pixels
    #[serde(default = "default_depth_height")]
    pub depth_height: u32,
    /// Number of body slots per frame
    #[serde(default = "default_body_capacity")]
    pub body_capacity: usize,
    /// Depth camera intrinsics
    #[serde(default)]
    pub intrinsics: DepthIntrinsics,
    /// When the capture was recorded, if known
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recorded_at: Option<DateTime<Utc>>,
}

fn default_depth_width() -> u32 {
    FrameSize::KINECT_V2.width
}

fn default_depth_height() -> u32 {
    FrameSize::KINECT_V2.height
}

fn default_body_capacity() -> usize {
    6
}

impl Default for CaptureHeader {
    fn default() -> Self {
        Self {
            depth_width: default_depth_width(),
            depth_height: default_depth_height(),
            body_capacity: default_body_capacity(),
            intrinsics: DepthIntrinsics::default(),
            recorded_at: None,
        }
    }
}

impl CaptureHeader {
    /// The sensor geometry this header describes
    pub fn to_info(&self) -> SensorInfo {
        SensorInfo {
            frame: FrameSize::new(self.depth_width, self.depth_height),
            body_capacity: self.body_capacity,
            intrinsics: self.intrinsics,
        }
    }
}

/// One frame on the wire
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct FrameRecord {
    /// Milliseconds since capture start; replay pacing only
    #[serde(default)]
    pub offset_ms: u64,
    /// Body slots in sensor order; `null` entries are empty slots
    #[serde(default)]
    pub bodies: Vec<BodySlot>,
}

impl FrameRecord {
    /// Move this frame's bodies into the session's slot array
    ///
    /// Slots beyond the frame's body list are cleared; bodies beyond the
    /// array's capacity are dropped. Returns the number dropped.
    pub fn apply(self, slots: &mut [BodySlot]) -> usize {
        let capacity = slots.len();
        let provided = self.bodies.len();

        let mut bodies = self.bodies.into_iter();
        for slot in slots.iter_mut() {
            *slot = bodies.next().flatten();
        }

        provided.saturating_sub(capacity)
    }
}

/// Parse the header line of a capture stream
pub fn parse_header(line: &str) -> Result<CaptureHeader> {
    serde_json::from_str(line).map_err(|e| SensorError::Header(e.to_string()))
}

/// Parse one frame line
///
/// Errors here mean one undecodable frame, not a broken stream; callers
/// skip the line.
pub fn parse_frame(line: &str) -> serde_json::Result<FrameRecord> {
    serde_json::from_str(line)
}
