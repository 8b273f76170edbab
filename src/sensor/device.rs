//! Sensor Device Boundary
//!
//! The [`DepthSensor`] trait is the seam between this crate and whatever
//! actually produces body frames. Nothing here links against a vendor
//! SDK: the shipped implementations replay recorded captures
//! ([`crate::sensor::replay`]) or consume a live line feed
//! ([`crate::sensor::feed`]), and a native SDK binding would implement
//! the same trait.
//!
//! The device reports its geometry once at open time ([`SensorInfo`]);
//! camera-to-depth conversion is a pure function of the reported
//! intrinsics ([`DepthMapper`]) and never goes back to the device.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::sensor::body::{BodySlot, CameraPoint, DepthPoint};
use crate::sensor::error::Result;

/// Depth frame dimensions in pixels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FrameSize {
    /// Frame width in pixels
    pub width: u32,
    /// Frame height in pixels
    pub height: u32,
}

impl FrameSize {
    /// Native depth resolution of a Kinect v2 sensor
    pub const KINECT_V2: FrameSize = FrameSize {
        width: 512,
        height: 424,
    };

    /// Create a frame size
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }
}

/// Pinhole intrinsics of the depth camera
///
/// Focal lengths and principal point in depth pixels. The defaults are
/// the nominal factory values of the Kinect v2 depth camera.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DepthIntrinsics {
    /// Horizontal focal length
    pub fx: f32,
    /// Vertical focal length
    pub fy: f32,
    /// Principal point X
    pub cx: f32,
    /// Principal point Y
    pub cy: f32,
}

impl Default for DepthIntrinsics {
    fn default() -> Self {
        Self {
            fx: 365.456,
            fy: 365.456,
            cx: 254.878,
            cy: 205.395,
        }
    }
}

/// Sensor geometry reported at open time and cached for the session
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SensorInfo {
    /// Depth frame dimensions
    pub frame: FrameSize,
    /// Number of body slots the sensor tracks simultaneously
    pub body_capacity: usize,
    /// Depth camera intrinsics
    pub intrinsics: DepthIntrinsics,
}

impl SensorInfo {
    /// Geometry of a stock Kinect v2: 512x424 depth frame, six bodies
    pub fn kinect_v2() -> Self {
        Self {
            frame: FrameSize::KINECT_V2,
            body_capacity: 6,
            intrinsics: DepthIntrinsics::default(),
        }
    }
}

/// Outcome of one frame acquisition
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameStatus {
    /// Body slots were refreshed in place; deliver them
    Refreshed,
    /// No usable frame this time; skip without touching state
    Empty,
    /// The stream is over; the pump should stop
    Ended,
}

/// A source of body frames
///
/// Implementations are opened once, polled for frames until [`FrameStatus::Ended`],
/// and closed once. `next_frame` refreshes the caller's slot array in
/// place; slots the frame does not mention are cleared.
#[async_trait]
pub trait DepthSensor: Send {
    /// Activate the device and report its geometry
    async fn open(&mut self) -> Result<SensorInfo>;

    /// Acquire the next frame, refreshing `slots` in place
    ///
    /// Returns [`FrameStatus::Empty`] for a dropped or undecodable frame
    /// (the caller skips it) and [`FrameStatus::Ended`] at end of stream.
    async fn next_frame(&mut self, slots: &mut [BodySlot]) -> Result<FrameStatus>;

    /// Deactivate the device; must be idempotent
    fn close(&mut self);
}

/// Camera-space to depth-space projection
///
/// Cheap value derived from the sensor's reported intrinsics; handed out
/// at session open and used read-only for the session lifetime.
#[derive(Debug, Clone, Copy)]
pub struct DepthMapper {
    intrinsics: DepthIntrinsics,
}

impl DepthMapper {
    /// Build a mapper from depth-camera intrinsics
    pub fn new(intrinsics: DepthIntrinsics) -> Self {
        Self { intrinsics }
    }

    /// Project a camera-space point onto the depth frame
    ///
    /// Returns `None` for points at or behind the sensor plane (z <= 0),
    /// which have no depth-frame projection. Points that project outside
    /// the frame bounds are returned as-is.
    pub fn camera_to_depth(&self, point: CameraPoint) -> Option<DepthPoint> {
        if point.z <= 0.0 {
            return None;
        }

        let i = &self.intrinsics;
        Some(DepthPoint {
            x: i.cx + point.x / point.z * i.fx,
            // Camera Y grows upward, depth rows grow downward
            y: i.cy - point.y / point.z * i.fy,
        })
    }
}
