//! Sensor Acquisition and Frame Delivery
//!
//! Everything between the depth sensor and the rest of the program:
//! the device boundary trait, the tracked-body data model, the capture
//! stream format, replay and live-feed devices, and the session that
//! owns a device's lifecycle and pumps frames to a handler.

pub mod body;
pub mod capture;
pub mod device;
pub mod error;
pub mod feed;
pub mod replay;
pub mod session;

pub use body::{
    BodyRecord, BodySlot, CameraPoint, Confidence, DepthPoint, Hand, HandPose, Joint, JointKind,
    TrackedHand, TrackingState,
};
pub use capture::{CaptureHeader, FrameRecord};
pub use device::{DepthIntrinsics, DepthMapper, DepthSensor, FrameSize, FrameStatus, SensorInfo};
pub use error::{Result, SensorError};
pub use feed::{StreamDevice, TcpDevice};
pub use replay::ReplayDevice;
pub use session::{FrameHandler, SensorSession, SessionStats};
