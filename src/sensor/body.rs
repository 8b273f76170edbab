//! Tracked Body Data Model
//!
//! Value types for per-frame skeletal tracking data as delivered by a
//! Kinect v2-class depth sensor: named joints with 3D camera-space
//! positions, per-hand pose classification, and tracking confidence.
//!
//! These types double as the wire model for the line-oriented JSON feed
//! (see [`crate::sensor::capture`]), so the serde attributes here define
//! the capture format.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A position in camera space (meters, sensor origin)
///
/// X grows to the sensor's right, Y grows upward, Z grows away from the
/// sensor along its view axis.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CameraPoint {
    /// Horizontal offset in meters
    pub x: f32,
    /// Vertical offset in meters
    pub y: f32,
    /// Distance from the sensor plane in meters
    pub z: f32,
}

impl CameraPoint {
    /// Create a camera-space point
    pub fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }
}

/// A position in depth-frame pixel space
///
/// Origin top-left of the depth frame, Y grows downward. Values outside
/// the frame bounds are legal and preserved by downstream mapping.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DepthPoint {
    /// Horizontal pixel coordinate
    pub x: f32,
    /// Vertical pixel coordinate
    pub y: f32,
}

/// Joint tracking state reported by the sensor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TrackingState {
    /// Joint not seen this frame
    #[default]
    NotTracked,
    /// Position estimated, not directly observed
    Inferred,
    /// Position directly observed
    Tracked,
}

/// Named skeletal joints of a Kinect v2-class body frame
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[allow(missing_docs)]
pub enum JointKind {
    SpineBase,
    SpineMid,
    SpineShoulder,
    Neck,
    Head,
    ShoulderLeft,
    ElbowLeft,
    WristLeft,
    HandLeft,
    HandTipLeft,
    ThumbLeft,
    ShoulderRight,
    ElbowRight,
    WristRight,
    HandRight,
    HandTipRight,
    ThumbRight,
    HipLeft,
    KneeLeft,
    AnkleLeft,
    FootLeft,
    HipRight,
    KneeRight,
    AnkleRight,
    FootRight,
}

/// Which hand drives the pointer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TrackedHand {
    /// Track the left hand (default)
    #[default]
    Left,
    /// Track the right hand
    Right,
}

impl TrackedHand {
    /// The joint carrying this hand's position
    pub fn joint(self) -> JointKind {
        match self {
            TrackedHand::Left => JointKind::HandLeft,
            TrackedHand::Right => JointKind::HandRight,
        }
    }
}

/// Hand pose classification reported by the sensor
///
/// Closed enumeration: every pose the sensor can report has a variant,
/// and consumers match exhaustively with explicit no-op arms for the
/// non-actionable poses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HandPose {
    /// Sensor could not classify the pose
    #[default]
    Unknown,
    /// Hand not tracked this frame
    NotTracked,
    /// Flat open hand
    Open,
    /// Closed fist
    Closed,
    /// Two fingers extended
    Lasso,
}

/// Confidence the sensor assigns to a hand-pose classification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Confidence {
    /// Classification is uncertain - take no action on it
    Low,
    /// Classification is reliable
    #[default]
    High,
}

/// One joint observation: position plus tracking state
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Joint {
    /// Camera-space position
    pub position: CameraPoint,
    /// Tracking state; omitted on the wire means tracked
    #[serde(default = "tracked")]
    pub state: TrackingState,
}

fn tracked() -> TrackingState {
    TrackingState::Tracked
}

impl Joint {
    /// A directly observed joint at the given position
    pub fn tracked(position: CameraPoint) -> Self {
        Self {
            position,
            state: TrackingState::Tracked,
        }
    }
}

/// Pose and confidence for one hand
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Hand {
    /// Pose classification; omitted on the wire means unknown
    #[serde(default)]
    pub pose: HandPose,
    /// Classification confidence; omitted on the wire means high
    #[serde(default)]
    pub confidence: Confidence,
}

impl Hand {
    /// A hand with the given pose at high confidence
    pub fn high(pose: HandPose) -> Self {
        Self {
            pose,
            confidence: Confidence::High,
        }
    }
}

/// One body slot in a frame: present or empty
pub type BodySlot = Option<BodyRecord>;

/// Per-frame data for one tracked body
///
/// Joints are a sparse map: publishers may omit joints they do not
/// observe, and consumers treat absence like an untracked joint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BodyRecord {
    /// Whether the sensor considers this body tracked; omitted on the
    /// wire means tracked (writing a record implies one was seen)
    #[serde(default = "tracked_body")]
    pub tracked: bool,
    /// Observed joints by name
    #[serde(default)]
    pub joints: BTreeMap<JointKind, Joint>,
    /// Left-hand pose and confidence
    #[serde(default)]
    pub hand_left: Hand,
    /// Right-hand pose and confidence
    #[serde(default)]
    pub hand_right: Hand,
}

fn tracked_body() -> bool {
    true
}

// Matches the wire default above: a constructed record implies a seen body,
// so a derived `Default` (tracked: false) would disagree with deserialization.
impl Default for BodyRecord {
    fn default() -> Self {
        Self {
            tracked: tracked_body(),
            joints: BTreeMap::new(),
            hand_left: Hand::default(),
            hand_right: Hand::default(),
        }
    }
}

impl BodyRecord {
    /// Look up a joint observation by name
    pub fn joint(&self, kind: JointKind) -> Option<&Joint> {
        self.joints.get(&kind)
    }

    /// The pose/confidence pair for the given hand
    pub fn hand(&self, hand: TrackedHand) -> &Hand {
        match hand {
            TrackedHand::Left => &self.hand_left,
            TrackedHand::Right => &self.hand_right,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_minimal_body_record_deserializes() {
        let body: BodyRecord = serde_json::from_str("{}").unwrap();
        assert!(body.tracked);
        assert!(body.joints.is_empty());
        assert_eq!(body.hand_left.pose, HandPose::Unknown);
        assert_eq!(body.hand_left.confidence, Confidence::High);
    }

    #[test]
    fn test_body_record_wire_format() {
        let json = r#"{
            "tracked": true,
            "joints": {
                "hand_left": {"position": {"x": 0.3, "y": -0.1, "z": 1.4}}
            },
            "hand_left": {"pose": "open", "confidence": "high"}
        }"#;
        let body: BodyRecord = serde_json::from_str(json).unwrap();

        let joint = body.joint(JointKind::HandLeft).unwrap();
        assert_eq!(joint.state, TrackingState::Tracked);
        assert_eq!(joint.position, CameraPoint::new(0.3, -0.1, 1.4));
        assert_eq!(body.hand(TrackedHand::Left).pose, HandPose::Open);
        assert_eq!(body.joint(JointKind::HandRight), None);
    }

    #[test]
    fn test_joint_state_roundtrip() {
        let json = r#"{"position": {"x": 0.0, "y": 0.0, "z": 1.0}, "state": "inferred"}"#;
        let joint: Joint = serde_json::from_str(json).unwrap();
        assert_eq!(joint.state, TrackingState::Inferred);

        let back = serde_json::to_string(&joint).unwrap();
        assert!(back.contains("inferred"));
    }

    #[test]
    fn test_hand_pose_names() {
        for (pose, name) in [
            (HandPose::Unknown, "\"unknown\""),
            (HandPose::NotTracked, "\"not_tracked\""),
            (HandPose::Open, "\"open\""),
            (HandPose::Closed, "\"closed\""),
            (HandPose::Lasso, "\"lasso\""),
        ] {
            assert_eq!(serde_json::to_string(&pose).unwrap(), name);
        }
    }

    #[test]
    fn test_tracked_hand_joint_selection() {
        assert_eq!(TrackedHand::Left.joint(), JointKind::HandLeft);
        assert_eq!(TrackedHand::Right.joint(), JointKind::HandRight);
        assert_eq!(TrackedHand::default(), TrackedHand::Left);
    }

    #[test]
    fn test_untracked_body_on_wire() {
        let body: BodyRecord = serde_json::from_str(r#"{"tracked": false}"#).unwrap();
        assert!(!body.tracked);
    }
}
