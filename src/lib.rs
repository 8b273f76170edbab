//! # handmouse
//!
//! Hand-tracking mouse control for Linux - drives the OS pointer from a
//! depth sensor's tracked hand.
//!
//! One tracked body hand becomes the mouse: an open hand moves the
//! cursor, a closed fist left-clicks, the lasso (two-finger) pose
//! right-clicks. Clicks are debounced by independent per-button
//! cooldowns, and only high-confidence poses act at all.
//!
//! # Architecture
//!
//! ```text
//! handmouse
//!   ├─> Sensor Session (frame source acquisition, body frame pump)
//!   ├─> Hand Input Translator (projection, pose dispatch, cooldowns)
//!   └─> Pointer Backend (OS cursor injection via enigo, or dry-run)
//! ```
//!
//! # Data Flow
//!
//! **Frame Path:** Source (replay file / stdin / TCP) → Sensor Session → Translator
//!
//! **Action Path:** Translator → Pointer Backend → OS cursor
//!
//! Joint positions arrive in camera space (meters), are projected to
//! depth-frame pixels through the sensor intrinsics, then rescaled to
//! screen pixels. The rescale is deliberately unclamped so hand motion
//! can reach every edge of the screen.

#![warn(missing_docs)]
#![warn(clippy::all)]

/// Application configuration
pub mod config;

/// OS pointer injection backends
///
/// The production backend drives the real cursor through `enigo`
/// (feature `enigo-backend`, on by default). [`pointer::NullPointer`]
/// records actions instead, for dry runs and headless tests.
pub mod pointer;

/// Sensor acquisition and the body frame pump
///
/// Frame sources speak a line-oriented JSON capture format: one header
/// line describing the sensor, then one frame per line. Three devices
/// implement [`sensor::DepthSensor`]: replay from a recorded file
/// (honoring recorded timing), a stream on stdin, and a TCP feed.
///
/// [`sensor::SensorSession`] owns the device, keeps the per-frame body
/// slots allocated once, and pumps frames into a [`sensor::FrameHandler`]
/// until the feed ends or the session is shut down.
pub mod sensor;

/// Frame-to-pointer translation
///
/// Where gestures become actions: [`translate::HandInputTranslator`]
/// walks each frame's tracked bodies, projects the chosen hand joint to
/// screen coordinates, and dispatches on the hand pose. Click poses are
/// gated by [`translate::CooldownTimer`] so a held fist produces one
/// click per cooldown window, not one per frame.
pub mod translate;

/// Utility functions
pub mod utils;
