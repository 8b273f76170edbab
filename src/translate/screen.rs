//! Depth-to-Screen Rescaling
//!
//! [`ScreenMapper`] performs the exact linear rescale from depth-frame
//! pixels to screen pixels:
//!
//! ```text
//! screen_x = depth_x / frame_width  * screen_width
//! screen_y = depth_y / frame_height * screen_height
//! ```
//!
//! Deliberately unclamped: a hand projected outside the depth frame
//! yields an off-screen coordinate rather than one pinned to an edge,
//! so aiming past a screen edge behaves proportionally. The division is
//! made safe by rejecting zero dimensions at construction.

use crate::sensor::body::DepthPoint;
use crate::sensor::device::FrameSize;
use crate::translate::error::{Result, TranslateError};

/// A screen coordinate in pixels (fractional; truncated at injection)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScreenPoint {
    /// Horizontal screen coordinate
    pub x: f32,
    /// Vertical screen coordinate
    pub y: f32,
}

/// Linear depth-frame to screen rescale
#[derive(Debug, Clone, Copy)]
pub struct ScreenMapper {
    frame_width: f32,
    frame_height: f32,
    screen_width: f32,
    screen_height: f32,
}

impl ScreenMapper {
    /// Build a mapper for the given frame and screen dimensions
    ///
    /// Rejects zero dimensions on either side; everything else,
    /// including a screen smaller than the depth frame, is legal.
    pub fn new(frame: FrameSize, screen_width: u32, screen_height: u32) -> Result<Self> {
        if frame.width == 0 || frame.height == 0 {
            return Err(TranslateError::InvalidFrameSize(frame.width, frame.height));
        }
        if screen_width == 0 || screen_height == 0 {
            return Err(TranslateError::InvalidScreenBounds(
                screen_width,
                screen_height,
            ));
        }

        Ok(Self {
            frame_width: frame.width as f32,
            frame_height: frame.height as f32,
            screen_width: screen_width as f32,
            screen_height: screen_height as f32,
        })
    }

    /// Rescale a depth-frame point to screen pixels
    pub fn to_screen(&self, depth: DepthPoint) -> ScreenPoint {
        ScreenPoint {
            x: depth.x / self.frame_width * self.screen_width,
            y: depth.y / self.frame_height * self.screen_height,
        }
    }
}
