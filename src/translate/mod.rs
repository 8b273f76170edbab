//! Frame-to-Pointer Translation Layer
//!
//! Everything between a delivered body frame and an OS pointer action:
//! screen-space mapping, click cooldown gating, and the frame handler
//! that ties them to a [`crate::pointer::PointerBackend`].

pub mod cooldown;
pub mod error;
pub mod screen;
pub mod translator;

pub use cooldown::{CooldownState, CooldownTimer};
pub use error::{Result, TranslateError};
pub use screen::{ScreenMapper, ScreenPoint};
pub use translator::{HandInputTranslator, TranslatorStats};
