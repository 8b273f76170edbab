//! OS Pointer Backends
//!
//! [`PointerBackend`] is the seam to whatever injects cursor movement
//! into the operating system. [`EnigoPointer`] is the production
//! backend; [`NullPointer`] logs and counts without touching the OS,
//! for dry runs and headless builds.

use tracing::debug;

#[cfg(feature = "enigo-backend")]
use crate::pointer::error::PointerError;
use crate::pointer::error::Result;

/// Mouse buttons this bridge can press
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerButton {
    /// Primary button
    Left,
    /// Secondary button
    Right,
}

impl PointerButton {
    /// Lowercase label for log lines
    pub fn label(self) -> &'static str {
        match self {
            PointerButton::Left => "left",
            PointerButton::Right => "right",
        }
    }
}

impl std::fmt::Display for PointerButton {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Injects pointer actions into the OS
#[cfg_attr(test, mockall::automock)]
pub trait PointerBackend: Send {
    /// Move the cursor to absolute screen coordinates
    fn move_to(&mut self, x: i32, y: i32) -> Result<()>;

    /// Press and release a button at the current cursor position
    fn click(&mut self, button: PointerButton) -> Result<()>;

    /// Width and height of the primary display in pixels
    fn screen_size(&self) -> Result<(u32, u32)>;
}

impl<T: PointerBackend + ?Sized> PointerBackend for Box<T> {
    fn move_to(&mut self, x: i32, y: i32) -> Result<()> {
        (**self).move_to(x, y)
    }

    fn click(&mut self, button: PointerButton) -> Result<()> {
        (**self).click(button)
    }

    fn screen_size(&self) -> Result<(u32, u32)> {
        (**self).screen_size()
    }
}

/// Production backend injecting through enigo
#[cfg(feature = "enigo-backend")]
pub struct EnigoPointer {
    enigo: enigo::Enigo,
}

#[cfg(feature = "enigo-backend")]
impl EnigoPointer {
    /// Connect to the display session
    ///
    /// Fails with [`PointerError::Unavailable`] when no display session
    /// is usable (headless machine, missing X11/Wayland environment).
    pub fn new() -> Result<Self> {
        let enigo = enigo::Enigo::new(&enigo::Settings::default())
            .map_err(|e| PointerError::Unavailable(e.to_string()))?;
        Ok(Self { enigo })
    }
}

#[cfg(feature = "enigo-backend")]
impl PointerBackend for EnigoPointer {
    fn move_to(&mut self, x: i32, y: i32) -> Result<()> {
        use enigo::Mouse;
        self.enigo
            .move_mouse(x, y, enigo::Coordinate::Abs)
            .map_err(|e| PointerError::Injection(e.to_string()))
    }

    fn click(&mut self, button: PointerButton) -> Result<()> {
        use enigo::Mouse;
        let button = match button {
            PointerButton::Left => enigo::Button::Left,
            PointerButton::Right => enigo::Button::Right,
        };
        self.enigo
            .button(button, enigo::Direction::Click)
            .map_err(|e| PointerError::Injection(e.to_string()))
    }

    fn screen_size(&self) -> Result<(u32, u32)> {
        use enigo::Mouse;
        let (width, height) = self
            .enigo
            .main_display()
            .map_err(|e| PointerError::ScreenQuery(e.to_string()))?;
        if width <= 0 || height <= 0 {
            return Err(PointerError::ScreenQuery(format!(
                "display reported {}x{}",
                width, height
            )));
        }
        Ok((width as u32, height as u32))
    }
}

/// Dry-run backend: logs and counts, injects nothing
pub struct NullPointer {
    screen: (u32, u32),
    moves: u64,
    clicks: u64,
    last_position: Option<(i32, i32)>,
}

impl NullPointer {
    /// A null backend reporting a 1920x1080 primary display
    pub fn new() -> Self {
        Self::with_screen(1920, 1080)
    }

    /// A null backend reporting the given display bounds
    pub fn with_screen(width: u32, height: u32) -> Self {
        Self {
            screen: (width, height),
            moves: 0,
            clicks: 0,
            last_position: None,
        }
    }

    /// Cursor moves observed
    pub fn moves(&self) -> u64 {
        self.moves
    }

    /// Clicks observed (both buttons)
    pub fn clicks(&self) -> u64 {
        self.clicks
    }

    /// Last position a move would have set
    pub fn last_position(&self) -> Option<(i32, i32)> {
        self.last_position
    }
}

impl Default for NullPointer {
    fn default() -> Self {
        Self::new()
    }
}

impl PointerBackend for NullPointer {
    fn move_to(&mut self, x: i32, y: i32) -> Result<()> {
        self.moves += 1;
        self.last_position = Some((x, y));
        debug!(x, y, "dry-run cursor move");
        Ok(())
    }

    fn click(&mut self, button: PointerButton) -> Result<()> {
        self.clicks += 1;
        debug!(button = %button, "dry-run click");
        Ok(())
    }

    fn screen_size(&self) -> Result<(u32, u32)> {
        Ok(self.screen)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_null_pointer_counts_actions() {
        let mut pointer = NullPointer::new();

        pointer.move_to(100, 200).unwrap();
        pointer.move_to(150, 250).unwrap();
        pointer.click(PointerButton::Left).unwrap();

        assert_eq!(pointer.moves(), 2);
        assert_eq!(pointer.clicks(), 1);
        assert_eq!(pointer.last_position(), Some((150, 250)));
    }

    #[test]
    fn test_null_pointer_screen_override() {
        let pointer = NullPointer::with_screen(2560, 1440);
        assert_eq!(pointer.screen_size().unwrap(), (2560, 1440));
    }

    #[test]
    fn test_null_pointer_accepts_offscreen_moves() {
        // Out-of-bounds coordinates pass through; the mapping layer does
        // not clamp and neither does the backend
        let mut pointer = NullPointer::new();
        pointer.move_to(-50, 4000).unwrap();
        assert_eq!(pointer.last_position(), Some((-50, 4000)));
    }

    #[test]
    fn test_button_labels() {
        assert_eq!(PointerButton::Left.label(), "left");
        assert_eq!(PointerButton::Right.to_string(), "right");
    }

    #[test]
    fn test_boxed_backend_delegates() {
        let mut boxed: Box<dyn PointerBackend> = Box::new(NullPointer::new());
        boxed.move_to(10, 20).unwrap();
        assert_eq!(boxed.screen_size().unwrap(), (1920, 1080));
    }
}
