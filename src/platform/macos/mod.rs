//! macOS platform implementation.
//!
//! Posting events needs the Accessibility grant and capturing needs Screen
//! Recording; both are checked up front so a missing grant surfaces as
//! `PermissionDenied` instead of events that silently go nowhere.

mod display;
mod keycodes;
mod simulate;

use crate::backend::Backend;
use crate::capture::Frame;
use crate::error::Result;
use crate::event::{ButtonKind, Direction, Point};
use crate::keycode::Key;
use objc2_core_graphics::CGEventFlags;

/// Backend built on Quartz event services.
pub struct MacBackend {
    /// Modifiers this backend currently holds down.
    flags: CGEventFlags,
    post_access: bool,
}

impl MacBackend {
    pub fn new() -> Self {
        Self {
            flags: CGEventFlags(0),
            post_access: false,
        }
    }

    fn require_post_access(&mut self) -> Result<()> {
        if !self.post_access {
            simulate::ensure_post_access()?;
            self.post_access = true;
        }
        Ok(())
    }
}

impl Default for MacBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl Backend for MacBackend {
    fn name(&self) -> &'static str {
        "macos"
    }

    fn cursor_position(&mut self) -> Result<Point> {
        let location = simulate::mouse_location()?;
        Ok(Point::new(location.x as i32, location.y as i32))
    }

    fn screen_size(&mut self) -> Result<Point> {
        Ok(display::screen_size())
    }

    fn warp_cursor(&mut self, to: Point) -> Result<()> {
        self.require_post_access()?;
        simulate::mouse_move(to)
    }

    fn button(&mut self, button: ButtonKind, direction: Direction) -> Result<()> {
        self.require_post_access()?;
        simulate::button(button, direction)
    }

    fn key(&mut self, key: Key, direction: Direction) -> Result<()> {
        self.require_post_access()?;
        simulate::key(key, direction, &mut self.flags)
    }

    fn type_char(&mut self, ch: char) -> Result<()> {
        self.require_post_access()?;
        simulate::type_char(ch)
    }

    fn capture_screen(&mut self) -> Result<Frame> {
        display::capture_main_display()
    }
}
