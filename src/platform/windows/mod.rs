//! Windows platform implementation.

mod display;
mod keycodes;
mod simulate;

use crate::backend::Backend;
use crate::capture::Frame;
use crate::error::Result;
use crate::event::{ButtonKind, Direction, Point};
use crate::keycode::Key;

/// Backend built on `SendInput` and GDI.
#[derive(Debug, Default)]
pub struct WindowsBackend;

impl WindowsBackend {
    pub fn new() -> Self {
        Self
    }
}

impl Backend for WindowsBackend {
    fn name(&self) -> &'static str {
        "windows"
    }

    fn cursor_position(&mut self) -> Result<Point> {
        simulate::cursor_position()
    }

    fn screen_size(&mut self) -> Result<Point> {
        Ok(display::screen_size())
    }

    fn warp_cursor(&mut self, to: Point) -> Result<()> {
        simulate::warp_cursor(to)
    }

    fn button(&mut self, button: ButtonKind, direction: Direction) -> Result<()> {
        simulate::button(button, direction)
    }

    fn key(&mut self, key: Key, direction: Direction) -> Result<()> {
        simulate::key(key, direction)
    }

    fn type_char(&mut self, ch: char) -> Result<()> {
        simulate::type_char(ch)
    }

    fn capture_screen(&mut self) -> Result<Frame> {
        let size = display::screen_size();
        display::capture_region(0, 0, size.x, size.y)
    }

    fn capture_active_window(&mut self) -> Result<Frame> {
        let (x, y, width, height) = display::foreground_window_bounds()?;
        display::capture_region(x, y, width, height)
    }
}
