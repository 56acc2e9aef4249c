//! Fallback for targets without a native backend.

use crate::backend::Backend;
use crate::capture::Frame;
use crate::error::{Error, Result};
use crate::event::{ButtonKind, Direction, Point};
use crate::keycode::Key;

/// Reports every operation as unsupported.
#[derive(Debug, Default)]
pub struct UnsupportedBackend;

impl UnsupportedBackend {
    pub fn new() -> Self {
        Self
    }

    fn unsupported<T>(&self) -> Result<T> {
        Err(Error::PlatformUnsupported(format!(
            "no input backend for {} in this build",
            std::env::consts::OS
        )))
    }
}

impl Backend for UnsupportedBackend {
    fn name(&self) -> &'static str {
        "unsupported"
    }

    fn cursor_position(&mut self) -> Result<Point> {
        self.unsupported()
    }

    fn screen_size(&mut self) -> Result<Point> {
        self.unsupported()
    }

    fn warp_cursor(&mut self, _to: Point) -> Result<()> {
        self.unsupported()
    }

    fn button(&mut self, _button: ButtonKind, _direction: Direction) -> Result<()> {
        self.unsupported()
    }

    fn key(&mut self, _key: Key, _direction: Direction) -> Result<()> {
        self.unsupported()
    }

    fn type_char(&mut self, _ch: char) -> Result<()> {
        self.unsupported()
    }

    fn capture_screen(&mut self) -> Result<Frame> {
        self.unsupported()
    }

    fn capture_active_window(&mut self) -> Result<Frame> {
        self.unsupported()
    }
}
