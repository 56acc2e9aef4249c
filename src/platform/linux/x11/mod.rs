//! X11 backend using XTest and XGetImage.

mod display;
mod simulate;

use crate::backend::Backend;
use crate::capture::Frame;
use crate::error::{Error, Result};
use crate::event::{ButtonKind, Direction, Point};
use crate::keycode::Key;
use std::env;
use std::os::raw::c_int;
use std::ptr::null;
use x11::xlib;
use x11::xtest;

/// A lazily opened X connection.
///
/// Construction never touches the server, so a process without a display
/// only fails when an operation actually needs one.
pub struct X11Backend {
    display: Option<*mut xlib::Display>,
    remaps: simulate::Remaps,
}

impl X11Backend {
    pub fn new() -> Self {
        Self {
            display: None,
            remaps: simulate::Remaps::default(),
        }
    }

    /// The open connection, connecting on first use.
    fn display(&mut self) -> Result<*mut xlib::Display> {
        if let Some(display) = self.display {
            return Ok(display);
        }
        let display = open_display()?;
        self.display = Some(display);
        Ok(display)
    }

    /// Like [`display`](Self::display), but a missing display is a capture
    /// failure rather than a platform gap.
    fn capture_display(&mut self) -> Result<*mut xlib::Display> {
        self.display().map_err(|e| match e {
            Error::PlatformUnsupported(detail) => Error::CaptureFailed(detail),
            other => other,
        })
    }
}

impl Default for X11Backend {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for X11Backend {
    fn drop(&mut self) {
        if let Some(display) = self.display.take() {
            self.remaps.restore(display);
            unsafe { xlib::XCloseDisplay(display) };
        }
    }
}

fn open_display() -> Result<*mut xlib::Display> {
    if env::var_os("DISPLAY").is_none_or(|d| d.is_empty()) {
        let reason = if env::var_os("WAYLAND_DISPLAY").is_some() {
            "Wayland session without XWayland (DISPLAY is not set)"
        } else {
            "no X display (DISPLAY is not set)"
        };
        return Err(Error::PlatformUnsupported(reason.into()));
    }

    let display = unsafe { xlib::XOpenDisplay(null()) };
    if display.is_null() {
        return Err(Error::PlatformUnsupported("failed to open X display".into()));
    }

    let mut event_base: c_int = 0;
    let mut error_base: c_int = 0;
    let mut major: c_int = 0;
    let mut minor: c_int = 0;
    let has_xtest = unsafe {
        xtest::XTestQueryExtension(display, &mut event_base, &mut error_base, &mut major, &mut minor)
    };
    if has_xtest == 0 {
        unsafe { xlib::XCloseDisplay(display) };
        return Err(Error::PlatformUnsupported(
            "X server does not provide the XTest extension".into(),
        ));
    }

    log::debug!("connected to X server, XTest {}.{}", major, minor);
    Ok(display)
}

fn root_window(display: *mut xlib::Display) -> xlib::Window {
    unsafe { xlib::XDefaultRootWindow(display) }
}

impl Backend for X11Backend {
    fn name(&self) -> &'static str {
        "x11"
    }

    fn cursor_position(&mut self) -> Result<Point> {
        let display = self.display()?;
        simulate::pointer_position(display, root_window(display))
    }

    fn screen_size(&mut self) -> Result<Point> {
        let display = self.display()?;
        Ok(display::screen_size(display))
    }

    fn warp_cursor(&mut self, to: Point) -> Result<()> {
        let display = self.display()?;
        simulate::fake_motion(display, to)
    }

    fn button(&mut self, button: ButtonKind, direction: Direction) -> Result<()> {
        let display = self.display()?;
        simulate::fake_button(display, button, direction)
    }

    fn key(&mut self, key: Key, direction: Direction) -> Result<()> {
        let display = self.display()?;
        simulate::fake_key(display, key, direction)
    }

    fn type_char(&mut self, ch: char) -> Result<()> {
        let display = self.display()?;
        simulate::type_char(display, &mut self.remaps, ch)
    }

    fn capture_screen(&mut self) -> Result<Frame> {
        let display = self.capture_display()?;
        let size = display::screen_size(display);
        display::capture_region(display, root_window(display), 0, 0, size.x, size.y)
    }

    fn capture_active_window(&mut self) -> Result<Frame> {
        let display = self.capture_display()?;
        let (x, y, width, height) = display::focused_window_bounds(display)?;
        display::capture_region(display, root_window(display), x, y, width, height)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_does_not_connect() {
        let backend = X11Backend::new();
        assert!(backend.display.is_none());
    }
}
