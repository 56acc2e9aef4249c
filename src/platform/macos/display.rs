//! macOS screen geometry and capture.

#![allow(unused_unsafe)]

use crate::capture::Frame;
use crate::error::{Error, Result};
use crate::event::Point;
use objc2_core_graphics::{CGDisplayBounds, CGMainDisplayID, CGPreflightScreenCaptureAccess};
use xcap::Monitor;

/// Size of the main display in points, the unit CGEvent positions use.
pub fn screen_size() -> Point {
    let bounds = unsafe { CGDisplayBounds(CGMainDisplayID()) };
    Point::new(bounds.size.width as i32, bounds.size.height as i32)
}

/// Capture the main display at its native pixel resolution.
pub fn capture_main_display() -> Result<Frame> {
    if !unsafe { CGPreflightScreenCaptureAccess() } {
        return Err(Error::PermissionDenied(
            "Screen Recording access is required; grant it in System Settings > Privacy & Security".into(),
        ));
    }

    let monitors =
        Monitor::all().map_err(|e| Error::CaptureFailed(format!("failed to list monitors: {}", e)))?;
    let primary = monitors
        .into_iter()
        .find(|m| m.is_primary())
        .ok_or_else(|| Error::CaptureFailed("no primary monitor found".into()))?;
    let image = primary
        .capture_image()
        .map_err(|e| Error::CaptureFailed(format!("failed to capture screen: {}", e)))?;

    let (width, height) = (image.width(), image.height());
    Frame::from_rgba(width, height, image.into_raw())
}
