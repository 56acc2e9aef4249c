//! X11 screen geometry and capture.

use crate::capture::Frame;
use crate::error::{Error, Result};
use crate::event::Point;
use std::os::raw::{c_int, c_uint, c_ulong};
use x11::xlib;

pub fn screen_size(display: *mut xlib::Display) -> Point {
    unsafe {
        let screen = xlib::XDefaultScreen(display);
        Point::new(
            xlib::XDisplayWidth(display, screen),
            xlib::XDisplayHeight(display, screen),
        )
    }
}

/// Root-relative bounds `(x, y, width, height)` of the window holding input focus.
pub fn focused_window_bounds(display: *mut xlib::Display) -> Result<(c_int, c_int, c_int, c_int)> {
    let mut focus: xlib::Window = 0;
    let mut revert_to: c_int = 0;
    unsafe { xlib::XGetInputFocus(display, &mut focus, &mut revert_to) };

    // 0 is None and 1 is PointerRoot.
    if focus <= 1 {
        return Err(Error::CaptureFailed("no window has input focus".into()));
    }

    let mut attributes: xlib::XWindowAttributes = unsafe { std::mem::zeroed() };
    if unsafe { xlib::XGetWindowAttributes(display, focus, &mut attributes) } == 0 {
        return Err(Error::CaptureFailed(
            "failed to read focused window attributes".into(),
        ));
    }

    let root = unsafe { xlib::XDefaultRootWindow(display) };
    let mut x: c_int = 0;
    let mut y: c_int = 0;
    let mut child: xlib::Window = 0;
    unsafe {
        xlib::XTranslateCoordinates(display, focus, root, 0, 0, &mut x, &mut y, &mut child);
    }

    Ok((x, y, attributes.width, attributes.height))
}

/// Capture a rectangle of `drawable`, clipped to the screen.
pub fn capture_region(
    display: *mut xlib::Display,
    drawable: xlib::Drawable,
    x: c_int,
    y: c_int,
    width: c_int,
    height: c_int,
) -> Result<Frame> {
    let screen = screen_size(display);
    let left = x.max(0);
    let top = y.max(0);
    let right = x.saturating_add(width).min(screen.x);
    let bottom = y.saturating_add(height).min(screen.y);
    if right <= left || bottom <= top {
        return Err(Error::CaptureFailed(format!(
            "region {}x{} at ({}, {}) is off screen",
            width, height, x, y
        )));
    }

    let (width, height) = ((right - left) as c_uint, (bottom - top) as c_uint);
    let image = unsafe {
        xlib::XGetImage(
            display,
            drawable,
            left,
            top,
            width,
            height,
            xlib::XAllPlanes(),
            xlib::ZPixmap,
        )
    };
    if image.is_null() {
        return Err(Error::CaptureFailed("XGetImage returned no image".into()));
    }

    let frame = unsafe { image_to_frame(&*image) };
    unsafe { xlib::XDestroyImage(image) };
    frame
}

/// Convert a ZPixmap image with 32 bits per pixel into RGBA.
unsafe fn image_to_frame(image: &xlib::XImage) -> Result<Frame> {
    if image.bits_per_pixel != 32 {
        return Err(Error::CaptureFailed(format!(
            "unsupported pixel format: {} bits per pixel",
            image.bits_per_pixel
        )));
    }

    let width = image.width as usize;
    let height = image.height as usize;
    let stride = image.bytes_per_line as usize;
    let data = unsafe { std::slice::from_raw_parts(image.data as *const u8, stride * height) };
    let big_endian = image.byte_order == xlib::MSBFirst;

    let mut rgba = Vec::with_capacity(width * height * 4);
    for row in data.chunks_exact(stride) {
        for px in row[..width * 4].chunks_exact(4) {
            let bytes = [px[0], px[1], px[2], px[3]];
            let pixel = if big_endian {
                u32::from_be_bytes(bytes)
            } else {
                u32::from_le_bytes(bytes)
            } as c_ulong;
            rgba.extend_from_slice(&[
                channel(pixel, image.red_mask),
                channel(pixel, image.green_mask),
                channel(pixel, image.blue_mask),
                0xFF,
            ]);
        }
    }
    Frame::from_rgba(image.width as u32, image.height as u32, rgba)
}

/// Extract an 8-bit channel selected by `mask`.
fn channel(pixel: c_ulong, mask: c_ulong) -> u8 {
    if mask == 0 {
        return 0;
    }
    let value = (pixel & mask) >> mask.trailing_zeros();
    let bits = (mask >> mask.trailing_zeros()).count_ones();
    if bits >= 8 {
        (value >> (bits - 8)) as u8
    } else {
        // Scale narrow channels (e.g. 5 or 6 bits) up to the full range.
        ((value * 0xFF) / ((1 << bits) - 1)) as u8
    }
}
