//! Windows screen geometry and GDI capture.

use crate::capture::Frame;
use crate::error::{Error, Result};
use crate::event::Point;
use std::mem::size_of;
use windows::Win32::Foundation::RECT;
use windows::Win32::Graphics::Gdi::{
    BI_RGB, BITMAPINFO, BITMAPINFOHEADER, BitBlt, CreateCompatibleBitmap, CreateCompatibleDC,
    DIB_RGB_COLORS, DeleteDC, DeleteObject, GetDC, GetDIBits, HBITMAP, HDC, ReleaseDC,
    SRCCOPY, SelectObject,
};
use windows::Win32::UI::WindowsAndMessaging::{
    GetForegroundWindow, GetSystemMetrics, GetWindowRect, SM_CXSCREEN, SM_CYSCREEN,
};

/// Size of the primary monitor.
pub fn screen_size() -> Point {
    unsafe { Point::new(GetSystemMetrics(SM_CXSCREEN), GetSystemMetrics(SM_CYSCREEN)) }
}

/// Screen rectangle `(x, y, width, height)` of the foreground window.
pub fn foreground_window_bounds() -> Result<(i32, i32, i32, i32)> {
    let hwnd = unsafe { GetForegroundWindow() };
    if hwnd.is_invalid() {
        return Err(Error::CaptureFailed("no foreground window".into()));
    }
    let mut rect = RECT::default();
    unsafe { GetWindowRect(hwnd, &mut rect) }
        .map_err(|e| Error::CaptureFailed(format!("GetWindowRect failed: {}", e)))?;
    Ok((
        rect.left,
        rect.top,
        rect.right - rect.left,
        rect.bottom - rect.top,
    ))
}

/// GDI objects that must be released in reverse order of creation.
struct Capture {
    screen: HDC,
    memory: HDC,
    bitmap: HBITMAP,
}

impl Drop for Capture {
    fn drop(&mut self) {
        unsafe {
            if !self.bitmap.is_invalid() {
                let _ = DeleteObject(self.bitmap.into());
            }
            if !self.memory.is_invalid() {
                let _ = DeleteDC(self.memory);
            }
            ReleaseDC(None, self.screen);
        }
    }
}

/// Copy a rectangle of the desktop into a frame, clipped to the primary monitor.
pub fn capture_region(x: i32, y: i32, width: i32, height: i32) -> Result<Frame> {
    let screen = screen_size();
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
    let (width, height) = (right - left, bottom - top);

    let screen_dc = unsafe { GetDC(None) };
    if screen_dc.is_invalid() {
        return Err(Error::CaptureFailed("GetDC failed".into()));
    }
    let memory = unsafe { CreateCompatibleDC(Some(screen_dc)) };
    let bitmap = unsafe { CreateCompatibleBitmap(screen_dc, width, height) };
    let capture = Capture {
        screen: screen_dc,
        memory,
        bitmap,
    };
    if memory.is_invalid() || bitmap.is_invalid() {
        return Err(Error::CaptureFailed(
            "failed to allocate a compatible bitmap".into(),
        ));
    }

    unsafe {
        let previous = SelectObject(capture.memory, capture.bitmap.into());
        let copied = BitBlt(
            capture.memory,
            0,
            0,
            width,
            height,
            Some(capture.screen),
            left,
            top,
            SRCCOPY,
        );
        SelectObject(capture.memory, previous);
        copied.map_err(|e| Error::CaptureFailed(format!("BitBlt failed: {}", e)))?;
    }

    let mut info = BITMAPINFO {
        bmiHeader: BITMAPINFOHEADER {
            biSize: size_of::<BITMAPINFOHEADER>() as u32,
            biWidth: width,
            // Negative height requests top-down rows.
            biHeight: -height,
            biPlanes: 1,
            biBitCount: 32,
            biCompression: BI_RGB.0,
            ..Default::default()
        },
        ..Default::default()
    };
    let stride = width as usize * 4;
    let mut bgra = vec![0u8; stride * height as usize];
    let lines = unsafe {
        GetDIBits(
            capture.memory,
            capture.bitmap,
            0,
            height as u32,
            Some(bgra.as_mut_ptr().cast()),
            &mut info,
            DIB_RGB_COLORS,
        )
    };
    if lines != height {
        return Err(Error::CaptureFailed(format!(
            "GetDIBits copied {} of {} rows",
            lines, height
        )));
    }

    Frame::from_bgra(width as u32, height as u32, stride, &bgra)
}
