//! Windows event simulation using SendInput.

use crate::error::{Error, Result};
use crate::event::{ButtonKind, Direction, Point};
use crate::keycode::Key;
use std::mem::size_of;
use windows::Win32::Foundation::{ERROR_ACCESS_DENIED, GetLastError, POINT};
use windows::Win32::UI::Input::KeyboardAndMouse::{
    INPUT, INPUT_0, INPUT_KEYBOARD, INPUT_MOUSE, KEYBD_EVENT_FLAGS, KEYBDINPUT,
    KEYEVENTF_EXTENDEDKEY, KEYEVENTF_KEYUP, KEYEVENTF_UNICODE, MOUSE_EVENT_FLAGS,
    MOUSEEVENTF_LEFTDOWN, MOUSEEVENTF_LEFTUP, MOUSEEVENTF_MIDDLEDOWN, MOUSEEVENTF_MIDDLEUP,
    MOUSEEVENTF_RIGHTDOWN, MOUSEEVENTF_RIGHTUP, MOUSEINPUT, SendInput, VIRTUAL_KEY, VK_SHIFT,
    VkKeyScanW,
};
use windows::Win32::UI::WindowsAndMessaging::{GetCursorPos, SetCursorPos};

use super::keycodes::{is_extended, key_to_vk};

pub fn cursor_position() -> Result<Point> {
    let mut point = POINT::default();
    unsafe { GetCursorPos(&mut point) }
        .map_err(|e| Error::SimulateFailed(format!("GetCursorPos failed: {}", e)))?;
    Ok(Point::new(point.x, point.y))
}

pub fn warp_cursor(to: Point) -> Result<()> {
    unsafe { SetCursorPos(to.x, to.y) }.map_err(|e| {
        if e.code() == ERROR_ACCESS_DENIED.to_hresult() {
            Error::PermissionDenied("SetCursorPos was blocked by the desktop".into())
        } else {
            Error::SimulateFailed(format!("SetCursorPos failed: {}", e))
        }
    })
}

/// Send a batch of inputs, reporting whether all of them were accepted.
fn send(inputs: &[INPUT], what: &str) -> Result<()> {
    let sent = unsafe { SendInput(inputs, size_of::<INPUT>() as i32) };
    if sent as usize == inputs.len() {
        return Ok(());
    }

    // SendInput is silently filtered by UIPI when the target runs elevated.
    if unsafe { GetLastError() } == ERROR_ACCESS_DENIED {
        Err(Error::PermissionDenied(format!(
            "SendInput for {} was blocked by a higher-integrity window",
            what
        )))
    } else {
        Err(Error::SimulateFailed(format!(
            "SendInput accepted {} of {} {} events",
            sent,
            inputs.len(),
            what
        )))
    }
}

fn mouse_input(flags: MOUSE_EVENT_FLAGS) -> INPUT {
    INPUT {
        r#type: INPUT_MOUSE,
        Anonymous: INPUT_0 {
            mi: MOUSEINPUT {
                dx: 0,
                dy: 0,
                mouseData: 0,
                dwFlags: flags,
                time: 0,
                dwExtraInfo: 0,
            },
        },
    }
}

fn keyboard_input(vk: u16, scan: u16, flags: KEYBD_EVENT_FLAGS) -> INPUT {
    INPUT {
        r#type: INPUT_KEYBOARD,
        Anonymous: INPUT_0 {
            ki: KEYBDINPUT {
                wVk: VIRTUAL_KEY(vk),
                wScan: scan,
                dwFlags: flags,
                time: 0,
                dwExtraInfo: 0,
            },
        },
    }
}

fn button_flags(button: ButtonKind, direction: Direction) -> MOUSE_EVENT_FLAGS {
    match (button, direction) {
        (ButtonKind::Left, Direction::Press) => MOUSEEVENTF_LEFTDOWN,
        (ButtonKind::Left, Direction::Release) => MOUSEEVENTF_LEFTUP,
        (ButtonKind::Right, Direction::Press) => MOUSEEVENTF_RIGHTDOWN,
        (ButtonKind::Right, Direction::Release) => MOUSEEVENTF_RIGHTUP,
        (ButtonKind::Middle, Direction::Press) => MOUSEEVENTF_MIDDLEDOWN,
        (ButtonKind::Middle, Direction::Release) => MOUSEEVENTF_MIDDLEUP,
    }
}

/// Press or release a mouse button at the current pointer position.
pub fn button(button: ButtonKind, direction: Direction) -> Result<()> {
    send(&[mouse_input(button_flags(button, direction))], "mouse")
}

/// Press or release a key by virtual-key code.
pub fn key(key: Key, direction: Direction) -> Result<()> {
    let mut flags = KEYBD_EVENT_FLAGS(0);
    if is_extended(key) {
        flags |= KEYEVENTF_EXTENDEDKEY;
    }
    if !direction.is_press() {
        flags |= KEYEVENTF_KEYUP;
    }
    send(&[keyboard_input(key_to_vk(key), 0, flags)], "keyboard")
}

/// Split a `VkKeyScanW` result into the key and whether Shift is its only
/// modifier. Keys needing Ctrl or Alt (AltGr layers) are left to the unicode
/// path.
fn layout_key(scan: i16) -> Option<(u16, bool)> {
    if scan == -1 {
        return None;
    }
    let vk = (scan as u16) & 0xFF;
    match (scan as u16) >> 8 {
        0 => Some((vk, false)),
        1 => Some((vk, true)),
        _ => None,
    }
}

/// Type one character.
///
/// Characters the active layout has a key for are typed on that key so
/// applications see ordinary key events; everything else goes through
/// `KEYEVENTF_UNICODE`, one UTF-16 unit at a time.
pub fn type_char(ch: char) -> Result<()> {
    let mut units = [0u16; 2];
    let units = ch.encode_utf16(&mut units);

    if let [unit] = units {
        if let Some((vk, shift)) = layout_key(unsafe { VkKeyScanW(*unit) }) {
            let tap = [
                keyboard_input(vk, 0, KEYBD_EVENT_FLAGS(0)),
                keyboard_input(vk, 0, KEYEVENTF_KEYUP),
            ];
            let inputs: Vec<INPUT> = if shift {
                std::iter::once(keyboard_input(VK_SHIFT.0, 0, KEYBD_EVENT_FLAGS(0)))
                    .chain(tap)
                    .chain(std::iter::once(keyboard_input(VK_SHIFT.0, 0, KEYEVENTF_KEYUP)))
                    .collect()
            } else {
                tap.to_vec()
            };
            return send(&inputs, "keyboard");
        }
    }

    let inputs: Vec<INPUT> = units
        .iter()
        .flat_map(|&unit| {
            [
                keyboard_input(0, unit, KEYEVENTF_UNICODE),
                keyboard_input(0, unit, KEYEVENTF_UNICODE | KEYEVENTF_KEYUP),
            ]
        })
        .collect();
    send(&inputs, "unicode")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_button_flags_pair_up() {
        assert_eq!(
            button_flags(ButtonKind::Left, Direction::Press),
            MOUSEEVENTF_LEFTDOWN
        );
        assert_eq!(
            button_flags(ButtonKind::Middle, Direction::Release),
            MOUSEEVENTF_MIDDLEUP
        );
    }

    #[test]
    fn test_layout_key_decoding() {
        assert_eq!(layout_key(-1), None);
        assert_eq!(layout_key(0x0041), Some((0x41, false)));
        assert_eq!(layout_key(0x0141), Some((0x41, true)));
        // AltGr: Ctrl+Alt on the high byte.
        assert_eq!(layout_key(0x0651), None);
    }
}
