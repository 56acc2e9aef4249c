//! macOS event simulation using CGEvent.

#![allow(unused_unsafe)]

use crate::error::{Error, Result};
use crate::event::{ButtonKind, Direction, Point};
use crate::keycode::Key;
use objc2_core_foundation::{CFRetained, CGPoint};
use objc2_core_graphics::{
    CGEvent, CGEventField, CGEventFlags, CGEventSource, CGEventSourceStateID, CGEventTapLocation,
    CGEventType, CGMouseButton, CGPreflightPostEventAccess,
};

use super::keycodes::key_to_keycode;

/// Fail with `PermissionDenied` unless the process may post events.
pub fn ensure_post_access() -> Result<()> {
    if unsafe { CGPreflightPostEventAccess() } {
        Ok(())
    } else {
        Err(Error::PermissionDenied(
            "Accessibility access is required to post input events; grant it in System Settings > Privacy & Security".into(),
        ))
    }
}

fn event_source() -> Result<CFRetained<CGEventSource>> {
    unsafe { CGEventSource::new(CGEventSourceStateID::HIDSystemState) }
        .ok_or_else(|| Error::SimulateFailed("Failed to create event source".into()))
}

fn post(event: &CGEvent) {
    unsafe { CGEvent::post(CGEventTapLocation::HIDEventTap, Some(event)) };
}

/// Get current mouse location
pub fn mouse_location() -> Result<CGPoint> {
    let source = event_source()?;
    let event = unsafe { CGEvent::new(Some(&source)) }
        .ok_or_else(|| Error::SimulateFailed("Failed to create event".into()))?;
    Ok(unsafe { CGEvent::location(Some(&event)) })
}

/// The flag bit a modifier key contributes while held.
fn modifier_flag(key: Key) -> Option<CGEventFlags> {
    match key {
        Key::ShiftLeft | Key::ShiftRight => Some(CGEventFlags::MaskShift),
        Key::ControlLeft | Key::ControlRight => Some(CGEventFlags::MaskControl),
        Key::AltLeft | Key::AltRight => Some(CGEventFlags::MaskAlternate),
        Key::MetaLeft | Key::MetaRight => Some(CGEventFlags::MaskCommand),
        _ => None,
    }
}

/// Press or release a key.
///
/// `flags` holds the modifiers currently down and is updated for modifier
/// keys, so later events carry the right modifier state.
pub fn key(key: Key, direction: Direction, flags: &mut CGEventFlags) -> Result<()> {
    let keycode = key_to_keycode(key)
        .ok_or_else(|| Error::UnsupportedKey(format!("{:?} has no macOS keycode", key)))?;
    let source = event_source()?;

    if let Some(flag) = modifier_flag(key) {
        // Modifier keys are delivered as FlagsChanged events.
        let event = unsafe { CGEvent::new(Some(&source)) }
            .ok_or_else(|| Error::SimulateFailed("Failed to create event".into()))?;
        if direction.is_press() {
            flags.insert(flag);
        } else {
            flags.remove(flag);
        }
        unsafe {
            CGEvent::set_type(Some(&event), CGEventType::FlagsChanged);
            CGEvent::set_integer_value_field(
                Some(&event),
                CGEventField::KeyboardEventKeycode,
                keycode as i64,
            );
            CGEvent::set_flags(Some(&event), *flags);
        }
        post(&event);
    } else {
        let event =
            unsafe { CGEvent::new_keyboard_event(Some(&source), keycode, direction.is_press()) }
                .ok_or_else(|| Error::SimulateFailed("Failed to create keyboard event".into()))?;
        unsafe { CGEvent::set_flags(Some(&event), *flags) };
        post(&event);
    }
    Ok(())
}

/// Type one character by attaching it as the unicode payload of a key event.
///
/// The payload is delivered as is, independent of the active input source.
pub fn type_char(ch: char) -> Result<()> {
    let mut units = [0u16; 2];
    let units = ch.encode_utf16(&mut units);
    let source = event_source()?;

    for down in [true, false] {
        let event = unsafe { CGEvent::new_keyboard_event(Some(&source), 0, down) }
            .ok_or_else(|| Error::SimulateFailed("Failed to create keyboard event".into()))?;
        unsafe {
            CGEvent::keyboard_set_unicode_string(Some(&event), units.len() as _, units.as_ptr());
        }
        post(&event);
    }
    Ok(())
}

fn button_to_cg_button(button: ButtonKind) -> CGMouseButton {
    match button {
        ButtonKind::Left => CGMouseButton::Left,
        ButtonKind::Right => CGMouseButton::Right,
        ButtonKind::Middle => CGMouseButton::Center,
    }
}

fn button_event_type(button: ButtonKind, direction: Direction) -> CGEventType {
    match (button, direction) {
        (ButtonKind::Left, Direction::Press) => CGEventType::LeftMouseDown,
        (ButtonKind::Left, Direction::Release) => CGEventType::LeftMouseUp,
        (ButtonKind::Right, Direction::Press) => CGEventType::RightMouseDown,
        (ButtonKind::Right, Direction::Release) => CGEventType::RightMouseUp,
        (ButtonKind::Middle, Direction::Press) => CGEventType::OtherMouseDown,
        (ButtonKind::Middle, Direction::Release) => CGEventType::OtherMouseUp,
    }
}

/// Press or release a mouse button where the pointer is.
pub fn button(button: ButtonKind, direction: Direction) -> Result<()> {
    let point = mouse_location()?;
    let source = event_source()?;
    let event = unsafe {
        CGEvent::new_mouse_event(
            Some(&source),
            button_event_type(button, direction),
            point,
            button_to_cg_button(button),
        )
    }
    .ok_or_else(|| Error::SimulateFailed("Failed to create mouse event".into()))?;

    if button == ButtonKind::Middle {
        unsafe {
            CGEvent::set_integer_value_field(Some(&event), CGEventField::MouseEventButtonNumber, 2);
        }
    }
    post(&event);
    Ok(())
}

/// Move the mouse to a position.
pub fn mouse_move(to: Point) -> Result<()> {
    let point = CGPoint {
        x: to.x as f64,
        y: to.y as f64,
    };
    let source = event_source()?;
    let event = unsafe {
        CGEvent::new_mouse_event(
            Some(&source),
            CGEventType::MouseMoved,
            point,
            CGMouseButton::Left,
        )
    }
    .ok_or_else(|| Error::SimulateFailed("Failed to create mouse event".into()))?;
    post(&event);
    Ok(())
}
