//! macOS virtual keycode mappings (`kVK_*` from HIToolbox/Events.h).

use crate::keycode::Key;

/// Virtual keycode for a key, if Apple keyboards have one.
///
/// F21 to F24, ScrollLock, PrintScreen and Pause do not exist on macOS.
pub fn key_to_keycode(key: Key) -> Option<u16> {
    Some(match key {
        // Letters
        Key::KeyA => 0x00,
        Key::KeyS => 0x01,
        Key::KeyD => 0x02,
        Key::KeyF => 0x03,
        Key::KeyH => 0x04,
        Key::KeyG => 0x05,
        Key::KeyZ => 0x06,
        Key::KeyX => 0x07,
        Key::KeyC => 0x08,
        Key::KeyV => 0x09,
        Key::KeyB => 0x0B,
        Key::KeyQ => 0x0C,
        Key::KeyW => 0x0D,
        Key::KeyE => 0x0E,
        Key::KeyR => 0x0F,
        Key::KeyY => 0x10,
        Key::KeyT => 0x11,
        Key::KeyO => 0x1F,
        Key::KeyU => 0x20,
        Key::KeyI => 0x22,
        Key::KeyP => 0x23,
        Key::KeyL => 0x25,
        Key::KeyJ => 0x26,
        Key::KeyK => 0x28,
        Key::KeyN => 0x2D,
        Key::KeyM => 0x2E,

        // Numbers
        Key::Num1 => 0x12,
        Key::Num2 => 0x13,
        Key::Num3 => 0x14,
        Key::Num4 => 0x15,
        Key::Num6 => 0x16,
        Key::Num5 => 0x17,
        Key::Num9 => 0x19,
        Key::Num7 => 0x1A,
        Key::Num8 => 0x1C,
        Key::Num0 => 0x1D,

        // Function keys
        Key::F1 => 0x7A,
        Key::F2 => 0x78,
        Key::F3 => 0x63,
        Key::F4 => 0x76,
        Key::F5 => 0x60,
        Key::F6 => 0x61,
        Key::F7 => 0x62,
        Key::F8 => 0x64,
        Key::F9 => 0x65,
        Key::F10 => 0x6D,
        Key::F11 => 0x67,
        Key::F12 => 0x6F,
        Key::F13 => 0x69,
        Key::F14 => 0x6B,
        Key::F15 => 0x71,
        Key::F16 => 0x6A,
        Key::F17 => 0x40,
        Key::F18 => 0x4F,
        Key::F19 => 0x50,
        Key::F20 => 0x5A,

        // Modifiers
        Key::ShiftLeft => 0x38,
        Key::ShiftRight => 0x3C,
        Key::ControlLeft => 0x3B,
        Key::ControlRight => 0x3E,
        Key::AltLeft => 0x3A,
        Key::AltRight => 0x3D,
        Key::MetaLeft => 0x37,
        Key::MetaRight => 0x36,

        // Navigation and special
        Key::Escape => 0x35,
        Key::Tab => 0x30,
        Key::CapsLock => 0x39,
        Key::Space => 0x31,
        Key::Enter => 0x24,
        Key::Backspace => 0x33,
        Key::Insert => 0x72,
        Key::Delete => 0x75,
        Key::Home => 0x73,
        Key::End => 0x77,
        Key::PageUp => 0x74,
        Key::PageDown => 0x79,
        Key::ArrowUp => 0x7E,
        Key::ArrowDown => 0x7D,
        Key::ArrowLeft => 0x7B,
        Key::ArrowRight => 0x7C,

        // Lock keys (Clear sits where NumLock does)
        Key::NumLock => 0x47,

        // Punctuation
        Key::Grave => 0x32,
        Key::Minus => 0x1B,
        Key::Equal => 0x18,
        Key::BracketLeft => 0x21,
        Key::BracketRight => 0x1E,
        Key::Backslash => 0x2A,
        Key::Semicolon => 0x29,
        Key::Quote => 0x27,
        Key::Comma => 0x2B,
        Key::Period => 0x2F,
        Key::Slash => 0x2C,

        // Numpad
        Key::Numpad0 => 0x52,
        Key::Numpad1 => 0x53,
        Key::Numpad2 => 0x54,
        Key::Numpad3 => 0x55,
        Key::Numpad4 => 0x56,
        Key::Numpad5 => 0x57,
        Key::Numpad6 => 0x58,
        Key::Numpad7 => 0x59,
        Key::Numpad8 => 0x5B,
        Key::Numpad9 => 0x5C,
        Key::NumpadMultiply => 0x43,
        Key::NumpadAdd => 0x45,
        Key::NumpadSubtract => 0x4E,
        Key::NumpadDecimal => 0x41,
        Key::NumpadDivide => 0x4B,
        Key::NumpadEnter => 0x4C,

        Key::F21 | Key::F22 | Key::F23 | Key::F24 => return None,
        Key::ScrollLock | Key::PrintScreen | Key::Pause => return None,
    })
}
