//! Linux keycode mappings.
//!
//! X11 keycodes are evdev keycodes plus 8; the table assumes the stock
//! `evdev` XKB keycodes that every current X server ships.

use crate::keycode::Key;

/// X11 keycode for a key on a standard evdev keymap.
pub fn key_to_keycode(key: Key) -> u32 {
    match key {
        // Letters
        Key::KeyA => 38,
        Key::KeyB => 56,
        Key::KeyC => 54,
        Key::KeyD => 40,
        Key::KeyE => 26,
        Key::KeyF => 41,
        Key::KeyG => 42,
        Key::KeyH => 43,
        Key::KeyI => 31,
        Key::KeyJ => 44,
        Key::KeyK => 45,
        Key::KeyL => 46,
        Key::KeyM => 58,
        Key::KeyN => 57,
        Key::KeyO => 32,
        Key::KeyP => 33,
        Key::KeyQ => 24,
        Key::KeyR => 27,
        Key::KeyS => 39,
        Key::KeyT => 28,
        Key::KeyU => 30,
        Key::KeyV => 55,
        Key::KeyW => 25,
        Key::KeyX => 53,
        Key::KeyY => 29,
        Key::KeyZ => 52,

        // Numbers
        Key::Num0 => 19,
        Key::Num1 => 10,
        Key::Num2 => 11,
        Key::Num3 => 12,
        Key::Num4 => 13,
        Key::Num5 => 14,
        Key::Num6 => 15,
        Key::Num7 => 16,
        Key::Num8 => 17,
        Key::Num9 => 18,

        // Function keys
        Key::F1 => 67,
        Key::F2 => 68,
        Key::F3 => 69,
        Key::F4 => 70,
        Key::F5 => 71,
        Key::F6 => 72,
        Key::F7 => 73,
        Key::F8 => 74,
        Key::F9 => 75,
        Key::F10 => 76,
        Key::F11 => 95,
        Key::F12 => 96,
        Key::F13 => 191,
        Key::F14 => 192,
        Key::F15 => 193,
        Key::F16 => 194,
        Key::F17 => 195,
        Key::F18 => 196,
        Key::F19 => 197,
        Key::F20 => 198,
        Key::F21 => 199,
        Key::F22 => 200,
        Key::F23 => 201,
        Key::F24 => 202,

        // Modifiers
        Key::ShiftLeft => 50,
        Key::ShiftRight => 62,
        Key::ControlLeft => 37,
        Key::ControlRight => 105,
        Key::AltLeft => 64,
        Key::AltRight => 108,
        Key::MetaLeft => 133,
        Key::MetaRight => 134,

        // Navigation and special
        Key::Backspace => 22,
        Key::Tab => 23,
        Key::Enter => 36,
        Key::CapsLock => 66,
        Key::Escape => 9,
        Key::Space => 65,
        Key::PageUp => 112,
        Key::PageDown => 117,
        Key::End => 115,
        Key::Home => 110,
        Key::ArrowLeft => 113,
        Key::ArrowUp => 111,
        Key::ArrowRight => 114,
        Key::ArrowDown => 116,
        Key::Insert => 118,
        Key::Delete => 119,

        // Lock keys
        Key::NumLock => 77,
        Key::ScrollLock => 78,
        Key::PrintScreen => 107,
        Key::Pause => 127,

        // Punctuation
        Key::Grave => 49,
        Key::Minus => 20,
        Key::Equal => 21,
        Key::BracketLeft => 34,
        Key::BracketRight => 35,
        Key::Backslash => 51,
        Key::Semicolon => 47,
        Key::Quote => 48,
        Key::Comma => 59,
        Key::Period => 60,
        Key::Slash => 61,

        // Numpad
        Key::Numpad0 => 90,
        Key::Numpad1 => 87,
        Key::Numpad2 => 88,
        Key::Numpad3 => 89,
        Key::Numpad4 => 83,
        Key::Numpad5 => 84,
        Key::Numpad6 => 85,
        Key::Numpad7 => 79,
        Key::Numpad8 => 80,
        Key::Numpad9 => 81,
        Key::NumpadMultiply => 63,
        Key::NumpadAdd => 86,
        Key::NumpadSubtract => 82,
        Key::NumpadDecimal => 91,
        Key::NumpadDivide => 106,
        Key::NumpadEnter => 104,
    }
}
