//! Virtual key definitions and the known-key table.

/// Virtual key codes for keyboard keys.
///
/// Platform modules translate these into native codes; a key without a native
/// mapping on the running platform is reported as unsupported there.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u16)]
pub enum Key {
    // Letters
    KeyA,
    KeyB,
    KeyC,
    KeyD,
    KeyE,
    KeyF,
    KeyG,
    KeyH,
    KeyI,
    KeyJ,
    KeyK,
    KeyL,
    KeyM,
    KeyN,
    KeyO,
    KeyP,
    KeyQ,
    KeyR,
    KeyS,
    KeyT,
    KeyU,
    KeyV,
    KeyW,
    KeyX,
    KeyY,
    KeyZ,

    // Numbers (top row)
    Num0,
    Num1,
    Num2,
    Num3,
    Num4,
    Num5,
    Num6,
    Num7,
    Num8,
    Num9,

    // Function keys
    F1,
    F2,
    F3,
    F4,
    F5,
    F6,
    F7,
    F8,
    F9,
    F10,
    F11,
    F12,
    F13,
    F14,
    F15,
    F16,
    F17,
    F18,
    F19,
    F20,
    F21,
    F22,
    F23,
    F24,

    // Modifiers
    ShiftLeft,
    ShiftRight,
    ControlLeft,
    ControlRight,
    AltLeft,
    AltRight,
    MetaLeft, // Windows/Command/Super
    MetaRight,

    // Navigation
    Escape,
    Tab,
    CapsLock,
    Space,
    Enter,
    Backspace,
    Insert,
    Delete,
    Home,
    End,
    PageUp,
    PageDown,
    ArrowUp,
    ArrowDown,
    ArrowLeft,
    ArrowRight,

    // Lock keys
    NumLock,
    ScrollLock,
    PrintScreen,
    Pause,

    // Punctuation and symbols
    Grave,        // ` ~
    Minus,        // - _
    Equal,        // = +
    BracketLeft,  // [ {
    BracketRight, // ] }
    Backslash,    // \ |
    Semicolon,    // ; :
    Quote,        // ' "
    Comma,        // , <
    Period,       // . >
    Slash,        // / ?

    // Numpad
    Numpad0,
    Numpad1,
    Numpad2,
    Numpad3,
    Numpad4,
    Numpad5,
    Numpad6,
    Numpad7,
    Numpad8,
    Numpad9,
    NumpadAdd,
    NumpadSubtract,
    NumpadMultiply,
    NumpadDivide,
    NumpadDecimal,
    NumpadEnter,
}

const LETTERS: [Key; 26] = [
    Key::KeyA,
    Key::KeyB,
    Key::KeyC,
    Key::KeyD,
    Key::KeyE,
    Key::KeyF,
    Key::KeyG,
    Key::KeyH,
    Key::KeyI,
    Key::KeyJ,
    Key::KeyK,
    Key::KeyL,
    Key::KeyM,
    Key::KeyN,
    Key::KeyO,
    Key::KeyP,
    Key::KeyQ,
    Key::KeyR,
    Key::KeyS,
    Key::KeyT,
    Key::KeyU,
    Key::KeyV,
    Key::KeyW,
    Key::KeyX,
    Key::KeyY,
    Key::KeyZ,
];

const DIGITS: [Key; 10] = [
    Key::Num0,
    Key::Num1,
    Key::Num2,
    Key::Num3,
    Key::Num4,
    Key::Num5,
    Key::Num6,
    Key::Num7,
    Key::Num8,
    Key::Num9,
];

const FUNCTION_KEYS: [Key; 24] = [
    Key::F1,
    Key::F2,
    Key::F3,
    Key::F4,
    Key::F5,
    Key::F6,
    Key::F7,
    Key::F8,
    Key::F9,
    Key::F10,
    Key::F11,
    Key::F12,
    Key::F13,
    Key::F14,
    Key::F15,
    Key::F16,
    Key::F17,
    Key::F18,
    Key::F19,
    Key::F20,
    Key::F21,
    Key::F22,
    Key::F23,
    Key::F24,
];

const NUMPAD_DIGITS: [Key; 10] = [
    Key::Numpad0,
    Key::Numpad1,
    Key::Numpad2,
    Key::Numpad3,
    Key::Numpad4,
    Key::Numpad5,
    Key::Numpad6,
    Key::Numpad7,
    Key::Numpad8,
    Key::Numpad9,
];

impl Key {
    /// Look up a key token in the known-key table.
    ///
    /// Accepts named keys (case-insensitive) and single printable ASCII
    /// characters. The flag is `true` when the character needs shift on a US
    /// layout (`"!"`, `"?"`); letters are case-insensitive and never imply
    /// shift.
    pub fn lookup(token: &str) -> Option<(Key, bool)> {
        let mut chars = token.chars();
        if let (Some(ch), None) = (chars.next(), chars.next()) {
            if ch.is_ascii_alphabetic() {
                return Key::for_char(ch.to_ascii_lowercase());
            }
            return Key::for_char(ch);
        }
        Key::from_name(token).map(|key| (key, false))
    }

    /// Resolve a multi-character key name.
    pub fn from_name(name: &str) -> Option<Key> {
        let name = name.to_ascii_lowercase();
        let key = match name.as_str() {
            "enter" | "return" => Key::Enter,
            "tab" => Key::Tab,
            "escape" | "esc" => Key::Escape,
            "space" | "spacebar" => Key::Space,
            "backspace" | "bs" => Key::Backspace,
            "delete" | "del" => Key::Delete,
            "insert" | "ins" => Key::Insert,
            "home" => Key::Home,
            "end" => Key::End,
            "pageup" | "pgup" => Key::PageUp,
            "pagedown" | "pgdn" => Key::PageDown,
            "up" | "arrowup" => Key::ArrowUp,
            "down" | "arrowdown" => Key::ArrowDown,
            "left" | "arrowleft" => Key::ArrowLeft,
            "right" | "arrowright" => Key::ArrowRight,
            "capslock" => Key::CapsLock,
            "numlock" => Key::NumLock,
            "scrolllock" => Key::ScrollLock,
            "printscreen" | "prtsc" => Key::PrintScreen,
            "pause" => Key::Pause,
            "ctrl" | "control" => Key::ControlLeft,
            "rctrl" | "rightctrl" => Key::ControlRight,
            "shift" => Key::ShiftLeft,
            "rshift" | "rightshift" => Key::ShiftRight,
            "alt" | "option" => Key::AltLeft,
            "ralt" | "rightalt" | "altgr" => Key::AltRight,
            "cmd" | "command" | "meta" | "win" | "windows" | "super" => Key::MetaLeft,
            "grave" | "backquote" => Key::Grave,
            "minus" => Key::Minus,
            "equal" | "equals" => Key::Equal,
            "bracketleft" => Key::BracketLeft,
            "bracketright" => Key::BracketRight,
            "backslash" => Key::Backslash,
            "semicolon" => Key::Semicolon,
            "quote" => Key::Quote,
            "comma" => Key::Comma,
            "period" => Key::Period,
            "slash" => Key::Slash,
            "numpadadd" => Key::NumpadAdd,
            "numpadsubtract" => Key::NumpadSubtract,
            "numpadmultiply" => Key::NumpadMultiply,
            "numpaddivide" => Key::NumpadDivide,
            "numpaddecimal" => Key::NumpadDecimal,
            "numpadenter" => Key::NumpadEnter,
            _ => return Key::indexed_name(&name),
        };
        Some(key)
    }

    /// `f1`..`f24` and `numpad0`..`numpad9`.
    fn indexed_name(name: &str) -> Option<Key> {
        if let Some(n) = name.strip_prefix("numpad") {
            let n: usize = n.parse().ok()?;
            return NUMPAD_DIGITS.get(n).copied();
        }
        let n: usize = name.strip_prefix('f')?.parse().ok()?;
        FUNCTION_KEYS.get(n.checked_sub(1)?).copied()
    }

    /// Map a character to the key that types it on a US layout.
    ///
    /// Returns `None` for characters the table has no key for.
    pub fn for_char(ch: char) -> Option<(Key, bool)> {
        if ch.is_ascii_lowercase() {
            return Some((LETTERS[(ch as u8 - b'a') as usize], false));
        }
        if ch.is_ascii_uppercase() {
            return Some((LETTERS[(ch as u8 - b'A') as usize], true));
        }
        if ch.is_ascii_digit() {
            return Some((DIGITS[(ch as u8 - b'0') as usize], false));
        }
        let mapped = match ch {
            ' ' => (Key::Space, false),
            '\n' | '\r' => (Key::Enter, false),
            '\t' => (Key::Tab, false),
            '`' => (Key::Grave, false),
            '~' => (Key::Grave, true),
            '-' => (Key::Minus, false),
            '_' => (Key::Minus, true),
            '=' => (Key::Equal, false),
            '+' => (Key::Equal, true),
            '[' => (Key::BracketLeft, false),
            '{' => (Key::BracketLeft, true),
            ']' => (Key::BracketRight, false),
            '}' => (Key::BracketRight, true),
            '\\' => (Key::Backslash, false),
            '|' => (Key::Backslash, true),
            ';' => (Key::Semicolon, false),
            ':' => (Key::Semicolon, true),
            '\'' => (Key::Quote, false),
            '"' => (Key::Quote, true),
            ',' => (Key::Comma, false),
            '<' => (Key::Comma, true),
            '.' => (Key::Period, false),
            '>' => (Key::Period, true),
            '/' => (Key::Slash, false),
            '?' => (Key::Slash, true),
            '!' => (Key::Num1, true),
            '@' => (Key::Num2, true),
            '#' => (Key::Num3, true),
            '$' => (Key::Num4, true),
            '%' => (Key::Num5, true),
            '^' => (Key::Num6, true),
            '&' => (Key::Num7, true),
            '*' => (Key::Num8, true),
            '(' => (Key::Num9, true),
            ')' => (Key::Num0, true),
            _ => return None,
        };
        Some(mapped)
    }
}
