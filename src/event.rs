//! Request and response value types shared by every component.

use crate::keycode::Key;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A position or size in screen pixels, origin top-left.
///
/// Screen size is reported as a `Point` whose `x` is the width and `y` the
/// height.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Check whether this point lies inside a screen of the given size.
    pub fn within(&self, size: Point) -> bool {
        self.x >= 0 && self.y >= 0 && self.x < size.x && self.y < size.y
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// Mouse button identifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ButtonKind {
    Left,
    Right,
    Middle,
}

impl ButtonKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ButtonKind::Left => "left",
            ButtonKind::Right => "right",
            ButtonKind::Middle => "middle",
        }
    }

    /// Parse a button name, ignoring case.
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "left" => Some(ButtonKind::Left),
            "right" => Some(ButtonKind::Right),
            "middle" => Some(ButtonKind::Middle),
            _ => None,
        }
    }
}

impl fmt::Display for ButtonKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Whether an injected key or button event goes down or up.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Press,
    Release,
}

impl Direction {
    pub fn is_press(&self) -> bool {
        matches!(self, Direction::Press)
    }
}

/// Keyboard modifiers accepted in a key chord.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Modifier {
    Control,
    Shift,
    Alt,
    /// Command on macOS, Windows key elsewhere.
    Meta,
}

impl Modifier {
    /// Parse a modifier name, ignoring case.
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "ctrl" | "control" => Some(Modifier::Control),
            "shift" => Some(Modifier::Shift),
            "alt" | "option" | "opt" => Some(Modifier::Alt),
            "cmd" | "command" | "meta" | "win" | "windows" | "super" => Some(Modifier::Meta),
            _ => None,
        }
    }

    /// The physical key pressed for this modifier.
    pub fn key(&self) -> Key {
        match self {
            Modifier::Control => Key::ControlLeft,
            Modifier::Shift => Key::ShiftLeft,
            Modifier::Alt => Key::AltLeft,
            Modifier::Meta => Key::MetaLeft,
        }
    }
}

/// A primary key plus the modifiers held while it is tapped.
///
/// Modifiers keep their request order and never repeat.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeySpec {
    pub key: Key,
    pub modifiers: Vec<Modifier>,
}

impl KeySpec {
    pub fn new(key: Key) -> Self {
        Self {
            key,
            modifiers: Vec::new(),
        }
    }

    /// Add a modifier unless it is already part of the chord.
    pub fn with_modifier(mut self, modifier: Modifier) -> Self {
        if !self.modifiers.contains(&modifier) {
            self.modifiers.push(modifier);
        }
        self
    }
}
