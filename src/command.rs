//! The command table and validated command values.

use crate::event::{ButtonKind, KeySpec, Point};
use std::fmt;

/// Names accepted as the first argument of an invocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CommandName {
    CursorPosition,
    ScreenSize,
    MoveCursor,
    Click,
    TypeText,
    PressKey,
    Screenshot,
}

/// How many positional arguments a command takes after its name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Arity {
    pub min: usize,
    /// `None` for commands with a trailing variadic list.
    pub max: Option<usize>,
}

impl Arity {
    const fn exactly(n: usize) -> Self {
        Self {
            min: n,
            max: Some(n),
        }
    }

    const fn between(min: usize, max: usize) -> Self {
        Self {
            min,
            max: Some(max),
        }
    }

    const fn at_least(min: usize) -> Self {
        Self { min, max: None }
    }

    pub fn accepts(&self, count: usize) -> bool {
        count >= self.min && self.max.is_none_or(|max| count <= max)
    }
}

impl CommandName {
    pub const ALL: [CommandName; 7] = [
        CommandName::CursorPosition,
        CommandName::ScreenSize,
        CommandName::MoveCursor,
        CommandName::Click,
        CommandName::TypeText,
        CommandName::PressKey,
        CommandName::Screenshot,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            CommandName::CursorPosition => "cursor-position",
            CommandName::ScreenSize => "screen-size",
            CommandName::MoveCursor => "move-cursor",
            CommandName::Click => "click",
            CommandName::TypeText => "type-text",
            CommandName::PressKey => "press-key",
            CommandName::Screenshot => "screenshot",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|cmd| cmd.as_str() == name)
    }

    pub fn arity(&self) -> Arity {
        match self {
            CommandName::CursorPosition | CommandName::ScreenSize => Arity::exactly(0),
            CommandName::MoveCursor => Arity::exactly(2),
            CommandName::Click => Arity::between(1, 3),
            CommandName::TypeText => Arity::exactly(1),
            CommandName::PressKey => Arity::at_least(1),
            CommandName::Screenshot => Arity::between(0, 1),
        }
    }

    /// Usage line shown in argument errors.
    pub fn usage(&self) -> &'static str {
        match self {
            CommandName::CursorPosition => "cursor-position",
            CommandName::ScreenSize => "screen-size",
            CommandName::MoveCursor => "move-cursor <x> <y>",
            CommandName::Click => "click <button> [<x> <y>]",
            CommandName::TypeText => "type-text <text>",
            CommandName::PressKey => "press-key <key> [<modifier>...]",
            CommandName::Screenshot => "screenshot [screen|active-window]",
        }
    }

    /// Whether a successful run carries a `data` payload.
    pub fn returns_data(&self) -> bool {
        matches!(
            self,
            CommandName::CursorPosition | CommandName::ScreenSize | CommandName::Screenshot
        )
    }
}

impl fmt::Display for CommandName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What a screenshot should cover.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CaptureTarget {
    /// The primary display.
    #[default]
    Screen,
    /// The foreground window only.
    ActiveWindow,
}

impl CaptureTarget {
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "screen" => Some(CaptureTarget::Screen),
            "active-window" | "window" => Some(CaptureTarget::ActiveWindow),
            _ => None,
        }
    }
}

/// A fully validated request, ready for dispatch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    CursorPosition,
    ScreenSize,
    MoveCursor(Point),
    Click {
        button: ButtonKind,
        at: Option<Point>,
    },
    TypeText(String),
    PressKey(KeySpec),
    Screenshot(CaptureTarget),
}

impl Command {
    pub fn name(&self) -> CommandName {
        match self {
            Command::CursorPosition => CommandName::CursorPosition,
            Command::ScreenSize => CommandName::ScreenSize,
            Command::MoveCursor(_) => CommandName::MoveCursor,
            Command::Click { .. } => CommandName::Click,
            Command::TypeText(_) => CommandName::TypeText,
            Command::PressKey(_) => CommandName::PressKey,
            Command::Screenshot(_) => CommandName::Screenshot,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_names_round_trip_through_table() {
        for cmd in CommandName::ALL {
            assert_eq!(CommandName::from_name(cmd.as_str()), Some(cmd));
        }
        assert_eq!(CommandName::from_name("double-click"), None);
    }

    #[test]
    fn test_arity() {
        assert!(CommandName::Click.arity().accepts(1));
        assert!(CommandName::Click.arity().accepts(3));
        assert!(!CommandName::Click.arity().accepts(4));
        assert!(!CommandName::MoveCursor.arity().accepts(1));
        assert!(CommandName::PressKey.arity().accepts(6));
        assert!(!CommandName::PressKey.arity().accepts(0));
    }

    #[test]
    fn test_only_queries_return_data() {
        let with_data: Vec<_> = CommandName::ALL
            .into_iter()
            .filter(CommandName::returns_data)
            .collect();
        assert_eq!(
            with_data,
            vec![
                CommandName::CursorPosition,
                CommandName::ScreenSize,
                CommandName::Screenshot
            ]
        );
    }
}
