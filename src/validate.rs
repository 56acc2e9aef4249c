//! Argument validation.
//!
//! Everything here is a pure function of its inputs: malformed requests are
//! rejected before any backend is touched, so a failure at this stage never
//! has side effects.

use crate::command::{CaptureTarget, Command, CommandName};
use crate::error::{Error, Result};
use crate::event::{ButtonKind, KeySpec, Modifier, Point};
use crate::keycode::Key;

/// Validate a command name and its raw positional arguments.
pub fn validate_command<S: AsRef<str>>(name: &str, args: &[S]) -> Result<Command> {
    let cmd = CommandName::from_name(name).ok_or_else(|| {
        let known: Vec<_> = CommandName::ALL.iter().map(CommandName::as_str).collect();
        Error::InvalidArgument(format!(
            "unknown command '{}' (expected one of: {})",
            name,
            known.join(", ")
        ))
    })?;

    if !cmd.arity().accepts(args.len()) {
        return Err(Error::InvalidArgument(format!(
            "wrong number of arguments for {}: got {}, usage: {}",
            cmd,
            args.len(),
            cmd.usage()
        )));
    }

    let arg = |i: usize| -> &str { args[i].as_ref() };

    let command = match cmd {
        CommandName::CursorPosition => Command::CursorPosition,
        CommandName::ScreenSize => Command::ScreenSize,
        CommandName::MoveCursor => Command::MoveCursor(point(arg(0), arg(1))?),
        CommandName::Click => {
            let button = button(arg(0))?;
            let at = match args.len() {
                1 => None,
                3 => Some(point(arg(1), arg(2))?),
                _ => {
                    return Err(Error::InvalidArgument(
                        "click needs both <x> and <y>, or neither".into(),
                    ));
                }
            };
            Command::Click { button, at }
        }
        CommandName::TypeText => Command::TypeText(arg(0).to_string()),
        CommandName::PressKey => {
            let modifiers: Vec<&str> = args[1..].iter().map(|m| m.as_ref()).collect();
            Command::PressKey(key_spec(arg(0), &modifiers)?)
        }
        CommandName::Screenshot => {
            let target = match args.len() {
                0 => CaptureTarget::Screen,
                _ => {
                    let token = arg(0);
                    CaptureTarget::from_name(token).ok_or_else(|| {
                        Error::InvalidArgument(format!(
                            "unknown screenshot target '{}' (expected screen or active-window)",
                            token
                        ))
                    })?
                }
            };
            Command::Screenshot(target)
        }
    };

    Ok(command)
}

/// Parse one coordinate: a finite, non-negative integer.
///
/// Integral decimal forms such as `"400.0"` are accepted since bindings often
/// stringify numbers that way.
pub fn coordinate(token: &str) -> Result<i32> {
    let invalid = |why: &str| Error::InvalidArgument(format!("coordinate '{}' {}", token, why));

    let trimmed = token.trim();
    if let Ok(value) = trimmed.parse::<i64>() {
        if value < 0 {
            return Err(invalid("is negative"));
        }
        return i32::try_from(value).map_err(|_| invalid("is too large"));
    }

    let value: f64 = trimmed
        .parse()
        .map_err(|_| invalid("is not a number"))?;
    if !value.is_finite() {
        return Err(invalid("is not finite"));
    }
    if value < 0.0 {
        return Err(invalid("is negative"));
    }
    if value.fract() != 0.0 {
        return Err(invalid("is not an integer"));
    }
    if value > i32::MAX as f64 {
        return Err(invalid("is too large"));
    }
    Ok(value as i32)
}

/// Parse an `(x, y)` pair.
pub fn point(x: &str, y: &str) -> Result<Point> {
    Ok(Point::new(coordinate(x)?, coordinate(y)?))
}

/// Parse a button token, ignoring case.
pub fn button(token: &str) -> Result<ButtonKind> {
    ButtonKind::from_name(token).ok_or_else(|| {
        Error::InvalidArgument(format!(
            "unknown button '{}' (expected left, right or middle)",
            token
        ))
    })
}

/// Parse a key with its modifiers.
///
/// Unknown key or modifier names fail with [`Error::UnsupportedKey`], which
/// callers treat as a routine, recoverable outcome.
pub fn key_spec(key: &str, modifiers: &[&str]) -> Result<KeySpec> {
    let (primary, needs_shift) =
        Key::lookup(key).ok_or_else(|| Error::UnsupportedKey(format!("unknown key '{}'", key)))?;

    let mut spec = KeySpec::new(primary);
    for name in modifiers {
        let modifier = Modifier::from_name(name)
            .ok_or_else(|| Error::UnsupportedKey(format!("unknown modifier '{}'", name)))?;
        spec = spec.with_modifier(modifier);
    }
    if needs_shift {
        spec = spec.with_modifier(Modifier::Shift);
    }
    Ok(spec)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    fn kind_of(result: Result<Command>) -> ErrorKind {
        result.expect_err("expected validation failure").kind()
    }

    #[test]
    fn test_coordinates() {
        assert_eq!(coordinate("400").unwrap(), 400);
        assert_eq!(coordinate("0").unwrap(), 0);
        assert_eq!(coordinate("400.0").unwrap(), 400);
        assert_eq!(coordinate(" 12 ").unwrap(), 12);

        for bad in ["-1", "-0.5", "1.5", "NaN", "nan", "inf", "-inf", "abc", "", "1e12"] {
            let err = coordinate(bad).expect_err(bad);
            assert_eq!(err.kind(), ErrorKind::InvalidArgument, "token {bad:?}");
        }
    }

    #[test]
    fn test_move_cursor() {
        assert_eq!(
            validate_command("move-cursor", &["10", "20"]).unwrap(),
            Command::MoveCursor(Point::new(10, 20))
        );
        assert_eq!(
            kind_of(validate_command("move-cursor", &["-5", "20"])),
            ErrorKind::InvalidArgument
        );
        assert_eq!(
            kind_of(validate_command("move-cursor", &["10"])),
            ErrorKind::InvalidArgument
        );
    }

    #[test]
    fn test_click() {
        assert_eq!(
            validate_command("click", &["Left"]).unwrap(),
            Command::Click {
                button: ButtonKind::Left,
                at: None
            }
        );
        assert_eq!(
            validate_command("click", &["right", "400", "300"]).unwrap(),
            Command::Click {
                button: ButtonKind::Right,
                at: Some(Point::new(400, 300))
            }
        );
        assert_eq!(
            kind_of(validate_command("click", &["invalid"])),
            ErrorKind::InvalidArgument
        );
        assert_eq!(
            kind_of(validate_command("click", &["left", "400"])),
            ErrorKind::InvalidArgument
        );
    }

    #[test]
    fn test_press_key() {
        let cmd = validate_command("press-key", &["a", "ctrl", "shift"]).unwrap();
        assert_eq!(
            cmd,
            Command::PressKey(KeySpec {
                key: Key::KeyA,
                modifiers: vec![Modifier::Control, Modifier::Shift],
            })
        );

        assert_eq!(
            kind_of(validate_command("press-key", &["hyper"])),
            ErrorKind::UnsupportedKey
        );
        assert_eq!(
            kind_of(validate_command("press-key", &["a", "fn"])),
            ErrorKind::UnsupportedKey
        );
    }

    #[test]
    fn test_shifted_symbol_implies_shift() {
        let spec = key_spec("?", &["ctrl"]).unwrap();
        assert_eq!(spec.key, Key::Slash);
        assert_eq!(spec.modifiers, vec![Modifier::Control, Modifier::Shift]);

        let spec = key_spec("!", &["shift"]).unwrap();
        assert_eq!(spec.modifiers, vec![Modifier::Shift]);
    }

    #[test]
    fn test_type_text_accepts_anything() {
        assert_eq!(
            validate_command("type-text", &[""]).unwrap(),
            Command::TypeText(String::new())
        );
        assert_eq!(
            validate_command("type-text", &["héllo 👋 --flag"]).unwrap(),
            Command::TypeText("héllo 👋 --flag".into())
        );
    }

    #[test]
    fn test_screenshot_target() {
        let none: [&str; 0] = [];
        assert_eq!(
            validate_command("screenshot", &none).unwrap(),
            Command::Screenshot(CaptureTarget::Screen)
        );
        assert_eq!(
            validate_command("screenshot", &["active-window"]).unwrap(),
            Command::Screenshot(CaptureTarget::ActiveWindow)
        );
        assert_eq!(
            kind_of(validate_command("screenshot", &["desktop"])),
            ErrorKind::InvalidArgument
        );
    }

    #[test]
    fn test_unknown_command() {
        let err = validate_command("double-click", &["left"]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidArgument);
        assert!(err.to_string().contains("double-click"));
    }
}
