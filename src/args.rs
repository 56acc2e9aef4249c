//! CLI argument parsing with clap derive macros.
//!
//! Positional values are kept as raw strings: range and format checks belong
//! to `validate_command` so the CLI and the library reject the same inputs
//! with the same messages.

use autoanchor::Settings;
use clap::{Parser, Subcommand};
use std::ffi::OsString;
use std::time::Duration;

/// Single-shot desktop automation.
///
/// Runs one mouse, keyboard or screen operation and prints a single JSON
/// line `{"success": ..., "message"?: ..., "data"?: ...}` to stdout. The exit
/// status is 0 exactly when `success` is true.
#[derive(Debug, Parser)]
#[command(name = "autoanchor", version)]
pub struct Cli {
    /// Log diagnostics to stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Print the pointer position as {"x", "y"}
    CursorPosition,

    /// Print the primary display size as {"x": width, "y": height}
    ScreenSize,

    /// Move the pointer to an absolute position
    MoveCursor(MoveCursorArgs),

    /// Click a mouse button, optionally moving there first
    #[command(after_help = "\
Examples:
  autoanchor click left                 # Click where the pointer is
  autoanchor click right 400 300        # Move to (400, 300), then right-click
  autoanchor click left 10 10 --settle-ms 200")]
    Click(ClickArgs),

    /// Type text one character at a time
    ///
    /// The argument after `type-text` is always the text, even when it looks
    /// like an option; options for this command go after it.
    #[command(override_usage = "autoanchor type-text <TEXT> [--delay-ms <MS>]")]
    TypeText(TypeTextArgs),

    /// Press a key, optionally with modifiers held
    #[command(after_long_help = "\
Keys:
  Letters and digits, punctuation such as / or ?, and names like
  enter, tab, escape, space, backspace, delete, home, end, pageup,
  pagedown, up, down, left, right, f1-f24, numpad0-numpad9.

Modifiers:
  ctrl, shift, alt (option), cmd (meta, win, super)

Examples:
  autoanchor press-key enter
  autoanchor press-key c ctrl           # Ctrl+C
  autoanchor press-key t cmd shift      # Cmd+Shift+T")]
    PressKey(PressKeyArgs),

    /// Capture the screen as base64 PNG
    Screenshot(ScreenshotArgs),
}

#[derive(Debug, clap::Args)]
pub struct MoveCursorArgs {
    /// Horizontal position in pixels
    #[arg(allow_hyphen_values = true)]
    pub x: String,

    /// Vertical position in pixels
    #[arg(allow_hyphen_values = true)]
    pub y: String,
}

#[derive(Debug, clap::Args)]
pub struct ClickArgs {
    /// left, right or middle
    pub button: String,

    /// Horizontal position to click at
    #[arg(allow_hyphen_values = true)]
    pub x: Option<String>,

    /// Vertical position to click at
    #[arg(allow_hyphen_values = true)]
    pub y: Option<String>,

    /// Pause between moving and clicking
    #[arg(long, value_name = "MS")]
    pub settle_ms: Option<u64>,
}

#[derive(Debug, clap::Args)]
pub struct TypeTextArgs {
    /// Filled in by [`Cli::parse_args`] from the raw argument list.
    #[arg(skip)]
    pub text: Option<String>,

    /// Pause after each character
    #[arg(long, value_name = "MS")]
    pub delay_ms: Option<u64>,
}

#[derive(Debug, clap::Args)]
pub struct PressKeyArgs {
    /// Key name or single character
    #[arg(allow_hyphen_values = true)]
    pub key: String,

    /// Modifiers to hold while the key is pressed
    #[arg(trailing_var_arg = true)]
    pub modifiers: Vec<String>,
}

#[derive(Debug, clap::Args)]
pub struct ScreenshotArgs {
    /// Capture only the foreground window
    #[arg(long)]
    pub active_window: bool,
}

impl Cli {
    /// Parse `argv`, taking the `type-text` payload verbatim.
    pub fn parse_args<I, T>(argv: I) -> Result<Cli, clap::Error>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString>,
    {
        let mut argv: Vec<OsString> = argv.into_iter().map(Into::into).collect();
        let text = take_text(&mut argv);
        let mut cli = Cli::try_parse_from(argv)?;
        if let Commands::TypeText(args) = &mut cli.command {
            args.text = text;
        }
        Ok(cli)
    }
}

/// Remove and return the argument following a `type-text` subcommand.
///
/// Only `-v`/`--verbose` may precede the subcommand. A payload that is not
/// valid UTF-8 stays in place for clap to reject.
fn take_text(argv: &mut Vec<OsString>) -> Option<String> {
    let subcommand = argv
        .iter()
        .skip(1)
        .position(|arg| !matches!(arg.to_str(), Some("-v" | "--verbose")))?
        + 1;
    if argv[subcommand].to_str() != Some("type-text") {
        return None;
    }
    let text = argv.get(subcommand + 1)?.to_str()?.to_owned();
    argv.remove(subcommand + 1);
    Some(text)
}

impl Commands {
    /// The command-table name of this subcommand.
    pub fn name(&self) -> &'static str {
        match self {
            Commands::CursorPosition => "cursor-position",
            Commands::ScreenSize => "screen-size",
            Commands::MoveCursor(_) => "move-cursor",
            Commands::Click(_) => "click",
            Commands::TypeText(_) => "type-text",
            Commands::PressKey(_) => "press-key",
            Commands::Screenshot(_) => "screenshot",
        }
    }

    /// Positional arguments in the order the command table expects.
    pub fn positionals(&self) -> Vec<String> {
        match self {
            Commands::CursorPosition | Commands::ScreenSize => Vec::new(),
            Commands::MoveCursor(args) => vec![args.x.clone(), args.y.clone()],
            Commands::Click(args) => std::iter::once(args.button.clone())
                .chain(args.x.clone())
                .chain(args.y.clone())
                .collect(),
            Commands::TypeText(args) => args.text.iter().cloned().collect(),
            Commands::PressKey(args) => std::iter::once(args.key.clone())
                .chain(args.modifiers.iter().cloned())
                .collect(),
            Commands::Screenshot(args) if args.active_window => vec!["active-window".into()],
            Commands::Screenshot(_) => Vec::new(),
        }
    }

    /// Timing settings with any per-command overrides applied.
    pub fn settings(&self) -> Settings {
        let settings = Settings::default();
        match self {
            Commands::Click(ClickArgs {
                settle_ms: Some(ms),
                ..
            }) => settings.with_settle_delay(Duration::from_millis(*ms)),
            Commands::TypeText(TypeTextArgs {
                delay_ms: Some(ms),
                ..
            }) => settings.with_char_delay(Duration::from_millis(*ms)),
            _ => settings,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(argv: &[&str]) -> Cli {
        Cli::parse_args(std::iter::once("autoanchor").chain(argv.iter().copied())).unwrap()
    }

    #[test]
    fn test_negative_coordinates_reach_validation() {
        let cli = parse(&["move-cursor", "-5", "10"]);
        assert_eq!(cli.command.name(), "move-cursor");
        assert_eq!(cli.command.positionals(), vec!["-5", "10"]);
    }

    #[test]
    fn test_click_positionals() {
        let cli = parse(&["click", "left", "400", "300", "--settle-ms", "5"]);
        assert_eq!(cli.command.positionals(), vec!["left", "400", "300"]);
        assert_eq!(
            cli.command.settings().settle_delay,
            Duration::from_millis(5)
        );

        let cli = parse(&["click", "right"]);
        assert_eq!(cli.command.positionals(), vec!["right"]);
        assert_eq!(cli.command.settings(), Settings::default());
    }

    #[test]
    fn test_press_key_collects_modifiers() {
        let cli = parse(&["press-key", "t", "cmd", "shift"]);
        assert_eq!(cli.command.positionals(), vec!["t", "cmd", "shift"]);
    }

    #[test]
    fn test_type_text_delay() {
        let cli = parse(&["type-text", "hello", "--delay-ms", "0"]);
        assert_eq!(cli.command.positionals(), vec!["hello"]);
        assert_eq!(cli.command.settings().char_delay, Duration::ZERO);
    }

    #[test]
    fn test_type_text_payload_is_verbatim() {
        for payload in ["-v", "--", "--help", "--delay-ms", "-h", "--version", "", " -x y "] {
            let cli = parse(&["type-text", payload]);
            assert_eq!(cli.command.name(), "type-text");
            assert_eq!(cli.command.positionals(), vec![payload], "{payload:?}");
            assert!(!cli.verbose, "{payload:?}");
            assert_eq!(cli.command.settings(), Settings::default());
        }
    }

    #[test]
    fn test_type_text_options_follow_payload() {
        let cli = parse(&["-v", "type-text", "--delay-ms", "--delay-ms", "7"]);
        assert!(cli.verbose);
        assert_eq!(cli.command.positionals(), vec!["--delay-ms"]);
        assert_eq!(cli.command.settings().char_delay, Duration::from_millis(7));
    }

    #[test]
    fn test_type_text_without_payload_reaches_validation() {
        let cli = parse(&["type-text"]);
        assert!(cli.command.positionals().is_empty());
    }

    #[test]
    fn test_other_commands_keep_their_arguments() {
        let cli = parse(&["press-key", "type-text"]);
        assert_eq!(cli.command.positionals(), vec!["type-text"]);
    }

    #[test]
    fn test_screenshot_target() {
        assert!(parse(&["screenshot"]).command.positionals().is_empty());
        assert_eq!(
            parse(&["screenshot", "--active-window"]).command.positionals(),
            vec!["active-window"]
        );
    }

    #[test]
    fn test_verbose_is_global() {
        assert!(parse(&["screen-size", "-v"]).verbose);
        assert!(parse(&["--verbose", "screen-size"]).verbose);
    }
}
