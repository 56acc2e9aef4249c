//! # autoanchor
//!
//! Single-shot desktop automation: read the pointer, move and click it, type
//! text, press key chords and capture the screen, on Windows, macOS and X11.
//!
//! Every request goes through the same three steps and always produces
//! exactly one [`OperationOutcome`]:
//!
//! 1. [`validate_command`] turns a command name and raw string arguments into
//!    a typed [`Command`] without touching the OS.
//! 2. [`dispatch`] runs it through an [`InputController`], which layers the
//!    ordering rules (move before click, balanced modifiers, partial-failure
//!    reporting) over a platform [`Backend`].
//! 3. The outcome serializes to a single JSON line.
//!
//! ## Quick Start
//!
//! ```no_run
//! use autoanchor::{InputController, NativeBackend, Settings, dispatch, validate_command};
//!
//! let command = validate_command("click", &["left", "400", "300"])?;
//! let mut controller = InputController::new(NativeBackend::new(), Settings::default());
//! let outcome = dispatch(&mut controller, command);
//! println!("{}", outcome.to_json());
//! # Ok::<(), autoanchor::Error>(())
//! ```
//!
//! ## Logging
//!
//! The library logs through the [`log`] facade and never prints. Install any
//! logger (the `autoanchor` binary uses `tracing-subscriber`) to see it.

pub mod backend;
pub mod capture;
pub mod command;
pub mod dispatch;
pub mod error;
pub mod event;
pub mod input;
pub mod keycode;
pub mod outcome;
pub mod settings;
pub mod validate;

mod platform;

// Re-exports
pub use backend::Backend;
pub use capture::Frame;
pub use command::{CaptureTarget, Command, CommandName};
pub use dispatch::dispatch;
pub use error::{Error, ErrorKind, Result};
pub use event::{ButtonKind, Direction, KeySpec, Modifier, Point};
pub use input::InputController;
pub use keycode::Key;
pub use outcome::{OperationOutcome, Payload, Progress};
pub use settings::Settings;
pub use validate::validate_command;

/// The backend for the platform this crate was built for.
pub use platform::NativeBackend;
