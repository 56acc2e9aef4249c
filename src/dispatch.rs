//! Command dispatch.
//!
//! Maps one validated [`Command`] to one controller operation and folds
//! whatever comes back, values, errors or panics, into an
//! [`OperationOutcome`].

use crate::backend::Backend;
use crate::command::{CaptureTarget, Command};
use crate::error::{Error, Result};
use crate::input::InputController;
use crate::outcome::{OperationOutcome, Payload};
use std::panic::{self, AssertUnwindSafe};

/// Run a command against the controller and normalize the result.
pub fn dispatch<B: Backend>(controller: &mut InputController<B>, command: Command) -> OperationOutcome {
    let name = command.name();
    log::debug!("dispatching {} on {}", name, controller.backend().name());

    let result = panic::catch_unwind(AssertUnwindSafe(|| run(controller, command)))
        .unwrap_or_else(|cause| Err(panic_error(cause)));

    match result {
        Ok(Some(data)) => OperationOutcome::with_data(data),
        Ok(None) => OperationOutcome::ok(),
        Err(e) => {
            log::warn!("{} failed: {}", name, e);
            OperationOutcome::failure(&e)
        }
    }
}

fn run<B: Backend>(controller: &mut InputController<B>, command: Command) -> Result<Option<Payload>> {
    let name = command.name();
    let data = match command {
        Command::CursorPosition => Some(Payload::Point(controller.query_cursor_position()?)),
        Command::ScreenSize => Some(Payload::Point(controller.query_screen_size()?)),
        Command::MoveCursor(to) => {
            controller.move_cursor(to)?;
            None
        }
        Command::Click { button, at } => {
            controller.synthesize_click(button, at)?;
            None
        }
        Command::TypeText(text) => {
            controller.synthesize_text(&text)?;
            None
        }
        Command::PressKey(spec) => {
            controller.synthesize_key(&spec)?;
            None
        }
        Command::Screenshot(CaptureTarget::Screen) => {
            Some(Payload::image(&controller.capture_screen()?))
        }
        Command::Screenshot(CaptureTarget::ActiveWindow) => {
            Some(Payload::image(&controller.capture_active_window()?))
        }
    };

    if data.is_some() != name.returns_data() {
        return Err(Error::SimulateFailed(format!(
            "{} produced a result of the wrong shape",
            name
        )));
    }
    Ok(data)
}

fn panic_error(cause: Box<dyn std::any::Any + Send>) -> Error {
    let detail = cause
        .downcast_ref::<&str>()
        .map(|s| s.to_string())
        .or_else(|| cause.downcast_ref::<String>().cloned())
        .unwrap_or_else(|| "unknown panic".to_string());
    Error::SimulateFailed(format!("backend panicked: {}", detail))
}
