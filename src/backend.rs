//! The capability set every platform backend provides.

use crate::capture::Frame;
use crate::error::{Error, Result};
use crate::event::{ButtonKind, Direction, Point};
use crate::keycode::Key;

/// Native input and capture primitives for one operating system.
///
/// Implementations do no sequencing of their own: move-then-click, modifier
/// pairing and per-character typing are layered on top by
/// [`InputController`](crate::input::InputController), so every backend obeys
/// the same ordering rules. A primitive the platform cannot provide returns
/// [`Error::PlatformUnsupported`] rather than doing nothing.
///
/// The OS owns the pointer and keyboard state; backends must read it fresh on
/// every call and never cache it.
pub trait Backend {
    /// Short platform name used in diagnostics.
    fn name(&self) -> &'static str;

    /// Current pointer location in screen coordinates.
    fn cursor_position(&mut self) -> Result<Point>;

    /// Pixel dimensions of the primary display.
    fn screen_size(&mut self) -> Result<Point>;

    /// Warp the pointer to an absolute position. Bounds are checked by the caller.
    fn warp_cursor(&mut self, to: Point) -> Result<()>;

    /// Press or release a mouse button at the current pointer position.
    fn button(&mut self, button: ButtonKind, direction: Direction) -> Result<()>;

    /// Press or release a key.
    fn key(&mut self, key: Key, direction: Direction) -> Result<()>;

    /// Type one printable character as the active keyboard layout produces
    /// it, or through the platform's unicode insertion when no key does.
    ///
    /// [`Error::EncodingFailed`] means the platform has no way to produce the
    /// character.
    fn type_char(&mut self, ch: char) -> Result<()> {
        Err(Error::EncodingFailed(format!(
            "{} cannot insert {:?} (U+{:04X})",
            self.name(),
            ch,
            ch as u32
        )))
    }

    /// Capture the primary display.
    fn capture_screen(&mut self) -> Result<Frame>;

    /// Capture the foreground window.
    fn capture_active_window(&mut self) -> Result<Frame> {
        Err(Error::PlatformUnsupported(format!(
            "active window capture is not available on {}",
            self.name()
        )))
    }
}

#[cfg(test)]
pub(crate) mod mock {
    //! A backend that records every primitive instead of touching the OS.

    use super::*;

    #[derive(Debug, Clone, PartialEq, Eq)]
    pub enum Call {
        Warp(Point),
        Button(ButtonKind, Direction),
        Key(Key, Direction),
        Char(char),
    }

    pub struct RecordingBackend {
        pub screen: Point,
        pub cursor: Point,
        pub calls: Vec<Call>,
        pub screen_queries: usize,
        /// Keys whose press fails.
        pub failing_keys: Vec<Key>,
        pub supports_text: bool,
        /// Fail every typed character after this many succeeded.
        pub text_budget: Option<usize>,
        pub frame: Option<Frame>,
        pub capture_error: Option<fn() -> Error>,
        pub panic_on_query: bool,
    }

    impl RecordingBackend {
        pub fn new(width: i32, height: i32) -> Self {
            Self {
                screen: Point::new(width, height),
                cursor: Point::new(0, 0),
                calls: Vec::new(),
                screen_queries: 0,
                failing_keys: Vec::new(),
                supports_text: true,
                text_budget: None,
                frame: None,
                capture_error: None,
                panic_on_query: false,
            }
        }

        /// Keys currently held down, in press order.
        pub fn held_keys(&self) -> Vec<Key> {
            let mut held = Vec::new();
            for call in &self.calls {
                if let Call::Key(key, direction) = call {
                    match direction {
                        Direction::Press => held.push(*key),
                        Direction::Release => held.retain(|k| k != key),
                    }
                }
            }
            held
        }
    }

    impl Backend for RecordingBackend {
        fn name(&self) -> &'static str {
            "recording"
        }

        fn cursor_position(&mut self) -> Result<Point> {
            if self.panic_on_query {
                panic!("backend exploded");
            }
            Ok(self.cursor)
        }

        fn screen_size(&mut self) -> Result<Point> {
            self.screen_queries += 1;
            Ok(self.screen)
        }

        fn warp_cursor(&mut self, to: Point) -> Result<()> {
            self.calls.push(Call::Warp(to));
            self.cursor = to;
            Ok(())
        }

        fn button(&mut self, button: ButtonKind, direction: Direction) -> Result<()> {
            self.calls.push(Call::Button(button, direction));
            Ok(())
        }

        fn key(&mut self, key: Key, direction: Direction) -> Result<()> {
            if direction.is_press() && self.failing_keys.contains(&key) {
                return Err(Error::SimulateFailed(format!("{:?} rejected", key)));
            }
            self.calls.push(Call::Key(key, direction));
            Ok(())
        }

        fn type_char(&mut self, ch: char) -> Result<()> {
            if !self.supports_text {
                return Err(Error::EncodingFailed(format!("no mapping for {:?}", ch)));
            }
            if let Some(budget) = self.text_budget.as_mut() {
                if *budget == 0 {
                    return Err(Error::EncodingFailed(format!("no mapping for {:?}", ch)));
                }
                *budget -= 1;
            }
            self.calls.push(Call::Char(ch));
            Ok(())
        }

        fn capture_screen(&mut self) -> Result<Frame> {
            if let Some(make_error) = self.capture_error {
                return Err(make_error());
            }
            self.frame
                .clone()
                .ok_or_else(|| Error::CaptureFailed("no display attached".into()))
        }
    }
}
