//! Input operations layered over a platform backend.
//!
//! [`InputController`] owns the ordering rules that must hold on every
//! platform: bounds checks against a fresh screen size, move-then-click,
//! balanced modifier presses and truthful partial-failure reporting for text.

use crate::backend::Backend;
use crate::capture::Frame;
use crate::error::{Error, ErrorKind, Result};
use crate::event::{ButtonKind, Direction, KeySpec, Modifier, Point};
use crate::keycode::Key;
use crate::settings::{Settings, pause};

/// Controller for mouse, keyboard and screen operations.
pub struct InputController<B: Backend> {
    backend: B,
    settings: Settings,
}

impl<B: Backend> InputController<B> {
    pub fn new(backend: B, settings: Settings) -> Self {
        Self { backend, settings }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    // ============ Queries ============

    /// Read the pointer location.
    pub fn query_cursor_position(&mut self) -> Result<Point> {
        self.backend.cursor_position()
    }

    /// Read the primary display size. Always strictly positive.
    pub fn query_screen_size(&mut self) -> Result<Point> {
        let size = self.backend.screen_size()?;
        if size.x <= 0 || size.y <= 0 {
            return Err(Error::PlatformUnsupported(format!(
                "{} reported an unusable screen size {}x{}",
                self.backend.name(),
                size.x,
                size.y
            )));
        }
        Ok(size)
    }

    // ============ Mouse ============

    /// Warp the pointer, rejecting targets outside the current screen.
    pub fn move_cursor(&mut self, to: Point) -> Result<()> {
        let screen = self.query_screen_size()?;
        if !to.within(screen) {
            return Err(Error::InvalidArgument(format!(
                "point {} is outside the {}x{} screen",
                to, screen.x, screen.y
            )));
        }
        log::debug!("moving cursor to {}", to);
        self.backend.warp_cursor(to)
    }

    /// Click a button, optionally moving there first.
    ///
    /// When the move fails no button event is sent. Once the press went
    /// through the release is always attempted.
    pub fn synthesize_click(&mut self, button: ButtonKind, at: Option<Point>) -> Result<()> {
        if let Some(point) = at {
            self.move_cursor(point)?;
            pause(self.settings.settle_delay);
        }

        log::debug!("clicking {} button", button);
        self.backend.button(button, Direction::Press)?;
        pause(self.settings.hold_delay);
        self.backend.button(button, Direction::Release)
    }

    // ============ Keyboard ============

    /// Tap a key chord: modifiers down in order, key tap, modifiers up in
    /// reverse order.
    ///
    /// Every modifier that went down is released, even when a later step
    /// fails. The first error is the one reported.
    pub fn synthesize_key(&mut self, spec: &KeySpec) -> Result<()> {
        log::debug!("pressing {:?} with {:?}", spec.key, spec.modifiers);
        self.chord(&spec.modifiers, spec.key)
    }

    fn chord(&mut self, modifiers: &[Modifier], key: Key) -> Result<()> {
        let mut held: Vec<Key> = Vec::with_capacity(modifiers.len());
        let mut outcome = Ok(());

        for modifier in modifiers {
            let mod_key = modifier.key();
            match self.backend.key(mod_key, Direction::Press) {
                Ok(()) => held.push(mod_key),
                Err(e) => {
                    outcome = Err(e);
                    break;
                }
            }
        }

        if outcome.is_ok() {
            outcome = self.tap(key);
        }

        for mod_key in held.into_iter().rev() {
            if let Err(e) = self.backend.key(mod_key, Direction::Release) {
                log::warn!("failed to release {:?}: {}", mod_key, e);
                if outcome.is_ok() {
                    outcome = Err(e);
                }
            }
        }

        outcome
    }

    fn tap(&mut self, key: Key) -> Result<()> {
        self.backend.key(key, Direction::Press)?;
        pause(self.settings.hold_delay);
        self.backend.key(key, Direction::Release)
    }

    /// Type text one code point at a time.
    ///
    /// Line breaks and tabs are tapped as Enter and Tab. Every other
    /// character is handed to the backend, which types it in the active
    /// keyboard layout; the US key table is only used when the backend has
    /// no way to produce a character itself. Delivered characters cannot be
    /// taken back, so a failure part way through is reported as
    /// [`Error::Partial`] with the number already typed.
    pub fn synthesize_text(&mut self, text: &str) -> Result<()> {
        let total = text.chars().count();
        log::debug!("typing {} characters", total);

        for (typed, ch) in text.chars().enumerate() {
            let result = self.type_char(ch);

            if let Err(e) = result {
                return Err(if typed == 0 {
                    e
                } else {
                    Error::partial(typed, total, e)
                });
            }
            pause(self.settings.char_delay);
        }
        Ok(())
    }

    fn type_char(&mut self, ch: char) -> Result<()> {
        if ch.is_control() {
            return match Key::for_char(ch) {
                Some((key, _)) => self.tap(key),
                None => Err(Error::EncodingFailed(format!(
                    "control character U+{:04X} cannot be typed",
                    ch as u32
                ))),
            };
        }

        match self.backend.type_char(ch) {
            Err(e) if e.kind() == ErrorKind::EncodingFailed => match Key::for_char(ch) {
                Some((key, true)) => self.chord(&[Modifier::Shift], key),
                Some((key, false)) => self.tap(key),
                None => Err(e),
            },
            other => other,
        }
    }

    // ============ Screen ============

    /// Capture the primary display as PNG bytes.
    pub fn capture_screen(&mut self) -> Result<Vec<u8>> {
        let frame = self.backend.capture_screen()?;
        self.encode(frame)
    }

    /// Capture the foreground window as PNG bytes.
    pub fn capture_active_window(&mut self) -> Result<Vec<u8>> {
        let frame = self.backend.capture_active_window()?;
        self.encode(frame)
    }

    fn encode(&self, frame: Frame) -> Result<Vec<u8>> {
        log::debug!("encoding {}x{} capture", frame.width, frame.height);
        frame.to_png()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::mock::{Call, RecordingBackend};

    fn controller(backend: RecordingBackend) -> InputController<RecordingBackend> {
        InputController::new(backend, Settings::immediate())
    }

    #[test]
    fn test_move_then_query_returns_point() {
        let mut ctl = controller(RecordingBackend::new(1920, 1080));
        ctl.move_cursor(Point::new(640, 480)).unwrap();
        assert_eq!(ctl.query_cursor_position().unwrap(), Point::new(640, 480));
    }

    #[test]
    fn test_move_outside_screen_is_rejected_without_movement() {
        let mut ctl = controller(RecordingBackend::new(1920, 1080));
        let err = ctl.move_cursor(Point::new(1920, 10)).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidArgument);
        assert!(ctl.backend().calls.is_empty());
    }

    #[test]
    fn test_screen_size_is_queried_fresh_each_move() {
        let mut ctl = controller(RecordingBackend::new(1920, 1080));
        ctl.move_cursor(Point::new(1, 1)).unwrap();
        ctl.move_cursor(Point::new(2, 2)).unwrap();
        assert_eq!(ctl.backend().screen_queries, 2);
    }

    #[test]
    fn test_zero_screen_size_is_unsupported() {
        let mut ctl = controller(RecordingBackend::new(0, 1080));
        let err = ctl.query_screen_size().unwrap_err();
        assert_eq!(err.kind(), ErrorKind::PlatformUnsupported);
    }

    #[test]
    fn test_click_at_point_moves_then_clicks_once() {
        let mut ctl = controller(RecordingBackend::new(1920, 1080));
        ctl.synthesize_click(ButtonKind::Left, Some(Point::new(400, 300)))
            .unwrap();
        assert_eq!(
            ctl.backend().calls,
            vec![
                Call::Warp(Point::new(400, 300)),
                Call::Button(ButtonKind::Left, Direction::Press),
                Call::Button(ButtonKind::Left, Direction::Release),
            ]
        );
    }

    #[test]
    fn test_click_without_point_stays_put() {
        let mut ctl = controller(RecordingBackend::new(1920, 1080));
        ctl.synthesize_click(ButtonKind::Right, None).unwrap();
        assert_eq!(
            ctl.backend().calls,
            vec![
                Call::Button(ButtonKind::Right, Direction::Press),
                Call::Button(ButtonKind::Right, Direction::Release),
            ]
        );
    }

    #[test]
    fn test_failed_move_skips_click() {
        let mut ctl = controller(RecordingBackend::new(800, 600));
        let err = ctl
            .synthesize_click(ButtonKind::Left, Some(Point::new(400, 700)))
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidArgument);
        assert!(ctl.backend().calls.is_empty());
    }

    #[test]
    fn test_key_chord_ordering() {
        let mut ctl = controller(RecordingBackend::new(1920, 1080));
        let spec = KeySpec::new(Key::KeyA)
            .with_modifier(Modifier::Control)
            .with_modifier(Modifier::Shift);
        ctl.synthesize_key(&spec).unwrap();
        assert_eq!(
            ctl.backend().calls,
            vec![
                Call::Key(Key::ControlLeft, Direction::Press),
                Call::Key(Key::ShiftLeft, Direction::Press),
                Call::Key(Key::KeyA, Direction::Press),
                Call::Key(Key::KeyA, Direction::Release),
                Call::Key(Key::ShiftLeft, Direction::Release),
                Call::Key(Key::ControlLeft, Direction::Release),
            ]
        );
    }

    #[test]
    fn test_failed_primary_key_releases_modifiers() {
        let mut backend = RecordingBackend::new(1920, 1080);
        backend.failing_keys.push(Key::F24);
        let mut ctl = controller(backend);
        let spec = KeySpec::new(Key::F24)
            .with_modifier(Modifier::Control)
            .with_modifier(Modifier::Alt);

        let err = ctl.synthesize_key(&spec).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::SimulateFailed);
        assert!(ctl.backend().held_keys().is_empty());
        assert_eq!(
            ctl.backend().calls.last(),
            Some(&Call::Key(Key::ControlLeft, Direction::Release))
        );
    }

    #[test]
    fn test_failed_modifier_releases_earlier_ones() {
        let mut backend = RecordingBackend::new(1920, 1080);
        backend.failing_keys.push(Key::AltLeft);
        let mut ctl = controller(backend);
        let spec = KeySpec::new(Key::KeyQ)
            .with_modifier(Modifier::Meta)
            .with_modifier(Modifier::Alt);

        assert!(ctl.synthesize_key(&spec).is_err());
        assert!(ctl.backend().held_keys().is_empty());
        assert!(
            !ctl.backend()
                .calls
                .contains(&Call::Key(Key::KeyQ, Direction::Press))
        );
    }

    #[test]
    fn test_empty_text_is_a_no_op() {
        let mut ctl = controller(RecordingBackend::new(1920, 1080));
        ctl.synthesize_text("").unwrap();
        assert!(ctl.backend().calls.is_empty());
    }

    #[test]
    fn test_text_goes_through_the_layout() {
        let mut ctl = controller(RecordingBackend::new(1920, 1080));
        ctl.synthesize_text("aZ?\n").unwrap();
        assert_eq!(
            ctl.backend().calls,
            vec![
                Call::Char('a'),
                Call::Char('Z'),
                Call::Char('?'),
                Call::Key(Key::Enter, Direction::Press),
                Call::Key(Key::Enter, Direction::Release),
            ]
        );
    }

    #[test]
    fn test_us_keys_are_a_fallback() {
        let mut backend = RecordingBackend::new(1920, 1080);
        backend.supports_text = false;
        let mut ctl = controller(backend);
        ctl.synthesize_text("aB").unwrap();
        assert_eq!(
            ctl.backend().calls,
            vec![
                Call::Key(Key::KeyA, Direction::Press),
                Call::Key(Key::KeyA, Direction::Release),
                Call::Key(Key::ShiftLeft, Direction::Press),
                Call::Key(Key::KeyB, Direction::Press),
                Call::Key(Key::KeyB, Direction::Release),
                Call::Key(Key::ShiftLeft, Direction::Release),
            ]
        );
    }

    #[test]
    fn test_text_outside_ascii_round_trips() {
        let mut ctl = controller(RecordingBackend::new(1920, 1080));
        let text = "é€👋 漢字";
        ctl.synthesize_text(text).unwrap();
        let typed: String = ctl
            .backend()
            .calls
            .iter()
            .map(|call| match call {
                Call::Char(ch) => *ch,
                other => panic!("unexpected call {other:?}"),
            })
            .collect();
        assert_eq!(typed, text);
    }

    #[test]
    fn test_partial_text_failure_is_reported() {
        let mut backend = RecordingBackend::new(1920, 1080);
        backend.text_budget = Some(4);
        let mut ctl = controller(backend);

        let err = ctl.synthesize_text("hi éè").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::EncodingFailed);
        assert_eq!(err.progress(), Some((4, 5)));
        assert_eq!(ctl.backend().calls.last(), Some(&Call::Char('é')));
    }

    #[test]
    fn test_failure_on_first_character_is_not_partial() {
        let mut backend = RecordingBackend::new(1920, 1080);
        backend.supports_text = false;
        let mut ctl = controller(backend);

        let err = ctl.synthesize_text("ü").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::EncodingFailed);
        assert_eq!(err.progress(), None);
    }

    #[test]
    fn test_capture_without_display_is_capture_failure() {
        let mut ctl = controller(RecordingBackend::new(1920, 1080));
        let err = ctl.capture_screen().unwrap_err();
        assert_eq!(err.kind(), ErrorKind::CaptureFailed);
    }

    #[test]
    fn test_capture_permission_error_is_kept() {
        let mut backend = RecordingBackend::new(1920, 1080);
        backend.capture_error = Some(|| Error::PermissionDenied("screen recording".into()));
        let mut ctl = controller(backend);
        let err = ctl.capture_screen().unwrap_err();
        assert_eq!(err.kind(), ErrorKind::PermissionDenied);
    }

    #[test]
    fn test_capture_returns_png() {
        let mut backend = RecordingBackend::new(2, 1);
        backend.frame = Some(Frame::from_rgba(2, 1, vec![0xAB; 8]).unwrap());
        let mut ctl = controller(backend);
        let png = ctl.capture_screen().unwrap();
        assert!(png.starts_with(b"\x89PNG"));
    }

    #[test]
    fn test_active_window_default_is_unsupported() {
        let mut ctl = controller(RecordingBackend::new(1920, 1080));
        let err = ctl.capture_active_window().unwrap_err();
        assert_eq!(err.kind(), ErrorKind::PlatformUnsupported);
    }
}
