//! X11 event simulation using XTest.

use crate::error::{Error, Result};
use crate::event::{ButtonKind, Direction, Point};
use crate::keycode::Key;
use std::mem;
use std::os::raw::{c_int, c_uint};
use std::thread;
use std::time::Duration;
use x11::xlib;
use x11::xtest;

use crate::platform::linux::keycodes::key_to_keycode;

const TRUE: c_int = 1;
const FALSE: c_int = 0;

/// Keysyms at or above this value encode a Unicode code point directly.
const UNICODE_KEYSYM_BASE: xlib::KeySym = 0x0100_0000;

const NO_SYMBOL: xlib::KeySym = 0;

const XKB_USE_CORE_KBD: c_uint = 0x0100;

/// How long temporary bindings stay after the last tap that used them.
const REMAP_GRACE: Duration = Duration::from_millis(100);

/// Get current pointer position relative to the root window.
pub fn pointer_position(display: *mut xlib::Display, root: xlib::Window) -> Result<Point> {
    let mut root_return: xlib::Window = 0;
    let mut child_return: xlib::Window = 0;
    let mut root_x: c_int = 0;
    let mut root_y: c_int = 0;
    let mut win_x: c_int = 0;
    let mut win_y: c_int = 0;
    let mut mask: c_uint = 0;

    let result = unsafe {
        xlib::XQueryPointer(
            display,
            root,
            &mut root_return,
            &mut child_return,
            &mut root_x,
            &mut root_y,
            &mut win_x,
            &mut win_y,
            &mut mask,
        )
    };

    if result == FALSE {
        Err(Error::SimulateFailed(
            "XQueryPointer failed: pointer is on another screen".into(),
        ))
    } else {
        Ok(Point::new(root_x, root_y))
    }
}

/// Flush queued requests and wait until the server processed them.
fn sync(display: *mut xlib::Display) {
    unsafe {
        xlib::XFlush(display);
        xlib::XSync(display, FALSE);
    }
}

fn check(result: c_int, what: &str) -> Result<()> {
    if result == 0 {
        Err(Error::SimulateFailed(format!("{} failed", what)))
    } else {
        Ok(())
    }
}

fn is_press(direction: Direction) -> c_int {
    if direction.is_press() { TRUE } else { FALSE }
}

/// Move the pointer to an absolute position on the default screen.
pub fn fake_motion(display: *mut xlib::Display, to: Point) -> Result<()> {
    let result = unsafe { xtest::XTestFakeMotionEvent(display, 0, to.x, to.y, 0) };
    sync(display);
    check(result, "XTestFakeMotionEvent")
}

/// Get X11 button code
fn button_to_code(button: ButtonKind) -> c_uint {
    match button {
        ButtonKind::Left => 1,
        ButtonKind::Middle => 2,
        ButtonKind::Right => 3,
    }
}

pub fn fake_button(display: *mut xlib::Display, button: ButtonKind, direction: Direction) -> Result<()> {
    let code = button_to_code(button);
    let result = unsafe { xtest::XTestFakeButtonEvent(display, code, is_press(direction), 0) };
    sync(display);
    check(result, "XTestFakeButtonEvent")
}

pub fn fake_key(display: *mut xlib::Display, key: Key, direction: Direction) -> Result<()> {
    let keycode = key_to_keycode(key);
    let result = unsafe { xtest::XTestFakeKeyEvent(display, keycode, is_press(direction), 0) };
    sync(display);
    check(result, "XTestFakeKeyEvent")
}

/// The keysym that produces `ch`.
fn unicode_keysym(ch: char) -> xlib::KeySym {
    let cp = ch as xlib::KeySym;
    // Latin-1 keysyms coincide with their code points.
    if (0x20..=0x7E).contains(&cp) || (0xA0..=0xFF).contains(&cp) {
        cp
    } else {
        UNICODE_KEYSYM_BASE | cp
    }
}

/// Keysym bindings made on otherwise unused keycodes.
///
/// Clients resolve a keycode only when they handle its event, so a binding
/// has to outlive the taps that use it. Bindings stay in place until every
/// spare keycode is taken or [`restore`](Self::restore) runs.
#[derive(Debug, Default)]
pub struct Remaps {
    bound: Vec<(xlib::KeySym, c_int)>,
}

impl Remaps {
    fn bound_keycode(&self, keysym: xlib::KeySym) -> Option<c_int> {
        self.bound
            .iter()
            .find(|(sym, _)| *sym == keysym)
            .map(|&(_, keycode)| keycode)
    }

    fn record(&mut self, keysym: xlib::KeySym, keycode: c_int) {
        self.bound.push((keysym, keycode));
    }

    fn take_all(&mut self) -> Vec<c_int> {
        self.bound.drain(..).map(|(_, keycode)| keycode).collect()
    }

    /// A keycode bound to `keysym`, binding a spare one when needed.
    fn keycode_for(&mut self, display: *mut xlib::Display, keysym: xlib::KeySym) -> Result<c_int> {
        if let Some(keycode) = self.bound_keycode(keysym) {
            return Ok(keycode);
        }

        let keycode = match spare_keycode(display) {
            Ok(keycode) => keycode,
            Err(_) if !self.bound.is_empty() => {
                self.restore(display);
                spare_keycode(display)?
            }
            Err(e) => return Err(e),
        };

        log::trace!("binding keysym {:#x} to keycode {}", keysym, keycode);
        bind(display, keycode, keysym);
        self.record(keysym, keycode);
        Ok(keycode)
    }

    /// Clear every binding once clients had time to consume pending events.
    pub fn restore(&mut self, display: *mut xlib::Display) {
        if self.bound.is_empty() {
            return;
        }
        thread::sleep(REMAP_GRACE);
        for keycode in self.take_all() {
            bind(display, keycode, NO_SYMBOL);
        }
        sync(display);
    }
}

fn bind(display: *mut xlib::Display, keycode: c_int, keysym: xlib::KeySym) {
    let mut syms = [keysym, keysym];
    unsafe {
        xlib::XChangeKeyboardMapping(display, keycode, 2, syms.as_mut_ptr(), 1);
        xlib::XSync(display, FALSE);
    }
}

/// The keycode and shift level that produce `keysym` in the active layout
/// group, if the current keyboard map has one.
fn layout_keycode(display: *mut xlib::Display, keysym: xlib::KeySym) -> Option<(xlib::KeyCode, bool)> {
    let keycode = unsafe { xlib::XKeysymToKeycode(display, keysym) };
    if keycode == 0 {
        return None;
    }

    let mut state: xlib::XkbStateRec = unsafe { mem::zeroed() };
    let group = if unsafe { xlib::XkbGetState(display, XKB_USE_CORE_KBD, &mut state) } == 0 {
        state.group as c_int
    } else {
        0
    };

    [(0, false), (1, true)]
        .into_iter()
        .find(|&(level, _)| unsafe { xlib::XkbKeycodeToKeysym(display, keycode, group, level) } == keysym)
        .map(|(_, shift)| (keycode, shift))
}

fn tap(display: *mut xlib::Display, keycode: c_uint) -> Result<()> {
    let down = unsafe { xtest::XTestFakeKeyEvent(display, keycode, TRUE, 0) };
    let up = unsafe { xtest::XTestFakeKeyEvent(display, keycode, FALSE, 0) };
    sync(display);
    check(down, "XTestFakeKeyEvent")?;
    check(up, "XTestFakeKeyEvent")
}

/// Type one character.
///
/// A character the active layout has a key for is typed on that key, with
/// Shift when it sits on the second level. Anything else is bound to a
/// spare keycode first.
pub fn type_char(display: *mut xlib::Display, remaps: &mut Remaps, ch: char) -> Result<()> {
    if ch.is_control() {
        return Err(Error::EncodingFailed(format!(
            "control character U+{:04X} has no keysym",
            ch as u32
        )));
    }

    let keysym = unicode_keysym(ch);
    if remaps.bound_keycode(keysym).is_none() {
        if let Some((keycode, shift)) = layout_keycode(display, keysym) {
            if !shift {
                return tap(display, keycode as c_uint);
            }
            fake_key(display, Key::ShiftLeft, Direction::Press)?;
            let typed = tap(display, keycode as c_uint);
            let released = fake_key(display, Key::ShiftLeft, Direction::Release);
            return typed.and(released);
        }
    }

    let keycode = remaps.keycode_for(display, keysym)?;
    tap(display, keycode as c_uint)
}

/// Find a keycode that has no keysyms bound to it.
fn spare_keycode(display: *mut xlib::Display) -> Result<c_int> {
    let mut min: c_int = 0;
    let mut max: c_int = 0;
    unsafe { xlib::XDisplayKeycodes(display, &mut min, &mut max) };

    let count = max - min + 1;
    let mut per_keycode: c_int = 0;
    let mapping =
        unsafe { xlib::XGetKeyboardMapping(display, min as xlib::KeyCode, count, &mut per_keycode) };
    if mapping.is_null() || count <= 0 || per_keycode <= 0 {
        return Err(Error::EncodingFailed("XGetKeyboardMapping failed".into()));
    }

    let per = per_keycode as usize;
    let keysyms = unsafe { std::slice::from_raw_parts(mapping, count as usize * per) };
    let spare = keysyms
        .chunks_exact(per)
        .position(|syms| syms.iter().all(|&sym| sym == 0))
        .map(|offset| min + offset as c_int);
    unsafe { xlib::XFree(mapping.cast()) };

    spare.ok_or_else(|| Error::EncodingFailed("keyboard map has no unused keycode".into()))
}
