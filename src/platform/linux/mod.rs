//! Linux platform implementation.
//!
//! Input is injected through the XTest extension and the screen is read with
//! `XGetImage`, so an X server (or XWayland) must be reachable through
//! `DISPLAY`. A pure Wayland session has no equivalent and reports every
//! operation as unsupported.
//!
//! ## Feature Flags
//!
//! - `x11` (default): link against libX11 and libXtst

mod keycodes;

mod x11;

pub use x11::X11Backend;
