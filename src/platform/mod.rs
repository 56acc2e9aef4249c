//! Platform-specific implementations.
//!
//! Exactly one backend is compiled in and exported as [`NativeBackend`].

#[cfg(target_os = "macos")]
mod macos;
#[cfg(target_os = "macos")]
pub use macos::MacBackend as NativeBackend;

#[cfg(target_os = "windows")]
mod windows;
#[cfg(target_os = "windows")]
pub use windows::WindowsBackend as NativeBackend;

#[cfg(all(target_os = "linux", feature = "x11"))]
mod linux;
#[cfg(all(target_os = "linux", feature = "x11"))]
pub use linux::X11Backend as NativeBackend;

#[cfg(not(any(
    target_os = "macos",
    target_os = "windows",
    all(target_os = "linux", feature = "x11")
)))]
mod unsupported;
#[cfg(not(any(
    target_os = "macos",
    target_os = "windows",
    all(target_os = "linux", feature = "x11")
)))]
pub use unsupported::UnsupportedBackend as NativeBackend;
