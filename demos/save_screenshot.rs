//! Capture the screen and write it to a PNG file.
//!
//! Run with: cargo run --example save_screenshot -- [path]

use autoanchor::{InputController, NativeBackend, Settings};

fn main() -> autoanchor::Result<()> {
    let path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "screenshot.png".to_string());

    let mut controller = InputController::new(NativeBackend::new(), Settings::default());
    let png = controller.capture_screen()?;

    std::fs::write(&path, &png)
        .map_err(|e| autoanchor::Error::EncodingFailed(format!("cannot write {}: {}", path, e)))?;
    println!("Wrote {} bytes to {}", png.len(), path);
    Ok(())
}
