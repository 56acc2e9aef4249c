//! Input simulation demo.
//!
//! Run with: cargo run --example simulate
//!
//! WARNING: This will actually move your mouse and type keys!

use autoanchor::{
    ButtonKind, InputController, Key, KeySpec, Modifier, NativeBackend, Point, Settings,
};
use std::thread::sleep;
use std::time::Duration;

fn report(step: &str, result: autoanchor::Result<()>) {
    println!("{}", step);
    match result {
        Ok(()) => println!("   Done!"),
        Err(e) => eprintln!("   Error: {}", e),
    }
    sleep(Duration::from_millis(500));
}

fn main() {
    println!("autoanchor simulation demo");
    println!("==========================\n");
    println!("WARNING: This will move your mouse and simulate key presses!\n");
    println!("Starting in 3 seconds... (Press Ctrl+C to cancel)\n");

    sleep(Duration::from_secs(3));

    let mut controller = InputController::new(NativeBackend::new(), Settings::default());

    match controller.query_screen_size() {
        Ok(size) => println!("Screen is {}x{}\n", size.x, size.y),
        Err(e) => eprintln!("Cannot read screen size: {}\n", e),
    }

    report(
        "1. Moving mouse to (100, 100)...",
        controller.move_cursor(Point::new(100, 100)),
    );

    report(
        "2. Left clicking at (200, 200)...",
        controller.synthesize_click(ButtonKind::Left, Some(Point::new(200, 200))),
    );

    report(
        "3. Pressing Shift+A (types uppercase 'A')...",
        controller.synthesize_key(&KeySpec::new(Key::KeyA).with_modifier(Modifier::Shift)),
    );

    report(
        "4. Typing \"Hello, world!\"...",
        controller.synthesize_text("Hello, world!"),
    );

    match controller.query_cursor_position() {
        Ok(at) => println!("Pointer ended at {}", at),
        Err(e) => eprintln!("Cannot read pointer: {}", e),
    }

    println!("\nSimulation complete!");
}
