use macroquad::prelude::*;

/// UI signals the frame loop reacts to, sampled once per tick
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct InputSignals {
    pub quit: bool,
    /// Wheel notches this tick; positive zooms in
    pub zoom_delta: f32,
}

impl InputSignals {
    /// Sample the macroquad window. Requires `prevent_quit()` at startup so
    /// closing the window arrives here instead of killing the process.
    pub fn poll() -> Self {
        let quit = is_quit_requested() || is_key_pressed(KeyCode::Escape);
        let (_, wheel_y) = mouse_wheel();
        Self {
            quit,
            zoom_delta: wheel_notches(wheel_y),
        }
    }
}

/// Backends report wheel motion in different units (1.0 or 120.0 per notch);
/// the zoom step is per notch.
fn wheel_notches(wheel_y: f32) -> f32 {
    if wheel_y == 0.0 || !wheel_y.is_finite() {
        0.0
    } else {
        wheel_y.signum()
    }
}
