//! Input events delivered to the animation driver

use sparkfall_core::Command;

/// Something the host environment reported between ticks
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    /// Pointer or touch pressed at surface coordinates
    PointerDown { x: f32, y: f32 },
    /// A discrete user command (key press or control button)
    Command(Command),
    /// The drawing area changed size
    Resize { width: u32, height: u32 },
}
