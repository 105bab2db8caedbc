//! Control strip hit-testing and keyboard bindings

use sparkfall_core::Command;
use winit::keyboard::KeyCode;

const BUTTON_SIZE: f32 = 28.0;
const BUTTON_GAP: f32 = 6.0;
const STRIP_MARGIN: f32 = 8.0;

/// One square button in the control strip, in surface pixels
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ControlButton {
    pub command: Command,
    pub x: f32,
    pub y: f32,
    pub size: f32,
}

impl ControlButton {
    pub fn contains(&self, x: f32, y: f32) -> bool {
        x >= self.x && x < self.x + self.size && y >= self.y && y < self.y + self.size
    }
}

/// A row of command buttons anchored to the top-left corner.
///
/// Pointer presses on a button trigger its command instead of a burst.
#[derive(Debug, Clone)]
pub struct ControlStrip {
    buttons: Vec<ControlButton>,
}

impl ControlStrip {
    /// Lay out one button per command, scaled by the display's pixel density
    pub fn new(scale: f32) -> Self {
        let scale = if scale.is_finite() && scale > 0.0 { scale } else { 1.0 };
        let size = BUTTON_SIZE * scale;
        let step = size + BUTTON_GAP * scale;
        let margin = STRIP_MARGIN * scale;

        let buttons = Command::ALL
            .iter()
            .enumerate()
            .map(|(i, &command)| ControlButton {
                command,
                x: margin + i as f32 * step,
                y: margin,
                size,
            })
            .collect();
        Self { buttons }
    }

    /// Command under the pointer, if any
    pub fn hit(&self, x: f32, y: f32) -> Option<Command> {
        self.buttons
            .iter()
            .find(|b| b.contains(x, y))
            .map(|b| b.command)
    }

    pub fn buttons(&self) -> &[ControlButton] {
        &self.buttons
    }
}

impl Default for ControlStrip {
    fn default() -> Self {
        Self::new(1.0)
    }
}

/// Keyboard binding for each command
pub fn command_for_key(key: KeyCode) -> Option<Command> {
    match key {
        KeyCode::KeyT => Some(Command::CycleTier),
        KeyCode::KeyF => Some(Command::ToggleFloor),
        KeyCode::KeyR => Some(Command::ToggleReflections),
        KeyCode::KeyG => Some(Command::ToggleGlow),
        KeyCode::KeyP => Some(Command::TogglePersistStrokes),
        KeyCode::KeyA => Some(Command::ToggleAutoBursts),
        KeyCode::KeyC => Some(Command::ClearCanvas),
        _ => None,
    }
}
