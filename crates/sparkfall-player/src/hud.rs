//! Control strip overlay drawn on top of each frame

use sparkfall_core::{BurstTier, Color, Command};
use sparkfall_runtime::{AnimationDriver, ControlButton};

const BORDER: Color = Color::rgba(255, 255, 255, 90);
const FILL_ON: Color = Color::rgba(255, 255, 255, 150);
const FILL_OFF: Color = Color::rgba(255, 255, 255, 24);

/// Draw every control button into the driver's current frame
pub fn draw_controls(driver: &mut AnimationDriver) {
    let config = driver.config();
    let tier = config.tier;
    let buttons: Vec<(ControlButton, bool)> = driver
        .controls()
        .buttons()
        .iter()
        .map(|b| (*b, config.is_enabled(b.command)))
        .collect();

    let frame = driver.frame_mut();
    for (button, enabled) in buttons {
        let x = button.x.max(0.0) as u32;
        let y = button.y.max(0.0) as u32;
        let size = button.size.max(1.0) as u32;
        let border = (size / 14).max(1);

        // Outline
        frame.fill_rect(x, y, size, border, BORDER);
        frame.fill_rect(x, y + size - border, size, border, BORDER);
        frame.fill_rect(x, y + border, border, size.saturating_sub(2 * border), BORDER);
        frame.fill_rect(x + size - border, y + border, border, size.saturating_sub(2 * border), BORDER);

        let inset = border * 3;
        let inner = size.saturating_sub(2 * inset);
        match button.command {
            Command::CycleTier => {
                // One pip per tier step
                let pips = tier_pips(tier);
                let pip = (inner / 4).max(1);
                let width = pip.saturating_sub(1).max(1);
                for i in 0..pips {
                    frame.fill_rect(x + inset + i * pip, y + inset, width, inner, FILL_ON);
                }
            }
            Command::ClearCanvas => frame.fill_rect(x + inset, y + inset, inner, inner, FILL_OFF),
            _ => {
                let fill = if enabled { FILL_ON } else { FILL_OFF };
                frame.fill_rect(x + inset, y + inset, inner, inner, fill);
            }
        }
    }
}

fn tier_pips(tier: BurstTier) -> u32 {
    match tier {
        BurstTier::Low => 1,
        BurstTier::Medium => 2,
        BurstTier::High => 3,
        BurstTier::Extreme => 4,
    }
}
