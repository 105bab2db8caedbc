//! Sparkfall Runtime - frame loop infrastructure
//!
//! - `FrameClock` - timestamps to Δ, the elapsed time in 60 Hz frames
//! - `InputEvent` / `EventBus` - input collected between ticks
//! - `ControlStrip` - on-screen command buttons and pointer filtering
//! - `AnimationDriver` - drains input, auto-bursts, steps groups, renders

mod clock;
mod driver;
mod event;
mod event_bus;
mod input;

pub use clock::{FrameClock, MAX_ELAPSED_MS, TARGET_FRAME_MS};
pub use driver::{AnimationDriver, FrameStats};
pub use event::InputEvent;
pub use event_bus::EventBus;
pub use input::{command_for_key, ControlButton, ControlStrip};
