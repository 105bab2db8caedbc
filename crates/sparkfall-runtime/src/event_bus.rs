//! Event bus for input collected between ticks

use crate::event::InputEvent;

/// A simple event queue the host pushes to and the driver drains
#[derive(Debug, Default)]
pub struct EventBus {
    events: Vec<InputEvent>,
}

impl EventBus {
    pub fn new() -> Self {
        Self { events: Vec::new() }
    }

    pub fn push(&mut self, event: InputEvent) {
        self.events.push(event);
    }

    /// Take every pending event in arrival order
    pub fn drain(&mut self) -> Vec<InputEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }
}
