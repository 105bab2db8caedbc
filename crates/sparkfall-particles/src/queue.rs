//! Per-frame list of groups waiting to be drawn

/// Slots of the groups to draw this frame, in enqueue order.
///
/// Pushing a slot that is already queued is ignored, so a group is drawn at
/// most once per frame. The renderer drains the queue completely each pass.
#[derive(Debug, Default)]
pub struct RenderQueue {
    slots: Vec<usize>,
    queued: Vec<bool>,
}

impl RenderQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, slot: usize) {
        if slot >= self.queued.len() {
            self.queued.resize(slot + 1, false);
        }
        if self.queued[slot] {
            return;
        }
        self.queued[slot] = true;
        self.slots.push(slot);
    }

    pub fn contains(&self, slot: usize) -> bool {
        self.queued.get(slot).copied().unwrap_or(false)
    }

    /// Remove and yield every queued slot
    pub fn drain(&mut self) -> std::vec::Drain<'_, usize> {
        for &slot in &self.slots {
            self.queued[slot] = false;
        }
        self.slots.drain(..)
    }

    pub fn clear(&mut self) {
        self.drain();
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }
}
