//! Per-row animation and drag state, keyed by message id.
//!
//! List positions shift as messages arrive, so state is addressed by the
//! row's stable id. Slots are dropped when their row leaves the dataset,
//! taking any in-flight drag with them.

use std::collections::{HashMap, HashSet};
use std::time::Instant;

use tracing::debug;

use crate::animation::{AnimationClock, Easing};
use crate::gesture::{DragConfig, DragPhase, DragState};
use crate::models::MessageId;

/// Animation and gesture tuning shared by every row.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RowConfig {
    pub reveal_ms: i64,
    pub reveal_easing: Easing,
    pub drag: DragConfig,
}

impl Default for RowConfig {
    fn default() -> Self {
        Self {
            reveal_ms: 300,
            reveal_easing: Easing::EaseOutCubic,
            drag: DragConfig::default(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct RowSlot {
    pub id: MessageId,
    pub reveal: AnimationClock,
    pub drag: DragState,
}

#[derive(Debug, Default)]
pub struct RowArena {
    slots: HashMap<MessageId, RowSlot>,
    config: RowConfig,
}

impl RowArena {
    pub fn new(config: RowConfig) -> Self {
        Self {
            slots: HashMap::new(),
            config,
        }
    }

    pub fn config(&self) -> &RowConfig {
        &self.config
    }

    /// Slot for `id`, creating it if this is the row's first appearance.
    ///
    /// New rows get a reveal animation starting at `now` when `animate` is
    /// set and a settled clock otherwise, so rows present at first load do
    /// not animate retroactively.
    pub fn ensure(&mut self, id: &MessageId, animate: bool, now: Instant) -> &mut RowSlot {
        let config = self.config;
        self.slots.entry(id.clone()).or_insert_with(|| {
            let reveal = if animate {
                AnimationClock::from_millis(now, config.reveal_ms, config.reveal_easing)
            } else {
                AnimationClock::settled(now)
            };
            RowSlot {
                id: id.clone(),
                reveal,
                drag: DragState::new(config.drag),
            }
        })
    }

    pub fn get(&self, id: &MessageId) -> Option<&RowSlot> {
        self.slots.get(id)
    }

    pub fn get_mut(&mut self, id: &MessageId) -> Option<&mut RowSlot> {
        self.slots.get_mut(id)
    }

    pub fn contains(&self, id: &MessageId) -> bool {
        self.slots.contains_key(id)
    }

    /// Drop slots whose rows are no longer in the dataset. Returns how many
    /// were removed.
    pub fn retain_ids(&mut self, ids: &HashSet<MessageId>) -> usize {
        let before = self.slots.len();
        self.slots.retain(|id, slot| {
            let keep = ids.contains(id);
            if !keep && slot.drag.phase() == DragPhase::Dragging {
                debug!("Dropping row {} mid-drag", id.short());
            }
            keep
        });
        before - self.slots.len()
    }

    /// Force every in-flight drag into release without triggering.
    pub fn cancel_drags(&mut self, now: Instant) {
        for slot in self.slots.values_mut() {
            slot.drag.cancel(now);
        }
    }

    /// The row currently holding the pointer, if any.
    pub fn dragging_mut(&mut self) -> Option<&mut RowSlot> {
        self.slots
            .values_mut()
            .find(|slot| slot.drag.phase() == DragPhase::Dragging)
    }

    /// Whether any row still needs frames to finish an animation.
    pub fn is_animating(&self, now: Instant) -> bool {
        self.slots.values().any(|slot| {
            (!slot.reveal.is_complete() && slot.reveal.peek(now) < 1.0)
                || slot.drag.phase() != DragPhase::Idle
        })
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }
}
