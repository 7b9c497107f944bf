use std::time::Duration;

use super::entity::EntityId;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DeferredAction {
    EndDash { restore_speed: f32 },
    DashReady,
    SkillReady,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScheduledEvent {
    pub due: Duration,
    pub target: EntityId,
    pub action: DeferredAction,
    sequence: u64,
}

/// Delayed state transitions keyed to simulation time. Events address their
/// target by handle; resolving the handle is the caller's job and a stale
/// handle means the event is dropped.
#[derive(Debug, Default)]
pub struct EventQueue {
    pending: Vec<ScheduledEvent>,
    next_sequence: u64,
}

impl EventQueue {
    pub fn schedule(&mut self, due: Duration, target: EntityId, action: DeferredAction) {
        self.pending.push(ScheduledEvent {
            due,
            target,
            action,
            sequence: self.next_sequence,
        });
        self.next_sequence = self.next_sequence.saturating_add(1);
    }

    /// Removes and returns every event due at or before `now`, earliest
    /// first, ties in scheduling order.
    pub fn drain_due(&mut self, now: Duration) -> Vec<ScheduledEvent> {
        if self.pending.iter().all(|event| event.due > now) {
            return Vec::new();
        }
        let (mut due, later): (Vec<_>, Vec<_>) =
            self.pending.drain(..).partition(|event| event.due <= now);
        self.pending = later;
        due.sort_by_key(|event| (event.due, event.sequence));
        due
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}
