use std::collections::{BTreeMap, BTreeSet};

use crate::state::{EntityId, Tick};

use super::errors::SchedulerError;

/// Which side of an encounter a combatant fights on.
///
/// Declaration order is the tie-break: the initiating side acts first.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, strum::Display)]
#[strum(serialize_all = "snake_case")]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Side {
    Initiator,
    Responder,
}

/// A pending turn. Field order is the scheduling order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ScheduledTurn {
    pub ready_at: Tick,
    pub side: Side,
    pub entity: EntityId,
}

/// Orders combatants by action-ready tick over a logical clock.
///
/// # Ordering
///
/// Turns are ordered by `(ready_at, side, entity)`: earliest tick first, then
/// [`Side::Initiator`] before [`Side::Responder`], then the lower
/// [`EntityId`]. Insertion order never matters.
///
/// The roster remembers each entity's side across turns, so a dequeued
/// combatant can be put back with [`reschedule`](Self::reschedule).
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TurnScheduler {
    clock: Tick,
    queue: BTreeSet<ScheduledTurn>,
    pending: BTreeMap<EntityId, ScheduledTurn>,
    roster: BTreeMap<EntityId, Side>,
}

impl TurnScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the current logical clock value.
    pub fn clock(&self) -> Tick {
        self.clock
    }

    /// Moves the clock to `tick`; it never moves backwards.
    pub fn set_clock(&mut self, tick: Tick) -> Result<(), SchedulerError> {
        if tick < self.clock {
            return Err(SchedulerError::ClockRewind {
                current: self.clock,
                requested: tick,
            });
        }
        self.clock = tick;
        Ok(())
    }

    /// Schedules `entity`, replacing any pending turn it already had.
    pub fn insert(&mut self, entity: EntityId, side: Side, ready_at: Tick) -> Option<ScheduledTurn> {
        let previous = self.unqueue(entity);
        self.roster.insert(entity, side);
        let turn = ScheduledTurn {
            ready_at,
            side,
            entity,
        };
        self.queue.insert(turn);
        self.pending.insert(entity, turn);
        previous
    }

    /// Re-queues a rostered entity on its remembered side.
    pub fn reschedule(&mut self, entity: EntityId, ready_at: Tick) -> Result<ScheduledTurn, SchedulerError> {
        let side = *self
            .roster
            .get(&entity)
            .ok_or(SchedulerError::UnknownEntity(entity))?;
        self.insert(entity, side, ready_at);
        Ok(ScheduledTurn {
            ready_at,
            side,
            entity,
        })
    }

    /// The next turn in order, ready or not.
    pub fn peek(&self) -> Option<ScheduledTurn> {
        self.queue.first().copied()
    }

    /// Removes and returns the next turn only if it is due at the current clock.
    pub fn dequeue(&mut self) -> Option<ScheduledTurn> {
        let next = self.peek()?;
        if next.ready_at > self.clock {
            return None;
        }
        self.unqueue(next.entity)
    }

    /// Evicts `entity` from the queue and the roster without touching others.
    pub fn remove(&mut self, entity: EntityId) -> Option<ScheduledTurn> {
        self.roster.remove(&entity);
        self.unqueue(entity)
    }

    /// Advances the clock to the earliest pending turn.
    ///
    /// The clock stays put when that turn is already due. Returns the new
    /// clock, or `None` when nothing is queued.
    pub fn advance_to_next(&mut self) -> Option<Tick> {
        let next = self.peek()?;
        self.clock = self.clock.max(next.ready_at);
        Some(self.clock)
    }

    pub fn contains(&self, entity: EntityId) -> bool {
        self.pending.contains_key(&entity)
    }

    pub fn side_of(&self, entity: EntityId) -> Option<Side> {
        self.roster.get(&entity).copied()
    }

    /// Pending turns in scheduling order.
    pub fn iter(&self) -> impl Iterator<Item = &ScheduledTurn> {
        self.queue.iter()
    }

    pub fn len(&self) -> usize {
        self.queue.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    fn unqueue(&mut self, entity: EntityId) -> Option<ScheduledTurn> {
        let turn = self.pending.remove(&entity)?;
        self.queue.remove(&turn);
        Some(turn)
    }
}
