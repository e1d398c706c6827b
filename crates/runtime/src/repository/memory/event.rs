//! In-memory event timeline.

use crate::events::{Event, Topic};
use crate::repository::{EventRepository, Result};

/// Event timeline kept in a `Vec`, for tests and replays that never touch disk.
///
/// Sequence numbers are indices into the timeline.
#[derive(Debug, Default)]
pub struct InMemoryEventLog {
    timeline: Vec<Event>,
}

impl InMemoryEventLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Event at sequence number `seq`, if it was appended.
    pub fn get(&self, seq: u64) -> Option<&Event> {
        usize::try_from(seq).ok().and_then(|index| self.timeline.get(index))
    }

    /// Events published on one topic, in append order.
    pub fn on_topic(&self, topic: Topic) -> impl Iterator<Item = &Event> {
        self.timeline.iter().filter(move |event| event.topic() == topic)
    }
}

impl EventRepository for InMemoryEventLog {
    fn append(&mut self, event: &Event) -> Result<u64> {
        self.timeline.push(event.clone());
        Ok(self.timeline.len() as u64 - 1)
    }

    fn read_all(&self) -> Result<Vec<Event>> {
        Ok(self.timeline.clone())
    }

    fn flush(&mut self) -> Result<()> {
        Ok(())
    }

    fn len(&self) -> Result<u64> {
        Ok(self.timeline.len() as u64)
    }
}
