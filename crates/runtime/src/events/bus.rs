//! Topic-based event bus implementation.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;

use super::types::{CombatEvent, SkillProgressed, StatusEvent, TurnEvent};

/// Topics for event routing
#[derive(Debug, Clone, Copy, Hash, Eq, PartialEq, Serialize, Deserialize)]
pub enum Topic {
    /// Damage, healing, deaths and check outcomes
    Combat,
    /// Status effect application, ticking and expiry
    Status,
    /// Experience, level-ups and perk milestones
    Progression,
    /// Turn management events
    Turn,
}

impl Topic {
    pub const ALL: [Topic; 4] = [Topic::Combat, Topic::Status, Topic::Progression, Topic::Turn];
}

/// Event wrapper that carries the topic and typed event
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Event {
    Combat(CombatEvent),
    Status(StatusEvent),
    Progression(SkillProgressed),
    Turn(TurnEvent),
}

impl Event {
    pub fn topic(&self) -> Topic {
        match self {
            Event::Combat(_) => Topic::Combat,
            Event::Status(_) => Topic::Status,
            Event::Progression(_) => Topic::Progression,
            Event::Turn(_) => Topic::Turn,
        }
    }
}

impl From<CombatEvent> for Event {
    fn from(event: CombatEvent) -> Self {
        Event::Combat(event)
    }
}

impl From<StatusEvent> for Event {
    fn from(event: StatusEvent) -> Self {
        Event::Status(event)
    }
}

impl From<SkillProgressed> for Event {
    fn from(event: SkillProgressed) -> Self {
        Event::Progression(event)
    }
}

impl From<TurnEvent> for Event {
    fn from(event: TurnEvent) -> Self {
        Event::Turn(event)
    }
}

struct Channels {
    combat: broadcast::Sender<Event>,
    status: broadcast::Sender<Event>,
    progression: broadcast::Sender<Event>,
    turn: broadcast::Sender<Event>,
}

impl Channels {
    fn get(&self, topic: Topic) -> &broadcast::Sender<Event> {
        match topic {
            Topic::Combat => &self.combat,
            Topic::Status => &self.status,
            Topic::Progression => &self.progression,
            Topic::Turn => &self.turn,
        }
    }
}

/// Topic-based event bus
///
/// Allows consumers to subscribe to specific topics and only receive
/// events they care about. Sending never blocks, so the bus works with or
/// without an async executor.
#[derive(Clone)]
pub struct EventBus {
    channels: Arc<Channels>,
}

impl EventBus {
    /// Creates a new event bus with default capacity for each topic
    pub fn new() -> Self {
        Self::with_capacity(256)
    }

    /// Creates a new event bus with specified capacity per topic
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            channels: Arc::new(Channels {
                combat: broadcast::channel(capacity).0,
                status: broadcast::channel(capacity).0,
                progression: broadcast::channel(capacity).0,
                turn: broadcast::channel(capacity).0,
            }),
        }
    }

    /// Publish an event to its corresponding topic
    pub fn publish(&self, event: impl Into<Event>) {
        let event = event.into();
        let topic = event.topic();
        if self.channels.get(topic).send(event).is_err() {
            // No subscribers for this topic - this is normal, not an error
            tracing::trace!("No subscribers for topic {:?}", topic);
        }
    }

    /// Subscribe to a specific topic
    ///
    /// Returns a receiver that will only receive events for that topic.
    pub fn subscribe(&self, topic: Topic) -> broadcast::Receiver<Event> {
        self.channels.get(topic).subscribe()
    }

    /// Subscribe to multiple topics
    pub fn subscribe_multiple(&self, topics: &[Topic]) -> Vec<(Topic, broadcast::Receiver<Event>)> {
        topics
            .iter()
            .map(|&topic| (topic, self.subscribe(topic)))
            .collect()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use combat_core::{EntityId, Tick};

    use super::*;

    #[test]
    fn subscribers_only_see_their_topic() {
        let bus = EventBus::new();
        let mut turns = bus.subscribe(Topic::Turn);
        let mut combat = bus.subscribe(Topic::Combat);

        bus.publish(TurnEvent::Started {
            entity: EntityId(1),
            clock: Tick(3),
        });

        assert_eq!(
            turns.try_recv().unwrap(),
            Event::Turn(TurnEvent::Started {
                entity: EntityId(1),
                clock: Tick(3)
            })
        );
        assert!(combat.try_recv().is_err());
    }

    #[test]
    fn publishing_without_subscribers_is_silent() {
        let bus = EventBus::with_capacity(4);
        bus.publish(CombatEvent::Died {
            entity: EntityId(2),
            clock: Tick::ZERO,
        });
    }

    #[test]
    fn clones_share_channels() {
        let bus = EventBus::new();
        let mut rx = bus.clone().subscribe(Topic::Combat);
        bus.publish(CombatEvent::Died {
            entity: EntityId(2),
            clock: Tick(1),
        });
        assert!(rx.try_recv().is_ok());
    }
}
