// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Broadcast channel carrying heater events.

use tokio::sync::broadcast;

use super::HeaterEvent;

const DEFAULT_CHANNEL_CAPACITY: usize = 64;

/// Fan-out of [`HeaterEvent`]s to every subscriber.
///
/// Cloning the bus yields another handle to the same channel; the registry
/// hands a clone to each heater it creates. A subscriber that falls more than
/// `capacity` events behind gets `RecvError::Lagged` and skips ahead.
///
/// # Examples
///
/// ```
/// use miheater_lib::event::{EntityId, EventBus, HeaterEvent};
///
/// let bus = EventBus::new();
/// let mut rx = bus.subscribe();
///
/// let id = EntityId::parse("climate.bedroom").unwrap();
/// bus.publish(HeaterEvent::heater_added(id));
/// assert_eq!(bus.subscriber_count(), 1);
/// ```
#[derive(Debug, Clone)]
pub struct EventBus {
    sender: broadcast::Sender<HeaterEvent>,
}

impl EventBus {
    /// Creates a bus buffering up to 64 events per subscriber.
    #[must_use]
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CHANNEL_CAPACITY)
    }

    /// Creates a bus with a custom per-subscriber buffer.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self { sender }
    }

    /// Returns a receiver for events published from now on.
    #[must_use]
    pub fn subscribe(&self) -> broadcast::Receiver<HeaterEvent> {
        self.sender.subscribe()
    }

    /// Number of live receivers.
    #[must_use]
    pub fn subscriber_count(&self) -> usize {
        self.sender.receiver_count()
    }

    /// Sends an event; dropped silently when nobody listens.
    pub fn publish(&self, event: HeaterEvent) {
        let _ = self.sender.send(event);
    }

    /// Sends an event and returns how many receivers got it.
    #[must_use]
    pub fn publish_counted(&self, event: HeaterEvent) -> usize {
        self.sender.send(event).unwrap_or(0)
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::EntityId;

    fn id() -> EntityId {
        EntityId::parse("climate.heater").unwrap()
    }

    #[test]
    fn subscribe_increments_count() {
        let bus = EventBus::new();
        assert_eq!(bus.subscriber_count(), 0);

        let _rx1 = bus.subscribe();
        let rx2 = bus.subscribe();
        assert_eq!(bus.subscriber_count(), 2);

        drop(rx2);
        assert_eq!(bus.subscriber_count(), 1);
    }

    #[tokio::test]
    async fn publish_delivers_to_every_subscriber() {
        let bus = EventBus::new();
        let mut rx1 = bus.subscribe();
        let mut rx2 = bus.subscribe();

        bus.publish(HeaterEvent::heater_added(id()));

        assert_eq!(rx1.recv().await.unwrap().entity_id(), &id());
        assert_eq!(rx2.recv().await.unwrap().entity_id(), &id());
    }

    #[test]
    fn publish_without_subscribers_is_silent() {
        let bus = EventBus::new();
        assert_eq!(bus.publish_counted(HeaterEvent::heater_added(id())), 0);
    }

    #[test]
    fn clone_shares_same_channel() {
        let bus1 = EventBus::with_capacity(8);
        let bus2 = bus1.clone();

        let _rx = bus1.subscribe();
        assert_eq!(bus2.subscriber_count(), 1);
    }
}
