// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Registry of set-up heaters.

use std::collections::{BTreeSet, HashMap};
use std::sync::Arc;

use tokio::sync::{RwLock, broadcast};

use crate::error::Error;
use crate::event::{EntityId, EventBus, HeaterEvent};
use crate::heater::Heater;
use crate::protocol::MiioDevice;
use crate::state::HeaterState;

/// Heaters keyed by their configured host address.
///
/// The registry owns the event bus its heaters publish on, and is what the
/// service dispatcher resolves entity ids against. It lives as long as the
/// platform; [`shutdown`](Self::shutdown) empties it.
///
/// # Examples
///
/// ```
/// use miheater_lib::platform::HeaterRegistry;
/// # use miheater_lib::{DeviceError, DeviceInfo, MiioDevice};
/// # struct Proxy;
/// # impl MiioDevice for Proxy {
/// #     async fn info(&self) -> Result<DeviceInfo, DeviceError> { unimplemented!() }
/// #     async fn send(&self, _: &str, _: &[serde_json::Value]) -> Result<Vec<serde_json::Value>, DeviceError> { unimplemented!() }
/// # }
///
/// let registry: HeaterRegistry<Proxy> = HeaterRegistry::new();
/// let mut events = registry.subscribe();
/// ```
#[derive(Debug)]
pub struct HeaterRegistry<D: MiioDevice> {
    heaters: RwLock<HashMap<String, Arc<Heater<D>>>>,
    event_bus: EventBus,
}

impl<D: MiioDevice> HeaterRegistry<D> {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::with_event_bus(EventBus::new())
    }

    /// Creates an empty registry publishing on `event_bus`.
    #[must_use]
    pub fn with_event_bus(event_bus: EventBus) -> Self {
        Self {
            heaters: RwLock::new(HashMap::new()),
            event_bus,
        }
    }

    /// The bus heaters in this registry publish on.
    #[must_use]
    pub fn event_bus(&self) -> &EventBus {
        &self.event_bus
    }

    /// Subscribes to heater events.
    #[must_use]
    pub fn subscribe(&self) -> broadcast::Receiver<HeaterEvent> {
        self.event_bus.subscribe()
    }

    /// Registers a heater under `host`.
    ///
    /// The heater is moved onto the registry's event bus.
    /// A heater already registered for `host` is replaced. If the heater's
    /// entity id is taken by another host, it is suffixed with `_2`, `_3`
    /// and so on. Publishes [`HeaterEvent::HeaterAdded`].
    pub async fn insert(&self, host: impl Into<String>, heater: Heater<D>) -> Arc<Heater<D>> {
        let host = host.into();
        let mut heaters = self.heaters.write().await;

        if let Some(previous) = heaters.remove(&host) {
            tracing::warn!(host = %host, entity_id = %previous.entity_id(), "Replacing heater");
            self.event_bus
                .publish(HeaterEvent::heater_removed(previous.entity_id().clone()));
        }

        let taken: BTreeSet<&EntityId> = heaters.values().map(|h| h.entity_id()).collect();
        let base = heater.entity_id().clone();
        let entity_id = if taken.contains(&base) {
            (2..)
                .map(|n| base.with_suffix(n))
                .find(|candidate| !taken.contains(candidate))
                .unwrap_or(base)
        } else {
            base
        };

        let heater = Arc::new(
            heater
                .with_entity_id(entity_id.clone())
                .with_event_bus(self.event_bus.clone()),
        );
        heaters.insert(host, Arc::clone(&heater));
        drop(heaters);

        self.event_bus.publish(HeaterEvent::heater_added(entity_id));
        heater
    }

    /// Removes the heater registered under `host`.
    ///
    /// Returns the removed heater, or `None` if `host` is unknown.
    pub async fn remove(&self, host: &str) -> Option<Arc<Heater<D>>> {
        let removed = self.heaters.write().await.remove(host);
        if let Some(heater) = &removed {
            self.event_bus
                .publish(HeaterEvent::heater_removed(heater.entity_id().clone()));
        }
        removed
    }

    /// Looks up a heater by host address.
    pub async fn get(&self, host: &str) -> Option<Arc<Heater<D>>> {
        self.heaters.read().await.get(host).cloned()
    }

    /// Looks up a heater by entity id.
    ///
    /// # Errors
    ///
    /// Returns `Error::EntityNotFound` if no heater has that id.
    pub async fn get_entity(&self, entity_id: &EntityId) -> Result<Arc<Heater<D>>, Error> {
        self.heaters
            .read()
            .await
            .values()
            .find(|h| h.entity_id() == entity_id)
            .cloned()
            .ok_or_else(|| Error::EntityNotFound(entity_id.to_string()))
    }

    /// Every registered heater, sorted by entity id.
    pub async fn heaters(&self) -> Vec<Arc<Heater<D>>> {
        let mut heaters: Vec<_> = self.heaters.read().await.values().cloned().collect();
        heaters.sort_by(|a, b| a.entity_id().cmp(b.entity_id()));
        heaters
    }

    /// Entity ids of every registered heater, sorted.
    pub async fn entity_ids(&self) -> Vec<EntityId> {
        let mut ids: Vec<_> = self
            .heaters
            .read()
            .await
            .values()
            .map(|h| h.entity_id().clone())
            .collect();
        ids.sort();
        ids
    }

    /// Number of registered heaters.
    pub async fn len(&self) -> usize {
        self.heaters.read().await.len()
    }

    /// Returns `true` if no heater is registered.
    pub async fn is_empty(&self) -> bool {
        self.heaters.read().await.is_empty()
    }

    /// Polls every heater in turn.
    ///
    /// A failing heater does not stop the others; each result is reported
    /// next to its entity id.
    pub async fn poll_all(&self) -> Vec<(EntityId, Result<HeaterState, Error>)> {
        let mut results = Vec::new();
        for heater in self.heaters().await {
            let result = heater.poll().await;
            results.push((heater.entity_id().clone(), result));
        }
        results
    }

    /// Removes every heater, publishing [`HeaterEvent::HeaterRemoved`] for each.
    pub async fn shutdown(&self) {
        let drained: Vec<_> = self.heaters.write().await.drain().collect();
        for (host, heater) in drained {
            tracing::debug!(host = %host, entity_id = %heater.entity_id(), "Removing heater");
            self.event_bus
                .publish(HeaterEvent::heater_removed(heater.entity_id().clone()));
        }
    }
}

impl<D: MiioDevice> Default for HeaterRegistry<D> {
    fn default() -> Self {
        Self::new()
    }
}
