// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Heater event types.

use crate::state::HeaterState;

use super::EntityId;

/// Events published by heaters and the registry.
///
/// # Examples
///
/// ```
/// use miheater_lib::event::{EntityId, HeaterEvent};
///
/// let id = EntityId::parse("climate.bedroom").unwrap();
/// let event = HeaterEvent::poll_failed(id.clone(), "timed out");
/// assert_eq!(event.entity_id(), &id);
/// ```
#[derive(Debug, Clone)]
pub enum HeaterEvent {
    /// A heater was registered.
    HeaterAdded {
        /// The new entity.
        entity_id: EntityId,
    },

    /// A heater was removed from the registry.
    HeaterRemoved {
        /// The removed entity.
        entity_id: EntityId,
    },

    /// A poll produced readings that differ from the previous state.
    StateChanged {
        /// The polled entity.
        entity_id: EntityId,
        /// The complete new state.
        new_state: HeaterState,
    },

    /// A poll was aborted. The entity keeps its previous state.
    PollFailed {
        /// The polled entity.
        entity_id: EntityId,
        /// Description of the failure.
        error: String,
    },
}

impl HeaterEvent {
    /// Returns the entity this event is about.
    #[must_use]
    pub fn entity_id(&self) -> &EntityId {
        match self {
            Self::HeaterAdded { entity_id }
            | Self::HeaterRemoved { entity_id }
            | Self::StateChanged { entity_id, .. }
            | Self::PollFailed { entity_id, .. } => entity_id,
        }
    }

    /// Returns `true` for added/removed events.
    #[must_use]
    pub fn is_lifecycle(&self) -> bool {
        matches!(self, Self::HeaterAdded { .. } | Self::HeaterRemoved { .. })
    }

    /// Creates a heater added event.
    #[must_use]
    pub fn heater_added(entity_id: EntityId) -> Self {
        Self::HeaterAdded { entity_id }
    }

    /// Creates a heater removed event.
    #[must_use]
    pub fn heater_removed(entity_id: EntityId) -> Self {
        Self::HeaterRemoved { entity_id }
    }

    /// Creates a state changed event.
    #[must_use]
    pub fn state_changed(entity_id: EntityId, new_state: HeaterState) -> Self {
        Self::StateChanged {
            entity_id,
            new_state,
        }
    }

    /// Creates a poll failure event.
    #[must_use]
    pub fn poll_failed(entity_id: EntityId, error: impl Into<String>) -> Self {
        Self::PollFailed {
            entity_id,
            error: error.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn id() -> EntityId {
        EntityId::parse("climate.heater").unwrap()
    }

    #[test]
    fn lifecycle_events() {
        assert!(HeaterEvent::heater_added(id()).is_lifecycle());
        assert!(HeaterEvent::heater_removed(id()).is_lifecycle());
        assert!(!HeaterEvent::poll_failed(id(), "x").is_lifecycle());
        assert!(!HeaterEvent::state_changed(id(), HeaterState::new()).is_lifecycle());
    }

    #[test]
    fn poll_failed_carries_message() {
        if let HeaterEvent::PollFailed { error, .. } = HeaterEvent::poll_failed(id(), "timed out") {
            assert_eq!(error, "timed out");
        } else {
            panic!("Expected PollFailed event");
        }
    }
}
