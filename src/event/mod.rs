// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Event system for heater state changes.
//!
//! Heaters publish on a shared [`EventBus`] whenever a poll changes their
//! state or fails; the registry publishes lifecycle events. The bus is a
//! tokio broadcast channel, so any number of host components can subscribe.
//!
//! # Examples
//!
//! ```
//! use miheater_lib::event::{EntityId, EventBus, HeaterEvent};
//!
//! let bus = EventBus::new();
//! let mut rx = bus.subscribe();
//!
//! let id = EntityId::from_unique_id("zhimi.heater.za1-00:11:22:33:44:55");
//! bus.publish(HeaterEvent::heater_added(id));
//! ```

mod entity_id;
mod event_bus;
mod heater_event;

pub use entity_id::EntityId;
pub use event_bus::EventBus;
pub use heater_event::HeaterEvent;
