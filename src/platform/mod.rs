// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Platform integration: setup, the heater registry and extra services.
//!
//! The host calls [`setup_platform`] once per configured heater. Each heater
//! lands in a [`HeaterRegistry`], an explicit store owned by the host and
//! keyed by host address. The registry fans out [`ServiceCall`]s to heaters
//! by entity id.
//!
//! # Examples
//!
//! ```ignore
//! use miheater_lib::platform::{HeaterRegistry, PlatformConfig, Service, ServiceCall, setup_platform};
//! use serde_json::json;
//!
//! let registry = HeaterRegistry::new();
//! let config = PlatformConfig::from_json(&raw_config)?;
//! setup_platform(&config, |c| MyTransport::connect(&c.host, &c.token), &registry).await?;
//!
//! // Poll on the host's schedule
//! for (entity_id, result) in registry.poll_all().await {
//!     if let Err(e) = result {
//!         eprintln!("{entity_id}: {e}");
//!     }
//! }
//!
//! // Dispatch a service call to every heater
//! let call = ServiceCall::new(Service::SetBrightness, json!({"brightness": 1}));
//! registry.dispatch(&call).await?;
//! ```

mod config;
mod registry;
mod service;
mod setup;

pub use config::PlatformConfig;
pub use registry::HeaterRegistry;
pub use service::{Service, ServiceCall, ServiceData};
pub use setup::setup_platform;
