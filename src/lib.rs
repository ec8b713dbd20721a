// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! `miheater` Lib - Xiaomi wifi heaters as home-automation thermostat entities.
//!
//! This library adapts a heater of the `zhimi.heater` family, reached through
//! a miIO device proxy, into a thermostat-like entity: it polls the device
//! properties into a flat attribute map, forwards setter calls as single
//! commands and exposes a few extra services.
//!
//! # Supported Features
//!
//! - **Thermostat**: heat/off mode, target temperature (16-32 °C)
//! - **Readings**: current temperature, relative humidity
//! - **Extended settings**: buzzer, panel brightness, child lock, power-off timer
//! - **Platform**: configuration, setup, registry and service dispatch
//!
//! The miIO transport itself is not part of this crate. Plug one in by
//! implementing [`MiioDevice`].
//!
//! # Quick Start
//!
//! ```no_run
//! use miheater_lib::{DeviceError, DeviceInfo, MiioDevice};
//! use miheater_lib::platform::{HeaterRegistry, PlatformConfig, setup_platform};
//! use serde_json::Value;
//!
//! struct Transport;
//!
//! impl MiioDevice for Transport {
//!     async fn info(&self) -> Result<DeviceInfo, DeviceError> {
//!         Ok(DeviceInfo::new("zhimi.heater.za1", "28:6C:07:AA:BB:CC"))
//!     }
//!
//!     async fn send(&self, method: &str, params: &[Value]) -> Result<Vec<Value>, DeviceError> {
//!         // Hand the call to the real miIO client here.
//!         Err(DeviceError::Unreachable(method.to_string()))
//!     }
//! }
//!
//! #[tokio::main]
//! async fn main() -> miheater_lib::Result<()> {
//!     let registry = HeaterRegistry::new();
//!     let config = PlatformConfig::new(
//!         "192.168.1.40",
//!         "Bedroom",
//!         "0123456789abcdef0123456789abcdef",
//!     );
//!
//!     let heater = setup_platform(&config, |_| Ok(Transport), &registry).await?;
//!
//!     heater.poll().await?;
//!     println!("{:?}", heater.attributes());
//!
//!     heater.set_hvac_mode("heat").await?;
//!     heater.set_temperature(Some(22.0)).await?;
//!     Ok(())
//! }
//! ```

mod capabilities;
pub mod command;
pub mod error;
pub mod event;
pub mod heater;
pub mod platform;
pub mod protocol;
pub mod state;
pub mod types;

pub use capabilities::Capabilities;
pub use command::{Command, Property};
pub use error::{ConfigError, DeviceError, Error, ParseError, Result, ValueError};
pub use event::{EntityId, EventBus, HeaterEvent};
pub use heater::Heater;
pub use protocol::{DeviceInfo, MiioDevice};
pub use state::{Attributes, HeaterState};
pub use types::{Brightness, HvacMode, PowerState, PoweroffTime, Switch};
