// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Heater state types.
//!
//! A poll produces one [`Reading`] per tracked property. Only when every
//! property was read does the heater build a fresh [`HeaterState`] from them
//! and replace its previous state wholesale.
//!
//! # Examples
//!
//! ```
//! use miheater_lib::state::{HeaterState, Reading};
//!
//! let readings = [
//!     Reading::Power("on".to_string()),
//!     Reading::TargetTemperature(22.into()),
//! ];
//! let state = HeaterState::from_readings(&readings, chrono::Utc::now());
//!
//! assert_eq!(state.attributes()["hvac_mode"], "heat");
//! ```

mod heater_state;
mod reading;

pub use heater_state::{Attributes, HeaterState};
pub use reading::Reading;
