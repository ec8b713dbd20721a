// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Value types for heater control.
//!
//! Each type ensures values are within their valid ranges at construction
//! time, so the adapter never forwards an out-of-range value to the device.
//!
//! # Types
//!
//! - [`HvacMode`] - Heat/Off operation mode, derived from power
//! - [`PowerState`] - On/Off payload of `set_power`
//! - [`Switch`] - On/Off setting for the buzzer and child lock
//! - [`Brightness`] - Panel brightness (0-2)
//! - [`PoweroffTime`] - Power-off timer (0-28800 s)

mod brightness;
mod hvac_mode;
mod power;
mod poweroff_time;
mod switch;

pub use brightness::Brightness;
pub use hvac_mode::HvacMode;
pub use power::PowerState;
pub use poweroff_time::PoweroffTime;
pub use switch::Switch;
