// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! miIO command definitions for the heater.
//!
//! Every operation the adapter performs is a single command: a method name
//! plus a positional parameter list.
//!
//! | Command Type | Method | Params |
//! |-------------|---------|---------|
//! | [`GetPropCommand`] | `get_prop` | `[property]` |
//! | [`SetPowerCommand`] | `set_power` | `["on"]` / `["off"]` |
//! | [`SetTargetTemperatureCommand`] | `set_target_temperature` | `[degrees]` |
//! | [`SetBuzzerCommand`] | `set_buzzer` | `["on"]` / `["off"]` |
//! | [`SetBrightnessCommand`] | `set_brightness` | `[0-2]` |
//! | [`SetPoweroffTimeCommand`] | `set_poweroff_time` | `[seconds]` |
//! | [`SetChildLockCommand`] | `set_child_lock` | `["on"]` / `["off"]` |

mod property;
mod setters;

pub use property::{GetPropCommand, Property};
pub use setters::{
    SetBrightnessCommand, SetBuzzerCommand, SetChildLockCommand, SetPowerCommand,
    SetPoweroffTimeCommand, SetTargetTemperatureCommand,
};

use serde_json::Value;

/// A command that can be sent to the heater.
pub trait Command {
    /// Returns the miIO method name.
    fn name(&self) -> &'static str;

    /// Returns the positional parameters.
    fn params(&self) -> Vec<Value>;
}
