// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Commands that change a heater setting.

use serde_json::Value;

use crate::command::Command;
use crate::types::{Brightness, PoweroffTime, PowerState, Switch};

/// Turns the heater on or off.
///
/// # Examples
///
/// ```
/// use miheater_lib::command::{Command, SetPowerCommand};
/// use miheater_lib::types::PowerState;
///
/// let cmd = SetPowerCommand(PowerState::On);
/// assert_eq!(cmd.name(), "set_power");
/// assert_eq!(cmd.params(), vec![serde_json::json!("on")]);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SetPowerCommand(pub PowerState);

impl Command for SetPowerCommand {
    fn name(&self) -> &'static str {
        "set_power"
    }

    fn params(&self) -> Vec<Value> {
        vec![Value::from(self.0.as_str())]
    }
}

/// Sets the target temperature in whole degrees.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SetTargetTemperatureCommand(pub i64);

impl Command for SetTargetTemperatureCommand {
    fn name(&self) -> &'static str {
        "set_target_temperature"
    }

    fn params(&self) -> Vec<Value> {
        vec![Value::from(self.0)]
    }
}

/// Enables or disables the buzzer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SetBuzzerCommand(pub Switch);

impl Command for SetBuzzerCommand {
    fn name(&self) -> &'static str {
        "set_buzzer"
    }

    fn params(&self) -> Vec<Value> {
        vec![Value::from(self.0.as_str())]
    }
}

/// Sets the panel brightness.
///
/// # Examples
///
/// ```
/// use miheater_lib::command::{Command, SetBrightnessCommand};
/// use miheater_lib::types::Brightness;
///
/// let cmd = SetBrightnessCommand(Brightness::DIM);
/// assert_eq!(cmd.name(), "set_brightness");
/// assert_eq!(cmd.params(), vec![serde_json::json!(1)]);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SetBrightnessCommand(pub Brightness);

impl Command for SetBrightnessCommand {
    fn name(&self) -> &'static str {
        "set_brightness"
    }

    fn params(&self) -> Vec<Value> {
        vec![Value::from(self.0.value())]
    }
}

/// Schedules the automatic power-off.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SetPoweroffTimeCommand(pub PoweroffTime);

impl Command for SetPoweroffTimeCommand {
    fn name(&self) -> &'static str {
        "set_poweroff_time"
    }

    fn params(&self) -> Vec<Value> {
        vec![Value::from(self.0.seconds())]
    }
}

/// Enables or disables the child lock.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SetChildLockCommand(pub Switch);

impl Command for SetChildLockCommand {
    fn name(&self) -> &'static str {
        "set_child_lock"
    }

    fn params(&self) -> Vec<Value> {
        vec![Value::from(self.0.as_str())]
    }
}
