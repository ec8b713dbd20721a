// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Device properties read with `get_prop`.

use std::fmt;

use serde_json::Value;

use crate::command::Command;

/// A property the adapter tracks on the heater.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Property {
    /// Raw power reading (`"on"`, `"off"`, ...).
    Power,
    /// Relative humidity in percent.
    Humidity,
    /// Target temperature in °C.
    TargetTemperature,
    /// Measured room temperature in °C.
    Temperature,
    /// Remaining power-off delay in seconds.
    PoweroffTime,
    /// Buzzer on/off.
    Buzzer,
    /// Panel brightness (0-2).
    Brightness,
    /// Child lock on/off.
    ChildLock,
}

impl Property {
    /// Properties every heater variant reports, in poll order.
    pub const BASIC: [Self; 4] = [
        Self::Power,
        Self::Humidity,
        Self::TargetTemperature,
        Self::Temperature,
    ];

    /// Properties of the extended variant, in poll order.
    pub const EXTENDED: [Self; 8] = [
        Self::Power,
        Self::Humidity,
        Self::TargetTemperature,
        Self::Temperature,
        Self::PoweroffTime,
        Self::Buzzer,
        Self::Brightness,
        Self::ChildLock,
    ];

    /// Returns the property name understood by the device.
    #[must_use]
    pub const fn wire_name(&self) -> &'static str {
        match self {
            Self::Power => "power",
            Self::Humidity => "relative_humidity",
            Self::TargetTemperature => "target_temperature",
            Self::Temperature => "temperature",
            Self::PoweroffTime => "poweroff_time",
            Self::Buzzer => "buzzer",
            Self::Brightness => "brightness",
            Self::ChildLock => "child_lock",
        }
    }
}

impl fmt::Display for Property {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.wire_name())
    }
}

/// Reads a single property.
///
/// # Examples
///
/// ```
/// use miheater_lib::command::{Command, GetPropCommand, Property};
///
/// let cmd = GetPropCommand(Property::Humidity);
/// assert_eq!(cmd.name(), "get_prop");
/// assert_eq!(cmd.params(), vec![serde_json::json!("relative_humidity")]);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GetPropCommand(pub Property);

impl Command for GetPropCommand {
    fn name(&self) -> &'static str {
        "get_prop"
    }

    fn params(&self) -> Vec<Value> {
        vec![Value::from(self.0.wire_name())]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extended_starts_with_basic() {
        assert_eq!(&Property::EXTENDED[..4], &Property::BASIC[..]);
    }

    #[test]
    fn humidity_uses_relative_humidity() {
        assert_eq!(Property::Humidity.wire_name(), "relative_humidity");
    }

    #[test]
    fn get_prop_params() {
        let cmd = GetPropCommand(Property::ChildLock);
        assert_eq!(cmd.params(), vec![Value::from("child_lock")]);
    }
}
