// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Operation mode of the heater.

use std::fmt;
use std::str::FromStr;

use crate::error::ValueError;

/// Operation mode exposed to the host.
///
/// The heater has no independent mode setting: the mode is derived from the
/// raw `power` property, and setting it toggles power.
///
/// # Examples
///
/// ```
/// use miheater_lib::types::HvacMode;
///
/// assert_eq!(HvacMode::from_power("off"), HvacMode::Off);
/// assert_eq!(HvacMode::from_power("on"), HvacMode::Heat);
/// assert_eq!("heat".parse::<HvacMode>().unwrap(), HvacMode::Heat);
/// assert!("cool".parse::<HvacMode>().is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HvacMode {
    /// The heater is powered and heating.
    Heat,
    /// The heater is powered off.
    Off,
}

impl HvacMode {
    /// Every mode the heater supports, in display order.
    pub const ALL: [Self; 2] = [Self::Heat, Self::Off];

    /// Derives the mode from a raw `power` reading.
    ///
    /// Only the exact string `"off"` maps to [`HvacMode::Off`]; any other
    /// reading means the heater is running.
    #[must_use]
    pub fn from_power(raw: &str) -> Self {
        if raw == "off" { Self::Off } else { Self::Heat }
    }

    /// Returns the host-facing name of the mode.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Heat => "heat",
            Self::Off => "off",
        }
    }
}

impl fmt::Display for HvacMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for HvacMode {
    type Err = ValueError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "heat" => Ok(Self::Heat),
            "off" => Ok(Self::Off),
            _ => Err(ValueError::InvalidHvacMode(s.to_string())),
        }
    }
}
