// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! On/off setting used by the buzzer and the child lock.

use std::fmt;
use std::str::FromStr;

use crate::error::ValueError;

/// An on/off toggle as the heater reports and accepts it.
///
/// # Examples
///
/// ```
/// use miheater_lib::types::Switch;
///
/// assert_eq!("on".parse::<Switch>().unwrap(), Switch::On);
/// assert_eq!(Switch::Off.as_str(), "off");
/// assert!("maybe".parse::<Switch>().is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Switch {
    /// Feature enabled.
    On,
    /// Feature disabled.
    Off,
}

impl Switch {
    /// Returns the wire representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::On => "on",
            Self::Off => "off",
        }
    }

    /// Returns `true` if the feature is enabled.
    #[must_use]
    pub const fn is_on(&self) -> bool {
        matches!(self, Self::On)
    }
}

impl fmt::Display for Switch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Switch {
    type Err = ValueError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "on" => Ok(Self::On),
            "off" => Ok(Self::Off),
            _ => Err(ValueError::InvalidSwitch(s.to_string())),
        }
    }
}

impl From<bool> for Switch {
    fn from(value: bool) -> Self {
        if value { Self::On } else { Self::Off }
    }
}
