// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Power state sent with `set_power`.

use std::fmt;

use super::HvacMode;

/// Power state accepted by the `set_power` command.
///
/// # Examples
///
/// ```
/// use miheater_lib::types::{HvacMode, PowerState};
///
/// assert_eq!(PowerState::from(HvacMode::Heat).as_str(), "on");
/// assert_eq!(PowerState::from(HvacMode::Off).as_str(), "off");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PowerState {
    /// Power is off.
    Off,
    /// Power is on.
    On,
}

impl PowerState {
    /// Returns the wire representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Off => "off",
            Self::On => "on",
        }
    }
}

impl fmt::Display for PowerState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<HvacMode> for PowerState {
    fn from(mode: HvacMode) -> Self {
        match mode {
            HvacMode::Heat => Self::On,
            HvacMode::Off => Self::Off,
        }
    }
}

impl From<bool> for PowerState {
    fn from(value: bool) -> Self {
        if value { Self::On } else { Self::Off }
    }
}
