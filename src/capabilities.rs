// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Heater feature set.
//!
//! Two heater variants exist. The basic one reports power, temperatures and
//! humidity only; the extended one also exposes the power-off timer, buzzer,
//! panel brightness and child lock. Capabilities decide which properties a
//! poll reads and which setters a heater accepts.

use serde::{Deserialize, Serialize};

use crate::command::Property;

/// Capabilities of a heater.
///
/// # Examples
///
/// ```
/// use miheater_lib::Capabilities;
///
/// let caps = Capabilities::default();
/// assert!(caps.supports_buzzer());
/// assert_eq!(caps.properties().len(), 8);
///
/// let basic = Capabilities::basic();
/// assert!(!basic.supports_child_lock());
/// assert_eq!(basic.properties().len(), 4);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[allow(clippy::struct_excessive_bools)]
pub struct Capabilities {
    /// Supports the power-off timer.
    pub poweroff_timer: bool,

    /// Supports switching the buzzer.
    pub buzzer: bool,

    /// Supports panel brightness control.
    pub brightness: bool,

    /// Supports the child lock.
    pub child_lock: bool,
}

impl Default for Capabilities {
    fn default() -> Self {
        Self::extended()
    }
}

impl Capabilities {
    /// Power, temperatures and humidity only.
    #[must_use]
    pub const fn basic() -> Self {
        Self {
            poweroff_timer: false,
            buzzer: false,
            brightness: false,
            child_lock: false,
        }
    }

    /// Every setting the heater family exposes.
    #[must_use]
    pub const fn extended() -> Self {
        Self {
            poweroff_timer: true,
            buzzer: true,
            brightness: true,
            child_lock: true,
        }
    }

    /// Returns `true` if the power-off timer is available.
    #[must_use]
    pub const fn supports_poweroff_timer(&self) -> bool {
        self.poweroff_timer
    }

    /// Returns `true` if the buzzer can be switched.
    #[must_use]
    pub const fn supports_buzzer(&self) -> bool {
        self.buzzer
    }

    /// Returns `true` if panel brightness can be set.
    #[must_use]
    pub const fn supports_brightness(&self) -> bool {
        self.brightness
    }

    /// Returns `true` if the child lock is available.
    #[must_use]
    pub const fn supports_child_lock(&self) -> bool {
        self.child_lock
    }

    /// Properties to read on every poll, in order.
    #[must_use]
    pub fn properties(&self) -> Vec<Property> {
        let optional = [
            (self.poweroff_timer, Property::PoweroffTime),
            (self.buzzer, Property::Buzzer),
            (self.brightness, Property::Brightness),
            (self.child_lock, Property::ChildLock),
        ];

        Property::BASIC
            .into_iter()
            .chain(
                optional
                    .into_iter()
                    .filter_map(|(enabled, p)| enabled.then_some(p)),
            )
            .collect()
    }
}
