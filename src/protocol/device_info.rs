// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Identity reported by the `miIO.info` call.

use serde::{Deserialize, Serialize};

/// Hardware identity of a miIO device.
///
/// # Examples
///
/// ```
/// use miheater_lib::protocol::DeviceInfo;
///
/// let info = DeviceInfo::new("zhimi.heater.za1", "28:6C:07:AA:BB:CC");
/// assert_eq!(info.unique_id(), "zhimi.heater.za1-28:6C:07:AA:BB:CC");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeviceInfo {
    /// Model identifier, e.g. `zhimi.heater.za1`.
    pub model: String,
    /// MAC address of the wifi module.
    #[serde(alias = "mac")]
    pub mac_address: String,
    /// Firmware version string.
    #[serde(alias = "fw_ver", default)]
    pub firmware_version: String,
    /// Hardware version string.
    #[serde(alias = "hw_ver", default)]
    pub hardware_version: String,
}

impl DeviceInfo {
    /// Creates device info with empty version strings.
    #[must_use]
    pub fn new(model: impl Into<String>, mac_address: impl Into<String>) -> Self {
        Self {
            model: model.into(),
            mac_address: mac_address.into(),
            firmware_version: String::new(),
            hardware_version: String::new(),
        }
    }

    /// Sets the firmware and hardware versions.
    #[must_use]
    pub fn with_versions(
        mut self,
        firmware_version: impl Into<String>,
        hardware_version: impl Into<String>,
    ) -> Self {
        self.firmware_version = firmware_version.into();
        self.hardware_version = hardware_version.into();
        self
    }

    /// Returns the identifier used to name the entity: `<model>-<mac>`.
    #[must_use]
    pub fn unique_id(&self) -> String {
        format!("{}-{}", self.model, self.mac_address)
    }
}
