// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! The device proxy contract.
//!
//! The miIO wire protocol (token handshake, encryption, request framing) is
//! provided by an external transport. This crate only consumes it through
//! [`MiioDevice`]: one call to read the device identity and one generic
//! method call that returns the parsed result list.
//!
//! No retries or timeouts are layered on top; whatever the transport
//! enforces applies.

mod device_info;

pub use device_info::DeviceInfo;

use serde_json::Value;

use crate::command::Command;
use crate::error::DeviceError;

/// A miIO device proxy.
///
/// Implementations own the connection to a single device. Every failure is
/// reported as a [`DeviceError`].
#[allow(async_fn_in_trait)]
pub trait MiioDevice {
    /// Reads model, MAC address and firmware/hardware versions.
    ///
    /// # Errors
    ///
    /// Returns `DeviceError` if the device cannot be reached or the reply is
    /// malformed.
    async fn info(&self) -> Result<DeviceInfo, DeviceError>;

    /// Calls a miIO method and returns its result list.
    ///
    /// # Arguments
    ///
    /// * `method` - The method name, e.g. `get_prop`
    /// * `params` - Positional parameters
    ///
    /// # Errors
    ///
    /// Returns `DeviceError` on any transport or protocol failure.
    async fn send(&self, method: &str, params: &[Value]) -> Result<Vec<Value>, DeviceError>;

    /// Sends a typed command.
    ///
    /// # Errors
    ///
    /// Returns `DeviceError` on any transport or protocol failure.
    async fn send_command<C: Command + Sync>(
        &self,
        command: &C,
    ) -> Result<Vec<Value>, DeviceError> {
        self.send(command.name(), &command.params()).await
    }
}
