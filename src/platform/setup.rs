// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Platform setup.

use std::sync::Arc;

use crate::error::{DeviceError, Error};
use crate::heater::Heater;
use crate::protocol::MiioDevice;

use super::config::PlatformConfig;
use super::registry::HeaterRegistry;

/// Sets up one heater from its configuration.
///
/// Builds the device proxy with `connect`, reads the device identity once,
/// creates the heater and registers it under the configured host. The heater
/// is not polled; the host schedules the first refresh.
///
/// # Errors
///
/// Returns `Error::Config` if the configuration is invalid. Any device
/// failure while connecting or reading the identity is logged and returned
/// as `Error::PlatformNotReady`, so the host can retry setup later.
///
/// # Examples
///
/// ```ignore
/// use miheater_lib::platform::{HeaterRegistry, PlatformConfig, setup_platform};
///
/// let registry = HeaterRegistry::new();
/// let config = PlatformConfig::new("192.168.1.40", "Bedroom", token);
/// let heater = setup_platform(&config, |c| MyTransport::connect(&c.host, &c.token), &registry).await?;
/// heater.poll().await?;
/// ```
pub async fn setup_platform<D, F>(
    config: &PlatformConfig,
    connect: F,
    registry: &HeaterRegistry<D>,
) -> Result<Arc<Heater<D>>, Error>
where
    D: MiioDevice,
    F: FnOnce(&PlatformConfig) -> Result<D, DeviceError>,
{
    config.validate()?;

    tracing::info!(
        host = %config.host,
        token_prefix = config.token_prefix(),
        "Initializing Xiaomi heater"
    );

    let not_ready = |e: DeviceError| {
        tracing::error!(host = %config.host, error = %e, "Failed to set up Xiaomi heater");
        Error::PlatformNotReady {
            host: config.host.clone(),
            reason: e.to_string(),
        }
    };

    let device = connect(config).map_err(not_ready)?;
    let info = device.info().await.map_err(not_ready)?;

    tracing::info!(
        host = %config.host,
        model = %info.model,
        firmware_version = %info.firmware_version,
        hardware_version = %info.hardware_version,
        "Heater detected"
    );

    let heater = Heater::new(device, config.name.clone(), &info, config.capabilities());
    Ok(registry.insert(config.host.clone(), heater).await)
}
