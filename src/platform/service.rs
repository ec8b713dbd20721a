// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Extra heater services.
//!
//! | Service                | Parameter       | Values         |
//! |------------------------|-----------------|----------------|
//! | `set_buzzer`           | `buzzer`        | `on` / `off`   |
//! | `set_brightness`       | `brightness`    | 0 - 2          |
//! | `set_poweroff_time`    | `poweroff_time` | 0 - 28800 s    |
//! | `set_child_lock`       | `child_lock`    | `on` / `off`   |
//! | `set_room_temperature` | `temperature`   | integer >= 0   |
//!
//! Every parameter is optional; a call without it reaches the heater as a
//! no-op. Integer parameters also accept decimal strings and numbers with a
//! fractional part, which is truncated.

use std::fmt;
use std::str::FromStr;

use serde_json::Value;

use crate::capabilities::Capabilities;
use crate::error::{Error, ValueError};
use crate::event::EntityId;
use crate::protocol::MiioDevice;
use crate::types::{Brightness, PoweroffTime, Switch};

use super::registry::HeaterRegistry;

/// A service registered under the `miheater` domain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Service {
    /// Switch the buzzer.
    SetBuzzer,
    /// Set the panel brightness.
    SetBrightness,
    /// Schedule the automatic power-off.
    SetPoweroffTime,
    /// Switch the child lock.
    SetChildLock,
    /// Set the target temperature.
    SetRoomTemperature,
}

impl Service {
    /// Domain the services are registered under.
    pub const DOMAIN: &'static str = "miheater";

    /// All services.
    pub const ALL: [Self; 5] = [
        Self::SetBuzzer,
        Self::SetBrightness,
        Self::SetPoweroffTime,
        Self::SetChildLock,
        Self::SetRoomTemperature,
    ];

    /// Service name within the domain.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::SetBuzzer => "set_buzzer",
            Self::SetBrightness => "set_brightness",
            Self::SetPoweroffTime => "set_poweroff_time",
            Self::SetChildLock => "set_child_lock",
            Self::SetRoomTemperature => "set_room_temperature",
        }
    }

    /// Name of the service's parameter in the call data.
    #[must_use]
    pub const fn parameter(&self) -> &'static str {
        match self {
            Self::SetBuzzer => "buzzer",
            Self::SetBrightness => "brightness",
            Self::SetPoweroffTime => "poweroff_time",
            Self::SetChildLock => "child_lock",
            Self::SetRoomTemperature => "temperature",
        }
    }
}

impl fmt::Display for Service {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", Self::DOMAIN, self.name())
    }
}

impl FromStr for Service {
    type Err = ValueError;

    /// Accepts the bare name or the `miheater.`-qualified one.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s
            .strip_prefix(Self::DOMAIN)
            .and_then(|rest| rest.strip_prefix('.'))
            .unwrap_or(s);
        Self::ALL
            .into_iter()
            .find(|service| service.name() == name)
            .ok_or_else(|| ValueError::UnknownService(s.to_string()))
    }
}

/// A validated service parameter.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ServiceData {
    /// Buzzer setting.
    Buzzer(Option<Switch>),
    /// Brightness level.
    Brightness(Option<Brightness>),
    /// Power-off delay.
    PoweroffTime(Option<PoweroffTime>),
    /// Child lock setting.
    ChildLock(Option<Switch>),
    /// Target temperature in whole degrees.
    RoomTemperature(Option<u32>),
}

impl ServiceData {
    /// Returns `true` if a heater with `capabilities` can take this call.
    #[must_use]
    pub const fn is_supported_by(&self, capabilities: &Capabilities) -> bool {
        match self {
            Self::Buzzer(_) => capabilities.supports_buzzer(),
            Self::Brightness(_) => capabilities.supports_brightness(),
            Self::PoweroffTime(_) => capabilities.supports_poweroff_timer(),
            Self::ChildLock(_) => capabilities.supports_child_lock(),
            Self::RoomTemperature(_) => true,
        }
    }
}

/// A service invocation from the host.
#[derive(Debug, Clone, PartialEq)]
pub struct ServiceCall {
    /// The invoked service.
    pub service: Service,
    /// Target entities; `None` targets every heater.
    pub entity_ids: Option<Vec<EntityId>>,
    /// Raw call data.
    pub data: Value,
}

impl ServiceCall {
    /// Creates a call targeting every heater.
    #[must_use]
    pub fn new(service: Service, data: Value) -> Self {
        Self {
            service,
            entity_ids: None,
            data,
        }
    }

    /// Restricts the call to the given entities.
    #[must_use]
    pub fn with_entity_ids(mut self, entity_ids: impl IntoIterator<Item = EntityId>) -> Self {
        self.entity_ids = Some(entity_ids.into_iter().collect());
        self
    }

    /// Validates the call data against the service's schema.
    ///
    /// # Errors
    ///
    /// Returns `ValueError::InvalidParameter` if the parameter has the wrong
    /// type, or the value's own error if it is out of range.
    pub fn parse_data(&self) -> Result<ServiceData, ValueError> {
        let field = self.service.parameter();
        let raw = match &self.data {
            Value::Object(map) => map.get(field).filter(|v| !v.is_null()),
            Value::Null => None,
            other => {
                return Err(ValueError::InvalidParameter {
                    field,
                    message: format!("expected an object, got {other}"),
                });
            }
        };

        let data = match self.service {
            Service::SetBuzzer => ServiceData::Buzzer(raw.map(|v| switch(field, v)).transpose()?),
            Service::SetChildLock => {
                ServiceData::ChildLock(raw.map(|v| switch(field, v)).transpose()?)
            }
            Service::SetBrightness => ServiceData::Brightness(
                raw.map(|v| integer(field, v).and_then(Brightness::try_from))
                    .transpose()?,
            ),
            Service::SetPoweroffTime => ServiceData::PoweroffTime(
                raw.map(|v| integer(field, v).and_then(PoweroffTime::try_from))
                    .transpose()?,
            ),
            Service::SetRoomTemperature => ServiceData::RoomTemperature(
                raw.map(|v| {
                    integer(field, v).and_then(|n| {
                        u32::try_from(n).map_err(|_| ValueError::InvalidParameter {
                            field,
                            message: format!("{n} is too large"),
                        })
                    })
                })
                .transpose()?,
            ),
        };
        Ok(data)
    }
}

fn switch(field: &'static str, value: &Value) -> Result<Switch, ValueError> {
    match value {
        Value::String(s) => s.parse(),
        other => Err(ValueError::InvalidParameter {
            field,
            message: format!("expected \"on\" or \"off\", got {other}"),
        }),
    }
}

/// Non-negative integer. Decimal strings are parsed and fractional numbers
/// truncated.
fn integer(field: &'static str, value: &Value) -> Result<u64, ValueError> {
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let parsed = match value {
        Value::Number(n) => n.as_u64().or_else(|| {
            n.as_f64()
                .filter(|f| f.is_finite() && *f >= 0.0)
                .map(|f| f.trunc() as u64)
        }),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    };
    parsed.ok_or_else(|| ValueError::InvalidParameter {
        field,
        message: format!("expected a non-negative integer, got {value}"),
    })
}

impl<D: MiioDevice> HeaterRegistry<D> {
    /// Runs a service call against its target heaters.
    ///
    /// The data is validated and every target resolved before any heater is
    /// touched. Unknown entity ids and heaters lacking the feature are
    /// skipped with a warning. Each remaining target receives the command
    /// and is then polled so the host sees the new state; a failing refresh
    /// is logged and does not fail the call. A target whose command fails
    /// does not stop the others.
    ///
    /// Returns the entity ids the call was applied to.
    ///
    /// # Errors
    ///
    /// Returns `Error::Value` for invalid data, or, once every target has
    /// been handled, the first error a heater reported for the command.
    pub async fn dispatch(&self, call: &ServiceCall) -> Result<Vec<EntityId>, Error> {
        let data = call.parse_data()?;

        let targets = match &call.entity_ids {
            None => self.heaters().await,
            Some(ids) => {
                let mut targets = Vec::with_capacity(ids.len());
                for id in ids {
                    match self.get_entity(id).await {
                        Ok(heater) => targets.push(heater),
                        Err(_) => {
                            tracing::warn!(
                                service = %call.service,
                                entity_id = %id,
                                "Skipping unknown service target"
                            );
                        }
                    }
                }
                targets
            }
        };

        let targets: Vec<_> = targets
            .into_iter()
            .filter(|heater| {
                let supported = data.is_supported_by(heater.capabilities());
                if !supported {
                    tracing::warn!(
                        service = %call.service,
                        entity_id = %heater.entity_id(),
                        "Skipping service target without the feature"
                    );
                }
                supported
            })
            .collect();

        let mut applied = Vec::with_capacity(targets.len());
        let mut first_error = None;
        for heater in targets {
            let result = match data {
                ServiceData::Buzzer(v) => heater.set_buzzer(v).await,
                ServiceData::Brightness(v) => heater.set_brightness(v).await,
                ServiceData::PoweroffTime(v) => heater.set_poweroff_time(v).await,
                ServiceData::ChildLock(v) => heater.set_child_lock(v).await,
                ServiceData::RoomTemperature(v) => heater.set_temperature(v.map(f64::from)).await,
            };
            if let Err(e) = result {
                tracing::error!(
                    service = %call.service,
                    entity_id = %heater.entity_id(),
                    error = %e,
                    "Service call failed"
                );
                first_error.get_or_insert(e);
                continue;
            }

            if let Err(e) = heater.poll().await {
                tracing::warn!(
                    service = %call.service,
                    entity_id = %heater.entity_id(),
                    error = %e,
                    "Refresh after service call failed"
                );
            }
            applied.push(heater.entity_id().clone());
        }

        match first_error {
            Some(e) => Err(e),
            None => Ok(applied),
        }
    }
}
