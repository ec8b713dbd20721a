// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Typed property readings.
//!
//! A [`Reading`] is one `get_prop` reply converted to its typed form. Numbers
//! keep the device's own representation, so an integer `22` stays `22`. A
//! reply that does not fit its property is kept verbatim as
//! [`Reading::Unparsed`].

use serde_json::{Number, Value};

use crate::command::Property;
use crate::error::{ParseError, ValueError};
use crate::types::{Brightness, PoweroffTime, Switch};

/// A single parsed property value.
///
/// # Examples
///
/// ```
/// use miheater_lib::command::Property;
/// use miheater_lib::state::Reading;
///
/// let reading = Reading::parse(Property::Power, &serde_json::json!("on")).unwrap();
/// assert_eq!(reading, Reading::Power("on".to_string()));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub enum Reading {
    /// Raw power string.
    Power(String),
    /// Relative humidity in percent.
    Humidity(Number),
    /// Target temperature in °C.
    TargetTemperature(Number),
    /// Measured temperature in °C.
    Temperature(Number),
    /// Remaining power-off delay.
    PoweroffTime(PoweroffTime),
    /// Buzzer setting.
    Buzzer(Switch),
    /// Panel brightness.
    Brightness(Brightness),
    /// Child lock setting.
    ChildLock(Switch),
    /// A reply of the wrong shape, stored as received.
    Unparsed {
        /// The property that was read.
        property: Property,
        /// The raw reply.
        value: Value,
    },
}

impl Reading {
    /// Converts a raw `get_prop` value for `property`.
    ///
    /// Use [`parse_or_raw`](Self::parse_or_raw) to keep malformed replies
    /// instead of rejecting them.
    ///
    /// # Errors
    ///
    /// Returns `ParseError::InvalidValue` if the value has the wrong shape or
    /// is outside the property's range.
    pub fn parse(property: Property, value: &Value) -> Result<Self, ParseError> {
        match property {
            Property::Power => value
                .as_str()
                .map(|s| Self::Power(s.to_string()))
                .ok_or_else(|| invalid(property, "expected a string", value)),
            Property::Humidity => number(property, value).map(Self::Humidity),
            Property::TargetTemperature => number(property, value).map(Self::TargetTemperature),
            Property::Temperature => number(property, value).map(Self::Temperature),
            Property::PoweroffTime => {
                let raw = unsigned(property, value)?;
                PoweroffTime::try_from(raw)
                    .map(Self::PoweroffTime)
                    .map_err(|e| out_of_range(property, &e))
            }
            Property::Brightness => {
                let raw = unsigned(property, value)?;
                Brightness::try_from(raw)
                    .map(Self::Brightness)
                    .map_err(|e| out_of_range(property, &e))
            }
            Property::Buzzer => switch(property, value).map(Self::Buzzer),
            Property::ChildLock => switch(property, value).map(Self::ChildLock),
        }
    }

    /// Converts a raw value, falling back to [`Reading::Unparsed`].
    #[must_use]
    pub fn parse_or_raw(property: Property, value: Value) -> (Self, Option<ParseError>) {
        match Self::parse(property, &value) {
            Ok(reading) => (reading, None),
            Err(e) => (Self::Unparsed { property, value }, Some(e)),
        }
    }

    /// Returns the property this reading belongs to.
    #[must_use]
    pub fn property(&self) -> Property {
        match self {
            Self::Power(_) => Property::Power,
            Self::Humidity(_) => Property::Humidity,
            Self::TargetTemperature(_) => Property::TargetTemperature,
            Self::Temperature(_) => Property::Temperature,
            Self::PoweroffTime(_) => Property::PoweroffTime,
            Self::Buzzer(_) => Property::Buzzer,
            Self::Brightness(_) => Property::Brightness,
            Self::ChildLock(_) => Property::ChildLock,
            Self::Unparsed { property, .. } => *property,
        }
    }
}

fn number(property: Property, value: &Value) -> Result<Number, ParseError> {
    match value {
        Value::Number(n) => Ok(n.clone()),
        _ => Err(invalid(property, "expected a number", value)),
    }
}

fn unsigned(property: Property, value: &Value) -> Result<u64, ParseError> {
    value
        .as_u64()
        .ok_or_else(|| invalid(property, "expected a non-negative integer", value))
}

fn switch(property: Property, value: &Value) -> Result<Switch, ParseError> {
    match value {
        Value::String(s) => s.parse().map_err(|e| out_of_range(property, &e)),
        Value::Bool(b) => Ok(Switch::from(*b)),
        _ => Err(invalid(property, "expected \"on\" or \"off\"", value)),
    }
}

fn invalid(property: Property, expected: &str, value: &Value) -> ParseError {
    ParseError::InvalidValue {
        field: property.wire_name().to_string(),
        message: format!("{expected}, got {value}"),
    }
}

fn out_of_range(property: Property, err: &ValueError) -> ParseError {
    ParseError::InvalidValue {
        field: property.wire_name().to_string(),
        message: err.to_string(),
    }
}
