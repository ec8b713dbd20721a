// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Heater state tracking.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde_json::{Number, Value};

use crate::command::Property;
use crate::types::{Brightness, HvacMode, PoweroffTime, Switch};

use super::Reading;

/// Flat key/value view of the state, as shown to the host.
pub type Attributes = BTreeMap<String, Value>;

/// Last successfully polled state of a heater.
///
/// All fields are optional because nothing is known before the first poll,
/// and the basic heater variant never reports the extended settings.
///
/// # Examples
///
/// ```
/// use miheater_lib::state::{HeaterState, Reading};
/// use miheater_lib::types::HvacMode;
///
/// let mut state = HeaterState::new();
/// state.apply(&Reading::Power("off".to_string()));
/// assert_eq!(state.hvac_mode(), Some(HvacMode::Off));
/// assert!(!state.is_on());
/// ```
#[derive(Debug, Clone, Default, PartialEq, serde::Serialize)]
pub struct HeaterState {
    power: Option<String>,
    hvac_mode: Option<HvacMode>,
    target_temperature: Option<Number>,
    current_temperature: Option<Number>,
    humidity: Option<Number>,
    poweroff_time: Option<PoweroffTime>,
    buzzer: Option<Switch>,
    brightness: Option<Brightness>,
    child_lock: Option<Switch>,
    /// Replies that did not fit their property, keyed by attribute name.
    unparsed: Attributes,
    last_updated: Option<DateTime<Utc>>,
}

impl HeaterState {
    /// Creates a new empty state.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores a reading. The hvac mode follows every power reading.
    pub fn apply(&mut self, reading: &Reading) {
        if let Reading::Unparsed { property, value } = reading {
            self.clear(*property);
            // Anything but the string "off" reads as heating.
            if *property == Property::Power {
                self.hvac_mode = Some(HvacMode::Heat);
            }
            self.unparsed
                .insert(attribute_key(*property).to_string(), value.clone());
            return;
        }

        self.unparsed.remove(attribute_key(reading.property()));
        match reading {
            Reading::Power(raw) => {
                self.hvac_mode = Some(HvacMode::from_power(raw));
                self.power = Some(raw.clone());
            }
            Reading::Humidity(v) => self.humidity = Some(v.clone()),
            Reading::TargetTemperature(v) => self.target_temperature = Some(v.clone()),
            Reading::Temperature(v) => self.current_temperature = Some(v.clone()),
            Reading::PoweroffTime(v) => self.poweroff_time = Some(*v),
            Reading::Buzzer(v) => self.buzzer = Some(*v),
            Reading::Brightness(v) => self.brightness = Some(*v),
            Reading::ChildLock(v) => self.child_lock = Some(*v),
            Reading::Unparsed { .. } => {}
        }
    }

    fn clear(&mut self, property: Property) {
        match property {
            Property::Power => self.power = None,
            Property::Humidity => self.humidity = None,
            Property::TargetTemperature => self.target_temperature = None,
            Property::Temperature => self.current_temperature = None,
            Property::PoweroffTime => self.poweroff_time = None,
            Property::Buzzer => self.buzzer = None,
            Property::Brightness => self.brightness = None,
            Property::ChildLock => self.child_lock = None,
        }
    }

    /// Builds a complete state from the readings of one poll.
    #[must_use]
    pub fn from_readings(readings: &[Reading], polled_at: DateTime<Utc>) -> Self {
        let mut state = Self::new();
        for reading in readings {
            state.apply(reading);
        }
        state.last_updated = Some(polled_at);
        state
    }

    /// Returns `true` if both states hold the same readings, ignoring when
    /// they were taken.
    #[must_use]
    pub fn same_readings(&self, other: &Self) -> bool {
        Self {
            last_updated: None,
            ..self.clone()
        } == Self {
            last_updated: None,
            ..other.clone()
        }
    }

    /// Raw power reading.
    #[must_use]
    pub fn power(&self) -> Option<&str> {
        self.power.as_deref()
    }

    /// Returns `true` if the last poll reported the heater as heating.
    #[must_use]
    pub fn is_on(&self) -> bool {
        self.hvac_mode == Some(HvacMode::Heat)
    }

    /// Operation mode derived from power.
    #[must_use]
    pub fn hvac_mode(&self) -> Option<HvacMode> {
        self.hvac_mode
    }

    /// Target temperature in °C.
    #[must_use]
    pub fn target_temperature(&self) -> Option<f64> {
        self.target_temperature.as_ref().and_then(Number::as_f64)
    }

    /// Measured temperature in °C.
    #[must_use]
    pub fn current_temperature(&self) -> Option<f64> {
        self.current_temperature.as_ref().and_then(Number::as_f64)
    }

    /// Relative humidity in percent.
    #[must_use]
    pub fn humidity(&self) -> Option<f64> {
        self.humidity.as_ref().and_then(Number::as_f64)
    }

    /// Remaining power-off delay.
    #[must_use]
    pub fn poweroff_time(&self) -> Option<PoweroffTime> {
        self.poweroff_time
    }

    /// Buzzer setting.
    #[must_use]
    pub fn buzzer(&self) -> Option<Switch> {
        self.buzzer
    }

    /// Panel brightness.
    #[must_use]
    pub fn brightness(&self) -> Option<Brightness> {
        self.brightness
    }

    /// Child lock setting.
    #[must_use]
    pub fn child_lock(&self) -> Option<Switch> {
        self.child_lock
    }

    /// Replies the last poll could not interpret, by attribute name.
    #[must_use]
    pub fn unparsed(&self) -> &Attributes {
        &self.unparsed
    }

    /// When the state was polled.
    #[must_use]
    pub fn last_updated(&self) -> Option<DateTime<Utc>> {
        self.last_updated
    }

    /// Returns the host-facing attribute map. Unknown values are omitted;
    /// uninterpretable replies appear as received.
    #[must_use]
    pub fn attributes(&self) -> Attributes {
        let mut attrs = Attributes::new();
        let mut put = |key: &str, value: Option<Value>| {
            if let Some(v) = value {
                attrs.insert(key.to_string(), v);
            }
        };

        put("hvac_mode", self.hvac_mode.map(|m| Value::from(m.as_str())));
        put("power", self.power.clone().map(Value::from));
        put("target_temperature", self.target_temperature.clone().map(Value::Number));
        put("current_temperature", self.current_temperature.clone().map(Value::Number));
        put("humidity", self.humidity.clone().map(Value::Number));
        put("poweroff_time", self.poweroff_time.map(|t| Value::from(t.seconds())));
        put("buzzer", self.buzzer.map(|s| Value::from(s.as_str())));
        put("brightness", self.brightness.map(|b| Value::from(b.value())));
        put("child_lock", self.child_lock.map(|s| Value::from(s.as_str())));

        attrs.extend(self.unparsed.iter().map(|(k, v)| (k.clone(), v.clone())));
        attrs
    }
}

/// Attribute name a property is reported under.
fn attribute_key(property: Property) -> &'static str {
    match property {
        Property::Humidity => "humidity",
        Property::Temperature => "current_temperature",
        other => other.wire_name(),
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn basic_readings(power: &str) -> Vec<Reading> {
        vec![
            Reading::Power(power.to_string()),
            Reading::Humidity(45.into()),
            Reading::TargetTemperature(22.into()),
            Reading::Temperature(21.into()),
        ]
    }

    #[test]
    fn new_state_is_empty() {
        let state = HeaterState::new();
        assert_eq!(state.hvac_mode(), None);
        assert!(!state.is_on());
        assert!(state.attributes().is_empty());
    }

    #[test]
    fn non_off_power_means_heat() {
        let state = HeaterState::from_readings(&basic_readings("heat_on"), Utc::now());
        assert_eq!(state.hvac_mode(), Some(HvacMode::Heat));
        assert_eq!(state.target_temperature(), Some(22.0));
        assert_eq!(state.current_temperature(), Some(21.0));
        assert_eq!(state.humidity(), Some(45.0));
        assert!(state.is_on());
    }

    #[test]
    fn attributes_keep_integer_numbers() {
        let state = HeaterState::from_readings(&basic_readings("off"), Utc::now());
        let attrs = state.attributes();

        assert_eq!(attrs["hvac_mode"], json!("off"));
        assert_eq!(attrs["power"], json!("off"));
        assert_eq!(attrs["target_temperature"], json!(22));
        assert_eq!(attrs["current_temperature"], json!(21));
        assert_eq!(attrs["humidity"], json!(45));
        assert_eq!(serde_json::to_string(&attrs["humidity"]).unwrap(), "45");
        assert!(!attrs.contains_key("buzzer"));
    }

    #[test]
    fn attributes_include_extended_settings() {
        let mut readings = basic_readings("on");
        readings.extend([
            Reading::PoweroffTime(PoweroffTime::new(600).unwrap()),
            Reading::Buzzer(Switch::On),
            Reading::Brightness(Brightness::DIM),
            Reading::ChildLock(Switch::Off),
        ]);
        let attrs = HeaterState::from_readings(&readings, Utc::now()).attributes();

        assert_eq!(attrs["poweroff_time"], json!(600));
        assert_eq!(attrs["buzzer"], json!("on"));
        assert_eq!(attrs["brightness"], json!(1));
        assert_eq!(attrs["child_lock"], json!("off"));
    }

    #[test]
    fn unparsed_reply_is_shown_raw() {
        let mut readings = basic_readings("on");
        readings[1] = Reading::Unparsed {
            property: Property::Humidity,
            value: Value::Null,
        };
        let state = HeaterState::from_readings(&readings, Utc::now());

        assert_eq!(state.humidity(), None);
        assert_eq!(state.attributes()["humidity"], Value::Null);
        assert_eq!(state.attributes()["target_temperature"], json!(22));
        assert_eq!(state.unparsed().len(), 1);
    }

    #[test]
    fn unparsed_power_reads_as_heat() {
        let state = HeaterState::from_readings(
            &[Reading::Unparsed {
                property: Property::Power,
                value: json!(1),
            }],
            Utc::now(),
        );

        assert_eq!(state.hvac_mode(), Some(HvacMode::Heat));
        assert_eq!(state.power(), None);
        assert_eq!(state.attributes()["power"], json!(1));
    }

    #[test]
    fn parsed_reading_replaces_unparsed() {
        let mut state = HeaterState::new();
        state.apply(&Reading::Unparsed {
            property: Property::Temperature,
            value: json!("n/a"),
        });
        state.apply(&Reading::Temperature(19.into()));

        assert!(state.unparsed().is_empty());
        assert_eq!(state.attributes()["current_temperature"], json!(19));
    }

    #[test]
    fn same_readings_ignores_timestamp() {
        let earlier = HeaterState::from_readings(&basic_readings("on"), Utc::now());
        let later = HeaterState::from_readings(
            &basic_readings("on"),
            Utc::now() + chrono::Duration::seconds(30),
        );
        assert!(earlier.same_readings(&later));

        let off = HeaterState::from_readings(&basic_readings("off"), Utc::now());
        assert!(!earlier.same_readings(&off));
    }
}
