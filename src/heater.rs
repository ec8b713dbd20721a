// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! The heater entity.
//!
//! A [`Heater`] adapts one device proxy to a thermostat-like entity. Reads go
//! through [`Heater::poll`], which refreshes every tracked property with one
//! `get_prop` round trip each. Setters translate 1:1 into a single outbound
//! command and do not wait for the device to confirm or re-poll.
//!
//! # Examples
//!
//! ```ignore
//! use miheater_lib::{Capabilities, Heater};
//!
//! # async fn example(device: impl miheater_lib::protocol::MiioDevice) -> miheater_lib::Result<()> {
//! let info = device.info().await?;
//! let heater = Heater::new(device, "Bedroom", &info, Capabilities::extended());
//!
//! heater.poll().await?;
//! println!("{:?}", heater.attributes());
//!
//! heater.set_hvac_mode("heat").await?;
//! heater.set_temperature(Some(22.0)).await?;
//! # Ok(())
//! # }
//! ```

use chrono::Utc;
use parking_lot::RwLock;

use crate::capabilities::Capabilities;
use crate::command::{
    Command, GetPropCommand, Property, SetBrightnessCommand, SetBuzzerCommand,
    SetChildLockCommand, SetPowerCommand, SetPoweroffTimeCommand, SetTargetTemperatureCommand,
};
use crate::error::{Error, ParseError, ValueError};
use crate::event::{EntityId, EventBus, HeaterEvent};
use crate::protocol::{DeviceInfo, MiioDevice};
use crate::state::{Attributes, HeaterState, Reading};
use crate::types::{Brightness, HvacMode, PoweroffTime, Switch};

/// Lowest target temperature the heater accepts, in °C.
pub const MIN_TEMP: f64 = 16.0;

/// Highest target temperature the heater accepts, in °C.
pub const MAX_TEMP: f64 = 32.0;

/// A Xiaomi heater exposed as a thermostat entity.
///
/// The heater owns its device proxy. Calls are not serialized: if the host
/// issues two operations concurrently their round trips may interleave.
#[derive(Debug)]
pub struct Heater<D: MiioDevice> {
    device: D,
    name: String,
    unique_id: String,
    entity_id: EntityId,
    capabilities: Capabilities,
    state: RwLock<HeaterState>,
    events: EventBus,
}

impl<D: MiioDevice> Heater<D> {
    /// Creates a heater for a device whose identity is already known.
    ///
    /// The entity id is derived from `info.unique_id()`. The heater starts
    /// with an empty state until the first [`poll`](Self::poll).
    pub fn new(
        device: D,
        name: impl Into<String>,
        info: &DeviceInfo,
        capabilities: Capabilities,
    ) -> Self {
        let unique_id = info.unique_id();
        Self {
            device,
            name: name.into(),
            entity_id: EntityId::from_unique_id(&unique_id),
            unique_id,
            capabilities,
            state: RwLock::new(HeaterState::new()),
            events: EventBus::new(),
        }
    }

    /// Publishes this heater's events on `events` instead of a private bus.
    #[must_use]
    pub fn with_event_bus(mut self, events: EventBus) -> Self {
        self.events = events;
        self
    }

    /// Overrides the derived entity id.
    #[must_use]
    pub fn with_entity_id(mut self, entity_id: EntityId) -> Self {
        self.entity_id = entity_id;
        self
    }

    /// Display name from the platform configuration.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// `<model>-<mac>` identity of the device.
    #[must_use]
    pub fn unique_id(&self) -> &str {
        &self.unique_id
    }

    /// Host-visible entity id.
    #[must_use]
    pub fn entity_id(&self) -> &EntityId {
        &self.entity_id
    }

    /// Feature set of this heater.
    #[must_use]
    pub fn capabilities(&self) -> &Capabilities {
        &self.capabilities
    }

    /// The underlying device proxy.
    #[must_use]
    pub fn device(&self) -> &D {
        &self.device
    }

    /// Subscribes to this heater's events.
    #[must_use]
    pub fn subscribe(&self) -> tokio::sync::broadcast::Receiver<HeaterEvent> {
        self.events.subscribe()
    }

    // ========== Polling ==========

    /// Refreshes every tracked property.
    ///
    /// Properties are read one at a time. If the device fails or returns an
    /// empty reply for any of them, the poll stops, the previous state stays
    /// in place and [`Error::NotReady`] is returned. A reply that does not fit
    /// its property is logged and kept as received. On success the state is
    /// replaced as a whole and the new state is returned.
    ///
    /// # Errors
    ///
    /// Returns `Error::NotReady` if any property read fails.
    pub async fn poll(&self) -> Result<HeaterState, Error> {
        let properties = self.capabilities.properties();
        let mut readings = Vec::with_capacity(properties.len());

        for property in properties {
            match self.read_property(property).await {
                Ok(reading) => readings.push(reading),
                Err(e) => {
                    tracing::error!(
                        entity_id = %self.entity_id,
                        property = %property,
                        error = %e,
                        "Failed to read heater property"
                    );
                    self.events
                        .publish(HeaterEvent::poll_failed(self.entity_id.clone(), e.to_string()));
                    return Err(Error::NotReady {
                        entity_id: self.entity_id.to_string(),
                        reason: e.to_string(),
                    });
                }
            }
        }

        let new_state = HeaterState::from_readings(&readings, Utc::now());
        let changed = {
            let mut state = self.state.write();
            let changed = !state.same_readings(&new_state);
            *state = new_state.clone();
            changed
        };

        tracing::debug!(entity_id = %self.entity_id, changed, "Polled heater");
        if changed {
            self.events.publish(HeaterEvent::state_changed(
                self.entity_id.clone(),
                new_state.clone(),
            ));
        }

        Ok(new_state)
    }

    async fn read_property(&self, property: Property) -> Result<Reading, Error> {
        let values = self
            .device
            .send_command(&GetPropCommand(property))
            .await?;
        let value = values
            .into_iter()
            .next()
            .ok_or_else(|| ParseError::MissingValue(property.wire_name().to_string()))?;

        let (reading, err) = Reading::parse_or_raw(property, value);
        if let Some(e) = err {
            tracing::warn!(
                entity_id = %self.entity_id,
                property = %property,
                error = %e,
                "Keeping unrecognized property value as received"
            );
        }
        Ok(reading)
    }

    // ========== State ==========

    /// Returns a snapshot of the last successfully polled state.
    #[must_use]
    pub fn state(&self) -> HeaterState {
        self.state.read().clone()
    }

    /// Current operation mode, `None` before the first poll.
    #[must_use]
    pub fn hvac_mode(&self) -> Option<HvacMode> {
        self.state.read().hvac_mode()
    }

    /// Returns `true` if the heater was on at the last poll.
    #[must_use]
    pub fn is_on(&self) -> bool {
        self.state.read().is_on()
    }

    /// Target temperature in °C.
    #[must_use]
    pub fn target_temperature(&self) -> Option<f64> {
        self.state.read().target_temperature()
    }

    /// Measured temperature in °C.
    #[must_use]
    pub fn current_temperature(&self) -> Option<f64> {
        self.state.read().current_temperature()
    }

    /// Relative humidity in percent.
    #[must_use]
    pub fn humidity(&self) -> Option<f64> {
        self.state.read().humidity()
    }

    /// Remaining power-off delay.
    #[must_use]
    pub fn poweroff_time(&self) -> Option<PoweroffTime> {
        self.state.read().poweroff_time()
    }

    /// Buzzer setting.
    #[must_use]
    pub fn buzzer(&self) -> Option<Switch> {
        self.state.read().buzzer()
    }

    /// Panel brightness.
    #[must_use]
    pub fn brightness(&self) -> Option<Brightness> {
        self.state.read().brightness()
    }

    /// Child lock setting.
    #[must_use]
    pub fn child_lock(&self) -> Option<Switch> {
        self.state.read().child_lock()
    }

    /// Flat attribute map for display and automations.
    #[must_use]
    pub fn attributes(&self) -> Attributes {
        self.state.read().attributes()
    }

    /// Modes the host may select.
    #[must_use]
    pub fn hvac_modes(&self) -> &'static [HvacMode] {
        &HvacMode::ALL
    }

    /// Lowest settable target temperature.
    #[must_use]
    pub fn min_temp(&self) -> f64 {
        MIN_TEMP
    }

    /// Highest settable target temperature.
    #[must_use]
    pub fn max_temp(&self) -> f64 {
        MAX_TEMP
    }

    /// Granularity of the target temperature.
    #[must_use]
    pub fn target_temperature_step(&self) -> f64 {
        1.0
    }

    /// Unit of every temperature this heater reports.
    #[must_use]
    pub fn temperature_unit(&self) -> &'static str {
        "°C"
    }

    // ========== Thermostat ==========

    /// Sets the target temperature, truncated to whole degrees.
    ///
    /// Does nothing when `temperature` is `None`.
    ///
    /// # Errors
    ///
    /// Returns `Error::Value` for NaN or an infinite temperature, without
    /// sending anything, or `Error::Device` if the command fails.
    pub async fn set_temperature(&self, temperature: Option<f64>) -> Result<(), Error> {
        let Some(temperature) = temperature else {
            return Ok(());
        };
        if !temperature.is_finite() {
            return Err(ValueError::InvalidTemperature(temperature.to_string()).into());
        }
        #[allow(clippy::cast_possible_truncation)]
        let degrees = temperature.trunc() as i64;
        self.send(&SetTargetTemperatureCommand(degrees)).await
    }

    /// Sets the operation mode by name.
    ///
    /// `"heat"` powers the heater on and `"off"` powers it off. Any other
    /// value is logged as an error and ignored.
    ///
    /// # Errors
    ///
    /// Returns `Error::Device` if the command fails.
    pub async fn set_hvac_mode(&self, mode: &str) -> Result<(), Error> {
        match mode.parse::<HvacMode>() {
            Ok(mode) => self.set_mode(mode).await,
            Err(_) => {
                tracing::error!(entity_id = %self.entity_id, mode, "Unrecognized operation mode");
                Ok(())
            }
        }
    }

    /// Sets the operation mode.
    ///
    /// # Errors
    ///
    /// Returns `Error::Device` if the command fails.
    pub async fn set_mode(&self, mode: HvacMode) -> Result<(), Error> {
        self.send(&SetPowerCommand(mode.into())).await
    }

    // ========== Extended settings ==========

    /// Switches the buzzer. Does nothing when `buzzer` is `None`.
    ///
    /// # Errors
    ///
    /// Returns `Error::CapabilityNotSupported` on a heater without a
    /// switchable buzzer, or `Error::Device` if the command fails.
    pub async fn set_buzzer(&self, buzzer: Option<Switch>) -> Result<(), Error> {
        let Some(buzzer) = buzzer else {
            return Ok(());
        };
        Self::check_capability("buzzer", self.capabilities.supports_buzzer())?;
        self.send(&SetBuzzerCommand(buzzer)).await
    }

    /// Sets the panel brightness. Does nothing when `brightness` is `None`.
    ///
    /// # Errors
    ///
    /// Returns `Error::CapabilityNotSupported` on a heater without brightness
    /// control, or `Error::Device` if the command fails.
    pub async fn set_brightness(&self, brightness: Option<Brightness>) -> Result<(), Error> {
        let Some(brightness) = brightness else {
            return Ok(());
        };
        Self::check_capability("brightness", self.capabilities.supports_brightness())?;
        self.send(&SetBrightnessCommand(brightness)).await
    }

    /// Schedules the automatic power-off. Does nothing when `poweroff_time`
    /// is `None`.
    ///
    /// # Errors
    ///
    /// Returns `Error::CapabilityNotSupported` on a heater without a timer,
    /// or `Error::Device` if the command fails.
    pub async fn set_poweroff_time(&self, poweroff_time: Option<PoweroffTime>) -> Result<(), Error> {
        let Some(poweroff_time) = poweroff_time else {
            return Ok(());
        };
        Self::check_capability("power-off timer", self.capabilities.supports_poweroff_timer())?;
        self.send(&SetPoweroffTimeCommand(poweroff_time)).await
    }

    /// Switches the child lock. Does nothing when `child_lock` is `None`.
    ///
    /// # Errors
    ///
    /// Returns `Error::CapabilityNotSupported` on a heater without a child
    /// lock, or `Error::Device` if the command fails.
    pub async fn set_child_lock(&self, child_lock: Option<Switch>) -> Result<(), Error> {
        let Some(child_lock) = child_lock else {
            return Ok(());
        };
        Self::check_capability("child lock", self.capabilities.supports_child_lock())?;
        self.send(&SetChildLockCommand(child_lock)).await
    }

    // ========== Helpers ==========

    async fn send<C: Command + Sync>(&self, command: &C) -> Result<(), Error> {
        tracing::debug!(
            entity_id = %self.entity_id,
            command = command.name(),
            "Sending command to heater"
        );
        self.device.send_command(command).await?;
        Ok(())
    }

    fn check_capability(feature: &'static str, supported: bool) -> Result<(), Error> {
        if supported {
            Ok(())
        } else {
            Err(Error::CapabilityNotSupported(feature))
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::VecDeque;

    use parking_lot::Mutex;
    use serde_json::{Value, json};

    use super::*;
    use crate::error::DeviceError;

    /// Replies to `get_prop` from a fixed table and records every call.
    #[derive(Debug, Default)]
    struct FakeDevice {
        props: Mutex<Vec<(&'static str, Value)>>,
        failures: Mutex<VecDeque<&'static str>>,
        sent: Mutex<Vec<(String, Vec<Value>)>>,
    }

    impl FakeDevice {
        fn with_props(props: &[(&'static str, Value)]) -> Self {
            Self {
                props: Mutex::new(props.to_vec()),
                ..Self::default()
            }
        }

        fn fail_on(self, prop: &'static str) -> Self {
            self.failures.lock().push_back(prop);
            self
        }

        fn sent(&self) -> Vec<(String, Vec<Value>)> {
            self.sent.lock().clone()
        }

        fn setter_calls(&self) -> Vec<(String, Vec<Value>)> {
            self.sent()
                .into_iter()
                .filter(|(method, _)| method != "get_prop")
                .collect()
        }
    }

    impl MiioDevice for FakeDevice {
        async fn info(&self) -> Result<DeviceInfo, DeviceError> {
            Ok(DeviceInfo::new("zhimi.heater.za1", "28:6C:07:AA:BB:CC"))
        }

        async fn send(&self, method: &str, params: &[Value]) -> Result<Vec<Value>, DeviceError> {
            self.sent.lock().push((method.to_string(), params.to_vec()));
            if method != "get_prop" {
                return Ok(vec![json!("ok")]);
            }
            let name = params[0].as_str().unwrap_or_default();
            if self.failures.lock().contains(&name) {
                return Err(DeviceError::Timeout(name.to_string()));
            }
            let value = self
                .props
                .lock()
                .iter()
                .find(|(k, _)| *k == name)
                .map(|(_, v)| v.clone());
            Ok(value.into_iter().collect())
        }
    }

    fn basic_props(power: &str) -> Vec<(&'static str, Value)> {
        vec![
            ("power", json!(power)),
            ("relative_humidity", json!(45)),
            ("target_temperature", json!(22)),
            ("temperature", json!(21)),
        ]
    }

    fn extended_props(power: &str) -> Vec<(&'static str, Value)> {
        let mut props = basic_props(power);
        props.extend([
            ("poweroff_time", json!(0)),
            ("buzzer", json!("on")),
            ("brightness", json!(1)),
            ("child_lock", json!("off")),
        ]);
        props
    }

    fn heater(device: FakeDevice, caps: Capabilities) -> Heater<FakeDevice> {
        let info = DeviceInfo::new("zhimi.heater.za1", "28:6C:07:AA:BB:CC");
        Heater::new(device, "Bedroom", &info, caps)
    }

    #[tokio::test]
    async fn entity_id_derives_from_unique_id() {
        let heater = heater(FakeDevice::default(), Capabilities::basic());
        assert_eq!(heater.unique_id(), "zhimi.heater.za1-28:6C:07:AA:BB:CC");
        assert_eq!(
            heater.entity_id().as_str(),
            "climate.zhimi_heater_za1_28_6c_07_aa_bb_cc"
        );
        assert_eq!(heater.name(), "Bedroom");
    }

    #[tokio::test]
    async fn poll_reads_each_property_separately() {
        let heater = heater(
            FakeDevice::with_props(&extended_props("on")),
            Capabilities::extended(),
        );
        heater.poll().await.unwrap();

        let reads: Vec<_> = heater
            .device()
            .sent()
            .into_iter()
            .map(|(method, params)| {
                assert_eq!(method, "get_prop");
                params[0].as_str().unwrap().to_string()
            })
            .collect();
        assert_eq!(
            reads,
            [
                "power",
                "relative_humidity",
                "target_temperature",
                "temperature",
                "poweroff_time",
                "buzzer",
                "brightness",
                "child_lock"
            ]
        );
    }

    #[tokio::test]
    async fn poll_maps_raw_readings() {
        let heater = heater(
            FakeDevice::with_props(&basic_props("heat_on")),
            Capabilities::basic(),
        );
        heater.poll().await.unwrap();

        assert_eq!(heater.hvac_mode(), Some(HvacMode::Heat));
        assert_eq!(heater.target_temperature(), Some(22.0));
        assert_eq!(heater.current_temperature(), Some(21.0));
        assert_eq!(heater.humidity(), Some(45.0));
        assert!(heater.is_on());
        assert_eq!(heater.buzzer(), None);
    }

    #[tokio::test]
    async fn poll_off_power_means_off_mode() {
        let heater = heater(
            FakeDevice::with_props(&basic_props("off")),
            Capabilities::basic(),
        );
        heater.poll().await.unwrap();
        assert_eq!(heater.hvac_mode(), Some(HvacMode::Off));
        assert_eq!(heater.attributes()["hvac_mode"], json!("off"));
    }

    #[tokio::test]
    async fn failed_poll_keeps_previous_state() {
        let heater = heater(
            FakeDevice::with_props(&basic_props("on")),
            Capabilities::basic(),
        );
        heater.poll().await.unwrap();
        let before = heater.state();

        heater.device().props.lock()[0].1 = json!("off");
        heater.device().failures.lock().push_back("temperature");

        let err = heater.poll().await.unwrap_err();
        assert!(matches!(err, Error::NotReady { .. }));
        assert_eq!(heater.state(), before);
        assert_eq!(heater.hvac_mode(), Some(HvacMode::Heat));
    }

    #[tokio::test]
    async fn missing_reply_is_not_ready() {
        let heater = heater(
            FakeDevice::with_props(&basic_props("on")[..3]),
            Capabilities::basic(),
        );
        let err = heater.poll().await.unwrap_err();
        assert!(matches!(err, Error::NotReady { reason, .. } if reason.contains("temperature")));
        assert_eq!(heater.hvac_mode(), None);
    }

    #[tokio::test]
    async fn poll_publishes_only_on_change() {
        let heater = heater(
            FakeDevice::with_props(&basic_props("on")),
            Capabilities::basic(),
        );
        let mut events = heater.subscribe();

        heater.poll().await.unwrap();
        heater.poll().await.unwrap();

        assert!(matches!(
            events.try_recv().unwrap(),
            HeaterEvent::StateChanged { .. }
        ));
        assert!(events.try_recv().is_err());
    }

    #[tokio::test]
    async fn poll_failure_publishes_event() {
        let heater = heater(
            FakeDevice::with_props(&basic_props("on")).fail_on("power"),
            Capabilities::basic(),
        );
        let mut events = heater.subscribe();

        assert!(heater.poll().await.is_err());
        assert!(matches!(
            events.try_recv().unwrap(),
            HeaterEvent::PollFailed { .. }
        ));
    }

    #[tokio::test]
    async fn set_temperature_none_sends_nothing() {
        let heater = heater(FakeDevice::default(), Capabilities::basic());
        heater.set_temperature(None).await.unwrap();
        assert!(heater.device().sent().is_empty());
    }

    #[tokio::test]
    async fn set_temperature_truncates() {
        let heater = heater(FakeDevice::default(), Capabilities::basic());
        heater.set_temperature(Some(23.9)).await.unwrap();
        assert_eq!(
            heater.device().sent(),
            vec![("set_target_temperature".to_string(), vec![json!(23)])]
        );
    }

    #[tokio::test]
    async fn set_temperature_rejects_non_finite() {
        let heater = heater(FakeDevice::default(), Capabilities::basic());
        for t in [f64::NAN, f64::INFINITY, f64::NEG_INFINITY] {
            let err = heater.set_temperature(Some(t)).await.unwrap_err();
            assert!(matches!(
                err,
                Error::Value(ValueError::InvalidTemperature(_))
            ));
        }
        assert!(heater.device().sent().is_empty());
    }

    #[tokio::test]
    async fn malformed_reply_is_kept_raw() {
        let mut props = basic_props("on");
        props[1].1 = Value::Null;
        let heater = heater(FakeDevice::with_props(&props), Capabilities::basic());

        heater.poll().await.unwrap();

        assert_eq!(heater.humidity(), None);
        assert_eq!(heater.attributes()["humidity"], Value::Null);
        assert_eq!(heater.hvac_mode(), Some(HvacMode::Heat));
    }

    #[tokio::test]
    async fn set_hvac_mode_maps_to_power() {
        let heater = heater(FakeDevice::default(), Capabilities::basic());
        heater.set_hvac_mode("heat").await.unwrap();
        heater.set_hvac_mode("off").await.unwrap();
        assert_eq!(
            heater.device().sent(),
            vec![
                ("set_power".to_string(), vec![json!("on")]),
                ("set_power".to_string(), vec![json!("off")]),
            ]
        );
    }

    #[tokio::test]
    async fn set_hvac_mode_ignores_unknown_mode() {
        let heater = heater(FakeDevice::default(), Capabilities::basic());
        heater.set_hvac_mode("cool").await.unwrap();
        assert!(heater.device().sent().is_empty());
    }

    #[tokio::test]
    async fn extended_setters_forward_one_command() {
        let heater = heater(FakeDevice::default(), Capabilities::extended());
        heater.set_buzzer(Some(Switch::Off)).await.unwrap();
        heater.set_brightness(Some(Brightness::DIM)).await.unwrap();
        heater
            .set_poweroff_time(Some(PoweroffTime::new(3600).unwrap()))
            .await
            .unwrap();
        heater.set_child_lock(Some(Switch::On)).await.unwrap();

        assert_eq!(
            heater.device().setter_calls(),
            vec![
                ("set_buzzer".to_string(), vec![json!("off")]),
                ("set_brightness".to_string(), vec![json!(1)]),
                ("set_poweroff_time".to_string(), vec![json!(3600)]),
                ("set_child_lock".to_string(), vec![json!("on")]),
            ]
        );
    }

    #[tokio::test]
    async fn extended_setters_without_value_send_nothing() {
        let heater = heater(FakeDevice::default(), Capabilities::extended());
        heater.set_buzzer(None).await.unwrap();
        heater.set_brightness(None).await.unwrap();
        heater.set_poweroff_time(None).await.unwrap();
        heater.set_child_lock(None).await.unwrap();
        assert!(heater.device().sent().is_empty());
    }

    #[tokio::test]
    async fn basic_heater_rejects_extended_setters() {
        let heater = heater(FakeDevice::default(), Capabilities::basic());
        let err = heater
            .set_brightness(Some(Brightness::OFF))
            .await
            .unwrap_err();
        assert!(matches!(err, Error::CapabilityNotSupported("brightness")));
        assert!(heater.device().sent().is_empty());
    }

    #[test]
    fn thermostat_constants() {
        let heater = heater(FakeDevice::default(), Capabilities::basic());
        assert!((heater.min_temp() - 16.0).abs() < f64::EPSILON);
        assert!((heater.max_temp() - 32.0).abs() < f64::EPSILON);
        assert!((heater.target_temperature_step() - 1.0).abs() < f64::EPSILON);
        assert_eq!(heater.hvac_modes(), &[HvacMode::Heat, HvacMode::Off]);
        assert_eq!(heater.temperature_unit(), "°C");
    }
}
