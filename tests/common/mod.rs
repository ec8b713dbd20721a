// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! In-memory heater double shared by the integration tests.

#![allow(dead_code)]

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use miheater_lib::{DeviceError, DeviceInfo, MiioDevice};
use parking_lot::Mutex;
use serde_json::{Value, json};

pub const TOKEN: &str = "0123456789abcdef0123456789abcdef";

#[derive(Debug, Default)]
struct Inner {
    info: Option<DeviceInfo>,
    props: HashMap<String, Value>,
    failing: HashSet<String>,
    offline: bool,
    sent: Vec<(String, Vec<Value>)>,
}

/// Answers `get_prop` from a property table and records every call.
///
/// Clones share state, so a test can keep a handle after the heater takes
/// ownership of the device.
#[derive(Debug, Clone, Default)]
pub struct MockHeater {
    inner: Arc<Mutex<Inner>>,
}

impl MockHeater {
    /// An extended heater, on, 22 °C target, 21 °C measured, 45 % humidity.
    pub fn new(mac: &str) -> Self {
        let mock = Self::default();
        {
            let mut inner = mock.inner.lock();
            inner.info = Some(
                DeviceInfo::new("zhimi.heater.za1", mac).with_versions("2.1.3", "ESP8266"),
            );
            for (name, value) in [
                ("power", json!("on")),
                ("relative_humidity", json!(45)),
                ("target_temperature", json!(22)),
                ("temperature", json!(21)),
                ("poweroff_time", json!(0)),
                ("buzzer", json!("on")),
                ("brightness", json!(0)),
                ("child_lock", json!("off")),
            ] {
                inner.props.insert(name.to_string(), value);
            }
        }
        mock
    }

    pub fn set_prop(&self, name: &str, value: Value) {
        self.inner.lock().props.insert(name.to_string(), value);
    }

    pub fn fail_prop(&self, name: &str) {
        self.inner.lock().failing.insert(name.to_string());
    }

    pub fn set_offline(&self, offline: bool) {
        self.inner.lock().offline = offline;
    }

    pub fn sent(&self) -> Vec<(String, Vec<Value>)> {
        self.inner.lock().sent.clone()
    }

    /// Calls other than `get_prop`.
    pub fn commands(&self) -> Vec<(String, Vec<Value>)> {
        self.sent()
            .into_iter()
            .filter(|(method, _)| method != "get_prop")
            .collect()
    }

    pub fn clear_sent(&self) {
        self.inner.lock().sent.clear();
    }
}

impl MiioDevice for MockHeater {
    async fn info(&self) -> Result<DeviceInfo, DeviceError> {
        let inner = self.inner.lock();
        if inner.offline {
            return Err(DeviceError::Unreachable("no route to host".to_string()));
        }
        inner
            .info
            .clone()
            .ok_or_else(|| DeviceError::InvalidResponse("no info".to_string()))
    }

    async fn send(&self, method: &str, params: &[Value]) -> Result<Vec<Value>, DeviceError> {
        let mut inner = self.inner.lock();
        inner.sent.push((method.to_string(), params.to_vec()));
        if inner.offline {
            return Err(DeviceError::Timeout(method.to_string()));
        }
        if method != "get_prop" {
            return Ok(vec![json!("ok")]);
        }

        let name = params.first().and_then(Value::as_str).unwrap_or_default();
        if inner.failing.contains(name) {
            return Err(DeviceError::Rejected(format!("cannot read {name}")));
        }
        Ok(inner.props.get(name).cloned().into_iter().collect())
    }
}
