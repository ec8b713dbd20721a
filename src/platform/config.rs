// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Platform configuration.

use std::fmt;

use serde::Deserialize;

use crate::capabilities::Capabilities;
use crate::error::ConfigError;

/// Length of a miIO device token in hexadecimal characters.
const TOKEN_LEN: usize = 32;

/// Number of token characters that may appear in logs.
const TOKEN_LOG_PREFIX: usize = 5;

/// Configuration of one heater platform entry.
///
/// # Examples
///
/// ```
/// use miheater_lib::platform::PlatformConfig;
///
/// let config = PlatformConfig::from_json(r#"{
///     "host": "192.168.1.40",
///     "name": "Bedroom heater",
///     "token": "0123456789abcdef0123456789abcdef"
/// }"#).unwrap();
///
/// assert!(config.validate().is_ok());
/// assert!(!format!("{config:?}").contains("0123456789abcdef0123456789abcdef"));
/// ```
#[derive(Clone, Deserialize)]
pub struct PlatformConfig {
    /// Device IP address or hostname.
    pub host: String,
    /// Display name of the entity.
    pub name: String,
    /// 32-character hexadecimal device token.
    pub token: String,
    /// Heater feature set; the extended variant when omitted.
    #[serde(default)]
    pub capabilities: Option<Capabilities>,
}

impl PlatformConfig {
    /// Creates a configuration with the extended feature set.
    #[must_use]
    pub fn new(
        host: impl Into<String>,
        name: impl Into<String>,
        token: impl Into<String>,
    ) -> Self {
        Self {
            host: host.into(),
            name: name.into(),
            token: token.into(),
            capabilities: None,
        }
    }

    /// Parses a configuration from a JSON document.
    ///
    /// The result is not validated; call [`validate`](Self::validate).
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Malformed` if the document is not valid JSON or
    /// a required field is absent.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        serde_json::from_str(json).map_err(|e| ConfigError::Malformed(e.to_string()))
    }

    /// Sets the heater feature set.
    #[must_use]
    pub fn with_capabilities(mut self, capabilities: Capabilities) -> Self {
        self.capabilities = Some(capabilities);
        self
    }

    /// Sets the display name.
    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Checks that every field is present and the token is well formed.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::MissingField` for an empty field and
    /// `ConfigError::InvalidToken` for a token that is not 32 hex digits.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.host.trim().is_empty() {
            return Err(ConfigError::MissingField("host"));
        }
        if self.name.trim().is_empty() {
            return Err(ConfigError::MissingField("name"));
        }
        if self.token.is_empty() {
            return Err(ConfigError::MissingField("token"));
        }
        if self.token.len() != TOKEN_LEN || !self.token.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(ConfigError::InvalidToken);
        }
        Ok(())
    }

    /// Effective feature set.
    #[must_use]
    pub fn capabilities(&self) -> Capabilities {
        self.capabilities.unwrap_or_default()
    }

    /// The leading characters of the token, safe to log.
    #[must_use]
    pub fn token_prefix(&self) -> &str {
        let end = self
            .token
            .char_indices()
            .nth(TOKEN_LOG_PREFIX)
            .map_or(self.token.len(), |(i, _)| i);
        &self.token[..end]
    }
}

impl fmt::Debug for PlatformConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PlatformConfig")
            .field("host", &self.host)
            .field("name", &self.name)
            .field("token", &format_args!("{}...", self.token_prefix()))
            .field("capabilities", &self.capabilities)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TOKEN: &str = "0123456789abcdef0123456789ABCDEF";

    #[test]
    fn valid_config() {
        let config = PlatformConfig::new("192.168.1.40", "Heater", TOKEN);
        assert!(config.validate().is_ok());
        assert_eq!(config.capabilities(), Capabilities::extended());
    }

    #[test]
    fn empty_fields_are_missing() {
        let config = PlatformConfig::new("", "Heater", TOKEN);
        assert_eq!(config.validate(), Err(ConfigError::MissingField("host")));

        let config = PlatformConfig::new("10.0.0.2", " ", TOKEN);
        assert_eq!(config.validate(), Err(ConfigError::MissingField("name")));

        let config = PlatformConfig::new("10.0.0.2", "Heater", "");
        assert_eq!(config.validate(), Err(ConfigError::MissingField("token")));
    }

    #[test]
    fn token_must_be_hex() {
        let config = PlatformConfig::new("10.0.0.2", "Heater", "abc");
        assert_eq!(config.validate(), Err(ConfigError::InvalidToken));

        let config = PlatformConfig::new("10.0.0.2", "Heater", "z".repeat(32));
        assert_eq!(config.validate(), Err(ConfigError::InvalidToken));
    }

    #[test]
    fn from_json_with_capabilities() {
        let config = PlatformConfig::from_json(
            r#"{
                "host": "10.0.0.2",
                "name": "Office",
                "token": "0123456789abcdef0123456789abcdef",
                "capabilities": {
                    "poweroff_timer": false,
                    "buzzer": false,
                    "brightness": false,
                    "child_lock": false
                }
            }"#,
        )
        .unwrap();
        assert_eq!(config.capabilities(), Capabilities::basic());
    }

    #[test]
    fn from_json_missing_field_is_malformed() {
        let err = PlatformConfig::from_json(r#"{"host": "10.0.0.2"}"#).unwrap_err();
        assert!(matches!(err, ConfigError::Malformed(_)));
    }

    #[test]
    fn debug_shows_token_prefix_only() {
        let config = PlatformConfig::new("10.0.0.2", "Heater", TOKEN);
        let debug = format!("{config:?}");
        assert!(debug.contains("01234..."));
        assert!(!debug.contains(TOKEN));
        assert_eq!(config.token_prefix(), "01234");
    }

    #[test]
    fn short_token_prefix() {
        let config = PlatformConfig::new("10.0.0.2", "Heater", "ab");
        assert_eq!(config.token_prefix(), "ab");
    }
}
