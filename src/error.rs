// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Error types for the `miheater` library.
//!
//! The device proxy reports a single kind of failure, [`DeviceError`]. The
//! heater adapter collapses it into [`Error::NotReady`] while polling and
//! [`Error::PlatformNotReady`] during setup, so the host can retry later.
//! Setter calls let it through untouched as [`Error::Device`].

use thiserror::Error;

/// The main error type for this library.
#[derive(Debug, Error)]
pub enum Error {
    /// Error occurred during value validation.
    #[error("value error: {0}")]
    Value(#[from] ValueError),

    /// The device proxy failed to complete a request.
    #[error("device error: {0}")]
    Device(#[from] DeviceError),

    /// A device reply could not be interpreted.
    #[error("parse error: {0}")]
    Parse(#[from] ParseError),

    /// Platform configuration is invalid.
    #[error("config error: {0}")]
    Config(#[from] ConfigError),

    /// A poll was aborted; the entity keeps its previous state.
    #[error("heater {entity_id} is not ready: {reason}")]
    NotReady {
        /// The entity whose refresh failed.
        entity_id: String,
        /// Description of the underlying failure.
        reason: String,
    },

    /// Setup could not reach the device; the host should retry setup later.
    #[error("platform for {host} is not ready: {reason}")]
    PlatformNotReady {
        /// The configured device host.
        host: String,
        /// Description of the underlying failure.
        reason: String,
    },

    /// No heater is registered under the requested id.
    #[error("entity not found: {0}")]
    EntityNotFound(String),

    /// The heater variant does not expose the requested feature.
    #[error("heater does not support {0}")]
    CapabilityNotSupported(&'static str),
}

/// Errors related to value validation and constraints.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValueError {
    /// A numeric value is outside the allowed range.
    #[error("value {actual} is out of range [{min}, {max}]")]
    OutOfRange {
        /// Minimum allowed value.
        min: u32,
        /// Maximum allowed value.
        max: u32,
        /// The actual value that was provided.
        actual: u64,
    },

    /// An hvac mode other than `heat` or `off`.
    #[error("invalid hvac mode: {0}")]
    InvalidHvacMode(String),

    /// A temperature that is NaN or infinite.
    #[error("invalid temperature: {0}")]
    InvalidTemperature(String),

    /// A switch value other than `on` or `off`.
    #[error("invalid switch value: {0}")]
    InvalidSwitch(String),

    /// A service parameter is missing or has the wrong type.
    #[error("invalid service parameter {field}: {message}")]
    InvalidParameter {
        /// The parameter name.
        field: &'static str,
        /// What was wrong with it.
        message: String,
    },

    /// The service name is not registered.
    #[error("unknown service: {0}")]
    UnknownService(String),

    /// An entity id without the `climate.` domain or with an empty object id.
    #[error("invalid entity id: {0}")]
    InvalidEntityId(String),
}

/// Failures reported by the device proxy.
///
/// The variants exist for diagnostics only; every caller in this crate treats
/// them the same way.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DeviceError {
    /// The device did not answer in time.
    #[error("request timed out: {0}")]
    Timeout(String),

    /// The device could not be reached at all.
    #[error("device unreachable: {0}")]
    Unreachable(String),

    /// The device answered with an error payload.
    #[error("command rejected: {0}")]
    Rejected(String),

    /// The reply could not be decoded by the transport.
    #[error("invalid response: {0}")]
    InvalidResponse(String),
}

/// Errors related to interpreting device replies.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// The device returned an empty reply for a property.
    #[error("missing value for property: {0}")]
    MissingValue(String),

    /// A property value has the wrong shape.
    #[error("failed to parse {field}: {message}")]
    InvalidValue {
        /// The property that failed to parse.
        field: String,
        /// Description of the parsing failure.
        message: String,
    },
}

/// Errors related to platform configuration.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// A required field is missing or empty.
    #[error("missing required field: {0}")]
    MissingField(&'static str),

    /// The token is not 32 hexadecimal characters.
    #[error("token must be 32 hexadecimal characters")]
    InvalidToken,

    /// The configuration document could not be parsed.
    #[error("malformed configuration: {0}")]
    Malformed(String),
}

/// A specialized Result type for this library.
pub type Result<T> = std::result::Result<T, Error>;
