// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Entity identifier type.

use std::fmt;

use crate::error::ValueError;

/// Host-visible identifier of a heater entity, e.g. `climate.zhimi_heater_za1_28_6c`.
///
/// # Examples
///
/// ```
/// use miheater_lib::event::EntityId;
///
/// let id = EntityId::from_unique_id("zhimi.heater.za1-28:6C:07:AA:BB:CC");
/// assert_eq!(id.as_str(), "climate.zhimi_heater_za1_28_6c_07_aa_bb_cc");
///
/// assert!(EntityId::parse("climate.bedroom").is_ok());
/// assert!(EntityId::parse("light.bedroom").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, serde::Serialize, serde::Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct EntityId(String);

impl EntityId {
    /// Entity domain of every heater.
    pub const DOMAIN: &'static str = "climate";

    /// Derives the entity id from a device unique id.
    #[must_use]
    pub fn from_unique_id(unique_id: &str) -> Self {
        Self(format!("{}.{}", Self::DOMAIN, slugify(unique_id)))
    }

    /// Parses an entity id supplied by the host.
    ///
    /// # Errors
    ///
    /// Returns `ValueError::InvalidEntityId` unless the id is
    /// `climate.<object_id>` with a non-empty object id.
    pub fn parse(raw: &str) -> Result<Self, ValueError> {
        match raw.split_once('.') {
            Some((Self::DOMAIN, object_id)) if !object_id.is_empty() => Ok(Self(raw.to_string())),
            _ => Err(ValueError::InvalidEntityId(raw.to_string())),
        }
    }

    /// Returns this id with a numeric suffix, used when the plain id is taken.
    #[must_use]
    pub fn with_suffix(&self, n: usize) -> Self {
        Self(format!("{}_{n}", self.0))
    }

    /// Returns the part after `climate.`.
    #[must_use]
    pub fn object_id(&self) -> &str {
        &self.0[Self::DOMAIN.len() + 1..]
    }

    /// Returns the full id.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for EntityId {
    type Error = ValueError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<EntityId> for String {
    fn from(id: EntityId) -> Self {
        id.0
    }
}

// Lowercase ASCII alphanumerics joined by single underscores.
fn slugify(text: &str) -> String {
    let mut slug = String::with_capacity(text.len());
    for c in text.chars() {
        if c.is_ascii_alphanumeric() {
            slug.push(c.to_ascii_lowercase());
        } else if !slug.is_empty() && !slug.ends_with('_') {
            slug.push('_');
        }
    }
    while slug.ends_with('_') {
        slug.pop();
    }
    if slug.is_empty() {
        slug.push_str("unknown");
    }
    slug
}
