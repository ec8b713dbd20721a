// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Display brightness of the heater panel.

use std::fmt;

use crate::error::ValueError;

/// Panel brightness level (0-2).
///
/// The heater firmware counts down: 0 is the brightest setting and 2 turns
/// the display off.
///
/// # Examples
///
/// ```
/// use miheater_lib::types::Brightness;
///
/// let dim = Brightness::new(1).unwrap();
/// assert_eq!(dim, Brightness::DIM);
/// assert_eq!(dim.value(), 1);
///
/// assert!(Brightness::new(3).is_err());
/// ```
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
pub struct Brightness(u8);

impl Brightness {
    /// Full brightness.
    pub const BRIGHT: Self = Self(0);

    /// Reduced brightness.
    pub const DIM: Self = Self(1);

    /// Display off.
    pub const OFF: Self = Self(2);

    /// Highest accepted raw value.
    pub const MAX: u8 = 2;

    /// Creates a new brightness level.
    ///
    /// # Errors
    ///
    /// Returns `ValueError::OutOfRange` if value exceeds 2.
    pub fn new(value: u8) -> Result<Self, ValueError> {
        if value > Self::MAX {
            return Err(ValueError::OutOfRange {
                min: 0,
                max: u32::from(Self::MAX),
                actual: u64::from(value),
            });
        }
        Ok(Self(value))
    }

    /// Returns the raw level.
    #[must_use]
    pub const fn value(&self) -> u8 {
        self.0
    }
}

impl fmt::Display for Brightness {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<u64> for Brightness {
    type Error = ValueError;

    fn try_from(value: u64) -> Result<Self, Self::Error> {
        let narrowed = u8::try_from(value).map_err(|_| ValueError::OutOfRange {
            min: 0,
            max: u32::from(Self::MAX),
            actual: value,
        })?;
        Self::new(narrowed)
    }
}
