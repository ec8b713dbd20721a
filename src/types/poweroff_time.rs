// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Power-off timer of the heater.

use std::fmt;
use std::time::Duration;

use crate::error::ValueError;

/// Delay before the heater powers itself off, in seconds (0-28800).
///
/// Zero means the timer is disabled. The device counts the value down, so a
/// polled reading is the time remaining.
///
/// # Examples
///
/// ```
/// use miheater_lib::types::PoweroffTime;
///
/// let hour = PoweroffTime::new(3600).unwrap();
/// assert_eq!(hour.seconds(), 3600);
/// assert!(!hour.is_disabled());
///
/// assert!(PoweroffTime::DISABLED.is_disabled());
/// assert!(PoweroffTime::new(28_801).is_err());
/// ```
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
pub struct PoweroffTime(u32);

impl PoweroffTime {
    /// Longest accepted delay (8 hours).
    pub const MAX: u32 = 28_800;

    /// Timer disabled.
    pub const DISABLED: Self = Self(0);

    /// Creates a new power-off delay.
    ///
    /// # Errors
    ///
    /// Returns `ValueError::OutOfRange` if seconds exceeds 28800.
    pub fn new(seconds: u32) -> Result<Self, ValueError> {
        if seconds > Self::MAX {
            return Err(ValueError::OutOfRange {
                min: 0,
                max: Self::MAX,
                actual: u64::from(seconds),
            });
        }
        Ok(Self(seconds))
    }

    /// Returns the delay in seconds.
    #[must_use]
    pub const fn seconds(&self) -> u32 {
        self.0
    }

    /// Returns `true` if no power-off is scheduled.
    #[must_use]
    pub const fn is_disabled(&self) -> bool {
        self.0 == 0
    }

    /// Returns the delay as a [`Duration`].
    #[must_use]
    pub fn as_duration(&self) -> Duration {
        Duration::from_secs(u64::from(self.0))
    }
}

impl fmt::Display for PoweroffTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}s", self.0)
    }
}

impl TryFrom<u64> for PoweroffTime {
    type Error = ValueError;

    fn try_from(value: u64) -> Result<Self, Self::Error> {
        let narrowed = u32::try_from(value).map_err(|_| ValueError::OutOfRange {
            min: 0,
            max: Self::MAX,
            actual: value,
        })?;
        Self::new(narrowed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn poweroff_time_bounds() {
        assert!(PoweroffTime::new(0).is_ok());
        assert!(PoweroffTime::new(28_800).is_ok());
        assert!(PoweroffTime::new(28_801).is_err());
    }

    #[test]
    fn poweroff_time_as_duration() {
        let t = PoweroffTime::new(90).unwrap();
        assert_eq!(t.as_duration(), Duration::from_secs(90));
    }

    #[test]
    fn poweroff_time_display() {
        assert_eq!(PoweroffTime::new(60).unwrap().to_string(), "60s");
    }

    #[test]
    fn poweroff_time_try_from_overflow() {
        assert!(PoweroffTime::try_from(u64::MAX).is_err());
    }
}
