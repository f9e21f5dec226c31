// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Switch command repeat count.

use std::fmt;
use std::num::NonZeroU32;

use serde::Deserialize;

use crate::error::ConfigError;

/// Number of times a switch command is sent to an outlet.
///
/// Outlet relays sometimes ignore the first command they receive, so
/// [`CloudSession::turn_on`](crate::CloudSession::turn_on) and
/// [`CloudSession::turn_off`](crate::CloudSession::turn_off) send the same
/// command a fixed number of times without looking at the intermediate
/// responses. The count is always at least 1.
///
/// # Examples
///
/// ```
/// use vesync_outlet::types::Repeat;
///
/// assert_eq!(Repeat::default().get(), 2);
/// assert_eq!(Repeat::new(3).unwrap().get(), 3);
/// assert!(Repeat::new(0).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(try_from = "u32")]
pub struct Repeat(NonZeroU32);

impl Repeat {
    /// Default repeat count.
    pub const DEFAULT: Self = Self(NonZeroU32::new(2).unwrap());

    /// A single send.
    pub const ONCE: Self = Self(NonZeroU32::MIN);

    /// Creates a repeat count.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::ZeroRepeat` if `count` is 0.
    pub fn new(count: u32) -> Result<Self, ConfigError> {
        NonZeroU32::new(count)
            .map(Self)
            .ok_or(ConfigError::ZeroRepeat)
    }

    /// Returns the count.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0.get()
    }
}

impl Default for Repeat {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl TryFrom<u32> for Repeat {
    type Error = ConfigError;

    fn try_from(count: u32) -> Result<Self, Self::Error> {
        Self::new(count)
    }
}

impl fmt::Display for Repeat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
