// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Power-related types for VeSync outlets.
//!
//! A desired [`PowerState`] is what callers ask for; a [`RelayAction`] is
//! the verb the cloud API expects on the outlet's relay resource.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Represents the desired power state of an outlet.
///
/// # Examples
///
/// ```
/// use vesync_outlet::types::{PowerState, RelayAction};
///
/// assert_eq!(PowerState::On.as_str(), "ON");
/// assert_eq!(PowerState::On.relay_action(), RelayAction::Open);
/// assert_eq!(PowerState::from(false), PowerState::Off);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PowerState {
    /// Power is off.
    Off,
    /// Power is on.
    On,
}

impl PowerState {
    /// Returns the string representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Off => "OFF",
            Self::On => "ON",
        }
    }

    /// Returns the relay verb that drives the outlet into this state.
    #[must_use]
    pub const fn relay_action(&self) -> RelayAction {
        match self {
            Self::On => RelayAction::Open,
            Self::Off => RelayAction::Break,
        }
    }
}

impl fmt::Display for PowerState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<bool> for PowerState {
    fn from(value: bool) -> Self {
        if value { Self::On } else { Self::Off }
    }
}

/// Verb applied to the `/relay` resource of an outlet.
///
/// The cloud API names closing the circuit `open` and cutting it `break`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RelayAction {
    /// Switch the outlet on.
    Open,
    /// Switch the outlet off.
    Break,
}

impl RelayAction {
    /// Returns the wire representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Open => "open",
            Self::Break => "break",
        }
    }
}

impl fmt::Display for RelayAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<PowerState> for RelayAction {
    fn from(state: PowerState) -> Self {
        state.relay_action()
    }
}
