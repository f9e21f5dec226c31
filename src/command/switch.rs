// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Outlet relay switch command.

use serde_json::{Value, json};

use crate::command::{Command, Endpoint};
use crate::types::{DeviceId, PowerState, RelayAction};

/// Device resource addressed by outlet switch commands.
pub const RELAY_URI: &str = "/relay";

/// Command to open (on) or break (off) an outlet relay.
///
/// # Examples
///
/// ```
/// use vesync_outlet::command::SwitchCommand;
/// use vesync_outlet::types::{PowerState, RelayAction};
///
/// let on = SwitchCommand::on("0a1b");
/// assert_eq!(on.action(), RelayAction::Open);
///
/// let off = SwitchCommand::new("0a1b", PowerState::Off);
/// assert_eq!(off.action(), RelayAction::Break);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SwitchCommand {
    device: DeviceId,
    action: RelayAction,
}

impl SwitchCommand {
    /// Creates a command driving `device` into `state`.
    #[must_use]
    pub fn new(device: impl Into<DeviceId>, state: PowerState) -> Self {
        Self {
            device: device.into(),
            action: state.relay_action(),
        }
    }

    /// Creates a command to switch an outlet on.
    #[must_use]
    pub fn on(device: impl Into<DeviceId>) -> Self {
        Self::new(device, PowerState::On)
    }

    /// Creates a command to switch an outlet off.
    #[must_use]
    pub fn off(device: impl Into<DeviceId>) -> Self {
        Self::new(device, PowerState::Off)
    }

    /// Returns the target device.
    #[must_use]
    pub fn device(&self) -> &DeviceId {
        &self.device
    }

    /// Returns the relay verb.
    #[must_use]
    pub fn action(&self) -> RelayAction {
        self.action
    }
}

impl Command for SwitchCommand {
    fn endpoint(&self) -> Endpoint {
        Endpoint::DevRequest
    }

    fn body(&self) -> Option<Value> {
        Some(json!({
            "cid": self.device.as_str(),
            "uri": RELAY_URI,
            "action": self.action.as_str(),
        }))
    }
}
