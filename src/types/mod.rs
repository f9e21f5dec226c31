// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Value types for VeSync outlet control.
//!
//! # Types
//!
//! - [`DeviceId`] - Opaque cloud identifier (`cid`) of a device
//! - [`PowerState`] - Desired On/Off state of an outlet
//! - [`RelayAction`] - Provider verb applied to the outlet relay
//! - [`Repeat`] - How many times a switch command is sent (at least 1)

mod device_id;
mod power;
mod repeat;

pub use device_id::DeviceId;
pub use power::{PowerState, RelayAction};
pub use repeat::Repeat;
