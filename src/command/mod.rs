// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! VeSync cloud API command definitions.
//!
//! Every call the library makes is described by a typed command that knows
//! its endpoint and JSON body.
//!
//! # Available Commands
//!
//! | Command Type | Endpoint | Purpose |
//! |-------------|----------|---------|
//! | [`LoginRequest`] | `POST /login` | Exchange credentials for a token |
//! | [`LoadDevicesCommand`] | `POST /loadMain` | List devices on the account |
//! | [`SwitchCommand`] | `POST /devRequest` | Open or break an outlet relay |
//!
//! # Examples
//!
//! ```
//! use vesync_outlet::command::{Command, Endpoint, SwitchCommand};
//! use vesync_outlet::types::PowerState;
//!
//! let cmd = SwitchCommand::new("0a1b", PowerState::On);
//! assert_eq!(cmd.endpoint(), Endpoint::DevRequest);
//! assert_eq!(
//!     cmd.body(),
//!     Some(serde_json::json!({"cid": "0a1b", "uri": "/relay", "action": "open"}))
//! );
//! ```

mod login;
mod switch;

pub use login::LoginRequest;
pub use switch::{RELAY_URI, SwitchCommand};

use std::fmt;

use reqwest::Method;
use serde_json::Value;

/// Endpoints of the VeSync cloud API used by this library.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Endpoint {
    /// Credential exchange.
    Login,
    /// Device list.
    LoadMain,
    /// Generic device command.
    DevRequest,
}

impl Endpoint {
    /// Returns the path appended to the base URL.
    #[must_use]
    pub const fn path(&self) -> &'static str {
        match self {
            Self::Login => "/login",
            Self::LoadMain => "/loadMain",
            Self::DevRequest => "/devRequest",
        }
    }

    /// Returns the HTTP method the endpoint expects.
    #[must_use]
    pub fn method(&self) -> Method {
        match self {
            Self::Login | Self::LoadMain | Self::DevRequest => Method::POST,
        }
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path())
    }
}

/// A request that can be sent to the VeSync cloud API.
pub trait Command {
    /// Returns the endpoint this command targets.
    fn endpoint(&self) -> Endpoint;

    /// Returns the JSON body, if the command carries one.
    fn body(&self) -> Option<Value>;
}

/// Lists every device registered on the account.
///
/// The provider expects an empty body; filtering by device type happens
/// client side.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LoadDevicesCommand;

impl Command for LoadDevicesCommand {
    fn endpoint(&self) -> Endpoint {
        Endpoint::LoadMain
    }

    fn body(&self) -> Option<Value> {
        None
    }
}
