// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! `vesync_outlet` - A Rust library to control VeSync WiFi outlets.
//!
//! This library talks to the VeSync cloud API over HTTPS. It logs in with
//! the account credentials, lists the devices registered on the account and
//! switches outlets on or off. Devices are never contacted directly.
//!
//! # Supported Features
//!
//! - **Login**: token-based session, established once at construction
//! - **Device list**: every device on the account, filtered by type
//! - **Power control**: turn outlets on/off, with a configurable repeat count
//!
//! # Quick Start
//!
//! ```no_run
//! use vesync_outlet::CloudSession;
//!
//! #[tokio::main]
//! async fn main() -> vesync_outlet::Result<()> {
//!     let session = CloudSession::connect("me@example.com", "hunter2").await?;
//!
//!     let (outlets, response) = session.list_devices().await?;
//!     match outlets {
//!         Some(outlets) => {
//!             for outlet in &outlets {
//!                 println!("{} ({:?})", outlet.name().unwrap_or("?"), outlet.id());
//!             }
//!         }
//!         None => eprintln!("listing failed: HTTP {}", response.status_code()),
//!     }
//!
//!     let (data, _response) = session.turn_off("0a1b2c3d", None).await?;
//!     println!("{data:?}");
//!     Ok(())
//! }
//! ```
//!
//! ## Custom Endpoint and Repeat Count
//!
//! ```no_run
//! use vesync_outlet::{CloudSession, SessionConfig};
//! use vesync_outlet::types::Repeat;
//!
//! # async fn example() -> vesync_outlet::Result<()> {
//! let session = CloudSession::builder("me@example.com", "hunter2")
//!     .with_base_url(SessionConfig::SERVER2_BASE_URL)
//!     .with_repeats(Repeat::new(3)?)
//!     .connect()
//!     .await?;
//!
//! // Send the command once instead of the session default
//! session.turn_on("0a1b2c3d", Some(1)).await?;
//! # Ok(())
//! # }
//! ```

pub mod command;
pub mod config;
pub mod error;
pub mod protocol;
pub mod response;
pub mod session;
pub mod types;

pub use command::{Command, Endpoint, LoadDevicesCommand, LoginRequest, SwitchCommand};
pub use config::SessionConfig;
pub use error::{
    AuthenticationError, ConfigError, Error, ParseError, ProviderError, Result, TransportError,
};
pub use protocol::HttpClient;
pub use response::{ApiResponse, DeviceList, DeviceRecord, LoginResponse};
pub use session::{AuthHeaders, CloudSession, SessionBuilder};
pub use types::{DeviceId, PowerState, RelayAction, Repeat};
