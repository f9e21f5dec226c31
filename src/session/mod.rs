// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Authenticated session against the VeSync cloud API.
//!
//! A [`CloudSession`] only exists after a successful login: constructing one
//! performs the login, and any failure there is returned as an error with no
//! session attached. Every later call reuses the token obtained at login.
//!
//! # Error reporting
//!
//! - Login failures are [`Error::Authentication`].
//! - Transport failures (refused, DNS, TLS, timeout) are always
//!   [`Error::Transport`], on every call.
//! - Provider-side failures after login are *not* errors. Calls return a
//!   `(data, response)` pair whose `data` is `None`; inspect the raw
//!   [`ApiResponse`] for the details.
//!
//! ```no_run
//! use vesync_outlet::CloudSession;
//!
//! # async fn example() -> vesync_outlet::Result<()> {
//! let session = CloudSession::connect("me@example.com", "hunter2").await?;
//!
//! let (outlets, response) = session.list_devices().await?;
//! let Some(outlets) = outlets else {
//!     eprintln!("device list failed: HTTP {}", response.status_code());
//!     return Ok(());
//! };
//!
//! for id in outlets.iter().filter_map(|outlet| outlet.id()) {
//!     session.turn_on(id, None).await?;
//! }
//! # Ok(())
//! # }
//! ```

mod auth;
mod builder;

pub use auth::{ACCOUNT_ID_HEADER, AuthHeaders, ID_HEADER, TOKEN_HEADER};
pub use builder::SessionBuilder;

use reqwest::header::HeaderMap;
use reqwest::{Method, StatusCode};
use serde_json::Value;

use crate::command::{Command, LoadDevicesCommand, LoginRequest, SwitchCommand};
use crate::config::SessionConfig;
use crate::error::{AuthenticationError, Error, Result, TransportError};
use crate::protocol::HttpClient;
use crate::response::{ApiResponse, DEFAULT_DEVICE_FILTER, DeviceList, DeviceRecord, LoginResponse};
use crate::types::{DeviceId, PowerState, Repeat};

/// Logged-in session with the VeSync cloud API.
///
/// Cloning is cheap: clones share the underlying connection pool and the
/// immutable authentication headers.
#[derive(Debug, Clone)]
pub struct CloudSession {
    config: SessionConfig,
    client: HttpClient,
    auth: AuthHeaders,
}

impl CloudSession {
    /// Logs in with the default configuration.
    ///
    /// # Errors
    ///
    /// Returns error if:
    /// - A credential is empty
    /// - The login request cannot be sent
    /// - The provider rejects the login
    pub async fn connect(username: impl Into<String>, password: impl Into<String>) -> Result<Self> {
        Self::builder(username, password).connect().await
    }

    /// Creates a builder to configure the session before logging in.
    #[must_use]
    pub fn builder(username: impl Into<String>, password: impl Into<String>) -> SessionBuilder {
        SessionBuilder::new(username, password)
    }

    /// Validates the configuration, logs in and returns the session.
    pub(crate) async fn login(config: SessionConfig, credentials: LoginRequest) -> Result<Self> {
        config.validate()?;
        let client = HttpClient::new(&config)?;
        let auth = Self::authenticate(&client, &credentials).await?;

        tracing::info!(
            base_url = %config.base_url(),
            account_id = %auth.account_id(),
            "Logged in to VeSync"
        );

        Ok(Self {
            config,
            client,
            auth,
        })
    }

    /// Exchanges credentials for a token and account id.
    async fn authenticate(client: &HttpClient, credentials: &LoginRequest) -> Result<AuthHeaders> {
        let headers = credentials.headers()?;
        let response = client.send_command(credentials, &headers).await?;

        if response.status() != StatusCode::OK {
            tracing::warn!(status = response.status_code(), "VeSync login rejected");
            return Err(AuthenticationError::Rejected {
                status: response.status_code(),
                response: Box::new(response),
            }
            .into());
        }

        if let Some(indicator) = response.error_indicator().map(str::to_string) {
            tracing::warn!(error = %indicator, "VeSync login returned an error header");
            return Err(AuthenticationError::ErrorHeader {
                indicator,
                response: Box::new(response),
            }
            .into());
        }

        let login: LoginResponse = match response.json() {
            Ok(login) => login,
            Err(source) => {
                tracing::warn!(error = %source, "VeSync login body is not valid JSON");
                return Err(AuthenticationError::InvalidBody {
                    source,
                    response: Box::new(response),
                }
                .into());
            }
        };
        match (login.token(), login.account_id()) {
            (Some(token), Some(account_id)) => Ok(AuthHeaders::new(token, account_id)?),
            (None, _) => Err(missing_identity("tk", response)),
            (_, None) => Err(missing_identity("id", response)),
        }
    }

    /// Returns the session configuration.
    #[must_use]
    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    /// Returns the API endpoint in use.
    #[must_use]
    pub fn base_url(&self) -> &str {
        self.config.base_url()
    }

    /// Returns the default repeat count for switch commands.
    #[must_use]
    pub fn repeats(&self) -> Repeat {
        self.config.repeats()
    }

    /// Returns the account id obtained at login.
    #[must_use]
    pub fn account_id(&self) -> &str {
        self.auth.account_id()
    }

    /// Returns the identity obtained at login.
    #[must_use]
    pub fn auth(&self) -> &AuthHeaders {
        &self.auth
    }

    // ========== Transport ==========

    /// Sends an arbitrary request to the cloud API.
    ///
    /// `endpoint` is appended to the base URL. When `headers` is `None` or
    /// empty, the authentication headers from login are used. The response
    /// is returned as is, whatever its status; nothing is retried.
    ///
    /// # Errors
    ///
    /// Returns `TransportError` if no HTTP response was received.
    pub async fn send_request(
        &self,
        method: Method,
        endpoint: &str,
        body: Option<&Value>,
        headers: Option<&HeaderMap>,
    ) -> std::result::Result<ApiResponse, TransportError> {
        let headers = headers
            .filter(|h| !h.is_empty())
            .unwrap_or_else(|| self.auth.header_map());
        self.client.send(method, endpoint, body, headers).await
    }

    /// Sends a typed command with the authentication headers.
    ///
    /// # Errors
    ///
    /// Returns `TransportError` if no HTTP response was received.
    pub async fn send_command<C: Command + ?Sized>(
        &self,
        command: &C,
    ) -> std::result::Result<ApiResponse, TransportError> {
        self.client
            .send_command(command, self.auth.header_map())
            .await
    }

    // ========== Device List ==========

    /// Lists the WiFi outlets on the account.
    ///
    /// Same as [`list_devices_filtered`](Self::list_devices_filtered) with
    /// [`DEFAULT_DEVICE_FILTER`].
    ///
    /// # Errors
    ///
    /// Returns error only if the request cannot be sent.
    pub async fn list_devices(&self) -> Result<(Option<Vec<DeviceRecord>>, ApiResponse)> {
        self.list_devices_filtered(DEFAULT_DEVICE_FILTER).await
    }

    /// Lists every device on the account, whatever its type.
    ///
    /// # Errors
    ///
    /// Returns error only if the request cannot be sent.
    pub async fn list_all_devices(&self) -> Result<(Option<Vec<DeviceRecord>>, ApiResponse)> {
        self.list_devices_filtered(&[]).await
    }

    /// Lists the devices whose type is one of `filters`.
    ///
    /// Provider order is preserved. An empty `filters` returns every device.
    /// The first element is `None` when the provider reported a failure or
    /// the body holds no device list; the raw response tells why.
    ///
    /// # Errors
    ///
    /// Returns error only if the request cannot be sent.
    pub async fn list_devices_filtered(
        &self,
        filters: &[&str],
    ) -> Result<(Option<Vec<DeviceRecord>>, ApiResponse)> {
        let response = self.send_command(&LoadDevicesCommand).await?;

        if let Some(err) = response.provider_error() {
            tracing::warn!(error = %err, "Device list request failed");
            return Ok((None, response));
        }

        match response.json::<DeviceList>() {
            Ok(list) => {
                let devices = list.filter_types(filters);
                tracing::debug!(count = devices.len(), "Loaded device list");
                Ok((Some(devices), response))
            }
            Err(e) => {
                tracing::warn!(error = %e, "Device list response has no usable devices");
                Ok((None, response))
            }
        }
    }

    // ========== Power Control ==========

    /// Turns an outlet on.
    ///
    /// The command is sent `repeat` times (the session default when `None`).
    /// See [`set_power`](Self::set_power).
    ///
    /// # Errors
    ///
    /// Returns error if `repeat` is `Some(0)` or a request cannot be sent.
    pub async fn turn_on(
        &self,
        device: impl Into<DeviceId>,
        repeat: Option<u32>,
    ) -> Result<(Option<Value>, ApiResponse)> {
        self.set_power(device, PowerState::On, repeat).await
    }

    /// Turns an outlet off.
    ///
    /// The command is sent `repeat` times (the session default when `None`).
    /// See [`set_power`](Self::set_power).
    ///
    /// # Errors
    ///
    /// Returns error if `repeat` is `Some(0)` or a request cannot be sent.
    pub async fn turn_off(
        &self,
        device: impl Into<DeviceId>,
        repeat: Option<u32>,
    ) -> Result<(Option<Value>, ApiResponse)> {
        self.set_power(device, PowerState::Off, repeat).await
    }

    /// Drives an outlet into `state`.
    ///
    /// Outlet relays sometimes ignore a command, so the same command is sent
    /// `repeat` times in a row, unconditionally. Intermediate responses are
    /// discarded without being inspected; this is not an error-driven retry.
    ///
    /// Returns the parsed JSON body of the final response (`None` if the
    /// provider reported a failure or the body is not JSON) together with
    /// that response.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::ZeroRepeat` if `repeat` is `Some(0)`, and
    /// `TransportError` if any of the requests cannot be sent.
    pub async fn set_power(
        &self,
        device: impl Into<DeviceId>,
        state: PowerState,
        repeat: Option<u32>,
    ) -> Result<(Option<Value>, ApiResponse)> {
        let repeat = self.resolve_repeat(repeat)?;
        let device = device.into();

        let mut response = self.switch_outlet(&device, state).await?;
        for _ in 1..repeat.get() {
            response = self.switch_outlet(&device, state).await?;
        }

        if let Some(err) = response.provider_error() {
            tracing::warn!(device = %device, state = %state, error = %err, "Switch command failed");
            return Ok((None, response));
        }

        let data = response.json::<Value>().ok();
        Ok((data, response))
    }

    /// Sends one switch command.
    async fn switch_outlet(
        &self,
        device: &DeviceId,
        state: PowerState,
    ) -> std::result::Result<ApiResponse, TransportError> {
        let command = SwitchCommand::new(device, state);
        tracing::debug!(device = %device, action = %command.action(), "Sending switch command");
        self.send_command(&command).await
    }

    fn resolve_repeat(&self, repeat: Option<u32>) -> Result<Repeat> {
        match repeat {
            Some(count) => Ok(Repeat::new(count)?),
            None => Ok(self.config.repeats()),
        }
    }
}

fn missing_identity(field: &'static str, response: ApiResponse) -> Error {
    tracing::warn!(field, "VeSync login response has no identity");
    AuthenticationError::MissingIdentity {
        field,
        response: Box::new(response),
    }
    .into()
}
