// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Session builder.

use std::time::Duration;

use secrecy::{ExposeSecret, SecretString};
use serde_json::Value;

use crate::command::LoginRequest;
use crate::config::SessionConfig;
use crate::error::{ConfigError, Error};
use crate::session::CloudSession;
use crate::types::Repeat;

/// Builder for a [`CloudSession`].
///
/// Created with [`CloudSession::builder`]. Nothing is sent until
/// [`connect`](Self::connect) is awaited.
///
/// # Examples
///
/// ```no_run
/// use vesync_outlet::CloudSession;
/// use vesync_outlet::config::SessionConfig;
/// use vesync_outlet::types::Repeat;
///
/// # async fn example() -> vesync_outlet::Result<()> {
/// // Explicit settings
/// let session = CloudSession::builder("me@example.com", "hunter2")
///     .with_base_url(SessionConfig::SMARTAPI_BASE_URL)
///     .with_repeats(Repeat::new(3)?)
///     .connect()
///     .await?;
///
/// // From a loosely typed option map; unknown keys are ignored
/// let options = serde_json::json!({"repeats": 3, "debug": true});
/// let session = CloudSession::builder("me@example.com", "hunter2")
///     .with_options(options)?
///     .connect()
///     .await?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct SessionBuilder {
    username: String,
    password: SecretString,
    config: SessionConfig,
}

impl SessionBuilder {
    /// Creates a builder with the default configuration.
    pub(crate) fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: SecretString::from(password.into()),
            config: SessionConfig::new(),
        }
    }

    /// Replaces the whole configuration.
    #[must_use]
    pub fn with_config(mut self, config: SessionConfig) -> Self {
        self.config = config;
        self
    }

    /// Replaces the configuration with one read from an option map.
    ///
    /// See [`SessionConfig::from_options`].
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a recognized option is invalid.
    pub fn with_options(self, options: Value) -> Result<Self, ConfigError> {
        let config = SessionConfig::from_options(options)?;
        Ok(self.with_config(config))
    }

    /// Sets the API endpoint.
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.config = self.config.with_base_url(base_url);
        self
    }

    /// Sets the default repeat count for switch commands.
    #[must_use]
    pub fn with_repeats(mut self, repeats: Repeat) -> Self {
        self.config = self.config.with_repeats(repeats);
        self
    }

    /// Sets the request timeout.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.config = self.config.with_timeout(timeout);
        self
    }

    /// Returns the configuration the session will use.
    #[must_use]
    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    /// Logs in and returns the session.
    ///
    /// # Errors
    ///
    /// Returns error if:
    /// - A credential is empty or the configuration is invalid
    /// - The login request cannot be sent
    /// - The provider rejects the login
    pub async fn connect(self) -> Result<CloudSession, Error> {
        let credentials = LoginRequest::new(self.username, self.password.expose_secret())?;
        CloudSession::login(self.config, credentials).await
    }
}
