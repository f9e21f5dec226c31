// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Session configuration.

use std::time::Duration;

use serde::Deserialize;
use serde_json::Value;

use crate::error::ConfigError;
use crate::types::Repeat;

/// Configuration for a [`CloudSession`](crate::CloudSession).
///
/// Holds the API endpoint, the switch repeat count and the per-request
/// timeout. Values are validated when the session connects.
///
/// # Examples
///
/// ```
/// use std::time::Duration;
/// use vesync_outlet::config::SessionConfig;
/// use vesync_outlet::types::Repeat;
///
/// // Defaults
/// let config = SessionConfig::new();
/// assert_eq!(config.base_url(), SessionConfig::DEFAULT_BASE_URL);
/// assert_eq!(config.repeats().get(), 2);
///
/// // With all options
/// let config = SessionConfig::new()
///     .with_base_url(SessionConfig::SMARTAPI_BASE_URL)
///     .with_repeats(Repeat::new(3).unwrap())
///     .with_timeout(Duration::from_secs(5));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionConfig {
    base_url: String,
    repeats: Repeat,
    timeout: Duration,
}

impl SessionConfig {
    /// Default API endpoint.
    pub const DEFAULT_BASE_URL: &'static str = "https://server1.vesync.com:4007";
    /// Secondary API endpoint.
    pub const SERVER2_BASE_URL: &'static str = "https://server2.vesync.com:4007";
    /// Smart API endpoint.
    pub const SMARTAPI_BASE_URL: &'static str = "https://smartapi.vesync.com";
    /// Default request timeout.
    pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

    /// Creates a configuration with default values.
    #[must_use]
    pub fn new() -> Self {
        Self {
            base_url: Self::DEFAULT_BASE_URL.to_string(),
            repeats: Repeat::DEFAULT,
            timeout: Self::DEFAULT_TIMEOUT,
        }
    }

    /// Loads a configuration from a loosely typed option map.
    ///
    /// Recognized keys are `base_url`, `repeats` and `timeout_secs`. Any
    /// other key is ignored. `null` yields the defaults.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidOptions` if `options` is not an object
    /// or a recognized key has the wrong type or a zero repeat count, and
    /// `ConfigError::InvalidBaseUrl` for a non-HTTP base URL.
    ///
    /// # Examples
    ///
    /// ```
    /// use vesync_outlet::config::SessionConfig;
    ///
    /// let config = SessionConfig::from_options(serde_json::json!({
    ///     "repeats": 3,
    ///     "colour": "blue"
    /// }))
    /// .unwrap();
    /// assert_eq!(config.repeats().get(), 3);
    /// ```
    pub fn from_options(options: Value) -> Result<Self, ConfigError> {
        if options.is_null() {
            return Ok(Self::new());
        }
        if !options.is_object() {
            return Err(ConfigError::InvalidOptions(
                "expected a map of options".to_string(),
            ));
        }

        let options: SessionOptions = serde_json::from_value(options)
            .map_err(|e| ConfigError::InvalidOptions(e.to_string()))?;

        let mut config = Self::new();
        if let Some(base_url) = options.base_url {
            config = config.with_base_url(base_url);
        }
        if let Some(repeats) = options.repeats {
            config = config.with_repeats(repeats);
        }
        if let Some(secs) = options.timeout_secs {
            config = config.with_timeout(Duration::from_secs(secs));
        }

        config.validate()?;
        Ok(config)
    }

    /// Sets the API endpoint.
    ///
    /// A trailing `/` is dropped so endpoint paths can be appended as is.
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        let mut base_url = base_url.into();
        while base_url.ends_with('/') {
            base_url.pop();
        }
        self.base_url = base_url;
        self
    }

    /// Sets the default repeat count for switch commands.
    #[must_use]
    pub fn with_repeats(mut self, repeats: Repeat) -> Self {
        self.repeats = repeats;
        self
    }

    /// Sets the request timeout.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Returns the API endpoint.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Returns the default repeat count.
    #[must_use]
    pub fn repeats(&self) -> Repeat {
        self.repeats
    }

    /// Returns the request timeout.
    #[must_use]
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Checks the configuration before any request is sent.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidBaseUrl` if the base URL is not an
    /// absolute `http://` or `https://` URL.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let rest = self
            .base_url
            .strip_prefix("https://")
            .or_else(|| self.base_url.strip_prefix("http://"));

        match rest {
            Some(host) if !host.is_empty() => Ok(()),
            _ => Err(ConfigError::InvalidBaseUrl(self.base_url.clone())),
        }
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// The recognized subset of a session option map.
///
/// Unknown keys are ignored by serde's default behaviour.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct SessionOptions {
    base_url: Option<String>,
    repeats: Option<Repeat>,
    timeout_secs: Option<u64>,
}
