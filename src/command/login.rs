// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Login request.

use reqwest::header::{HeaderMap, HeaderValue};
use secrecy::{ExposeSecret, SecretString};
use serde_json::{Value, json};

use crate::command::{Command, Endpoint};
use crate::error::{ConfigError, TransportError};

const ACCOUNT_HEADER: &str = "account";
const PASSWORD_HEADER: &str = "password";

/// Credential exchange against `POST /login`.
///
/// Some provider gateways read the credentials from the JSON body
/// (`Account` / `Password`) and others from request headers
/// (`account` / `password`), so both halves are built from the same pair:
/// [`body`](Command::body) and [`headers`](Self::headers).
///
/// The password is held as a [`SecretString`] and is redacted from
/// `Debug` output.
///
/// # Examples
///
/// ```
/// use vesync_outlet::command::{Command, LoginRequest};
///
/// let login = LoginRequest::new("me@example.com", "hunter2").unwrap();
/// assert_eq!(login.body().unwrap()["Account"], "me@example.com");
///
/// let headers = login.headers().unwrap();
/// assert_eq!(headers["account"], "me@example.com");
///
/// assert!(LoginRequest::new("", "hunter2").is_err());
/// ```
#[derive(Debug, Clone)]
pub struct LoginRequest {
    username: String,
    password: SecretString,
}

impl LoginRequest {
    /// Creates a login request.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::EmptyCredential` if either value is empty.
    pub fn new(
        username: impl Into<String>,
        password: impl Into<String>,
    ) -> Result<Self, ConfigError> {
        let username = username.into();
        let password = password.into();

        if username.is_empty() {
            return Err(ConfigError::EmptyCredential("username"));
        }
        if password.is_empty() {
            return Err(ConfigError::EmptyCredential("password"));
        }

        Ok(Self {
            username,
            password: SecretString::from(password),
        })
    }

    /// Returns the account username.
    #[must_use]
    pub fn username(&self) -> &str {
        &self.username
    }

    /// Builds the header half of the request.
    ///
    /// # Errors
    ///
    /// Returns `TransportError::InvalidHeader` if a credential contains
    /// bytes that cannot appear in an HTTP header.
    pub fn headers(&self) -> Result<HeaderMap, TransportError> {
        let account = HeaderValue::from_bytes(self.username.as_bytes())
            .map_err(|_| TransportError::InvalidHeader {
                name: ACCOUNT_HEADER,
            })?;
        let mut password = HeaderValue::from_bytes(self.password.expose_secret().as_bytes())
            .map_err(|_| TransportError::InvalidHeader {
                name: PASSWORD_HEADER,
            })?;
        password.set_sensitive(true);

        let mut headers = HeaderMap::with_capacity(2);
        headers.insert(ACCOUNT_HEADER, account);
        headers.insert(PASSWORD_HEADER, password);
        Ok(headers)
    }
}

impl Command for LoginRequest {
    fn endpoint(&self) -> Endpoint {
        Endpoint::Login
    }

    fn body(&self) -> Option<Value> {
        Some(json!({
            "Account": self.username,
            "Password": self.password.expose_secret(),
        }))
    }
}
