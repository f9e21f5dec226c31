// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Error types for the `vesync_outlet` library.
//!
//! Failures are split by where they happen: session configuration, login,
//! the HTTP transport, and response decoding. Provider-side failures on
//! calls made after login are *not* errors: they are reported through the
//! `None` half of the `(data, response)` pairs returned by
//! [`CloudSession`](crate::CloudSession), and [`ProviderError`] only exists
//! to describe them.

use std::time::Duration;

use thiserror::Error;

use crate::response::ApiResponse;

/// The main error type for this library.
#[derive(Debug, Error)]
pub enum Error {
    /// Login was refused by the cloud API.
    #[error("authentication error: {0}")]
    Authentication(#[from] AuthenticationError),

    /// The request never produced an HTTP response.
    #[error("transport error: {0}")]
    Transport(#[from] TransportError),

    /// The session or call was configured with invalid values.
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    /// A response body could not be decoded.
    #[error("parse error: {0}")]
    Parse(#[from] ParseError),
}

/// Errors raised while logging in.
///
/// Every variant keeps the raw login response so callers can inspect the
/// status code, headers and body the provider sent back.
#[derive(Debug, Error)]
pub enum AuthenticationError {
    /// The login endpoint answered with a status other than 200.
    #[error("login rejected with HTTP {status}")]
    Rejected {
        /// HTTP status code of the login response.
        status: u16,
        /// The raw login response.
        response: Box<ApiResponse>,
    },

    /// The login endpoint answered 200 but flagged an error in its headers.
    #[error("login response carried an error header: {indicator}")]
    ErrorHeader {
        /// Value of the `error` response header.
        indicator: String,
        /// The raw login response.
        response: Box<ApiResponse>,
    },

    /// The login endpoint answered 200 with a body that is not JSON.
    #[error("login response body could not be decoded")]
    InvalidBody {
        /// The decoding failure.
        source: ParseError,
        /// The raw login response.
        response: Box<ApiResponse>,
    },

    /// The login body did not contain a usable token or account id.
    #[error("login response is missing `{field}`")]
    MissingIdentity {
        /// Name of the missing JSON field.
        field: &'static str,
        /// The raw login response.
        response: Box<ApiResponse>,
    },
}

impl AuthenticationError {
    /// Returns the raw login response that caused the failure.
    #[must_use]
    pub fn response(&self) -> &ApiResponse {
        match self {
            Self::Rejected { response, .. }
            | Self::ErrorHeader { response, .. }
            | Self::InvalidBody { response, .. }
            | Self::MissingIdentity { response, .. } => response,
        }
    }

    /// Returns the HTTP status code of the login response.
    #[must_use]
    pub fn status(&self) -> u16 {
        self.response().status_code()
    }
}

/// Errors related to the HTTP transport.
#[derive(Debug, Error)]
pub enum TransportError {
    /// HTTP request failed (connection refused, DNS, TLS, body encoding).
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Request timed out.
    #[error("request timed out after {} ms", .0.as_millis())]
    Timeout(Duration),

    /// A header value could not be placed on the request.
    #[error("invalid value for header `{name}`")]
    InvalidHeader {
        /// The offending header name.
        name: &'static str,
    },
}

impl TransportError {
    /// Classifies a `reqwest` error, folding timeouts into [`Self::Timeout`].
    pub(crate) fn from_reqwest(err: reqwest::Error, timeout: Duration) -> Self {
        if err.is_timeout() {
            Self::Timeout(timeout)
        } else {
            Self::Http(err)
        }
    }
}

/// Errors related to session and call configuration.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// Username or password was empty.
    #[error("{0} must not be empty")]
    EmptyCredential(&'static str),

    /// A repeat count of zero was requested.
    #[error("repeat count must be at least 1")]
    ZeroRepeat,

    /// The base URL is not an `http://` or `https://` URL.
    #[error("invalid base URL: {0}")]
    InvalidBaseUrl(String),

    /// The option map could not be read.
    #[error("invalid session options: {0}")]
    InvalidOptions(String),
}

/// Errors related to decoding cloud API responses.
#[derive(Debug, Error)]
pub enum ParseError {
    /// JSON parsing failed, including a required field being absent.
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Description of a provider-side failure on a post-login call.
///
/// This is never returned as an `Err`; see
/// [`ApiResponse::provider_error`](crate::response::ApiResponse::provider_error).
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error(
    "provider reported a failure (HTTP {status}){}",
    .indicator.as_deref().map(|i| format!(": {i}")).unwrap_or_default()
)]
pub struct ProviderError {
    /// HTTP status code of the response.
    pub status: u16,
    /// Value of the `error` response header, if present.
    pub indicator: Option<String>,
}

/// A specialized Result type for this library.
pub type Result<T> = std::result::Result<T, Error>;
