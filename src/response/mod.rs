// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Response types for the VeSync cloud API.
//!
//! [`ApiResponse`] is the raw, un-interpreted HTTP response every call
//! returns. The typed structures in this module decode specific bodies.

mod device;
mod login;

pub use device::{DEFAULT_DEVICE_FILTER, DeviceList, DeviceRecord, WIFI_SWITCH};
pub use login::LoginResponse;

use reqwest::StatusCode;
use reqwest::header::HeaderMap;
use serde::de::DeserializeOwned;

use crate::error::{ParseError, ProviderError, TransportError};

/// Name of the response header the provider uses to flag a failure.
pub const ERROR_HEADER: &str = "error";

/// Raw response from the cloud API.
///
/// Holds the status, headers and fully read body of one HTTP exchange.
/// Nothing here decides whether the call succeeded; use
/// [`is_success`](Self::is_success) or
/// [`provider_error`](Self::provider_error) to apply the provider's
/// convention.
#[derive(Debug, Clone)]
pub struct ApiResponse {
    status: StatusCode,
    headers: HeaderMap,
    body: String,
}

impl ApiResponse {
    /// Creates a response from its parts.
    #[must_use]
    pub fn new(status: StatusCode, headers: HeaderMap, body: impl Into<String>) -> Self {
        Self {
            status,
            headers,
            body: body.into(),
        }
    }

    /// Reads a `reqwest` response to completion.
    pub(crate) async fn read(
        response: reqwest::Response,
        timeout: std::time::Duration,
    ) -> Result<Self, TransportError> {
        let status = response.status();
        let headers = response.headers().clone();
        let body = response
            .text()
            .await
            .map_err(|e| TransportError::from_reqwest(e, timeout))?;

        Ok(Self {
            status,
            headers,
            body,
        })
    }

    /// Returns the HTTP status.
    #[must_use]
    pub fn status(&self) -> StatusCode {
        self.status
    }

    /// Returns the HTTP status as a number.
    #[must_use]
    pub fn status_code(&self) -> u16 {
        self.status.as_u16()
    }

    /// Returns the response headers.
    #[must_use]
    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    /// Returns the raw response body.
    #[must_use]
    pub fn body(&self) -> &str {
        &self.body
    }

    /// Returns the value of the provider's `error` header, if present.
    ///
    /// A header whose value is not valid text is reported as an empty
    /// string: its presence alone marks the failure.
    #[must_use]
    pub fn error_indicator(&self) -> Option<&str> {
        self.headers
            .get(ERROR_HEADER)
            .map(|value| value.to_str().unwrap_or_default())
    }

    /// Returns `true` when the status is 200 and no `error` header is set.
    #[must_use]
    pub fn is_success(&self) -> bool {
        self.status == StatusCode::OK && self.error_indicator().is_none()
    }

    /// Describes the provider-side failure, if this response is one.
    #[must_use]
    pub fn provider_error(&self) -> Option<ProviderError> {
        if self.is_success() {
            return None;
        }
        Some(ProviderError {
            status: self.status_code(),
            indicator: self.error_indicator().map(str::to_string),
        })
    }

    /// Parses the body as a specific type.
    ///
    /// # Errors
    ///
    /// Returns error if the JSON cannot be parsed into the target type.
    pub fn json<T: DeserializeOwned>(&self) -> Result<T, ParseError> {
        serde_json::from_str(&self.body).map_err(Into::into)
    }
}
