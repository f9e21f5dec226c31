// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! HTTP protocol implementation for the VeSync cloud API.

use std::time::Duration;

use reqwest::header::HeaderMap;
use reqwest::{Client, Method};
use serde_json::Value;

use crate::command::Command;
use crate::config::SessionConfig;
use crate::error::TransportError;
use crate::response::ApiResponse;

/// HTTP client for the VeSync cloud API.
///
/// Wraps a pooled `reqwest::Client` with the configured base URL and
/// timeout. Each call is one request; transport failures are returned as
/// [`TransportError`] and every HTTP response, whatever its status, is
/// returned as an [`ApiResponse`].
///
/// # Examples
///
/// ```no_run
/// use reqwest::header::HeaderMap;
/// use vesync_outlet::command::LoginRequest;
/// use vesync_outlet::config::SessionConfig;
/// use vesync_outlet::protocol::HttpClient;
///
/// # async fn example() -> vesync_outlet::Result<()> {
/// let client = HttpClient::new(&SessionConfig::new())?;
/// let login = LoginRequest::new("me@example.com", "hunter2")?;
/// let response = client.send_command(&login, &login.headers()?).await?;
/// println!("login answered HTTP {}", response.status_code());
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct HttpClient {
    base_url: String,
    client: Client,
    timeout: Duration,
}

impl HttpClient {
    /// Creates an HTTP client from a session configuration.
    ///
    /// # Errors
    ///
    /// Returns error if the HTTP client cannot be created.
    pub fn new(config: &SessionConfig) -> Result<Self, TransportError> {
        let client = Client::builder()
            .timeout(config.timeout())
            .build()
            .map_err(TransportError::Http)?;

        Ok(Self {
            base_url: config.base_url().to_string(),
            client,
            timeout: config.timeout(),
        })
    }

    /// Returns the base URL requests are sent to.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Returns the per-request timeout.
    #[must_use]
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Builds the URL for an endpoint path.
    fn build_url(&self, endpoint: &str) -> String {
        format!("{}{endpoint}", self.base_url)
    }

    /// Sends one request and reads the whole response.
    ///
    /// # Errors
    ///
    /// Returns `TransportError` if no HTTP response was received or its
    /// body could not be read.
    pub async fn send(
        &self,
        method: Method,
        endpoint: &str,
        body: Option<&Value>,
        headers: &HeaderMap,
    ) -> Result<ApiResponse, TransportError> {
        let url = self.build_url(endpoint);

        tracing::debug!(method = %method, url = %url, "Sending VeSync request");

        let mut request = self.client.request(method, &url).headers(headers.clone());
        if let Some(body) = body {
            request = request.json(body);
        }

        let response = request
            .send()
            .await
            .map_err(|e| TransportError::from_reqwest(e, self.timeout))?;
        let response = ApiResponse::read(response, self.timeout).await?;

        tracing::debug!(
            endpoint = %endpoint,
            status = response.status_code(),
            bytes = response.body().len(),
            "Received VeSync response"
        );

        Ok(response)
    }

    /// Sends a typed command.
    ///
    /// # Errors
    ///
    /// Returns `TransportError` if no HTTP response was received.
    pub async fn send_command<C: Command + ?Sized>(
        &self,
        command: &C,
        headers: &HeaderMap,
    ) -> Result<ApiResponse, TransportError> {
        let endpoint = command.endpoint();
        let body = command.body();
        self.send(endpoint.method(), endpoint.path(), body.as_ref(), headers)
            .await
    }
}
