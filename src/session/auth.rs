// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Authenticated identity of a session.

use reqwest::header::{HeaderMap, HeaderValue};
use secrecy::{ExposeSecret, SecretString};

use crate::error::TransportError;

/// Header carrying the session token.
pub const TOKEN_HEADER: &str = "tk";
/// Header carrying the account id.
///
/// The provider documents it as `accountID`; header names are
/// case-insensitive and go out lower-cased.
pub const ACCOUNT_ID_HEADER: &str = "accountid";
/// Header repeating the account id.
pub const ID_HEADER: &str = "id";

/// Token and account id issued by a successful login.
///
/// The header map sent on every later request is built once here and never
/// changes afterwards, so a session can be shared freely between tasks.
#[derive(Debug, Clone)]
pub struct AuthHeaders {
    token: SecretString,
    account_id: String,
    headers: HeaderMap,
}

impl AuthHeaders {
    /// Builds the identity and its `{tk, accountID, id}` header map.
    ///
    /// # Errors
    ///
    /// Returns `TransportError::InvalidHeader` if a value cannot be sent as
    /// an HTTP header.
    pub fn new(
        token: impl Into<String>,
        account_id: impl Into<String>,
    ) -> Result<Self, TransportError> {
        let token = token.into();
        let account_id = account_id.into();

        let mut token_value = HeaderValue::from_str(&token)
            .map_err(|_| TransportError::InvalidHeader { name: TOKEN_HEADER })?;
        token_value.set_sensitive(true);
        let account_value =
            HeaderValue::from_str(&account_id).map_err(|_| TransportError::InvalidHeader {
                name: ACCOUNT_ID_HEADER,
            })?;

        let mut headers = HeaderMap::with_capacity(3);
        headers.insert(TOKEN_HEADER, token_value);
        headers.insert(ACCOUNT_ID_HEADER, account_value.clone());
        headers.insert(ID_HEADER, account_value);

        Ok(Self {
            token: SecretString::from(token),
            account_id,
            headers,
        })
    }

    /// Returns the session token.
    #[must_use]
    pub fn token(&self) -> &SecretString {
        &self.token
    }

    /// Returns the account id.
    #[must_use]
    pub fn account_id(&self) -> &str {
        &self.account_id
    }

    /// Returns the headers attached to authenticated requests.
    #[must_use]
    pub fn header_map(&self) -> &HeaderMap {
        &self.headers
    }

    /// Returns `true` if `token` matches the stored token.
    #[must_use]
    pub fn has_token(&self, token: &str) -> bool {
        self.token.expose_secret() == token
    }
}
