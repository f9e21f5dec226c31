// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Login response parsing.

use serde::{Deserialize, Deserializer};

/// Body of a successful `/login` response.
///
/// The provider returns the session token as `tk` and the account id as
/// `id`. Both are optional here so that a body missing one of them can be
/// reported as an authentication failure rather than a JSON error.
///
/// # Examples
///
/// ```
/// use vesync_outlet::response::LoginResponse;
///
/// let json = r#"{"tk": "abc", "id": "123", "nickName": "home"}"#;
/// let login: LoginResponse = serde_json::from_str(json).unwrap();
/// assert_eq!(login.token(), Some("abc"));
/// assert_eq!(login.account_id(), Some("123"));
/// ```
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LoginResponse {
    #[serde(rename = "tk", default)]
    token: Option<String>,
    #[serde(rename = "id", default, deserialize_with = "string_or_number")]
    account_id: Option<String>,
}

impl LoginResponse {
    /// Returns the session token, if present and non-empty.
    #[must_use]
    pub fn token(&self) -> Option<&str> {
        self.token.as_deref().filter(|t| !t.is_empty())
    }

    /// Returns the account id, if present and non-empty.
    #[must_use]
    pub fn account_id(&self) -> Option<&str> {
        self.account_id.as_deref().filter(|id| !id.is_empty())
    }
}

/// Accepts the account id as either a JSON string or a JSON number.
fn string_or_number<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Text(String),
        Number(serde_json::Number),
    }

    Ok(Option::<Raw>::deserialize(deserializer)?.map(|raw| match raw {
        Raw::Text(s) => s,
        Raw::Number(n) => n.to_string(),
    }))
}
