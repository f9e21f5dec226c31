// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! HTTP transport for the VeSync cloud API.
//!
//! [`HttpClient`] sends one JSON request per call and hands back the raw
//! [`ApiResponse`](crate::response::ApiResponse). It never retries and
//! never judges whether the provider accepted the call.

mod http;

pub use http::HttpClient;
