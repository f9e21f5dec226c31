// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Device list parsing.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

use crate::types::DeviceId;

/// Device type tag of a VeSync WiFi outlet.
pub const WIFI_SWITCH: &str = "wifi-switch";

/// Filter applied by [`CloudSession::list_devices`](crate::CloudSession::list_devices).
pub const DEFAULT_DEVICE_FILTER: &[&str] = &[WIFI_SWITCH];

/// One device registered on the account.
///
/// The provider object is kept verbatim and serializes back unchanged,
/// explicit `null`s included. Accessors read the commonly present fields;
/// a record without a string `cid` or `type` is still listed, it just has
/// no identifier or never matches a type filter.
///
/// # Examples
///
/// ```
/// use vesync_outlet::response::DeviceRecord;
///
/// let json = r#"{
///     "cid": "0a1b",
///     "type": "wifi-switch",
///     "deviceName": "Lamp",
///     "deviceStatus": "on",
///     "deviceImg": "https://example.invalid/lamp.png"
/// }"#;
/// let device: DeviceRecord = serde_json::from_str(json).unwrap();
/// assert_eq!(device.id().unwrap().as_str(), "0a1b");
/// assert_eq!(device.device_type(), Some("wifi-switch"));
/// assert_eq!(device.name(), Some("Lamp"));
/// assert!(device.fields().contains_key("deviceImg"));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "Map<String, Value>", into = "Map<String, Value>")]
pub struct DeviceRecord {
    id: Option<DeviceId>,
    fields: Map<String, Value>,
}

impl DeviceRecord {
    /// Returns the device identifier used by switch commands.
    #[must_use]
    pub fn id(&self) -> Option<&DeviceId> {
        self.id.as_ref()
    }

    /// Returns the device type tag (e.g. `"wifi-switch"`).
    #[must_use]
    pub fn device_type(&self) -> Option<&str> {
        self.str_field("type")
    }

    /// Returns the user-facing device name.
    #[must_use]
    pub fn name(&self) -> Option<&str> {
        self.str_field("deviceName")
    }

    /// Returns the last reported relay status (`"on"` / `"off"`).
    #[must_use]
    pub fn status(&self) -> Option<&str> {
        self.str_field("deviceStatus")
    }

    /// Returns the last reported connectivity (`"online"` / `"offline"`).
    #[must_use]
    pub fn connection_status(&self) -> Option<&str> {
        self.str_field("connectionStatus")
    }

    /// Returns every provider field as received.
    #[must_use]
    pub fn fields(&self) -> &Map<String, Value> {
        &self.fields
    }

    /// Returns `true` if the device type is one of `filters`.
    #[must_use]
    pub fn matches_type(&self, filters: &[&str]) -> bool {
        self.device_type()
            .is_some_and(|device_type| filters.contains(&device_type))
    }

    fn str_field(&self, key: &str) -> Option<&str> {
        self.fields.get(key).and_then(Value::as_str)
    }
}

impl From<Map<String, Value>> for DeviceRecord {
    fn from(fields: Map<String, Value>) -> Self {
        let id = fields.get("cid").and_then(Value::as_str).map(DeviceId::from);
        Self { id, fields }
    }
}

impl From<DeviceRecord> for Map<String, Value> {
    fn from(record: DeviceRecord) -> Self {
        record.fields
    }
}

/// Body of a successful `/loadMain` response.
///
/// Entries of the `devices` array that are not JSON objects are skipped
/// with a warning instead of failing the whole list.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DeviceList {
    #[serde(deserialize_with = "device_entries")]
    devices: Vec<DeviceRecord>,
}

impl DeviceList {
    /// Returns all devices in provider order.
    #[must_use]
    pub fn devices(&self) -> &[DeviceRecord] {
        &self.devices
    }

    /// Consumes the list, keeping devices whose type is in `filters`.
    ///
    /// Provider order is preserved. An empty `filters` keeps everything.
    #[must_use]
    pub fn filter_types(self, filters: &[&str]) -> Vec<DeviceRecord> {
        if filters.is_empty() {
            return self.devices;
        }
        self.devices
            .into_iter()
            .filter(|device| device.matches_type(filters))
            .collect()
    }
}

fn device_entries<'de, D>(deserializer: D) -> Result<Vec<DeviceRecord>, D::Error>
where
    D: Deserializer<'de>,
{
    let entries = Vec::<Value>::deserialize(deserializer)?;
    Ok(entries
        .into_iter()
        .filter_map(|entry| match entry {
            Value::Object(fields) => Some(DeviceRecord::from(fields)),
            other => {
                tracing::warn!(entry = %other, "Skipping device entry that is not an object");
                None
            }
        })
        .collect())
}
