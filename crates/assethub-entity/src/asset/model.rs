//! Asset entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use assethub_core::types::{AssetId, MainGroupId, SubGroupId};

/// A tracked network asset (server, domain, license, ...).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Asset {
    /// Unique asset identifier.
    pub id: AssetId,
    /// Display name.
    pub name: String,
    /// Owning top-level category.
    pub main_group_id: MainGroupId,
    /// Owning sub category; its config defines the custom fields.
    pub sub_group_id: SubGroupId,
    /// Serialized JSON object mapping field index to the raw field value.
    ///
    /// A raw value may carry one or more `label@YYYY-MM-DD` segments
    /// separated by `|`.
    #[serde(default)]
    pub values: String,
    /// Asset-level expiry date (`YYYY-MM-DD`).
    #[serde(default)]
    pub expiry_date: Option<String>,
    /// Whether expiry reminders are pushed for this asset.
    #[serde(default)]
    pub expiry_notify: bool,
    /// Creation time in epoch milliseconds.
    pub created_at: i64,
    /// Free-text notes.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl Asset {
    /// The asset-level expiry date, ignoring blank strings.
    pub fn direct_expiry(&self) -> Option<&str> {
        self.expiry_date
            .as_deref()
            .map(str::trim)
            .filter(|d| !d.is_empty())
    }

    /// Creation time as a UTC timestamp.
    pub fn created_at_utc(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp_millis(self.created_at)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Asset {
        Asset {
            id: AssetId::new(1),
            name: "web-01".to_string(),
            main_group_id: MainGroupId::new(1),
            sub_group_id: SubGroupId::new(2),
            values: r#"{"0":"example.com@2099-01-01"}"#.to_string(),
            expiry_date: None,
            expiry_notify: true,
            created_at: 1_700_000_000_000,
            notes: None,
        }
    }

    #[test]
    fn test_reads_original_camel_case_layout() {
        let json = r#"{
            "id": 3,
            "name": "vps",
            "mainGroupId": 1,
            "subGroupId": 4,
            "values": "{}",
            "expiryDate": "2030-05-01",
            "expiryNotify": true,
            "createdAt": 1700000000000,
            "notes": ""
        }"#;
        let asset: Asset = serde_json::from_str(json).expect("deserialize");
        assert_eq!(asset.id, AssetId::new(3));
        assert_eq!(asset.direct_expiry(), Some("2030-05-01"));
        assert_eq!(asset.notes.as_deref(), Some(""));
    }

    #[test]
    fn test_blank_expiry_is_none() {
        let mut asset = sample();
        asset.expiry_date = Some("  ".to_string());
        assert_eq!(asset.direct_expiry(), None);
        asset.expiry_date = None;
        assert_eq!(asset.direct_expiry(), None);
    }

    #[test]
    fn test_serializes_camel_case() {
        let value = serde_json::to_value(sample()).expect("serialize");
        assert_eq!(value["mainGroupId"], 1);
        assert_eq!(value["expiryNotify"], true);
        assert!(value.get("notes").is_none());
    }
}
