//! Request DTOs with validation.

use serde::{Deserialize, Serialize};
use validator::Validate;

use assethub_core::types::id::{MainGroupId, SubGroupId};
use assethub_entity::NotificationSettings;
use assethub_entity::notification::ChannelSettings;
use assethub_service::asset::{CreateAssetRequest, UpdateAssetRequest};
use assethub_service::group::{CreateSubGroupRequest, GroupRequest, UpdateSubGroupRequest};
use assethub_service::CheckOptions;

/// Create asset request body.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateAssetBody {
    /// Display name.
    #[validate(length(min = 1, max = 200, message = "Asset name is required"))]
    pub name: String,
    /// Main group.
    pub main_group_id: MainGroupId,
    /// Sub group.
    pub sub_group_id: SubGroupId,
    /// Serialized field values.
    #[serde(default)]
    pub values: String,
    /// Asset-level expiry date, `YYYY-MM-DD`.
    #[serde(default)]
    pub expiry_date: Option<String>,
    /// Push reminders for this asset.
    #[serde(default)]
    pub expiry_notify: bool,
    /// Notes.
    #[serde(default)]
    pub notes: Option<String>,
}

impl From<CreateAssetBody> for CreateAssetRequest {
    fn from(body: CreateAssetBody) -> Self {
        Self {
            name: body.name,
            main_group_id: body.main_group_id,
            sub_group_id: body.sub_group_id,
            values: body.values,
            expiry_date: body.expiry_date,
            expiry_notify: body.expiry_notify,
            notes: body.notes,
        }
    }
}

/// Update asset request body.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateAssetBody {
    /// Display name.
    #[validate(length(min = 1, max = 200, message = "Asset name is required"))]
    pub name: String,
    /// Serialized field values.
    #[serde(default)]
    pub values: String,
    /// Asset-level expiry date; blank clears it.
    #[serde(default)]
    pub expiry_date: Option<String>,
    /// Push reminders; omitted keeps the current value.
    #[serde(default)]
    pub expiry_notify: Option<bool>,
    /// Notes; omitted keeps the current value.
    #[serde(default)]
    pub notes: Option<String>,
}

impl From<UpdateAssetBody> for UpdateAssetRequest {
    fn from(body: UpdateAssetBody) -> Self {
        Self {
            name: body.name,
            values: body.values,
            expiry_date: body.expiry_date,
            expiry_notify: body.expiry_notify,
            notes: body.notes,
        }
    }
}

/// Create or rename a main group.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct GroupBody {
    /// Group name.
    #[validate(length(min = 1, max = 100, message = "Group name is required"))]
    pub name: String,
    /// Icon name.
    #[serde(default)]
    pub icon: Option<String>,
}

impl From<GroupBody> for GroupRequest {
    fn from(body: GroupBody) -> Self {
        Self {
            name: body.name,
            icon: body.icon,
        }
    }
}

/// Create a sub group.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateSubGroupBody {
    /// Sub group name.
    #[validate(length(min = 1, max = 100, message = "Sub group name is required"))]
    pub name: String,
    /// Icon name.
    #[serde(default)]
    pub icon: Option<String>,
    /// Serialized field configuration.
    #[serde(default)]
    pub config: String,
}

impl From<CreateSubGroupBody> for CreateSubGroupRequest {
    fn from(body: CreateSubGroupBody) -> Self {
        Self {
            name: body.name,
            icon: body.icon,
            config: body.config,
        }
    }
}

/// Edit a sub group, optionally moving it to another main group.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateSubGroupBody {
    /// Sub group name.
    #[validate(length(min = 1, max = 100, message = "Sub group name is required"))]
    pub name: String,
    /// Icon name.
    #[serde(default)]
    pub icon: Option<String>,
    /// Serialized field configuration.
    #[serde(default)]
    pub config: String,
    /// New parent group.
    #[serde(default)]
    pub parent_id: Option<MainGroupId>,
}

impl From<UpdateSubGroupBody> for UpdateSubGroupRequest {
    fn from(body: UpdateSubGroupBody) -> Self {
        Self {
            name: body.name,
            icon: body.icon,
            config: body.config,
            parent_id: body.parent_id,
        }
    }
}

/// Notification preferences. The de-dup ledger is never taken from clients.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateSettingsBody {
    /// Master switch.
    #[serde(default)]
    pub enabled: bool,
    /// Lead time in days.
    #[validate(range(min = 0, max = 3650, message = "daysBeforeExpiry must be between 0 and 3650"))]
    pub days_before_expiry: i64,
    /// Daily trigger time, `HH:MM`.
    #[validate(length(min = 1, message = "notificationTime is required"))]
    pub notification_time: String,
    /// Push channel settings.
    #[serde(default)]
    pub channels: ChannelSettings,
}

impl From<UpdateSettingsBody> for NotificationSettings {
    fn from(body: UpdateSettingsBody) -> Self {
        Self {
            enabled: body.enabled,
            days_before_expiry: body.days_before_expiry,
            notification_time: body.notification_time,
            channels: body.channels,
            ..Default::default()
        }
    }
}

/// Query flags for a manual check.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct CheckQuery {
    /// Ignore the trigger window.
    #[serde(default)]
    pub force: bool,
    /// Clear the de-dup ledger first.
    #[serde(default)]
    pub reset: bool,
}

impl From<CheckQuery> for CheckOptions {
    fn from(query: CheckQuery) -> Self {
        Self {
            force: query.force,
            reset: query.reset,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_settings_body_rejects_negative_lead() {
        let body: UpdateSettingsBody = serde_json::from_value(serde_json::json!({
            "enabled": true,
            "daysBeforeExpiry": -1,
            "notificationTime": "09:00"
        }))
        .unwrap();
        assert!(body.validate().is_err());
    }

    #[test]
    fn test_asset_body_requires_name() {
        let body: CreateAssetBody = serde_json::from_value(serde_json::json!({
            "name": "",
            "mainGroupId": 1,
            "subGroupId": 1
        }))
        .unwrap();
        assert!(body.validate().is_err());
        assert_eq!(body.values, "");
        assert!(!body.expiry_notify);
    }
}
