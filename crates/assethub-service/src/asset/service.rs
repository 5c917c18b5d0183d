//! Asset CRUD and expiry inspection.

use std::sync::Arc;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use tracing::info;

use assethub_core::error::AppError;
use assethub_core::types::{AssetId, MainGroupId, SubGroupId};
use assethub_entity::{Asset, MainGroup, SubGroup};
use assethub_notify::extractor;
use assethub_notify::message::status_text;
use assethub_notify::BusinessCalendar;
use assethub_store::repositories::asset::{CreateAssetParams, UpdateAssetParams};
use assethub_store::repositories::{AssetRepository, GroupRepository};

/// Request to create an asset.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateAssetRequest {
    /// Display name.
    pub name: String,
    /// Main group.
    pub main_group_id: MainGroupId,
    /// Sub group; must belong to `main_group_id`.
    pub sub_group_id: SubGroupId,
    /// Serialized field values.
    #[serde(default)]
    pub values: String,
    /// Asset-level expiry date.
    #[serde(default)]
    pub expiry_date: Option<String>,
    /// Push reminders.
    #[serde(default)]
    pub expiry_notify: bool,
    /// Notes.
    #[serde(default)]
    pub notes: Option<String>,
}

/// Request to edit an asset.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateAssetRequest {
    /// Display name.
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

/// An asset joined with its groups and expiry summary.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AssetListing {
    /// The asset itself.
    #[serde(flatten)]
    pub asset: Asset,
    /// Its main group, if it still exists.
    pub main_group: Option<MainGroup>,
    /// Its sub group, if it still exists.
    pub sub_group: Option<SubGroup>,
    /// Asset-level expiry date or the earliest embedded one.
    pub earliest_expiry: Option<NaiveDate>,
    /// Whether `earliest_expiry` has passed.
    pub expired: bool,
}

/// One due date of an asset, evaluated against now.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DueItem {
    /// Segment label; `None` for the asset-level date.
    pub label: Option<String>,
    /// Expiry date.
    pub date: NaiveDate,
    /// Days until expiry.
    pub days_remaining: i64,
    /// Human-readable status.
    pub status: String,
}

/// Manages assets.
#[derive(Debug, Clone)]
pub struct AssetService {
    /// Asset repository.
    asset_repo: Arc<AssetRepository>,
    /// Group repository, for membership checks and joins.
    group_repo: Arc<GroupRepository>,
    /// Calendar for expiry arithmetic.
    calendar: BusinessCalendar,
}

impl AssetService {
    /// Creates a new asset service.
    pub fn new(
        asset_repo: Arc<AssetRepository>,
        group_repo: Arc<GroupRepository>,
        calendar: BusinessCalendar,
    ) -> Self {
        Self {
            asset_repo,
            group_repo,
            calendar,
        }
    }

    /// All assets with group names and expiry summary, newest first.
    pub async fn list_assets(&self, now: DateTime<Utc>) -> Result<Vec<AssetListing>, AppError> {
        let assets = self.asset_repo.find_all().await?;
        let trees = self.group_repo.find_all_trees().await?;

        let mut listings: Vec<AssetListing> = assets
            .into_iter()
            .map(|asset| {
                let tree = trees.iter().find(|t| t.group.id == asset.main_group_id);
                let sub_group = trees
                    .iter()
                    .flat_map(|t| t.sub_groups.iter())
                    .find(|s| s.id == asset.sub_group_id)
                    .cloned();
                let earliest_expiry = extractor::earliest_expiry(&asset);
                let expired = earliest_expiry
                    .is_some_and(|d| self.calendar.days_remaining(d, now) < 0);
                AssetListing {
                    main_group: tree.map(|t| t.group.clone()),
                    sub_group,
                    earliest_expiry,
                    expired,
                    asset,
                }
            })
            .collect();

        listings.sort_by(|a, b| b.asset.created_at.cmp(&a.asset.created_at));
        Ok(listings)
    }

    /// Gets an asset by id.
    pub async fn get_asset(&self, id: AssetId) -> Result<Asset, AppError> {
        self.asset_repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Asset {id} not found")))
    }

    /// Creates an asset.
    pub async fn create_asset(&self, req: CreateAssetRequest) -> Result<Asset, AppError> {
        let name = validate_name(&req.name)?;
        validate_expiry_date(req.expiry_date.as_deref())?;

        let sub = self
            .group_repo
            .find_sub_by_id(req.sub_group_id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Sub group {} not found", req.sub_group_id)))?;
        if sub.parent_id != req.main_group_id {
            return Err(AppError::validation(format!(
                "Sub group {} does not belong to group {}",
                req.sub_group_id, req.main_group_id
            )));
        }

        let asset = self
            .asset_repo
            .create(CreateAssetParams {
                name,
                main_group_id: req.main_group_id,
                sub_group_id: req.sub_group_id,
                values: normalize_values(req.values),
                expiry_date: req.expiry_date,
                expiry_notify: req.expiry_notify,
                notes: req.notes,
            })
            .await?;

        info!(asset_id = %asset.id, name = %asset.name, "Asset created");
        Ok(asset)
    }

    /// Edits an asset.
    pub async fn update_asset(
        &self,
        id: AssetId,
        req: UpdateAssetRequest,
    ) -> Result<Asset, AppError> {
        let name = validate_name(&req.name)?;
        validate_expiry_date(req.expiry_date.as_deref())?;

        let asset = self
            .asset_repo
            .update(
                id,
                UpdateAssetParams {
                    name,
                    values: normalize_values(req.values),
                    expiry_date: req.expiry_date,
                    expiry_notify: req.expiry_notify,
                    notes: req.notes,
                },
            )
            .await?;

        info!(asset_id = %id, "Asset updated");
        Ok(asset)
    }

    /// Deletes an asset.
    pub async fn delete_asset(&self, id: AssetId) -> Result<(), AppError> {
        if !self.asset_repo.delete(id).await? {
            return Err(AppError::not_found(format!("Asset {id} not found")));
        }
        info!(asset_id = %id, "Asset deleted");
        Ok(())
    }

    /// Duplicates an asset.
    pub async fn copy_asset(&self, id: AssetId) -> Result<Asset, AppError> {
        let copy = self.asset_repo.copy(id).await?;
        info!(source_id = %id, asset_id = %copy.id, "Asset copied");
        Ok(copy)
    }

    /// Due dates of an asset, evaluated against `now`.
    pub async fn due_items(&self, id: AssetId, now: DateTime<Utc>) -> Result<Vec<DueItem>, AppError> {
        let asset = self.get_asset(id).await?;
        Ok(extractor::extract_items(&asset)
            .into_iter()
            .map(|item| {
                let days_remaining = self.calendar.days_remaining(item.date, now);
                DueItem {
                    label: item.label,
                    date: item.date,
                    days_remaining,
                    status: status_text(days_remaining),
                }
            })
            .collect())
    }
}

fn validate_name(name: &str) -> Result<String, AppError> {
    let name = name.trim();
    if name.is_empty() {
        return Err(AppError::validation("Asset name cannot be empty"));
    }
    Ok(name.to_string())
}

fn validate_expiry_date(date: Option<&str>) -> Result<(), AppError> {
    match date.map(str::trim).filter(|d| !d.is_empty()) {
        Some(d) if NaiveDate::parse_from_str(d, "%Y-%m-%d").is_err() => Err(AppError::validation(
            format!("Invalid expiry date '{d}', expected YYYY-MM-DD"),
        )),
        _ => Ok(()),
    }
}

fn normalize_values(values: String) -> String {
    if values.trim().is_empty() {
        "{}".to_string()
    } else {
        values
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::Fixture;
    use assethub_core::error::ErrorKind;
    use chrono::TimeZone;

    fn now() -> DateTime<Utc> {
        // 2025-03-01 09:00 in UTC+8.
        Utc.with_ymd_and_hms(2025, 3, 1, 1, 0, 0).unwrap()
    }

    fn request(fx: &Fixture, values: &str, expiry: Option<&str>) -> CreateAssetRequest {
        CreateAssetRequest {
            name: " web-01 ".to_string(),
            main_group_id: fx.main_id,
            sub_group_id: fx.sub_id,
            values: values.to_string(),
            expiry_date: expiry.map(str::to_string),
            expiry_notify: true,
            notes: None,
        }
    }

    #[tokio::test]
    async fn test_create_trims_and_defaults_values() {
        let fx = Fixture::new().await;
        let asset = fx.assets.create_asset(request(&fx, "", None)).await.unwrap();
        assert_eq!(asset.name, "web-01");
        assert_eq!(asset.values, "{}");
    }

    #[tokio::test]
    async fn test_create_rejects_mismatched_groups() {
        let fx = Fixture::new().await;
        let other = fx.groups.create_main_group("Other".into(), None).await.unwrap();
        let mut req = request(&fx, "{}", None);
        req.main_group_id = other.id;
        let err = fx.assets.create_asset(req).await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::Validation);
    }

    #[tokio::test]
    async fn test_create_rejects_bad_date() {
        let fx = Fixture::new().await;
        let err = fx
            .assets
            .create_asset(request(&fx, "{}", Some("2025-02-30")))
            .await
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::Validation);
    }

    #[tokio::test]
    async fn test_list_flags_expired_and_joins_groups() {
        let fx = Fixture::new().await;
        fx.assets
            .create_asset(request(&fx, r#"{"0":"a@2025-02-01|b@2030-01-01"}"#, None))
            .await
            .unwrap();
        fx.assets
            .create_asset(request(&fx, "{}", Some("2025-03-01")))
            .await
            .unwrap();

        let listings = fx.assets.list_assets(now()).await.unwrap();
        assert_eq!(listings.len(), 2);
        let by_id = |id: u64| {
            listings
                .iter()
                .find(|l| l.asset.id == AssetId::new(id))
                .unwrap()
        };
        assert!(by_id(1).expired);
        assert_eq!(
            by_id(1).earliest_expiry,
            NaiveDate::from_ymd_opt(2025, 2, 1)
        );
        assert!(!by_id(2).expired);
        assert_eq!(by_id(2).sub_group.as_ref().unwrap().id, fx.sub_id);
        assert_eq!(by_id(2).main_group.as_ref().unwrap().name, "Cloud");
    }

    #[tokio::test]
    async fn test_due_items() {
        let fx = Fixture::new().await;
        let asset = fx
            .assets
            .create_asset(request(&fx, r#"{"0":"x.com@2025-03-04|y.com@2025-02-27"}"#, None))
            .await
            .unwrap();

        let items = fx.assets.due_items(asset.id, now()).await.unwrap();
        assert_eq!(items.len(), 2);
        assert_eq!(items[0].days_remaining, 3);
        assert_eq!(items[0].status, "3 days remaining");
        assert_eq!(items[1].status, "overdue by 2 days");
    }

    #[tokio::test]
    async fn test_delete_missing_is_not_found() {
        let fx = Fixture::new().await;
        let err = fx.assets.delete_asset(AssetId::new(5)).await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::NotFound);
    }
}
