//! Asset repository implementation.

use std::sync::Arc;

use chrono::Utc;

use assethub_core::error::AppError;
use assethub_core::result::AppResult;
use assethub_core::types::{AssetId, MainGroupId, SubGroupId};
use assethub_entity::Asset;

use crate::document::JsonStore;

/// Suffix appended to the name of a copied asset.
pub const COPY_SUFFIX: &str = " (copy)";

/// Parameters for creating an asset.
#[derive(Debug, Clone)]
pub struct CreateAssetParams {
    /// Display name.
    pub name: String,
    /// Owning main group.
    pub main_group_id: MainGroupId,
    /// Owning sub group.
    pub sub_group_id: SubGroupId,
    /// Serialized field values.
    pub values: String,
    /// Asset-level expiry date; blank means none.
    pub expiry_date: Option<String>,
    /// Push reminders for this asset.
    pub expiry_notify: bool,
    /// Free-text notes.
    pub notes: Option<String>,
}

/// Parameters for editing an asset. `None` keeps the stored value for the
/// optional fields.
#[derive(Debug, Clone)]
pub struct UpdateAssetParams {
    /// New display name.
    pub name: String,
    /// New serialized field values.
    pub values: String,
    /// New expiry date; blank or `None` clears it.
    pub expiry_date: Option<String>,
    /// New reminder flag.
    pub expiry_notify: Option<bool>,
    /// New notes.
    pub notes: Option<String>,
}

/// Repository for asset CRUD operations.
#[derive(Debug, Clone)]
pub struct AssetRepository {
    store: Arc<JsonStore>,
}

impl AssetRepository {
    /// Create a new asset repository.
    pub fn new(store: Arc<JsonStore>) -> Self {
        Self { store }
    }

    /// All assets in storage order.
    pub async fn find_all(&self) -> AppResult<Vec<Asset>> {
        Ok(self.store.load().await?.assets)
    }

    /// Find an asset by id.
    pub async fn find_by_id(&self, id: AssetId) -> AppResult<Option<Asset>> {
        Ok(self.store.load().await?.asset(id).cloned())
    }

    /// Assets with expiry reminders switched on.
    pub async fn find_notify_enabled(&self) -> AppResult<Vec<Asset>> {
        let doc = self.store.load().await?;
        Ok(doc.notify_enabled_assets().cloned().collect())
    }

    /// Insert a new asset.
    pub async fn create(&self, params: CreateAssetParams) -> AppResult<Asset> {
        self.store
            .update(|doc| {
                let asset = Asset {
                    id: doc.allocate_asset_id(),
                    name: params.name,
                    main_group_id: params.main_group_id,
                    sub_group_id: params.sub_group_id,
                    values: params.values,
                    expiry_date: normalize_date(params.expiry_date),
                    expiry_notify: params.expiry_notify,
                    created_at: Utc::now().timestamp_millis(),
                    notes: Some(params.notes.unwrap_or_default()),
                };
                doc.assets.push(asset.clone());
                Ok(asset)
            })
            .await
    }

    /// Edit an existing asset.
    pub async fn update(&self, id: AssetId, params: UpdateAssetParams) -> AppResult<Asset> {
        self.store
            .update(|doc| {
                let asset = doc
                    .asset_mut(id)
                    .ok_or_else(|| AppError::not_found(format!("Asset {id} not found")))?;
                asset.name = params.name;
                asset.values = params.values;
                asset.expiry_date = normalize_date(params.expiry_date);
                if let Some(notify) = params.expiry_notify {
                    asset.expiry_notify = notify;
                }
                if params.notes.is_some() {
                    asset.notes = params.notes;
                }
                Ok(asset.clone())
            })
            .await
    }

    /// Delete an asset. Returns whether it existed.
    pub async fn delete(&self, id: AssetId) -> AppResult<bool> {
        self.store
            .update(|doc| {
                let before = doc.assets.len();
                doc.assets.retain(|a| a.id != id);
                Ok(doc.assets.len() != before)
            })
            .await
    }

    /// Duplicate an asset under a new id.
    pub async fn copy(&self, id: AssetId) -> AppResult<Asset> {
        self.store
            .update(|doc| {
                let source = doc
                    .asset(id)
                    .cloned()
                    .ok_or_else(|| AppError::not_found(format!("Asset {id} not found")))?;
                let copy = Asset {
                    id: doc.allocate_asset_id(),
                    name: format!("{}{COPY_SUFFIX}", source.name),
                    created_at: Utc::now().timestamp_millis(),
                    ..source
                };
                doc.assets.push(copy.clone());
                Ok(copy)
            })
            .await
    }
}

/// Blank dates are stored as `null`.
fn normalize_date(date: Option<String>) -> Option<String> {
    date.map(|d| d.trim().to_string()).filter(|d| !d.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn repo() -> (tempfile::TempDir, AssetRepository) {
        let dir = tempfile::tempdir().unwrap();
        let store = Arc::new(JsonStore::at(dir.path().join("db.json")).await.unwrap());
        (dir, AssetRepository::new(store))
    }

    fn params(name: &str) -> CreateAssetParams {
        CreateAssetParams {
            name: name.to_string(),
            main_group_id: MainGroupId::new(1),
            sub_group_id: SubGroupId::new(1),
            values: r#"{"0":"a.com@2030-01-01"}"#.to_string(),
            expiry_date: Some(String::new()),
            expiry_notify: true,
            notes: None,
        }
    }

    #[tokio::test]
    async fn test_create_and_find() {
        let (_dir, repo) = repo().await;
        let asset = repo.create(params("domain")).await.unwrap();
        assert_eq!(asset.id, AssetId::new(1));
        assert_eq!(asset.expiry_date, None);
        assert_eq!(asset.notes.as_deref(), Some(""));

        let found = repo.find_by_id(asset.id).await.unwrap().unwrap();
        assert_eq!(found, asset);
    }

    #[tokio::test]
    async fn test_update_keeps_optional_fields() {
        let (_dir, repo) = repo().await;
        let asset = repo.create(params("vps")).await.unwrap();

        let updated = repo
            .update(
                asset.id,
                UpdateAssetParams {
                    name: "vps-2".to_string(),
                    values: "{}".to_string(),
                    expiry_date: Some("2031-02-03".to_string()),
                    expiry_notify: None,
                    notes: None,
                },
            )
            .await
            .unwrap();
        assert_eq!(updated.name, "vps-2");
        assert_eq!(updated.expiry_date.as_deref(), Some("2031-02-03"));
        assert!(updated.expiry_notify);
        assert_eq!(updated.notes.as_deref(), Some(""));
    }

    #[tokio::test]
    async fn test_update_missing_is_not_found() {
        let (_dir, repo) = repo().await;
        let err = repo
            .update(
                AssetId::new(99),
                UpdateAssetParams {
                    name: "x".to_string(),
                    values: "{}".to_string(),
                    expiry_date: None,
                    expiry_notify: None,
                    notes: None,
                },
            )
            .await
            .unwrap_err();
        assert_eq!(err.kind, assethub_core::error::ErrorKind::NotFound);
    }

    #[tokio::test]
    async fn test_copy_and_delete() {
        let (_dir, repo) = repo().await;
        let asset = repo.create(params("license")).await.unwrap();
        let copy = repo.copy(asset.id).await.unwrap();
        assert_eq!(copy.id, AssetId::new(2));
        assert_eq!(copy.name, "license (copy)");
        assert_eq!(copy.values, asset.values);

        assert!(repo.delete(asset.id).await.unwrap());
        assert!(!repo.delete(asset.id).await.unwrap());
        assert_eq!(repo.find_all().await.unwrap().len(), 1);
    }
}
