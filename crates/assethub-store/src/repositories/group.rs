//! Main group / sub group repository implementation.

use std::sync::Arc;

use assethub_core::error::AppError;
use assethub_core::result::AppResult;
use assethub_core::types::{MainGroupId, SubGroupId};
use assethub_entity::{MainGroup, SubGroup};

use crate::document::JsonStore;

/// Suffix appended to the name of a copied group.
pub const COPY_SUFFIX: &str = " (copy)";

/// A main group together with its sub groups.
#[derive(Debug, Clone, PartialEq)]
pub struct GroupTree {
    /// The main group.
    pub group: MainGroup,
    /// Its sub groups, in storage order.
    pub sub_groups: Vec<SubGroup>,
}

/// Parameters for editing a sub group.
#[derive(Debug, Clone)]
pub struct UpdateSubGroupParams {
    /// New name.
    pub name: String,
    /// New icon.
    pub icon: Option<String>,
    /// New field configuration.
    pub config: String,
    /// Move to another main group.
    pub parent_id: Option<MainGroupId>,
}

/// Repository for category CRUD operations.
#[derive(Debug, Clone)]
pub struct GroupRepository {
    store: Arc<JsonStore>,
}

impl GroupRepository {
    /// Create a new group repository.
    pub fn new(store: Arc<JsonStore>) -> Self {
        Self { store }
    }

    /// All main groups with their sub groups.
    pub async fn find_all_trees(&self) -> AppResult<Vec<GroupTree>> {
        let doc = self.store.load().await?;
        Ok(doc
            .main_groups
            .iter()
            .map(|group| GroupTree {
                group: group.clone(),
                sub_groups: doc.sub_groups_of(group.id).cloned().collect(),
            })
            .collect())
    }

    /// Find a main group by id.
    pub async fn find_main_by_id(&self, id: MainGroupId) -> AppResult<Option<MainGroup>> {
        Ok(self.store.load().await?.main_group(id).cloned())
    }

    /// Find a sub group by id.
    pub async fn find_sub_by_id(&self, id: SubGroupId) -> AppResult<Option<SubGroup>> {
        Ok(self.store.load().await?.sub_group(id).cloned())
    }

    /// Insert a main group.
    pub async fn create_main(&self, name: String, icon: Option<String>) -> AppResult<MainGroup> {
        self.store
            .update(|doc| {
                let group = MainGroup {
                    id: doc.allocate_main_group_id(),
                    name,
                    icon,
                };
                doc.main_groups.push(group.clone());
                Ok(group)
            })
            .await
    }

    /// Rename / re-icon a main group.
    pub async fn update_main(
        &self,
        id: MainGroupId,
        name: String,
        icon: Option<String>,
    ) -> AppResult<MainGroup> {
        self.store
            .update(|doc| {
                let group = doc
                    .main_groups
                    .iter_mut()
                    .find(|g| g.id == id)
                    .ok_or_else(|| AppError::not_found(format!("Group {id} not found")))?;
                group.name = name;
                group.icon = icon;
                Ok(group.clone())
            })
            .await
    }

    /// Delete a main group. Refused while it still has sub groups.
    pub async fn delete_main(&self, id: MainGroupId) -> AppResult<()> {
        self.store
            .update(|doc| {
                if doc.main_group(id).is_none() {
                    return Err(AppError::not_found(format!("Group {id} not found")));
                }
                if doc.sub_groups_of(id).next().is_some() {
                    return Err(AppError::conflict(
                        "Group still has sub groups; delete them first",
                    ));
                }
                doc.main_groups.retain(|g| g.id != id);
                Ok(())
            })
            .await
    }

    /// Duplicate a main group together with its sub groups (assets are not copied).
    pub async fn copy_main(&self, id: MainGroupId) -> AppResult<GroupTree> {
        self.store
            .update(|doc| {
                let source = doc
                    .main_group(id)
                    .cloned()
                    .ok_or_else(|| AppError::not_found(format!("Group {id} not found")))?;
                let children: Vec<SubGroup> = doc.sub_groups_of(id).cloned().collect();

                let group = MainGroup {
                    id: doc.allocate_main_group_id(),
                    name: format!("{}{COPY_SUFFIX}", source.name),
                    icon: source.icon,
                };
                doc.main_groups.push(group.clone());

                let mut sub_groups = Vec::with_capacity(children.len());
                for child in children {
                    let sub = SubGroup {
                        id: doc.allocate_sub_group_id(),
                        parent_id: group.id,
                        ..child
                    };
                    doc.sub_groups.push(sub.clone());
                    sub_groups.push(sub);
                }

                Ok(GroupTree { group, sub_groups })
            })
            .await
    }

    /// Insert a sub group under an existing main group.
    pub async fn create_sub(
        &self,
        parent_id: MainGroupId,
        name: String,
        icon: Option<String>,
        config: String,
    ) -> AppResult<SubGroup> {
        self.store
            .update(|doc| {
                if doc.main_group(parent_id).is_none() {
                    return Err(AppError::not_found(format!("Group {parent_id} not found")));
                }
                let sub = SubGroup {
                    id: doc.allocate_sub_group_id(),
                    parent_id,
                    name,
                    icon,
                    config,
                };
                doc.sub_groups.push(sub.clone());
                Ok(sub)
            })
            .await
    }

    /// Edit a sub group. Moving it to another parent moves its assets too.
    pub async fn update_sub(
        &self,
        id: SubGroupId,
        params: UpdateSubGroupParams,
    ) -> AppResult<SubGroup> {
        self.store
            .update(|doc| {
                if let Some(parent) = params.parent_id
                    && doc.main_group(parent).is_none()
                {
                    return Err(AppError::not_found(format!("Group {parent} not found")));
                }

                let sub = doc
                    .sub_groups
                    .iter_mut()
                    .find(|g| g.id == id)
                    .ok_or_else(|| AppError::not_found(format!("Sub group {id} not found")))?;
                let old_parent = sub.parent_id;
                sub.name = params.name;
                sub.icon = params.icon;
                sub.config = params.config;
                if let Some(parent) = params.parent_id {
                    sub.parent_id = parent;
                }
                let updated = sub.clone();

                if updated.parent_id != old_parent {
                    for asset in doc.assets.iter_mut().filter(|a| a.sub_group_id == id) {
                        asset.main_group_id = updated.parent_id;
                    }
                }
                Ok(updated)
            })
            .await
    }

    /// Delete a sub group and every asset in it. Returns the number of
    /// assets removed.
    pub async fn delete_sub(&self, id: SubGroupId) -> AppResult<usize> {
        self.store
            .update(|doc| {
                if doc.sub_group(id).is_none() {
                    return Err(AppError::not_found(format!("Sub group {id} not found")));
                }
                doc.sub_groups.retain(|g| g.id != id);
                let before = doc.assets.len();
                doc.assets.retain(|a| a.sub_group_id != id);
                Ok(before - doc.assets.len())
            })
            .await
    }

    /// Duplicate a sub group under the same parent.
    pub async fn copy_sub(&self, id: SubGroupId) -> AppResult<SubGroup> {
        self.store
            .update(|doc| {
                let source = doc
                    .sub_group(id)
                    .cloned()
                    .ok_or_else(|| AppError::not_found(format!("Sub group {id} not found")))?;
                let sub = SubGroup {
                    id: doc.allocate_sub_group_id(),
                    name: format!("{}{COPY_SUFFIX}", source.name),
                    ..source
                };
                doc.sub_groups.push(sub.clone());
                Ok(sub)
            })
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repositories::asset::{AssetRepository, CreateAssetParams};
    use assethub_core::error::ErrorKind;

    async fn setup() -> (tempfile::TempDir, GroupRepository, AssetRepository) {
        let dir = tempfile::tempdir().unwrap();
        let store = Arc::new(JsonStore::at(dir.path().join("db.json")).await.unwrap());
        (
            dir,
            GroupRepository::new(Arc::clone(&store)),
            AssetRepository::new(store),
        )
    }

    fn asset_in(main: MainGroupId, sub: SubGroupId) -> CreateAssetParams {
        CreateAssetParams {
            name: "asset".to_string(),
            main_group_id: main,
            sub_group_id: sub,
            values: "{}".to_string(),
            expiry_date: None,
            expiry_notify: false,
            notes: None,
        }
    }

    #[tokio::test]
    async fn test_delete_main_with_children_conflicts() {
        let (_dir, groups, _) = setup().await;
        let main = groups.create_main("Cloud".into(), None).await.unwrap();
        let sub = groups
            .create_sub(main.id, "VPS".into(), None, "[]".into())
            .await
            .unwrap();

        let err = groups.delete_main(main.id).await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::Conflict);

        groups.delete_sub(sub.id).await.unwrap();
        groups.delete_main(main.id).await.unwrap();
        assert!(groups.find_all_trees().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_create_sub_requires_parent() {
        let (_dir, groups, _) = setup().await;
        let err = groups
            .create_sub(MainGroupId::new(9), "x".into(), None, String::new())
            .await
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::NotFound);
    }

    #[tokio::test]
    async fn test_reparent_moves_assets() {
        let (_dir, groups, assets) = setup().await;
        let a = groups.create_main("A".into(), None).await.unwrap();
        let b = groups.create_main("B".into(), None).await.unwrap();
        let sub = groups
            .create_sub(a.id, "Domains".into(), None, "[]".into())
            .await
            .unwrap();
        let asset = assets.create(asset_in(a.id, sub.id)).await.unwrap();

        groups
            .update_sub(
                sub.id,
                UpdateSubGroupParams {
                    name: "Domains".into(),
                    icon: None,
                    config: "[]".into(),
                    parent_id: Some(b.id),
                },
            )
            .await
            .unwrap();

        let moved = assets.find_by_id(asset.id).await.unwrap().unwrap();
        assert_eq!(moved.main_group_id, b.id);
    }

    #[tokio::test]
    async fn test_delete_sub_cascades_assets() {
        let (_dir, groups, assets) = setup().await;
        let main = groups.create_main("A".into(), None).await.unwrap();
        let keep = groups
            .create_sub(main.id, "keep".into(), None, String::new())
            .await
            .unwrap();
        let drop = groups
            .create_sub(main.id, "drop".into(), None, String::new())
            .await
            .unwrap();
        assets.create(asset_in(main.id, keep.id)).await.unwrap();
        assets.create(asset_in(main.id, drop.id)).await.unwrap();
        assets.create(asset_in(main.id, drop.id)).await.unwrap();

        let removed = groups.delete_sub(drop.id).await.unwrap();
        assert_eq!(removed, 2);
        assert_eq!(assets.find_all().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_copy_main_copies_sub_groups() {
        let (_dir, groups, _) = setup().await;
        let main = groups.create_main("Cloud".into(), Some("cloud".into())).await.unwrap();
        groups
            .create_sub(main.id, "VPS".into(), None, r#"[{"name":"IP"}]"#.into())
            .await
            .unwrap();

        let tree = groups.copy_main(main.id).await.unwrap();
        assert_eq!(tree.group.name, "Cloud (copy)");
        assert_eq!(tree.group.icon.as_deref(), Some("cloud"));
        assert_eq!(tree.sub_groups.len(), 1);
        assert_eq!(tree.sub_groups[0].parent_id, tree.group.id);
        assert_eq!(tree.sub_groups[0].name, "VPS");
        assert_eq!(groups.find_all_trees().await.unwrap().len(), 2);
    }
}
