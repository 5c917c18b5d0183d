//! Category management: main groups and their sub groups.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::info;

use assethub_core::error::AppError;
use assethub_core::types::{MainGroupId, SubGroupId};
use assethub_entity::{MainGroup, SubGroup};
use assethub_store::repositories::GroupRepository;
use assethub_store::repositories::group::{GroupTree, UpdateSubGroupParams};

/// Request to create or rename a group.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GroupRequest {
    /// Group name.
    pub name: String,
    /// Icon name.
    #[serde(default)]
    pub icon: Option<String>,
}

/// Request to create a sub group.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateSubGroupRequest {
    /// Sub group name.
    pub name: String,
    /// Icon name.
    #[serde(default)]
    pub icon: Option<String>,
    /// Serialized field configuration.
    #[serde(default)]
    pub config: String,
}

/// Request to edit a sub group.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateSubGroupRequest {
    /// Sub group name.
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

/// A main group with its sub groups, as returned to clients.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GroupWithChildren {
    /// The main group.
    #[serde(flatten)]
    pub group: MainGroup,
    /// Its sub groups.
    pub sub_groups: Vec<SubGroup>,
}

impl From<GroupTree> for GroupWithChildren {
    fn from(tree: GroupTree) -> Self {
        Self {
            group: tree.group,
            sub_groups: tree.sub_groups,
        }
    }
}

/// Manages main groups and sub groups.
#[derive(Debug, Clone)]
pub struct GroupService {
    /// Group repository.
    group_repo: Arc<GroupRepository>,
}

impl GroupService {
    /// Creates a new group service.
    pub fn new(group_repo: Arc<GroupRepository>) -> Self {
        Self { group_repo }
    }

    /// All main groups with their sub groups.
    pub async fn list_groups(&self) -> Result<Vec<GroupWithChildren>, AppError> {
        Ok(self
            .group_repo
            .find_all_trees()
            .await?
            .into_iter()
            .map(GroupWithChildren::from)
            .collect())
    }

    /// Creates a main group.
    pub async fn create_main_group(
        &self,
        name: String,
        icon: Option<String>,
    ) -> Result<MainGroup, AppError> {
        let name = validate_name(&name)?;
        let group = self.group_repo.create_main(name, normalize_icon(icon)).await?;
        info!(group_id = %group.id, name = %group.name, "Main group created");
        Ok(group)
    }

    /// Renames a main group.
    pub async fn update_main_group(
        &self,
        id: MainGroupId,
        req: GroupRequest,
    ) -> Result<MainGroup, AppError> {
        let name = validate_name(&req.name)?;
        let group = self
            .group_repo
            .update_main(id, name, normalize_icon(req.icon))
            .await?;
        info!(group_id = %id, "Main group updated");
        Ok(group)
    }

    /// Deletes an empty main group.
    pub async fn delete_main_group(&self, id: MainGroupId) -> Result<(), AppError> {
        self.group_repo.delete_main(id).await?;
        info!(group_id = %id, "Main group deleted");
        Ok(())
    }

    /// Duplicates a main group and its sub groups.
    pub async fn copy_main_group(&self, id: MainGroupId) -> Result<GroupWithChildren, AppError> {
        let tree = self.group_repo.copy_main(id).await?;
        info!(
            source_id = %id,
            group_id = %tree.group.id,
            sub_groups = tree.sub_groups.len(),
            "Main group copied"
        );
        Ok(tree.into())
    }

    /// Creates a sub group under `parent_id`.
    pub async fn create_sub_group(
        &self,
        parent_id: MainGroupId,
        req: CreateSubGroupRequest,
    ) -> Result<SubGroup, AppError> {
        let name = validate_name(&req.name)?;
        let sub = self
            .group_repo
            .create_sub(parent_id, name, normalize_icon(req.icon), normalize_config(req.config))
            .await?;
        info!(sub_group_id = %sub.id, parent_id = %parent_id, "Sub group created");
        Ok(sub)
    }

    /// Edits a sub group, optionally moving it to another main group.
    pub async fn update_sub_group(
        &self,
        id: SubGroupId,
        req: UpdateSubGroupRequest,
    ) -> Result<SubGroup, AppError> {
        let name = validate_name(&req.name)?;
        let sub = self
            .group_repo
            .update_sub(
                id,
                UpdateSubGroupParams {
                    name,
                    icon: normalize_icon(req.icon),
                    config: normalize_config(req.config),
                    parent_id: req.parent_id,
                },
            )
            .await?;
        info!(sub_group_id = %id, parent_id = %sub.parent_id, "Sub group updated");
        Ok(sub)
    }

    /// Deletes a sub group and its assets. Returns the number of assets removed.
    pub async fn delete_sub_group(&self, id: SubGroupId) -> Result<usize, AppError> {
        let removed = self.group_repo.delete_sub(id).await?;
        info!(sub_group_id = %id, assets_removed = removed, "Sub group deleted");
        Ok(removed)
    }

    /// Duplicates a sub group.
    pub async fn copy_sub_group(&self, id: SubGroupId) -> Result<SubGroup, AppError> {
        let sub = self.group_repo.copy_sub(id).await?;
        info!(source_id = %id, sub_group_id = %sub.id, "Sub group copied");
        Ok(sub)
    }
}

fn validate_name(name: &str) -> Result<String, AppError> {
    let name = name.trim();
    if name.is_empty() {
        return Err(AppError::validation("Group name cannot be empty"));
    }
    Ok(name.to_string())
}

fn normalize_icon(icon: Option<String>) -> Option<String> {
    icon.map(|i| i.trim().to_string()).filter(|i| !i.is_empty())
}

fn normalize_config(config: String) -> String {
    if config.trim().is_empty() {
        "[]".to_string()
    } else {
        config
    }
}
