//! Main group and sub group models.

use serde::{Deserialize, Serialize};

use assethub_core::types::{MainGroupId, SubGroupId};

/// A top-level asset category.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MainGroup {
    /// Unique group identifier.
    pub id: MainGroupId,
    /// Display name.
    pub name: String,
    /// Icon name (built-in icon or uploaded file name).
    #[serde(default)]
    pub icon: Option<String>,
}

/// A sub category under a main group.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubGroup {
    /// Unique sub group identifier.
    pub id: SubGroupId,
    /// Owning main group.
    pub parent_id: MainGroupId,
    /// Display name.
    pub name: String,
    /// Icon name.
    #[serde(default)]
    pub icon: Option<String>,
    /// Serialized field configuration for assets in this sub group.
    ///
    /// Opaque to the backend; the dashboard renders one input per field.
    #[serde(default)]
    pub config: String,
}
