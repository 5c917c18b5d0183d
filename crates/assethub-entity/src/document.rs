//! The root JSON document.

use serde::{Deserialize, Serialize};

use assethub_core::types::{AssetId, MainGroupId, SubGroupId};

use crate::asset::Asset;
use crate::group::{MainGroup, SubGroup};
use crate::notification::NotificationSettings;

/// Next free identifier per collection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NextIds {
    /// Next user id. Users are not managed here but the counter is kept.
    #[serde(default = "first_id")]
    pub users: u64,
    /// Next main group id.
    #[serde(default = "first_id")]
    pub main_groups: u64,
    /// Next sub group id.
    #[serde(default = "first_id")]
    pub sub_groups: u64,
    /// Next asset id.
    #[serde(default = "first_id")]
    pub assets: u64,
}

impl Default for NextIds {
    fn default() -> Self {
        Self {
            users: 1,
            main_groups: 1,
            sub_groups: 1,
            assets: 1,
        }
    }
}

fn first_id() -> u64 {
    1
}

/// Everything AssetHub persists, replaced wholesale on every write.
///
/// Top-level keys this crate does not model (such as `users`) are kept in
/// `extra` and written back unchanged.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Document {
    /// Top-level categories.
    #[serde(default)]
    pub main_groups: Vec<MainGroup>,
    /// Sub categories.
    #[serde(default)]
    pub sub_groups: Vec<SubGroup>,
    /// Tracked assets.
    #[serde(default)]
    pub assets: Vec<Asset>,
    /// Notification settings singleton.
    #[serde(default)]
    pub notification_settings: NotificationSettings,
    /// Identifier counters.
    #[serde(default)]
    pub next_ids: NextIds,
    /// Unmodelled top-level keys.
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl Document {
    /// Allocate the next asset id.
    pub fn allocate_asset_id(&mut self) -> AssetId {
        let id = AssetId::new(self.next_ids.assets);
        self.next_ids.assets += 1;
        id
    }

    /// Allocate the next main group id.
    pub fn allocate_main_group_id(&mut self) -> MainGroupId {
        let id = MainGroupId::new(self.next_ids.main_groups);
        self.next_ids.main_groups += 1;
        id
    }

    /// Allocate the next sub group id.
    pub fn allocate_sub_group_id(&mut self) -> SubGroupId {
        let id = SubGroupId::new(self.next_ids.sub_groups);
        self.next_ids.sub_groups += 1;
        id
    }

    /// Find an asset by id.
    pub fn asset(&self, id: AssetId) -> Option<&Asset> {
        self.assets.iter().find(|a| a.id == id)
    }

    /// Find an asset by id, mutably.
    pub fn asset_mut(&mut self, id: AssetId) -> Option<&mut Asset> {
        self.assets.iter_mut().find(|a| a.id == id)
    }

    /// Find a main group by id.
    pub fn main_group(&self, id: MainGroupId) -> Option<&MainGroup> {
        self.main_groups.iter().find(|g| g.id == id)
    }

    /// Find a sub group by id.
    pub fn sub_group(&self, id: SubGroupId) -> Option<&SubGroup> {
        self.sub_groups.iter().find(|g| g.id == id)
    }

    /// Sub groups under the given main group.
    pub fn sub_groups_of(&self, parent: MainGroupId) -> impl Iterator<Item = &SubGroup> {
        self.sub_groups.iter().filter(move |g| g.parent_id == parent)
    }

    /// Assets with expiry reminders switched on.
    pub fn notify_enabled_assets(&self) -> impl Iterator<Item = &Asset> {
        self.assets.iter().filter(|a| a.expiry_notify)
    }
}
