//! Dashboard counters.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::Serialize;

use assethub_core::error::AppError;
use assethub_notify::BusinessCalendar;
use assethub_notify::extractor;
use assethub_store::repositories::{AssetRepository, GroupRepository, SettingsRepository};

/// Counters shown on the dashboard.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    /// Number of main groups.
    pub main_groups: usize,
    /// Number of sub groups.
    pub sub_groups: usize,
    /// Number of assets.
    pub assets: usize,
    /// Assets whose earliest expiry falls within the reminder lead time.
    pub expiring_soon: usize,
    /// Assets whose earliest expiry has passed.
    pub expired: usize,
}

/// Computes dashboard counters.
#[derive(Debug, Clone)]
pub struct DashboardService {
    asset_repo: Arc<AssetRepository>,
    group_repo: Arc<GroupRepository>,
    settings_repo: Arc<SettingsRepository>,
    calendar: BusinessCalendar,
}

impl DashboardService {
    /// Creates a new dashboard service.
    pub fn new(
        asset_repo: Arc<AssetRepository>,
        group_repo: Arc<GroupRepository>,
        settings_repo: Arc<SettingsRepository>,
        calendar: BusinessCalendar,
    ) -> Self {
        Self {
            asset_repo,
            group_repo,
            settings_repo,
            calendar,
        }
    }

    /// Current counters.
    pub async fn stats(&self, now: DateTime<Utc>) -> Result<DashboardStats, AppError> {
        let trees = self.group_repo.find_all_trees().await?;
        let assets = self.asset_repo.find_all().await?;
        let lead = self.settings_repo.get().await?.days_before_expiry;

        let mut stats = DashboardStats {
            main_groups: trees.len(),
            sub_groups: trees.iter().map(|t| t.sub_groups.len()).sum(),
            assets: assets.len(),
            ..Default::default()
        };

        for days in assets
            .iter()
            .filter_map(extractor::earliest_expiry)
            .map(|date| self.calendar.days_remaining(date, now))
        {
            if days < 0 {
                stats.expired += 1;
            } else if days <= lead {
                stats.expiring_soon += 1;
            }
        }

        Ok(stats)
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;
    use crate::asset::CreateAssetRequest;
    use crate::testing::Fixture;

    #[tokio::test]
    async fn test_counts() {
        let fx = Fixture::new().await;
        for values in [
            r#"{"0":"soon@2025-03-05"}"#,
            r#"{"0":"gone@2025-01-01"}"#,
            r#"{"0":"later@2026-01-01"}"#,
            "{}",
        ] {
            fx.assets
                .create_asset(CreateAssetRequest {
                    name: "a".into(),
                    main_group_id: fx.main_id,
                    sub_group_id: fx.sub_id,
                    values: values.into(),
                    expiry_date: None,
                    expiry_notify: false,
                    notes: None,
                })
                .await
                .unwrap();
        }

        let now = Utc.with_ymd_and_hms(2025, 3, 1, 1, 0, 0).unwrap();
        let stats = fx.dashboard.stats(now).await.unwrap();
        assert_eq!(
            stats,
            DashboardStats {
                main_groups: 1,
                sub_groups: 1,
                assets: 4,
                expiring_soon: 1,
                expired: 1,
            }
        );
    }
}
