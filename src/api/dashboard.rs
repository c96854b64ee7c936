//! Dashboard statistics endpoints.

use crate::error::AppResult;
use crate::models::{DashboardStats, ListParams, PipelineStats, RecentActivity};
use crate::services::ApiClient;
use serde::Serialize;

#[derive(Serialize)]
struct LimitQuery {
    #[serde(skip_serializing_if = "Option::is_none")]
    limit: Option<u32>,
}

#[derive(Serialize)]
struct DaysQuery {
    #[serde(skip_serializing_if = "Option::is_none")]
    days: Option<u32>,
}

pub struct DashboardApi<'a> {
    client: &'a ApiClient,
}

impl<'a> DashboardApi<'a> {
    pub(crate) fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }

    /// Entity totals and per-status breakdowns.
    pub async fn stats(&self) -> AppResult<DashboardStats> {
        self.client.get("/dashboard/stats").await
    }

    /// Recently touched test cases and requests plus the latest pipelines.
    pub async fn activity(&self, limit: Option<u32>) -> AppResult<RecentActivity> {
        self.client
            .get_with("/dashboard/activity", &LimitQuery { limit })
            .await
    }

    /// Test case counts per status; the shape depends on the filters, so
    /// it is returned as raw JSON.
    pub async fn test_cases_by_status(&self, params: &ListParams) -> AppResult<serde_json::Value> {
        self.client
            .get_with("/dashboard/test-cases-by-status", params)
            .await
    }

    /// Pipeline and test result breakdown over the last `days` (server default 7).
    pub async fn pipeline_stats(&self, days: Option<u32>) -> AppResult<PipelineStats> {
        self.client
            .get_with("/dashboard/pipeline-stats", &DaysQuery { days })
            .await
    }
}
