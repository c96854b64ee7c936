//! Dashboard statistics.

use serde::{Deserialize, Serialize};

/// `{ status, count }` pair used by every per-status breakdown.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusCount {
    pub status: String,
    pub count: u64,
}

/// Data of `GET /dashboard/stats`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    pub overview: Overview,

    #[serde(default)]
    pub test_cases_by_status: Vec<StatusCount>,

    #[serde(default)]
    pub requests_by_status: Vec<StatusCount>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Overview {
    pub total_groups: u64,
    pub total_applications: u64,
    pub total_features: u64,
    pub total_test_cases: u64,
    pub total_requests: u64,
    pub pending_requests: u64,
    pub recent_pipelines: u64,
}

/// Data of `GET /dashboard/activity`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecentActivity {
    #[serde(default)]
    pub test_cases: Vec<ActivityTestCase>,

    #[serde(default)]
    pub requests: Vec<ActivityRequest>,

    #[serde(default)]
    pub pipelines: Vec<super::GitlabPipeline>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActivityTestCase {
    pub id: String,
    pub name: String,
    pub status: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub feature: Option<serde_json::Value>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActivityRequest {
    pub id: String,
    pub title: String,
    pub status: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub application: Option<serde_json::Value>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub requester: Option<serde_json::Value>,
}

/// Data of `GET /dashboard/pipeline-stats`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PipelineStats {
    #[serde(default)]
    pub pipelines_by_status: Vec<StatusCount>,

    #[serde(default)]
    pub test_results_by_status: Vec<StatusCount>,

    #[serde(default)]
    pub recent_pipelines: Vec<super::GitlabPipeline>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stats_deserialization() {
        let json = r#"{
            "overview": {
                "totalGroups": 2, "totalApplications": 5, "totalFeatures": 11,
                "totalTestCases": 40, "totalRequests": 6, "pendingRequests": 3,
                "recentPipelines": 1
            },
            "testCasesByStatus": [{"status": "PRODUCTIVE", "count": 30}, {"status": "PLANNED", "count": 10}],
            "requestsByStatus": []
        }"#;
        let stats: DashboardStats = serde_json::from_str(json).unwrap();
        assert_eq!(stats.overview.pending_requests, 3);
        assert_eq!(stats.test_cases_by_status[1].count, 10);
    }

    #[test]
    fn test_activity_deserialization() {
        let json = r#"{
            "testCases": [{"id": "tc1", "name": "Login", "status": "PLANNED",
                           "updatedAt": "2024-01-01T00:00:00",
                           "feature": {"name": "Auth", "application": {"name": "Portal"}}}],
            "requests": [],
            "pipelines": [{"id": "p1", "gitlabPipelineId": "99", "branch": "main",
                           "status": "PASSED", "executedAt": "2024-01-01T00:00:00", "webUrl": null}]
        }"#;
        let activity: RecentActivity = serde_json::from_str(json).unwrap();
        assert_eq!(activity.test_cases.len(), 1);
        assert_eq!(activity.pipelines[0].gitlab_pipeline_id, "99");
    }
}
