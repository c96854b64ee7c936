//! CI pipeline models.

use super::validation::{validate_required, validate_url};
use crate::error::AppError;
use serde::{Deserialize, Serialize};

wire_enum! {
    /// Status of a GitLab pipeline run.
    pub enum PipelineStatus {
        Pending => "PENDING",
        Running => "RUNNING",
        Passed => "PASSED",
        Failed => "FAILED",
        Canceled => "CANCELED",
        Skipped => "SKIPPED",
    }
}

impl PipelineStatus {
    /// Whether the pipeline has reached a final state.
    pub fn is_finished(&self) -> bool {
        !matches!(self, Self::Pending | Self::Running)
    }
}

wire_enum! {
    /// Outcome of a single test case within a pipeline.
    pub enum TestResultStatus {
        Passed => "PASSED",
        Failed => "FAILED",
        Skipped => "SKIPPED",
        NotExecuted => "NOT_EXECUTED",
    }
}

/// A GitLab CI run known to DocuDash.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GitlabPipeline {
    pub id: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gitlab_project_id: Option<String>,

    pub gitlab_pipeline_id: String,
    pub branch: String,
    pub status: PipelineStatus,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub web_url: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub executed_at: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,

    #[serde(rename = "_count", default, skip_serializing_if = "Option::is_none")]
    pub count: Option<PipelineCounts>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PipelineCounts {
    #[serde(default)]
    pub test_case_results: u64,
}

/// Links a test case to a pipeline run with its outcome.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TestCasePipelineResult {
    pub id: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub test_case_id: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pipeline_id: Option<String>,

    pub status: TestResultStatus,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub log_url: Option<String>,

    /// Execution time in seconds.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration: Option<u64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub test_case: Option<ResultTestCase>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pipeline: Option<GitlabPipeline>,
}

/// Test case reference inside a pipeline result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResultTestCase {
    pub id: String,
    pub name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scenario_name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub feature: Option<super::feature::FeatureRef>,
}

/// Data of `GET /pipelines/:id/results`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PipelineResults {
    pub results: Vec<TestCasePipelineResult>,
    pub summary: ResultSummary,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResultSummary {
    pub total: u64,
    pub passed: u64,
    pub failed: u64,
    pub skipped: u64,
    pub not_executed: u64,
}

impl ResultSummary {
    /// Share of passed results, 0.0 when nothing ran.
    pub fn pass_rate(&self) -> f64 {
        if self.total == 0 {
            0.0
        } else {
            self.passed as f64 / self.total as f64
        }
    }
}

/// Data of `POST /pipelines/sync`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SyncStatus {
    pub project_id: String,
    pub status: String,
}

/// One test outcome reported from CI.
///
/// The server matches by `testCaseId` first, then by `scenarioName`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TestResultInput {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub test_case_id: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub scenario_name: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<TestResultStatus>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub log_url: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration: Option<u64>,
}

impl TestResultInput {
    pub fn validate(&self) -> Result<(), AppError> {
        if self.test_case_id.is_none() && self.scenario_name.is_none() {
            return Err(AppError::invalid_input_field(
                "Each test result needs testCaseId or scenarioName",
                "testResults",
            ));
        }
        validate_url(self.log_url.as_deref(), "testResults.logUrl")
    }
}

/// Payload for `POST /pipelines/results`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterPipelineResult {
    pub gitlab_project_id: String,
    pub gitlab_pipeline_id: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub branch: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub pipeline_status: Option<PipelineStatus>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub web_url: Option<String>,

    /// RFC 3339 timestamp of the run.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub executed_at: Option<String>,

    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub test_results: Vec<TestResultInput>,
}

impl RegisterPipelineResult {
    pub fn validate(&self) -> Result<(), AppError> {
        validate_required(&self.gitlab_project_id, "gitlabProjectId")?;
        validate_required(&self.gitlab_pipeline_id, "gitlabPipelineId")?;
        validate_url(self.web_url.as_deref(), "webUrl")?;
        if let Some(ts) = &self.executed_at {
            chrono::DateTime::parse_from_rfc3339(ts).map_err(|e| {
                AppError::invalid_input_field(format!("Invalid executedAt '{ts}': {e}"), "executedAt")
            })?;
        }
        self.test_results
            .iter()
            .try_for_each(TestResultInput::validate)
    }
}
