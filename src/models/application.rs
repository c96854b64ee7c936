//! Application model.

use super::dashboard::StatusCount;
use super::group::GroupRef;
use super::validation::{validate_optional, validate_required, validate_url};
use crate::error::AppError;
use serde::{Deserialize, Serialize};

wire_enum! {
    /// Lifecycle status of an application.
    pub enum ApplicationStatus {
        Active => "ACTIVE",
        Discontinued => "DISCONTINUED",
    }
}

/// An application belonging to exactly one group.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Application {
    pub id: String,
    pub name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    pub status: ApplicationStatus,
    pub group_id: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gitlab_project_id: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gitlab_project_url: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub availability_url: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group: Option<GroupRef>,

    #[serde(rename = "_count", default, skip_serializing_if = "Option::is_none")]
    pub count: Option<ApplicationCounts>,
}

/// Aggregate counts attached to an application.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplicationCounts {
    #[serde(default)]
    pub features: u64,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub test_requests: Option<u64>,
}

/// Application reference embedded in features, test cases and requests.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApplicationRef {
    pub id: String,
    pub name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group: Option<GroupRef>,
}

/// Per-status breakdown returned by `/applications/:id/stats`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplicationStats {
    #[serde(default)]
    pub features: Vec<StatusCount>,

    #[serde(default)]
    pub test_cases: Vec<StatusCount>,

    #[serde(default)]
    pub requests: Vec<StatusCount>,
}

/// Payload for `POST /applications`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewApplication {
    pub name: String,
    pub group_id: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub gitlab_project_id: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub gitlab_project_url: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub availability_url: Option<String>,
}

impl NewApplication {
    pub fn validate(&self) -> Result<(), AppError> {
        validate_required(&self.name, "name")?;
        validate_required(&self.group_id, "groupId")?;
        validate_url(self.gitlab_project_url.as_deref(), "gitlabProjectUrl")?;
        validate_url(self.availability_url.as_deref(), "availabilityUrl")
    }
}

/// Payload for `PUT /applications/:id`.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplicationUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<ApplicationStatus>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub group_id: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub gitlab_project_id: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub gitlab_project_url: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub availability_url: Option<String>,
}

impl ApplicationUpdate {
    pub fn validate(&self) -> Result<(), AppError> {
        validate_optional(self.name.as_deref(), "name")?;
        validate_optional(self.group_id.as_deref(), "groupId")?;
        validate_url(self.gitlab_project_url.as_deref(), "gitlabProjectUrl")?;
        validate_url(self.availability_url.as_deref(), "availabilityUrl")
    }
}
