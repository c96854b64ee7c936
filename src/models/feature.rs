//! Feature model.

use super::application::ApplicationRef;
use super::validation::{validate_optional, validate_required};
use crate::error::AppError;
use serde::{Deserialize, Serialize};

wire_enum! {
    /// Development status of a feature.
    pub enum FeatureStatus {
        Planned => "PLANNED",
        InDevelopment => "IN_DEVELOPMENT",
        Productive => "PRODUCTIVE",
    }
}

/// A feature belonging to one application.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Feature {
    pub id: String,
    pub name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Path of the `.feature` file in the test repository.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub feature_file_path: Option<String>,

    pub status: FeatureStatus,
    pub application_id: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub application: Option<ApplicationRef>,

    #[serde(rename = "_count", default, skip_serializing_if = "Option::is_none")]
    pub count: Option<FeatureCounts>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeatureCounts {
    #[serde(default)]
    pub test_cases: u64,
}

/// Feature reference embedded in test cases.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeatureRef {
    pub id: String,
    pub name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub application: Option<ApplicationRef>,
}

/// Payload for `POST /features`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewFeature {
    pub name: String,
    pub application_id: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub feature_file_path: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<FeatureStatus>,
}

impl NewFeature {
    pub fn validate(&self) -> Result<(), AppError> {
        validate_required(&self.name, "name")?;
        validate_required(&self.application_id, "applicationId")
    }
}

/// Payload for `PUT /features/:id`.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FeatureUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub feature_file_path: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<FeatureStatus>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub application_id: Option<String>,
}

impl FeatureUpdate {
    pub fn validate(&self) -> Result<(), AppError> {
        validate_optional(self.name.as_deref(), "name")?;
        validate_optional(self.application_id.as_deref(), "applicationId")
    }
}
