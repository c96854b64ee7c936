//! Group model.

use super::user::UserSummary;
use super::validation::{validate_optional, validate_required};
use crate::error::AppError;
use serde::{Deserialize, Serialize};

/// A group of applications that users can subscribe to.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Group {
    pub id: String,
    pub name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub applications: Option<Vec<GroupApplication>>,

    #[serde(rename = "_count", default, skip_serializing_if = "Option::is_none")]
    pub count: Option<GroupCounts>,
}

/// Aggregate counts attached to a group.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupCounts {
    #[serde(default)]
    pub applications: u64,

    #[serde(default)]
    pub subscriptions: u64,
}

/// Application reference listed under a group.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupApplication {
    pub id: String,
    pub name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
}

/// Minimal group reference embedded in other records.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupRef {
    pub id: String,
    pub name: String,
}

/// A user's subscription to a group.
///
/// Depending on the endpoint either `user` (group subscribers) or `group`
/// (user subscriptions) is populated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GroupSubscription {
    pub id: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group_id: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user: Option<UserSummary>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group: Option<GroupRef>,
}

/// Payload for `POST /groups`.
#[derive(Debug, Clone, Serialize)]
pub struct NewGroup {
    pub name: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl NewGroup {
    pub fn validate(&self) -> Result<(), AppError> {
        validate_required(&self.name, "name")
    }
}

/// Payload for `PUT /groups/:id`.
#[derive(Debug, Clone, Default, Serialize)]
pub struct GroupUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl GroupUpdate {
    pub fn validate(&self) -> Result<(), AppError> {
        validate_optional(self.name.as_deref(), "name")
    }
}
