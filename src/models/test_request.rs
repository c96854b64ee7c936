//! Test request model.
//!
//! A test request is a user's ask for new coverage on an application. It
//! moves through `NEW → IN_ANALYSIS → APPROVED | REJECTED`, and approved
//! requests end up `IMPLEMENTED` once a test case has been generated.

use super::application::ApplicationRef;
use super::user::UserSummary;
use super::validation::{validate_optional, validate_required, validate_url};
use crate::error::AppError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

wire_enum! {
    pub enum TestRequestStatus {
        New => "NEW",
        InAnalysis => "IN_ANALYSIS",
        Approved => "APPROVED",
        Rejected => "REJECTED",
        Implemented => "IMPLEMENTED",
    }
}

impl TestRequestStatus {
    /// Statuses reachable from this one in the documented lifecycle.
    ///
    /// The server does not enforce these; they drive UI hints only.
    pub fn next_statuses(&self) -> &'static [TestRequestStatus] {
        match self {
            Self::New => &[Self::InAnalysis],
            Self::InAnalysis => &[Self::Approved, Self::Rejected],
            Self::Approved => &[Self::Implemented],
            Self::Rejected | Self::Implemented => &[],
        }
    }

    pub fn can_transition_to(&self, next: TestRequestStatus) -> bool {
        self.next_statuses().contains(&next)
    }
}

wire_enum! {
    /// Kind of coverage being requested.
    pub enum TestRequestType {
        Front => "FRONT",
        Api => "API",
    }
}

/// A request for new test coverage.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TestRequest {
    pub id: String,
    pub title: String,
    pub description: String,
    pub status: TestRequestStatus,
    pub application_id: String,
    pub requester_id: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub assignee_id: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub azure_work_item_id: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub azure_work_item_url: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub additional_notes: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub generated_test_case_id: Option<String>,

    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub request_type: Option<TestRequestType>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub environment: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub has_auth: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub auth_type: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub auth_users: Option<Vec<String>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub front_plan: Option<FrontTestPlan>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_plan: Option<ApiTestPlan>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub application: Option<ApplicationRef>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub requester: Option<UserSummary>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub assignee: Option<UserSummary>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub generated_test_case: Option<GeneratedTestCase>,
}

/// The test case produced from an implemented request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneratedTestCase {
    pub id: String,
    pub name: String,
    pub status: String,
}

// Front-end test plan

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FrontTestPlan {
    #[serde(default)]
    pub tasks: Vec<FrontTestTask>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FrontTestTask {
    pub title: String,
    pub expected_result: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expected_screenshot_url: Option<String>,

    #[serde(default)]
    pub sub_actions: Vec<FrontTestSubAction>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FrontTestSubAction {
    pub description: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub screenshot_url: Option<String>,
}

impl FrontTestPlan {
    pub fn validate(&self) -> Result<(), AppError> {
        for task in &self.tasks {
            validate_required(&task.title, "frontPlan.tasks.title")?;
            validate_required(&task.expected_result, "frontPlan.tasks.expectedResult")?;
            validate_url(
                task.expected_screenshot_url.as_deref(),
                "frontPlan.tasks.expectedScreenshotUrl",
            )?;
            for action in &task.sub_actions {
                validate_required(&action.description, "frontPlan.tasks.subActions.description")?;
                validate_url(
                    action.screenshot_url.as_deref(),
                    "frontPlan.tasks.subActions.screenshotUrl",
                )?;
            }
        }
        Ok(())
    }
}

// API test plan

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiTestPlan {
    #[serde(default)]
    pub base_url: String,

    #[serde(default)]
    pub scenarios: Vec<ApiTestScenario>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiTestScenario {
    pub name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(default)]
    pub endpoints: Vec<ApiTestEndpoint>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiTestEndpoint {
    pub method: String,
    pub url: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub headers: Option<BTreeMap<String, String>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payload: Option<serde_json::Value>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub response: Option<ApiTestResponse>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiTestResponse {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub json_extractions: Option<Vec<JsonExtraction>>,
}

/// Value captured from a response for use by later endpoints.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JsonExtraction {
    pub path: String,
    pub name: String,
}

const HTTP_METHODS: &[&str] = &["GET", "POST", "PUT", "PATCH", "DELETE", "HEAD", "OPTIONS"];

impl ApiTestPlan {
    pub fn validate(&self) -> Result<(), AppError> {
        validate_required(&self.base_url, "apiPlan.baseUrl")?;
        validate_url(Some(&self.base_url), "apiPlan.baseUrl")?;
        for scenario in &self.scenarios {
            validate_required(&scenario.name, "apiPlan.scenarios.name")?;
            for endpoint in &scenario.endpoints {
                let method = endpoint.method.to_ascii_uppercase();
                if !HTTP_METHODS.contains(&method.as_str()) {
                    return Err(AppError::invalid_input_field(
                        format!("Invalid HTTP method '{}'", endpoint.method),
                        "apiPlan.scenarios.endpoints.method",
                    ));
                }
                validate_required(&endpoint.url, "apiPlan.scenarios.endpoints.url")?;
            }
        }
        Ok(())
    }
}

/// Payload for `POST /test-requests`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewTestRequest {
    pub title: String,
    pub description: String,
    pub application_id: String,

    #[serde(rename = "type")]
    pub request_type: TestRequestType,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub azure_work_item_id: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub azure_work_item_url: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub additional_notes: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub environment: Option<String>,

    pub has_auth: bool,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub auth_type: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub auth_users: Option<Vec<String>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub front_plan: Option<FrontTestPlan>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_plan: Option<ApiTestPlan>,
}

impl NewTestRequest {
    pub fn new(
        title: impl Into<String>,
        description: impl Into<String>,
        application_id: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            application_id: application_id.into(),
            request_type: TestRequestType::Front,
            azure_work_item_id: None,
            azure_work_item_url: None,
            additional_notes: None,
            environment: None,
            has_auth: false,
            auth_type: None,
            auth_users: None,
            front_plan: None,
            api_plan: None,
        }
    }

    pub fn validate(&self) -> Result<(), AppError> {
        validate_required(&self.title, "title")?;
        validate_required(&self.description, "description")?;
        validate_required(&self.application_id, "applicationId")?;
        validate_url(self.azure_work_item_url.as_deref(), "azureWorkItemUrl")?;
        if self.has_auth {
            validate_optional(self.auth_type.as_deref(), "authType")?;
        }
        if let Some(plan) = &self.front_plan {
            plan.validate()?;
        }
        if let Some(plan) = &self.api_plan {
            plan.validate()?;
        }
        Ok(())
    }
}

/// Payload for `PUT /test-requests/:id`.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TestRequestUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<TestRequestStatus>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub assignee_id: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub azure_work_item_id: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub azure_work_item_url: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub additional_notes: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub generated_test_case_id: Option<String>,

    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub request_type: Option<TestRequestType>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub environment: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub has_auth: Option<bool>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub auth_type: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub auth_users: Option<Vec<String>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub front_plan: Option<FrontTestPlan>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_plan: Option<ApiTestPlan>,
}

impl TestRequestUpdate {
    pub fn validate(&self) -> Result<(), AppError> {
        validate_optional(self.title.as_deref(), "title")?;
        validate_optional(self.description.as_deref(), "description")?;
        validate_url(self.azure_work_item_url.as_deref(), "azureWorkItemUrl")?;
        if let Some(plan) = &self.front_plan {
            plan.validate()?;
        }
        if let Some(plan) = &self.api_plan {
            plan.validate()?;
        }
        Ok(())
    }
}

/// Payload for `PATCH /test-requests/:id/status`.
///
/// `notes` are appended to the request's additional notes with a timestamp
/// by the server.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusChange {
    pub status: TestRequestStatus,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub assignee_id: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub generated_test_case_id: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl StatusChange {
    pub fn new(status: TestRequestStatus) -> Self {
        Self {
            status,
            assignee_id: None,
            generated_test_case_id: None,
            notes: None,
        }
    }

    pub fn validate(&self) -> Result<(), AppError> {
        validate_optional(self.assignee_id.as_deref(), "assigneeId")?;
        validate_optional(self.generated_test_case_id.as_deref(), "generatedTestCaseId")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lifecycle() {
        use TestRequestStatus::*;
        assert!(New.can_transition_to(InAnalysis));
        assert!(InAnalysis.can_transition_to(Approved));
        assert!(InAnalysis.can_transition_to(Rejected));
        assert!(Approved.can_transition_to(Implemented));
        assert!(!New.can_transition_to(Implemented));
        assert!(Rejected.next_statuses().is_empty());
        assert!(!Approved.can_transition_to(Rejected));
    }

    #[test]
    fn test_request_with_plans() {
        let json = r#"{
            "id": "r1",
            "title": "Cubrir checkout",
            "description": "Flujo completo",
            "status": "IN_ANALYSIS",
            "applicationId": "a1",
            "requesterId": "u1",
            "type": "API",
            "hasAuth": true,
            "authUsers": ["qa1"],
            "apiPlan": {
                "baseUrl": "https://api.example.com",
                "scenarios": [{
                    "name": "crear orden",
                    "endpoints": [{
                        "method": "POST",
                        "url": "/orders",
                        "headers": {"X-Trace": "1"},
                        "payload": {"sku": "A1"},
                        "response": {"json_extractions": [{"path": "$.id", "name": "orderId"}]}
                    }]
                }]
            },
            "requester": {"id": "u1", "firstName": "Ana", "lastName": "Ruiz", "email": "ana@x.com"},
            "generatedTestCase": null
        }"#;
        let req: TestRequest = serde_json::from_str(json).unwrap();
        assert_eq!(req.status, TestRequestStatus::InAnalysis);
        assert_eq!(req.request_type, Some(TestRequestType::Api));
        let plan = req.api_plan.unwrap();
        assert!(plan.validate().is_ok());
        let extraction = &plan.scenarios[0].endpoints[0]
            .response
            .as_ref()
            .unwrap()
            .json_extractions
            .as_ref()
            .unwrap()[0];
        assert_eq!(extraction.name, "orderId");
    }

    #[test]
    fn test_api_plan_rejects_unknown_method() {
        let plan = ApiTestPlan {
            base_url: "https://api.example.com".to_string(),
            scenarios: vec![ApiTestScenario {
                name: "x".to_string(),
                description: None,
                endpoints: vec![ApiTestEndpoint {
                    method: "FETCH".to_string(),
                    url: "/a".to_string(),
                    headers: None,
                    payload: None,
                    response: None,
                }],
            }],
        };
        assert!(plan.validate().is_err());
    }

    #[test]
    fn test_new_request_defaults() {
        let input = NewTestRequest::new("Cubrir login", "Casos negativos", "a1");
        assert!(input.validate().is_ok());
        let json = serde_json::to_value(&input).unwrap();
        assert_eq!(json["type"], "FRONT");
        assert_eq!(json["hasAuth"], false);
        assert!(json.get("frontPlan").is_none());
    }

    #[test]
    fn test_status_change_serialization() {
        let mut change = StatusChange::new(TestRequestStatus::Approved);
        change.notes = Some("Listo para implementar".to_string());
        let json = serde_json::to_value(&change).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"status": "APPROVED", "notes": "Listo para implementar"})
        );
    }
}
