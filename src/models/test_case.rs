//! Test case and Gherkin step models.

use super::feature::FeatureRef;
use super::pipeline::TestCasePipelineResult;
use super::validation::{validate_optional, validate_required, validate_url};
use crate::error::AppError;
use serde::{Deserialize, Serialize};

wire_enum! {
    /// How a test case is executed.
    pub enum TestCaseType {
        Manual => "MANUAL",
        Automated => "AUTOMATED",
    }
}

wire_enum! {
    pub enum TestCasePriority {
        High => "HIGH",
        Medium => "MEDIUM",
        Low => "LOW",
    }
}

wire_enum! {
    pub enum TestCaseStatus {
        Planned => "PLANNED",
        InDevelopment => "IN_DEVELOPMENT",
        Productive => "PRODUCTIVE",
        Obsolete => "OBSOLETE",
    }
}

wire_enum! {
    /// Gherkin keyword of a step.
    pub enum GherkinStepType {
        Given => "GIVEN",
        When => "WHEN",
        Then => "THEN",
        And => "AND",
        But => "BUT",
    }
}

impl GherkinStepType {
    /// Keyword as written in a `.feature` file.
    pub fn keyword(&self) -> &'static str {
        match self {
            Self::Given => "Given",
            Self::When => "When",
            Self::Then => "Then",
            Self::And => "And",
            Self::But => "But",
        }
    }
}

/// A test case belonging to one feature.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TestCase {
    pub id: String,
    pub name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(rename = "type")]
    pub case_type: TestCaseType,
    pub priority: TestCasePriority,
    pub status: TestCaseStatus,
    pub feature_id: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub azure_user_story_id: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub azure_user_story_url: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub azure_test_case_id: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub azure_test_case_url: Option<String>,

    #[serde(default)]
    pub tags: Vec<String>,

    /// Scenario name used to match CI results back to this case.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scenario_name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub feature: Option<FeatureRef>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub steps: Option<Vec<GherkinStep>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pipeline_results: Option<Vec<TestCasePipelineResult>>,

    #[serde(rename = "_count", default, skip_serializing_if = "Option::is_none")]
    pub count: Option<TestCaseCounts>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TestCaseCounts {
    #[serde(default)]
    pub steps: u64,

    #[serde(default)]
    pub pipeline_results: u64,
}

/// One Gherkin line of a test case.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GherkinStep {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    #[serde(rename = "type")]
    pub step_type: GherkinStepType,
    pub text: String,
    pub order: u32,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sub_steps: Option<Vec<GherkinSubStep>>,
}

impl GherkinStep {
    /// Render as a `.feature` file line, e.g. `Given the user is logged in`.
    pub fn to_gherkin_line(&self) -> String {
        format!("{} {}", self.step_type.keyword(), self.text)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GherkinSubStep {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub text: String,
    pub order: u32,
}

/// A step as submitted on create or `PUT /test-cases/:id/steps`.
///
/// `order` may be omitted; the server then uses the position in the list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GherkinStepInput {
    #[serde(rename = "type")]
    pub step_type: GherkinStepType,
    pub text: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub order: Option<u32>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub sub_steps: Option<Vec<GherkinSubStepInput>>,
}

impl GherkinStepInput {
    pub fn new(step_type: GherkinStepType, text: impl Into<String>) -> Self {
        Self {
            step_type,
            text: text.into(),
            order: None,
            sub_steps: None,
        }
    }

    pub fn validate(&self) -> Result<(), AppError> {
        validate_required(&self.text, "steps.text")?;
        for sub in self.sub_steps.iter().flatten() {
            validate_required(&sub.text, "steps.subSteps.text")?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GherkinSubStepInput {
    pub text: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub order: Option<u32>,
}

impl From<GherkinStep> for GherkinStepInput {
    fn from(step: GherkinStep) -> Self {
        Self {
            step_type: step.step_type,
            text: step.text,
            order: Some(step.order),
            sub_steps: step.sub_steps.map(|subs| {
                subs.into_iter()
                    .map(|s| GherkinSubStepInput {
                        text: s.text,
                        order: Some(s.order),
                    })
                    .collect()
            }),
        }
    }
}

/// Validate a full step list: every step well-formed and the first one a
/// context-opening keyword rather than a continuation.
pub fn validate_steps(steps: &[GherkinStepInput]) -> Result<(), AppError> {
    if let Some(first) = steps.first() {
        if matches!(first.step_type, GherkinStepType::And | GherkinStepType::But) {
            return Err(AppError::invalid_input_field(
                format!("First step cannot start with '{}'", first.step_type.keyword()),
                "steps",
            ));
        }
    }
    steps.iter().try_for_each(GherkinStepInput::validate)
}

/// Payload for `POST /test-cases`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewTestCase {
    pub name: String,
    pub feature_id: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub case_type: Option<TestCaseType>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority: Option<TestCasePriority>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<TestCaseStatus>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub azure_user_story_id: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub azure_user_story_url: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub azure_test_case_id: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub azure_test_case_url: Option<String>,

    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub scenario_name: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub steps: Option<Vec<GherkinStepInput>>,
}

impl NewTestCase {
    /// Minimal payload; everything else keeps server defaults.
    pub fn new(name: impl Into<String>, feature_id: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            feature_id: feature_id.into(),
            description: None,
            case_type: None,
            priority: None,
            status: None,
            azure_user_story_id: None,
            azure_user_story_url: None,
            azure_test_case_id: None,
            azure_test_case_url: None,
            tags: Vec::new(),
            scenario_name: None,
            steps: None,
        }
    }

    pub fn validate(&self) -> Result<(), AppError> {
        validate_required(&self.name, "name")?;
        validate_required(&self.feature_id, "featureId")?;
        validate_url(self.azure_user_story_url.as_deref(), "azureUserStoryUrl")?;
        validate_url(self.azure_test_case_url.as_deref(), "azureTestCaseUrl")?;
        match &self.steps {
            Some(steps) => validate_steps(steps),
            None => Ok(()),
        }
    }
}

/// Payload for `PUT /test-cases/:id`.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TestCaseUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub case_type: Option<TestCaseType>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority: Option<TestCasePriority>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<TestCaseStatus>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub feature_id: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub azure_user_story_id: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub azure_user_story_url: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub azure_test_case_id: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub azure_test_case_url: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub scenario_name: Option<String>,
}

impl TestCaseUpdate {
    pub fn validate(&self) -> Result<(), AppError> {
        validate_optional(self.name.as_deref(), "name")?;
        validate_optional(self.feature_id.as_deref(), "featureId")?;
        validate_url(self.azure_user_story_url.as_deref(), "azureUserStoryUrl")?;
        validate_url(self.azure_test_case_url.as_deref(), "azureTestCaseUrl")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_test_case_deserialization() {
        let json = r#"{
            "id": "tc1",
            "name": "Login exitoso",
            "type": "AUTOMATED",
            "priority": "HIGH",
            "status": "PRODUCTIVE",
            "featureId": "f1",
            "tags": ["smoke"],
            "feature": {"id": "f1", "name": "Login"},
            "steps": [
                {"id": "s1", "type": "GIVEN", "text": "el usuario está en la página de login", "order": 1},
                {"id": "s2", "type": "WHEN", "text": "ingresa credenciales válidas", "order": 2,
                 "subSteps": [{"id": "ss1", "text": "email", "order": 1}]}
            ],
            "_count": {"steps": 2, "pipelineResults": 0}
        }"#;
        let tc: TestCase = serde_json::from_str(json).unwrap();
        assert_eq!(tc.case_type, TestCaseType::Automated);
        assert_eq!(tc.priority, TestCasePriority::High);
        let steps = tc.steps.unwrap();
        assert_eq!(steps[1].sub_steps.as_ref().unwrap().len(), 1);
        assert_eq!(
            steps[0].to_gherkin_line(),
            "Given el usuario está en la página de login"
        );
    }

    #[test]
    fn test_new_test_case_serialization() {
        let mut input = NewTestCase::new("Logout", "f1");
        input.case_type = Some(TestCaseType::Manual);
        input.steps = Some(vec![GherkinStepInput::new(GherkinStepType::Given, "a session")]);

        assert!(input.validate().is_ok());
        let json = serde_json::to_value(&input).unwrap();
        assert_eq!(json["type"], "MANUAL");
        assert_eq!(json["steps"][0]["type"], "GIVEN");
        assert!(json.get("tags").is_none());
        assert!(json.get("priority").is_none());
    }

    #[test]
    fn test_steps_cannot_open_with_and() {
        let steps = vec![
            GherkinStepInput::new(GherkinStepType::And, "something"),
            GherkinStepInput::new(GherkinStepType::Then, "result"),
        ];
        assert!(validate_steps(&steps).is_err());
        assert!(validate_steps(&[]).is_ok());
    }

    #[test]
    fn test_blank_sub_step_rejected() {
        let mut step = GherkinStepInput::new(GherkinStepType::When, "fills the form");
        step.sub_steps = Some(vec![GherkinSubStepInput {
            text: "".to_string(),
            order: None,
        }]);
        assert!(step.validate().is_err());
    }

    #[test]
    fn test_step_round_trips_into_input() {
        let step = GherkinStep {
            id: Some("s1".to_string()),
            step_type: GherkinStepType::Then,
            text: "sees the dashboard".to_string(),
            order: 3,
            sub_steps: None,
        };
        let input: GherkinStepInput = step.into();
        assert_eq!(input.order, Some(3));
        assert_eq!(input.step_type, GherkinStepType::Then);
    }
}
