//! Test case endpoints, including Gherkin steps and CI results.

use super::entity_path;
use crate::error::AppResult;
use crate::models::test_case::validate_steps;
use crate::models::{
    GherkinStep, GherkinStepInput, ListParams, NewTestCase, Paginated, TestCase,
    TestCasePipelineResult, TestCaseUpdate,
};
use crate::services::ApiClient;
use serde::Serialize;

#[derive(Serialize)]
struct StepsBody<'s> {
    steps: &'s [GherkinStepInput],
}

#[derive(Serialize)]
struct LimitQuery {
    #[serde(skip_serializing_if = "Option::is_none")]
    limit: Option<u32>,
}

pub struct TestCasesApi<'a> {
    client: &'a ApiClient,
}

impl<'a> TestCasesApi<'a> {
    pub(crate) fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }

    pub async fn list(&self, params: &ListParams) -> AppResult<Paginated<TestCase>> {
        self.client.get_list("/test-cases", params).await
    }

    pub async fn get(&self, id: &str) -> AppResult<TestCase> {
        self.client.get(&entity_path("/test-cases", id)?).await
    }

    pub async fn create(&self, input: &NewTestCase) -> AppResult<TestCase> {
        input.validate()?;
        self.client.post("/test-cases", input).await
    }

    pub async fn update(&self, id: &str, input: &TestCaseUpdate) -> AppResult<TestCase> {
        input.validate()?;
        self.client.put(&entity_path("/test-cases", id)?, input).await
    }

    pub async fn delete(&self, id: &str) -> AppResult<()> {
        self.client.delete(&entity_path("/test-cases", id)?).await
    }

    /// Steps of a test case, ordered.
    pub async fn steps(&self, id: &str) -> AppResult<Vec<GherkinStep>> {
        let path = format!("{}/steps", entity_path("/test-cases", id)?);
        self.client.get(&path).await
    }

    /// Replace every step of a test case. Returns the stored steps.
    pub async fn update_steps(&self, id: &str, steps: &[GherkinStepInput]) -> AppResult<Vec<GherkinStep>> {
        validate_steps(steps)?;
        let path = format!("{}/steps", entity_path("/test-cases", id)?);
        self.client.put(&path, &StepsBody { steps }).await
    }

    /// Most recent pipeline results, newest first. The server defaults to 10.
    pub async fn results(&self, id: &str, limit: Option<u32>) -> AppResult<Vec<TestCasePipelineResult>> {
        let path = format!("{}/results", entity_path("/test-cases", id)?);
        self.client.get_with(&path, &LimitQuery { limit }).await
    }
}
