//! CI pipeline endpoints.

use super::entity_path;
use crate::error::AppResult;
use crate::models::validation::validate_required;
use crate::models::{
    GitlabPipeline, ListParams, Paginated, PipelineResults, RegisterPipelineResult, SyncStatus,
};
use crate::services::ApiClient;
use serde::Serialize;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct SyncBody<'s> {
    project_id: &'s str,
}

pub struct PipelinesApi<'a> {
    client: &'a ApiClient,
}

impl<'a> PipelinesApi<'a> {
    pub(crate) fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }

    pub async fn list(&self, params: &ListParams) -> AppResult<Paginated<GitlabPipeline>> {
        self.client.get_list("/pipelines", params).await
    }

    pub async fn get(&self, id: &str) -> AppResult<GitlabPipeline> {
        self.client.get(&entity_path("/pipelines", id)?).await
    }

    /// Per-test-case results of a run with a pass/fail summary.
    pub async fn results(&self, id: &str) -> AppResult<PipelineResults> {
        let path = format!("{}/results", entity_path("/pipelines", id)?);
        self.client.get(&path).await
    }

    /// Ask the server to pull pipelines for a GitLab project.
    ///
    /// The project id goes both in the JSON body and as `project_id` in the
    /// query string; the server reads the latter.
    pub async fn sync(&self, project_id: &str) -> AppResult<SyncStatus> {
        validate_required(project_id, "projectId")?;

        let query = [("project_id", project_id)];
        let status: SyncStatus = self
            .client
            .post_with("/pipelines/sync", &query, &SyncBody { project_id })
            .await?;

        log::info!("Pipeline sync for project {}: {}", status.project_id, status.status);
        Ok(status)
    }

    /// Report a CI run and its test outcomes. Returns the stored pipeline.
    pub async fn register_result(&self, input: &RegisterPipelineResult) -> AppResult<GitlabPipeline> {
        input.validate()?;
        self.client.post("/pipelines/results", input).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sync_body_shape() {
        let json = serde_json::to_value(SyncBody { project_id: "42" }).unwrap();
        assert_eq!(json, serde_json::json!({"projectId": "42"}));
    }
}
