//! Application endpoints.

use super::entity_path;
use crate::error::AppResult;
use crate::models::{
    Application, ApplicationStats, ApplicationUpdate, Feature, ListParams, NewApplication,
    Paginated,
};
use crate::services::ApiClient;

pub struct ApplicationsApi<'a> {
    client: &'a ApiClient,
}

impl<'a> ApplicationsApi<'a> {
    pub(crate) fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }

    pub async fn list(&self, params: &ListParams) -> AppResult<Paginated<Application>> {
        self.client.get_list("/applications", params).await
    }

    pub async fn get(&self, id: &str) -> AppResult<Application> {
        self.client.get(&entity_path("/applications", id)?).await
    }

    pub async fn create(&self, input: &NewApplication) -> AppResult<Application> {
        input.validate()?;
        self.client.post("/applications", input).await
    }

    pub async fn update(&self, id: &str, input: &ApplicationUpdate) -> AppResult<Application> {
        input.validate()?;
        self.client.put(&entity_path("/applications", id)?, input).await
    }

    pub async fn delete(&self, id: &str) -> AppResult<()> {
        self.client.delete(&entity_path("/applications", id)?).await
    }

    /// Features of an application, filtered like any list.
    pub async fn features(&self, id: &str, params: &ListParams) -> AppResult<Paginated<Feature>> {
        let path = format!("{}/features", entity_path("/applications", id)?);
        self.client.get_list(&path, params).await
    }

    /// Per-status counts of features, test cases and requests.
    pub async fn stats(&self, id: &str) -> AppResult<ApplicationStats> {
        let path = format!("{}/stats", entity_path("/applications", id)?);
        self.client.get(&path).await
    }
}
