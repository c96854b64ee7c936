//! Test request endpoints.

use super::entity_path;
use crate::error::AppResult;
use crate::models::{
    ListParams, NewTestRequest, Paginated, StatusChange, TestRequest, TestRequestUpdate,
};
use crate::services::ApiClient;

pub struct TestRequestsApi<'a> {
    client: &'a ApiClient,
}

impl<'a> TestRequestsApi<'a> {
    pub(crate) fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }

    pub async fn list(&self, params: &ListParams) -> AppResult<Paginated<TestRequest>> {
        self.client.get_list("/test-requests", params).await
    }

    /// Requests filed by the logged-in user.
    pub async fn my_requests(&self, params: &ListParams) -> AppResult<Paginated<TestRequest>> {
        self.client.get_list("/test-requests/my-requests", params).await
    }

    pub async fn get(&self, id: &str) -> AppResult<TestRequest> {
        self.client.get(&entity_path("/test-requests", id)?).await
    }

    pub async fn create(&self, input: &NewTestRequest) -> AppResult<TestRequest> {
        input.validate()?;
        self.client.post("/test-requests", input).await
    }

    pub async fn update(&self, id: &str, input: &TestRequestUpdate) -> AppResult<TestRequest> {
        input.validate()?;
        self.client.put(&entity_path("/test-requests", id)?, input).await
    }

    pub async fn delete(&self, id: &str) -> AppResult<()> {
        self.client.delete(&entity_path("/test-requests", id)?).await
    }

    /// Move a request to a new status.
    pub async fn update_status(&self, id: &str, change: &StatusChange) -> AppResult<TestRequest> {
        change.validate()?;
        let path = format!("{}/status", entity_path("/test-requests", id)?);
        self.client.patch(&path, change).await
    }

    /// Like [`update_status`](Self::update_status), starting from a known record.
    ///
    /// Moves outside the usual lifecycle are logged but still sent; the
    /// server has the final say.
    pub async fn transition(&self, request: &TestRequest, change: &StatusChange) -> AppResult<TestRequest> {
        if !request.status.can_transition_to(change.status) {
            log::warn!(
                "Test request {} moving {} -> {} outside the usual lifecycle",
                request.id,
                request.status,
                change.status
            );
        }
        self.update_status(&request.id, change).await
    }
}
