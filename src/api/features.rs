//! Feature endpoints.

use super::entity_path;
use crate::error::AppResult;
use crate::models::{Feature, FeatureUpdate, ListParams, NewFeature, Paginated, TestCase};
use crate::services::ApiClient;

pub struct FeaturesApi<'a> {
    client: &'a ApiClient,
}

impl<'a> FeaturesApi<'a> {
    pub(crate) fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }

    pub async fn list(&self, params: &ListParams) -> AppResult<Paginated<Feature>> {
        self.client.get_list("/features", params).await
    }

    pub async fn get(&self, id: &str) -> AppResult<Feature> {
        self.client.get(&entity_path("/features", id)?).await
    }

    pub async fn create(&self, input: &NewFeature) -> AppResult<Feature> {
        input.validate()?;
        self.client.post("/features", input).await
    }

    pub async fn update(&self, id: &str, input: &FeatureUpdate) -> AppResult<Feature> {
        input.validate()?;
        self.client.put(&entity_path("/features", id)?, input).await
    }

    pub async fn delete(&self, id: &str) -> AppResult<()> {
        self.client.delete(&entity_path("/features", id)?).await
    }

    pub async fn test_cases(&self, id: &str, params: &ListParams) -> AppResult<Paginated<TestCase>> {
        let path = format!("{}/test-cases", entity_path("/features", id)?);
        self.client.get_list(&path, params).await
    }
}
