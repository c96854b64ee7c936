//! Group endpoints.

use super::entity_path;
use crate::error::AppResult;
use crate::models::{Group, GroupSubscription, GroupUpdate, ListParams, NewGroup, Paginated};
use crate::services::ApiClient;

pub struct GroupsApi<'a> {
    client: &'a ApiClient,
}

impl<'a> GroupsApi<'a> {
    pub(crate) fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }

    pub async fn list(&self, params: &ListParams) -> AppResult<Paginated<Group>> {
        self.client.get_list("/groups", params).await
    }

    pub async fn get(&self, id: &str) -> AppResult<Group> {
        self.client.get(&entity_path("/groups", id)?).await
    }

    pub async fn create(&self, input: &NewGroup) -> AppResult<Group> {
        input.validate()?;
        self.client.post("/groups", input).await
    }

    pub async fn update(&self, id: &str, input: &GroupUpdate) -> AppResult<Group> {
        input.validate()?;
        self.client.put(&entity_path("/groups", id)?, input).await
    }

    pub async fn delete(&self, id: &str) -> AppResult<()> {
        self.client.delete(&entity_path("/groups", id)?).await
    }

    /// Users subscribed to a group.
    pub async fn subscribers(&self, id: &str) -> AppResult<Vec<GroupSubscription>> {
        let path = format!("{}/subscribers", entity_path("/groups", id)?);
        self.client.get(&path).await
    }
}
