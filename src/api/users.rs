//! User administration and group subscriptions.

use super::entity_path;
use crate::error::AppResult;
use crate::models::{GroupSubscription, ListParams, NewUser, Paginated, User, UserUpdate};
use crate::services::ApiClient;

pub struct UsersApi<'a> {
    client: &'a ApiClient,
}

impl<'a> UsersApi<'a> {
    pub(crate) fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }

    pub async fn list(&self, params: &ListParams) -> AppResult<Paginated<User>> {
        self.client.get_list("/users", params).await
    }

    pub async fn get(&self, id: &str) -> AppResult<User> {
        self.client.get(&entity_path("/users", id)?).await
    }

    pub async fn create(&self, input: &NewUser) -> AppResult<User> {
        input.validate()?;
        self.client.post("/users", input).await
    }

    pub async fn update(&self, id: &str, input: &UserUpdate) -> AppResult<User> {
        input.validate()?;
        self.client.put(&entity_path("/users", id)?, input).await
    }

    pub async fn delete(&self, id: &str) -> AppResult<()> {
        self.client.delete(&entity_path("/users", id)?).await
    }

    /// Group subscriptions of the logged-in user.
    pub async fn subscriptions(&self) -> AppResult<Vec<GroupSubscription>> {
        self.client.get("/users/subscriptions").await
    }

    pub async fn subscribe(&self, group_id: &str) -> AppResult<GroupSubscription> {
        self.client
            .post_empty(&entity_path("/users/subscriptions", group_id)?)
            .await
    }

    pub async fn unsubscribe(&self, group_id: &str) -> AppResult<()> {
        self.client
            .delete(&entity_path("/users/subscriptions", group_id)?)
            .await
    }
}
