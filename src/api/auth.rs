//! Authentication endpoints.

use crate::error::AppResult;
use crate::models::{AuthUser, ChangePasswordInput, LoginInput, LoginResponse, RegisterInput, User};
use crate::services::api_client::Ack;
use crate::services::ApiClient;

pub struct AuthApi<'a> {
    client: &'a ApiClient,
}

impl<'a> AuthApi<'a> {
    pub(crate) fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }

    /// Log in and store the issued token and user in the session.
    pub async fn login(&self, input: &LoginInput) -> AppResult<LoginResponse> {
        input.validate()?;

        let response: LoginResponse = self.client.post("/auth/login", input).await?;
        self.client
            .session()
            .set_auth(response.token.clone(), response.user.clone())?;

        log::info!("Logged in as {}", response.user.email);
        Ok(response)
    }

    /// Create an account. The session is left untouched; call [`login`](Self::login) next.
    pub async fn register(&self, input: &RegisterInput) -> AppResult<LoginResponse> {
        input.validate()?;
        self.client.post("/auth/register", input).await
    }

    /// Fetch the current profile and refresh the one stored in the session.
    pub async fn me(&self) -> AppResult<User> {
        let user: User = self.client.get("/auth/me").await?;
        self.client
            .session()
            .update_user(AuthUser::from(user.clone()))?;
        Ok(user)
    }

    pub async fn change_password(&self, input: &ChangePasswordInput) -> AppResult<Ack> {
        input.validate()?;
        self.client.post_ack("/auth/change-password", input).await
    }

    /// Drop the local session. The server keeps no session state to revoke.
    pub fn logout(&self) -> AppResult<()> {
        if let Some(user) = self.client.session().user() {
            log::info!("Logging out {}", user.email);
        }
        self.client.session().logout()
    }
}
