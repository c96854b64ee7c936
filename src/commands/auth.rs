//! Authentication commands.
//!
//! The session written by `login` is read back by every later invocation
//! through the configured session store.

use super::print_json;
use crate::error::{AppError, AppResult};
use crate::models::{ChangePasswordInput, LoginInput};
use crate::services::ApiClient;
use clap::Args;

/// Environment variable consulted when `--password` is omitted.
pub const ENV_PASSWORD: &str = "DOCUDASH_PASSWORD";

#[derive(Debug, Clone, Args)]
pub struct LoginArgs {
    #[arg(short, long)]
    pub email: String,

    #[arg(short, long, env = ENV_PASSWORD, hide_env_values = true)]
    pub password: String,
}

#[derive(Debug, Clone, Args)]
pub struct ChangePasswordArgs {
    #[arg(long)]
    pub current: String,

    #[arg(long = "new")]
    pub new_password: String,
}

pub async fn login(client: &ApiClient, args: LoginArgs) -> AppResult<()> {
    let input = LoginInput::new(args.email, args.password);
    let response = client.auth().login(&input).await?;

    println!(
        "Logged in as {} ({})",
        response.user.full_name(),
        response.user.role
    );
    Ok(())
}

pub fn logout(client: &ApiClient) -> AppResult<()> {
    client.auth().logout()?;
    println!("Logged out");
    Ok(())
}

/// Refresh the profile from the server and print it.
pub async fn whoami(client: &ApiClient) -> AppResult<()> {
    if !client.session().is_authenticated() {
        return Err(AppError::unauthorized("Not logged in"));
    }
    let user = client.auth().me().await?;
    print_json(&user)
}

pub async fn change_password(client: &ApiClient, args: ChangePasswordArgs) -> AppResult<()> {
    let input = ChangePasswordInput {
        current_password: args.current,
        new_password: args.new_password,
    };
    let ack = client.auth().change_password(&input).await?;
    println!("{}", ack.message.unwrap_or_else(|| "Password changed".to_string()));
    Ok(())
}
