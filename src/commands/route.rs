//! Route guard inspection.

use crate::error::AppResult;
use crate::guard::{resolve, GuardDecision};
use crate::services::ApiClient;
use clap::Args;

#[derive(Debug, Clone, Args)]
pub struct RouteArgs {
    /// Dashboard path, e.g. `/users` or `/test-cases/abc`.
    pub path: String,
}

pub fn run(client: &ApiClient, args: RouteArgs) -> AppResult<()> {
    match resolve(&args.path, &client.session().snapshot()) {
        GuardDecision::Render => println!("render {}", args.path),
        GuardDecision::Redirect(to) => println!("redirect {} -> {}", args.path, to),
    }
    Ok(())
}
