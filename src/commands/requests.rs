//! Test request commands.

use super::print_json;
use crate::error::AppResult;
use crate::models::{StatusChange, TestRequestStatus};
use crate::services::ApiClient;
use clap::Args;
use std::path::PathBuf;

#[derive(Debug, Clone, Args)]
pub struct StatusArgs {
    pub id: String,

    /// NEW, IN_ANALYSIS, APPROVED, REJECTED or IMPLEMENTED.
    pub status: TestRequestStatus,

    #[arg(long)]
    pub assignee: Option<String>,

    #[arg(long)]
    pub generated_test_case: Option<String>,

    /// Appended to the request's notes by the server.
    #[arg(long)]
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Args)]
pub struct UploadArgs {
    pub path: PathBuf,
}

pub async fn status(client: &ApiClient, args: StatusArgs) -> AppResult<()> {
    let change = StatusChange {
        status: args.status,
        assignee_id: args.assignee,
        generated_test_case_id: args.generated_test_case,
        notes: args.notes,
    };

    let api = client.test_requests();
    let current = api.get(&args.id).await?;
    let updated = api.transition(&current, &change).await?;
    print_json(&updated)
}

pub async fn upload(client: &ApiClient, args: UploadArgs) -> AppResult<()> {
    let uploaded = client
        .uploads()
        .upload_test_request_image_file(&args.path)
        .await?;
    print_json(&uploaded)
}
