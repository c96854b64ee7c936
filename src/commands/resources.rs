//! Generic list/get commands over every resource.

use super::print_json;
use crate::error::{AppError, AppResult};
use crate::models::{ListParams, Paginated};
use crate::services::ApiClient;
use clap::{Args, ValueEnum};
use serde::Serialize;
use serde_json::json;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Resource {
    Users,
    Groups,
    Applications,
    Features,
    TestCases,
    #[value(alias = "requests")]
    TestRequests,
    MyRequests,
    Pipelines,
}

#[derive(Debug, Clone, Args)]
pub struct ListArgs {
    pub resource: Resource,

    /// Filter forwarded verbatim as a query parameter, repeatable.
    #[arg(short, long = "filter", value_name = "KEY=VALUE", value_parser = parse_filter)]
    pub filters: Vec<(String, String)>,

    /// Follow pagination and print every record.
    #[arg(long)]
    pub all: bool,
}

#[derive(Debug, Clone, Args)]
pub struct GetArgs {
    pub resource: Resource,
    pub id: String,
}

pub(crate) fn parse_filter(raw: &str) -> Result<(String, String), String> {
    ListParams::parse_pair(raw).ok_or_else(|| format!("expected KEY=VALUE, got '{}'", raw))
}

fn list_endpoint(resource: Resource) -> &'static str {
    match resource {
        Resource::Users => "/users",
        Resource::Groups => "/groups",
        Resource::Applications => "/applications",
        Resource::Features => "/features",
        Resource::TestCases => "/test-cases",
        Resource::TestRequests => "/test-requests",
        Resource::MyRequests => "/test-requests/my-requests",
        Resource::Pipelines => "/pipelines",
    }
}

fn print_page<T: Serialize>(page: Paginated<T>) -> AppResult<()> {
    print_json(&json!({
        "data": page.data,
        "pagination": page.pagination,
    }))
}

pub async fn list(client: &ApiClient, args: ListArgs) -> AppResult<()> {
    let params: ListParams = args.filters.into_iter().collect();

    if args.all {
        let all: Vec<serde_json::Value> = client
            .get_all_pages(list_endpoint(args.resource), &params)
            .await?;
        return print_json(&all);
    }

    match args.resource {
        Resource::Users => print_page(client.users().list(&params).await?),
        Resource::Groups => print_page(client.groups().list(&params).await?),
        Resource::Applications => print_page(client.applications().list(&params).await?),
        Resource::Features => print_page(client.features().list(&params).await?),
        Resource::TestCases => print_page(client.test_cases().list(&params).await?),
        Resource::TestRequests => print_page(client.test_requests().list(&params).await?),
        Resource::MyRequests => print_page(client.test_requests().my_requests(&params).await?),
        Resource::Pipelines => print_page(client.pipelines().list(&params).await?),
    }
}

pub async fn get(client: &ApiClient, args: GetArgs) -> AppResult<()> {
    let id = args.id.as_str();
    match args.resource {
        Resource::Users => print_json(&client.users().get(id).await?),
        Resource::Groups => print_json(&client.groups().get(id).await?),
        Resource::Applications => print_json(&client.applications().get(id).await?),
        Resource::Features => print_json(&client.features().get(id).await?),
        Resource::TestCases => print_json(&client.test_cases().get(id).await?),
        Resource::TestRequests => print_json(&client.test_requests().get(id).await?),
        Resource::Pipelines => print_json(&client.pipelines().get(id).await?),
        Resource::MyRequests => Err(AppError::invalid_input_field(
            "my-requests is a list; use `get test-requests <id>`",
            "resource",
        )),
    }
}
