//! Dashboard and pipeline commands.

use super::print_json;
use super::resources::parse_filter;
use crate::error::AppResult;
use crate::models::{GitlabPipeline, ListParams, ResultSummary};
use crate::services::ApiClient;
use clap::{Args, Subcommand};

#[derive(Debug, Clone, Args)]
pub struct DashboardArgs {
    #[command(subcommand)]
    pub view: DashboardView,
}

#[derive(Debug, Clone, Subcommand)]
pub enum DashboardView {
    /// Entity totals and per-status breakdowns.
    Stats,
    /// Recently updated records.
    Activity {
        #[arg(long)]
        limit: Option<u32>,
    },
    /// Test case counts per status.
    TestCases {
        #[arg(short, long = "filter", value_name = "KEY=VALUE", value_parser = parse_filter)]
        filters: Vec<(String, String)>,
    },
    /// Pipeline results over a period.
    Pipelines {
        #[arg(long)]
        days: Option<u32>,
    },
}

#[derive(Debug, Clone, Args)]
pub struct SyncArgs {
    pub project_id: String,
}

#[derive(Debug, Clone, Args)]
pub struct ResultsArgs {
    pub pipeline_id: String,
}

pub async fn run(client: &ApiClient, args: DashboardArgs) -> AppResult<()> {
    let dashboard = client.dashboard();
    match args.view {
        DashboardView::Stats => print_json(&dashboard.stats().await?),
        DashboardView::Activity { limit } => print_json(&dashboard.activity(limit).await?),
        DashboardView::TestCases { filters } => {
            let params: ListParams = filters.into_iter().collect();
            print_json(&dashboard.test_cases_by_status(&params).await?)
        }
        DashboardView::Pipelines { days } => print_json(&dashboard.pipeline_stats(days).await?),
    }
}

pub async fn sync(client: &ApiClient, args: SyncArgs) -> AppResult<()> {
    let status = client.pipelines().sync(&args.project_id).await?;
    print_json(&status)
}

/// Print the per-test-case results of a run, with a one-line summary on stderr.
pub async fn results(client: &ApiClient, args: ResultsArgs) -> AppResult<()> {
    let pipelines = client.pipelines();
    let pipeline = pipelines.get(&args.pipeline_id).await?;
    let results = pipelines.results(&args.pipeline_id).await?;

    eprintln!("{}", summary_line(&pipeline, &results.summary));
    print_json(&results)
}

fn summary_line(pipeline: &GitlabPipeline, summary: &ResultSummary) -> String {
    let mut line = format!(
        "Pipeline #{} on {} {}: {}/{} passed ({:.1}%)",
        pipeline.gitlab_pipeline_id,
        pipeline.branch,
        pipeline.status,
        summary.passed,
        summary.total,
        summary.pass_rate() * 100.0
    );
    if !pipeline.status.is_finished() {
        line.push_str(", not finished yet");
    }
    line
}
