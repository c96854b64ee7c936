//! Command-line handlers for the `docudash` binary.
//!
//! Commands are organized by functionality:
//! - `auth`: login, logout, whoami, password change
//! - `resources`: generic list/get over every entity
//! - `requests`: test request status changes and image uploads
//! - `dashboard`: statistics, pipeline results and sync
//! - `route`: guard decisions for dashboard paths

pub mod auth;
pub mod dashboard;
pub mod requests;
pub mod resources;
pub mod route;

use crate::config::ClientConfig;
use crate::error::AppResult;
use crate::services::{ApiClient, FileSessionStore, KeyringSessionStore, SessionContext};
use clap::{Parser, Subcommand};
use serde::Serialize;
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(name = "docudash", version, about = "DocuDash test management client", long_about = None)]
#[command(propagate_version = true)]
#[command(arg_required_else_help = true)]
pub struct Cli {
    /// Server root URL.
    #[arg(long, global = true, env = crate::config::ENV_URL)]
    pub url: Option<String>,

    /// Where to keep the session between runs.
    #[arg(long, global = true, value_name = "PATH", env = crate::config::ENV_SESSION_FILE)]
    pub session_file: Option<PathBuf>,

    /// Keep the session in the OS keychain instead of a file.
    #[arg(long, global = true, conflicts_with = "session_file")]
    pub keyring: bool,

    #[arg(short('l'), long, global = true, value_name = "LEVEL", default_value = "warn")]
    pub log_level: log::LevelFilter,

    #[command(subcommand)]
    pub cmd: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    #[command(about = "Log in and store the session")]
    Login(auth::LoginArgs),
    #[command(about = "Forget the stored session")]
    Logout,
    #[command(about = "Show the logged-in user")]
    Whoami,
    #[command(about = "Change the password of the logged-in user")]
    ChangePassword(auth::ChangePasswordArgs),
    #[command(about = "List records of a resource", alias = "ls")]
    List(resources::ListArgs),
    #[command(about = "Show one record of a resource")]
    Get(resources::GetArgs),
    #[command(about = "Change the status of a test request")]
    Status(requests::StatusArgs),
    #[command(about = "Upload a reference image for a test request")]
    Upload(requests::UploadArgs),
    #[command(about = "Dashboard statistics")]
    Dashboard(dashboard::DashboardArgs),
    #[command(about = "Show the test results of a pipeline run")]
    Results(dashboard::ResultsArgs),
    #[command(about = "Ask the server to sync pipelines for a GitLab project")]
    Sync(dashboard::SyncArgs),
    #[command(about = "Show how a dashboard path would be routed")]
    Route(route::RouteArgs),
}

impl Cli {
    /// Merge the environment with the flags given on the command line.
    pub fn client_config(&self) -> ClientConfig {
        let mut config = ClientConfig::from_env();
        if let Some(url) = &self.url {
            config = config.with_base_url(url);
        }
        if let Some(path) = &self.session_file {
            config = config.with_session_file(path);
        } else if config.session_file.is_none() && !self.keyring {
            config.session_file = default_session_file();
        }
        config
    }

    /// Restore the session from the configured store.
    pub fn session(&self, config: &ClientConfig) -> AppResult<SessionContext> {
        if self.keyring {
            return SessionContext::restore(KeyringSessionStore::new(&config.base_url));
        }
        match &config.session_file {
            Some(path) => SessionContext::restore(FileSessionStore::new(path)),
            None => Ok(SessionContext::in_memory()),
        }
    }
}

/// `$HOME/.config/docudash/session.json`, when a home directory is known.
fn default_session_file() -> Option<PathBuf> {
    std::env::var_os("HOME").map(|home| {
        PathBuf::from(home)
            .join(".config")
            .join("docudash")
            .join("session.json")
    })
}

/// Print a value as pretty JSON on stdout.
pub(crate) fn print_json<T: Serialize + ?Sized>(value: &T) -> AppResult<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Run the parsed command line.
pub async fn exec(cli: Cli) -> AppResult<()> {
    let config = cli.client_config();
    log::debug!("Using server {}", config.base_url);

    let session = cli.session(&config)?;
    let client = ApiClient::new(config, session)?;

    match cli.cmd {
        Command::Login(args) => auth::login(&client, args).await,
        Command::Logout => auth::logout(&client),
        Command::Whoami => auth::whoami(&client).await,
        Command::ChangePassword(args) => auth::change_password(&client, args).await,
        Command::List(args) => resources::list(&client, args).await,
        Command::Get(args) => resources::get(&client, args).await,
        Command::Status(args) => requests::status(&client, args).await,
        Command::Upload(args) => requests::upload(&client, args).await,
        Command::Dashboard(args) => dashboard::run(&client, args).await,
        Command::Results(args) => dashboard::results(&client, args).await,
        Command::Sync(args) => dashboard::sync(&client, args).await,
        Command::Route(args) => route::run(&client, args),
    }
}
