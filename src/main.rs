use clap::Parser;
use docudash_client::commands::{exec, Cli};
use docudash_client::guard::redirect_for_error;
use std::process::ExitCode;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    env_logger::Builder::new()
        .filter_level(cli.log_level)
        .parse_default_env()
        .init();

    match exec(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{}", err.user_message());
            if let Some(path) = redirect_for_error(&err) {
                eprintln!("Redirecting to {}: run `docudash login` to start a new session.", path);
            }
            if let Ok(json) = serde_json::to_string(&err) {
                log::debug!("{}", json);
            }
            ExitCode::FAILURE
        }
    }
}
