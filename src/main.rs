mod actions;
mod config;
mod error;
mod model;
mod project_url;
mod providers;
mod sync;

use std::process::ExitCode;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use actions::{Reporter, WorkflowReporter};
use providers::github::GitHubClient;

fn init_tracing() {
    // Step debug logging on the runner turns on our debug output too.
    let default_level = if std::env::var("RUNNER_DEBUG").as_deref() == Ok("1") {
        "debug"
    } else {
        "info"
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    init_tracing();

    let reporter = WorkflowReporter::from_env();

    let config = match config::load_config(&config::EnvInputs, config::graphql_url()) {
        Ok(config) => config,
        Err(err) => {
            reporter.set_failed(&err.to_string());
            return ExitCode::FAILURE;
        }
    };

    let client = GitHubClient::new(config.github_token.clone(), config.graphql_url.clone());

    if sync::run(&config, &client, &reporter).await {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}
