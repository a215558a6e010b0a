mod args;

use std::process::ExitCode;

use args::Args;
use clap::Parser;
use sse_tail::{client, Dispatcher};

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let args = Args::parse();

    // Logs go to stderr, stdout carries event data only
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let url = match client::parse_url(&args.url) {
        Ok(url) => url,
        Err(e) => {
            tracing::error!("{}", e);
            return ExitCode::from(e.exit_code());
        }
    };

    let mut dispatcher = Dispatcher::stdio();

    match client::follow(url, &args.options(), &mut dispatcher).await {
        Ok(outcome) => ExitCode::from(outcome.exit_code()),
        Err(e) => {
            tracing::error!("{}", e);
            ExitCode::from(e.exit_code())
        }
    }
}
