//! pakt CLI entry point.
//!
//! Parses arguments, initializes logging, executes the selected command,
//! and maps typed failures to process exit codes (notably exit 10 for a
//! manifest that could not be located).

use clap::Parser;
use pakt::cli::Cli;
use pakt::core::user_friendly_error;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(cli.log_filter()));
    tracing_subscriber::fmt().with_env_filter(filter).with_writer(std::io::stderr).init();

    if let Err(e) = cli.execute().await {
        let context = user_friendly_error(e);
        context.display();
        std::process::exit(context.exit_code());
    }
}
