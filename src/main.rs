//! Task tracker server.
//!
//! # Usage
//!
//! ```bash
//! # Serve on port 3000 with ./data.sqlite and ./public
//! cargo run
//!
//! # Custom port via the environment
//! PORT=8080 cargo run
//!
//! # Throwaway in-memory store, newest tasks first among equals
//! cargo run -- --database :memory: --created-order newest-first
//! ```

use std::process::ExitCode;

use clap::Parser;
use tasktrack::config::ServerConfig;

#[tokio::main]
async fn main() -> ExitCode {
    let config = ServerConfig::parse();

    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&config.log_level));
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    match tasktrack::server::run(&config).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            tracing::error!(error = %err, "task tracker stopped");
            ExitCode::FAILURE
        }
    }
}
