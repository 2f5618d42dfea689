//! Entry point for the Profit Engine binary.
//!
//! Running this binary starts an HTTP server exposing the profit
//! estimator.  Settings come from the environment; see
//! [`profit_engine::config`] for the recognised variables.  Log
//! verbosity follows `RUST_LOG`.

use anyhow::Result;
use profit_engine::config::ServerConfig;

#[tokio::main]
async fn main() -> Result<()> {
    let config = ServerConfig::from_env()?;
    init_logging(&config);

    profit_engine::api::serve(&config).await
}

fn init_logging(config: &ServerConfig) {
    use tracing_subscriber::{fmt, EnvFilter};

    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("profit_engine=info"));

    if config.json_logs {
        fmt().json().with_env_filter(env_filter).with_target(true).init();
    } else {
        fmt().with_env_filter(env_filter).with_target(true).init();
    }
}
