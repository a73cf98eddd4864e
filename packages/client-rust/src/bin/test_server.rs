//! `test-server` -- in-memory grade API for local development.

use anyhow::Context;
use clap::Parser;
use roster_client::network::{NetworkConfig, ServerModule, DEV_API_KEY};
use roster_client::{init_tracing, LogFormat};
use tracing::info;

#[derive(Parser)]
#[command(name = "test-server", about = "Stand-in grade API server", version)]
struct Cli {
    /// Address to bind.
    #[arg(long, default_value = "127.0.0.1")]
    host: String,

    /// Port to listen on (0 picks a free port).
    #[arg(long, default_value_t = 8080)]
    port: u16,

    /// Accepted API key. Repeat to accept several.
    #[arg(long = "api-key", default_value = DEV_API_KEY)]
    api_keys: Vec<String>,

    /// Log line format.
    #[arg(long, value_enum, default_value_t = LogFormat::Text)]
    log_format: LogFormat,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.log_format);

    let config = NetworkConfig {
        host: cli.host,
        port: cli.port,
        api_keys: cli.api_keys,
        ..NetworkConfig::default()
    };

    let mut server = ServerModule::new(config);
    let port = server.start().await.context("failed to start server")?;
    info!(port, "grade API ready");

    server
        .serve(async {
            let _ = tokio::signal::ctrl_c().await;
            info!("shutdown signal received");
        })
        .await
}
