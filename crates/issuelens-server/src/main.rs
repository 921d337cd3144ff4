use std::net::SocketAddr;

use anyhow::Result;
use clap::Parser;
use issuelens_gateway::{run_server, GatewayConfig};
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "issuelens-server", about = "GitHub issue scan/analyze gateway")]
struct ServerArgs {
    /// Listen address for the gateway.
    #[arg(long, env = "ISSUELENS_ADDR", default_value = "127.0.0.1:8080")]
    addr: SocketAddr,
}

fn init_tracing() {
    let env_filter = EnvFilter::builder()
        .with_default_directive(LevelFilter::WARN.into())
        .from_env_lossy();

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .compact()
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();

    let args = ServerArgs::parse();
    let config = GatewayConfig::from_env();
    tracing::info!(
        provider = %config.llm_provider,
        model = %config.llm_model,
        db = %config.db_path.display(),
        "starting issuelens gateway"
    );

    run_server(args.addr, config).await
}
