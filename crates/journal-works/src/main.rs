//! Journal Works API - Entry Point

use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;

use clap::Parser;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use journal_works::{config::Config, server::Server};

#[derive(Parser, Debug)]
#[command(name = "journal-works")]
#[command(about = "Crossref journal works API and frontend host")]
#[command(version)]
struct Cli {
    /// Address to bind
    #[arg(long, default_value = "0.0.0.0", env = "HOST")]
    host: IpAddr,

    /// HTTP server port
    #[arg(long, default_value = "8000", env = "PORT")]
    port: u16,

    /// Directory holding the built frontend
    #[arg(long, default_value = "front-end/dist", env = "FRONTEND_DIR")]
    frontend_dir: PathBuf,

    /// Crossref API base URL (defaults to CROSSREF_API_URL or the public API)
    #[arg(long)]
    crossref_url: Option<String>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "info", env = "RUST_LOG")]
    log_level: String,

    /// Output logs as JSON
    #[arg(long)]
    json_logs: bool,
}

fn init_tracing(log_level: &str, json: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level));

    let subscriber = tracing_subscriber::registry().with(filter);

    if json {
        subscriber.with(tracing_subscriber::fmt::layer().json()).init();
    } else {
        subscriber.with(tracing_subscriber::fmt::layer().compact()).init();
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();
    let cli = Cli::parse();

    init_tracing(&cli.log_level, cli.json_logs);

    let mut config = Config::from_env()?;
    if let Some(url) = cli.crossref_url {
        config.base_url = Config::new(url).base_url;
    }

    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        crossref = %config.base_url,
        timeout = ?config.request_timeout,
        "Starting journal works API"
    );

    let server = Server::new(config, cli.frontend_dir)?;
    server.run(SocketAddr::new(cli.host, cli.port)).await
}
