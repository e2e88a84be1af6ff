use std::path::PathBuf;

use clap::Parser;
use tokio::net::TcpListener;

use site_gate::http::HttpServer;
use site_gate::lifecycle::{signals, startup, Shutdown};
use site_gate::observability::{logging, metrics};

#[derive(Parser)]
#[command(name = "site-gate")]
#[command(about = "Static site server with bot and referer filtering", long_about = None)]
struct Cli {
    /// TOML configuration file. Built-in defaults are used when omitted.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Listening port; overrides the file and the PORT variable.
    #[arg(short, long)]
    port: Option<u16>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let config = tracing::subscriber::with_default(logging::bootstrap(), || {
        startup::prepare_config(cli.config.as_deref(), cli.port)
    })?;
    logging::init(&config.observability)?;

    tracing::info!("site-gate v{} starting", env!("CARGO_PKG_VERSION"));
    tracing::info!(
        bind_address = %config.bind_address(),
        blocked_agents = config.bot.blocked_agents.len(),
        allowed_timezones = ?config.loader.allowed_timezones,
        "Configuration loaded"
    );

    if config.observability.metrics_enabled {
        match config.observability.metrics_address.parse() {
            Ok(addr) => metrics::init_metrics(addr),
            Err(_) => tracing::error!(
                metrics_address = %config.observability.metrics_address,
                "Failed to parse metrics address"
            ),
        }
    }

    let listener = TcpListener::bind(config.bind_address()).await?;
    tracing::info!(address = %listener.local_addr()?, "Listening for connections");

    let shutdown = Shutdown::new();
    let server_shutdown = shutdown.subscribe();
    tokio::spawn(async move {
        signals::wait_for_shutdown().await;
        shutdown.trigger();
    });

    HttpServer::new(config).run(listener, server_shutdown).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
