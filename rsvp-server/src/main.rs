use std::net::SocketAddr;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

use rsvp_core::config::RsvpConfig;
use rsvp_server::state::AppState;
use rsvp_server::telemetry;

#[derive(Parser)]
#[command(name = "rsvp-server")]
#[command(about = "Serve the event RSVP API")]
struct Args {
    /// Config file (default: ./rsvp.toml if present)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Address to listen on, overriding the config file
    #[arg(short, long)]
    bind: Option<SocketAddr>,

    /// Write a commented config template to this path and exit
    #[arg(long, value_name = "PATH")]
    write_config: Option<PathBuf>,

    /// Print the effective configuration and exit
    #[arg(long)]
    print_config: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    telemetry::init();

    if let Some(path) = args.write_config {
        RsvpConfig::create_default_config(&path)?;
        println!("Wrote {}", path.display());
        return Ok(());
    }

    let mut config =
        RsvpConfig::load(args.config.as_deref()).context("Failed to load configuration")?;
    if let Some(bind) = args.bind {
        config.bind = bind;
    }

    if args.print_config {
        print!("{}", config.to_toml()?);
        return Ok(());
    }

    let state = AppState::from_config(&config)
        .await
        .context("Failed to open RSVP storage")?;
    let app = rsvp_server::app(state);

    let listener = tokio::net::TcpListener::bind(config.bind)
        .await
        .with_context(|| format!("Failed to bind {}", config.bind))?;
    tracing::info!("rsvp-server listening on http://{}", config.bind);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("rsvp-server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("shutdown requested");
}
