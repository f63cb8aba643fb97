mod app;
mod cli;
mod error;
mod output;

use clap::Parser;
use cli::Command;
use flowsdk::{Cluster, FlowConfig};
use tokio_util::sync::CancellationToken;
use tracing::info;

#[tokio::main]
async fn main() {
    rustls::crypto::ring::default_provider()
        .install_default()
        .expect("failed to install rustls crypto provider");

    let cli = cli::Cli::parse();

    // Initialize tracing
    let filter = cli
        .log_level
        .parse::<tracing_subscriber::filter::LevelFilter>()
        .unwrap_or(tracing_subscriber::filter::LevelFilter::INFO);

    tracing_subscriber::fmt()
        .with_max_level(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let _ = dotenvy::dotenv(); // load .env if present

    let config = match build_config(&cli) {
        Ok(config) => config,
        Err(e) => {
            tracing::error!(error = %e, "invalid configuration");
            std::process::exit(2);
        }
    };
    info!(cluster = %config.cluster, rpc = %config.rpc_url, "flowdesk starting");

    let private_key = std::env::var("PRIVATE_KEY").ok();
    let mut app = match app::App::start(config, private_key).await {
        Ok(app) => app,
        Err(e) => {
            tracing::error!(error = %e, "startup failed");
            std::process::exit(1);
        }
    };

    let result = match &cli.command {
        Command::Holdings(args) => app.holdings(args).await,
        Command::Streams(args) => app.streams(args).await,
        Command::Create(args) => app.create(args).await,
        Command::Watch(args) => app.watch(args, setup_signal_handlers()).await,
    };

    if let Err(e) = result {
        tracing::error!(error = %e, "command failed");
        std::process::exit(1);
    }
}

fn build_config(cli: &cli::Cli) -> flowsdk::Result<FlowConfig> {
    let cluster: Cluster = cli.cluster.parse()?;
    let mut config = FlowConfig::for_cluster(cluster);
    if let Some(url) = &cli.rpc_url {
        config = config.with_rpc_url(url);
    }
    if let Some(url) = &cli.stream_api_url {
        config = config.with_stream_api_url(url);
    }
    if let Some(url) = &cli.token_list_url {
        config = config.with_token_list_url(url);
    }
    config.validate()?;
    Ok(config)
}

/// Register SIGINT and SIGTERM handlers that trigger the returned token.
fn setup_signal_handlers() -> CancellationToken {
    let cancel = CancellationToken::new();

    let cancel_clone = cancel.clone();
    tokio::spawn(async move {
        let _ = tokio::signal::ctrl_c().await;
        info!("received SIGINT, shutting down");
        cancel_clone.cancel();
    });

    #[cfg(unix)]
    {
        let cancel_clone = cancel.clone();
        tokio::spawn(async move {
            let mut sig = tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
                .expect("failed to register SIGTERM handler");
            sig.recv().await;
            info!("received SIGTERM, shutting down");
            cancel_clone.cancel();
        });
    }

    cancel
}
