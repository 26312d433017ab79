//! # Greeter Server
//!
//! Serves [`GreetingService`] over plaintext HTTP/2 until the process receives Ctrl-C.

use anyhow::Context;
use clap::Parser;
use greeter_service::{GreeterServer, GreetingService};
use std::net::SocketAddr;
use tonic::transport::Server;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "greeter-server", version, about = "helloworld.Greeter reference server")]
struct Cli {
    /// Socket address to listen on
    #[arg(long, default_value = "127.0.0.1:50051")]
    address: SocketAddr,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "greeter_server=info,greeter_service=info".into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Cli::parse();

    tracing::info!(address = %args.address, "Server started");

    Server::builder()
        .add_service(GreeterServer::new(GreetingService))
        .serve_with_shutdown(args.address, shutdown_signal())
        .await
        .with_context(|| format!("gRPC server on {} failed", args.address))?;

    tracing::info!("Server shut down");

    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %err, "failed to listen for Ctrl-C");
        std::future::pending::<()>().await;
    }
    tracing::info!("shutting down gRPC server");
}
