//! Web server binary for the hello endpoints.

use anyhow::Context;
use clap::Parser;
use hello_web::{DEFAULT_MAX_CHARS, EchoLimits};
use std::net::SocketAddr;
use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "hello-web", version, about = "Hello web endpoints")]
struct Cli {
    /// Socket address to listen on
    #[arg(long, default_value = "127.0.0.1:5000")]
    address: SocketAddr,

    /// Longest path segment or form value echoed back, in characters
    #[arg(long, default_value_t = DEFAULT_MAX_CHARS)]
    max_chars: usize,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "hello_web=info,tower_http=debug".into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Cli::parse();

    let router = hello_web::router(EchoLimits {
        max_chars: args.max_chars,
    });

    let listener = TcpListener::bind(args.address)
        .await
        .with_context(|| format!("failed to bind {}", args.address))?;
    tracing::info!("Hello web running on http://{}", listener.local_addr()?);

    hello_web::serve(listener, router, hello_web::shutdown_signal())
        .await
        .context("web server failed")?;

    Ok(())
}
