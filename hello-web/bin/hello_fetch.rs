//! Fetches one hello endpoint and prints the response body.

use clap::Parser;
use hello_web::fetch::{DEFAULT_URL, fetch_text};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "hello-fetch", version, about = "GET a URL and print the body")]
struct Cli {
    /// URL to fetch
    #[arg(default_value = DEFAULT_URL)]
    url: String,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| "hello_fetch=info".into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Cli::parse();
    let client = reqwest::Client::new();

    let body = fetch_text(&client, &args.url).await?;
    println!("{body}");

    Ok(())
}
