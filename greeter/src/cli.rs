//! # CLI
//!
//! Every flag has a default, so running the binary without arguments greets `you` on
//! `localhost:50051`.
use clap::Parser;
use greeter_core::ConnectOptions;
use std::time::Duration;

#[derive(Parser)]
#[command(name = "greeter-client", version, about = "helloworld.Greeter client")]
pub struct Cli {
    /// Server address (host:port or http://host:port). Plaintext only.
    #[arg(long, default_value = "localhost:50051")]
    pub address: String,

    /// Name sent in the HelloRequest
    #[arg(long, default_value = "you")]
    pub name: String,

    /// Seconds to wait for the connection to be established (at least 1)
    #[arg(long, default_value_t = 5, value_parser = parse_seconds)]
    pub connect_timeout: u64,

    /// Seconds to wait for the reply; 0 disables the reply timeout
    #[arg(
        long,
        default_value_t = 30,
        long_help = "Seconds to wait for the reply. 0 disables the reply timeout and waits \
                     for as long as the transport does. Unlike --connect-timeout, 0 is accepted."
    )]
    pub timeout: u64,
}

impl Cli {
    pub fn connect_options(&self) -> ConnectOptions {
        ConnectOptions {
            connect_timeout: Duration::from_secs(self.connect_timeout),
            request_timeout: (self.timeout > 0).then(|| Duration::from_secs(self.timeout)),
        }
    }
}

fn parse_seconds(value: &str) -> Result<u64, String> {
    let secs: u64 = value
        .parse()
        .map_err(|e| format!("Invalid number of seconds '{value}': {e}"))?;

    if secs == 0 {
        return Err("Timeout must be at least 1 second".to_string());
    }

    Ok(secs)
}
