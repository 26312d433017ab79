//! # Greeter Client Entry Point
//!
//! 1. **Initialization**: Parses command-line arguments using [`cli::Cli`].
//! 2. **Call**: Connects to the server, sends one `SayHello` and releases the connection.
//! 3. **Presentation**: Prints the greeting to standard output, or the error to standard error.

mod cli;
mod formatter;

use clap::Parser;
use cli::Cli;
use formatter::{FormattedString, greeting_line};
use greeter_core::blocking;
use std::process;
use tracing_subscriber::EnvFilter;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "greeter_client=info,greeter_core=info".into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Cli::parse();
    let options = args.connect_options();

    tracing::debug!(address = %args.address, name = %args.name, "sending greeting");

    match blocking::say_hello_once(&args.address, &args.name, options) {
        Ok(message) => println!("{}", greeting_line(&message)),
        Err(err) => {
            eprintln!("{}", FormattedString::from(err));
            process::exit(1);
        }
    }
}
