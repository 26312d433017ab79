use colored::*;
use greeter_core::{ConnectError, Error, RpcError};

/// A wrapper struct for a formatted, colored string.
///
/// Implements `Display` so it can be printed directly.
pub struct FormattedString(pub String);

impl std::fmt::Display for FormattedString {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f)?;
        writeln!(f, "{}", self.0)?;
        Ok(())
    }
}

/// The line printed on a successful call.
pub fn greeting_line(message: &str) -> String {
    format!("Greeter client received: {message}")
}

impl From<ConnectError> for FormattedString {
    fn from(err: ConnectError) -> Self {
        FormattedString(format!("{}\n\n'{}'", "Connection Error:".red().bold(), err))
    }
}

impl From<RpcError> for FormattedString {
    fn from(err: RpcError) -> Self {
        FormattedString(format!(
            "{} code={:?} message={:?}",
            "gRPC Failed:".red().bold(),
            err.code,
            err.detail
        ))
    }
}

impl From<Error> for FormattedString {
    fn from(err: Error) -> Self {
        match err {
            Error::Connect(err) => err.into(),
            Error::Rpc(err) => err.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use greeter_core::greeter_service::{GreeterServer, GreetingService};
    use greeter_core::tonic::{Code, transport::Server};
    use greeter_core::{ConnectOptions, blocking};
    use tokio::net::TcpListener;
    use tokio_stream::wrappers::TcpListenerStream;

    #[test]
    fn test_greeting_line_against_live_server() {
        let server_runtime = tokio::runtime::Runtime::new().unwrap();
        let addr = server_runtime.block_on(async {
            let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
            let addr = listener.local_addr().unwrap();
            tokio::spawn(
                Server::builder()
                    .add_service(GreeterServer::new(GreetingService))
                    .serve_with_incoming(TcpListenerStream::new(listener)),
            );
            addr
        });

        let message =
            blocking::say_hello_once(&addr.to_string(), "you", ConnectOptions::default()).unwrap();

        assert_eq!(greeting_line(&message), "Greeter client received: Hello, you");
    }

    #[test]
    fn test_greeting_line_keeps_message_verbatim() {
        assert_eq!(greeting_line(""), "Greeter client received: ");
        assert_eq!(
            greeting_line("Hello, 世界"),
            "Greeter client received: Hello, 世界"
        );
    }

    #[test]
    fn test_rpc_error_shows_code_and_detail() {
        colored::control::set_override(false);

        let formatted = FormattedString::from(Error::Rpc(RpcError {
            code: Code::Unavailable,
            detail: "down".to_string(),
        }));

        assert_eq!(formatted.0, "gRPC Failed: code=Unavailable message=\"down\"");
    }

    #[test]
    fn test_connect_error_is_labelled() {
        colored::control::set_override(false);

        let formatted = FormattedString::from(ConnectError::MissingPort("localhost".to_string()));

        assert!(formatted.0.starts_with("Connection Error:"));
        assert!(formatted.0.contains("localhost"));
    }
}
