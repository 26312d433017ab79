//! # Greeter Connection
//!
//! This module implements the asynchronous half of the unary call pattern.
//!
//! A [`Connection`] goes through two states only: it is created connected (by
//! [`Connection::connect`] or [`Connection::from_service`]) and it is disconnected when dropped.
//! There is no reconnection logic; a broken connection surfaces as an [`RpcError`] on the next
//! call.
mod address;
mod tracker;

pub use tracker::ConnectionTracker;

use crate::BoxError;
use greeter_service::{GreeterClient, HelloRequest};
use http_body::Body as HttpBody;
use std::time::Duration;
use tonic::{Code, Status, transport::Channel};
use tracker::Lease;

/// Errors that can occur when connecting to a Greeter server.
#[derive(Debug, thiserror::Error)]
pub enum ConnectError {
    #[error("Invalid address '{address}': '{source}'")]
    InvalidAddress {
        address: String,
        #[source]
        source: tonic::transport::Error,
    },
    #[error("Address '{0}' does not specify a port")]
    MissingPort(String),
    #[error("Unsupported scheme '{scheme}' in address '{address}', only plaintext 'http' is supported")]
    UnsupportedScheme { address: String, scheme: String },
    #[error("Failed to connect to '{address}': '{source}'")]
    Unreachable {
        address: String,
        #[source]
        source: tonic::transport::Error,
    },
    #[error("Failed to start the client runtime: '{0}'")]
    Runtime(#[source] std::io::Error),
}

/// A failed `SayHello` call, carrying the gRPC status code and its message.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("RPC failed with code '{code}': '{detail}'")]
pub struct RpcError {
    pub code: Code,
    pub detail: String,
}

impl From<Status> for RpcError {
    fn from(status: Status) -> Self {
        Self {
            code: status.code(),
            detail: status.message().to_string(),
        }
    }
}

/// Bounds applied to a connection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConnectOptions {
    /// How long to wait for the transport connection to be established.
    pub connect_timeout: Duration,
    /// How long a single call may take before failing with `DEADLINE_EXCEEDED`.
    /// `None` waits for as long as the transport does.
    pub request_timeout: Option<Duration>,
}

impl Default for ConnectOptions {
    fn default() -> Self {
        Self {
            connect_timeout: Duration::from_secs(5),
            request_timeout: Some(Duration::from_secs(30)),
        }
    }
}

/// A connected Greeter client.
///
/// Dropping the connection closes the underlying channel and returns its lease, if it has one.
#[derive(Debug)]
pub struct Connection<S = Channel> {
    client: GreeterClient<S>,
    request_timeout: Option<Duration>,
    lease: Option<Lease>,
}

impl Connection<Channel> {
    /// Connects to `addr` with the default [`ConnectOptions`].
    ///
    /// # Arguments
    ///
    /// * `addr` - `host:port` or `http://host:port`. Connections are always plaintext.
    ///
    /// # Returns
    ///
    /// * `Ok(Connection)` - The connected client.
    /// * `Err(ConnectError)` - If the address is malformed or nothing answers on it.
    pub async fn connect(addr: &str) -> Result<Self, ConnectError> {
        Self::connect_with(addr, ConnectOptions::default()).await
    }

    /// Connects to `addr` using the given options.
    pub async fn connect_with(addr: &str, options: ConnectOptions) -> Result<Self, ConnectError> {
        let endpoint = address::endpoint(addr)?.connect_timeout(options.connect_timeout);

        tracing::debug!(address = addr, "connecting");

        let channel = endpoint
            .connect()
            .await
            .map_err(|source| ConnectError::Unreachable {
                address: addr.to_string(),
                source,
            })?;

        tracing::debug!(address = addr, "connected");

        Ok(Self::from_service(channel).with_request_timeout(options.request_timeout))
    }
}

impl<S> Connection<S>
where
    S: tonic::client::GrpcService<tonic::body::Body>,
    S::Error: Into<BoxError>,
    S::ResponseBody: HttpBody<Data = tonic::codegen::Bytes> + Send + 'static,
    <S::ResponseBody as HttpBody>::Error: Into<BoxError> + Send,
{
    /// Creates a connection from an existing Tonic service/channel.
    pub fn from_service(service: S) -> Self {
        Self {
            client: GreeterClient::new(service),
            request_timeout: ConnectOptions::default().request_timeout,
            lease: None,
        }
    }

    /// Replaces the per-call timeout.
    pub fn with_request_timeout(mut self, request_timeout: Option<Duration>) -> Self {
        self.request_timeout = request_timeout;
        self
    }

    /// Registers this connection with `tracker`. The lease is returned when the connection drops.
    pub fn tracked(mut self, tracker: &ConnectionTracker) -> Self {
        self.lease = Some(tracker.acquire());
        self
    }

    /// Sends one `HelloRequest { name }` and waits for the reply.
    ///
    /// # Returns
    ///
    /// * `Ok(String)` - The `message` field of the reply.
    /// * `Err(RpcError)` - The server returned a non-OK status, the transport failed, or the call
    ///   exceeded the request timeout. The call is never retried.
    pub async fn say_hello(&mut self, name: &str) -> Result<String, RpcError> {
        let mut request = tonic::Request::new(HelloRequest {
            name: name.to_string(),
        });

        if let Some(timeout) = self.request_timeout {
            request.set_timeout(timeout);
        }

        tracing::debug!(name, "calling helloworld.Greeter/SayHello");

        let call = self.client.say_hello(request);

        let result = match self.request_timeout {
            Some(timeout) => tokio::time::timeout(timeout, call)
                .await
                .map_err(|_| RpcError {
                    code: Code::DeadlineExceeded,
                    detail: format!("no reply within {timeout:?}"),
                })?,
            None => call.await,
        };

        match result {
            Ok(response) => Ok(response.into_inner().message),
            Err(status) => {
                tracing::debug!(code = ?status.code(), message = status.message(), "SayHello failed");
                Err(status.into())
            }
        }
    }
}
