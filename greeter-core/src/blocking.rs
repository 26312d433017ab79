//! # Blocking Client
//!
//! A synchronous facade over [`crate::Connection`]. Every call blocks the calling thread until
//! the reply arrives or the call fails.
//!
//! Each [`Connection`] owns a current-thread `tokio` runtime which is only driven while a call is
//! in progress. It must not be used from inside another async runtime.
use crate::{
    BoxError, ConnectError, ConnectOptions, ConnectionTracker, Error, RpcError, client,
};
use http_body::Body as HttpBody;
use tokio::runtime::{Builder, Runtime};
use tonic::transport::Channel;

/// A blocking Greeter connection.
///
/// The channel is closed when the connection is dropped, before its runtime shuts down.
#[derive(Debug)]
pub struct Connection<S = Channel> {
    inner: client::Connection<S>,
    runtime: Runtime,
}

impl Connection<Channel> {
    /// Connects to `addr` with the default [`ConnectOptions`], blocking until connected.
    pub fn connect(addr: &str) -> Result<Self, ConnectError> {
        Self::connect_with(addr, ConnectOptions::default())
    }

    /// Connects to `addr` using the given options, blocking until connected.
    pub fn connect_with(addr: &str, options: ConnectOptions) -> Result<Self, ConnectError> {
        let runtime = new_runtime()?;
        let inner = runtime.block_on(client::Connection::connect_with(addr, options))?;

        Ok(Self { inner, runtime })
    }
}

impl<S> Connection<S>
where
    S: tonic::client::GrpcService<tonic::body::Body>,
    S::Error: Into<BoxError>,
    S::ResponseBody: HttpBody<Data = tonic::codegen::Bytes> + Send + 'static,
    <S::ResponseBody as HttpBody>::Error: Into<BoxError> + Send,
{
    /// Creates a blocking connection from an existing Tonic service/channel.
    pub fn from_service(service: S) -> Result<Self, ConnectError> {
        Ok(Self {
            inner: client::Connection::from_service(service),
            runtime: new_runtime()?,
        })
    }

    /// See [`client::Connection::tracked`].
    pub fn tracked(self, tracker: &ConnectionTracker) -> Self {
        Self {
            inner: self.inner.tracked(tracker),
            runtime: self.runtime,
        }
    }

    /// Sends one `HelloRequest { name }` and blocks until the reply's `message` is available.
    ///
    /// Failures are returned as-is; the call is never retried.
    pub fn say_hello(&mut self, name: &str) -> Result<String, RpcError> {
        self.runtime.block_on(self.inner.say_hello(name))
    }

    /// Runs `f` with this connection and releases the connection before returning.
    ///
    /// Release happens on every exit path of `f`, including a panic unwinding through it.
    pub fn scoped<T>(mut self, f: impl FnOnce(&mut Self) -> T) -> T {
        let output = f(&mut self);
        drop(self);
        output
    }
}

/// Connects to `addr`, sends a single `SayHello` for `name` and releases the connection.
pub fn say_hello_once(addr: &str, name: &str, options: ConnectOptions) -> Result<String, Error> {
    let message = Connection::connect_with(addr, options)?.scoped(|conn| conn.say_hello(name))?;
    Ok(message)
}

fn new_runtime() -> Result<Runtime, ConnectError> {
    Builder::new_current_thread()
        .enable_all()
        .build()
        .map_err(ConnectError::Runtime)
}
