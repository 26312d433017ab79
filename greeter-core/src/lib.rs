//! # Greeter Core
//!
//! `greeter-core` implements a single synchronous unary call against the
//! `helloworld.Greeter` gRPC service: connect to an address, send one `HelloRequest`,
//! wait for one `HelloReply`, and surface either the message or the failure.
//!
//! ## Key Components
//!
//! * **[`Connection`]:** An async connection owning a typed `GreeterClient`. It can wrap a real
//!   `tonic` channel or any in-process `GrpcService`.
//! * **[`blocking::Connection`]:** The synchronous facade. It owns a current-thread runtime and
//!   blocks the calling thread on every call.
//! * **[`ConnectionTracker`]:** Counts acquired and released connections, so scoped release can be
//!   observed from the outside.
//!
//! ## Errors
//!
//! * **[`ConnectError`]:** the connection could not be established (bad address, unsupported
//!   scheme, nothing listening).
//! * **[`RpcError`]:** the call was attempted and failed with a gRPC status.
//!
//! Neither error is retried. A failed call is reported to the caller exactly once.
//!
//! ## Example
//!
//! ```rust,no_run
//! use greeter_core::{ConnectOptions, blocking};
//!
//! let message = blocking::say_hello_once("localhost:50051", "you", ConnectOptions::default())?;
//! println!("Greeter client received: {message}");
//! # Ok::<(), greeter_core::Error>(())
//! ```
pub mod blocking;
pub mod client;

pub use client::{ConnectError, ConnectOptions, Connection, ConnectionTracker, RpcError};

// Re-exports
pub use greeter_service;
pub use tonic;

/// Type alias for the standard boxed error used in generic bounds.
type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Any failure of a one-shot call: either the connection or the call itself failed.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    Connect(#[from] ConnectError),
    #[error(transparent)]
    Rpc(#[from] RpcError),
}
