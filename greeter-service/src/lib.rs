//! # Greeter Service
//!
//! Protobuf messages and `tonic` bindings for the `helloworld.Greeter` service, plus
//! [`GreetingService`], the reference implementation served by the `greeter-server` binary
//! and used by the client test-suites.
//!
//! The bindings under `src/generated` are checked in so that building the workspace does not
//! require `protoc`. Regenerate them with:
//!
//! ```bash
//! cargo run -p greeter-service --features gen-proto --bin generate-greeter-service
//! ```

pub mod pb {
    include!("generated/helloworld.rs");
}

pub use pb::greeter_client::GreeterClient;
pub use pb::greeter_server::{Greeter, GreeterServer};
pub use pb::{HelloReply, HelloRequest};

use tonic::{Request, Response, Status};

/// Fully qualified name of the service, as it appears on the wire.
pub const SERVICE_NAME: &str = pb::greeter_server::SERVICE_NAME;

/// Builds the greeting returned for `name`.
pub fn greeting(name: &str) -> String {
    format!("Hello, {name}")
}

/// Replies to every `SayHello` with `"Hello, " + name`.
#[derive(Debug, Default, Clone, Copy)]
pub struct GreetingService;

#[tonic::async_trait]
impl Greeter for GreetingService {
    async fn say_hello(
        &self,
        request: Request<HelloRequest>,
    ) -> Result<Response<HelloReply>, Status> {
        let name = request.into_inner().name;
        tracing::debug!(name = %name, "received SayHello");

        Ok(Response::new(HelloReply {
            message: greeting(&name),
        }))
    }
}
