//! Box office backend library modules.
//!
//! `domain` holds entities, services, and ports; `inbound` and `outbound`
//! hold the HTTP and persistence/identity adapters around them. `settings`
//! is the process configuration shared by the binaries.

pub mod doc;
pub mod domain;
pub mod inbound;
pub mod middleware;
pub mod outbound;
pub mod settings;

/// Public OpenAPI surface used by Swagger UI and tooling.
pub use doc::ApiDoc;
pub use domain::TraceId;
pub use middleware::Trace;
