//! Backend library modules.
//!
//! User registration, token authentication and profile self-service behind a
//! hexagonal layout: `domain` owns the rules and ports, `inbound` adapts HTTP
//! onto the driving ports, `outbound` implements the driven ports.

pub mod doc;
pub mod domain;
pub mod inbound;
pub mod middleware;
pub mod outbound;
pub mod settings;
#[cfg(any(test, feature = "test-support"))]
pub mod test_support;

/// Public OpenAPI surface used by Swagger UI and tooling.
pub use doc::ApiDoc;
pub use domain::TraceId;
pub use middleware::Trace;
