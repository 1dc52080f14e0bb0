// Status from tonic is inherently large; this is acceptable for error handling
#![allow(clippy::result_large_err)]

//! # OpenFlag Remote
//!
//! Resolves flags through a remote flag evaluation service
//! (`schema.v1.Service`) over gRPC.
//!
//! ## Features
//!
//! - **One generic routine**: every value kind goes through [`FlagService::resolve`]
//! - **Uniform errors**: status codes map onto the shared [`ResolutionError`] taxonomy
//! - **Pluggable client**: anything implementing [`ServiceClient`] can carry the calls
//! - **Cancellation**: a caller-supplied [`CancellationToken`] abandons in-flight calls
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use openflag_remote::{FlagService, GrpcServiceClient, SharedClient};
//! use openflag_core::EvaluationContext;
//! use tokio_util::sync::CancellationToken;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let clients = SharedClient::new();
//!     let service = FlagService::new(clients.clone());
//!
//!     // Whoever owns the connection installs the client once it is up
//!     clients.set(GrpcServiceClient::new(channel));
//!
//!     let context = EvaluationContext::new().with_targeting_key("user-42");
//!     let outcome = service
//!         .resolve_boolean(&CancellationToken::new(), "new-checkout", &context)
//!         .await;
//!
//!     println!("{:?} via {}", outcome.value, outcome.reason);
//!     Ok(())
//! }
//! ```
//!
//! [`ResolutionError`]: openflag_core::ResolutionError
//! [`CancellationToken`]: tokio_util::sync::CancellationToken

mod client;
mod config;
mod convert;
mod error;
mod schema;
mod service;

pub use client::{ClientSource, GrpcServiceClient, ServiceClient, SharedClient};
pub use config::{
    CERT_PATH_ENV, DEFAULT_HOST, DEFAULT_PORT, HOST_ENV, PORT_ENV, SOCKET_PATH_ENV,
    ServiceConfiguration, ServiceConfigurationBuilder,
};
pub use convert::{MAX_DEPTH, context_to_struct, struct_to_json};
pub use error::{CONNECTION_ERROR, ConfigError, ContextError, resolution_error};
pub use schema::{
    BooleanFlag, ERROR_REASON, FloatFlag, IntFlag, ObjectFlag, ResolveBooleanRequest,
    ResolveBooleanResponse, ResolveFloatRequest, ResolveFloatResponse, ResolveIntRequest,
    ResolveIntResponse, ResolveKind, ResolveObjectRequest, ResolveObjectResponse,
    ResolveStringRequest, ResolveStringResponse, SERVICE_NAME, StringFlag, ValueKind,
};
pub use service::{Failed, FlagService};

// Re-export tonic types
pub use tonic::{Code, Request, Response, Status, transport::Channel};

/// Prelude for common imports.
///
/// ```
/// use openflag_remote::prelude::*;
/// ```
pub mod prelude {
    pub use crate::client::{ClientSource, GrpcServiceClient, ServiceClient, SharedClient};
    pub use crate::config::ServiceConfiguration;
    pub use crate::error::{ConfigError, ContextError};
    pub use crate::schema::{BooleanFlag, FloatFlag, IntFlag, ObjectFlag, ResolveKind, StringFlag};
    pub use crate::service::{Failed, FlagService};
    pub use openflag_core::{EvaluationContext, Outcome, Reason, ResolutionError};
    pub use tokio_util::sync::CancellationToken;
}
