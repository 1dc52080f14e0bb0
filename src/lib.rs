// OpenFlag - feature flag resolution for Rust
//
// Resolves flags either locally, by evaluating in-memory flag definitions,
// or remotely, through a flag evaluation service. Both paths produce the
// same Outcome shape.

// Re-export the shared resolution contract
pub use openflag_core::*;

// Re-export optional crates
#[cfg(feature = "targeting")]
pub use openflag_targeting;

#[cfg(feature = "remote")]
pub use openflag_remote;

// Prelude for common imports
pub mod prelude {
    pub use crate::{
        ErrorCode, EvaluationContext, Outcome, Reason, ResolutionError, TARGETING_KEY,
    };

    #[cfg(feature = "targeting")]
    pub use openflag_targeting::{Criterion, FlagDefinition, Variant, evaluate};

    #[cfg(feature = "remote")]
    pub use openflag_remote::{
        BooleanFlag, ClientSource, Failed, FlagService, FloatFlag, GrpcServiceClient, IntFlag,
        ObjectFlag, ResolveKind, ServiceClient, ServiceConfiguration, SharedClient, StringFlag,
    };
}
