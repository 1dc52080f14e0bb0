//! OpenFlag Core
//!
//! The resolution contract shared by every OpenFlag resolver: the
//! [`Outcome`] a resolution produces, the [`Reason`] it was reached for, the
//! [`ResolutionError`] taxonomy, and the [`EvaluationContext`] it is
//! resolved against.
//!
//! # Quick Start
//!
//! ```
//! use openflag_core::*;
//!
//! let context = EvaluationContext::new()
//!     .with_targeting_key("user-42")
//!     .with_attribute("plan", "pro");
//!
//! let outcome: Outcome<bool> = Outcome::targeting_match("on", true);
//! assert_eq!(outcome.reason, Reason::TargetingMatch);
//!
//! let failed: Outcome<bool> =
//!     Outcome::error(ResolutionError::FlagNotFound("beta".to_string()));
//! assert_eq!(failed.error.map(|e| e.code()), Some(ErrorCode::FlagNotFound));
//! # let _ = context;
//! ```

pub mod context;
pub mod error;
pub mod outcome;

pub use context::{EvaluationContext, TARGETING_KEY};
pub use error::{ErrorCode, ResolutionError};
pub use outcome::{Outcome, Reason};
