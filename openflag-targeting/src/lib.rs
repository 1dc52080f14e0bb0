//! Local Flag Evaluation for OpenFlag
//!
//! Evaluates in-memory flag definitions against an evaluation context. No
//! I/O is performed; the definition is supplied already parsed.
//!
//! # Features
//!
//! - 🎯 **Targeting Keys** - Pin a variant to a single caller
//! - ✅ **Criteria** - Equality conditions over context attributes
//! - 🥇 **Ordered Variants** - The first matching variant wins
//! - 🛟 **Default Variant** - Served when nothing matches
//!
//! # Quick Start
//!
//! ```
//! use openflag_core::{EvaluationContext, Reason};
//! use openflag_targeting::*;
//!
//! let flag = FlagDefinition::new("off")
//!     .with_variant(
//!         Variant::new("on", true).with_criterion(Criterion::new("env", "prod")),
//!     )
//!     .with_variant(Variant::new("off", false));
//!
//! let context = EvaluationContext::new().with_attribute("env", "prod");
//! let outcome = flag.evaluate(&context);
//!
//! assert_eq!(outcome.variant.as_deref(), Some("on"));
//! assert_eq!(outcome.reason, Reason::TargetingMatch);
//! ```
//!
//! # Targeting Keys
//!
//! ```
//! use openflag_core::EvaluationContext;
//! use openflag_targeting::*;
//!
//! // Only user-42 sees the gold tier
//! let flag = FlagDefinition::new("standard")
//!     .with_variant(Variant::new("gold", "gold").with_targeting_key("user-42"))
//!     .with_variant(Variant::new("standard", "standard"));
//!
//! let context = EvaluationContext::new().with_targeting_key("user-42");
//! assert_eq!(evaluate(&flag, &context).variant.as_deref(), Some("gold"));
//! ```

pub mod flag;

pub use flag::{Criterion, FlagDefinition, Variant, evaluate};
