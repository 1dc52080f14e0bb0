//! Resolution outcome shared by the local and remote resolvers.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::ResolutionError;

/// Why a particular value was chosen.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Reason {
    /// A variant's targeting key and criteria matched the context.
    TargetingMatch,
    /// No variant matched; the default variant was served.
    Default,
    /// Resolution failed.
    Error,
    /// A reason reported upstream that has no local counterpart
    /// (`STATIC`, `SPLIT`, `DISABLED`, ...).
    Other(String),
}

impl Reason {
    /// Parse a wire reason string.
    pub fn from_wire(reason: &str) -> Self {
        match reason {
            "TARGETING_MATCH" => Self::TargetingMatch,
            "DEFAULT" => Self::Default,
            "ERROR" => Self::Error,
            other => Self::Other(other.to_string()),
        }
    }

    /// Wire representation of the reason.
    pub fn as_str(&self) -> &str {
        match self {
            Self::TargetingMatch => "TARGETING_MATCH",
            Self::Default => "DEFAULT",
            Self::Error => "ERROR",
            Self::Other(reason) => reason,
        }
    }
}

impl fmt::Display for Reason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<String> for Reason {
    fn from(reason: String) -> Self {
        Self::from_wire(&reason)
    }
}

impl From<Reason> for String {
    fn from(reason: Reason) -> Self {
        reason.as_str().to_string()
    }
}

/// Result of resolving a flag.
///
/// `error` is present exactly when `reason` is [`Reason::Error`]; the
/// constructors keep that invariant.
#[derive(Debug, Clone, PartialEq)]
pub struct Outcome<V = serde_json::Value> {
    /// Name of the variant that was served.
    pub variant: Option<String>,
    /// How the decision was reached.
    pub reason: Reason,
    /// The resolved value.
    pub value: Option<V>,
    /// Failure details when `reason` is [`Reason::Error`].
    pub error: Option<ResolutionError>,
}

impl<V> Outcome<V> {
    /// A variant matched the context.
    pub fn targeting_match(variant: impl Into<String>, value: V) -> Self {
        Self {
            variant: Some(variant.into()),
            reason: Reason::TargetingMatch,
            value: Some(value),
            error: None,
        }
    }

    /// Nothing matched and the default variant was served.
    pub fn default_variant(variant: impl Into<String>, value: V) -> Self {
        Self {
            variant: Some(variant.into()),
            reason: Reason::Default,
            value: Some(value),
            error: None,
        }
    }

    /// Resolution failed.
    pub fn error(error: ResolutionError) -> Self {
        Self {
            variant: None,
            reason: Reason::Error,
            value: None,
            error: Some(error),
        }
    }

    /// Build an outcome from the fields of a service response.
    ///
    /// An empty variant name is treated as absent. A response that reports
    /// `ERROR` without any detail becomes a `General` error.
    pub fn from_wire(variant: String, reason: &str, value: V) -> Self {
        let reason = Reason::from_wire(reason);
        if reason == Reason::Error {
            return Self::error(ResolutionError::General(
                "service reported an error without details".to_string(),
            ));
        }

        Self {
            variant: (!variant.is_empty()).then_some(variant),
            reason,
            value: Some(value),
            error: None,
        }
    }

    /// Check whether resolution failed.
    pub fn is_error(&self) -> bool {
        self.error.is_some()
    }

    /// Take the resolved value, falling back to `default` on error.
    pub fn value_or(self, default: V) -> V {
        self.value.unwrap_or(default)
    }

    /// Convert the carried value.
    pub fn map<U, F>(self, f: F) -> Outcome<U>
    where
        F: FnOnce(V) -> U,
    {
        Outcome {
            variant: self.variant,
            reason: self.reason,
            value: self.value.map(f),
            error: self.error,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reason_wire_strings() {
        assert_eq!(Reason::from_wire("TARGETING_MATCH"), Reason::TargetingMatch);
        assert_eq!(Reason::from_wire("DEFAULT"), Reason::Default);
        assert_eq!(Reason::from_wire("ERROR"), Reason::Error);
        assert_eq!(
            Reason::from_wire("STATIC"),
            Reason::Other("STATIC".to_string())
        );
        assert_eq!(Reason::Other("SPLIT".to_string()).to_string(), "SPLIT");
    }

    #[test]
    fn test_reason_serde() {
        let json = serde_json::to_string(&Reason::TargetingMatch).unwrap();
        assert_eq!(json, "\"TARGETING_MATCH\"");

        let reason: Reason = serde_json::from_str("\"DEFAULT\"").unwrap();
        assert_eq!(reason, Reason::Default);
    }

    #[test]
    fn test_error_outcome_invariant() {
        let outcome: Outcome<bool> = Outcome::error(ResolutionError::General("x".into()));
        assert_eq!(outcome.reason, Reason::Error);
        assert!(outcome.is_error());
        assert!(outcome.value.is_none());
        assert!(outcome.variant.is_none());
    }

    #[test]
    fn test_from_wire() {
        let outcome = Outcome::from_wire("on".to_string(), "TARGETING_MATCH", true);
        assert_eq!(outcome.variant.as_deref(), Some("on"));
        assert_eq!(outcome.reason, Reason::TargetingMatch);
        assert_eq!(outcome.value, Some(true));
        assert!(!outcome.is_error());

        let outcome = Outcome::from_wire(String::new(), "STATIC", 3_i64);
        assert!(outcome.variant.is_none());
        assert_eq!(outcome.reason, Reason::Other("STATIC".to_string()));
    }

    #[test]
    fn test_from_wire_error_without_details() {
        let outcome = Outcome::from_wire("on".to_string(), "ERROR", true);
        assert_eq!(outcome.reason, Reason::Error);
        assert!(matches!(outcome.error, Some(ResolutionError::General(_))));
        assert!(outcome.value.is_none());
    }

    #[test]
    fn test_value_or_and_map() {
        let outcome = Outcome::default_variant("off", 2_i64);
        assert_eq!(outcome.clone().map(|v| v * 10).value, Some(20));
        assert_eq!(outcome.value_or(7), 2);

        let failed: Outcome<i64> = Outcome::error(ResolutionError::General("x".into()));
        assert_eq!(failed.value_or(7), 7);
    }
}
