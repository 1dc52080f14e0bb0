//! Flag Definitions
//!
//! Defines flag variants, their targeting criteria, and evaluation logic.

use openflag_core::{EvaluationContext, Outcome, ResolutionError};
use serde::{Deserialize, Serialize};
use serde_json::{Number, Value};
use tracing::debug;

/// Flag definition
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FlagDefinition {
    /// Name of the variant served when nothing matches
    #[serde(rename = "defaultVariant")]
    pub default_variant: String,

    /// Variants in priority order
    #[serde(rename = "variant", alias = "variants", default)]
    pub variants: Vec<Variant>,
}

impl FlagDefinition {
    /// Create a flag with no variants
    ///
    /// # Examples
    ///
    /// ```
    /// use openflag_targeting::{FlagDefinition, Variant};
    ///
    /// let flag = FlagDefinition::new("off")
    ///     .with_variant(Variant::new("off", false));
    /// ```
    pub fn new(default_variant: impl Into<String>) -> Self {
        Self {
            default_variant: default_variant.into(),
            variants: Vec::new(),
        }
    }

    /// Append a variant
    pub fn with_variant(mut self, variant: Variant) -> Self {
        self.variants.push(variant);
        self
    }

    /// Parse a definition from its JSON document
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }

    /// Evaluate flag for a context
    ///
    /// The first variant whose targeting key and criteria match wins. When
    /// nothing matches, the first variant named by `default_variant` is
    /// served; when no such variant exists the definition is malformed and a
    /// `ParseError` is returned. A winning default variant that carries no
    /// targeting key and no criteria is reported with reason `Default`.
    pub fn evaluate(&self, context: &EvaluationContext) -> Outcome {
        let mut fallback: Option<&Variant> = None;

        for variant in &self.variants {
            if fallback.is_none() && variant.name == self.default_variant {
                fallback = Some(variant);
            }

            if variant.matches(context) {
                // Unconditional default variant reports Default
                if variant.is_unconditional() && variant.name == self.default_variant {
                    return Outcome::default_variant(variant.name.clone(), variant.value.clone());
                }
                return Outcome::targeting_match(variant.name.clone(), variant.value.clone());
            }
        }

        match fallback {
            Some(variant) => Outcome::default_variant(variant.name.clone(), variant.value.clone()),
            None => {
                debug!(
                    default_variant = %self.default_variant,
                    variants = self.variants.len(),
                    "Default variant not found in flag definition"
                );
                Outcome::error(ResolutionError::ParseError(String::new()))
            }
        }
    }
}

/// Evaluate `flag` for `context`
pub fn evaluate(flag: &FlagDefinition, context: &EvaluationContext) -> Outcome {
    flag.evaluate(context)
}

/// Flag variant
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Variant {
    /// Variant name
    pub name: String,

    /// Only context with this targeting key may match (empty = anyone)
    #[serde(rename = "targetingKey", default)]
    pub targeting_key: String,

    /// Criteria (all must match)
    #[serde(default)]
    pub criteria: Vec<Criterion>,

    /// Value served when this variant is selected
    #[serde(default)]
    pub value: Value,
}

impl Variant {
    pub fn new(name: impl Into<String>, value: impl Into<Value>) -> Self {
        Self {
            name: name.into(),
            targeting_key: String::new(),
            criteria: Vec::new(),
            value: value.into(),
        }
    }

    pub fn with_targeting_key(mut self, targeting_key: impl Into<String>) -> Self {
        self.targeting_key = targeting_key.into();
        self
    }

    pub fn with_criterion(mut self, criterion: Criterion) -> Self {
        self.criteria.push(criterion);
        self
    }

    /// Check the targeting key gate
    pub fn admits(&self, context: &EvaluationContext) -> bool {
        self.targeting_key.is_empty() || context.targeting_key() == Some(self.targeting_key.as_str())
    }

    /// Check whether the variant carries no targeting key and no criteria
    pub fn is_unconditional(&self) -> bool {
        self.targeting_key.is_empty() && self.criteria.is_empty()
    }

    pub fn matches(&self, context: &EvaluationContext) -> bool {
        self.admits(context) && self.criteria.iter().all(|c| c.matches(context))
    }
}

/// Equality criterion over one context attribute
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Criterion {
    /// Attribute to check
    pub key: String,

    /// Value the attribute must equal
    pub value: Value,
}

impl Criterion {
    pub fn new(key: impl Into<String>, value: impl Into<Value>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }

    pub fn matches(&self, context: &EvaluationContext) -> bool {
        context
            .get(&self.key)
            .map(|v| values_equal(v, &self.value))
            .unwrap_or(false)
    }
}

/// Structural equality where numbers compare by exact numeric value.
///
/// `1` and `1.0` are the same JSON number; values of different JSON types
/// never compare equal.
fn values_equal(left: &Value, right: &Value) -> bool {
    match (left, right) {
        (Value::Number(l), Value::Number(r)) => numbers_equal(l, r),
        (Value::Array(l), Value::Array(r)) => {
            l.len() == r.len() && l.iter().zip(r).all(|(l, r)| values_equal(l, r))
        }
        (Value::Object(l), Value::Object(r)) => {
            l.len() == r.len()
                && l
                    .iter()
                    .all(|(key, l)| r.get(key).is_some_and(|r| values_equal(l, r)))
        }
        _ => left == right,
    }
}

/// Integers compare exactly; a float equals an integer only when it is
/// integral and has the same value once both are widened to `i128`.
fn numbers_equal(left: &Number, right: &Number) -> bool {
    match (as_integer(left), as_integer(right)) {
        (Some(l), Some(r)) => l == r,
        (Some(i), None) => right.as_f64().is_some_and(|f| float_equals_integer(f, i)),
        (None, Some(i)) => left.as_f64().is_some_and(|f| float_equals_integer(f, i)),
        (None, None) => match (left.as_f64(), right.as_f64()) {
            (Some(l), Some(r)) => l == r,
            _ => false,
        },
    }
}

fn as_integer(n: &Number) -> Option<i128> {
    n.as_i64()
        .map(i128::from)
        .or_else(|| n.as_u64().map(i128::from))
}

fn float_equals_integer(f: f64, i: i128) -> bool {
    // 2^127; every integral float in [-BOUND, BOUND) converts exactly
    const BOUND: f64 = i128::MAX as f64;
    f.is_finite() && f.fract() == 0.0 && (-BOUND..BOUND).contains(&f) && f as i128 == i
}
