//! Wire messages of the flag evaluation service and the value kinds they carry.

use openflag_core::Outcome;
use prost_types::Struct;
use std::fmt;

use crate::convert::struct_to_json;

/// Fully qualified gRPC service name.
pub const SERVICE_NAME: &str = "schema.v1.Service";

/// Reason reported on the shell response of a failed resolution.
pub const ERROR_REASON: &str = "ERROR";

#[derive(Clone, PartialEq, prost::Message)]
pub struct ResolveBooleanRequest {
    #[prost(string, tag = "1")]
    pub flag_key: String,
    #[prost(message, optional, tag = "2")]
    pub context: Option<Struct>,
}

#[derive(Clone, PartialEq, prost::Message)]
pub struct ResolveBooleanResponse {
    #[prost(bool, tag = "1")]
    pub value: bool,
    #[prost(string, tag = "2")]
    pub reason: String,
    #[prost(string, tag = "3")]
    pub variant: String,
}

#[derive(Clone, PartialEq, prost::Message)]
pub struct ResolveStringRequest {
    #[prost(string, tag = "1")]
    pub flag_key: String,
    #[prost(message, optional, tag = "2")]
    pub context: Option<Struct>,
}

#[derive(Clone, PartialEq, prost::Message)]
pub struct ResolveStringResponse {
    #[prost(string, tag = "1")]
    pub value: String,
    #[prost(string, tag = "2")]
    pub reason: String,
    #[prost(string, tag = "3")]
    pub variant: String,
}

#[derive(Clone, PartialEq, prost::Message)]
pub struct ResolveFloatRequest {
    #[prost(string, tag = "1")]
    pub flag_key: String,
    #[prost(message, optional, tag = "2")]
    pub context: Option<Struct>,
}

#[derive(Clone, PartialEq, prost::Message)]
pub struct ResolveFloatResponse {
    #[prost(double, tag = "1")]
    pub value: f64,
    #[prost(string, tag = "2")]
    pub reason: String,
    #[prost(string, tag = "3")]
    pub variant: String,
}

#[derive(Clone, PartialEq, prost::Message)]
pub struct ResolveIntRequest {
    #[prost(string, tag = "1")]
    pub flag_key: String,
    #[prost(message, optional, tag = "2")]
    pub context: Option<Struct>,
}

#[derive(Clone, PartialEq, prost::Message)]
pub struct ResolveIntResponse {
    #[prost(int64, tag = "1")]
    pub value: i64,
    #[prost(string, tag = "2")]
    pub reason: String,
    #[prost(string, tag = "3")]
    pub variant: String,
}

#[derive(Clone, PartialEq, prost::Message)]
pub struct ResolveObjectRequest {
    #[prost(string, tag = "1")]
    pub flag_key: String,
    #[prost(message, optional, tag = "2")]
    pub context: Option<Struct>,
}

#[derive(Clone, PartialEq, prost::Message)]
pub struct ResolveObjectResponse {
    #[prost(message, optional, tag = "1")]
    pub value: Option<Struct>,
    #[prost(string, tag = "2")]
    pub reason: String,
    #[prost(string, tag = "3")]
    pub variant: String,
}

/// Value type requested from the service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueKind {
    Boolean,
    String,
    Float,
    Int,
    Object,
}

impl ValueKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Boolean => "boolean",
            Self::String => "string",
            Self::Float => "float",
            Self::Int => "int",
            Self::Object => "object",
        }
    }
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One resolution RPC: its request and response messages and the value
/// type it yields.
pub trait ResolveKind: Send + Sync + 'static {
    /// Value kind served by this RPC.
    const KIND: ValueKind;
    /// Method name within [`SERVICE_NAME`].
    const METHOD: &'static str;
    /// Request path, `/<service>/<method>`.
    const PATH: &'static str;

    type Request: prost::Message + Send + Sync + 'static;
    type Response: prost::Message + Default + Send + Sync + 'static;
    type Value: Send;

    /// Build the request message.
    fn request(flag_key: String, context: Struct) -> Self::Request;

    /// Response returned alongside a failure.
    fn error_response() -> Self::Response;

    /// Convert a successful response into an outcome.
    fn into_outcome(response: Self::Response) -> Outcome<Self::Value>;
}

/// `ResolveBoolean` RPC.
#[derive(Debug, Clone, Copy)]
pub struct BooleanFlag;

impl ResolveKind for BooleanFlag {
    const KIND: ValueKind = ValueKind::Boolean;
    const METHOD: &'static str = "ResolveBoolean";
    const PATH: &'static str = "/schema.v1.Service/ResolveBoolean";

    type Request = ResolveBooleanRequest;
    type Response = ResolveBooleanResponse;
    type Value = bool;

    fn request(flag_key: String, context: Struct) -> Self::Request {
        ResolveBooleanRequest {
            flag_key,
            context: Some(context),
        }
    }

    fn error_response() -> Self::Response {
        ResolveBooleanResponse {
            reason: ERROR_REASON.to_string(),
            ..Default::default()
        }
    }

    fn into_outcome(response: Self::Response) -> Outcome<bool> {
        Outcome::from_wire(response.variant, &response.reason, response.value)
    }
}

/// `ResolveString` RPC.
#[derive(Debug, Clone, Copy)]
pub struct StringFlag;

impl ResolveKind for StringFlag {
    const KIND: ValueKind = ValueKind::String;
    const METHOD: &'static str = "ResolveString";
    const PATH: &'static str = "/schema.v1.Service/ResolveString";

    type Request = ResolveStringRequest;
    type Response = ResolveStringResponse;
    type Value = String;

    fn request(flag_key: String, context: Struct) -> Self::Request {
        ResolveStringRequest {
            flag_key,
            context: Some(context),
        }
    }

    fn error_response() -> Self::Response {
        ResolveStringResponse {
            reason: ERROR_REASON.to_string(),
            ..Default::default()
        }
    }

    fn into_outcome(response: Self::Response) -> Outcome<String> {
        Outcome::from_wire(response.variant, &response.reason, response.value)
    }
}

/// `ResolveFloat` RPC.
#[derive(Debug, Clone, Copy)]
pub struct FloatFlag;

impl ResolveKind for FloatFlag {
    const KIND: ValueKind = ValueKind::Float;
    const METHOD: &'static str = "ResolveFloat";
    const PATH: &'static str = "/schema.v1.Service/ResolveFloat";

    type Request = ResolveFloatRequest;
    type Response = ResolveFloatResponse;
    type Value = f64;

    fn request(flag_key: String, context: Struct) -> Self::Request {
        ResolveFloatRequest {
            flag_key,
            context: Some(context),
        }
    }

    fn error_response() -> Self::Response {
        ResolveFloatResponse {
            reason: ERROR_REASON.to_string(),
            ..Default::default()
        }
    }

    fn into_outcome(response: Self::Response) -> Outcome<f64> {
        Outcome::from_wire(response.variant, &response.reason, response.value)
    }
}

/// `ResolveInt` RPC.
#[derive(Debug, Clone, Copy)]
pub struct IntFlag;

impl ResolveKind for IntFlag {
    const KIND: ValueKind = ValueKind::Int;
    const METHOD: &'static str = "ResolveInt";
    const PATH: &'static str = "/schema.v1.Service/ResolveInt";

    type Request = ResolveIntRequest;
    type Response = ResolveIntResponse;
    type Value = i64;

    fn request(flag_key: String, context: Struct) -> Self::Request {
        ResolveIntRequest {
            flag_key,
            context: Some(context),
        }
    }

    fn error_response() -> Self::Response {
        ResolveIntResponse {
            reason: ERROR_REASON.to_string(),
            ..Default::default()
        }
    }

    fn into_outcome(response: Self::Response) -> Outcome<i64> {
        Outcome::from_wire(response.variant, &response.reason, response.value)
    }
}

/// `ResolveObject` RPC.
#[derive(Debug, Clone, Copy)]
pub struct ObjectFlag;

impl ResolveKind for ObjectFlag {
    const KIND: ValueKind = ValueKind::Object;
    const METHOD: &'static str = "ResolveObject";
    const PATH: &'static str = "/schema.v1.Service/ResolveObject";

    type Request = ResolveObjectRequest;
    type Response = ResolveObjectResponse;
    type Value = serde_json::Value;

    fn request(flag_key: String, context: Struct) -> Self::Request {
        ResolveObjectRequest {
            flag_key,
            context: Some(context),
        }
    }

    fn error_response() -> Self::Response {
        ResolveObjectResponse {
            reason: ERROR_REASON.to_string(),
            ..Default::default()
        }
    }

    fn into_outcome(response: Self::Response) -> Outcome<serde_json::Value> {
        let value = struct_to_json(response.value.unwrap_or_default());
        Outcome::from_wire(response.variant, &response.reason, value)
    }
}
