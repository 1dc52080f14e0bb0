//! Remote flag resolution.

use openflag_core::{EvaluationContext, Outcome, ResolutionError};
use tokio_util::sync::CancellationToken;
use tonic::{Request, Status};
use tracing::{debug, warn};

use crate::client::{ClientSource, ServiceClient};
use crate::convert::context_to_struct;
use crate::error::{CONNECTION_ERROR, resolution_error};
use crate::schema::{BooleanFlag, FloatFlag, IntFlag, ObjectFlag, ResolveKind, StringFlag};

/// A failed resolution: the shell response plus what went wrong.
#[derive(Debug, Clone)]
pub struct Failed<T> {
    /// Default response with reason `ERROR`.
    pub response: T,
    /// Failure details.
    pub error: ResolutionError,
}

fn failed<K: ResolveKind>(error: ResolutionError) -> Failed<K::Response> {
    Failed {
        response: K::error_response(),
        error,
    }
}

/// Resolves flags through the remote flag evaluation service.
///
/// Holds no connection state of its own: readiness is asked of the
/// [`ClientSource`] on every call, and nothing is retried.
pub struct FlagService<S> {
    source: S,
}

impl<S: ClientSource> FlagService<S> {
    /// Create a service reading clients from `source`.
    pub fn new(source: S) -> Self {
        Self { source }
    }

    /// Get the client source.
    pub fn source(&self) -> &S {
        &self.source
    }

    /// Resolve `flag_key` with the RPC for `K`.
    ///
    /// On success the service response is returned unchanged. Cancelling
    /// `cancel` abandons the in-flight call.
    pub async fn resolve<K: ResolveKind>(
        &self,
        cancel: &CancellationToken,
        flag_key: &str,
        context: &EvaluationContext,
    ) -> Result<K::Response, Failed<K::Response>> {
        let Some(client) = self.source.instance() else {
            return Err(failed::<K>(ResolutionError::ProviderNotReady(
                CONNECTION_ERROR.to_string(),
            )));
        };

        let context = context_to_struct(context).map_err(|e| {
            warn!(flag_key, kind = %K::KIND, error = %e, "Failed to convert evaluation context");
            failed::<K>(ResolutionError::ParseError(e.to_string()))
        })?;

        debug!(flag_key, kind = %K::KIND, "Resolving flag");

        let request = Request::new(K::request(flag_key.to_string(), context));
        let result = tokio::select! {
            biased;
            _ = cancel.cancelled() => Err(Status::cancelled("Resolution cancelled")),
            result = client.unary::<K>(request) => result,
        };

        match result {
            Ok(response) => Ok(response.into_inner()),
            Err(status) => {
                debug!(
                    flag_key,
                    kind = %K::KIND,
                    code = ?status.code(),
                    message = status.message(),
                    "Flag resolution failed"
                );
                Err(failed::<K>(resolution_error(&status)))
            }
        }
    }

    /// Resolve `flag_key` with the RPC for `K` into an outcome.
    pub async fn evaluate<K: ResolveKind>(
        &self,
        cancel: &CancellationToken,
        flag_key: &str,
        context: &EvaluationContext,
    ) -> Outcome<K::Value> {
        match self.resolve::<K>(cancel, flag_key, context).await {
            Ok(response) => K::into_outcome(response),
            Err(failure) => Outcome::error(failure.error),
        }
    }

    pub async fn resolve_boolean(
        &self,
        cancel: &CancellationToken,
        flag_key: &str,
        context: &EvaluationContext,
    ) -> Outcome<bool> {
        self.evaluate::<BooleanFlag>(cancel, flag_key, context).await
    }

    pub async fn resolve_string(
        &self,
        cancel: &CancellationToken,
        flag_key: &str,
        context: &EvaluationContext,
    ) -> Outcome<String> {
        self.evaluate::<StringFlag>(cancel, flag_key, context).await
    }

    pub async fn resolve_float(
        &self,
        cancel: &CancellationToken,
        flag_key: &str,
        context: &EvaluationContext,
    ) -> Outcome<f64> {
        self.evaluate::<FloatFlag>(cancel, flag_key, context).await
    }

    pub async fn resolve_int(
        &self,
        cancel: &CancellationToken,
        flag_key: &str,
        context: &EvaluationContext,
    ) -> Outcome<i64> {
        self.evaluate::<IntFlag>(cancel, flag_key, context).await
    }

    pub async fn resolve_object(
        &self,
        cancel: &CancellationToken,
        flag_key: &str,
        context: &EvaluationContext,
    ) -> Outcome<serde_json::Value> {
        self.evaluate::<ObjectFlag>(cancel, flag_key, context).await
    }
}
