//! Client capability consumed by the flag service.

use async_trait::async_trait;
use parking_lot::RwLock;
use std::sync::Arc;
use tonic::codec::ProstCodec;
use tonic::codegen::http::uri::PathAndQuery;
use tonic::transport::Channel;
use tonic::{GrpcMethod, Request, Response, Status};
use tracing::debug;

use crate::schema::{ResolveKind, SERVICE_NAME};

/// Sends resolution requests to the flag evaluation service.
#[async_trait]
pub trait ServiceClient: Send + Sync {
    /// Issue the unary RPC for `K`.
    async fn unary<K: ResolveKind>(
        &self,
        request: Request<K::Request>,
    ) -> Result<Response<K::Response>, Status>;
}

/// Hands out the current client, if one is connected.
pub trait ClientSource: Send + Sync {
    type Client: ServiceClient;

    /// Get the connected client, or `None` when no connection exists.
    fn instance(&self) -> Option<Self::Client>;
}

/// gRPC client over an already established channel.
#[derive(Clone)]
pub struct GrpcServiceClient {
    inner: tonic::client::Grpc<Channel>,
}

impl GrpcServiceClient {
    /// Wrap a channel.
    pub fn new(channel: Channel) -> Self {
        Self {
            inner: tonic::client::Grpc::new(channel),
        }
    }
}

#[async_trait]
impl ServiceClient for GrpcServiceClient {
    async fn unary<K: ResolveKind>(
        &self,
        mut request: Request<K::Request>,
    ) -> Result<Response<K::Response>, Status> {
        let mut grpc = self.inner.clone();
        grpc.ready()
            .await
            .map_err(|e| Status::unavailable(format!("Service was not ready: {}", e)))?;

        debug!(method = K::METHOD, "Sending gRPC request");

        request
            .extensions_mut()
            .insert(GrpcMethod::new(SERVICE_NAME, K::METHOD));

        let codec = ProstCodec::<K::Request, K::Response>::default();
        grpc.unary(request, PathAndQuery::from_static(K::PATH), codec)
            .await
    }
}

/// Client slot shared with whatever owns the connection.
///
/// The owner sets the client once connected and clears it on disconnect;
/// resolvers read it fresh on every call.
pub struct SharedClient<C> {
    slot: Arc<RwLock<Option<C>>>,
}

impl<C> SharedClient<C> {
    /// Create an empty slot.
    pub fn new() -> Self {
        Self {
            slot: Arc::new(RwLock::new(None)),
        }
    }

    /// Create a slot holding `client`.
    pub fn connected(client: C) -> Self {
        Self {
            slot: Arc::new(RwLock::new(Some(client))),
        }
    }

    /// Install a connected client.
    pub fn set(&self, client: C) {
        *self.slot.write() = Some(client);
    }

    /// Remove the client, returning it.
    pub fn clear(&self) -> Option<C> {
        self.slot.write().take()
    }

    /// Whether a client is installed.
    pub fn is_connected(&self) -> bool {
        self.slot.read().is_some()
    }
}

impl<C> Clone for SharedClient<C> {
    fn clone(&self) -> Self {
        Self {
            slot: Arc::clone(&self.slot),
        }
    }
}

impl<C> Default for SharedClient<C> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C> ClientSource for SharedClient<C>
where
    C: ServiceClient + Clone,
{
    type Client = C;

    fn instance(&self) -> Option<C> {
        self.slot.read().clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, PartialEq)]
    struct NamedClient(&'static str);

    #[async_trait]
    impl ServiceClient for NamedClient {
        async fn unary<K: ResolveKind>(
            &self,
            _request: Request<K::Request>,
        ) -> Result<Response<K::Response>, Status> {
            Err(Status::unimplemented(self.0))
        }
    }

    #[test]
    fn test_shared_client_starts_empty() {
        let shared = SharedClient::<NamedClient>::new();
        assert!(!shared.is_connected());
        assert!(shared.instance().is_none());
    }

    #[test]
    fn test_shared_client_set_and_clear() {
        let shared = SharedClient::new();
        let observer = shared.clone();

        shared.set(NamedClient("a"));
        assert_eq!(observer.instance(), Some(NamedClient("a")));

        shared.set(NamedClient("b"));
        assert_eq!(observer.instance(), Some(NamedClient("b")));

        assert_eq!(shared.clear(), Some(NamedClient("b")));
        assert!(observer.instance().is_none());
    }

    #[test]
    fn test_connected() {
        let shared = SharedClient::connected(NamedClient("a"));
        assert!(shared.is_connected());
    }

    #[tokio::test]
    async fn test_lazy_channel_client_builds() {
        let channel = tonic::transport::Endpoint::from_static("http://127.0.0.1:1").connect_lazy();
        let client = GrpcServiceClient::new(channel);
        let shared = SharedClient::connected(client);
        assert!(shared.instance().is_some());
    }
}
