//! REST API layer for HTTP request/response handling.
//!
//! This layer translates HTTP requests into domain operations and formats
//! responses according to API contracts.
//!
//! # Modules
//!
//! - [`dto`] - Data Transfer Objects for request/response serialization
//! - [`handlers`] - HTTP request handlers
//! - [`middleware`] - Authentication and request processing middleware
//! - [`routes`] - Route configuration and composition

pub mod dto;
pub mod handlers;
pub mod middleware;
pub mod routes;

/// Tower layers used only by handler tests.
#[cfg(test)]
pub(crate) mod test_layers {
    use axum::extract::ConnectInfo;
    use std::net::SocketAddr;

    /// Injects a fixed peer address so handlers taking
    /// [`ConnectInfo<SocketAddr>`] work without a real socket.
    #[derive(Clone)]
    pub struct MockConnectInfoLayer;

    impl<S> tower::Layer<S> for MockConnectInfoLayer {
        type Service = MockConnectInfoService<S>;

        fn layer(&self, inner: S) -> Self::Service {
            MockConnectInfoService { inner }
        }
    }

    #[derive(Clone)]
    pub struct MockConnectInfoService<S> {
        inner: S,
    }

    impl<S, B> tower::Service<axum::http::Request<B>> for MockConnectInfoService<S>
    where
        S: tower::Service<axum::http::Request<B>> + Clone + Send + 'static,
        S::Future: Send + 'static,
        B: Send + 'static,
    {
        type Response = S::Response;
        type Error = S::Error;
        type Future = S::Future;

        fn poll_ready(
            &mut self,
            cx: &mut std::task::Context<'_>,
        ) -> std::task::Poll<Result<(), Self::Error>> {
            self.inner.poll_ready(cx)
        }

        fn call(&mut self, mut req: axum::http::Request<B>) -> Self::Future {
            let addr: SocketAddr = "127.0.0.1:12345".parse().unwrap();
            req.extensions_mut().insert(ConnectInfo(addr));
            self.inner.call(req)
        }
    }
}
