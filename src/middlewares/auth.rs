use actix_web::{
    Error, HttpMessage,
    dev::{Service, ServiceRequest, ServiceResponse, Transform, forward_ready},
    http::header::{AUTHORIZATION, HeaderMap},
};
use futures_util::future::LocalBoxFuture;
use std::future::{Ready, ready};

/// Credential taken from the `Authorization` header, empty when none was sent.
/// Verification happens in the operations that need an identity.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BearerToken(pub String);

impl BearerToken {
    /// Accepts both `Bearer <token>` and a bare token.
    pub fn from_headers(headers: &HeaderMap) -> Self {
        let raw = headers
            .get(AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .unwrap_or_default()
            .trim();

        let token = raw.strip_prefix("Bearer ").unwrap_or(raw).trim();
        Self(token.to_string())
    }
}

/// Threads the caller's credential into the request extensions.
pub struct BearerTokenMiddleware;

impl<S, B> Transform<S, ServiceRequest> for BearerTokenMiddleware
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type InitError = ();
    type Transform = BearerTokenMiddlewareService<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(BearerTokenMiddlewareService { service }))
    }
}

pub struct BearerTokenMiddlewareService<S> {
    service: S,
}

impl<S, B> Service<ServiceRequest> for BearerTokenMiddlewareService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let token = BearerToken::from_headers(req.headers());
        req.extensions_mut().insert(token);

        let fut = self.service.call(req);
        Box::pin(fut)
    }
}
