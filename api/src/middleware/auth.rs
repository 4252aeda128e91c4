//! Guard middleware for protected endpoints.
//!
//! Converts the incoming request into an [`AuthRequest`], runs the configured
//! [`GuardChain`] and injects the resulting [`AuthContext`] into request
//! extensions. Handlers read it back with the `AuthContext` extractor.

use actix_web::{
    body::EitherBody,
    dev::{Service, ServiceRequest, ServiceResponse, Transform},
    Error, FromRequest, HttpMessage, HttpRequest, ResponseError,
};
use futures_util::future::LocalBoxFuture;
use std::{
    future::{ready, Ready},
    rc::Rc,
    sync::Arc,
    task::{Context, Poll},
};

use gk_core::domain::value_objects::{AuthScheme, Principal};
use gk_core::services::{AuthRequest, GuardChain, GuardDecision};

use crate::handlers::ApiError;

/// Authenticated caller injected into request extensions
#[derive(Debug, Clone)]
pub struct AuthContext {
    pub subject: String,
    pub roles: Vec<String>,
    pub scheme: AuthScheme,
    /// Present for token-based schemes; used to revoke the exact token on logout
    pub jti: Option<String>,
}

impl From<Principal> for AuthContext {
    fn from(principal: Principal) -> Self {
        Self {
            subject: principal.subject,
            roles: principal.roles,
            scheme: principal.scheme,
            jti: principal.jti,
        }
    }
}

/// Guard middleware factory
pub struct GuardAuth {
    chain: Arc<GuardChain>,
}

impl GuardAuth {
    pub fn new(chain: Arc<GuardChain>) -> Self {
        Self { chain }
    }
}

impl<S, B> Transform<S, ServiceRequest> for GuardAuth
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type InitError = ();
    type Transform = GuardAuthMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(GuardAuthMiddleware {
            service: Rc::new(service),
            chain: self.chain.clone(),
        }))
    }
}

pub struct GuardAuthMiddleware<S> {
    service: Rc<S>,
    chain: Arc<GuardChain>,
}

impl<S, B> Service<ServiceRequest> for GuardAuthMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    fn poll_ready(&self, ctx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.service.poll_ready(ctx)
    }

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let service = Rc::clone(&self.service);
        let chain = Arc::clone(&self.chain);

        Box::pin(async move {
            let auth_request = to_auth_request(&req);

            match chain.authorize(&auth_request).await {
                Ok(GuardDecision::Public) => {}
                Ok(GuardDecision::Authenticated(principal)) => {
                    req.extensions_mut().insert(AuthContext::from(principal));
                }
                // the chain already logged why each strategy rejected
                Err(_) => {
                    let response = ApiError::Unauthorized.error_response();
                    return Ok(req.into_response(response).map_into_right_body());
                }
            }

            service.call(req).await.map(ServiceResponse::map_into_left_body)
        })
    }
}

/// Copies path, headers and cookies into the guard's transport-neutral view
pub(crate) fn to_auth_request(req: &ServiceRequest) -> AuthRequest {
    let mut auth_request = AuthRequest::new(req.path());

    for (name, value) in req.headers() {
        if let Ok(value) = value.to_str() {
            auth_request = auth_request.with_header(name.as_str(), value);
        }
    }

    if let Ok(cookies) = req.cookies() {
        for cookie in cookies.iter() {
            auth_request = auth_request.with_cookie(cookie.name(), cookie.value());
        }
    }

    auth_request
}

/// Extractor for required authentication
impl FromRequest for AuthContext {
    type Error = Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut actix_web::dev::Payload) -> Self::Future {
        let result = req
            .extensions()
            .get::<AuthContext>()
            .cloned()
            .ok_or_else(|| ApiError::Unauthorized.into());

        ready(result)
    }
}
