//! Authentication Middleware for Axum
//!
//! Resolves `Authorization: Bearer <token>` into an [`AuthenticatedUser`]
//! stored in the request extensions.

use axum::{
    async_trait,
    body::Body,
    extract::{FromRequestParts, Request},
    http::{header, request::Parts, HeaderMap, StatusCode},
    response::Response,
};
use std::sync::Arc;
use std::task::{Context, Poll};
use tower::{Layer, Service};

use crate::error::{AuthError, ErrorResponse};
use crate::jwt::JwtService;
use crate::types::AuthenticatedUser;

/// Authentication middleware layer
#[derive(Clone)]
pub struct AuthLayer {
    jwt: Arc<JwtService>,
}

impl AuthLayer {
    pub fn new(jwt: Arc<JwtService>) -> Self {
        Self { jwt }
    }
}

impl<S> Layer<S> for AuthLayer {
    type Service = AuthMiddleware<S>;

    fn layer(&self, inner: S) -> Self::Service {
        AuthMiddleware {
            inner,
            jwt: self.jwt.clone(),
        }
    }
}

/// Authentication middleware service
#[derive(Clone)]
pub struct AuthMiddleware<S> {
    inner: S,
    jwt: Arc<JwtService>,
}

impl<S> Service<Request> for AuthMiddleware<S>
where
    S: Service<Request, Response = Response> + Send + Clone + 'static,
    S::Future: Send + 'static,
{
    type Response = S::Response;
    type Error = S::Error;
    type Future = std::pin::Pin<
        Box<dyn std::future::Future<Output = Result<Self::Response, Self::Error>> + Send>,
    >;

    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, req: Request) -> Self::Future {
        let jwt = self.jwt.clone();
        let mut inner = self.inner.clone();

        Box::pin(async move {
            match authenticate_request(req.headers(), &jwt) {
                Ok(user) => {
                    let (mut parts, body) = req.into_parts();
                    parts.extensions.insert(user);
                    inner.call(Request::from_parts(parts, body)).await
                }
                // No credentials: the handler decides whether that is acceptable
                Err(AuthError::Unauthenticated) => inner.call(req).await,
                Err(e) => {
                    tracing::debug!(error = %e, "Rejected bearer token");
                    Ok(auth_error_response(e))
                }
            }
        })
    }
}

/// Authenticate a request from its bearer token
fn authenticate_request(headers: &HeaderMap, jwt: &JwtService) -> Result<AuthenticatedUser, AuthError> {
    let Some(token) = extract_bearer_token(headers)? else {
        return Err(AuthError::Unauthenticated);
    };
    let claims = jwt.validate_access_token(token)?;
    AuthenticatedUser::try_from(claims)
}

/// `Ok(None)` when no Authorization header is present
fn extract_bearer_token(headers: &HeaderMap) -> Result<Option<&str>, AuthError> {
    let Some(value) = headers.get(header::AUTHORIZATION) else {
        return Ok(None);
    };
    let value = value.to_str().map_err(|_| AuthError::InvalidToken)?;
    match value.strip_prefix("Bearer ") {
        Some(token) if !token.trim().is_empty() => Ok(Some(token.trim())),
        _ => Err(AuthError::InvalidToken),
    }
}

/// Create error response for authentication errors
pub fn auth_error_response(error: AuthError) -> Response {
    let status =
        StatusCode::from_u16(error.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    let body = ErrorResponse::from(&error);

    Response::builder()
        .status(status)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(serde_json::to_string(&body).unwrap_or_default()))
        .unwrap_or_else(|_| Response::new(Body::empty()))
}

// =============================================================================
// Axum Extractors
// =============================================================================

/// Extractor for a required authenticated user. Rejects with 401.
pub struct RequireAuth(pub AuthenticatedUser);

#[async_trait]
impl<S> FromRequestParts<S> for RequireAuth
where
    S: Send + Sync,
{
    type Rejection = Response;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<AuthenticatedUser>()
            .cloned()
            .map(RequireAuth)
            .ok_or_else(|| auth_error_response(AuthError::Unauthenticated))
    }
}
