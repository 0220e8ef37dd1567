//! Custom Axum Extractors
//!
//! Request extractors for the caller identity and validated input.

use axum::{
    async_trait,
    extract::{FromRequest, FromRequestParts, Path, Query, Request},
    http::request::Parts,
    response::{IntoResponse, Response},
    Json,
};
use serde::de::DeserializeOwned;

use crate::error::{ApiError, ErrorResponse};

// =============================================================================
// Authenticated User Extractor
// =============================================================================

/// Caller identity set by the auth middleware; `RequireAuth` rejects with 401.
pub use spendwise_auth::{AuthenticatedUser, RequireAuth};

// =============================================================================
// Validated Path Extractor
// =============================================================================

/// Path extractor whose rejection uses the API error body
pub struct ValidatedPath<T>(pub T);

#[async_trait]
impl<S, T> FromRequestParts<S> for ValidatedPath<T>
where
    S: Send + Sync,
    T: DeserializeOwned + Send,
{
    type Rejection = Response;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(value) = Path::<T>::from_request_parts(parts, state)
            .await
            .map_err(|e| error_response(ApiError::BadRequest(e.body_text())))?;

        Ok(ValidatedPath(value))
    }
}

// =============================================================================
// Validated Query Extractor
// =============================================================================

/// Query extractor with validation
pub struct ValidatedQuery<T>(pub T);

#[async_trait]
impl<S, T> FromRequestParts<S> for ValidatedQuery<T>
where
    S: Send + Sync,
    T: DeserializeOwned + validator::Validate,
{
    type Rejection = Response;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Query(value) = Query::<T>::from_request_parts(parts, state)
            .await
            .map_err(|e| error_response(ApiError::BadRequest(e.body_text())))?;

        value
            .validate()
            .map_err(|e| error_response(ApiError::ValidationError(format_validation_errors(&e))))?;

        Ok(ValidatedQuery(value))
    }
}

// =============================================================================
// Validated JSON Extractor
// =============================================================================

/// JSON extractor with validation. Malformed bodies, unknown enum values and
/// bad dates are all reported as 400.
pub struct ValidatedJson<T>(pub T);

#[async_trait]
impl<S, T> FromRequest<S> for ValidatedJson<T>
where
    S: Send + Sync,
    T: DeserializeOwned + validator::Validate,
{
    type Rejection = Response;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(|e| error_response(ApiError::BadRequest(e.body_text())))?;

        value
            .validate()
            .map_err(|e| error_response(ApiError::ValidationError(format_validation_errors(&e))))?;

        Ok(ValidatedJson(value))
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Create error response from ApiError
pub fn error_response(error: ApiError) -> Response {
    let status = error.status_code();
    (status, Json(ErrorResponse::from(&error))).into_response()
}

/// Format validation errors into a readable string
fn format_validation_errors(errors: &validator::ValidationErrors) -> String {
    let mut messages: Vec<String> = errors
        .field_errors()
        .iter()
        .flat_map(|(field, errs)| {
            errs.iter().map(move |e| match &e.message {
                Some(message) => message.to_string(),
                None => format!("{}: validation failed", field),
            })
        })
        .collect();
    messages.sort();
    messages.join(", ")
}
