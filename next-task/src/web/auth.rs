//! Shared-secret authentication for API endpoints
//!
//! The secret may be passed as a `key` query parameter or as a bearer token.
//! When no secret is configured every guarded request is rejected.

use axum::{
    extract::{Request, State},
    http::header,
    middleware::Next,
    response::Response,
};

use super::api::ApiError;
use super::state::AppState;

/// Pull the caller's credential from the query string or Authorization header
///
/// An empty `key` parameter counts as absent.
fn provided_secret(request: &Request) -> Option<String> {
    let from_query = request.uri().query().and_then(|query| {
        url::form_urlencoded::parse(query.as_bytes())
            .find(|(name, value)| name == "key" && !value.is_empty())
            .map(|(_, value)| value.into_owned())
    });

    from_query.or_else(|| {
        request
            .headers()
            .get(header::AUTHORIZATION)
            .and_then(|h| h.to_str().ok())
            .and_then(|h| h.strip_prefix("Bearer "))
            .map(str::to_string)
    })
}

/// Authentication middleware
pub async fn require_secret(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let Some(expected) = state.secret() else {
        tracing::warn!(
            "NEXT_TASK_SECRET not configured, rejecting {}",
            request.uri().path()
        );
        return Err(ApiError::Unauthorized);
    };

    match provided_secret(&request) {
        Some(provided) if provided == expected => Ok(next.run(request).await),
        Some(_) => {
            tracing::warn!("Invalid secret provided for {}", request.uri().path());
            Err(ApiError::Unauthorized)
        }
        None => {
            tracing::warn!("Missing secret for {}", request.uri().path());
            Err(ApiError::Unauthorized)
        }
    }
}
