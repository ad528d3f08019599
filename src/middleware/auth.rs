use axum::{
    extract::{Request, State},
    http::HeaderMap,
    middleware::Next,
    response::Response,
};

use crate::auth::{Admin, AuthError, Principal};
use crate::error::ApiError;
use crate::state::AppState;

/// Admin identity injected into request extensions once the bearer token
/// has been validated.
#[derive(Clone, Copy, Debug)]
pub struct AuthenticatedAdmin(pub Admin);

impl AuthenticatedAdmin {
    pub fn subject(&self) -> &str {
        self.0.subject()
    }
}

/// Bearer token gate for the admin routes. Runs before any handler, so a
/// request without a valid token never reaches the store.
pub async fn require_admin(
    State(state): State<AppState>,
    headers: HeaderMap,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let token = extract_bearer_token(&headers).map_err(|reason| {
        tracing::debug!(reason, "Rejected admin request");
        ApiError::from(AuthError::InvalidToken)
    })?;

    let claims = state.tokens.validate(token)?;
    let admin = Admin::try_from(claims)?;

    request.extensions_mut().insert(AuthenticatedAdmin(admin));
    Ok(next.run(request).await)
}

/// Extract the token from an `Authorization: Bearer <token>` header
fn extract_bearer_token(headers: &HeaderMap) -> Result<&str, &'static str> {
    let auth_str = headers
        .get(axum::http::header::AUTHORIZATION)
        .ok_or("missing Authorization header")?
        .to_str()
        .map_err(|_| "Authorization header is not valid ASCII")?;

    let token = auth_str
        .strip_prefix("Bearer ")
        .or_else(|| auth_str.strip_prefix("bearer "))
        .ok_or("Authorization header must use Bearer token format")?
        .trim();

    if token.is_empty() {
        return Err("empty bearer token");
    }
    Ok(token)
}
