use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::auth::Principal;
use crate::error::ApiResult;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct TokenRequest {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    pub token_type: String,
    /// Seconds until the token expires.
    pub expires_in: i64,
}

/// POST /token - exchange admin credentials for a bearer token
pub async fn token_post(
    State(state): State<AppState>,
    body: Result<Json<TokenRequest>, JsonRejection>,
) -> ApiResult<Json<TokenResponse>> {
    let Json(body) = body?;

    let admin = match state.credentials.authenticate(&body.username, &body.password).await {
        Ok(admin) => admin,
        Err(e) => {
            tracing::info!(username = %body.username, "Rejected login attempt");
            return Err(e.into());
        }
    };

    let access_token = state.tokens.issue(admin.subject())?;
    tracing::info!(subject = admin.subject(), "Issued access token");

    Ok(Json(TokenResponse {
        access_token,
        token_type: "bearer".to_string(),
        expires_in: state.tokens.ttl().num_seconds(),
    }))
}
