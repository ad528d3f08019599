use axum::{
    extract::State,
    http::{HeaderValue, StatusCode},
    middleware,
    response::{IntoResponse, Json},
    routing::{get, post, put},
    Router,
};
use serde_json::{json, Value};
use tower::ServiceBuilder;
use tower_http::{
    cors::{AllowHeaders, AllowMethods, AllowOrigin, CorsLayer},
    trace::TraceLayer,
};

use crate::handlers::{protected, public};
use crate::middleware::require_admin;
use crate::state::AppState;

/// Build the full application router.
pub fn app(state: AppState) -> Router {
    let cors = cors_layer(&state.config.security.cors_origins);

    Router::new()
        .route("/", get(root))
        .route("/health", get(health))
        .merge(public_routes())
        .merge(admin_routes(state.clone()))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(cors),
        )
        .with_state(state)
}

fn public_routes() -> Router<AppState> {
    Router::new()
        .route("/genres", get(public::genres_get))
        .route("/movies", get(public::movies_get))
        .route("/recommend", get(public::recommend_get))
        .route("/token", post(public::token_post))
}

fn admin_routes(state: AppState) -> Router<AppState> {
    Router::new()
        .route(
            "/admin/movies",
            get(protected::movies_get).post(protected::movies_post),
        )
        .route(
            "/admin/movies/:id",
            put(protected::movie_put).delete(protected::movie_delete),
        )
        .route_layer(middleware::from_fn_with_state(state, require_admin))
}

/// Explicit origin allow-list with credentials; methods and headers mirror
/// the preflight request. A `*` entry is dropped: credentialed CORS cannot
/// use a wildcard origin.
fn cors_layer(origins: &[String]) -> CorsLayer {
    let origins: Vec<HeaderValue> = origins
        .iter()
        .filter(|origin| {
            if origin.as_str() == "*" {
                tracing::warn!("Ignoring wildcard CORS origin; list origins explicitly");
                return false;
            }
            true
        })
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!(origin = %origin, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods(AllowMethods::mirror_request())
        .allow_headers(AllowHeaders::mirror_request())
        .allow_credentials(true)
}

async fn root() -> Json<Value> {
    Json(json!({
        "name": "Movie Catalog API",
        "version": env!("CARGO_PKG_VERSION"),
        "endpoints": {
            "public": ["/movies", "/genres", "/recommend", "/token", "/health"],
            "admin": ["/admin/movies", "/admin/movies/:id"],
        }
    }))
}

async fn health(State(state): State<AppState>) -> impl IntoResponse {
    match state.catalog.health_check().await {
        Ok(()) => (StatusCode::OK, Json(json!({ "status": "ok" }))),
        Err(e) => {
            tracing::error!(error = %e, "Health check failed");
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(json!({ "status": "unavailable", "error": e.to_string() })),
            )
        }
    }
}
