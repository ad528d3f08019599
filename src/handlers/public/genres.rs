use axum::{extract::State, Json};

use crate::error::ApiResult;
use crate::state::AppState;

/// GET /genres - sorted, de-duplicated genre tags of active movies
pub async fn genres_get(State(state): State<AppState>) -> ApiResult<Json<Vec<String>>> {
    let genres = state.catalog.list_genres().await?;
    Ok(Json(genres.into_iter().collect()))
}
