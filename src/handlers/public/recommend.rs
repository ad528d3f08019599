use axum::{
    extract::{rejection::QueryRejection, Query, State},
    Json,
};
use serde::Deserialize;

use crate::database::Movie;
use crate::error::ApiResult;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct RecommendQuery {
    #[serde(alias = "genero")]
    pub genre: String,
}

/// GET /recommend?genre=... - one random active movie of the given genre
pub async fn recommend_get(
    State(state): State<AppState>,
    query: Result<Query<RecommendQuery>, QueryRejection>,
) -> ApiResult<Json<Movie>> {
    let Query(query) = query?;
    let movie = state.catalog.recommend(&query.genre).await?;
    Ok(Json(movie))
}
