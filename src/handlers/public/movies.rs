use axum::{
    extract::{rejection::QueryRejection, Query, State},
    Json,
};
use serde::Deserialize;

use crate::database::Movie;
use crate::error::ApiResult;
use crate::filter::{PageRequest, PageResult};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct PublicListQuery {
    pub page: Option<i64>,
    pub per_page: Option<i64>,
    /// Matched against title or director.
    pub search: Option<String>,
    #[serde(alias = "genero")]
    pub genre: Option<String>,
}

/// GET /movies - paginated listing of active movies, newest first
pub async fn movies_get(
    State(state): State<AppState>,
    query: Result<Query<PublicListQuery>, QueryRejection>,
) -> ApiResult<Json<PageResult<Movie>>> {
    let Query(query) = query?;
    let page = PageRequest::new(query.page, query.per_page)?;

    let result = state
        .catalog
        .list_public(page, query.search, query.genre)
        .await?;
    Ok(Json(result))
}
