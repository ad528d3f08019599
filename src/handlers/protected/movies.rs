use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection, QueryRejection},
        Path, Query, State,
    },
    http::StatusCode,
    Extension, Json,
};
use serde::{Deserialize, Serialize};

use crate::database::{Movie, MovieFields};
use crate::error::ApiResult;
use crate::filter::{PageRequest, PageResult};
use crate::middleware::AuthenticatedAdmin;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct AdminListQuery {
    pub page: Option<i64>,
    pub per_page: Option<i64>,
    pub search: Option<String>,
    #[serde(alias = "genero")]
    pub genre: Option<String>,
    /// Unset lists active and inactive movies alike.
    #[serde(alias = "activa")]
    pub active: Option<bool>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

/// GET /admin/movies - paginated listing of every movie, highest id first
pub async fn movies_get(
    State(state): State<AppState>,
    query: Result<Query<AdminListQuery>, QueryRejection>,
) -> ApiResult<Json<PageResult<Movie>>> {
    let Query(query) = query?;
    let page = PageRequest::new(query.page, query.per_page)?;

    let result = state
        .catalog
        .list_admin(page, query.search, query.genre, query.active)
        .await?;
    Ok(Json(result))
}

/// POST /admin/movies - create an active movie
pub async fn movies_post(
    State(state): State<AppState>,
    Extension(admin): Extension<AuthenticatedAdmin>,
    body: Result<Json<MovieFields>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<Movie>)> {
    let Json(fields) = body?;
    let movie = state.catalog.create(fields).await?;
    tracing::info!(subject = admin.subject(), movie_id = movie.id, "Admin created movie");
    Ok((StatusCode::CREATED, Json(movie)))
}

/// PUT /admin/movies/:id - overwrite the mutable fields of a movie
pub async fn movie_put(
    State(state): State<AppState>,
    Extension(admin): Extension<AuthenticatedAdmin>,
    id: Result<Path<i64>, PathRejection>,
    body: Result<Json<MovieFields>, JsonRejection>,
) -> ApiResult<Json<Movie>> {
    let Path(id) = id?;
    let Json(fields) = body?;
    let movie = state.catalog.update(id, fields).await?;
    tracing::info!(subject = admin.subject(), movie_id = id, "Admin updated movie");
    Ok(Json(movie))
}

/// DELETE /admin/movies/:id - soft delete (active = false)
pub async fn movie_delete(
    State(state): State<AppState>,
    Extension(admin): Extension<AuthenticatedAdmin>,
    id: Result<Path<i64>, PathRejection>,
) -> ApiResult<Json<MessageResponse>> {
    let Path(id) = id?;
    state.catalog.deactivate(id).await?;
    tracing::info!(subject = admin.subject(), movie_id = id, "Admin deactivated movie");
    Ok(Json(MessageResponse {
        message: format!("Movie {} deactivated (soft delete).", id),
    }))
}
