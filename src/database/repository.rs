use async_trait::async_trait;
use sqlx::{PgPool, Postgres};
use std::collections::BTreeSet;

use crate::database::manager::DatabaseError;
use crate::database::models::{collect_genres, Movie, MovieFields};
use crate::database::query_builder::bind_params;
use crate::filter::{Filter, FilterData, MovieOrder, PageRequest, PageResult, MOVIE_COLUMNS};

/// Catalog operations the HTTP layer depends on.
#[async_trait]
pub trait CatalogStore: Send + Sync {
    /// Active movies only, newest first.
    async fn list_public(
        &self,
        page: PageRequest,
        search: Option<String>,
        genre: Option<String>,
    ) -> Result<PageResult<Movie>, DatabaseError>;

    /// Every movie unless `active` narrows it, highest id first.
    async fn list_admin(
        &self,
        page: PageRequest,
        search: Option<String>,
        genre: Option<String>,
        active: Option<bool>,
    ) -> Result<PageResult<Movie>, DatabaseError>;

    /// One active movie picked at random among those whose genres contain `genre`.
    async fn recommend(&self, genre: &str) -> Result<Movie, DatabaseError>;

    async fn create(&self, fields: MovieFields) -> Result<Movie, DatabaseError>;

    /// Overwrites every mutable field; `active` in the result is re-read.
    async fn update(&self, id: i64, fields: MovieFields) -> Result<Movie, DatabaseError>;

    /// Soft delete. Succeeds again on an already inactive row.
    async fn deactivate(&self, id: i64) -> Result<(), DatabaseError>;

    async fn list_genres(&self) -> Result<BTreeSet<String>, DatabaseError>;

    async fn health_check(&self) -> Result<(), DatabaseError>;
}

pub(crate) fn movie_not_found(id: i64) -> DatabaseError {
    DatabaseError::NotFound(format!("Movie {} not found", id))
}

pub(crate) fn no_movies_for_genre(genre: &str) -> DatabaseError {
    DatabaseError::NotFound(format!("No active movies found for genre '{}'", genre))
}

pub(crate) fn no_genres() -> DatabaseError {
    DatabaseError::NotFound("No genres defined on active movies".to_string())
}

/// Postgres-backed catalog.
#[derive(Debug, Clone)]
pub struct PgCatalogRepository {
    pool: PgPool,
}

impl PgCatalogRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn fetch_page(
        &self,
        data: FilterData,
        order: MovieOrder,
        page: PageRequest,
    ) -> Result<PageResult<Movie>, DatabaseError> {
        let filter = Filter::new(&data, order);
        let page_sql = filter.to_page_sql(&page);
        let count_sql = filter.to_count_sql();

        let mut conn = self.pool.acquire().await?;

        let items = bind_params!(sqlx::query_as::<Postgres, Movie>(&page_sql.query), page_sql.params)
            .fetch_all(&mut *conn)
            .await?;

        let total_items: i64 =
            bind_params!(sqlx::query_scalar::<Postgres, i64>(&count_sql.query), count_sql.params)
                .fetch_one(&mut *conn)
                .await?;

        Ok(page.into_result(items, total_items))
    }
}

#[async_trait]
impl CatalogStore for PgCatalogRepository {
    async fn list_public(
        &self,
        page: PageRequest,
        search: Option<String>,
        genre: Option<String>,
    ) -> Result<PageResult<Movie>, DatabaseError> {
        self.fetch_page(FilterData::public(search, genre), MovieOrder::YearDesc, page)
            .await
    }

    async fn list_admin(
        &self,
        page: PageRequest,
        search: Option<String>,
        genre: Option<String>,
        active: Option<bool>,
    ) -> Result<PageResult<Movie>, DatabaseError> {
        self.fetch_page(FilterData::admin(search, genre, active), MovieOrder::IdDesc, page)
            .await
    }

    async fn recommend(&self, genre: &str) -> Result<Movie, DatabaseError> {
        let filter = Filter::new(&FilterData::recommend(genre), MovieOrder::Random);
        let sql = filter.to_first_sql();

        let mut conn = self.pool.acquire().await?;
        bind_params!(sqlx::query_as::<Postgres, Movie>(&sql.query), sql.params)
            .fetch_optional(&mut *conn)
            .await?
            .ok_or_else(|| no_movies_for_genre(genre))
    }

    async fn create(&self, fields: MovieFields) -> Result<Movie, DatabaseError> {
        let query = format!(
            "INSERT INTO \"movies\" (\"title\", \"genres\", \"director\", \"cast\", \"year\", \"active\") \
             VALUES ($1, $2, $3, $4, $5, TRUE) RETURNING {}",
            MOVIE_COLUMNS
        );

        let mut conn = self.pool.acquire().await?;
        let movie = sqlx::query_as::<Postgres, Movie>(&query)
            .bind(&fields.title)
            .bind(&fields.genres)
            .bind(&fields.director)
            .bind(&fields.cast)
            .bind(fields.year)
            .fetch_one(&mut *conn)
            .await?;

        tracing::info!(movie_id = movie.id, "Created movie");
        Ok(movie)
    }

    async fn update(&self, id: i64, fields: MovieFields) -> Result<Movie, DatabaseError> {
        let mut conn = self.pool.acquire().await?;

        let affected = sqlx::query(
            "UPDATE \"movies\" SET \"title\" = $1, \"genres\" = $2, \"director\" = $3, \
             \"cast\" = $4, \"year\" = $5 WHERE \"id\" = $6",
        )
        .bind(&fields.title)
        .bind(&fields.genres)
        .bind(&fields.director)
        .bind(&fields.cast)
        .bind(fields.year)
        .bind(id)
        .execute(&mut *conn)
        .await?
        .rows_affected();

        if affected == 0 {
            return Err(movie_not_found(id));
        }

        // Separate statement, no transaction: a concurrent deactivate can land
        // between the update and this read.
        let active: bool =
            sqlx::query_scalar("SELECT \"active\" FROM \"movies\" WHERE \"id\" = $1")
                .bind(id)
                .fetch_optional(&mut *conn)
                .await?
                .ok_or_else(|| movie_not_found(id))?;

        tracing::info!(movie_id = id, "Updated movie");
        Ok(Movie::from_fields(id, fields, active))
    }

    async fn deactivate(&self, id: i64) -> Result<(), DatabaseError> {
        let mut conn = self.pool.acquire().await?;

        let affected = sqlx::query("UPDATE \"movies\" SET \"active\" = FALSE WHERE \"id\" = $1")
            .bind(id)
            .execute(&mut *conn)
            .await?
            .rows_affected();

        if affected == 0 {
            return Err(movie_not_found(id));
        }

        tracing::info!(movie_id = id, "Deactivated movie");
        Ok(())
    }

    async fn list_genres(&self) -> Result<BTreeSet<String>, DatabaseError> {
        let mut conn = self.pool.acquire().await?;
        let rows: Vec<String> =
            sqlx::query_scalar("SELECT \"genres\" FROM \"movies\" WHERE \"active\" = TRUE")
                .fetch_all(&mut *conn)
                .await?;

        let genres = collect_genres(rows.iter().map(String::as_str));
        if genres.is_empty() {
            return Err(no_genres());
        }
        Ok(genres)
    }

    async fn health_check(&self) -> Result<(), DatabaseError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}
