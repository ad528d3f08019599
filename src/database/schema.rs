use sqlx::PgPool;
use tracing::info;

use super::manager::DatabaseError;

/// Idempotent DDL for the catalog table.
pub const SCHEMA_STATEMENTS: &[&str] = &[
    r#"CREATE TABLE IF NOT EXISTS "movies" (
        "id" BIGSERIAL PRIMARY KEY,
        "title" TEXT NOT NULL,
        "genres" TEXT NOT NULL DEFAULT '',
        "director" TEXT,
        "cast" TEXT,
        "year" INTEGER,
        "active" BOOLEAN NOT NULL DEFAULT TRUE
    )"#,
    r#"CREATE INDEX IF NOT EXISTS "idx_movies_active_year" ON "movies" ("active", "year" DESC)"#,
];

pub async fn ensure_schema(pool: &PgPool) -> Result<(), DatabaseError> {
    let mut conn = pool.acquire().await?;
    for statement in SCHEMA_STATEMENTS {
        sqlx::query(statement).execute(&mut *conn).await?;
    }
    info!("Catalog schema is in place");
    Ok(())
}
