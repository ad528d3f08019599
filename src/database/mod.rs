pub mod manager;
pub mod query_builder;
pub mod repository;
pub mod models;
pub mod schema;

pub use manager::{DatabaseError, DatabaseManager};
pub use models::{Movie, MovieFields};
pub use repository::{CatalogStore, PgCatalogRepository};
