// handlers/protected/mod.rs - Admin handlers (bearer token required)
//
// Every route in here sits behind middleware::require_admin.

pub mod movies;

pub use movies::{movie_delete, movie_put, movies_get, movies_post};
