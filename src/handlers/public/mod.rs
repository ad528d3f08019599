// handlers/public/mod.rs - Public handlers (no authentication required)
//
// Read-only catalog access plus token acquisition.

pub mod genres;    // GET /genres
pub mod movies;    // GET /movies
pub mod recommend; // GET /recommend
pub mod token;     // POST /token

pub use genres::genres_get;
pub use movies::movies_get;
pub use recommend::recommend_get;
pub use token::token_post;
