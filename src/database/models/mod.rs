pub mod movie;

pub use movie::{collect_genres, Movie, MovieFields};
