use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use std::collections::BTreeSet;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Movie {
    pub id: i64,
    pub title: String,
    /// Comma-and-space separated genre tags, e.g. `"Action, Drama"`.
    pub genres: String,
    pub director: Option<String>,
    pub cast: Option<String>,
    pub year: Option<i32>,
    pub active: bool,
}

/// Client-writable movie fields. Any `id` or `active` in the body is ignored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MovieFields {
    pub title: String,
    pub genres: String,
    #[serde(default)]
    pub director: Option<String>,
    #[serde(default)]
    pub cast: Option<String>,
    #[serde(default)]
    pub year: Option<i32>,
}

impl Movie {
    pub fn from_fields(id: i64, fields: MovieFields, active: bool) -> Self {
        Self {
            id,
            title: fields.title,
            genres: fields.genres,
            director: fields.director,
            cast: fields.cast,
            year: fields.year,
            active,
        }
    }
}

pub fn split_genres(genres: &str) -> impl Iterator<Item = &str> {
    genres.split(", ").map(str::trim).filter(|g| !g.is_empty())
}

/// Sorted, de-duplicated genre tags across the given genre strings.
pub fn collect_genres<'a>(genre_strings: impl IntoIterator<Item = &'a str>) -> BTreeSet<String> {
    genre_strings
        .into_iter()
        .flat_map(split_genres)
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn collects_sorted_unique_genres() {
        let genres = collect_genres(["Action, Drama", "Drama, Comedy"]);
        assert_eq!(genres.into_iter().collect::<Vec<_>>(), vec!["Action", "Comedy", "Drama"]);
    }

    #[test]
    fn trims_and_drops_empty_tags() {
        let genres = collect_genres(["  Sci-Fi , ", "", ", , Thriller"]);
        assert_eq!(genres.into_iter().collect::<Vec<_>>(), vec!["Sci-Fi", "Thriller"]);
    }

    #[test]
    fn only_comma_space_separates() {
        // "Action,Drama" has no space after the comma, so it stays one tag.
        let genres = collect_genres(["Action,Drama"]);
        assert_eq!(genres.into_iter().collect::<Vec<_>>(), vec!["Action,Drama"]);
    }

    #[test]
    fn fields_ignore_client_supplied_id_and_active() {
        let fields: MovieFields = serde_json::from_value(serde_json::json!({
            "id": 999,
            "active": false,
            "title": "Heat",
            "genres": "Crime, Drama"
        }))
        .unwrap();
        let movie = Movie::from_fields(7, fields, true);
        assert_eq!(movie.id, 7);
        assert!(movie.active);
        assert_eq!(movie.director, None);
        assert_eq!(split_genres(&movie.genres).collect::<Vec<_>>(), vec!["Crime", "Drama"]);
    }
}
