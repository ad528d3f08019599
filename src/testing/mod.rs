use async_trait::async_trait;
use std::cmp::Reverse;
use std::collections::BTreeSet;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;

use crate::database::models::{collect_genres, Movie, MovieFields};
use crate::database::repository::{movie_not_found, no_genres, no_movies_for_genre, CatalogStore};
use crate::database::DatabaseError;
use crate::filter::{ActiveFilter, FilterData, PageRequest, PageResult};

/// In-memory catalog with the same observable behaviour as the Postgres
/// repository, for exercising the HTTP layer without a database.
#[derive(Debug, Default)]
pub struct MemoryCatalog {
    movies: Mutex<Vec<Movie>>,
    unavailable: AtomicBool,
}

impl MemoryCatalog {
    /// Seed rows as-is, ids included.
    pub fn with_movies(movies: Vec<Movie>) -> Self {
        Self {
            movies: Mutex::new(movies),
            unavailable: AtomicBool::new(false),
        }
    }

    /// Make every later call fail as if the pool could not hand out a connection.
    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.store(unavailable, Ordering::SeqCst);
    }

    pub fn snapshot(&self) -> Vec<Movie> {
        self.movies.lock().unwrap().clone()
    }

    fn check_available(&self) -> Result<(), DatabaseError> {
        if self.unavailable.load(Ordering::SeqCst) {
            return Err(DatabaseError::Sqlx(sqlx::Error::PoolTimedOut));
        }
        Ok(())
    }

    fn matches(movie: &Movie, data: &FilterData) -> bool {
        let active_ok = match data.active {
            ActiveFilter::Forced => movie.active,
            ActiveFilter::Equals(value) => movie.active == value,
            ActiveFilter::All => true,
        };
        let search_ok = data.search.as_deref().map_or(true, |s| {
            like_contains(&movie.title, s)
                || movie.director.as_deref().is_some_and(|d| like_contains(d, s))
        });
        let genre_ok = data.genre.as_deref().map_or(true, |g| like_contains(&movie.genres, g));
        active_ok && search_ok && genre_ok
    }

    fn page_of(
        &self,
        data: &FilterData,
        page: PageRequest,
        sort: impl FnMut(&Movie, &Movie) -> std::cmp::Ordering,
    ) -> Result<PageResult<Movie>, DatabaseError> {
        self.check_available()?;
        if page.offset() < 0 {
            return Err(DatabaseError::Sqlx(sqlx::Error::Protocol(
                "OFFSET must not be negative".to_string(),
            )));
        }

        let mut rows: Vec<Movie> = self
            .movies
            .lock()
            .unwrap()
            .iter()
            .filter(|m| Self::matches(m, data))
            .cloned()
            .collect();
        rows.sort_by(sort);

        let total_items = rows.len() as i64;
        let items = rows
            .into_iter()
            .skip(usize::try_from(page.offset()).unwrap_or(usize::MAX))
            .take(usize::try_from(page.limit()).unwrap_or(usize::MAX))
            .collect();
        Ok(page.into_result(items, total_items))
    }
}

#[async_trait]
impl CatalogStore for MemoryCatalog {
    async fn list_public(
        &self,
        page: PageRequest,
        search: Option<String>,
        genre: Option<String>,
    ) -> Result<PageResult<Movie>, DatabaseError> {
        self.page_of(&FilterData::public(search, genre), page, |a, b| {
            // year DESC NULLS LAST, id DESC
            (a.year.is_none(), Reverse(a.year), Reverse(a.id))
                .cmp(&(b.year.is_none(), Reverse(b.year), Reverse(b.id)))
        })
    }

    async fn list_admin(
        &self,
        page: PageRequest,
        search: Option<String>,
        genre: Option<String>,
        active: Option<bool>,
    ) -> Result<PageResult<Movie>, DatabaseError> {
        self.page_of(&FilterData::admin(search, genre, active), page, |a, b| b.id.cmp(&a.id))
    }

    async fn recommend(&self, genre: &str) -> Result<Movie, DatabaseError> {
        self.check_available()?;
        let data = FilterData::recommend(genre);
        let candidates: Vec<Movie> = self
            .movies
            .lock()
            .unwrap()
            .iter()
            .filter(|m| Self::matches(m, &data))
            .cloned()
            .collect();
        if candidates.is_empty() {
            return Err(no_movies_for_genre(genre));
        }
        let seed = std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .map(|d| d.subsec_nanos() as usize)
            .unwrap_or(0);
        Ok(candidates[seed % candidates.len()].clone())
    }

    async fn create(&self, fields: MovieFields) -> Result<Movie, DatabaseError> {
        self.check_available()?;
        let mut movies = self.movies.lock().unwrap();
        let id = movies.iter().map(|m| m.id).max().unwrap_or(0) + 1;
        let movie = Movie::from_fields(id, fields, true);
        movies.push(movie.clone());
        Ok(movie)
    }

    async fn update(&self, id: i64, fields: MovieFields) -> Result<Movie, DatabaseError> {
        self.check_available()?;
        let mut movies = self.movies.lock().unwrap();
        let movie = movies
            .iter_mut()
            .find(|m| m.id == id)
            .ok_or_else(|| movie_not_found(id))?;
        *movie = Movie::from_fields(id, fields, movie.active);
        Ok(movie.clone())
    }

    async fn deactivate(&self, id: i64) -> Result<(), DatabaseError> {
        self.check_available()?;
        let mut movies = self.movies.lock().unwrap();
        let movie = movies
            .iter_mut()
            .find(|m| m.id == id)
            .ok_or_else(|| movie_not_found(id))?;
        movie.active = false;
        Ok(())
    }

    async fn list_genres(&self) -> Result<BTreeSet<String>, DatabaseError> {
        self.check_available()?;
        let movies = self.movies.lock().unwrap();
        let genres = collect_genres(movies.iter().filter(|m| m.active).map(|m| m.genres.as_str()));
        if genres.is_empty() {
            return Err(no_genres());
        }
        Ok(genres)
    }

    async fn health_check(&self) -> Result<(), DatabaseError> {
        self.check_available()
    }
}

enum LikeToken {
    Any,
    One,
    Literal(char),
}

/// `text LIKE '%' || needle || '%'` with Postgres semantics: `%` and `_` in
/// the needle stay wildcards and `\` escapes the next character.
fn like_contains(text: &str, needle: &str) -> bool {
    let pattern = format!("%{}%", needle);
    let mut tokens = Vec::new();
    let mut chars = pattern.chars();
    while let Some(c) = chars.next() {
        tokens.push(match c {
            '%' => LikeToken::Any,
            '_' => LikeToken::One,
            '\\' => LikeToken::Literal(chars.next().unwrap_or('\\')),
            c => LikeToken::Literal(c),
        });
    }

    let text: Vec<char> = text.chars().collect();
    // reachable[i]: the tokens so far can consume exactly text[..i]
    let mut reachable = vec![false; text.len() + 1];
    reachable[0] = true;
    for token in &tokens {
        let mut next = vec![false; text.len() + 1];
        match token {
            LikeToken::Any => {
                let mut seen = false;
                for i in 0..=text.len() {
                    seen |= reachable[i];
                    next[i] = seen;
                }
            }
            LikeToken::One => {
                for i in 0..text.len() {
                    next[i + 1] = reachable[i];
                }
            }
            LikeToken::Literal(c) => {
                for i in 0..text.len() {
                    next[i + 1] = reachable[i] && text[i] == *c;
                }
            }
        }
        reachable = next;
    }
    reachable[text.len()]
}

/// A movie row for seeding.
pub fn movie(id: i64, title: &str, genres: &str, year: Option<i32>, active: bool) -> Movie {
    Movie {
        id,
        title: title.to_string(),
        genres: genres.to_string(),
        director: None,
        cast: None,
        year,
        active,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn public_listing_orders_by_year_with_unknown_years_last() {
        let catalog = MemoryCatalog::with_movies(vec![
            movie(1, "Old", "Drama", Some(1950), true),
            movie(2, "Undated", "Drama", None, true),
            movie(3, "New", "Drama", Some(2020), true),
            movie(4, "Hidden", "Drama", Some(2024), false),
        ]);
        let page = catalog.list_public(PageRequest::default(), None, None).await.unwrap();
        let ids: Vec<_> = page.items.iter().map(|m| m.id).collect();
        assert_eq!(ids, vec![3, 1, 2]);
        assert_eq!(page.total_items, 3);
    }

    #[test]
    fn like_matching_follows_postgres() {
        assert!(like_contains("Heat", "ea"));
        assert!(like_contains("Heat", "%"));
        assert!(like_contains("Heat", "H_at"));
        assert!(like_contains("Heat", ""));
        assert!(!like_contains("Heat", "H_t"));
        assert!(!like_contains("Heat", "heat"));
        assert!(like_contains("100% Wolf", "100\\%"));
        assert!(!like_contains("100 Wolf", "100\\%"));
        assert!(like_contains("Action-Comedy", "Action"));
    }

    #[tokio::test]
    async fn wildcards_in_search_behave_like_sql() {
        let catalog = MemoryCatalog::with_movies(vec![
            movie(1, "Heat", "Crime", None, true),
            movie(2, "Alien", "Horror", None, true),
        ]);
        let all = catalog
            .list_public(PageRequest::default(), Some("%".into()), None)
            .await
            .unwrap();
        assert_eq!(all.total_items, 2);

        let one = catalog
            .list_public(PageRequest::default(), Some("H_at".into()), None)
            .await
            .unwrap();
        assert_eq!(one.items[0].id, 1);
        assert_eq!(one.total_items, 1);
    }

    #[tokio::test]
    async fn negative_offset_is_a_store_error() {
        let catalog = MemoryCatalog::with_movies(vec![movie(1, "A", "Drama", None, true)]);
        let page = PageRequest::new(Some(0), Some(10)).unwrap();
        assert!(matches!(
            catalog.list_public(page, None, None).await,
            Err(DatabaseError::Sqlx(_))
        ));
    }
}
