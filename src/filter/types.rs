/// A value bound out-of-band from the query text.
#[derive(Debug, Clone, PartialEq)]
pub enum SqlParam {
    Text(String),
    Bool(bool),
    Int(i64),
}

/// Which rows the `active` column lets through.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ActiveFilter {
    /// Active rows only; not something a caller can widen.
    Forced,
    /// Rows whose `active` column equals the given value.
    Equals(bool),
    /// No constraint on `active`.
    #[default]
    All,
}

impl ActiveFilter {
    pub fn from_option(active: Option<bool>) -> Self {
        match active {
            Some(value) => ActiveFilter::Equals(value),
            None => ActiveFilter::All,
        }
    }
}

/// Optional listing criteria as received from a caller.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FilterData {
    /// Substring matched against title OR director.
    pub search: Option<String>,
    /// Substring matched against the raw genres string.
    pub genre: Option<String>,
    pub active: ActiveFilter,
}

impl FilterData {
    /// Public listing: always restricted to active movies.
    pub fn public(search: Option<String>, genre: Option<String>) -> Self {
        Self {
            search: non_empty(search),
            genre: non_empty(genre),
            active: ActiveFilter::Forced,
        }
    }

    /// Admin listing: `active` is optional and unset means every row.
    pub fn admin(search: Option<String>, genre: Option<String>, active: Option<bool>) -> Self {
        Self {
            search: non_empty(search),
            genre: non_empty(genre),
            active: ActiveFilter::from_option(active),
        }
    }

    /// Recommendation pool: active movies matching a genre. An empty genre
    /// still produces a fragment and matches every active movie.
    pub fn recommend(genre: impl Into<String>) -> Self {
        Self {
            search: None,
            genre: Some(genre.into()),
            active: ActiveFilter::Forced,
        }
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|s| !s.is_empty())
}

/// One typed WHERE fragment. Parameters are referenced by their 1-based
/// position in the bound parameter list; values never appear in the text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Predicate {
    Always,
    ActiveOnly,
    ActiveEquals { param: usize },
    Search { param: usize },
    GenreContains { param: usize },
}

impl Predicate {
    pub fn to_sql(&self) -> String {
        match self {
            Predicate::Always => "1=1".to_string(),
            Predicate::ActiveOnly => "\"active\" = TRUE".to_string(),
            Predicate::ActiveEquals { param } => format!("\"active\" = ${}", param),
            Predicate::Search { param } => {
                format!("(\"title\" LIKE ${0} OR \"director\" LIKE ${0})", param)
            }
            Predicate::GenreContains { param } => format!("\"genres\" LIKE ${}", param),
        }
    }
}

/// Named bind values in positional order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BoundParams {
    entries: Vec<(&'static str, SqlParam)>,
}

impl BoundParams {
    /// Appends a value and returns its 1-based placeholder index.
    pub fn push(&mut self, name: &'static str, value: SqlParam) -> usize {
        self.entries.push((name, value));
        self.entries.len()
    }

    #[cfg(test)]
    pub fn get(&self, name: &str) -> Option<&SqlParam> {
        self.entries.iter().find(|(n, _)| *n == name).map(|(_, v)| v)
    }

    #[cfg(test)]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn values(&self) -> impl Iterator<Item = &SqlParam> {
        self.entries.iter().map(|(_, v)| v)
    }
}

#[derive(Debug, Clone)]
pub struct SqlResult {
    pub query: String,
    pub params: Vec<SqlParam>,
}
