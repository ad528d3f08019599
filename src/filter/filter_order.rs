/// Row orderings used by the catalog queries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MovieOrder {
    /// Newest first; movies without a year sink, ties broken by id.
    YearDesc,
    IdDesc,
    Random,
}

impl MovieOrder {
    pub fn to_sql(&self) -> &'static str {
        match self {
            MovieOrder::YearDesc => "ORDER BY \"year\" DESC NULLS LAST, \"id\" DESC",
            MovieOrder::IdDesc => "ORDER BY \"id\" DESC",
            MovieOrder::Random => "ORDER BY random()",
        }
    }
}
