use super::types::{ActiveFilter, BoundParams, FilterData, Predicate, SqlParam};

/// Accumulates ANDed predicate fragments and the parameters they bind.
#[derive(Debug, Clone, Default)]
pub struct FilterWhere {
    predicates: Vec<Predicate>,
    params: BoundParams,
}

impl FilterWhere {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn generate(data: &FilterData) -> Self {
        let mut filter_where = Self::new();
        filter_where.build(data);
        filter_where
    }

    fn build(&mut self, data: &FilterData) {
        match data.active {
            ActiveFilter::Forced => self.predicates.push(Predicate::ActiveOnly),
            ActiveFilter::Equals(_) | ActiveFilter::All => self.predicates.push(Predicate::Always),
        }

        if let Some(search) = &data.search {
            let param = self.params.push("search", SqlParam::Text(contains_pattern(search)));
            self.predicates.push(Predicate::Search { param });
        }

        if let Some(genre) = &data.genre {
            let param = self.params.push("genre", SqlParam::Text(contains_pattern(genre)));
            self.predicates.push(Predicate::GenreContains { param });
        }

        if let ActiveFilter::Equals(active) = data.active {
            let param = self.params.push("active", SqlParam::Bool(active));
            self.predicates.push(Predicate::ActiveEquals { param });
        }
    }

    #[cfg(test)]
    pub fn predicates(&self) -> &[Predicate] {
        &self.predicates
    }

    pub fn params(&self) -> &BoundParams {
        &self.params
    }

    /// Renders the fragments joined with AND. Never empty.
    pub fn to_sql(&self) -> String {
        if self.predicates.is_empty() {
            return Predicate::Always.to_sql();
        }
        self.predicates
            .iter()
            .map(Predicate::to_sql)
            .collect::<Vec<_>>()
            .join(" AND ")
    }
}

// LIKE wildcards inside the value are passed through as-is.
fn contains_pattern(value: &str) -> String {
    format!("%{}%", value)
}
