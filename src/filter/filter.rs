use super::filter_order::MovieOrder;
use super::filter_where::FilterWhere;
use super::pagination::PageRequest;
use super::types::{FilterData, SqlParam, SqlResult};

pub const MOVIES_TABLE: &str = "movies";
pub const MOVIE_COLUMNS: &str =
    "\"id\", \"title\", \"genres\", \"director\", \"cast\", \"year\", \"active\"";

/// Builds the SELECT and COUNT statements for one listing request. Both
/// statements share the same WHERE text and filter parameters.
pub struct Filter {
    where_data: FilterWhere,
    order: MovieOrder,
}

impl Filter {
    pub fn new(data: &FilterData, order: MovieOrder) -> Self {
        Self {
            where_data: FilterWhere::generate(data),
            order,
        }
    }

    /// Page of rows; LIMIT and OFFSET are bound after the filter parameters.
    pub fn to_page_sql(&self, page: &PageRequest) -> SqlResult {
        let mut params: Vec<SqlParam> = self.where_data.params().values().cloned().collect();
        params.push(SqlParam::Int(page.limit()));
        let limit_index = params.len();
        params.push(SqlParam::Int(page.offset()));
        let offset_index = params.len();

        let query = format!(
            "SELECT {} FROM \"{}\" WHERE {} {} LIMIT ${} OFFSET ${}",
            MOVIE_COLUMNS,
            MOVIES_TABLE,
            self.where_data.to_sql(),
            self.order.to_sql(),
            limit_index,
            offset_index
        );
        SqlResult { query, params }
    }

    /// A single row, e.g. a random pick.
    pub fn to_first_sql(&self) -> SqlResult {
        let query = format!(
            "SELECT {} FROM \"{}\" WHERE {} {} LIMIT 1",
            MOVIE_COLUMNS,
            MOVIES_TABLE,
            self.where_data.to_sql(),
            self.order.to_sql()
        );
        SqlResult {
            query,
            params: self.where_data.params().values().cloned().collect(),
        }
    }

    /// Rows matching the filter, ignoring pagination.
    pub fn to_count_sql(&self) -> SqlResult {
        let query = format!(
            "SELECT COUNT(*) AS count FROM \"{}\" WHERE {}",
            MOVIES_TABLE,
            self.where_data.to_sql()
        );
        SqlResult {
            query,
            params: self.where_data.params().values().cloned().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn page_sql_binds_limit_and_offset_after_filters() {
        let filter = Filter::new(
            &FilterData::public(Some("Heat".into()), Some("Crime".into())),
            MovieOrder::YearDesc,
        );
        let page = PageRequest::new(Some(3), Some(10)).unwrap();
        let sql = filter.to_page_sql(&page);

        assert!(sql.query.starts_with("SELECT \"id\", \"title\""));
        assert!(sql.query.contains("WHERE \"active\" = TRUE AND"));
        assert!(sql.query.ends_with("ORDER BY \"year\" DESC NULLS LAST, \"id\" DESC LIMIT $3 OFFSET $4"));
        assert_eq!(
            sql.params,
            vec![
                SqlParam::Text("%Heat%".into()),
                SqlParam::Text("%Crime%".into()),
                SqlParam::Int(10),
                SqlParam::Int(20),
            ]
        );
    }

    #[test]
    fn count_sql_shares_where_but_not_paging() {
        let filter = Filter::new(&FilterData::admin(None, None, Some(true)), MovieOrder::IdDesc);
        let count = filter.to_count_sql();
        assert_eq!(
            count.query,
            "SELECT COUNT(*) AS count FROM \"movies\" WHERE 1=1 AND \"active\" = $1"
        );
        assert_eq!(count.params, vec![SqlParam::Bool(true)]);
    }

    #[test]
    fn first_sql_picks_one_random_row() {
        let filter = Filter::new(&FilterData::recommend("Drama"), MovieOrder::Random);
        let sql = filter.to_first_sql();
        assert!(sql.query.ends_with("ORDER BY random() LIMIT 1"));
        assert_eq!(sql.params, vec![SqlParam::Text("%Drama%".into())]);
    }

    #[test]
    fn quote_in_search_never_reaches_statement_text() {
        let filter = Filter::new(
            &FilterData::public(Some("O'Brien\"; DELETE FROM movies".into()), None),
            MovieOrder::YearDesc,
        );
        let page = filter.to_page_sql(&PageRequest::default());
        let count = filter.to_count_sql();
        for text in [&page.query, &count.query] {
            assert!(!text.contains("O'Brien"));
            assert!(!text.contains("DELETE"));
        }
        assert_eq!(
            page.params[0],
            SqlParam::Text("%O'Brien\"; DELETE FROM movies%".into())
        );
    }
}
