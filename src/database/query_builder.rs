/// Bind a slice of [`SqlParam`](crate::filter::SqlParam) values onto any sqlx
/// query builder (`query`, `query_as`, `query_scalar`) in order.
macro_rules! bind_params {
    ($query:expr, $params:expr) => {{
        let mut query = $query;
        for param in $params.iter() {
            query = match param {
                $crate::filter::SqlParam::Text(value) => query.bind(value.clone()),
                $crate::filter::SqlParam::Bool(value) => query.bind(*value),
                $crate::filter::SqlParam::Int(value) => query.bind(*value),
            };
        }
        query
    }};
}

pub(crate) use bind_params;
