use thiserror::Error;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum FilterError {
    #[error("Invalid per_page: {0}")]
    InvalidPerPage(String),

    #[error("Invalid page: {0}")]
    InvalidPage(String),
}
