use thiserror::Error;

/// Client input rejected before any query is executed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SearchError {
    #[error("{param} invalid: {value:?}")]
    InvalidRange { param: &'static str, value: String },

    #[error("unknown feature {0:?}")]
    InvalidFeature(String),

    #[error("Search condition not found")]
    EmptySearch,

    #[error("{param} condition invalid: {value:?}")]
    InvalidPagination {
        param: &'static str,
        value: Option<String>,
    },

    #[error("polygon invalid: {0}")]
    InvalidPolygon(String),
}
