use crate::domain::search::SearchError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error(transparent)]
    Search(#[from] SearchError),

    #[error("database error: {0}")]
    Storage(#[from] sqlx::Error),

    #[error("record has no value for column '{0}'")]
    MissingColumn(&'static str),
}
