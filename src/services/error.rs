use thiserror::Error;

#[derive(Debug, Error)]
pub(crate) enum ServiceError {
    #[error("{0}")]
    NotFound(String),
    #[error("{0}")]
    Forbidden(String),
    #[error("{0}")]
    InvalidState(String),
    #[error("{0}")]
    Conflict(String),
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

impl ServiceError {
    pub(crate) fn missing(resource: &str, id: impl std::fmt::Display) -> Self {
        Self::NotFound(format!("{resource} with id '{id}' doesn't exist"))
    }
}
