use thiserror::Error;

use crate::models::MatchStatus;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    #[error("Not found")]
    NotFound,

    #[error("Constraint violation: {0}")]
    ConstraintViolation(String),

    /// The match row was found in a different status once locked for writing.
    #[error("Match status changed concurrently (now {0:?})")]
    StatusConflict(MatchStatus),
}

pub type Result<T> = std::result::Result<T, StorageError>;

impl StorageError {
    pub fn is_foreign_key_violation(&self) -> bool {
        matches!(
            self,
            StorageError::Database(sqlx::Error::Database(e))
                if e.code().as_deref() == Some("23503")
        )
    }
}

/// Maps foreign key violations to a readable constraint error, leaving every
/// other failure untouched.
pub(crate) fn map_foreign_key(error: sqlx::Error, message: &str) -> StorageError {
    let error = StorageError::from(error);
    if error.is_foreign_key_violation() {
        StorageError::ConstraintViolation(message.to_string())
    } else {
        error
    }
}
