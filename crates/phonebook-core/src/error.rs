use thiserror::Error;

/// Invite subsystem error types.
///
/// Everything the issuance path can fail with, from input validation to the
/// storage layer. Store-level failures are wrapped via [`StoreError`].
#[derive(Error, Debug)]
pub enum InviteError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invite not found")]
    NotFound,

    #[error("{0}")]
    Conflict(String),

    /// The code generator spent its whole retry budget without finding a
    /// free code. The invite is not persisted when this is returned.
    #[error("Invite code space exhausted after {attempts} attempts")]
    CodeSpaceExhausted { attempts: u32 },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Store error: {0}")]
    Store(#[from] StoreError),
}

impl InviteError {
    // --- Constructors ---

    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    pub fn conflict(message: impl Into<String>) -> Self {
        Self::Conflict(message.into())
    }

    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }
}

impl From<validator::ValidationErrors> for InviteError {
    fn from(errors: validator::ValidationErrors) -> Self {
        InviteError::Validation(errors.to_string())
    }
}

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Connection error: {0}")]
    Connection(String),

    #[error("Query error: {0}")]
    Query(String),

    #[error("Constraint violation: {0}")]
    Constraint(String),
}

#[cfg(feature = "sqlx-postgres")]
impl From<sqlx::Error> for StoreError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::Database(db_err) => {
                if db_err.is_unique_violation() {
                    StoreError::Constraint(db_err.to_string())
                } else {
                    StoreError::Query(db_err.to_string())
                }
            }
            sqlx::Error::PoolClosed => StoreError::Connection("Pool closed".to_string()),
            sqlx::Error::PoolTimedOut => StoreError::Connection("Pool timed out".to_string()),
            _ => StoreError::Query(err.to_string()),
        }
    }
}

#[cfg(feature = "sqlx-postgres")]
impl From<sqlx::Error> for InviteError {
    fn from(err: sqlx::Error) -> Self {
        InviteError::Store(StoreError::from(err))
    }
}

pub type InviteResult<T> = Result<T, InviteError>;
