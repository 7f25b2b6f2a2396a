//! Executor error types.

use thiserror::Error;

use super::ExecMode;

/// Result type for statement execution.
pub type ExecResult<T> = Result<T, ExecError>;

/// Errors that can occur while executing a statement.
#[derive(Error, Debug)]
pub enum ExecError {
    /// The executor does not support the requested SQL mode.
    #[error("unsupported SQL mode: {0}")]
    UnsupportedMode(ExecMode),

    /// No connection is configured for the data source.
    #[error("unknown data source: {0}")]
    UnknownSource(String),

    /// The database could not be reached.
    #[error("database connection failed: {0}")]
    ConnectionFailed(String),

    /// The database rejected the statement.
    #[error("database error: {message} (code: {code})")]
    Remote {
        /// SQLSTATE code.
        code: String,
        /// Error message from the server.
        message: String,
    },

    /// A result row could not be decoded.
    #[error("failed to decode result: {0}")]
    DecodeFailed(String),

    /// Any other driver failure.
    #[error("database driver error: {0}")]
    Driver(#[source] sqlx::Error),
}

impl ExecError {
    /// Create a remote error from a server response.
    pub fn remote(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Remote {
            code: code.into(),
            message: message.into(),
        }
    }

    /// Check if this error means the database was unreachable.
    pub fn is_connection_failure(&self) -> bool {
        matches!(self, Self::ConnectionFailed(_))
    }

    /// Check if the server rejected the statement, e.g. a missing function.
    pub fn is_remote(&self) -> bool {
        matches!(self, Self::Remote { .. })
    }
}

impl From<sqlx::Error> for ExecError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::Database(db) => Self::Remote {
                code: db.code().map(|c| c.into_owned()).unwrap_or_default(),
                message: db.message().to_string(),
            },
            sqlx::Error::Io(_)
            | sqlx::Error::Tls(_)
            | sqlx::Error::PoolTimedOut
            | sqlx::Error::PoolClosed
            | sqlx::Error::WorkerCrashed => Self::ConnectionFailed(err.to_string()),
            sqlx::Error::ColumnDecode { .. }
            | sqlx::Error::ColumnNotFound(_)
            | sqlx::Error::Decode(_) => Self::DecodeFailed(err.to_string()),
            other => Self::Driver(other),
        }
    }
}

impl From<serde_json::Error> for ExecError {
    fn from(err: serde_json::Error) -> Self {
        Self::DecodeFailed(err.to_string())
    }
}
