use thiserror::Error;

/// Core error type shared across marketseed crates.
#[derive(Debug, Error)]
pub enum Error {
    /// Database error or sink failure.
    #[error("database error: {0}")]
    Db(String),
    /// Settings that cannot produce a valid run.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
    /// A foreign key was requested from a pool with no parent rows.
    #[error("no parent rows in '{0}' pool")]
    EmptyPool(&'static str),
    /// Catch-all error for unexpected failures.
    #[error("other error: {0}")]
    Other(String),
}

/// Convenience alias for results returned by marketseed crates.
pub type Result<T> = std::result::Result<T, Error>;
