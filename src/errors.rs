use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    /// Rejected input. The store is left unchanged; the message is meant to
    /// be shown to the user as-is.
    #[error("{0}")]
    Validation(String),

    /// An operation referenced a card id that is not in the store.
    #[error("no card with id {0}")]
    NotFound(i64),

    /// The platform gave us no usable data directory.
    #[error("Could not determine data directory")]
    DataDir,

    /// Underlying storage failure; fatal for the current operation.
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

// Convenience `Result` type
pub type Result<T> = std::result::Result<T, Error>;
