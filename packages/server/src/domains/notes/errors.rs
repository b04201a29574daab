use thiserror::Error;

/// Errors raised by note activities
#[derive(Error, Debug)]
pub enum NoteError {
    #[error("{0}")]
    NotFound(String),

    /// The update target does not exist; nothing was written
    #[error("{0}")]
    PreconditionFailed(String),

    #[error("{0}")]
    Validation(String),

    #[error("Store error: {0}")]
    Store(#[from] anyhow::Error),
}

pub type NoteResult<T> = Result<T, NoteError>;
