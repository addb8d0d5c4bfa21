//! Error types for fetching and normalizing content

use thiserror::Error;

/// Failures of the content-fetch collaborator
#[derive(Error, Debug)]
pub enum FetchError {
    #[error("Transport error: {0}")]
    Transport(String),

    #[error("Content API returned {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Invalid content API payload: {0}")]
    Decode(String),

    #[error("Invalid cursor: {0}")]
    InvalidCursor(String),

    #[error("Content API did not advertise a master ref")]
    MissingRef,

    #[error("Cursor was returned twice: {0}")]
    CursorLoop(String),
}

impl From<reqwest::Error> for FetchError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_decode() {
            FetchError::Decode(e.to_string())
        } else {
            FetchError::Transport(e.to_string())
        }
    }
}

/// A fetched record that cannot be shown, or a call the caller must not make
#[derive(Error, Debug, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Post {uid:?} is missing required field `{field}`")]
    MissingField { uid: Option<String>, field: &'static str },

    #[error("Invalid publication date: {0}")]
    InvalidDate(String),

    #[error("No further pages: cursor is exhausted")]
    ExhaustedCursor,
}

/// Errors of the paginator
#[derive(Error, Debug)]
pub enum PaginationError {
    #[error(transparent)]
    Fetch(#[from] FetchError),

    #[error(transparent)]
    Validation(#[from] ValidationError),
}
