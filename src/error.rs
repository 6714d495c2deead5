use thiserror::Error;

/// Failures of the host text buffer when splicing text in.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum BufferError {
    #[error("Insert position {position} is past the end of the buffer (length {len})")]
    OutOfBounds { position: usize, len: usize },

    #[error("Insert position {0} is not on a character boundary")]
    NotCharBoundary(usize),
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SessionError {
    #[error("The drawing session is not open")]
    Closed,

    #[error("Failed to insert drawing: {0}")]
    Buffer(#[from] BufferError),
}

/// Errors while loading or saving tool settings.
#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("Failed to access settings file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid settings data: {0}")]
    Serde(#[from] serde_json::Error),
}

pub type SettingsResult<T> = Result<T, SettingsError>;
