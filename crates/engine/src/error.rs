use std::io;

pub type Result<T> = std::result::Result<T, Error>;

/// Failures that abort a reconciliation run.
///
/// Ambiguous matches are not errors; they surface as `decision` flags.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("invalid reconciliation input: {0}")]
    Usage(String),
}

impl Error {
    pub fn usage(message: impl Into<String>) -> Self {
        Self::Usage(message.into())
    }
}
