use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ShortenError {
    #[error("URL is already shortened as {existing_code}")]
    AlreadyExists { existing_code: String },

    #[error("Could not find a free code after {attempts} attempts")]
    CodeSpaceExhausted { attempts: usize },

    #[error("Corrupt mapping file {}: {reason}", .path.display())]
    CorruptState { path: PathBuf, reason: String },

    #[error("Could not access mapping file {}: {source}", .path.display())]
    Persistence {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    #[error("Config error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl ShortenError {
    pub(crate) fn persistence(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Persistence {
            path: path.into(),
            source,
        }
    }

    pub(crate) fn corrupt(path: impl Into<PathBuf>, reason: impl ToString) -> Self {
        Self::CorruptState {
            path: path.into(),
            reason: reason.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, ShortenError>;
