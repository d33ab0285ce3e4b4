//! Error types for ttype

use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum TtypeError {
    /// Duration argument was not a whole, positive number of seconds
    #[error("argument is not a valid duration: {0}")]
    InvalidDuration(String),

    #[error("words per second must be between 1 and {max}: {0}", max = crate::source::MAX_WORDS_PER_SECOND)]
    InvalidWordsPerSecond(String),

    /// Selected target file could not be opened or decoded
    #[error("unable to read {}: {source}", path.display())]
    UnreadableFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A target source produced nothing to type
    #[error("target text is empty")]
    EmptyTarget,

    #[error("language not found: {0}")]
    UnknownLanguage(String),

    #[error("language file {name} is malformed: {source}")]
    InvalidLanguage {
        name: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("unable to install logger: {0}")]
    Logger(#[from] log::SetLoggerError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, TtypeError>;
