use std::path::PathBuf;
use thiserror::Error;

/// A line that does not follow the `[<timestamp>] [<level>]: <message>` shape.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FormatError {
    #[error("missing separator")]
    MissingSeparator,

    #[error("missing bracket delimiter")]
    MissingBracketDelimiter,
}

#[derive(Error, Debug)]
pub enum UploadError {
    #[error("failed to build HTTP client: {0}")]
    Client(#[source] reqwest::Error),

    #[error("invalid upload URL {url}: {reason}")]
    InvalidUrl { url: String, reason: String },

    #[error("failed to marshal log record: {0}")]
    Serialization(#[source] reqwest::Error),

    #[error("failed to upload log: {0}")]
    Transport(#[source] reqwest::Error),

    #[error("failed to upload log ({status}): {body}")]
    Status {
        status: reqwest::StatusCode,
        body: String,
    },
}

#[derive(Error, Debug)]
pub enum ShipError {
    #[error("failed to open file {}: {source}", path.display())]
    FileOpen {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("error reading file {}: {source}", path.display())]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to read directory {}: {source}", path.display())]
    DirectoryList {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
