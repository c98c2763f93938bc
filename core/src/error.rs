//! Error types for the WebDevPack client.
//!
//! # Design
//! One variant per failure class a caller can act on. Local file problems
//! are detected before any network traffic; argument errors carry the name
//! the server complained about; `Unknown` keeps the raw body and header text
//! because nothing else could be made of the response.

use std::fmt;
use std::path::PathBuf;

pub type Result<T, E = ApiError> = std::result::Result<T, E>;

/// Errors returned by `WebDevPackClient` operations.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// A source file could not be read or a target file cannot be written.
    #[error("{}: {reason}", path.display())]
    LocalFile {
        path: PathBuf,
        #[source]
        reason: LocalFileReason,
    },

    /// The HTTP layer failed before a response was received.
    #[error(transparent)]
    Transport(#[from] TransportError),

    /// The server rejected one of the request arguments.
    #[error("{kind} argument: {name}")]
    Argument { kind: ArgumentErrorKind, name: String },

    /// The server reported a failure with a human-readable message.
    #[error("error: {message}")]
    Remote { message: String },

    /// The download endpoint returned an empty file.
    #[error("download error: file {reference} is empty")]
    Download { reference: String },

    /// The response matched none of the known envelope shapes.
    #[error("unknown error: {body}\n{headers}")]
    Unknown { body: String, headers: String },

    /// The request payload could not be encoded as JSON.
    #[error("failed to serialize request payload: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Why a local file was rejected.
#[derive(Debug, thiserror::Error)]
pub enum LocalFileReason {
    #[error("the source file does not exist")]
    SourceMissing,

    #[error("the source path is not a regular file")]
    NotAFile,

    #[error("the source file is not readable")]
    SourceUnreadable(#[source] std::io::Error),

    #[error("the target file is not writable")]
    TargetUnwritable,

    #[error("file I/O failed")]
    Io(#[source] std::io::Error),
}

/// A network or TLS level failure reported by the transport.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("transport error: {message}")]
pub struct TransportError {
    pub message: String,
}

impl TransportError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl From<ureq::Error> for TransportError {
    fn from(err: ureq::Error) -> Self {
        Self::new(err.to_string())
    }
}

/// The two structured argument failures the API reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArgumentErrorKind {
    Missing,
    Invalid,
}

impl fmt::Display for ArgumentErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArgumentErrorKind::Missing => f.write_str("missing"),
            ArgumentErrorKind::Invalid => f.write_str("invalid"),
        }
    }
}

/// Field-less tag of an `ApiError`, for callers that only branch on the class.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    LocalFile,
    Transport,
    MissingArgument,
    InvalidArgument,
    Remote,
    Download,
    Unknown,
    Serialization,
}

impl ApiError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            ApiError::LocalFile { .. } => ErrorKind::LocalFile,
            ApiError::Transport(_) => ErrorKind::Transport,
            ApiError::Argument {
                kind: ArgumentErrorKind::Missing,
                ..
            } => ErrorKind::MissingArgument,
            ApiError::Argument {
                kind: ArgumentErrorKind::Invalid,
                ..
            } => ErrorKind::InvalidArgument,
            ApiError::Remote { .. } => ErrorKind::Remote,
            ApiError::Download { .. } => ErrorKind::Download,
            ApiError::Unknown { .. } => ErrorKind::Unknown,
            ApiError::Serialization(_) => ErrorKind::Serialization,
        }
    }

    pub(crate) fn local_file(path: impl Into<PathBuf>, reason: LocalFileReason) -> Self {
        ApiError::LocalFile {
            path: path.into(),
            reason,
        }
    }

    /// Build an `Unknown` error from a response nobody could classify.
    pub(crate) fn unknown(response: &crate::http::HttpResponse) -> Self {
        ApiError::Unknown {
            body: response.body_text(),
            headers: response.header_text(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn argument_error_message_names_the_argument() {
        let err = ApiError::Argument {
            kind: ArgumentErrorKind::Missing,
            name: "text".to_string(),
        };
        assert_eq!(err.to_string(), "missing argument: text");
        assert_eq!(err.kind(), ErrorKind::MissingArgument);
    }

    #[test]
    fn local_file_error_mentions_path_and_reason() {
        let err = ApiError::local_file("/tmp/in.png", LocalFileReason::SourceMissing);
        assert_eq!(err.to_string(), "/tmp/in.png: the source file does not exist");
        assert_eq!(err.kind(), ErrorKind::LocalFile);
        assert!(std::error::Error::source(&err).is_some());
    }

    #[test]
    fn transport_error_is_transparent() {
        let err = ApiError::from(TransportError::new("connection refused"));
        assert_eq!(err.to_string(), "transport error: connection refused");
        assert_eq!(err.kind(), ErrorKind::Transport);
    }
}
