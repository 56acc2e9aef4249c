//! Error types for automation operations.

use serde::Serialize;
use thiserror::Error;

/// Result type alias for autoanchor operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while validating or performing an operation.
///
/// The rendered message always starts with the kind name so callers that only
/// look at text can still tell the kinds apart.
#[derive(Debug, Error)]
pub enum Error {
    /// Malformed or out-of-range input. Detected before any OS side effect.
    #[error("InvalidArgument: {0}")]
    InvalidArgument(String),

    /// A key or modifier token that is not in the known-key table.
    #[error("UnsupportedKey: {0}")]
    UnsupportedKey(String),

    /// The OS refused access (Accessibility / Screen Recording on macOS).
    #[error("PermissionDenied: {0}")]
    PermissionDenied(String),

    /// The capability is unavailable on the running OS or session.
    #[error("PlatformUnsupported: {0}")]
    PlatformUnsupported(String),

    /// Screen capture failed after it was started.
    #[error("CaptureFailed: {0}")]
    CaptureFailed(String),

    /// Image or text encoding failed.
    #[error("EncodingFailed: {0}")]
    EncodingFailed(String),

    /// The OS rejected an injected input event.
    #[error("SimulateFailed: {0}")]
    SimulateFailed(String),

    /// The operation failed after committing part of its side effects.
    #[error("{source} ({completed} of {total} completed)")]
    Partial {
        completed: usize,
        total: usize,
        source: Box<Error>,
    },
}

/// Machine-readable error kind, emitted as the `code` field of a failed outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ErrorKind {
    InvalidArgument,
    UnsupportedKey,
    PermissionDenied,
    PlatformUnsupported,
    CaptureFailed,
    EncodingFailed,
    SimulateFailed,
}

impl Error {
    /// The kind of this error. A partial failure reports the kind of its cause.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::InvalidArgument(_) => ErrorKind::InvalidArgument,
            Error::UnsupportedKey(_) => ErrorKind::UnsupportedKey,
            Error::PermissionDenied(_) => ErrorKind::PermissionDenied,
            Error::PlatformUnsupported(_) => ErrorKind::PlatformUnsupported,
            Error::CaptureFailed(_) => ErrorKind::CaptureFailed,
            Error::EncodingFailed(_) => ErrorKind::EncodingFailed,
            Error::SimulateFailed(_) => ErrorKind::SimulateFailed,
            Error::Partial { source, .. } => source.kind(),
        }
    }

    /// `(completed, total)` when some side effects were already delivered.
    pub fn progress(&self) -> Option<(usize, usize)> {
        match self {
            Error::Partial {
                completed, total, ..
            } => Some((*completed, *total)),
            _ => None,
        }
    }

    pub(crate) fn partial(completed: usize, total: usize, source: Error) -> Self {
        Error::Partial {
            completed,
            total,
            source: Box::new(source),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_message_carries_kind_name() {
        let err = Error::UnsupportedKey("'hyper'".into());
        assert_eq!(err.to_string(), "UnsupportedKey: 'hyper'");
        assert_eq!(err.kind(), ErrorKind::UnsupportedKey);
    }

    #[test]
    fn test_partial_reports_cause_kind() {
        let err = Error::partial(3, 5, Error::EncodingFailed("no mapping for 'é'".into()));
        assert_eq!(err.kind(), ErrorKind::EncodingFailed);
        assert_eq!(err.progress(), Some((3, 5)));
        assert_eq!(
            err.to_string(),
            "EncodingFailed: no mapping for 'é' (3 of 5 completed)"
        );
    }
}
