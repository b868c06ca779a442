//! Error types for dynmenu.

use std::fmt;
use std::io;

/// Result type alias for menu operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for menu operations.
#[derive(Debug)]
pub enum Error {
    /// I/O error from terminal operations.
    Io(io::Error),
    /// Position outside the valid `[0, len)` range of the entry sequence.
    OutOfRange { position: usize, len: usize },
    /// An operation the menu does not know how to perform (e.g. an
    /// unrecognized pointer event kind).
    UnsupportedOperation(String),
    /// The input source ended before the menu was quit.
    InputClosed,
    /// A submenu was activated while it is already running.
    MenuBusy,
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(e) => write!(f, "I/O error: {e}"),
            Self::OutOfRange { position, len } => {
                write!(f, "position {position} out of range for {len} entries")
            }
            Self::UnsupportedOperation(what) => write!(f, "unsupported operation: {what}"),
            Self::InputClosed => write!(f, "input closed before the menu was quit"),
            Self::MenuBusy => write!(f, "menu is already running"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<io::Error> for Error {
    fn from(e: io::Error) -> Self {
        Self::Io(e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::OutOfRange {
            position: 7,
            len: 3,
        };
        assert_eq!(err.to_string(), "position 7 out of range for 3 entries");

        let err = Error::UnsupportedOperation("pointer event kind 9".to_string());
        assert!(err.to_string().contains("pointer event kind 9"));

        assert!(Error::InputClosed.to_string().contains("input closed"));
        assert!(Error::MenuBusy.to_string().contains("already running"));
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = io::Error::new(io::ErrorKind::BrokenPipe, "test");
        let err: Error = io_err.into();
        assert!(matches!(err, Error::Io(_)));
        assert!(std::error::Error::source(&err).is_some());
    }

    #[test]
    fn test_non_io_errors_have_no_source() {
        let err = Error::OutOfRange {
            position: 0,
            len: 0,
        };
        assert!(std::error::Error::source(&err).is_none());
    }
}
