// Error types for sample acquisition
//
// The acquisition side distinguishes transport failures from text decoding
// failures because the refresh policy treats them differently: a decode
// failure skips one line, a transport failure (other than a read timeout)
// ends acquisition.

use std::fmt;
use std::io;

use log::error;

/// Errors surfaced by a `SampleSource` while producing one line
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SourceError {
    /// Transport-level failure. A read timeout is reported here with
    /// `kind == ErrorKind::TimedOut` and means "no data yet", not fault.
    Io {
        kind: io::ErrorKind,
        message: String,
    },

    /// The received bytes are not valid UTF-8 text
    Decode { message: String },
}

impl SourceError {
    pub fn from_io(err: &io::Error) -> Self {
        SourceError::Io {
            kind: err.kind(),
            message: err.to_string(),
        }
    }

    /// True when this is a read timeout, i.e. the device was silent for
    /// one timeout window and the caller should simply try again.
    pub fn is_timeout(&self) -> bool {
        matches!(
            self,
            SourceError::Io {
                kind: io::ErrorKind::TimedOut,
                ..
            }
        )
    }
}

impl fmt::Display for SourceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SourceError::Io { kind, message } => {
                write!(f, "I/O error ({:?}): {}", kind, message)
            }
            SourceError::Decode { message } => {
                write!(f, "decode error: {}", message)
            }
        }
    }
}

impl std::error::Error for SourceError {}

/// Log a fatal source error with its acquisition context
pub fn log_source_error(err: &SourceError, context: &str) {
    error!("[Source] error in {}: {}", context, err);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_timeout_detection() {
        let timeout = SourceError::Io {
            kind: io::ErrorKind::TimedOut,
            message: "read timed out".to_string(),
        };
        assert!(timeout.is_timeout());

        let eof = SourceError::Io {
            kind: io::ErrorKind::UnexpectedEof,
            message: "stream closed".to_string(),
        };
        assert!(!eof.is_timeout());
        assert!(!SourceError::Decode {
            message: "bad bytes".to_string()
        }
        .is_timeout());
    }

    #[test]
    fn test_display_includes_kind_and_message() {
        let err = SourceError::from_io(&io::Error::new(
            io::ErrorKind::BrokenPipe,
            "device unplugged",
        ));
        let text = err.to_string();
        assert!(text.contains("BrokenPipe"));
        assert!(text.contains("device unplugged"));
    }
}
