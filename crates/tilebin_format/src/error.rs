//! Error taxonomy for the binary map format

use thiserror::Error;

/// Errors raised while writing or reading a map.
///
/// All variants are fatal and unwind to the top-level `write_map`/`read_map`
/// call - there is no partial result and no skip-and-continue recovery. A
/// version mismatch is deliberately NOT an error: the reader logs a warning
/// and proceeds, reporting the stored version through
/// [`Decoded`](crate::Decoded).
#[derive(Debug, Error)]
pub enum FormatError {
    /// Underlying stream read/write failure. Fail-fast, never retried.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A required invariant did not hold: an inconsistent tile grid on
    /// write, or a factory refusing to produce an instance on read.
    #[error("Precondition violated: {0}")]
    Precondition(String),

    /// The stream contents are not a valid map record: an impossible
    /// discriminant, a malformed length prefix, or a bad bool byte.
    #[error("Malformed map data: {0}")]
    Format(String),
}

impl FormatError {
    pub(crate) fn precondition(msg: impl Into<String>) -> Self {
        FormatError::Precondition(msg.into())
    }

    pub(crate) fn format(msg: impl Into<String>) -> Self {
        FormatError::Format(msg.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_io() {
        let err = FormatError::from(std::io::Error::new(
            std::io::ErrorKind::UnexpectedEof,
            "stream ended",
        ));
        let msg = format!("{err}");
        assert!(msg.contains("I/O error"), "got: {msg}");
        assert!(msg.contains("stream ended"), "got: {msg}");
    }

    #[test]
    fn test_display_precondition() {
        let err = FormatError::precondition("factory returned nothing for tag 'map'");
        let msg = format!("{err}");
        assert!(msg.contains("Precondition violated"), "got: {msg}");
    }

    #[test]
    fn test_display_format() {
        let err = FormatError::format("tile discriminant 9");
        let msg = format!("{err}");
        assert!(msg.contains("Malformed map data"), "got: {msg}");
        assert!(msg.contains("discriminant 9"), "got: {msg}");
    }

    #[test]
    fn test_io_source_preserved() {
        let err = FormatError::from(std::io::Error::other("disk"));
        assert!(std::error::Error::source(&err).is_some());
    }
}
