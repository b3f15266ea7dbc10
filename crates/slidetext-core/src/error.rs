//! Error types for presentation extraction.

use thiserror::Error;

/// Fatal, document-level extraction errors.
///
/// Anything recoverable (a single corrupt image, a failed recognition, a
/// missing relationship target) is handled locally in the pipeline and never
/// becomes an `ExtractError`.
#[derive(Error, Debug)]
pub enum ExtractError {
    /// File or stream I/O failed.
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    /// The input is not a readable presentation container.
    ///
    /// PPTX files are ZIP archives; this covers both a stream that is not a
    /// ZIP at all and an archive missing the required presentation parts.
    #[error("Archive error: {0}")]
    ArchiveError(String),

    /// Structural XML inside the container could not be parsed.
    #[error("XML parse error in {path}: {message}")]
    XmlError { path: String, message: String },
}

/// Type alias for [`Result<T, ExtractError>`].
pub type Result<T> = std::result::Result<T, ExtractError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_archive_error_display() {
        let error = ExtractError::ArchiveError("not a ZIP archive".to_string());
        assert_eq!(format!("{error}"), "Archive error: not a ZIP archive");
    }

    #[test]
    fn test_xml_error_display() {
        let error = ExtractError::XmlError {
            path: "ppt/slides/slide1.xml".to_string(),
            message: "unexpected EOF".to_string(),
        };
        let display = format!("{error}");
        assert!(display.contains("ppt/slides/slide1.xml"));
        assert!(display.contains("unexpected EOF"));
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: ExtractError = io_err.into();

        match err {
            ExtractError::IoError(e) => {
                assert_eq!(e.kind(), std::io::ErrorKind::NotFound);
            }
            _ => panic!("Expected IoError variant"),
        }
    }

    #[test]
    fn test_error_propagation_with_question_mark() {
        fn inner() -> Result<()> {
            Err(ExtractError::ArchiveError("bad".to_string()))
        }

        fn outer() -> Result<()> {
            inner()?;
            Ok(())
        }

        match outer() {
            Err(ExtractError::ArchiveError(msg)) => assert_eq!(msg, "bad"),
            _ => panic!("Expected ArchiveError to propagate"),
        }
    }
}
