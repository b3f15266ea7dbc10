//! Error types for document fetching.

use thiserror::Error;

/// Errors from the object storage backend.
#[derive(Error, Debug)]
pub enum FetchError {
    /// The requested key does not exist in the bucket.
    #[error("Document not found: {0}")]
    NotFound(String),

    /// Any other storage backend failure.
    #[error("S3 error: {0}")]
    S3Error(String),
}

/// Type alias for [`Result<T, FetchError>`].
pub type FetchResult<T> = std::result::Result<T, FetchError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_display() {
        let error = FetchError::NotFound("decks/q3.pptx".to_string());
        assert_eq!(format!("{error}"), "Document not found: decks/q3.pptx");
    }

    #[test]
    fn test_s3_error_display() {
        let error = FetchError::S3Error("connection refused".to_string());
        assert_eq!(format!("{error}"), "S3 error: connection refused");
    }
}
