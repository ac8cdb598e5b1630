//! Document error types
//!
//! Unified error handling for all extraction paths (DOCX, PPTX, PDF).

use thiserror::Error;

/// Unified document error type
#[derive(Debug, Error)]
pub enum DocumentError {
    /// Not a readable ZIP package
    #[error("Invalid package: {0}")]
    InvalidPackage(String),

    /// Required part missing from the package
    #[error("Missing part: {0}")]
    MissingPart(String),

    /// Malformed XML inside a package part
    #[error("XML error in {part}: {message}")]
    Xml { part: String, message: String },

    /// MuPDF failed to open or read the document
    #[error("PDF error: {0}")]
    Pdf(String),

    /// IO error while reading a package part
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for document operations
pub type DocumentResult<T> = std::result::Result<T, DocumentError>;

impl From<mupdf::Error> for DocumentError {
    fn from(err: mupdf::Error) -> Self {
        DocumentError::Pdf(err.to_string())
    }
}

impl From<zip::result::ZipError> for DocumentError {
    fn from(err: zip::result::ZipError) -> Self {
        DocumentError::InvalidPackage(err.to_string())
    }
}
