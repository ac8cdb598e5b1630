//! Format-agnostic document types
//!
//! The format enum used for upload dispatch, the PDF hyperlink record, and
//! the error type shared by every extractor.

mod error;
mod types;

pub use error::{DocumentError, DocumentResult};
pub use types::{collapse_whitespace, DocumentFormat, Hyperlink, UNKNOWN_ANCHOR};
