//! Format-specific text extractors
//!
//! - `docx`: paragraphs and table cells, whitespace-collapsed
//! - `pptx`: shape text of every slide, concatenated
//! - `pdf`: page text plus hyperlink anchors (MuPDF)

pub mod docx;
mod ooxml;
pub mod pdf;
pub mod pptx;

use crate::document::{DocumentFormat, DocumentResult};

/// Extract text from an in-memory document of the given format
pub fn extract_text(format: DocumentFormat, data: &[u8]) -> DocumentResult<String> {
    match format {
        DocumentFormat::Docx => docx::extract_text(data),
        DocumentFormat::Pdf => pdf::extract_text(data),
        DocumentFormat::Pptx => pptx::extract_text(data),
    }
}
