//! Core document types

use std::fmt;

/// Label used when a link rectangle covers no text
pub const UNKNOWN_ANCHOR: &str = "Unknown Text";

/// Document format, selected from the uploaded file name
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentFormat {
    /// WordprocessingML (`.docx`, `.doc`)
    Docx,
    /// Portable Document Format (`.pdf`)
    Pdf,
    /// PresentationML (`.pptx`, `.ppt`)
    Pptx,
}

impl DocumentFormat {
    /// Detect format from a file name.
    ///
    /// Matching is a case-sensitive suffix check; `None` means the type is
    /// not supported.
    pub fn from_filename(filename: &str) -> Option<Self> {
        if filename.ends_with(".docx") || filename.ends_with(".doc") {
            Some(Self::Docx)
        } else if filename.ends_with(".pdf") {
            Some(Self::Pdf)
        } else if filename.ends_with(".pptx") || filename.ends_with(".ppt") {
            Some(Self::Pptx)
        } else {
            None
        }
    }
}

impl fmt::Display for DocumentFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Docx => f.write_str("docx"),
            Self::Pdf => f.write_str("pdf"),
            Self::Pptx => f.write_str("pptx"),
        }
    }
}

/// A PDF link annotation paired with the text under it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Hyperlink {
    /// Trimmed text under the link rectangle, or [`UNKNOWN_ANCHOR`]
    pub anchor: String,
    pub uri: String,
}

impl Hyperlink {
    pub fn new(anchor: &str, uri: impl Into<String>) -> Self {
        let anchor = anchor.trim();
        Self {
            anchor: if anchor.is_empty() {
                UNKNOWN_ANCHOR.to_string()
            } else {
                anchor.to_string()
            },
            uri: uri.into(),
        }
    }
}

impl fmt::Display for Hyperlink {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({})[{}]", self.anchor, self.uri)
    }
}

/// Collapse every whitespace run to one space and trim both ends
pub fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}
