//! PDF text extraction via MuPDF
//!
//! The output is the page text (pages joined by a single space), a fixed
//! separator line, then one `(anchor)[uri]` line per external hyperlink. The
//! separator is always written, even when the document has no links.

mod links;
mod stext;

use mupdf::Document;

use crate::document::{DocumentResult, Hyperlink};

pub use links::{extract_hyperlinks, is_external_uri};

/// Line introducing the hyperlink listing
pub const HYPERLINK_SEPARATOR: &str = "\n here are hyperlinks with anchors if they exist:-\n";

const PDF_MIME: &str = "application/pdf";

/// Extract page text followed by the hyperlink listing from a PDF upload
pub fn extract_text(data: &[u8]) -> DocumentResult<String> {
    let doc = Document::from_bytes(data, PDF_MIME)?;

    let hyperlinks = extract_hyperlinks(&doc)?;
    let text = extract_page_text(&doc)?;

    Ok(render(&text, &hyperlinks))
}

/// Plain text of every page, joined with single spaces
pub fn extract_page_text(doc: &Document) -> DocumentResult<String> {
    let page_count = doc.page_count()?;
    let mut pages = Vec::with_capacity(page_count.max(0) as usize);

    for page_idx in 0..page_count {
        let page = doc.load_page(page_idx)?;
        pages.push(stext::page_text(&page)?);
    }

    Ok(pages.join(" "))
}

fn render(text: &str, hyperlinks: &[Hyperlink]) -> String {
    let mut out = String::with_capacity(text.len() + HYPERLINK_SEPARATOR.len());
    out.push_str(text);
    out.push_str(HYPERLINK_SEPARATOR);
    for link in hyperlinks {
        out.push_str(&link.to_string());
        out.push('\n');
    }
    out
}
