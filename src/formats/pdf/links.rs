//! Hyperlink extraction
//!
//! Walks the link annotations of every page and pairs each external URI with
//! the text drawn under its rectangle.

use mupdf::Document;

use super::stext::{text_in_rect, text_page};
use crate::document::{DocumentResult, Hyperlink};

/// Collect external hyperlinks in page order, then link order within a page
pub fn extract_hyperlinks(doc: &Document) -> DocumentResult<Vec<Hyperlink>> {
    let page_count = doc.page_count()?;
    let mut hyperlinks = Vec::new();

    for page_idx in 0..page_count {
        let page = doc.load_page(page_idx)?;

        let links: Vec<_> = page.links()?.filter(|link| is_external_uri(&link.uri)).collect();
        if links.is_empty() {
            continue;
        }

        let stext = text_page(&page)?;
        for link in links {
            let anchor = text_in_rect(&stext, &link.bounds);
            hyperlinks.push(Hyperlink::new(&anchor, link.uri));
        }
    }

    tracing::debug!("Found {} hyperlinks in {} pages", hyperlinks.len(), page_count);
    Ok(hyperlinks)
}

/// Whether a link URI points outside the document (`scheme:` prefix).
///
/// Internal jumps (`#page=3`, named destinations) carry no scheme. `file:`
/// targets are launch actions, not web links.
pub fn is_external_uri(uri: &str) -> bool {
    let Some((scheme, _)) = uri.split_once(':') else {
        return false;
    };

    let mut chars = scheme.chars();
    matches!(chars.next(), Some(c) if c.is_ascii_alphabetic())
        && chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'))
        && !scheme.eq_ignore_ascii_case("file")
}
