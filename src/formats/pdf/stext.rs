//! Structured Text Helpers
//!
//! Helpers for reading MuPDF structured text: whole-page plain text and the
//! text whose glyphs fall inside a rectangle (used for link anchors).

use mupdf::{Page, Quad, Rect, TextPage, TextPageOptions};

use crate::document::DocumentResult;

/// Get plain text from a page, without the line breaks MuPDF appends after
/// the last block
pub fn page_text(page: &Page) -> DocumentResult<String> {
    let mut text = page.to_text()?;
    text.truncate(text.trim_end().len());
    Ok(text)
}

/// Structured text of a page, for repeated [`text_in_rect`] lookups
pub fn text_page(page: &Page) -> DocumentResult<TextPage> {
    Ok(page.to_text_page(TextPageOptions::empty())?)
}

/// Get the text of every glyph whose center lies inside `rect`.
///
/// Lines that contribute at least one glyph are joined with `\n`, in reading
/// order.
pub fn text_in_rect(text_page: &TextPage, rect: &Rect) -> String {
    let mut lines: Vec<String> = Vec::new();

    for block in text_page.blocks() {
        for line in block.lines() {
            let mut line_text = String::new();

            for ch in line.chars() {
                if let Some(c) = ch.char() {
                    if contains(rect, quad_center(&ch.quad())) {
                        line_text.push(c);
                    }
                }
            }

            if !line_text.is_empty() {
                lines.push(line_text);
            }
        }
    }

    lines.join("\n")
}

/// Center point of a glyph quad
fn quad_center(quad: &Quad) -> (f32, f32) {
    let x = (quad.ul.x + quad.ur.x + quad.ll.x + quad.lr.x) / 4.0;
    let y = (quad.ul.y + quad.ur.y + quad.ll.y + quad.lr.y) / 4.0;
    (x, y)
}

fn contains(rect: &Rect, (x, y): (f32, f32)) -> bool {
    x >= rect.x0 && x <= rect.x1 && y >= rect.y0 && y <= rect.y1
}
