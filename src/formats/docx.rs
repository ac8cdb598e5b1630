//! DOCX (WordprocessingML) text extraction
//!
//! Reads the main document part and collects the text of top-level body
//! paragraphs, then the cell text of top-level body tables. The result is
//! joined with newlines and whitespace-collapsed into a single line.

use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;

use super::ooxml::{attr, xml_error, ElementPath, Package};
use crate::document::{collapse_whitespace, DocumentResult};

/// Main part location when the package has no relationships part
const DEFAULT_MAIN_PART: &str = "word/document.xml";

/// Widest table grid Word allows
const MAX_GRID_COLUMNS: usize = 63;

const BODY: &[&[u8]] = &[b"document", b"body"];
const BODY_TABLE: &[&[u8]] = &[b"document", b"body", b"tbl"];
const BODY_ROW: &[&[u8]] = &[b"document", b"body", b"tbl", b"tr"];
const BODY_CELL: &[&[u8]] = &[b"document", b"body", b"tbl", b"tr", b"tc"];
const BODY_CELL_PROPS: &[&[u8]] = &[b"document", b"body", b"tbl", b"tr", b"tc", b"tcPr"];

// Paragraph content is read only from runs that are direct children of the
// paragraph or of one of its hyperlinks.
const RUN: &[&[u8]] = &[b"r"];
const LINKED_RUN: &[&[u8]] = &[b"hyperlink", b"r"];
const RUN_TEXT: &[&[u8]] = &[b"r", b"t"];
const LINKED_RUN_TEXT: &[&[u8]] = &[b"hyperlink", b"r", b"t"];

/// Extract whitespace-collapsed text from a DOCX upload
pub fn extract_text(data: &[u8]) -> DocumentResult<String> {
    let mut package = Package::open(data)?;
    let part = package.main_part(DEFAULT_MAIN_PART)?;
    let xml = package.read_part(&part)?;
    let body = parse_body(&part, &xml)?;
    Ok(body.into_text())
}

/// Text content of the document body, in document order
#[derive(Debug, Default)]
struct Body {
    paragraphs: Vec<String>,
    tables: Vec<Table>,
}

impl Body {
    fn into_text(self) -> String {
        let mut parts: Vec<String> = self
            .paragraphs
            .into_iter()
            .filter(|p| !p.trim().is_empty())
            .collect();

        for table in self.tables {
            parts.extend(table.cell_texts().filter(|c| !c.trim().is_empty()));
        }

        collapse_whitespace(&parts.join("\n"))
    }
}

#[derive(Debug, Default)]
struct Table {
    rows: Vec<Vec<Cell>>,
}

#[derive(Debug, Default)]
struct Cell {
    paragraphs: Vec<String>,
    grid_span: usize,
    merge_continue: bool,
}

impl Table {
    /// Cell texts as a table reader sees them: a spanning cell repeats once
    /// per grid column, and a merge continuation repeats the cell above.
    fn cell_texts(&self) -> impl Iterator<Item = String> {
        let mut above: Vec<String> = Vec::new();
        let mut out = Vec::new();

        for row in &self.rows {
            let mut grid: Vec<String> = Vec::new();
            for cell in row {
                let text = if cell.merge_continue {
                    above.get(grid.len()).cloned().unwrap_or_default()
                } else {
                    cell.paragraphs.join("\n")
                };
                for _ in 0..cell.grid_span {
                    grid.push(text.clone());
                }
            }
            out.extend(grid.iter().cloned());
            above = grid;
        }

        out.into_iter()
    }
}

/// Paragraph being read, and the path depth of its children
#[derive(Debug)]
struct Paragraph {
    text: String,
    content_depth: usize,
}

#[derive(Default)]
struct BodyCollector {
    path: ElementPath,
    body: Body,
    table: Option<Table>,
    cell: Option<Cell>,
    paragraph: Option<Paragraph>,
}

impl BodyCollector {
    fn open(&mut self, e: &BytesStart<'_>, empty: bool) {
        let local = e.local_name();
        let name = local.as_ref();

        match name {
            b"p" if self.path.is(BODY) || self.path.is(BODY_CELL) => {
                if !empty {
                    self.paragraph = Some(Paragraph {
                        text: String::new(),
                        content_depth: self.path.depth() + 1,
                    });
                }
            }
            b"tbl" if self.path.is(BODY) => {
                self.table = Some(Table::default());
            }
            b"tr" if self.path.is(BODY_TABLE) => {
                if let Some(table) = self.table.as_mut() {
                    table.rows.push(Vec::new());
                }
            }
            b"tc" if self.path.is(BODY_ROW) => {
                self.cell = Some(Cell {
                    grid_span: 1,
                    ..Cell::default()
                });
            }
            b"gridSpan" if self.path.is(BODY_CELL_PROPS) => {
                if let Some(cell) = self.cell.as_mut() {
                    cell.grid_span = attr(e, b"val")
                        .and_then(|v| v.parse::<usize>().ok())
                        .unwrap_or(1)
                        .clamp(1, MAX_GRID_COLUMNS);
                }
            }
            b"vMerge" if self.path.is(BODY_CELL_PROPS) => {
                if let Some(cell) = self.cell.as_mut() {
                    cell.merge_continue = attr(e, b"val").as_deref() != Some("restart");
                }
            }
            b"tab" | b"ptab" | b"br" | b"cr" | b"noBreakHyphen" if self.in_paragraph(RUN, LINKED_RUN) => {
                let piece = match name {
                    b"tab" | b"ptab" => "\t",
                    b"cr" => "\n",
                    b"noBreakHyphen" => "-",
                    // page and column breaks carry no text
                    _ => match attr(e, b"type").as_deref() {
                        None | Some("textWrapping") => "\n",
                        Some(_) => "",
                    },
                };
                if let Some(paragraph) = self.paragraph.as_mut() {
                    paragraph.text.push_str(piece);
                }
            }
            _ => {}
        }

        if !empty {
            self.path.push(name);
        }
    }

    fn close(&mut self, name: &[u8]) {
        self.path.pop();

        match name {
            b"p" if self.path.is(BODY) => {
                if let Some(paragraph) = self.paragraph.take() {
                    self.body.paragraphs.push(paragraph.text);
                }
            }
            b"p" if self.path.is(BODY_CELL) => {
                if let (Some(paragraph), Some(cell)) = (self.paragraph.take(), self.cell.as_mut()) {
                    cell.paragraphs.push(paragraph.text);
                }
            }
            b"tc" if self.path.is(BODY_ROW) => {
                if let (Some(cell), Some(row)) = (
                    self.cell.take(),
                    self.table.as_mut().and_then(|t| t.rows.last_mut()),
                ) {
                    row.push(cell);
                }
            }
            b"tbl" if self.path.is(BODY) => {
                if let Some(table) = self.table.take() {
                    self.body.tables.push(table);
                }
            }
            _ => {}
        }
    }

    fn text(&mut self, text: &str) {
        if self.in_paragraph(RUN_TEXT, LINKED_RUN_TEXT) {
            if let Some(paragraph) = self.paragraph.as_mut() {
                paragraph.text.push_str(text);
            }
        }
    }

    /// Whether the open elements below the current paragraph are `direct`
    /// or `linked`
    fn in_paragraph(&self, direct: &[&[u8]], linked: &[&[u8]]) -> bool {
        self.paragraph.as_ref().is_some_and(|p| {
            self.path.tail_is(p.content_depth, direct) || self.path.tail_is(p.content_depth, linked)
        })
    }
}

fn parse_body(part: &str, xml: &str) -> DocumentResult<Body> {
    let mut reader = Reader::from_str(xml);
    let mut collector = BodyCollector::default();

    loop {
        match reader.read_event() {
            Ok(Event::Start(ref e)) | Ok(Event::Empty(ref e))
                if collector.path.depth() == 0 && e.local_name().as_ref() != b"document" =>
            {
                return Err(xml_error(part, "root element is not w:document"));
            }
            Ok(Event::Start(ref e)) => collector.open(e, false),
            Ok(Event::Empty(ref e)) => collector.open(e, true),
            Ok(Event::End(ref e)) => collector.close(e.local_name().as_ref()),
            Ok(Event::Text(ref e)) => {
                let text = e.unescape().map_err(|err| xml_error(part, err))?;
                collector.text(&text);
            }
            Ok(Event::CData(ref e)) => collector.text(&String::from_utf8_lossy(e)),
            Ok(Event::Eof) if collector.path.depth() > 0 => {
                return Err(xml_error(part, "unexpected end of document"));
            }
            Ok(Event::Eof) => break,
            Err(e) => return Err(xml_error(part, e)),
            _ => {}
        }
    }

    Ok(collector.body)
}
