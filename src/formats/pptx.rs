//! PPTX (PresentationML) text extraction
//!
//! Slides are visited in presentation order and the text of every top-level
//! text shape is appended to one running string, without separators.

use std::collections::HashMap;

use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;

use super::ooxml::{part_dir, prefixed_attr, resolve_target, xml_error, ElementPath, Package};
use crate::document::{DocumentError, DocumentResult};

/// Presentation part location when the package has no relationships part
const DEFAULT_PRESENTATION_PART: &str = "ppt/presentation.xml";

const SHAPE_TREE: &[&[u8]] = &[b"sld", b"cSld", b"spTree"];
const SHAPE: &[&[u8]] = &[b"sld", b"cSld", b"spTree", b"sp"];
const SHAPE_TEXT_BODY: &[&[u8]] = &[b"sld", b"cSld", b"spTree", b"sp", b"txBody"];

/// Line break inside a paragraph, as presentation tooling reports it
const LINE_BREAK: char = '\u{b}';

/// Extract the concatenated shape text of every slide from a PPTX upload
pub fn extract_text(data: &[u8]) -> DocumentResult<String> {
    let mut package = Package::open(data)?;
    let slides = slide_parts(&mut package)?;

    let mut text = String::new();
    for part in &slides {
        let xml = package.read_part(part)?;
        for shape in parse_slide(part, &xml)? {
            text.push_str(&shape);
        }
    }

    tracing::debug!("Extracted {} chars from {} slides", text.len(), slides.len());
    Ok(text)
}

/// Slide part paths in presentation order
fn slide_parts(package: &mut Package<'_>) -> DocumentResult<Vec<String>> {
    let presentation_part = package.main_part(DEFAULT_PRESENTATION_PART)?;
    let base_dir = part_dir(&presentation_part);

    let targets: HashMap<String, String> = package
        .part_relationships(&presentation_part)?
        .into_iter()
        .map(|rel| (rel.id, rel.target))
        .collect();

    let presentation = package.read_part(&presentation_part)?;
    let ids = parse_slide_ids(&presentation_part, &presentation)?;

    ids.iter()
        .map(|id| {
            targets
                .get(id)
                .map(|target| resolve_target(base_dir, target))
                .ok_or_else(|| {
                    DocumentError::MissingPart(format!("slide relationship {}", id))
                })
        })
        .collect()
}

/// Relationship ids of `p:sldIdLst` entries, in order
fn parse_slide_ids(part: &str, xml: &str) -> DocumentResult<Vec<String>> {
    let mut reader = Reader::from_str(xml);
    let mut ids = Vec::new();

    loop {
        match reader.read_event() {
            Ok(Event::Start(ref e)) | Ok(Event::Empty(ref e))
                if e.local_name().as_ref() == b"sldId" =>
            {
                if let Some(id) = prefixed_attr(e, b"id") {
                    ids.push(id);
                }
            }
            Ok(Event::Eof) => break,
            Err(e) => return Err(xml_error(part, e)),
            _ => {}
        }
    }

    Ok(ids)
}

#[derive(Default)]
struct SlideCollector {
    path: ElementPath,
    shapes: Vec<String>,
    /// Paragraphs of the shape being read
    shape: Option<Vec<String>>,
    paragraph: Option<String>,
}

impl SlideCollector {
    fn open(&mut self, e: &BytesStart<'_>, empty: bool) {
        let local = e.local_name();
        let name = local.as_ref();

        match name {
            b"sp" if self.path.is(SHAPE_TREE) => {
                self.shape = Some(Vec::new());
            }
            b"p" if self.shape.is_some() && self.path.is(SHAPE_TEXT_BODY) => {
                self.paragraph = Some(String::new());
                if empty {
                    self.end_paragraph();
                }
            }
            b"br" if self.path.current_is(b"p") => {
                if let Some(paragraph) = self.paragraph.as_mut() {
                    paragraph.push(LINE_BREAK);
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
            b"p" if self.path.is(SHAPE_TEXT_BODY) => self.end_paragraph(),
            b"sp" if self.path.is(SHAPE_TREE) => {
                if let Some(paragraphs) = self.shape.take() {
                    self.shapes.push(paragraphs.join("\n"));
                }
            }
            _ => {}
        }
    }

    fn end_paragraph(&mut self) {
        if let (Some(paragraph), Some(shape)) = (self.paragraph.take(), self.shape.as_mut()) {
            shape.push(paragraph);
        }
    }

    fn text(&mut self, text: &str) {
        if self.path.current_is(b"t") {
            if let Some(paragraph) = self.paragraph.as_mut() {
                paragraph.push_str(text);
            }
        }
    }
}

/// Text of each top-level shape on a slide, in z-order
fn parse_slide(part: &str, xml: &str) -> DocumentResult<Vec<String>> {
    let mut reader = Reader::from_str(xml);
    let mut collector = SlideCollector::default();

    loop {
        match reader.read_event() {
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

    Ok(collector.shapes)
}
