//! Shared helpers for Office Open XML packages (DOCX, PPTX)
//!
//! Both formats are ZIP archives of XML parts. The extractors stream those
//! parts with quick-xml and track where they are in the element tree with an
//! [`ElementPath`].

use std::io::{Cursor, Read};

use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use zip::ZipArchive;

use crate::document::{DocumentError, DocumentResult};

/// Package-level relationships, naming the main document part
const PACKAGE_RELS: &str = "_rels/.rels";

/// Relationship type suffix shared by the transitional and strict schemas
const OFFICE_DOCUMENT: &str = "/officeDocument";

/// An opened OOXML package backed by the uploaded bytes
pub struct Package<'a> {
    archive: ZipArchive<Cursor<&'a [u8]>>,
}

impl<'a> Package<'a> {
    /// Open a package from raw upload bytes
    pub fn open(data: &'a [u8]) -> DocumentResult<Self> {
        let archive = ZipArchive::new(Cursor::new(data))?;
        Ok(Self { archive })
    }

    /// Read a part as UTF-8 text
    pub fn read_part(&mut self, path: &str) -> DocumentResult<String> {
        let mut file = self.archive.by_name(path).map_err(|e| match e {
            zip::result::ZipError::FileNotFound => DocumentError::MissingPart(path.to_string()),
            other => other.into(),
        })?;

        let mut content = String::new();
        file.read_to_string(&mut content)?;
        Ok(content)
    }

    /// Path of the main document part, from the package's `officeDocument`
    /// relationship.
    ///
    /// Packages without `_rels/.rels` fall back to `conventional`.
    pub fn main_part(&mut self, conventional: &str) -> DocumentResult<String> {
        let rels = match self.read_part(PACKAGE_RELS) {
            Ok(xml) => parse_relationships(PACKAGE_RELS, &xml)?,
            Err(DocumentError::MissingPart(_)) => {
                tracing::debug!("No {}, assuming {}", PACKAGE_RELS, conventional);
                return Ok(conventional.to_string());
            }
            Err(e) => return Err(e),
        };

        rels.iter()
            .find(|rel| rel.rel_type.ends_with(OFFICE_DOCUMENT))
            .map(|rel| resolve_target("", &rel.target))
            .ok_or_else(|| DocumentError::MissingPart("officeDocument relationship".to_string()))
    }

    /// Relationships whose source is `part`
    pub fn part_relationships(&mut self, part: &str) -> DocumentResult<Vec<Relationship>> {
        let path = rels_path(part);
        let xml = self.read_part(&path)?;
        parse_relationships(&path, &xml)
    }
}

/// One `Relationship` entry of a `.rels` part
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Relationship {
    pub id: String,
    pub rel_type: String,
    pub target: String,
}

/// Entries of a `.rels` part, in document order
pub fn parse_relationships(part: &str, xml: &str) -> DocumentResult<Vec<Relationship>> {
    let mut reader = Reader::from_str(xml);
    let mut rels = Vec::new();

    loop {
        match reader.read_event() {
            Ok(Event::Start(ref e)) | Ok(Event::Empty(ref e))
                if e.local_name().as_ref() == b"Relationship" =>
            {
                if let (Some(id), Some(target)) = (attr(e, b"Id"), attr(e, b"Target")) {
                    rels.push(Relationship {
                        id,
                        rel_type: attr(e, b"Type").unwrap_or_default(),
                        target,
                    });
                }
            }
            Ok(Event::Eof) => break,
            Err(e) => return Err(xml_error(part, e)),
            _ => {}
        }
    }

    Ok(rels)
}

/// Directory holding a part; relationship targets resolve against it
pub fn part_dir(part: &str) -> &str {
    part.rsplit_once('/').map(|(dir, _)| dir).unwrap_or("")
}

/// `ppt/presentation.xml` -> `ppt/_rels/presentation.xml.rels`
fn rels_path(part: &str) -> String {
    match part.rsplit_once('/') {
        Some((dir, name)) => format!("{}/_rels/{}.rels", dir, name),
        None => format!("_rels/{}.rels", part),
    }
}

/// Stack of local element names from the document root to the current element
#[derive(Debug, Default)]
pub struct ElementPath {
    names: Vec<Vec<u8>>,
}

impl ElementPath {
    pub fn push(&mut self, local_name: &[u8]) {
        self.names.push(local_name.to_vec());
    }

    pub fn pop(&mut self) {
        self.names.pop();
    }

    pub fn depth(&self) -> usize {
        self.names.len()
    }

    /// Whether the open elements are exactly `path`, root first
    pub fn is(&self, path: &[&[u8]]) -> bool {
        self.names.len() == path.len()
            && self.names.iter().zip(path).all(|(a, b)| a.as_slice() == *b)
    }

    /// Whether the open elements below the first `depth` are exactly `rest`
    pub fn tail_is(&self, depth: usize, rest: &[&[u8]]) -> bool {
        self.names.len() == depth + rest.len()
            && self.names[depth..].iter().zip(rest).all(|(a, b)| a.as_slice() == *b)
    }

    /// Name of the innermost open element
    pub fn current(&self) -> Option<&[u8]> {
        self.names.last().map(Vec::as_slice)
    }

    /// Whether the innermost open element has the given local name
    pub fn current_is(&self, local_name: &[u8]) -> bool {
        self.current() == Some(local_name)
    }
}

/// Value of the attribute with the given local name, ignoring its prefix
pub fn attr(e: &BytesStart<'_>, local: &[u8]) -> Option<String> {
    e.attributes()
        .flatten()
        .find(|a| a.key.local_name().as_ref() == local)
        .map(|a| String::from_utf8_lossy(&a.value).into_owned())
}

/// Value of a namespaced attribute such as `r:id`, skipping an unprefixed
/// attribute of the same local name
pub fn prefixed_attr(e: &BytesStart<'_>, local: &[u8]) -> Option<String> {
    e.attributes()
        .flatten()
        .find(|a| a.key.prefix().is_some() && a.key.local_name().as_ref() == local)
        .map(|a| String::from_utf8_lossy(&a.value).into_owned())
}

/// Resolve a relationship target against the directory of its source part.
///
/// `resolve_target("ppt", "slides/slide1.xml")` gives `ppt/slides/slide1.xml`;
/// absolute targets (`/ppt/...`) are taken from the package root.
pub fn resolve_target(base_dir: &str, target: &str) -> String {
    let segments: Vec<&str> = match target.strip_prefix('/') {
        Some(absolute) => absolute.split('/').collect(),
        None => base_dir.split('/').chain(target.split('/')).collect(),
    };
    normalize(segments)
}

fn normalize(segments: Vec<&str>) -> String {
    let mut out: Vec<&str> = Vec::with_capacity(segments.len());
    for segment in segments {
        match segment {
            "" | "." => {}
            ".." => {
                out.pop();
            }
            s => out.push(s),
        }
    }
    out.join("/")
}

/// Map an XML reader error to a document error for the given part
pub fn xml_error(part: &str, err: impl std::fmt::Display) -> DocumentError {
    DocumentError::Xml {
        part: part.to_string(),
        message: err.to_string(),
    }
}
