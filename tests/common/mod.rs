//! Shared fixtures for the HTTP tests
//!
//! DOCX and PPTX packages are assembled in memory with `zip::ZipWriter`;
//! PDFs are written as minimal PDF source with a correct xref table.

#![allow(dead_code)]

use std::io::{Cursor, Write};

use axum::body::Body;
use axum::http::{header, Request, Response};
use serde_json::Value;
use zip::{write::SimpleFileOptions, ZipWriter};

const BOUNDARY: &str = "doc-extract-test-boundary";

/// ZIP archive holding the given parts
pub fn zip_package(parts: &[(&str, String)]) -> Vec<u8> {
    let mut buffer = Vec::new();
    {
        let mut zip = ZipWriter::new(Cursor::new(&mut buffer));
        let options = SimpleFileOptions::default().compression_method(zip::CompressionMethod::Deflated);

        for (name, content) in parts {
            zip.start_file(*name, options).unwrap();
            zip.write_all(content.as_bytes()).unwrap();
        }

        zip.finish().unwrap();
    }
    buffer
}

/// Paragraph element with a single run
pub fn w_p(text: &str) -> String {
    if text.is_empty() {
        "<w:p/>".to_string()
    } else {
        format!("<w:p><w:r><w:t xml:space=\"preserve\">{}</w:t></w:r></w:p>", text)
    }
}

/// Table element, one `Vec` of cell texts per row
pub fn w_tbl(rows: &[&[&str]]) -> String {
    let mut xml = String::from("<w:tbl><w:tblPr/>");
    for row in rows {
        xml.push_str("<w:tr>");
        for cell in *row {
            xml.push_str("<w:tc><w:tcPr/>");
            xml.push_str(&w_p(cell));
            xml.push_str("</w:tc>");
        }
        xml.push_str("</w:tr>");
    }
    xml.push_str("</w:tbl>");
    xml
}

/// `_rels/.rels` naming `target` as the main document part
fn package_rels(target: &str) -> String {
    format!(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">
<Relationship Id="rId2" Type="http://schemas.openxmlformats.org/package/2006/relationships/metadata/core-properties" Target="docProps/core.xml"/>
<Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument" Target="{}"/>
</Relationships>"#,
        target
    )
}

/// DOCX package whose body is the given WordprocessingML fragment
pub fn docx(body: &str) -> Vec<u8> {
    docx_at("word/document.xml", body)
}

/// DOCX package with its main part stored at `part`
pub fn docx_at(part: &str, body: &str) -> Vec<u8> {
    let content_types = format!(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types">
<Default Extension="rels" ContentType="application/vnd.openxmlformats-package.relationships+xml"/>
<Default Extension="xml" ContentType="application/xml"/>
<Override PartName="/{}" ContentType="application/vnd.openxmlformats-officedocument.wordprocessingml.document.main+xml"/>
</Types>"#,
        part
    );
    let document = format!(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<w:document xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main">
  <w:body>{}<w:sectPr/></w:body>
</w:document>"#,
        body
    );

    zip_package(&[
        ("[Content_Types].xml", content_types),
        ("_rels/.rels", package_rels(part)),
        (part, document),
    ])
}

/// Text shape element, one entry per paragraph
pub fn p_sp(paragraphs: &[&str]) -> String {
    let mut xml = String::from("<p:sp><p:nvSpPr><p:cNvPr id=\"2\" name=\"Text\"/></p:nvSpPr><p:txBody><a:bodyPr/>");
    for paragraph in paragraphs {
        xml.push_str(&format!("<a:p><a:r><a:t>{}</a:t></a:r></a:p>", paragraph));
    }
    xml.push_str("</p:txBody></p:sp>");
    xml
}

/// PPTX package; `slides[i]` is the shape tree content of slide `i + 1`.
///
/// Slide parts are numbered in reverse relationship order so that only
/// `p:sldIdLst` can recover the presentation order.
pub fn pptx(slides: &[String]) -> Vec<u8> {
    let count = slides.len();
    let mut rels = String::from(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">
<Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/slideMaster" Target="slideMasters/slideMaster1.xml"/>"#,
    );
    let mut ids = String::new();
    let mut parts: Vec<(String, String)> = Vec::new();

    for (idx, tree) in slides.iter().enumerate() {
        let rid = format!("rId{}", idx + 2);
        let part = format!("slides/slide{}.xml", count - idx);
        rels.push_str(&format!(
            r#"<Relationship Id="{}" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/slide" Target="{}"/>"#,
            rid, part
        ));
        ids.push_str(&format!(r#"<p:sldId id="{}" r:id="{}"/>"#, 256 + idx, rid));
        parts.push((
            format!("ppt/{}", part),
            format!(
                r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<p:sld xmlns:a="http://schemas.openxmlformats.org/drawingml/2006/main" xmlns:p="http://schemas.openxmlformats.org/presentationml/2006/main" xmlns:r="http://schemas.openxmlformats.org/officeDocument/2006/relationships">
<p:cSld><p:spTree><p:nvGrpSpPr><p:cNvPr id="1" name=""/></p:nvGrpSpPr><p:grpSpPr/>{}</p:spTree></p:cSld></p:sld>"#,
                tree
            ),
        ));
    }
    rels.push_str("</Relationships>");

    let presentation = format!(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<p:presentation xmlns:a="http://schemas.openxmlformats.org/drawingml/2006/main" xmlns:p="http://schemas.openxmlformats.org/presentationml/2006/main" xmlns:r="http://schemas.openxmlformats.org/officeDocument/2006/relationships">
<p:sldMasterIdLst><p:sldMasterId id="2147483648" r:id="rId1"/></p:sldMasterIdLst>
<p:sldIdLst>{}</p:sldIdLst>
<p:sldSz cx="9144000" cy="6858000"/>
</p:presentation>"#,
        ids
    );

    let mut all: Vec<(&str, String)> = vec![
        ("_rels/.rels", package_rels("ppt/presentation.xml")),
        ("ppt/presentation.xml", presentation),
        ("ppt/_rels/presentation.xml.rels", rels),
    ];
    all.extend(parts.iter().map(|(name, xml)| (name.as_str(), xml.clone())));
    zip_package(&all)
}

/// Link annotation dictionary for [`pdf`]; `rect` is in PDF user space
pub fn uri_link(rect: [u32; 4], uri: &str) -> String {
    format!(
        "<< /Type /Annot /Subtype /Link /Rect [{} {} {} {}] /Border [0 0 0] /A << /S /URI /URI ({}) >> >>",
        rect[0], rect[1], rect[2], rect[3], uri
    )
}

/// Internal jump to the first page
pub fn goto_link(rect: [u32; 4]) -> String {
    format!(
        "<< /Type /Annot /Subtype /Link /Rect [{} {} {} {}] /Border [0 0 0] /Dest [{} 0 R /XYZ 0 792 0] >>",
        rect[0], rect[1], rect[2], rect[3], FIRST_PAGE_OBJECT
    )
}

/// Object number of the first page dictionary written by [`pdf_pages`]
const FIRST_PAGE_OBJECT: usize = 4;

/// Single-page PDF; see [`pdf_pages`]
pub fn pdf(text: &str, annots: &[String]) -> Vec<u8> {
    pdf_pages(&[(text, annots.to_vec())])
}

/// Letter-sized PDF with one page per entry. Each page shows its text in
/// 24pt Helvetica with the baseline at (72, 700) and carries its own link
/// annotation dictionaries.
pub fn pdf_pages(pages: &[(&str, Vec<String>)]) -> Vec<u8> {
    // 1 catalog, 2 page tree, 3 font, then per page: page, contents, annots
    let mut page_objects: Vec<String> = Vec::new();
    let mut page_refs = Vec::with_capacity(pages.len());
    let mut next = FIRST_PAGE_OBJECT;

    for (text, annots) in pages {
        let page_num = next;
        let content_num = next + 1;
        let annot_refs: Vec<String> = (0..annots.len())
            .map(|i| format!("{} 0 R", content_num + 1 + i))
            .collect();
        let annots_entry = if annots.is_empty() {
            String::new()
        } else {
            format!(" /Annots [{}]", annot_refs.join(" "))
        };
        let content = format!("BT /F1 24 Tf 72 700 Td ({}) Tj ET", text);

        page_refs.push(format!("{} 0 R", page_num));
        page_objects.push(format!(
            "<< /Type /Page /Parent 2 0 R /MediaBox [0 0 612 792] /Contents {} 0 R \
             /Resources << /Font << /F1 3 0 R >> >>{} >>",
            content_num, annots_entry
        ));
        page_objects.push(format!(
            "<< /Length {} >>\nstream\n{}\nendstream",
            content.len(),
            content
        ));
        page_objects.extend(annots.iter().cloned());
        next = content_num + 1 + annots.len();
    }

    let mut objects = vec![
        "<< /Type /Catalog /Pages 2 0 R >>".to_string(),
        format!(
            "<< /Type /Pages /Kids [{}] /Count {} >>",
            page_refs.join(" "),
            pages.len()
        ),
        "<< /Type /Font /Subtype /Type1 /BaseFont /Helvetica >>".to_string(),
    ];
    objects.extend(page_objects);

    let mut out = b"%PDF-1.4\n".to_vec();
    let mut offsets = Vec::with_capacity(objects.len());
    for (idx, object) in objects.iter().enumerate() {
        offsets.push(out.len());
        out.extend_from_slice(format!("{} 0 obj\n{}\nendobj\n", idx + 1, object).as_bytes());
    }

    let xref_offset = out.len();
    out.extend_from_slice(format!("xref\n0 {}\n0000000000 65535 f \n", objects.len() + 1).as_bytes());
    for offset in offsets {
        out.extend_from_slice(format!("{:010} 00000 n \n", offset).as_bytes());
    }
    out.extend_from_slice(
        format!(
            "trailer\n<< /Size {} /Root 1 0 R >>\nstartxref\n{}\n%%EOF\n",
            objects.len() + 1,
            xref_offset
        )
        .as_bytes(),
    );
    out
}

/// `multipart/form-data` POST carrying one file field
pub fn upload(uri: &str, field: &str, filename: &str, data: &[u8]) -> Request<Body> {
    let mut body = Vec::new();
    body.extend_from_slice(format!("--{}\r\n", BOUNDARY).as_bytes());
    body.extend_from_slice(
        format!(
            "Content-Disposition: form-data; name=\"{}\"; filename=\"{}\"\r\n",
            field, filename
        )
        .as_bytes(),
    );
    body.extend_from_slice(b"Content-Type: application/octet-stream\r\n\r\n");
    body.extend_from_slice(data);
    body.extend_from_slice(format!("\r\n--{}--\r\n", BOUNDARY).as_bytes());

    Request::builder()
        .method("POST")
        .uri(uri)
        .header(
            header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={}", BOUNDARY),
        )
        .body(Body::from(body))
        .unwrap()
}

/// JSON POST
pub fn post_json(uri: &str, value: &Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(serde_json::to_vec(value).unwrap()))
        .unwrap()
}

/// Collect a response body as JSON
pub async fn json_body(response: Response<Body>) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}
