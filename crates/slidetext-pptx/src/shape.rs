//! Slide XML parsing: top-level shape classification and notes text.

use quick_xml::events::Event;
use quick_xml::Reader;
use slidetext_core::{ExtractError, Result};

/// Classification of one top-level shape in a slide's shape tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShapeContent {
    /// A shape whose text frame holds non-empty text (trimmed).
    NativeText(String),
    /// A raster picture. `rel_id` is the relationship id of its image blob,
    /// absent when the markup carries no `r:embed` reference.
    Picture { rel_id: Option<String> },
    /// Everything else: groups, tables, charts, connectors, empty text boxes.
    Other,
}

/// Parse the slide's shape tree into classified top-level shapes, in
/// document order.
///
/// Only direct children of `p:spTree` are considered. Container elements
/// (`p:grpSp`, `p:graphicFrame`, `p:cxnSp`) are skipped wholesale, so a
/// picture nested inside a group contributes nothing.
pub(crate) fn parse_shapes(xml: &str, path: &str) -> Result<Vec<ShapeContent>> {
    // Preserve spaces in XML text nodes
    let mut reader = Reader::from_str(xml);
    reader.trim_text(false);

    let mut buf = Vec::new();
    let mut skip_buf = Vec::new();
    let mut shapes = Vec::new();
    let mut in_sp_tree = false;

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(e)) => match e.name().as_ref() {
                b"p:spTree" => in_sp_tree = true,
                b"p:sp" if in_sp_tree => {
                    let text = collect_shape_text(&mut reader, b"p:sp", path)?;
                    let trimmed = text.trim();
                    if trimmed.is_empty() {
                        shapes.push(ShapeContent::Other);
                    } else {
                        shapes.push(ShapeContent::NativeText(trimmed.to_string()));
                    }
                }
                b"p:pic" if in_sp_tree => {
                    shapes.push(collect_picture(&mut reader, path)?);
                }
                b"p:grpSp" | b"p:graphicFrame" | b"p:cxnSp" if in_sp_tree => {
                    let end = e.to_end().into_owned();
                    reader
                        .read_to_end_into(end.name(), &mut skip_buf)
                        .map_err(|err| xml_error(path, &err))?;
                    shapes.push(ShapeContent::Other);
                }
                _ => {}
            },
            Ok(Event::End(e)) if e.name().as_ref() == b"p:spTree" => in_sp_tree = false,
            Ok(Event::Eof) => break,
            Err(e) => return Err(xml_error(path, &e)),
            _ => {}
        }
        buf.clear();
    }

    Ok(shapes)
}

/// Extract the speaker-notes text from a notes slide document.
///
/// Notes slides also contain slide-number and slide-image placeholders;
/// only shapes whose placeholder type is `body` carry the actual notes.
pub(crate) fn parse_notes_body(xml: &str, path: &str) -> Result<String> {
    let mut reader = Reader::from_str(xml);
    reader.trim_text(false);

    let mut buf = Vec::new();
    let mut out = String::new();

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(e)) if e.name().as_ref() == b"p:sp" => {
                let (is_body, text) = collect_notes_shape(&mut reader, path)?;
                if is_body {
                    out.push_str(&text);
                }
            }
            Ok(Event::Eof) => break,
            Err(e) => return Err(xml_error(path, &e)),
            _ => {}
        }
        buf.clear();
    }

    Ok(out)
}

/// Accumulate all run text inside the current shape, with paragraph and
/// line breaks rendered as newlines.
fn collect_shape_text(reader: &mut Reader<&[u8]>, end_tag: &[u8], path: &str) -> Result<String> {
    let mut buf = Vec::new();
    let mut text = String::new();
    let mut in_text = false;

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(e)) if e.name().as_ref() == b"a:t" => in_text = true,
            Ok(Event::Text(e)) if in_text => {
                if let Ok(t) = e.unescape() {
                    text.push_str(&t);
                }
            }
            Ok(Event::Empty(e)) if e.name().as_ref() == b"a:br" => text.push('\n'),
            Ok(Event::End(e)) => match e.name().as_ref() {
                b"a:t" => in_text = false,
                b"a:p" => text.push('\n'),
                tag if tag == end_tag => break,
                _ => {}
            },
            Ok(Event::Eof) => break,
            Err(e) => return Err(xml_error(path, &e)),
            _ => {}
        }
        buf.clear();
    }

    Ok(text)
}

/// Scan the current `p:pic` element for its image relationship id.
fn collect_picture(reader: &mut Reader<&[u8]>, path: &str) -> Result<ShapeContent> {
    let mut buf = Vec::new();
    let mut rel_id = None;

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(e) | Event::Empty(e)) if e.name().as_ref() == b"a:blip" => {
                for attr in e.attributes().flatten() {
                    if attr.key.as_ref() == b"r:embed" {
                        if let Ok(val) = attr.decode_and_unescape_value(&*reader) {
                            rel_id = Some(val.to_string());
                        }
                    }
                }
            }
            Ok(Event::End(e)) if e.name().as_ref() == b"p:pic" => break,
            Ok(Event::Eof) => break,
            Err(e) => return Err(xml_error(path, &e)),
            _ => {}
        }
        buf.clear();
    }

    Ok(ShapeContent::Picture { rel_id })
}

/// Like [`collect_shape_text`] for a notes shape, also reporting whether the
/// shape's placeholder type is `body`.
fn collect_notes_shape(reader: &mut Reader<&[u8]>, path: &str) -> Result<(bool, String)> {
    let mut buf = Vec::new();
    let mut is_body = false;
    let mut in_text = false;
    let mut text = String::new();

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(e) | Event::Empty(e)) if e.name().as_ref() == b"p:ph" => {
                for attr in e.attributes().flatten() {
                    if attr.key.as_ref() == b"type" {
                        if let Ok(val) = attr.decode_and_unescape_value(&*reader) {
                            if val == "body" {
                                is_body = true;
                            }
                        }
                    }
                }
            }
            Ok(Event::Start(e)) if e.name().as_ref() == b"a:t" => in_text = true,
            Ok(Event::Text(e)) if in_text => {
                if let Ok(t) = e.unescape() {
                    text.push_str(&t);
                }
            }
            Ok(Event::End(e)) => match e.name().as_ref() {
                b"a:t" => in_text = false,
                b"a:p" => text.push('\n'),
                b"p:sp" => break,
                _ => {}
            },
            Ok(Event::Eof) => break,
            Err(e) => return Err(xml_error(path, &e)),
            _ => {}
        }
        buf.clear();
    }

    Ok((is_body, text))
}

fn xml_error(path: &str, err: &quick_xml::Error) -> ExtractError {
    ExtractError::XmlError {
        path: path.to_string(),
        message: err.to_string(),
    }
}
