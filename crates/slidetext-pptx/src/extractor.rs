//! Presentation walking: slide enumeration, relationship resolution, and
//! per-slide record assembly.

use std::collections::HashMap;
use std::io::{Read, Seek};

use quick_xml::events::Event;
use quick_xml::Reader;
use tracing::{debug, warn};
use zip::ZipArchive;

use crate::shape::{parse_notes_body, parse_shapes, ShapeContent};
use slidetext_core::{ExtractError, Result, SlideRecord, SlideStats};
use slidetext_ocr::TextRecognizer;

const PRESENTATION_RELS: &str = "ppt/_rels/presentation.xml.rels";

/// Walks a PPTX container and produces one [`SlideRecord`] per slide.
///
/// The container must be a readable ZIP with a presentation relationships
/// part; anything less is a fatal [`ExtractError`]. Per-slide trouble (a
/// missing image blob, an undecodable picture, a corrupt notes part) is
/// logged and absorbed, and only shows up as missing text and lower
/// counters in the affected record.
#[derive(Debug, Default)]
pub struct PptxExtractor;

impl PptxExtractor {
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Extract all slides from `source`, in presentation order.
    ///
    /// `recognizer` is the OCR engine to run over embedded pictures, or
    /// `None` to skip recognition for the whole document. Pictures are
    /// still counted in `stats.total_images` either way.
    ///
    /// # Errors
    ///
    /// Returns [`ExtractError::ArchiveError`] when `source` is not a ZIP
    /// archive or lacks the presentation relationships part, and
    /// [`ExtractError::XmlError`] when a slide document is syntactically
    /// broken.
    pub fn extract<R: Read + Seek>(
        &self,
        source: R,
        mut recognizer: Option<&mut dyn TextRecognizer>,
    ) -> Result<Vec<SlideRecord>> {
        let mut archive = ZipArchive::new(source).map_err(|e| {
            ExtractError::ArchiveError(format!("Failed to open presentation: {e}"))
        })?;

        let slide_paths = slide_paths(&mut archive)?;
        debug!("Presentation has {} slides", slide_paths.len());

        let mut records = Vec::with_capacity(slide_paths.len());
        for (index, slide_path) in slide_paths.iter().enumerate() {
            let engine = recognizer.as_deref_mut();
            records.push(extract_slide(&mut archive, slide_path, index + 1, engine)?);
        }

        Ok(records)
    }
}

/// One entry from an OPC relationships part.
struct Relationship {
    id: String,
    rel_type: String,
    target: String,
}

/// Image and notes relationships of a single slide.
#[derive(Default)]
struct SlideRels {
    /// Relationship id -> image target path (slide-relative).
    images: HashMap<String, String>,
    /// Notes slide target path, when the slide has speaker notes.
    notes: Option<String>,
}

/// List slide part paths from the presentation relationships, ordered by
/// slide file number.
fn slide_paths<R: Read + Seek>(archive: &mut ZipArchive<R>) -> Result<Vec<String>> {
    let xml = read_part_string(archive, PRESENTATION_RELS)?;

    let mut paths: Vec<String> = parse_relationships(&xml, PRESENTATION_RELS)?
        .into_iter()
        .filter(|rel| {
            rel.rel_type.contains("slide")
                && !rel.rel_type.contains("slideMaster")
                && !rel.rel_type.contains("notesMaster")
        })
        .map(|rel| format!("ppt/{}", rel.target))
        .collect();

    // Relationship order in the rels part is arbitrary; slide file numbers
    // carry the presentation order.
    paths.sort_by_key(|path| slide_file_number(path));
    Ok(paths)
}

/// Pull the numeric suffix out of a path like `ppt/slides/slide12.xml`.
fn slide_file_number(path: &str) -> u32 {
    path.trim_end_matches(".xml")
        .rsplit(|c: char| !c.is_ascii_digit())
        .next()
        .and_then(|digits| digits.parse().ok())
        .unwrap_or(0)
}

/// Build the record for one slide.
fn extract_slide<'a, R: Read + Seek>(
    archive: &mut ZipArchive<R>,
    slide_path: &str,
    slide_number: usize,
    mut recognizer: Option<&mut (dyn TextRecognizer + 'a)>,
) -> Result<SlideRecord> {
    let xml = read_part_string(archive, slide_path)?;
    let shapes = parse_shapes(&xml, slide_path)?;
    let rels = slide_relationships(archive, slide_path)?;

    let mut fragments: Vec<String> = Vec::new();
    let mut stats = SlideStats::default();

    for shape in shapes {
        match shape {
            ShapeContent::NativeText(text) => fragments.push(text),
            ShapeContent::Picture { rel_id } => {
                stats.total_images += 1;
                let image_number = stats.total_images;

                let Some(engine) = recognizer.as_mut() else {
                    continue;
                };

                match picture_bytes(archive, &rels, rel_id.as_deref()) {
                    Ok(bytes) => {
                        let text = engine.recognize(&bytes);
                        let text = text.trim();
                        if !text.is_empty() {
                            stats.ocr_successful += 1;
                            fragments.push(format!("[OCR Text: {text}]"));
                        }
                    }
                    Err(e) => {
                        warn!("Error processing image {image_number} on slide {slide_number}: {e}");
                    }
                }
            }
            ShapeContent::Other => {}
        }
    }

    let notes = rels
        .notes
        .as_deref()
        .and_then(|target| notes_text(archive, target));

    debug!(
        "Processed slide {slide_number}: {} images, {} with text",
        stats.total_images, stats.ocr_successful
    );

    Ok(SlideRecord {
        slide_number,
        text: fragments.join(" "),
        notes,
        stats,
    })
}

/// Read the slide's own relationships part. A slide without one has no
/// images and no notes, which is not an error.
fn slide_relationships<R: Read + Seek>(
    archive: &mut ZipArchive<R>,
    slide_path: &str,
) -> Result<SlideRels> {
    let rels_path = match slide_path.rsplit_once('/') {
        Some((dir, file)) => format!("{dir}/_rels/{file}.rels"),
        None => format!("_rels/{slide_path}.rels"),
    };

    let xml = match archive.by_name(&rels_path) {
        Ok(mut file) => {
            let mut content = String::new();
            file.read_to_string(&mut content)?;
            content
        }
        Err(_) => return Ok(SlideRels::default()),
    };

    let mut rels = SlideRels::default();
    for rel in parse_relationships(&xml, &rels_path)? {
        if rel.rel_type.contains("/image") {
            rels.images.insert(rel.id, rel.target);
        } else if rel.rel_type.contains("/notesSlide") {
            rels.notes = Some(rel.target);
        }
    }
    Ok(rels)
}

/// Resolve a picture's relationship id to its image bytes.
fn picture_bytes<R: Read + Seek>(
    archive: &mut ZipArchive<R>,
    rels: &SlideRels,
    rel_id: Option<&str>,
) -> Result<Vec<u8>> {
    let rel_id = rel_id.ok_or_else(|| {
        ExtractError::ArchiveError("picture has no image relationship".to_string())
    })?;
    let target = rels.images.get(rel_id).ok_or_else(|| {
        ExtractError::ArchiveError(format!("unresolved image relationship {rel_id}"))
    })?;
    read_part_bytes(archive, &resolve_target(target))
}

/// Read and trim the speaker notes, absorbing any failure.
fn notes_text<R: Read + Seek>(archive: &mut ZipArchive<R>, target: &str) -> Option<String> {
    let path = resolve_target(target);
    let xml = match read_part_string(archive, &path) {
        Ok(xml) => xml,
        Err(e) => {
            warn!("Failed to read notes part {path}: {e}");
            return None;
        }
    };

    match parse_notes_body(&xml, &path) {
        Ok(text) => {
            let text = text.trim();
            (!text.is_empty()).then(|| text.to_string())
        }
        Err(e) => {
            warn!("Failed to parse notes part {path}: {e}");
            None
        }
    }
}

/// Convert a slide-relative target like `../media/image1.png` into a full
/// archive path like `ppt/media/image1.png`.
fn resolve_target(target: &str) -> String {
    target.strip_prefix("../").map_or_else(
        || format!("ppt/slides/{target}"),
        |suffix| format!("ppt/{suffix}"),
    )
}

fn parse_relationships(xml: &str, path: &str) -> Result<Vec<Relationship>> {
    let mut reader = Reader::from_str(xml);
    reader.trim_text(true);

    let mut buf = Vec::new();
    let mut rels = Vec::new();

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(e) | Event::Empty(e)) if e.name().as_ref() == b"Relationship" => {
                let mut id = String::new();
                let mut rel_type = String::new();
                let mut target = String::new();
                for attr in e.attributes().flatten() {
                    let value = match attr.decode_and_unescape_value(&reader) {
                        Ok(value) => value.to_string(),
                        Err(_) => continue,
                    };
                    match attr.key.as_ref() {
                        b"Id" => id = value,
                        b"Type" => rel_type = value,
                        b"Target" => target = value,
                        _ => {}
                    }
                }
                rels.push(Relationship {
                    id,
                    rel_type,
                    target,
                });
            }
            Ok(Event::Eof) => break,
            Err(e) => {
                return Err(ExtractError::XmlError {
                    path: path.to_string(),
                    message: e.to_string(),
                })
            }
            _ => {}
        }
        buf.clear();
    }

    Ok(rels)
}

fn read_part_string<R: Read + Seek>(archive: &mut ZipArchive<R>, name: &str) -> Result<String> {
    let mut file = archive
        .by_name(name)
        .map_err(|e| ExtractError::ArchiveError(format!("Missing {name}: {e}")))?;
    let mut content = String::new();
    file.read_to_string(&mut content)?;
    Ok(content)
}

fn read_part_bytes<R: Read + Seek>(archive: &mut ZipArchive<R>, name: &str) -> Result<Vec<u8>> {
    let mut file = archive
        .by_name(name)
        .map_err(|e| ExtractError::ArchiveError(format!("Missing {name}: {e}")))?;
    let mut bytes = Vec::new();
    file.read_to_end(&mut bytes)?;
    Ok(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slide_file_number() {
        assert_eq!(slide_file_number("ppt/slides/slide1.xml"), 1);
        assert_eq!(slide_file_number("ppt/slides/slide12.xml"), 12);
        assert_eq!(slide_file_number("ppt/slides/oddname.xml"), 0);
    }

    #[test]
    fn test_resolve_target() {
        assert_eq!(
            resolve_target("../media/image1.png"),
            "ppt/media/image1.png"
        );
        assert_eq!(
            resolve_target("../notesSlides/notesSlide2.xml"),
            "ppt/notesSlides/notesSlide2.xml"
        );
        assert_eq!(resolve_target("slide1.xml"), "ppt/slides/slide1.xml");
    }

    #[test]
    fn test_parse_relationships() {
        let xml = r#"<?xml version="1.0"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">
  <Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/slide" Target="slides/slide1.xml"/>
  <Relationship Id="rId2" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/slideMaster" Target="slideMasters/slideMaster1.xml"/>
</Relationships>"#;
        let rels = parse_relationships(xml, "test.rels").unwrap();
        assert_eq!(rels.len(), 2);
        assert_eq!(rels[0].id, "rId1");
        assert!(rels[0].rel_type.ends_with("/slide"));
        assert_eq!(rels[1].target, "slideMasters/slideMaster1.xml");
    }
}
