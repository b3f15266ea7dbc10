//! PPTX text extraction for slidetext.
//!
//! A PPTX file is a ZIP archive of Office Open XML parts. This crate walks
//! the presentation's slides in order and assembles one record per slide:
//! native shape text, OCR text from embedded pictures (wrapped in
//! `[OCR Text: ...]` markers), speaker notes, and image counters.
//!
//! Only top-level shapes are considered; content nested inside groups,
//! tables, and charts is ignored. OCR is pluggable through the
//! [`TextRecognizer`](slidetext_ocr::TextRecognizer) trait and optional:
//! without an engine, pictures are still counted but contribute no text.
//!
//! # Example
//! ```no_run
//! use slidetext_pptx::PptxExtractor;
//! use std::fs::File;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let file = File::open("deck.pptx")?;
//! let records = PptxExtractor::new().extract(file, None)?;
//! for record in records {
//!     println!("slide {}: {}", record.slide_number, record.text);
//! }
//! # Ok(())
//! # }
//! ```

mod extractor;
mod shape;

pub use extractor::PptxExtractor;
pub use shape::ShapeContent;
