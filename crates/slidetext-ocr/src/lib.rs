//! Text recognition for embedded presentation images, using Tesseract 5.x
//! via `leptess`.
//!
//! Recognition is deliberately forgiving: once a [`TesseractRecognizer`] has
//! been constructed (which runs a one-time self-check against a synthetic
//! blank image), every per-image failure — undecodable bytes, an engine
//! error, whitespace-only output — collapses to an empty string rather than
//! an error. The caller only counts non-empty results.
//!
//! # Example
//! ```no_run
//! use slidetext_ocr::{TesseractRecognizer, TextRecognizer};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let mut recognizer = TesseractRecognizer::new(None)?;
//! let image_bytes = std::fs::read("chart.png")?;
//! let text = recognizer.recognize(&image_bytes);
//! if !text.is_empty() {
//!     println!("recognized: {text}");
//! }
//! # Ok(())
//! # }
//! ```

mod normalize;
mod recognizer;

pub use normalize::normalize_for_ocr;
pub use recognizer::{OcrError, TesseractRecognizer, TextRecognizer};
