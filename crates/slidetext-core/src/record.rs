//! Per-slide output records.

use serde::{Deserialize, Serialize};

/// Image/OCR counters for one slide.
///
/// `ocr_successful` counts the subset of `total_images` whose recognition
/// produced non-empty text, so `ocr_successful <= total_images` always holds.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlideStats {
    /// Number of picture shapes encountered on the slide.
    pub total_images: usize,
    /// Number of those pictures that yielded non-empty recognized text.
    pub ocr_successful: usize,
}

/// Extracted content of a single slide.
///
/// Records are produced in document order with `slide_number` running 1..=N
/// and are immutable once constructed. The field is serialized as `slide` for
/// compatibility with the consumer of the original extractor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlideRecord {
    /// 1-based slide position.
    #[serde(rename = "slide")]
    pub slide_number: usize,
    /// Space-joined native text fragments and `[OCR Text: ...]` fragments,
    /// in shape-traversal order.
    pub text: String,
    /// Speaker notes, present only when the notes pane holds non-empty text
    /// after trimming. `None` serializes as `null`, distinguishing "no notes"
    /// from an empty notes pane.
    pub notes: Option<String>,
    /// Image and OCR counters.
    pub stats: SlideStats,
}
