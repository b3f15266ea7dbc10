//! Tesseract-backed text recognition.

use crate::normalize::normalize_for_ocr;
use image::{GrayImage, Luma};
use leptess::{LepTess, Variable};
use std::io::Cursor;
use std::path::Path;
use thiserror::Error;
use tracing::{debug, warn};

/// Page segmentation mode 6: assume a single uniform block of text.
/// Slide screenshots and diagrams rarely have document layout, so
/// layout-aware segmentation only hurts.
const UNIFORM_BLOCK_PSM: &str = "6";

/// Dimensions of the synthetic blank image used for the engine self-check.
const SELF_CHECK_SIZE: (u32, u32) = (100, 30);

/// Errors that can occur during OCR processing.
#[derive(Error, Debug)]
pub enum OcrError {
    /// Tesseract could not be initialized (engine or language data missing).
    #[error("Failed to initialize Tesseract: {0}")]
    InitError(String),

    /// The engine initialized but failed the blank-image self-check.
    #[error("Tesseract self-check failed: {0}")]
    SelfCheckError(String),

    /// The image bytes could not be decoded.
    #[error("Failed to decode image: {0}")]
    ImageDecode(String),
}

/// Text recognition over raw encoded image bytes.
///
/// Implementations absorb per-image failures: the contract is "best-effort
/// text, trimmed, empty on any problem". This keeps the slide walk free of
/// OCR error plumbing and lets tests substitute a canned engine.
pub trait TextRecognizer {
    /// Recognize text in the given encoded image bytes.
    ///
    /// Returns trimmed recognized text, or an empty string when the image
    /// cannot be decoded, the engine errors, or nothing was recognized.
    fn recognize(&mut self, image_bytes: &[u8]) -> String;
}

/// Tesseract recognizer with a fixed single-block configuration.
pub struct TesseractRecognizer {
    engine: LepTess,
}

impl TesseractRecognizer {
    /// Initialize Tesseract and verify it actually works.
    ///
    /// `datapath` optionally points at a tessdata directory; `None` uses the
    /// engine's compiled-in default. Construction runs recognition over a
    /// synthetic blank white image once, so a broken install is reported here
    /// rather than failing on every slide image.
    ///
    /// # Errors
    ///
    /// Returns [`OcrError::InitError`] when the engine or English language
    /// data is unavailable, [`OcrError::SelfCheckError`] when the probe
    /// recognition fails.
    pub fn new(datapath: Option<&Path>) -> Result<Self, OcrError> {
        let datapath = datapath.and_then(Path::to_str);
        let mut engine = LepTess::new(datapath, "eng").map_err(|e| {
            OcrError::InitError(format!(
                "{e}. Make sure Tesseract is installed with English language data"
            ))
        })?;

        engine
            .set_variable(Variable::TesseditPagesegMode, UNIFORM_BLOCK_PSM)
            .map_err(|e| OcrError::InitError(format!("Failed to set PSM: {e}")))?;

        let (width, height) = SELF_CHECK_SIZE;
        let probe = GrayImage::from_pixel(width, height, Luma([255]));
        let png = encode_png(&probe).map_err(|e| OcrError::SelfCheckError(e.to_string()))?;
        engine
            .set_image_from_mem(&png)
            .map_err(|e| OcrError::SelfCheckError(e.to_string()))?;
        engine
            .get_utf8_text()
            .map_err(|e| OcrError::SelfCheckError(e.to_string()))?;

        Ok(Self { engine })
    }
}

impl TextRecognizer for TesseractRecognizer {
    fn recognize(&mut self, image_bytes: &[u8]) -> String {
        let gray = match normalize_for_ocr(image_bytes) {
            Ok(img) => img,
            Err(e) => {
                warn!("OCR error: {e}");
                return String::new();
            }
        };

        // leptess expects encoded image data, not raw pixels.
        let png = match encode_png(&gray) {
            Ok(buf) => buf,
            Err(e) => {
                warn!("OCR error: failed to re-encode image: {e}");
                return String::new();
            }
        };

        if let Err(e) = self.engine.set_image_from_mem(&png) {
            warn!("OCR error: failed to set image: {e}");
            return String::new();
        }

        match self.engine.get_utf8_text() {
            Ok(text) => {
                let text = text.trim().to_string();
                if text.is_empty() {
                    debug!("OCR produced no text");
                } else {
                    debug!("OCR succeeded, extracted {} characters", text.len());
                }
                text
            }
            Err(e) => {
                warn!("OCR error: {e}");
                String::new()
            }
        }
    }
}

fn encode_png(img: &GrayImage) -> image::ImageResult<Vec<u8>> {
    let mut buf = Cursor::new(Vec::new());
    img.write_to(&mut buf, image::ImageFormat::Png)?;
    Ok(buf.into_inner())
}
