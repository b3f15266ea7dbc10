//! Core types for slidetext: the per-slide output records and the error
//! taxonomy shared by the extraction pipeline.
//!
//! The pipeline distinguishes two failure tiers. Document-level failures
//! (an unopenable archive, malformed structural XML) surface as
//! [`ExtractError`] and abort the whole extraction. Per-shape and per-image
//! failures never reach this type: they are absorbed where they occur and
//! show up only as missing text and zeroed counters in the [`SlideRecord`].

pub mod error;
pub mod record;

pub use error::{ExtractError, Result};
pub use record::{SlideRecord, SlideStats};
