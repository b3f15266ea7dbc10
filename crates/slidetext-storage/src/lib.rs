//! Object storage access for slidetext.
//!
//! Presentations live in S3 (or a MinIO stand-in); this crate fetches them
//! by key. The [`DocumentFetcher`] trait keeps the rest of the pipeline
//! independent of the backend.

mod error;
mod fetcher;

pub use error::{FetchError, FetchResult};
pub use fetcher::{DocumentFetcher, S3Config, S3DocumentFetcher};
