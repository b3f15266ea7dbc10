//! slidetext - PPTX text extraction with OCR over embedded images.
//!
//! Reads a presentation from a local file or S3, walks its slides, and
//! prints one JSON object to stdout: `{"data": [...]}` with a record per
//! slide, or `{"error": "..."}` when the document cannot be processed at
//! all. All diagnostics go to stderr so stdout stays machine-readable.

use std::io::Cursor;
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context as _, Result};
use clap::Parser;
use serde_json::json;
use tracing::warn;
use tracing_subscriber::EnvFilter;

use slidetext_core::SlideRecord;
use slidetext_ocr::{TesseractRecognizer, TextRecognizer};
use slidetext_pptx::PptxExtractor;
use slidetext_storage::{DocumentFetcher, S3Config, S3DocumentFetcher};

#[derive(Parser)]
#[command(
    name = "slidetext",
    version,
    about = "Extract text from PowerPoint presentations, including OCR over embedded images",
    after_help = "EXAMPLES:\n  \
                  # Extract from a local file\n  \
                  slidetext deck.pptx\n\n  \
                  # Extract from S3 (bucket from S3_BUCKET_NAME)\n  \
                  slidetext --s3 decks/q3-review.pptx\n\n  \
                  # Skip OCR\n  \
                  slidetext --no-ocr deck.pptx"
)]
struct Cli {
    /// Local PPTX path, or an S3 object key with --s3
    input: String,

    /// Treat INPUT as an S3 object key (bucket from S3_BUCKET_NAME)
    #[arg(long)]
    s3: bool,

    /// S3 bucket name (required with --s3)
    #[arg(long, env = "S3_BUCKET_NAME")]
    bucket: Option<String>,

    /// Custom S3 endpoint, e.g. a local MinIO
    #[arg(long, env = "S3_ENDPOINT")]
    endpoint: Option<String>,

    /// Tesseract data directory (default: the engine's compiled-in path)
    #[arg(long, value_name = "DIR", env = "SLIDETEXT_TESSDATA")]
    tessdata: Option<PathBuf>,

    /// Skip OCR over embedded images
    #[arg(long)]
    no_ocr: bool,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match run(cli).await {
        Ok(records) => {
            println!("{}", json!({ "data": records }));
            ExitCode::SUCCESS
        }
        Err(e) => {
            tracing::error!("{e:#}");
            println!("{}", json!({ "error": format!("{e:#}") }));
            ExitCode::FAILURE
        }
    }
}

/// Stdout carries the result envelope, so logs must go to stderr.
fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

async fn run(cli: Cli) -> Result<Vec<SlideRecord>> {
    let bytes = if cli.s3 {
        let mut config = S3Config::default();
        if let Some(bucket) = cli.bucket {
            config.bucket = bucket;
        }
        if cli.endpoint.is_some() {
            config.endpoint = cli.endpoint;
        }
        let fetcher = S3DocumentFetcher::new(config)?;
        fetcher
            .fetch(&cli.input)
            .await
            .with_context(|| format!("Failed to fetch {}", cli.input))?
    } else {
        tokio::fs::read(&cli.input)
            .await
            .with_context(|| format!("Failed to read {}", cli.input))?
    };

    let tessdata = cli.tessdata;
    let skip_ocr = cli.no_ocr;

    // Parsing and OCR are CPU-bound; keep them off the async runtime.
    tokio::task::spawn_blocking(move || -> Result<Vec<SlideRecord>> {
        let mut recognizer = if skip_ocr {
            None
        } else {
            match TesseractRecognizer::new(tessdata.as_deref()) {
                Ok(engine) => Some(engine),
                Err(e) => {
                    warn!("OCR unavailable, continuing without recognition: {e}");
                    None
                }
            }
        };

        let engine = recognizer
            .as_mut()
            .map(|r| r as &mut dyn TextRecognizer);
        let records = PptxExtractor::new().extract(Cursor::new(bytes), engine)?;
        Ok(records)
    })
    .await
    .context("Extraction task failed")?
}
