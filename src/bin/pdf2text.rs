//! CLI binary for vision-pdf2text.
//!
//! A thin shim over the library crate that maps CLI flags to
//! `ExtractionConfig` and prints each page's text as it streams in.

use anyhow::{Context, Result};
use clap::Parser;
use futures::StreamExt;
use std::io::{self, Write};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;
use vision_pdf2text::{extract_stream, save_page_images, ExtractionConfig};

const AFTER_HELP: &str = r#"EXAMPLES:
  # Basic extraction (stdout, one block per page)
  pdf2text document.pdf

  # Explicit key and model
  pdf2text --api-key sk-... --model gpt-4o document.pdf

  # Any OpenAI-compatible endpoint (Ollama, vLLM, LiteLLM, ...)
  pdf2text --base-url http://localhost:11434/v1 --model llava document.pdf

  # Save page PNGs alongside the extraction
  pdf2text --save-images images/ document.pdf

  # Only rasterise, no model call (no API key needed)
  pdf2text --save-images images/ --no-extract document.pdf

ENVIRONMENT VARIABLES:
  OPENAI_API_KEY    API key (used when --api-key is not given)
  OPENAI_BASE_URL   Endpoint root (default: https://api.openai.com/v1)
  OPENAI_MODEL      Model ID (default: gpt-4o-mini)

Each page is rendered, sent to the model, and printed before the next page
is touched, so output appears progressively. Any failure stops the run;
pages already printed remain the only output.
"#;

/// Extract per-page text from a PDF using a vision language model.
#[derive(Parser, Debug)]
#[command(
    name = "pdf2text",
    version,
    about = "Extract per-page text from a PDF using a vision language model",
    arg_required_else_help = true,
    after_long_help = AFTER_HELP
)]
struct Cli {
    /// Path to the PDF file.
    pdf_path: PathBuf,

    /// API key (falls back to OPENAI_API_KEY).
    #[arg(long, env = "OPENAI_API_KEY", hide_env_values = true)]
    api_key: Option<String>,

    /// Endpoint root, e.g. https://api.openai.com/v1 (falls back to OPENAI_BASE_URL).
    #[arg(long, env = "OPENAI_BASE_URL")]
    base_url: Option<String>,

    /// Vision model ID, e.g. gpt-4o-mini (falls back to OPENAI_MODEL).
    #[arg(long, env = "OPENAI_MODEL")]
    model: Option<String>,

    /// Also render each page to page_N.png in this directory.
    #[arg(long, value_name = "DIR")]
    save_images: Option<PathBuf>,

    /// Skip the model call entirely (requires --save-images).
    #[arg(long, requires = "save_images")]
    no_extract: bool,

    /// Enable DEBUG-level tracing logs.
    #[arg(short, long)]
    verbose: bool,

    /// Suppress everything except page text and errors.
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // ── Logging setup ────────────────────────────────────────────────────
    let filter = if cli.verbose {
        "debug"
    } else if cli.quiet {
        "error"
    } else {
        "warn"
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
        )
        .with_writer(io::stderr)
        .init();

    // ── Optional image-saving mode ───────────────────────────────────────
    if let Some(ref dir) = cli.save_images {
        let count = save_page_images(&cli.pdf_path, dir)
            .await
            .context("Failed to save page images")?;
        if !cli.quiet {
            eprintln!("Saved {} page images to {}", count, dir.display());
        }
        if cli.no_extract {
            return Ok(());
        }
    }

    // ── Build config ─────────────────────────────────────────────────────
    // clap's `env =` attributes already applied the environment fallback,
    // so these land in the config as "explicit" values; the library's own
    // env fallback only kicks in for library users.
    let config = ExtractionConfig {
        api_key: cli.api_key,
        base_url: cli.base_url,
        model: cli.model,
        extractor: None,
    };

    // ── Run extraction, printing pages as they arrive ────────────────────
    let mut pages = extract_stream(&cli.pdf_path, &config)
        .await
        .context("Extraction failed")?;

    let stdout = io::stdout();
    let mut out = stdout.lock();
    let mut count = 0usize;

    while let Some(page) = pages.next().await {
        let page = page.context("Extraction failed")?;
        writeln!(out, "Page {} Text:\n{}\n", page.page_num, page.text)
            .context("Failed to write to stdout")?;
        out.flush().ok();
        count += 1;
    }

    if !cli.quiet {
        eprintln!("Extracted {} pages.", count);
    }

    Ok(())
}
