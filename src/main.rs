//! Publisher binary that frames story text into barcode-ready wire files.
//!
//! Reads a page's text, splits it under the byte budget, and writes one
//! wire-text file per fragment plus a JSON summary describing the run.
//! Rendering the actual barcode images is the image codec's job, not this
//! tool's.

mod cli;

use std::{fs, num::NonZeroUsize, path::Path, process::ExitCode};

use clap::Parser;
use pageframe::{FramingError, Fragmenter, InvalidPageId, PageId, encode_wire, wire_len};
use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Error)]
enum PublishError {
    #[error("either --input or --text must be provided")]
    MissingInput,
    #[error("byte budget must be greater than zero")]
    ZeroBudget,
    #[error("invalid page id: {0}")]
    PageId(#[from] InvalidPageId),
    #[error(transparent)]
    Framing(#[from] FramingError),
    #[error("failed to render summary: {0}")]
    Summary(#[from] serde_json::Error),
    #[error("{path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },
}

/// Manifest written next to the generated wire files.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct Summary<'a> {
    page_id: &'a str,
    text_chars: usize,
    text_bytes: usize,
    chunked: bool,
    fragment_count: usize,
    byte_budget: usize,
}

fn main() -> ExitCode {
    // The binary installs the subscriber; the library only emits `log`
    // records.
    tracing_subscriber::fmt::init();

    let cli = cli::Cli::parse();
    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &cli::Cli) -> Result<(), PublishError> {
    let text = load_text(cli)?;
    let page_id = PageId::new(cli.page_id.as_str())?;
    let byte_budget = NonZeroUsize::new(cli.byte_budget).ok_or(PublishError::ZeroBudget)?;

    let batch = Fragmenter::new(byte_budget).encode(&text, &page_id)?;

    fs::create_dir_all(&cli.output).map_err(|source| io_error(&cli.output, source))?;

    for fragment in batch.fragments() {
        let filename = cli
            .output
            .join(format!("{page_id}_chunk_{}.txt", fragment.header().index()));
        let wire = encode_wire(fragment);
        fs::write(&filename, &wire).map_err(|source| io_error(&filename, source))?;
        println!(
            "wrote fragment {}/{} ({} bytes): {}",
            fragment.header().index(),
            batch.total(),
            wire_len(fragment),
            filename.display(),
        );
    }

    let summary = Summary {
        page_id: page_id.as_str(),
        text_chars: text.chars().count(),
        text_bytes: text.len(),
        chunked: batch.is_fragmented(),
        fragment_count: batch.len(),
        byte_budget: byte_budget.get(),
    };
    let summary_path = cli.output.join(format!("{page_id}_summary.json"));
    let rendered = serde_json::to_string_pretty(&summary)?;
    fs::write(&summary_path, rendered).map_err(|source| io_error(&summary_path, source))?;
    println!("summary saved: {}", summary_path.display());

    Ok(())
}

fn load_text(cli: &cli::Cli) -> Result<String, PublishError> {
    if let Some(path) = &cli.input {
        return fs::read_to_string(path).map_err(|source| io_error(path, source));
    }
    cli.text.clone().ok_or(PublishError::MissingInput)
}

fn io_error(path: &Path, source: std::io::Error) -> PublishError {
    PublishError::Io {
        path: path.display().to_string(),
        source,
    }
}
