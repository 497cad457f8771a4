//! Aspect/opinion decoding tool
//!
//! Reads JSON lines holding a text and the per-character tags predicted for
//! it, and writes the decoded aspect groups either as JSON lines or in the
//! `aspect: .., opinions: .., sentiment_polarity: ..` console format.

use std::fs::File;
use std::io::{self, BufRead, BufReader, BufWriter, Write};
use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use aspectra_core::sentiment::results_from_groups;
use aspectra_core::{DecoderConfig, LabelMap, SentimentResult, SpanDecoder};
use clap::{Parser, ValueEnum};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};
use tracing_subscriber::EnvFilter;

/// CLI arguments
#[derive(Parser)]
#[command(name = "aspectra-decode")]
#[command(about = "Decode aspect and opinion spans from tagged text")]
#[command(version)]
struct Cli {
    /// JSON-lines input file (stdin when omitted)
    #[arg(short, long)]
    input: Option<PathBuf>,

    /// Label dictionary, one label per line; required for `tag_ids` records
    #[arg(short, long, env = "ASPECTRA_LABEL_PATH")]
    label_path: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Json)]
    format: OutputFormat,

    /// Trim the text and drop spaces before decoding
    #[arg(short, long)]
    normalize: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    /// One JSON object per input line
    Json,
    /// Human-readable lines, one per aspect
    Text,
}

/// One input record.
#[derive(Debug, Deserialize)]
struct DecodeInput {
    text: String,
    #[serde(default)]
    tags: Option<Vec<String>>,
    #[serde(default)]
    tag_ids: Option<Vec<usize>>,
}

/// One output record.
#[derive(Debug, Serialize)]
struct DecodeOutput {
    text: String,
    results: Vec<SentimentResult>,
    error: Option<String>,
}

fn decode_record(
    decoder: &SpanDecoder,
    labels: Option<&LabelMap>,
    record: &DecodeInput,
) -> Result<Vec<SentimentResult>> {
    let groups = match (&record.tags, &record.tag_ids) {
        (Some(tags), _) => decoder.decode(&record.text, tags)?,
        (None, Some(ids)) => {
            let labels = labels.context("record has tag_ids but no --label-path was given")?;
            decoder.decode_ids(&record.text, ids, labels)?
        }
        (None, None) => bail!("record has neither tags nor tag_ids"),
    };
    Ok(results_from_groups(&groups))
}

fn process_line(decoder: &SpanDecoder, labels: Option<&LabelMap>, line: &str) -> DecodeOutput {
    let record: DecodeInput = match serde_json::from_str(line) {
        Ok(record) => record,
        Err(e) => {
            return DecodeOutput {
                text: line.to_string(),
                results: Vec::new(),
                error: Some(format!("invalid record: {e}")),
            };
        }
    };

    match decode_record(decoder, labels, &record) {
        Ok(results) => DecodeOutput {
            text: record.text,
            results,
            error: None,
        },
        Err(e) => DecodeOutput {
            text: record.text,
            results: Vec::new(),
            error: Some(format!("{e:#}")),
        },
    }
}

fn write_output<W: Write>(out: &mut W, output: &DecodeOutput, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Json => {
            serde_json::to_writer(&mut *out, output)?;
            writeln!(out)?;
        }
        OutputFormat::Text => {
            if let Some(ref error) = output.error {
                writeln!(out, "error: {error}")?;
            }
            for result in &output.results {
                writeln!(out, "{result}")?;
            }
            writeln!(out)?;
        }
    }
    Ok(())
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();

    let labels = match cli.label_path {
        Some(ref path) => {
            let labels = LabelMap::from_file(path)
                .with_context(|| format!("failed to load label dict {}", path.display()))?;
            info!(num_labels = labels.len(), "label dict loaded");
            Some(labels)
        }
        None => None,
    };

    let decoder = SpanDecoder::new(DecoderConfig::new().with_normalize_input(cli.normalize));

    let reader: Box<dyn BufRead> = match cli.input {
        Some(ref path) => Box::new(BufReader::new(
            File::open(path).with_context(|| format!("failed to open {}", path.display()))?,
        )),
        None => Box::new(BufReader::new(io::stdin())),
    };

    let stdout = io::stdout();
    let mut out = BufWriter::new(stdout.lock());
    let mut processed = 0usize;
    let mut failed = 0usize;

    for line in reader.lines() {
        let line = line.context("failed to read input")?;
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        let output = process_line(&decoder, labels.as_ref(), line);
        if let Some(ref error) = output.error {
            warn!(text = %output.text, %error, "record rejected");
            failed += 1;
        } else {
            debug!(text = %output.text, groups = output.results.len(), "record decoded");
        }
        processed += 1;

        write_output(&mut out, &output, cli.format)?;
    }

    out.flush()?;
    info!(processed, failed, "done");
    Ok(())
}
