use chrono::{DateTime, Utc};
use clap::{Args, ValueEnum};
use heart_risk::error::AppError;
use heart_risk::prediction::batch::write_csv;
use heart_risk::prediction::{ArtifactPipeline, BatchRow, BatchScorer};
use serde::Serialize;
use std::io::{self, Write};
use std::path::PathBuf;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub(crate) enum BatchFormat {
    #[default]
    Csv,
    Json,
}

#[derive(Args, Debug)]
pub(crate) struct BatchArgs {
    /// Patient CSV with training column names or snake_case headers
    #[arg(long)]
    pub(crate) input: PathBuf,
    /// Output format
    #[arg(long, value_enum, default_value_t = BatchFormat::Csv)]
    pub(crate) format: BatchFormat,
}

#[derive(Debug, Serialize)]
struct BatchEnvelope<'a> {
    scored_at: DateTime<Utc>,
    input: String,
    rows: &'a [BatchRow],
}

pub(crate) fn run_batch(args: BatchArgs, pipeline: &ArtifactPipeline) -> Result<(), AppError> {
    let rows = BatchScorer::from_path(pipeline, &args.input)?;

    let stdout = io::stdout();
    let mut out = stdout.lock();
    match args.format {
        BatchFormat::Csv => write_csv(&rows, &mut out)?,
        BatchFormat::Json => {
            let envelope = BatchEnvelope {
                scored_at: Utc::now(),
                input: args.input.display().to_string(),
                rows: &rows,
            };
            serde_json::to_writer_pretty(&mut out, &envelope)?;
            writeln!(out)?;
        }
    }

    Ok(())
}
