//! CSV scoring of many patient forms, one independent assessment per row.

use super::artifacts::{FeatureScaler, ProbabilityModel, ShapeMismatch};
use super::bucket::RiskTier;
use super::form::PatientForm;
use super::pipeline::{PredictionError, RiskPipeline};
use serde::Serialize;
use std::io::{Read, Write};
use std::path::Path;
use tracing::{info, warn};

#[derive(Debug, thiserror::Error)]
pub enum BatchError {
    #[error("failed to read patient batch: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid patient CSV data: {0}")]
    Csv(#[from] csv::Error),
    #[error("batch aborted at row {row}: {source}")]
    Shape {
        row: usize,
        #[source]
        source: ShapeMismatch,
    },
}

/// Result for one data row; `row` counts from 1, excluding the header.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BatchRow {
    pub row: usize,
    #[serde(flatten)]
    pub outcome: BatchOutcome,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum BatchOutcome {
    Assessed { probability: f64, tier: RiskTier },
    Rejected { error: String },
}

pub struct BatchScorer;

impl BatchScorer {
    pub fn from_path<P, S, M>(
        pipeline: &RiskPipeline<S, M>,
        path: P,
    ) -> Result<Vec<BatchRow>, BatchError>
    where
        P: AsRef<Path>,
        S: FeatureScaler,
        M: ProbabilityModel,
    {
        let file = std::fs::File::open(path)?;
        Self::from_reader(pipeline, file)
    }

    /// Rows with bad input are reported as rejected and scoring continues. A shape
    /// mismatch would repeat on every row, so it aborts the batch.
    pub fn from_reader<R, S, M>(
        pipeline: &RiskPipeline<S, M>,
        reader: R,
    ) -> Result<Vec<BatchRow>, BatchError>
    where
        R: Read,
        S: FeatureScaler,
        M: ProbabilityModel,
    {
        let mut csv_reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(reader);
        let mut rows = Vec::new();

        for (index, record) in csv_reader.deserialize::<PatientForm>().enumerate() {
            let row = index + 1;
            let outcome = match record {
                Ok(form) => match pipeline.assess_form(form) {
                    Ok(assessment) => BatchOutcome::Assessed {
                        probability: assessment.probability(),
                        tier: assessment.tier(),
                    },
                    Err(PredictionError::ShapeMismatch(source)) => {
                        return Err(BatchError::Shape { row, source });
                    }
                    Err(err) => rejected(row, err.to_string()),
                },
                Err(err) if err.is_io_error() => return Err(err.into()),
                Err(err) => rejected(row, err.to_string()),
            };
            rows.push(BatchRow { row, outcome });
        }

        let assessed = rows
            .iter()
            .filter(|row| matches!(row.outcome, BatchOutcome::Assessed { .. }))
            .count();
        info!(rows = rows.len(), assessed, "patient batch scored");

        Ok(rows)
    }
}

fn rejected(row: usize, error: String) -> BatchOutcome {
    warn!(row, %error, "patient row rejected");
    BatchOutcome::Rejected { error }
}

/// Writes `row,probability,tier,error` records.
pub fn write_csv<W: Write>(rows: &[BatchRow], writer: W) -> Result<(), BatchError> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    csv_writer.write_record(["row", "probability", "tier", "error"])?;

    for row in rows {
        let index = row.row.to_string();
        match &row.outcome {
            BatchOutcome::Assessed { probability, tier } => {
                let probability = format!("{probability:.4}");
                csv_writer.write_record([
                    index.as_str(),
                    probability.as_str(),
                    tier.label(),
                    "",
                ])?;
            }
            BatchOutcome::Rejected { error } => {
                csv_writer.write_record([index.as_str(), "", "", error.as_str()])?;
            }
        }
    }

    csv_writer.flush()?;
    Ok(())
}
