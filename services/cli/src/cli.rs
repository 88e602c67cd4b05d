use crate::assess::{run_assess, AssessArgs};
use crate::batch::{run_batch, BatchArgs};
use crate::infra::{load_pipeline, ArtifactOverrides};
use crate::schema::{run_schema, SchemaArgs};
use clap::{Parser, Subcommand};
use heart_risk::error::AppError;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "heart-risk",
    about = "Estimate heart disease risk from clinical measurements",
    version
)]
pub(crate) struct Cli {
    /// Override the configured classifier artifact
    #[arg(long, global = true)]
    pub(crate) model: Option<PathBuf>,
    /// Override the configured scaler artifact
    #[arg(long, global = true)]
    pub(crate) scaler: Option<PathBuf>,
    #[command(subcommand)]
    pub(crate) command: Command,
}

#[derive(Subcommand, Debug)]
pub(crate) enum Command {
    /// Assess a single patient
    Assess(AssessArgs),
    /// Assess every row of a patient CSV file
    Batch(BatchArgs),
    /// Print the feature order and category code tables
    Schema(SchemaArgs),
}

pub(crate) fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let overrides = ArtifactOverrides {
        model: cli.model,
        scaler: cli.scaler,
    };

    match cli.command {
        Command::Assess(args) => {
            let pipeline = load_pipeline(overrides)?;
            run_assess(args, &pipeline)
        }
        Command::Batch(args) => {
            let pipeline = load_pipeline(overrides)?;
            run_batch(args, &pipeline)
        }
        Command::Schema(args) => run_schema(args),
    }
}
