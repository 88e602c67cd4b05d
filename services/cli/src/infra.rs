use heart_risk::config::AppConfig;
use heart_risk::error::AppError;
use heart_risk::prediction::ArtifactPipeline;
use heart_risk::telemetry;
use std::path::PathBuf;
use tracing::info;

#[derive(Debug, Default)]
pub(crate) struct ArtifactOverrides {
    pub(crate) model: Option<PathBuf>,
    pub(crate) scaler: Option<PathBuf>,
}

/// Loads configuration, installs logging and loads both artifacts. Any failure
/// here stops the process before a single patient is assessed.
pub(crate) fn load_pipeline(mut overrides: ArtifactOverrides) -> Result<ArtifactPipeline, AppError> {
    let mut config = AppConfig::load()?;

    if let Some(model) = overrides.model.take() {
        config.artifacts.model_path = model;
    }
    if let Some(scaler) = overrides.scaler.take() {
        config.artifacts.scaler_path = scaler;
    }

    telemetry::init(&config.telemetry)?;
    info!(
        environment = ?config.environment,
        policy = ?config.scoring.probability_policy,
        "heart-risk starting"
    );

    let pipeline = ArtifactPipeline::load(
        &config.artifacts.scaler_path,
        &config.artifacts.model_path,
        config.scoring.probability_policy,
    )?;

    Ok(pipeline)
}
