use crate::prediction::ProbabilityPolicy;
use std::env;
use std::fmt;
use std::path::PathBuf;

/// Distinguishes runtime behavior for different stages of the tool.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEnvironment {
    Development,
    Test,
    Production,
}

impl AppEnvironment {
    fn from_str(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "prod" | "production" => Self::Production,
            "test" | "ci" => Self::Test,
            _ => Self::Development,
        }
    }
}

/// Top-level configuration for the application.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub environment: AppEnvironment,
    pub artifacts: ArtifactConfig,
    pub scoring: ScoringConfig,
    pub telemetry: TelemetryConfig,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let environment = AppEnvironment::from_str(
            &env::var("HEART_RISK_ENV").unwrap_or_else(|_| "development".to_string()),
        );

        let model_path = non_empty_path("HEART_RISK_MODEL_PATH", "heart_disease_model.json")?;
        let scaler_path = non_empty_path("HEART_RISK_SCALER_PATH", "scaler.json")?;

        let raw_policy =
            env::var("HEART_RISK_PROBABILITY_POLICY").unwrap_or_else(|_| "clamp".to_string());
        let probability_policy = ProbabilityPolicy::parse(&raw_policy)
            .ok_or(ConfigError::InvalidProbabilityPolicy { value: raw_policy })?;

        let log_level = env::var("HEART_RISK_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        Ok(Self {
            environment,
            artifacts: ArtifactConfig {
                model_path,
                scaler_path,
            },
            scoring: ScoringConfig { probability_policy },
            telemetry: TelemetryConfig { log_level },
        })
    }
}

fn non_empty_path(key: &'static str, default: &str) -> Result<PathBuf, ConfigError> {
    match env::var(key) {
        Ok(value) if value.trim().is_empty() => Err(ConfigError::EmptyPath { key }),
        Ok(value) => Ok(PathBuf::from(value.trim())),
        Err(_) => Ok(PathBuf::from(default)),
    }
}

/// Locations of the persisted training artifacts.
#[derive(Debug, Clone)]
pub struct ArtifactConfig {
    pub model_path: PathBuf,
    pub scaler_path: PathBuf,
}

/// Controls applied to classifier output.
#[derive(Debug, Clone)]
pub struct ScoringConfig {
    pub probability_policy: ProbabilityPolicy,
}

/// Tracing controls.
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    pub log_level: String,
}

#[derive(Debug)]
pub enum ConfigError {
    EmptyPath { key: &'static str },
    InvalidProbabilityPolicy { value: String },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::EmptyPath { key } => write!(f, "{key} must not be empty"),
            ConfigError::InvalidProbabilityPolicy { value } => write!(
                f,
                "HEART_RISK_PROBABILITY_POLICY must be 'clamp' or 'reject' (found '{value}')"
            ),
        }
    }
}

impl std::error::Error for ConfigError {}
