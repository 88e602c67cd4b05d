//! Heart disease risk prediction: encode → assemble → scale → classify → bucket.

pub mod artifacts;
pub mod batch;
mod bucket;
mod domain;
pub mod encoding;
mod features;
mod form;
mod normalizer;
mod pipeline;
pub mod report;

#[cfg(test)]
mod tests;

pub use artifacts::{
    ArtifactError, FeatureScaler, LogisticRegression, ModelLoadError, ProbabilityModel,
    ScalerLoadError, SchemaDrift, ShapeMismatch, StandardScaler,
};
pub use batch::{BatchError, BatchOutcome, BatchRow, BatchScorer};
pub use bucket::{
    bucket, Probability, ProbabilityOutOfRange, ProbabilityPolicy, RiskTier, HIGH_RISK_FLOOR,
    LOW_RISK_CEILING,
};
pub use domain::{
    InputError, NumericRange, PatientInput, PatientInputBuilder, AGE_RANGE, CHOLESTEROL_RANGE,
    MAX_HR_RANGE, OLDPEAK_RANGE, RESTING_BP_RANGE,
};
pub use encoding::{
    Categorical, ChestPainType, ExerciseAngina, FastingBloodSugar, RestingEcg, Sex, StSlope,
};
pub use features::{assemble, FeatureColumn, FeatureVector, ScaledFeatureVector, FEATURE_COUNT};
pub use form::PatientForm;
pub use pipeline::{
    ArtifactPipeline, PredictionError, ProbabilityChart, RiskAssessment, RiskPipeline,
};
