use super::artifacts::{
    ArtifactError, FeatureScaler, LogisticRegression, ProbabilityModel, ShapeMismatch,
    StandardScaler,
};
use super::bucket::{bucket, Probability, ProbabilityOutOfRange, ProbabilityPolicy, RiskTier};
use super::domain::{InputError, PatientInput};
use super::features::{assemble, FeatureVector};
use super::form::PatientForm;
use serde::Serialize;
use std::path::Path;
use std::sync::Arc;
use tracing::{debug, error};

/// Probability of heart disease and the tier it falls in.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RiskAssessment {
    probability: Probability,
    tier: RiskTier,
}

impl RiskAssessment {
    pub fn from_probability(probability: Probability) -> Self {
        Self {
            probability,
            tier: bucket(probability),
        }
    }

    pub fn probability(&self) -> f64 {
        self.probability.value()
    }

    pub fn tier(&self) -> RiskTier {
        self.tier
    }

    /// Values for the two-bar chart.
    pub fn chart(&self) -> ProbabilityChart {
        ProbabilityChart {
            no_disease: self.probability.complement(),
            disease: self.probability.value(),
        }
    }
}

/// `{1 - p, p}` split rendered as "No Disease" / "Heart Disease" bars.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ProbabilityChart {
    pub no_disease: f64,
    pub disease: f64,
}

/// Failure of a single prediction. Never affects other predictions.
#[derive(Debug, thiserror::Error)]
pub enum PredictionError {
    #[error(transparent)]
    Input(#[from] InputError),
    #[error("feature layout disagrees with the fitted artifacts: {0}")]
    ShapeMismatch(#[from] ShapeMismatch),
    #[error(transparent)]
    ProbabilityOutOfRange(#[from] ProbabilityOutOfRange),
}

/// Encode → assemble → scale → classify → bucket, over injected artifacts.
///
/// The scaler and model are loaded once and shared read-only; each call to
/// [`RiskPipeline::assess`] is independent of every other call.
pub struct RiskPipeline<S, M> {
    scaler: Arc<S>,
    model: Arc<M>,
    policy: ProbabilityPolicy,
}

impl<S, M> Clone for RiskPipeline<S, M> {
    fn clone(&self) -> Self {
        Self {
            scaler: Arc::clone(&self.scaler),
            model: Arc::clone(&self.model),
            policy: self.policy,
        }
    }
}

/// Pipeline over the JSON artifacts produced by the training process.
pub type ArtifactPipeline = RiskPipeline<StandardScaler, LogisticRegression>;

impl ArtifactPipeline {
    pub fn load<P, Q>(
        scaler_path: P,
        model_path: Q,
        policy: ProbabilityPolicy,
    ) -> Result<Self, ArtifactError>
    where
        P: AsRef<Path>,
        Q: AsRef<Path>,
    {
        let scaler = StandardScaler::from_path(scaler_path)?;
        let model = LogisticRegression::from_path(model_path)?;
        Ok(Self::new(Arc::new(scaler), Arc::new(model), policy))
    }
}

impl<S, M> RiskPipeline<S, M>
where
    S: FeatureScaler,
    M: ProbabilityModel,
{
    pub fn new(scaler: Arc<S>, model: Arc<M>, policy: ProbabilityPolicy) -> Self {
        Self {
            scaler,
            model,
            policy,
        }
    }

    pub fn policy(&self) -> ProbabilityPolicy {
        self.policy
    }

    pub fn assess(&self, input: &PatientInput) -> Result<RiskAssessment, PredictionError> {
        let features = assemble(input);
        self.assess_features(&features)
    }

    /// Validates an untrusted form before assessing it.
    pub fn assess_form(&self, form: PatientForm) -> Result<RiskAssessment, PredictionError> {
        let input = form.into_input()?;
        self.assess(&input)
    }

    /// Runs the scale → classify → bucket tail on an already assembled vector.
    pub fn assess_features(
        &self,
        features: &FeatureVector,
    ) -> Result<RiskAssessment, PredictionError> {
        let scaled = self.scaler.transform(features).map_err(report_shape)?;
        let raw = self.model.predict_probability(&scaled).map_err(report_shape)?;
        let probability = self.policy.admit(raw)?;
        let assessment = RiskAssessment::from_probability(probability);

        debug!(
            probability = assessment.probability(),
            tier = ?assessment.tier(),
            "risk assessed"
        );

        Ok(assessment)
    }
}

fn report_shape(err: ShapeMismatch) -> ShapeMismatch {
    error!(
        stage = err.stage,
        expected = err.expected,
        found = err.found,
        "feature vector does not match fitted artifact"
    );
    err
}
