use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use crate::prediction::artifacts::{FeatureScaler, ProbabilityModel, ShapeMismatch};
use crate::prediction::encoding::{
    ChestPainType, ExerciseAngina, FastingBloodSugar, RestingEcg, Sex, StSlope,
};
use crate::prediction::{
    FeatureVector, PatientInput, ProbabilityPolicy, RiskPipeline, ScaledFeatureVector,
};

/// Passes features through unchanged and counts calls.
#[derive(Default)]
pub(super) struct IdentityScaler {
    calls: AtomicUsize,
}

impl IdentityScaler {
    pub(super) fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl FeatureScaler for IdentityScaler {
    fn transform(&self, features: &FeatureVector) -> Result<ScaledFeatureVector, ShapeMismatch> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(ScaledFeatureVector::new(features.as_slice().to_vec()))
    }
}

/// Scaler fitted on a different number of columns.
pub(super) struct NarrowScaler;

impl FeatureScaler for NarrowScaler {
    fn transform(&self, features: &FeatureVector) -> Result<ScaledFeatureVector, ShapeMismatch> {
        Err(ShapeMismatch {
            stage: "scaler",
            expected: 10,
            found: features.as_slice().len(),
        })
    }
}

/// Classifier stub returning the same probability for any input.
pub(super) struct FixedProbability(pub(super) f64);

impl ProbabilityModel for FixedProbability {
    fn predict_probability(&self, _features: &ScaledFeatureVector) -> Result<f64, ShapeMismatch> {
        Ok(self.0)
    }
}

pub(super) fn fixed_pipeline(probability: f64) -> RiskPipeline<IdentityScaler, FixedProbability> {
    RiskPipeline::new(
        Arc::new(IdentityScaler::default()),
        Arc::new(FixedProbability(probability)),
        ProbabilityPolicy::Clamp,
    )
}

pub(super) fn scenario_a_input() -> PatientInput {
    PatientInput::builder()
        .age(50)
        .sex(Sex::Male)
        .chest_pain_type(ChestPainType::Asymptomatic)
        .resting_bp(120)
        .cholesterol(200)
        .fasting_bs(FastingBloodSugar::No)
        .resting_ecg(RestingEcg::Normal)
        .max_hr(150)
        .exercise_angina(ExerciseAngina::No)
        .oldpeak(1.0)
        .st_slope(StSlope::Flat)
        .build()
        .expect("scenario A input is valid")
}
