use super::{check_feature_names, first_non_finite, FeatureScaler, SchemaDrift, ShapeMismatch};
use crate::prediction::features::{FeatureVector, ScaledFeatureVector};
use serde::Deserialize;
use std::io::Read;
use std::path::{Path, PathBuf};
use tracing::info;

/// Standardisation with per-column mean and scale: `(x - mean) / scale`.
#[derive(Debug, Clone, PartialEq)]
pub struct StandardScaler {
    mean: Vec<f64>,
    scale: Vec<f64>,
}

#[derive(Debug, thiserror::Error)]
pub enum ScalerLoadError {
    #[error("failed to read scaler artifact {path}: {source}", path = .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("scaler artifact is not valid JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("scaler artifact has no parameters")]
    Empty,
    #[error("scaler artifact has {mean} means but {scale} scales")]
    LengthMismatch { mean: usize, scale: usize },
    #[error("scaler parameter {index} is not a finite number")]
    NonFinite { index: usize },
    #[error("scaler scale {index} is zero")]
    ZeroScale { index: usize },
    #[error("scaler artifact was fitted on a different schema: {0}")]
    Schema(#[from] SchemaDrift),
}

#[derive(Debug, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
enum ScalerArtifact {
    StandardScaler {
        #[serde(default)]
        feature_names: Option<Vec<String>>,
        mean: Vec<f64>,
        scale: Vec<f64>,
    },
}

impl StandardScaler {
    pub fn new(mean: Vec<f64>, scale: Vec<f64>) -> Result<Self, ScalerLoadError> {
        if mean.is_empty() {
            return Err(ScalerLoadError::Empty);
        }
        if mean.len() != scale.len() {
            return Err(ScalerLoadError::LengthMismatch {
                mean: mean.len(),
                scale: scale.len(),
            });
        }
        if let Some(index) = first_non_finite(&mean).or_else(|| first_non_finite(&scale)) {
            return Err(ScalerLoadError::NonFinite { index });
        }
        if let Some(index) = scale.iter().position(|value| *value == 0.0) {
            return Err(ScalerLoadError::ZeroScale { index });
        }

        Ok(Self { mean, scale })
    }

    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, ScalerLoadError> {
        let path = path.as_ref();
        let file = std::fs::File::open(path).map_err(|source| ScalerLoadError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let scaler = Self::from_reader(file)?;
        info!(path = %path.display(), columns = scaler.len(), "scaler artifact loaded");
        Ok(scaler)
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Self, ScalerLoadError> {
        let ScalerArtifact::StandardScaler {
            feature_names,
            mean,
            scale,
        } = serde_json::from_reader(reader)?;

        if let Some(names) = feature_names {
            check_feature_names(&names)?;
        }

        Self::new(mean, scale)
    }

    /// Number of fitted columns.
    pub fn len(&self) -> usize {
        self.mean.len()
    }

    pub fn is_empty(&self) -> bool {
        self.mean.is_empty()
    }
}

impl FeatureScaler for StandardScaler {
    fn transform(&self, features: &FeatureVector) -> Result<ScaledFeatureVector, ShapeMismatch> {
        let values = features.as_slice();
        if values.len() != self.len() {
            return Err(ShapeMismatch {
                stage: "scaler",
                expected: self.len(),
                found: values.len(),
            });
        }

        let scaled = values
            .iter()
            .zip(self.mean.iter().zip(&self.scale))
            .map(|(value, (mean, scale))| (value - mean) / scale)
            .collect();

        Ok(ScaledFeatureVector::new(scaled))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_unknown_artifact_kind() {
        let json = r#"{"kind":"min_max_scaler","mean":[0.0],"scale":[1.0]}"#;
        match StandardScaler::from_reader(json.as_bytes()) {
            Err(ScalerLoadError::Parse(_)) => {}
            other => panic!("expected parse error, got {other:?}"),
        }
    }

    #[test]
    fn rejects_mismatched_parameter_lengths() {
        let json = r#"{"kind":"standard_scaler","mean":[0.0,1.0],"scale":[1.0]}"#;
        match StandardScaler::from_reader(json.as_bytes()) {
            Err(ScalerLoadError::LengthMismatch { mean: 2, scale: 1 }) => {}
            other => panic!("expected length mismatch, got {other:?}"),
        }
    }

    #[test]
    fn rejects_zero_scale() {
        match StandardScaler::new(vec![0.0, 0.0], vec![1.0, 0.0]) {
            Err(ScalerLoadError::ZeroScale { index: 1 }) => {}
            other => panic!("expected zero scale error, got {other:?}"),
        }
    }

    #[test]
    fn rejects_empty_parameters() {
        assert!(matches!(
            StandardScaler::new(Vec::new(), Vec::new()),
            Err(ScalerLoadError::Empty)
        ));
    }

    #[test]
    fn rejects_feature_names_out_of_order() {
        let json = r#"{
            "kind": "standard_scaler",
            "feature_names": ["Sex","Age","ChestPainType","RestingBP","Cholesterol","FastingBS",
                              "RestingECG","MaxHR","ExerciseAngina","Oldpeak","ST_Slope"],
            "mean": [0,0,0,0,0,0,0,0,0,0,0],
            "scale": [1,1,1,1,1,1,1,1,1,1,1]
        }"#;
        match StandardScaler::from_reader(json.as_bytes()) {
            Err(ScalerLoadError::Schema(SchemaDrift::Column { position: 0, .. })) => {}
            other => panic!("expected schema drift, got {other:?}"),
        }
    }

    #[test]
    fn missing_file_reports_path() {
        let err = StandardScaler::from_path("./does-not-exist.json").expect_err("io error");
        match &err {
            ScalerLoadError::Io { path, .. } => {
                assert_eq!(path, Path::new("./does-not-exist.json"));
            }
            other => panic!("expected io error, got {other:?}"),
        }
        assert!(err.to_string().contains("does-not-exist.json"));
    }
}
