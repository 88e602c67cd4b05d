use super::{check_feature_names, first_non_finite, ProbabilityModel, SchemaDrift, ShapeMismatch};
use crate::prediction::features::ScaledFeatureVector;
use serde::Deserialize;
use std::io::Read;
use std::path::{Path, PathBuf};
use tracing::info;

/// Binary logistic regression: `sigmoid(intercept + coefficients · x)`.
#[derive(Debug, Clone, PartialEq)]
pub struct LogisticRegression {
    coefficients: Vec<f64>,
    intercept: f64,
}

#[derive(Debug, thiserror::Error)]
pub enum ModelLoadError {
    #[error("failed to read model artifact {path}: {source}", path = .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("model artifact is not valid JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("model artifact has no coefficients")]
    Empty,
    #[error("model coefficient {index} is not a finite number")]
    NonFiniteCoefficient { index: usize },
    #[error("model intercept is not a finite number")]
    NonFiniteIntercept,
    #[error("model artifact was fitted on a different schema: {0}")]
    Schema(#[from] SchemaDrift),
}

#[derive(Debug, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
enum ModelArtifact {
    LogisticRegression {
        #[serde(default)]
        feature_names: Option<Vec<String>>,
        coefficients: Vec<f64>,
        intercept: f64,
    },
}

impl LogisticRegression {
    pub fn new(coefficients: Vec<f64>, intercept: f64) -> Result<Self, ModelLoadError> {
        if coefficients.is_empty() {
            return Err(ModelLoadError::Empty);
        }
        if let Some(index) = first_non_finite(&coefficients) {
            return Err(ModelLoadError::NonFiniteCoefficient { index });
        }
        if !intercept.is_finite() {
            return Err(ModelLoadError::NonFiniteIntercept);
        }

        Ok(Self {
            coefficients,
            intercept,
        })
    }

    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, ModelLoadError> {
        let path = path.as_ref();
        let file = std::fs::File::open(path).map_err(|source| ModelLoadError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let model = Self::from_reader(file)?;
        info!(path = %path.display(), coefficients = model.coefficients.len(), "model artifact loaded");
        Ok(model)
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Self, ModelLoadError> {
        let ModelArtifact::LogisticRegression {
            feature_names,
            coefficients,
            intercept,
        } = serde_json::from_reader(reader)?;

        if let Some(names) = feature_names {
            check_feature_names(&names)?;
        }

        Self::new(coefficients, intercept)
    }

    pub fn coefficients(&self) -> &[f64] {
        &self.coefficients
    }

    pub fn intercept(&self) -> f64 {
        self.intercept
    }
}

impl ProbabilityModel for LogisticRegression {
    fn predict_probability(&self, features: &ScaledFeatureVector) -> Result<f64, ShapeMismatch> {
        let values = features.as_slice();
        if values.len() != self.coefficients.len() {
            return Err(ShapeMismatch {
                stage: "classifier",
                expected: self.coefficients.len(),
                found: values.len(),
            });
        }

        let logit = self.intercept
            + values
                .iter()
                .zip(&self.coefficients)
                .map(|(value, coefficient)| value * coefficient)
                .sum::<f64>();

        Ok(sigmoid(logit))
    }
}

fn sigmoid(logit: f64) -> f64 {
    if logit >= 0.0 {
        1.0 / (1.0 + (-logit).exp())
    } else {
        let exp = logit.exp();
        exp / (1.0 + exp)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sigmoid_is_symmetric_and_bounded() {
        assert_eq!(sigmoid(0.0), 0.5);
        assert!((sigmoid(2.0) + sigmoid(-2.0) - 1.0).abs() < 1e-12);
        assert_eq!(sigmoid(1_000.0), 1.0);
        assert_eq!(sigmoid(-1_000.0), 0.0);
    }

    #[test]
    fn zero_coefficients_yield_sigmoid_of_intercept() {
        let model = LogisticRegression::new(vec![0.0; 3], 0.0).expect("valid model");
        let probability = model
            .predict_probability(&ScaledFeatureVector::new(vec![4.0, -2.0, 9.0]))
            .expect("shape matches");
        assert_eq!(probability, 0.5);
    }

    #[test]
    fn wrong_length_is_a_shape_mismatch() {
        let model = LogisticRegression::new(vec![1.0; 11], 0.0).expect("valid model");
        let err = model
            .predict_probability(&ScaledFeatureVector::new(vec![0.0; 10]))
            .expect_err("length mismatch");
        assert_eq!(
            err,
            ShapeMismatch {
                stage: "classifier",
                expected: 11,
                found: 10
            }
        );
    }

    #[test]
    fn rejects_non_finite_intercept() {
        assert!(matches!(
            LogisticRegression::new(vec![1.0], f64::INFINITY),
            Err(ModelLoadError::NonFiniteIntercept)
        ));
    }

    #[test]
    fn rejects_unknown_model_kind() {
        let json = r#"{"kind":"random_forest","coefficients":[1.0],"intercept":0.0}"#;
        assert!(matches!(
            LogisticRegression::from_reader(json.as_bytes()),
            Err(ModelLoadError::Parse(_))
        ));
    }

    #[test]
    fn missing_file_is_an_io_error() {
        assert!(matches!(
            LogisticRegression::from_path("./does-not-exist.json"),
            Err(ModelLoadError::Io { .. })
        ));
    }
}
