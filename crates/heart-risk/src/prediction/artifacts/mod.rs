//! Adapters over the externally trained scaler and classifier.
//!
//! The pipeline only depends on [`FeatureScaler`] and [`ProbabilityModel`]; the JSON
//! loaders here are the concrete artifacts the command line uses.

mod logistic;
mod scaler;

pub use logistic::{LogisticRegression, ModelLoadError};
pub use scaler::{ScalerLoadError, StandardScaler};

use super::features::{FeatureColumn, FeatureVector, ScaledFeatureVector, FEATURE_COUNT};

/// Affine per-column normalisation fitted alongside the classifier.
pub trait FeatureScaler: Send + Sync {
    fn transform(&self, features: &FeatureVector) -> Result<ScaledFeatureVector, ShapeMismatch>;
}

/// Probabilistic binary classifier; returns the probability of heart disease.
pub trait ProbabilityModel: Send + Sync {
    fn predict_probability(&self, features: &ScaledFeatureVector) -> Result<f64, ShapeMismatch>;
}

/// Vector length disagrees with the number of fitted parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("{stage} expected {expected} features but received {found}")]
pub struct ShapeMismatch {
    pub stage: &'static str,
    pub expected: usize,
    pub found: usize,
}

/// Artifact column names that disagree with [`FeatureColumn::ordered`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SchemaDrift {
    #[error("artifact lists {found} feature names but the schema has {expected}")]
    Length { expected: usize, found: usize },
    #[error("column {position} is '{found}' but the schema expects '{expected}'")]
    Column {
        position: usize,
        expected: &'static str,
        found: String,
    },
}

/// Either artifact failing to load. Both are fatal at startup.
#[derive(Debug, thiserror::Error)]
pub enum ArtifactError {
    #[error(transparent)]
    Scaler(#[from] ScalerLoadError),
    #[error(transparent)]
    Model(#[from] ModelLoadError),
}

pub(crate) fn check_feature_names(names: &[String]) -> Result<(), SchemaDrift> {
    if names.len() != FEATURE_COUNT {
        return Err(SchemaDrift::Length {
            expected: FEATURE_COUNT,
            found: names.len(),
        });
    }

    for (position, (column, name)) in FeatureColumn::ordered().iter().zip(names).enumerate() {
        if column.name() != name.trim() {
            return Err(SchemaDrift::Column {
                position,
                expected: column.name(),
                found: name.clone(),
            });
        }
    }

    Ok(())
}

pub(crate) fn first_non_finite(values: &[f64]) -> Option<usize> {
    values.iter().position(|value| !value.is_finite())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn schema_names() -> Vec<String> {
        FeatureColumn::ordered()
            .iter()
            .map(|column| column.name().to_string())
            .collect()
    }

    #[test]
    fn schema_names_are_accepted() {
        assert!(check_feature_names(&schema_names()).is_ok());
    }

    #[test]
    fn swapped_columns_are_reported() {
        let mut names = schema_names();
        names.swap(3, 4);
        match check_feature_names(&names) {
            Err(SchemaDrift::Column {
                position,
                expected,
                found,
            }) => {
                assert_eq!(position, 3);
                assert_eq!(expected, "RestingBP");
                assert_eq!(found, "Cholesterol");
            }
            other => panic!("expected column drift, got {other:?}"),
        }
    }

    #[test]
    fn short_name_lists_are_reported() {
        let mut names = schema_names();
        names.pop();
        assert_eq!(
            check_feature_names(&names),
            Err(SchemaDrift::Length {
                expected: 11,
                found: 10
            })
        );
    }
}
