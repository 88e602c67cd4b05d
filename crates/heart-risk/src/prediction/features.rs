use super::domain::PatientInput;
use super::encoding::Categorical;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Number of model input columns.
pub const FEATURE_COUNT: usize = 11;

/// Model input columns, named exactly as the training frame named them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum FeatureColumn {
    Age,
    Sex,
    ChestPainType,
    RestingBp,
    Cholesterol,
    FastingBs,
    RestingEcg,
    MaxHr,
    ExerciseAngina,
    Oldpeak,
    StSlope,
}

impl FeatureColumn {
    /// Column order the scaler and classifier were fitted with.
    pub const fn ordered() -> [Self; FEATURE_COUNT] {
        [
            Self::Age,
            Self::Sex,
            Self::ChestPainType,
            Self::RestingBp,
            Self::Cholesterol,
            Self::FastingBs,
            Self::RestingEcg,
            Self::MaxHr,
            Self::ExerciseAngina,
            Self::Oldpeak,
            Self::StSlope,
        ]
    }

    pub const fn index(self) -> usize {
        match self {
            Self::Age => 0,
            Self::Sex => 1,
            Self::ChestPainType => 2,
            Self::RestingBp => 3,
            Self::Cholesterol => 4,
            Self::FastingBs => 5,
            Self::RestingEcg => 6,
            Self::MaxHr => 7,
            Self::ExerciseAngina => 8,
            Self::Oldpeak => 9,
            Self::StSlope => 10,
        }
    }

    /// Training column name.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Age => "Age",
            Self::Sex => "Sex",
            Self::ChestPainType => "ChestPainType",
            Self::RestingBp => "RestingBP",
            Self::Cholesterol => "Cholesterol",
            Self::FastingBs => "FastingBS",
            Self::RestingEcg => "RestingECG",
            Self::MaxHr => "MaxHR",
            Self::ExerciseAngina => "ExerciseAngina",
            Self::Oldpeak => "Oldpeak",
            Self::StSlope => "ST_Slope",
        }
    }

    /// Human readable caption used by the input form.
    pub const fn caption(self) -> &'static str {
        match self {
            Self::Age => "Age",
            Self::Sex => "Sex",
            Self::ChestPainType => "Chest Pain Type",
            Self::RestingBp => "Resting Blood Pressure",
            Self::Cholesterol => "Cholesterol",
            Self::FastingBs => "Fasting Blood Sugar > 120 mg/dl",
            Self::RestingEcg => "Resting ECG",
            Self::MaxHr => "Max Heart Rate",
            Self::ExerciseAngina => "Exercise Induced Angina",
            Self::Oldpeak => "Oldpeak (ST depression)",
            Self::StSlope => "ST Slope",
        }
    }

    fn value_of(self, input: &PatientInput) -> f64 {
        match self {
            Self::Age => f64::from(input.age()),
            Self::Sex => f64::from(input.sex().code()),
            Self::ChestPainType => f64::from(input.chest_pain_type().code()),
            Self::RestingBp => f64::from(input.resting_bp()),
            Self::Cholesterol => f64::from(input.cholesterol()),
            Self::FastingBs => f64::from(input.fasting_bs().code()),
            Self::RestingEcg => f64::from(input.resting_ecg().code()),
            Self::MaxHr => f64::from(input.max_hr()),
            Self::ExerciseAngina => f64::from(input.exercise_angina().code()),
            Self::Oldpeak => input.oldpeak(),
            Self::StSlope => f64::from(input.st_slope().code()),
        }
    }
}

impl fmt::Display for FeatureColumn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Encoded patient features in fitted column order.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FeatureVector([f64; FEATURE_COUNT]);

impl FeatureVector {
    pub fn as_slice(&self) -> &[f64] {
        &self.0
    }

    pub fn get(&self, column: FeatureColumn) -> f64 {
        self.0[column.index()]
    }

    pub fn columns(&self) -> impl Iterator<Item = (FeatureColumn, f64)> + '_ {
        FeatureColumn::ordered()
            .into_iter()
            .map(move |column| (column, self.get(column)))
    }
}

/// Output of a [`FeatureScaler`](super::artifacts::FeatureScaler); the only input a
/// [`ProbabilityModel`](super::artifacts::ProbabilityModel) accepts.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScaledFeatureVector(Vec<f64>);

impl ScaledFeatureVector {
    pub fn new(values: Vec<f64>) -> Self {
        Self(values)
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.0
    }

    pub fn into_inner(self) -> Vec<f64> {
        self.0
    }
}

/// Builds the model input for a patient. Column order comes from
/// [`FeatureColumn::ordered`] and nowhere else.
pub fn assemble(input: &PatientInput) -> FeatureVector {
    FeatureVector(FeatureColumn::ordered().map(|column| column.value_of(input)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ordered_columns_match_their_index() {
        for (position, column) in FeatureColumn::ordered().into_iter().enumerate() {
            assert_eq!(column.index(), position, "{column} out of place");
        }
    }

    #[test]
    fn column_names_follow_training_frame() {
        let names: Vec<&str> = FeatureColumn::ordered()
            .into_iter()
            .map(FeatureColumn::name)
            .collect();
        assert_eq!(
            names,
            [
                "Age",
                "Sex",
                "ChestPainType",
                "RestingBP",
                "Cholesterol",
                "FastingBS",
                "RestingECG",
                "MaxHR",
                "ExerciseAngina",
                "Oldpeak",
                "ST_Slope"
            ]
        );
    }
}
