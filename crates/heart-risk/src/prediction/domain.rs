use super::encoding::{
    ChestPainType, ExerciseAngina, FastingBloodSugar, RestingEcg, Sex, StSlope,
};
use super::features::FeatureColumn;
use super::form::PatientForm;
use serde::{Deserialize, Serialize};

/// Inclusive bounds accepted for a numeric form field.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct NumericRange {
    pub min: f64,
    pub max: f64,
}

impl NumericRange {
    pub const fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    pub fn contains(&self, value: f64) -> bool {
        value.is_finite() && value >= self.min && value <= self.max
    }
}

pub const AGE_RANGE: NumericRange = NumericRange::new(20.0, 100.0);
pub const RESTING_BP_RANGE: NumericRange = NumericRange::new(80.0, 200.0);
pub const CHOLESTEROL_RANGE: NumericRange = NumericRange::new(100.0, 600.0);
pub const MAX_HR_RANGE: NumericRange = NumericRange::new(60.0, 220.0);
pub const OLDPEAK_RANGE: NumericRange = NumericRange::new(0.0, 10.0);

/// Input rejected before it reaches the model.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum InputError {
    #[error("missing value for {field}")]
    IncompleteInput { field: FeatureColumn },
    #[error("'{value}' is not a valid option for {field}")]
    InvalidCategory { field: FeatureColumn, value: String },
    #[error("{field} must be between {min} and {max} (found {value})")]
    ValueOutOfRange {
        field: FeatureColumn,
        value: f64,
        min: f64,
        max: f64,
    },
}

impl InputError {
    pub fn field(&self) -> FeatureColumn {
        match self {
            InputError::IncompleteInput { field }
            | InputError::InvalidCategory { field, .. }
            | InputError::ValueOutOfRange { field, .. } => *field,
        }
    }
}

/// A complete, validated set of clinical measurements for one prediction.
///
/// Only [`PatientInputBuilder`] (or a [`PatientForm`]) can produce
/// one, so every instance is complete and within the form's numeric domains.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "PatientForm")]
pub struct PatientInput {
    age: u16,
    sex: Sex,
    chest_pain_type: ChestPainType,
    resting_bp: u16,
    cholesterol: u16,
    fasting_bs: FastingBloodSugar,
    resting_ecg: RestingEcg,
    max_hr: u16,
    exercise_angina: ExerciseAngina,
    oldpeak: f64,
    st_slope: StSlope,
}

impl PatientInput {
    pub fn builder() -> PatientInputBuilder {
        PatientInputBuilder::default()
    }

    pub fn age(&self) -> u16 {
        self.age
    }

    pub fn sex(&self) -> Sex {
        self.sex
    }

    pub fn chest_pain_type(&self) -> ChestPainType {
        self.chest_pain_type
    }

    pub fn resting_bp(&self) -> u16 {
        self.resting_bp
    }

    pub fn cholesterol(&self) -> u16 {
        self.cholesterol
    }

    pub fn fasting_bs(&self) -> FastingBloodSugar {
        self.fasting_bs
    }

    pub fn resting_ecg(&self) -> RestingEcg {
        self.resting_ecg
    }

    pub fn max_hr(&self) -> u16 {
        self.max_hr
    }

    pub fn exercise_angina(&self) -> ExerciseAngina {
        self.exercise_angina
    }

    pub fn oldpeak(&self) -> f64 {
        self.oldpeak
    }

    pub fn st_slope(&self) -> StSlope {
        self.st_slope
    }
}

/// Collects patient fields one at a time and validates them together.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PatientInputBuilder {
    age: Option<u16>,
    sex: Option<Sex>,
    chest_pain_type: Option<ChestPainType>,
    resting_bp: Option<u16>,
    cholesterol: Option<u16>,
    fasting_bs: Option<FastingBloodSugar>,
    resting_ecg: Option<RestingEcg>,
    max_hr: Option<u16>,
    exercise_angina: Option<ExerciseAngina>,
    oldpeak: Option<f64>,
    st_slope: Option<StSlope>,
}

impl PatientInputBuilder {
    pub fn age(mut self, value: u16) -> Self {
        self.age = Some(value);
        self
    }

    pub fn sex(mut self, value: Sex) -> Self {
        self.sex = Some(value);
        self
    }

    pub fn chest_pain_type(mut self, value: ChestPainType) -> Self {
        self.chest_pain_type = Some(value);
        self
    }

    pub fn resting_bp(mut self, value: u16) -> Self {
        self.resting_bp = Some(value);
        self
    }

    pub fn cholesterol(mut self, value: u16) -> Self {
        self.cholesterol = Some(value);
        self
    }

    pub fn fasting_bs(mut self, value: FastingBloodSugar) -> Self {
        self.fasting_bs = Some(value);
        self
    }

    pub fn resting_ecg(mut self, value: RestingEcg) -> Self {
        self.resting_ecg = Some(value);
        self
    }

    pub fn max_hr(mut self, value: u16) -> Self {
        self.max_hr = Some(value);
        self
    }

    pub fn exercise_angina(mut self, value: ExerciseAngina) -> Self {
        self.exercise_angina = Some(value);
        self
    }

    pub fn oldpeak(mut self, value: f64) -> Self {
        self.oldpeak = Some(value);
        self
    }

    pub fn st_slope(mut self, value: StSlope) -> Self {
        self.st_slope = Some(value);
        self
    }

    /// Fails on the first missing field in feature order, then on the first
    /// numeric value outside its form range.
    pub fn build(self) -> Result<PatientInput, InputError> {
        let input = PatientInput {
            age: require(self.age, FeatureColumn::Age)?,
            sex: require(self.sex, FeatureColumn::Sex)?,
            chest_pain_type: require(self.chest_pain_type, FeatureColumn::ChestPainType)?,
            resting_bp: require(self.resting_bp, FeatureColumn::RestingBp)?,
            cholesterol: require(self.cholesterol, FeatureColumn::Cholesterol)?,
            fasting_bs: require(self.fasting_bs, FeatureColumn::FastingBs)?,
            resting_ecg: require(self.resting_ecg, FeatureColumn::RestingEcg)?,
            max_hr: require(self.max_hr, FeatureColumn::MaxHr)?,
            exercise_angina: require(self.exercise_angina, FeatureColumn::ExerciseAngina)?,
            oldpeak: require(self.oldpeak, FeatureColumn::Oldpeak)?,
            st_slope: require(self.st_slope, FeatureColumn::StSlope)?,
        };

        check_range(FeatureColumn::Age, f64::from(input.age), AGE_RANGE)?;
        check_range(
            FeatureColumn::RestingBp,
            f64::from(input.resting_bp),
            RESTING_BP_RANGE,
        )?;
        check_range(
            FeatureColumn::Cholesterol,
            f64::from(input.cholesterol),
            CHOLESTEROL_RANGE,
        )?;
        check_range(FeatureColumn::MaxHr, f64::from(input.max_hr), MAX_HR_RANGE)?;
        check_range(FeatureColumn::Oldpeak, input.oldpeak, OLDPEAK_RANGE)?;

        Ok(input)
    }
}

fn require<T>(value: Option<T>, field: FeatureColumn) -> Result<T, InputError> {
    value.ok_or(InputError::IncompleteInput { field })
}

fn check_range(field: FeatureColumn, value: f64, range: NumericRange) -> Result<(), InputError> {
    if range.contains(value) {
        Ok(())
    } else {
        Err(InputError::ValueOutOfRange {
            field,
            value,
            min: range.min,
            max: range.max,
        })
    }
}
