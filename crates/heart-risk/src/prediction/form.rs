use super::domain::{InputError, PatientInput, PatientInputBuilder};
use super::encoding::{
    Categorical, ChestPainType, ExerciseAngina, FastingBloodSugar, RestingEcg, Sex, StSlope,
};
use serde::{Deserialize, Deserializer, Serialize};

/// Untrusted patient fields as typed by a user or read from a CSV row.
///
/// Field names follow the training frame (`Age`, `ST_Slope`, ...) and also accept
/// snake_case keys. Categorical values are free text and are validated by
/// [`PatientForm::into_input`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PatientForm {
    #[serde(rename = "Age", alias = "age", default)]
    pub age: Option<u16>,
    #[serde(
        rename = "Sex",
        alias = "sex",
        default,
        deserialize_with = "empty_string_as_none"
    )]
    pub sex: Option<String>,
    #[serde(
        rename = "ChestPainType",
        alias = "chest_pain_type",
        default,
        deserialize_with = "empty_string_as_none"
    )]
    pub chest_pain_type: Option<String>,
    #[serde(rename = "RestingBP", alias = "resting_bp", default)]
    pub resting_bp: Option<u16>,
    #[serde(rename = "Cholesterol", alias = "cholesterol", default)]
    pub cholesterol: Option<u16>,
    #[serde(
        rename = "FastingBS",
        alias = "fasting_bs",
        default,
        deserialize_with = "empty_string_as_none"
    )]
    pub fasting_bs: Option<String>,
    #[serde(
        rename = "RestingECG",
        alias = "resting_ecg",
        default,
        deserialize_with = "empty_string_as_none"
    )]
    pub resting_ecg: Option<String>,
    #[serde(rename = "MaxHR", alias = "max_hr", default)]
    pub max_hr: Option<u16>,
    #[serde(
        rename = "ExerciseAngina",
        alias = "exercise_angina",
        default,
        deserialize_with = "empty_string_as_none"
    )]
    pub exercise_angina: Option<String>,
    #[serde(rename = "Oldpeak", alias = "oldpeak", default)]
    pub oldpeak: Option<f64>,
    #[serde(
        rename = "ST_Slope",
        alias = "st_slope",
        default,
        deserialize_with = "empty_string_as_none"
    )]
    pub st_slope: Option<String>,
}

impl PatientForm {
    /// Initial values of the interactive form.
    pub fn form_defaults() -> Self {
        Self {
            age: Some(50),
            sex: Some(Sex::Female.label().to_string()),
            chest_pain_type: Some(ChestPainType::TypicalAngina.label().to_string()),
            resting_bp: Some(120),
            cholesterol: Some(200),
            fasting_bs: Some(FastingBloodSugar::No.label().to_string()),
            resting_ecg: Some(RestingEcg::Normal.label().to_string()),
            max_hr: Some(150),
            exercise_angina: Some(ExerciseAngina::No.label().to_string()),
            oldpeak: Some(1.0),
            st_slope: Some(StSlope::Upsloping.label().to_string()),
        }
    }

    /// Fills every missing field from [`PatientForm::form_defaults`].
    pub fn with_defaults(self) -> Self {
        let defaults = Self::form_defaults();
        Self {
            age: self.age.or(defaults.age),
            sex: self.sex.or(defaults.sex),
            chest_pain_type: self.chest_pain_type.or(defaults.chest_pain_type),
            resting_bp: self.resting_bp.or(defaults.resting_bp),
            cholesterol: self.cholesterol.or(defaults.cholesterol),
            fasting_bs: self.fasting_bs.or(defaults.fasting_bs),
            resting_ecg: self.resting_ecg.or(defaults.resting_ecg),
            max_hr: self.max_hr.or(defaults.max_hr),
            exercise_angina: self.exercise_angina.or(defaults.exercise_angina),
            oldpeak: self.oldpeak.or(defaults.oldpeak),
            st_slope: self.st_slope.or(defaults.st_slope),
        }
    }

    pub fn into_input(self) -> Result<PatientInput, InputError> {
        let builder = PatientInput::builder();
        let builder = apply(builder, self.age, PatientInputBuilder::age);
        let builder = apply(
            builder,
            parse_optional::<Sex>(self.sex.as_deref())?,
            PatientInputBuilder::sex,
        );
        let builder = apply(
            builder,
            parse_optional::<ChestPainType>(self.chest_pain_type.as_deref())?,
            PatientInputBuilder::chest_pain_type,
        );
        let builder = apply(builder, self.resting_bp, PatientInputBuilder::resting_bp);
        let builder = apply(builder, self.cholesterol, PatientInputBuilder::cholesterol);
        let builder = apply(
            builder,
            parse_optional::<FastingBloodSugar>(self.fasting_bs.as_deref())?,
            PatientInputBuilder::fasting_bs,
        );
        let builder = apply(
            builder,
            parse_optional::<RestingEcg>(self.resting_ecg.as_deref())?,
            PatientInputBuilder::resting_ecg,
        );
        let builder = apply(builder, self.max_hr, PatientInputBuilder::max_hr);
        let builder = apply(
            builder,
            parse_optional::<ExerciseAngina>(self.exercise_angina.as_deref())?,
            PatientInputBuilder::exercise_angina,
        );
        let builder = apply(builder, self.oldpeak, PatientInputBuilder::oldpeak);
        let builder = apply(
            builder,
            parse_optional::<StSlope>(self.st_slope.as_deref())?,
            PatientInputBuilder::st_slope,
        );

        builder.build()
    }
}

impl TryFrom<PatientForm> for PatientInput {
    type Error = InputError;

    fn try_from(form: PatientForm) -> Result<Self, Self::Error> {
        form.into_input()
    }
}

fn apply<T>(
    builder: PatientInputBuilder,
    value: Option<T>,
    set: fn(PatientInputBuilder, T) -> PatientInputBuilder,
) -> PatientInputBuilder {
    match value {
        Some(value) => set(builder, value),
        None => builder,
    }
}

fn parse_optional<C: Categorical>(raw: Option<&str>) -> Result<Option<C>, InputError> {
    raw.map(C::parse).transpose()
}

fn empty_string_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let opt = Option::<String>::deserialize(deserializer)?;
    Ok(opt.filter(|value| !value.trim().is_empty()))
}
