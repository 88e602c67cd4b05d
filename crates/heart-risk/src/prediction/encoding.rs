//! Fixed label-to-code tables for the categorical model inputs.
//!
//! Codes are the ordinal values the training data used. Each table is written out
//! as an explicit `match` in both directions so a reordering of variants can never
//! change what the model receives.

use super::domain::InputError;
use super::features::FeatureColumn;
use super::normalizer::{compact_label, normalize_label, split_code_suffix};
use serde::{Deserialize, Serialize};

/// A closed set of labelled options with stable integer codes.
pub trait Categorical: Sized + Copy + Eq + 'static {
    /// Column this category feeds.
    const COLUMN: FeatureColumn;

    /// Every option, in code order.
    fn ordered() -> &'static [Self];

    fn code(self) -> u8;

    fn from_code(code: u8) -> Result<Self, InputError>;

    /// Display label shown on the input form.
    fn label(self) -> &'static str;

    /// Alternative spellings, such as the abbreviations used by the public
    /// heart failure dataset (`"ASY"`, `"LVH"`, `"Up"`).
    fn aliases(self) -> &'static [&'static str] {
        &[]
    }

    /// Parses free text into an option.
    ///
    /// Accepts the display label, the variant name in any case or separator style,
    /// a known alias, the bare numeric code, or the form option text `"Label (code)"`
    /// whose code must agree with the label.
    fn parse(raw: &str) -> Result<Self, InputError> {
        let normalized = normalize_label(raw);
        if normalized.is_empty() {
            return Err(InputError::IncompleteInput {
                field: Self::COLUMN,
            });
        }

        if let Some((label, code)) = split_code_suffix(&normalized) {
            let by_label = match_label::<Self>(label);
            let by_code = code.parse::<u8>().ok().and_then(|code| Self::from_code(code).ok());
            return match (by_label, by_code) {
                (Some(left), Some(right)) if left == right => Ok(left),
                _ => Err(invalid::<Self>(raw)),
            };
        }

        if normalized.bytes().all(|byte| byte.is_ascii_digit()) {
            return normalized
                .parse::<u8>()
                .map_err(|_| invalid::<Self>(raw))
                .and_then(|code| Self::from_code(code).map_err(|_| invalid::<Self>(raw)));
        }

        match_label::<Self>(&normalized).ok_or_else(|| invalid::<Self>(raw))
    }
}

fn match_label<C: Categorical>(value: &str) -> Option<C> {
    let wanted = compact_label(value);
    if wanted.is_empty() {
        return None;
    }
    C::ordered().iter().copied().find(|option| {
        compact_label(option.label()) == wanted
            || option
                .aliases()
                .iter()
                .any(|alias| compact_label(alias) == wanted)
    })
}

fn invalid<C: Categorical>(raw: &str) -> InputError {
    InputError::InvalidCategory {
        field: C::COLUMN,
        value: raw.trim().to_string(),
    }
}

fn invalid_code<C: Categorical>(code: u8) -> InputError {
    InputError::InvalidCategory {
        field: C::COLUMN,
        value: code.to_string(),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Sex {
    Female,
    Male,
}

impl Categorical for Sex {
    const COLUMN: FeatureColumn = FeatureColumn::Sex;

    fn ordered() -> &'static [Self] {
        &[Self::Female, Self::Male]
    }

    fn code(self) -> u8 {
        match self {
            Self::Female => 0,
            Self::Male => 1,
        }
    }

    fn from_code(code: u8) -> Result<Self, InputError> {
        match code {
            0 => Ok(Self::Female),
            1 => Ok(Self::Male),
            other => Err(invalid_code::<Self>(other)),
        }
    }

    fn label(self) -> &'static str {
        match self {
            Self::Female => "Female",
            Self::Male => "Male",
        }
    }

    fn aliases(self) -> &'static [&'static str] {
        match self {
            Self::Female => &["F"],
            Self::Male => &["M"],
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChestPainType {
    TypicalAngina,
    AtypicalAngina,
    NonAnginalPain,
    Asymptomatic,
}

impl Categorical for ChestPainType {
    const COLUMN: FeatureColumn = FeatureColumn::ChestPainType;

    fn ordered() -> &'static [Self] {
        &[
            Self::TypicalAngina,
            Self::AtypicalAngina,
            Self::NonAnginalPain,
            Self::Asymptomatic,
        ]
    }

    fn code(self) -> u8 {
        match self {
            Self::TypicalAngina => 0,
            Self::AtypicalAngina => 1,
            Self::NonAnginalPain => 2,
            Self::Asymptomatic => 3,
        }
    }

    fn from_code(code: u8) -> Result<Self, InputError> {
        match code {
            0 => Ok(Self::TypicalAngina),
            1 => Ok(Self::AtypicalAngina),
            2 => Ok(Self::NonAnginalPain),
            3 => Ok(Self::Asymptomatic),
            other => Err(invalid_code::<Self>(other)),
        }
    }

    fn label(self) -> &'static str {
        match self {
            Self::TypicalAngina => "Typical Angina",
            Self::AtypicalAngina => "Atypical Angina",
            Self::NonAnginalPain => "Non-anginal Pain",
            Self::Asymptomatic => "Asymptomatic",
        }
    }

    fn aliases(self) -> &'static [&'static str] {
        match self {
            Self::TypicalAngina => &["TA"],
            Self::AtypicalAngina => &["ATA"],
            Self::NonAnginalPain => &["NAP"],
            Self::Asymptomatic => &["ASY"],
        }
    }
}

/// Fasting blood sugar above 120 mg/dl.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FastingBloodSugar {
    No,
    Yes,
}

impl Categorical for FastingBloodSugar {
    const COLUMN: FeatureColumn = FeatureColumn::FastingBs;

    fn ordered() -> &'static [Self] {
        &[Self::No, Self::Yes]
    }

    fn code(self) -> u8 {
        match self {
            Self::No => 0,
            Self::Yes => 1,
        }
    }

    fn from_code(code: u8) -> Result<Self, InputError> {
        match code {
            0 => Ok(Self::No),
            1 => Ok(Self::Yes),
            other => Err(invalid_code::<Self>(other)),
        }
    }

    fn label(self) -> &'static str {
        match self {
            Self::No => "No",
            Self::Yes => "Yes",
        }
    }

    fn aliases(self) -> &'static [&'static str] {
        match self {
            Self::No => &["N", "false"],
            Self::Yes => &["Y", "true"],
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RestingEcg {
    Normal,
    StTAbnormality,
    LeftVentricularHypertrophy,
}

impl Categorical for RestingEcg {
    const COLUMN: FeatureColumn = FeatureColumn::RestingEcg;

    fn ordered() -> &'static [Self] {
        &[
            Self::Normal,
            Self::StTAbnormality,
            Self::LeftVentricularHypertrophy,
        ]
    }

    fn code(self) -> u8 {
        match self {
            Self::Normal => 0,
            Self::StTAbnormality => 1,
            Self::LeftVentricularHypertrophy => 2,
        }
    }

    fn from_code(code: u8) -> Result<Self, InputError> {
        match code {
            0 => Ok(Self::Normal),
            1 => Ok(Self::StTAbnormality),
            2 => Ok(Self::LeftVentricularHypertrophy),
            other => Err(invalid_code::<Self>(other)),
        }
    }

    fn label(self) -> &'static str {
        match self {
            Self::Normal => "Normal",
            Self::StTAbnormality => "ST-T Abnormality",
            Self::LeftVentricularHypertrophy => "Left Ventricular Hypertrophy",
        }
    }

    fn aliases(self) -> &'static [&'static str] {
        match self {
            Self::Normal => &[],
            Self::StTAbnormality => &["ST"],
            Self::LeftVentricularHypertrophy => &["LVH"],
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExerciseAngina {
    No,
    Yes,
}

impl Categorical for ExerciseAngina {
    const COLUMN: FeatureColumn = FeatureColumn::ExerciseAngina;

    fn ordered() -> &'static [Self] {
        &[Self::No, Self::Yes]
    }

    fn code(self) -> u8 {
        match self {
            Self::No => 0,
            Self::Yes => 1,
        }
    }

    fn from_code(code: u8) -> Result<Self, InputError> {
        match code {
            0 => Ok(Self::No),
            1 => Ok(Self::Yes),
            other => Err(invalid_code::<Self>(other)),
        }
    }

    fn label(self) -> &'static str {
        match self {
            Self::No => "No",
            Self::Yes => "Yes",
        }
    }

    fn aliases(self) -> &'static [&'static str] {
        match self {
            Self::No => &["N", "false"],
            Self::Yes => &["Y", "true"],
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StSlope {
    Upsloping,
    Flat,
    Downsloping,
}

impl Categorical for StSlope {
    const COLUMN: FeatureColumn = FeatureColumn::StSlope;

    fn ordered() -> &'static [Self] {
        &[Self::Upsloping, Self::Flat, Self::Downsloping]
    }

    fn code(self) -> u8 {
        match self {
            Self::Upsloping => 0,
            Self::Flat => 1,
            Self::Downsloping => 2,
        }
    }

    fn from_code(code: u8) -> Result<Self, InputError> {
        match code {
            0 => Ok(Self::Upsloping),
            1 => Ok(Self::Flat),
            2 => Ok(Self::Downsloping),
            other => Err(invalid_code::<Self>(other)),
        }
    }

    fn label(self) -> &'static str {
        match self {
            Self::Upsloping => "Upsloping",
            Self::Flat => "Flat",
            Self::Downsloping => "Downsloping",
        }
    }

    fn aliases(self) -> &'static [&'static str] {
        match self {
            Self::Upsloping => &["Up"],
            Self::Flat => &[],
            Self::Downsloping => &["Down"],
        }
    }
}

/// One row of a category code table.
#[derive(Debug, Clone, Serialize)]
pub struct CategoryOption {
    pub code: u8,
    pub label: &'static str,
}

/// Code table for one categorical column.
#[derive(Debug, Clone, Serialize)]
pub struct CategoryTable {
    pub column: FeatureColumn,
    pub caption: &'static str,
    pub options: Vec<CategoryOption>,
}

impl CategoryTable {
    pub fn of<C: Categorical>() -> Self {
        Self {
            column: C::COLUMN,
            caption: C::COLUMN.caption(),
            options: C::ordered()
                .iter()
                .map(|option| CategoryOption {
                    code: option.code(),
                    label: option.label(),
                })
                .collect(),
        }
    }
}

/// Code tables for every categorical column, in feature order.
pub fn category_tables() -> Vec<CategoryTable> {
    vec![
        CategoryTable::of::<Sex>(),
        CategoryTable::of::<ChestPainType>(),
        CategoryTable::of::<FastingBloodSugar>(),
        CategoryTable::of::<RestingEcg>(),
        CategoryTable::of::<ExerciseAngina>(),
        CategoryTable::of::<StSlope>(),
    ]
}
