use super::common::*;
use crate::prediction::encoding::{
    ChestPainType, ExerciseAngina, FastingBloodSugar, RestingEcg, Sex, StSlope,
};
use crate::prediction::{assemble, FeatureColumn, PatientInput, PatientInputBuilder, FEATURE_COUNT};

fn base_builder() -> PatientInputBuilder {
    PatientInput::builder()
        .age(61)
        .sex(Sex::Female)
        .chest_pain_type(ChestPainType::AtypicalAngina)
        .resting_bp(135)
        .cholesterol(180)
        .fasting_bs(FastingBloodSugar::Yes)
        .resting_ecg(RestingEcg::StTAbnormality)
        .max_hr(128)
        .exercise_angina(ExerciseAngina::No)
        .oldpeak(2.5)
        .st_slope(StSlope::Downsloping)
}

#[test]
fn scenario_a_encodes_in_schema_order() {
    let features = assemble(&scenario_a_input());

    assert_eq!(features.as_slice().len(), FEATURE_COUNT);
    assert_eq!(
        features.as_slice(),
        &[50.0, 1.0, 3.0, 120.0, 200.0, 0.0, 0.0, 150.0, 0.0, 1.0, 1.0]
    );
    assert_eq!(features.get(FeatureColumn::StSlope), 1.0);
    assert_eq!(features.get(FeatureColumn::ChestPainType), 3.0);
}

#[test]
fn each_field_drives_exactly_its_own_column() {
    let base = base_builder();
    let baseline = assemble(&base.build().expect("base input valid"));

    let variants = [
        (FeatureColumn::Age, base.age(62)),
        (FeatureColumn::Sex, base.sex(Sex::Male)),
        (
            FeatureColumn::ChestPainType,
            base.chest_pain_type(ChestPainType::Asymptomatic),
        ),
        (FeatureColumn::RestingBp, base.resting_bp(140)),
        (FeatureColumn::Cholesterol, base.cholesterol(250)),
        (FeatureColumn::FastingBs, base.fasting_bs(FastingBloodSugar::No)),
        (FeatureColumn::RestingEcg, base.resting_ecg(RestingEcg::Normal)),
        (FeatureColumn::MaxHr, base.max_hr(170)),
        (
            FeatureColumn::ExerciseAngina,
            base.exercise_angina(ExerciseAngina::Yes),
        ),
        (FeatureColumn::Oldpeak, base.oldpeak(0.4)),
        (FeatureColumn::StSlope, base.st_slope(StSlope::Upsloping)),
    ];

    for (column, builder) in variants {
        let changed = assemble(&builder.build().expect("variant valid"));
        for (position, (before, after)) in baseline
            .as_slice()
            .iter()
            .zip(changed.as_slice())
            .enumerate()
        {
            if position == column.index() {
                assert_ne!(before, after, "{column} did not move its own column");
            } else {
                assert_eq!(before, after, "{column} leaked into column {position}");
            }
        }
    }
}

#[test]
fn swapping_two_fields_changes_the_vector() {
    let original = assemble(&base_builder().build().expect("valid"));
    let swapped = assemble(
        &base_builder()
            .resting_bp(180)
            .cholesterol(135)
            .build()
            .expect("swapped values still valid"),
    );
    assert_ne!(original, swapped);

    let swapped_categories = assemble(
        &base_builder()
            .fasting_bs(FastingBloodSugar::No)
            .exercise_angina(ExerciseAngina::Yes)
            .build()
            .expect("valid"),
    );
    assert_ne!(original, swapped_categories);
}

#[test]
fn assembly_is_deterministic() {
    let input = scenario_a_input();
    let first = assemble(&input);
    let second = assemble(&input);
    assert_eq!(first, second);
    for (left, right) in first.as_slice().iter().zip(second.as_slice()) {
        assert_eq!(left.to_bits(), right.to_bits());
    }
}

#[test]
fn columns_iterate_in_schema_order() {
    let features = assemble(&scenario_a_input());
    let names: Vec<&str> = features.columns().map(|(column, _)| column.name()).collect();
    assert_eq!(names.first(), Some(&"Age"));
    assert_eq!(names.last(), Some(&"ST_Slope"));
    assert_eq!(names.len(), FEATURE_COUNT);
}
