use heart_risk::prediction::batch::write_csv;
use heart_risk::prediction::{
    ArtifactPipeline, BatchError, BatchOutcome, BatchScorer, ProbabilityPolicy, RiskTier,
};
use std::path::PathBuf;

fn fixture(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("fixtures")
        .join(name)
}

fn fixture_pipeline() -> ArtifactPipeline {
    ArtifactPipeline::load(
        fixture("scaler.json"),
        fixture("heart_disease_model.json"),
        ProbabilityPolicy::Clamp,
    )
    .expect("fixture artifacts load")
}

fn tier_of(outcome: &BatchOutcome) -> Option<RiskTier> {
    match outcome {
        BatchOutcome::Assessed { tier, .. } => Some(*tier),
        BatchOutcome::Rejected { .. } => None,
    }
}

#[test]
fn batch_scores_each_row_independently() {
    let rows = BatchScorer::from_path(&fixture_pipeline(), fixture("patients.csv"))
        .expect("batch scores");

    assert_eq!(rows.len(), 6);
    assert_eq!(
        rows.iter().map(|row| row.row).collect::<Vec<_>>(),
        [1, 2, 3, 4, 5, 6]
    );
    assert_eq!(tier_of(&rows[0].outcome), Some(RiskTier::High));
    assert_eq!(tier_of(&rows[1].outcome), Some(RiskTier::Low));
    assert_eq!(tier_of(&rows[2].outcome), Some(RiskTier::High));
    assert_eq!(tier_of(&rows[3].outcome), Some(RiskTier::Medium));

    match &rows[4].outcome {
        BatchOutcome::Rejected { error } => assert!(error.contains("Sex"), "{error}"),
        other => panic!("expected invalid sex rejection, got {other:?}"),
    }
    match &rows[5].outcome {
        BatchOutcome::Rejected { error } => {
            assert!(error.contains("missing value for Cholesterol"), "{error}")
        }
        other => panic!("expected missing cholesterol rejection, got {other:?}"),
    }
}

#[test]
fn snake_case_headers_are_accepted() {
    let csv = "age,sex,chest_pain_type,resting_bp,cholesterol,fasting_bs,resting_ecg,max_hr,exercise_angina,oldpeak,st_slope\n\
50,Male,Asymptomatic,120,200,No,Normal,150,No,1.0,Flat\n";
    let rows = BatchScorer::from_reader(&fixture_pipeline(), csv.as_bytes()).expect("batch scores");
    assert_eq!(rows.len(), 1);
    assert_eq!(tier_of(&rows[0].outcome), Some(RiskTier::High));
}

#[test]
fn malformed_numbers_reject_only_their_row() {
    let csv = "Age,Sex,ChestPainType,RestingBP,Cholesterol,FastingBS,RestingECG,MaxHR,ExerciseAngina,Oldpeak,ST_Slope\n\
fifty,M,ASY,120,200,0,Normal,150,N,1.0,Flat\n\
50,M,ASY,120,200,0,Normal,150,N,1.0,Flat\n";
    let rows = BatchScorer::from_reader(&fixture_pipeline(), csv.as_bytes()).expect("batch scores");
    assert!(matches!(rows[0].outcome, BatchOutcome::Rejected { .. }));
    assert!(matches!(rows[1].outcome, BatchOutcome::Assessed { .. }));
}

#[test]
fn missing_batch_file_is_an_io_error() {
    let err = BatchScorer::from_path(&fixture_pipeline(), fixture("missing.csv"))
        .expect_err("io error");
    assert!(matches!(err, BatchError::Io(_)));
}

#[test]
fn results_write_as_csv() {
    let rows = BatchScorer::from_path(&fixture_pipeline(), fixture("patients.csv"))
        .expect("batch scores");
    let mut buffer = Vec::new();
    write_csv(&rows, &mut buffer).expect("csv written");

    let output = String::from_utf8(buffer).expect("utf8 output");
    let mut lines = output.lines();
    assert_eq!(lines.next(), Some("row,probability,tier,error"));
    assert_eq!(lines.next(), Some("1,0.7110,High Risk,"));
    assert!(output.contains("\n6,,,missing value for Cholesterol\n"));
}

#[test]
fn results_serialize_with_status_tag() {
    let rows = BatchScorer::from_path(&fixture_pipeline(), fixture("patients.csv"))
        .expect("batch scores");
    let json = serde_json::to_value(&rows).expect("json");
    assert_eq!(json[0]["status"], "assessed");
    assert_eq!(json[0]["tier"], "high");
    assert_eq!(json[4]["status"], "rejected");
    assert_eq!(json[4]["row"], 5);
}
