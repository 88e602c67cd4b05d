//! Presentation views over a [`RiskAssessment`].

use super::bucket::RiskTier;
use super::features::{FeatureColumn, FeatureVector};
use super::pipeline::{ProbabilityChart, RiskAssessment};
use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
pub struct AssessmentView {
    pub tier: RiskTier,
    pub tier_label: &'static str,
    pub color: &'static str,
    pub probability: f64,
    /// Probability rounded to two decimals.
    pub probability_display: String,
    pub chart: ProbabilityChart,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub features: Option<Vec<FeatureRow>>,
}

/// One column of the encoded model input.
#[derive(Debug, Clone, Serialize)]
pub struct FeatureRow {
    pub column: FeatureColumn,
    pub name: &'static str,
    pub value: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartBar {
    pub label: &'static str,
    pub value: f64,
    pub bar: String,
}

impl AssessmentView {
    pub fn new(assessment: &RiskAssessment) -> Self {
        let tier = assessment.tier();
        Self {
            tier,
            tier_label: tier.label(),
            color: tier.color(),
            probability: assessment.probability(),
            probability_display: format!("{:.2}", assessment.probability()),
            chart: assessment.chart(),
            features: None,
        }
    }

    pub fn with_features(mut self, features: &FeatureVector) -> Self {
        self.features = Some(
            features
                .columns()
                .map(|(column, value)| FeatureRow {
                    column,
                    name: column.name(),
                    value,
                })
                .collect(),
        );
        self
    }

    /// Horizontal bars scaled so a probability of 1.0 fills `width` cells.
    pub fn chart_bars(&self, width: usize) -> [ChartBar; 2] {
        [
            chart_bar("No Disease", self.chart.no_disease, width),
            chart_bar("Heart Disease", self.chart.disease, width),
        ]
    }
}

fn chart_bar(label: &'static str, value: f64, width: usize) -> ChartBar {
    let cells = (value.clamp(0.0, 1.0) * width as f64).round() as usize;
    ChartBar {
        label,
        value,
        bar: "#".repeat(cells),
    }
}
