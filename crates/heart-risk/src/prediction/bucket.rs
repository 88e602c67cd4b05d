use serde::{Deserialize, Serialize};
use tracing::warn;

/// Probabilities below this value are [`RiskTier::Low`].
pub const LOW_RISK_CEILING: f64 = 0.30;
/// Probabilities at or above this value are [`RiskTier::High`].
pub const HIGH_RISK_FLOOR: f64 = 0.70;

/// Classifier output outside [0, 1], or NaN.
#[derive(Debug, Clone, Copy, PartialEq, thiserror::Error)]
#[error("classifier returned probability {value}, outside [0, 1]")]
pub struct ProbabilityOutOfRange {
    pub value: f64,
}

/// A probability known to lie in [0, 1].
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize)]
#[serde(transparent)]
pub struct Probability(f64);

impl Probability {
    pub fn new(value: f64) -> Result<Self, ProbabilityOutOfRange> {
        if (0.0..=1.0).contains(&value) {
            Ok(Self(value))
        } else {
            Err(ProbabilityOutOfRange { value })
        }
    }

    pub fn value(self) -> f64 {
        self.0
    }

    /// Probability of the negative class.
    pub fn complement(self) -> f64 {
        1.0 - self.0
    }
}

/// Ordinal risk tier derived from a predicted probability.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskTier {
    Low,
    Medium,
    High,
}

impl RiskTier {
    pub const fn ordered() -> [Self; 3] {
        [Self::Low, Self::Medium, Self::High]
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Low => "Low Risk",
            Self::Medium => "Medium Risk",
            Self::High => "High Risk",
        }
    }

    /// Display color used for the probability headline.
    pub const fn color(self) -> &'static str {
        match self {
            Self::Low => "green",
            Self::Medium => "orange",
            Self::High => "red",
        }
    }
}

/// Maps a probability to its tier. Each threshold belongs to the tier above it.
pub fn bucket(probability: Probability) -> RiskTier {
    let value = probability.value();
    if value < LOW_RISK_CEILING {
        RiskTier::Low
    } else if value < HIGH_RISK_FLOOR {
        RiskTier::Medium
    } else {
        RiskTier::High
    }
}

/// What to do with a classifier output outside [0, 1].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProbabilityPolicy {
    /// Clamp into range and log a warning.
    #[default]
    Clamp,
    /// Fail the prediction.
    Reject,
}

impl ProbabilityPolicy {
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "clamp" => Some(Self::Clamp),
            "reject" => Some(Self::Reject),
            _ => None,
        }
    }

    /// NaN is rejected under either policy since it has no meaningful clamp.
    pub fn admit(self, raw: f64) -> Result<Probability, ProbabilityOutOfRange> {
        match Probability::new(raw) {
            Ok(probability) => Ok(probability),
            Err(err) if raw.is_nan() => Err(err),
            Err(err) => match self {
                ProbabilityPolicy::Reject => Err(err),
                ProbabilityPolicy::Clamp => {
                    let clamped = raw.clamp(0.0, 1.0);
                    warn!(raw, clamped, "classifier probability clamped into range");
                    Ok(Probability(clamped))
                }
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tier(value: f64) -> RiskTier {
        bucket(Probability::new(value).expect("probability in range"))
    }

    #[test]
    fn thresholds_belong_to_the_upper_tier() {
        assert_eq!(tier(0.2999), RiskTier::Low);
        assert_eq!(tier(0.30), RiskTier::Medium);
        assert_eq!(tier(0.6999), RiskTier::Medium);
        assert_eq!(tier(0.70), RiskTier::High);
    }

    #[test]
    fn extremes_map_to_outer_tiers() {
        assert_eq!(tier(0.0), RiskTier::Low);
        assert_eq!(tier(1.0), RiskTier::High);
    }

    #[test]
    fn bucket_is_monotonic_and_covers_three_intervals() {
        let mut previous = RiskTier::Low;
        let mut seen = Vec::new();
        for step in 0..=10_000 {
            let current = tier(f64::from(step) / 10_000.0);
            assert!(current >= previous, "tier dropped at step {step}");
            if seen.last() != Some(&current) {
                seen.push(current);
            }
            previous = current;
        }
        assert_eq!(seen, RiskTier::ordered());
    }

    #[test]
    fn probability_rejects_out_of_range_values() {
        assert!(Probability::new(-0.01).is_err());
        assert!(Probability::new(1.01).is_err());
        assert!(Probability::new(f64::NAN).is_err());
        assert!(Probability::new(0.5).is_ok());
    }

    #[test]
    fn clamp_policy_pulls_values_into_range() {
        let high = ProbabilityPolicy::Clamp.admit(1.2).expect("clamped");
        assert_eq!(high.value(), 1.0);
        let low = ProbabilityPolicy::Clamp.admit(-0.3).expect("clamped");
        assert_eq!(low.value(), 0.0);
    }

    #[test]
    fn reject_policy_fails_out_of_range_values() {
        let err = ProbabilityPolicy::Reject
            .admit(1.2)
            .expect_err("out of range rejected");
        assert_eq!(err.value, 1.2);
        assert!(ProbabilityPolicy::Reject.admit(0.7).is_ok());
    }

    #[test]
    fn nan_is_rejected_under_both_policies() {
        assert!(ProbabilityPolicy::Clamp.admit(f64::NAN).is_err());
        assert!(ProbabilityPolicy::Reject.admit(f64::NAN).is_err());
    }

    #[test]
    fn policy_parses_config_values() {
        assert_eq!(ProbabilityPolicy::parse(" Clamp "), Some(ProbabilityPolicy::Clamp));
        assert_eq!(ProbabilityPolicy::parse("REJECT"), Some(ProbabilityPolicy::Reject));
        assert_eq!(ProbabilityPolicy::parse("ignore"), None);
    }
}
