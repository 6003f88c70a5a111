use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use tracing::{debug, warn};

/// Highest subclass weight; a factor at this weight contributes full intensity.
pub const MAX_WEIGHT: u8 = 5;

#[derive(
    Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash,
)]
#[serde(rename_all = "snake_case")]
pub enum SusceptibilityClass {
    VeryLow,
    Low,
    Moderate,
    High,
    VeryHigh,
}

impl SusceptibilityClass {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::VeryLow => "Very Low",
            Self::Low => "Low",
            Self::Moderate => "Moderate",
            Self::High => "High",
            Self::VeryHigh => "Very High",
        }
    }
}

impl fmt::Display for SusceptibilityClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for SusceptibilityClass {
    type Err = String;

    // accepts "very_high", "very-high" and "Very High" alike
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized: String = s
            .trim()
            .chars()
            .filter(|c| !matches!(c, '_' | '-' | ' '))
            .collect::<String>()
            .to_lowercase();

        match normalized.as_str() {
            "verylow" => Ok(Self::VeryLow),
            "low" => Ok(Self::Low),
            "moderate" => Ok(Self::Moderate),
            "high" => Ok(Self::High),
            "veryhigh" => Ok(Self::VeryHigh),
            _ => Err(format!(
                "unknown susceptibility class '{}' (expected very_low, low, moderate, high or very_high)",
                s
            )),
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, PartialEq)]
pub struct CompositeResult {
    pub score: f64,
    pub class: SusceptibilityClass,
    /// Set when every weight was zero and no share could be computed.
    pub degenerate: bool,
}

/// Combines per-factor weights into a 0-100 composite score.
///
/// Each factor contributes `share * intensity`, where `share` is its weight
/// over the sum of all weights and `intensity` is its weight over
/// [`MAX_WEIGHT`]. A zero sum scores 0 and classifies as Very Low.
pub fn aggregate(weights: &[u8]) -> CompositeResult {
    let sum: u64 = weights.iter().map(|weight| u64::from(*weight)).sum();
    if sum == 0 {
        warn!(factors = weights.len(), "all weights are zero; scoring as 0");
        return CompositeResult {
            score: 0.0,
            class: SusceptibilityClass::VeryLow,
            degenerate: true,
        };
    }

    // Σ (w/Σw)(w/5) * 100 == 100 Σw² / (5 Σw), divided once so whole-number
    // scores land exactly on the thresholds.
    let sum_sq: u64 = weights.iter().map(|weight| u64::from(*weight).pow(2)).sum();
    let score = (100 * sum_sq) as f64 / (u64::from(MAX_WEIGHT) * sum) as f64;

    let class = classify(score);
    debug!(?weights, score, %class, "aggregated weights");
    CompositeResult {
        score,
        class,
        degenerate: false,
    }
}

pub fn classify(score: f64) -> SusceptibilityClass {
    match score {
        s if s >= 80.0 => SusceptibilityClass::VeryHigh,
        s if s >= 70.0 => SusceptibilityClass::High,
        s if s >= 60.0 => SusceptibilityClass::Moderate,
        s if s >= 50.0 => SusceptibilityClass::Low,
        _ => SusceptibilityClass::VeryLow,
    }
}
