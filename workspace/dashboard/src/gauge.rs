use common::RiskLevel;
use std::f64::consts::PI;
use tracing::warn;

pub const GAUGE_TITLE: &str = "Risk Radar";

/// Radius of the gauge circle in SVG user units (100x100 viewBox).
pub const GAUGE_RADIUS: f64 = 40.0;

pub const MIN_SCORE: i32 = 0;
pub const MAX_SCORE: i32 = 100;

pub fn clamp_score(score: i32) -> i32 {
    score.clamp(MIN_SCORE, MAX_SCORE)
}

/// Portion of the circle the arc covers: `clamp(score, 0, 100) / 100`.
pub fn arc_fraction(score: i32) -> f64 {
    f64::from(clamp_score(score)) / f64::from(MAX_SCORE)
}

/// Circular risk indicator for one score/level pair.
///
/// No risk is computed here; the provider's score and level are the only inputs.
#[derive(Debug, Clone, PartialEq)]
pub struct GaugePlan {
    score: i32,
    level: RiskLevel,
    arc_fraction: f64,
}

impl GaugePlan {
    pub fn new(score: i32, level: RiskLevel) -> Self {
        let clamped = clamp_score(score);
        if clamped != score {
            warn!(score, clamped, "Risk score outside [0, 100], clamping for display");
        }
        Self {
            score: clamped,
            level,
            arc_fraction: arc_fraction(score),
        }
    }

    /// Score after clamping into `[0, 100]`.
    pub fn score(&self) -> i32 {
        self.score
    }

    pub fn level(&self) -> RiskLevel {
        self.level
    }

    pub fn arc_fraction(&self) -> f64 {
        self.arc_fraction
    }

    /// Numeric label in the centre of the gauge.
    pub fn score_label(&self) -> String {
        self.score.to_string()
    }

    /// Level label under the number, e.g. "Low Risk".
    pub fn level_label(&self) -> String {
        format!("{} Risk", self.level)
    }

    pub fn circumference() -> f64 {
        2.0 * PI * GAUGE_RADIUS
    }

    /// Length of the drawn stroke along the circle.
    pub fn arc_length(&self) -> f64 {
        self.arc_fraction * Self::circumference()
    }

    /// Value for the SVG `stroke-dasharray` attribute.
    pub fn dash_array(&self) -> String {
        format!("{:.2} {:.2}", self.arc_length(), Self::circumference())
    }

    pub fn caption(&self) -> &'static str {
        match self.level {
            RiskLevel::Low => {
                "Your financial portfolio shows resilience. Keep maintaining the savings ratio."
            }
            RiskLevel::Med => {
                "Some pressure on your cash flow. Review upcoming expenses before they land."
            }
            RiskLevel::High => {
                "Expenses are outpacing savings. Consider trimming discretionary spending."
            }
        }
    }
}
