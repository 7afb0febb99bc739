use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use utoipa::ToSchema;

/// Risk band reported by the forecast provider alongside the numeric score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
pub enum RiskLevel {
    Low,
    Med,
    High,
}

impl RiskLevel {
    /// Highest score still considered `Low`.
    pub const LOW_MAX: i32 = 33;
    /// Highest score still considered `Med`.
    pub const MED_MAX: i32 = 66;

    /// Maps a score onto the banding policy: Low <= 33, Med 34-66, High >= 67.
    ///
    /// Scores outside `[0, 100]` land in the nearest band.
    pub fn for_score(score: i32) -> Self {
        if score <= Self::LOW_MAX {
            RiskLevel::Low
        } else if score <= Self::MED_MAX {
            RiskLevel::Med
        } else {
            RiskLevel::High
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            RiskLevel::Low => "Low",
            RiskLevel::Med => "Med",
            RiskLevel::High => "High",
        }
    }
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One reporting period of the forecast.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ForecastPoint {
    /// Period label shown on the x-axis (e.g. "Jan")
    pub period: String,
    /// Projected savings for the period
    #[schema(value_type = String)]
    pub savings: Decimal,
    /// Projected expenses for the period
    #[schema(value_type = String)]
    pub expenses: Decimal,
}

impl ForecastPoint {
    pub fn new(period: impl Into<String>, savings: Decimal, expenses: Decimal) -> Self {
        Self {
            period: period.into(),
            savings,
            expenses,
        }
    }
}

/// Everything the dashboard needs once it is ready to render.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct DashboardData {
    /// Forecast sequence in chronological order
    pub series: Vec<ForecastPoint>,
    /// Risk band as reported by the provider
    pub risk_level: RiskLevel,
    /// Risk score, expected within [0, 100]
    pub risk_score: i32,
    /// Generated insight sentence
    pub insight: String,
}

impl DashboardData {
    /// Whether `risk_level` agrees with `risk_score` under the banding policy.
    pub fn is_risk_consistent(&self) -> bool {
        RiskLevel::for_score(self.risk_score) == self.risk_level
    }
}
