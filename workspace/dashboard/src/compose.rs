//! Pure mapping from a [`ReadinessState`] to what the view should draw.

use common::DashboardData;

use crate::actions::QuickAction;
use crate::chart::ChartPlan;
use crate::error::ProviderError;
use crate::gauge::GaugePlan;
use crate::pipeline::Pipeline;
use crate::readiness::ReadinessState;

pub const DASHBOARD_TITLE: &str = "Financial Command Center";
pub const PROCESSING_TITLE: &str = "AI Processing";
pub const INSIGHT_HEADING: &str = "Smart Forecast";
pub const INSIGHT_DETAIL_LABEL: &str = "View Detail Analysis";
pub const ACTIONS_HEADING: &str = "Quick Actions";
pub const FAILURE_HEADING: &str = "Forecast unavailable";
pub const RETRY_LABEL: &str = "Try Again";

/// Visual status of one stage row in the processing view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StageStatus {
    Done,
    Active,
    Pending,
}

impl StageStatus {
    pub fn for_index(index: usize, current: usize) -> Self {
        if index < current {
            StageStatus::Done
        } else if index == current {
            StageStatus::Active
        } else {
            StageStatus::Pending
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct StageRow<'a> {
    pub index: usize,
    pub label: &'a str,
    pub status: StageStatus,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ProcessingPlan<'a> {
    pub title: &'static str,
    pub stages: Vec<StageRow<'a>>,
    /// Fill of the progress bar, in `(0, 1]`.
    pub progress: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct InsightPanel<'a> {
    pub heading: &'static str,
    pub text: &'a str,
    pub detail_label: &'static str,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ActionPanel {
    pub heading: &'static str,
    pub actions: &'static [QuickAction],
}

impl Default for ActionPanel {
    fn default() -> Self {
        Self {
            heading: ACTIONS_HEADING,
            actions: &QuickAction::PANEL,
        }
    }
}

/// The four panels of the ready dashboard. Each holds only its own slice of
/// the data, so they can be drawn in any order.
#[derive(Debug, Clone, PartialEq)]
pub struct DashboardPlan<'a> {
    pub chart: ChartPlan<'a>,
    pub gauge: GaugePlan,
    pub insight: InsightPanel<'a>,
    pub actions: ActionPanel,
}

impl<'a> DashboardPlan<'a> {
    pub fn new(data: &'a DashboardData) -> Self {
        Self {
            chart: ChartPlan::new(&data.series),
            gauge: GaugePlan::new(data.risk_score, data.risk_level),
            insight: InsightPanel {
                heading: INSIGHT_HEADING,
                text: &data.insight,
                detail_label: INSIGHT_DETAIL_LABEL,
            },
            actions: ActionPanel::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct FailurePlan<'a> {
    pub heading: &'static str,
    pub error: &'a ProviderError,
    pub retry_label: &'static str,
}

impl FailurePlan<'_> {
    pub fn message(&self) -> String {
        self.error.to_string()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum RenderPlan<'a> {
    Processing(ProcessingPlan<'a>),
    Dashboard(DashboardPlan<'a>),
    Failed(FailurePlan<'a>),
}

/// Builds the render plan for `state`. Borrows everything; mutates nothing.
pub fn compose<'a>(state: &'a ReadinessState, pipeline: &'a Pipeline) -> RenderPlan<'a> {
    match state {
        ReadinessState::Loading { stage } => RenderPlan::Processing(ProcessingPlan {
            title: PROCESSING_TITLE,
            stages: pipeline
                .labels()
                .iter()
                .enumerate()
                .map(|(index, label)| StageRow {
                    index,
                    label: label.as_str(),
                    status: StageStatus::for_index(index, *stage),
                })
                .collect(),
            progress: pipeline.progress(*stage),
        }),
        ReadinessState::Ready(data) => RenderPlan::Dashboard(DashboardPlan::new(data)),
        ReadinessState::Failed(error) => RenderPlan::Failed(FailurePlan {
            heading: FAILURE_HEADING,
            error,
            retry_label: RETRY_LABEL,
        }),
    }
}
