use dashboard::chart::{BandKind, ChartPlan, format_amount};
use dashboard::compose::{
    DASHBOARD_TITLE, DashboardPlan, FailurePlan, ProcessingPlan, RenderPlan, StageStatus,
};
use dashboard::gauge::{GAUGE_TITLE, GaugePlan};
use std::fmt::Write;

const BAR_WIDTH: usize = 24;

/// Renders a composed plan as plain terminal text.
pub fn render_plan(plan: &RenderPlan<'_>) -> String {
    match plan {
        RenderPlan::Processing(processing) => render_processing(processing),
        RenderPlan::Dashboard(dashboard) => render_dashboard(dashboard),
        RenderPlan::Failed(failure) => render_failure(failure),
    }
}

fn bar(fraction: f64, width: usize) -> String {
    let filled = (fraction.clamp(0.0, 1.0) * width as f64).round() as usize;
    format!("{}{}", "#".repeat(filled), "-".repeat(width - filled))
}

fn render_processing(plan: &ProcessingPlan<'_>) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", plan.title);
    for row in &plan.stages {
        let marker = match row.status {
            StageStatus::Done => "[x]",
            StageStatus::Active => "[>]",
            StageStatus::Pending => "[ ]",
        };
        let _ = writeln!(out, "  {} {}", marker, row.label);
    }
    let _ = writeln!(
        out,
        "  [{}] {:>3.0}%",
        bar(plan.progress, BAR_WIDTH),
        plan.progress * 100.0
    );
    out
}

fn render_chart(out: &mut String, chart: &ChartPlan<'_>) {
    let _ = writeln!(out, "{} ({})", dashboard::chart::CHART_TITLE, chart.badge());
    if chart.is_empty() {
        let _ = writeln!(out, "  (no forecast periods)");
        return;
    }

    let _ = writeln!(
        out,
        "  {:<6} {:>10} {:>10}",
        "",
        BandKind::Savings.name(),
        BandKind::Expenses.name()
    );
    for point in chart.points() {
        let _ = writeln!(
            out,
            "  {:<6} {:>10} {:>10}  {}",
            point.period,
            format_amount(point.savings),
            format_amount(point.expenses),
            bar(chart.y_position(point.savings), BAR_WIDTH / 2),
        );
    }
}

fn render_gauge(out: &mut String, gauge: &GaugePlan) {
    let _ = writeln!(out, "{}", GAUGE_TITLE);
    let _ = writeln!(
        out,
        "  [{}] {} ({})",
        bar(gauge.arc_fraction(), BAR_WIDTH),
        gauge.score_label(),
        gauge.level_label()
    );
    let _ = writeln!(out, "  {}", gauge.caption());
}

fn render_dashboard(plan: &DashboardPlan<'_>) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}\n", DASHBOARD_TITLE);
    render_chart(&mut out, &plan.chart);
    let _ = writeln!(out);
    render_gauge(&mut out, &plan.gauge);
    let _ = writeln!(out);
    let _ = writeln!(out, "{}", plan.insight.heading);
    let _ = writeln!(out, "  {}", plan.insight.text);
    let _ = writeln!(out, "  > {}", plan.insight.detail_label);
    let _ = writeln!(out);
    let _ = writeln!(out, "{}", plan.actions.heading);
    for action in plan.actions.actions {
        let _ = writeln!(out, "  * {}", action.label());
    }
    out
}

fn render_failure(plan: &FailurePlan<'_>) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", plan.heading);
    let _ = writeln!(out, "  {}", plan.message());
    let _ = writeln!(out, "  Run the preview again to {}.", plan.retry_label.to_lowercase());
    out
}
