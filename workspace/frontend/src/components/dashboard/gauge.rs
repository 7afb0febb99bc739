use common::RiskLevel;
use dashboard::gauge::{GaugePlan, GAUGE_RADIUS, GAUGE_TITLE};
use yew::prelude::*;

fn level_color(level: RiskLevel) -> &'static str {
    match level {
        RiskLevel::Low => "#10B981",
        RiskLevel::Med => "#F59E0B",
        RiskLevel::High => "#EF4444",
    }
}

#[derive(Properties, PartialEq)]
pub struct RiskGaugeProps {
    pub gauge: GaugePlan,
}

/// Circular risk indicator drawn as two SVG circles; the arc starts at 12 o'clock.
#[function_component(RiskGauge)]
pub fn risk_gauge(props: &RiskGaugeProps) -> Html {
    let gauge = &props.gauge;
    let radius = GAUGE_RADIUS.to_string();

    html! {
        <div class="card bg-base-100 shadow">
            <div class="card-body items-center text-center">
                <h2 class="card-title self-start">{GAUGE_TITLE}</h2>
                <div class="relative w-40 h-40">
                    <svg viewBox="0 0 100 100" class="w-full h-full">
                        <circle cx="50" cy="50" r={radius.clone()} fill="none" stroke="#E5E7EB" stroke-width="8" />
                        <circle
                            cx="50"
                            cy="50"
                            r={radius}
                            fill="none"
                            stroke={level_color(gauge.level())}
                            stroke-width="8"
                            stroke-linecap="round"
                            stroke-dasharray={gauge.dash_array()}
                            transform="rotate(-90 50 50)"
                        />
                    </svg>
                    <div class="absolute inset-0 flex flex-col items-center justify-center">
                        <span class="text-3xl font-bold">{gauge.score_label()}</span>
                        <span class="text-sm opacity-70">{gauge.level_label()}</span>
                    </div>
                </div>
                <p class="text-sm opacity-70">{gauge.caption()}</p>
            </div>
        </div>
    }
}
