use common::PipelineConfig;
use dashboard::compose::{RenderPlan, FAILURE_HEADING};
use dashboard::{compose, pipeline_or_default, Pipeline, ReadinessState};
use yew::prelude::*;

use super::actions::QuickActions;
use super::chart::ForecastChart;
use super::gauge::RiskGauge;
use super::insight::InsightCard;
use super::processing::{ProcessingPanel, ProcessingPanelProps};
use super::session::use_readiness;
use crate::api_client::dashboard::get_pipeline;
use crate::common::error::ErrorDisplay;
use crate::common::fetch_hook::use_fetch_once;
use crate::common::loading::Loading;
use crate::common::toast::ToastContext;
use crate::hooks::FetchState;
use crate::settings;

/// Pipeline for the served configuration, with the local stage duration
/// override applied. Without a served configuration the default stages run.
fn resolve_pipeline(served: Option<&PipelineConfig>) -> Pipeline {
    let config = served.cloned().unwrap_or_default();
    let config = match settings::get_settings().stage_duration_ms {
        Some(ms) => {
            log::debug!("Overriding stage durations with {} ms", ms);
            PipelineConfig::uniform(config.stages.into_iter().map(|s| s.label), ms)
        }
        None => config,
    };
    pipeline_or_default(&config)
}

#[derive(Properties, PartialEq)]
pub struct DashboardSessionViewProps {
    pub pipeline: Pipeline,
}

#[function_component(DashboardSessionView)]
fn dashboard_session_view(props: &DashboardSessionViewProps) -> Html {
    let generation = use_state(|| 0u32);
    let state = use_readiness(props.pipeline.clone(), *generation);
    let toast_ctx = use_context::<ToastContext>();

    // One error toast per failed session
    {
        let failure = match &state {
            ReadinessState::Failed(err) => Some(err.to_string()),
            _ => None,
        };
        use_effect_with((failure, *generation), move |(failure, _)| {
            if let (Some(message), Some(toast_ctx)) = (failure, toast_ctx) {
                toast_ctx.show_error(message.clone());
            }
            || ()
        });
    }

    let on_retry = {
        let generation = generation.clone();
        Callback::from(move |_| {
            log::info!("Retrying dashboard session");
            generation.set(*generation + 1);
        })
    };

    match compose(&state, &props.pipeline) {
        RenderPlan::Processing(plan) => html! {
            <ProcessingPanel ..ProcessingPanelProps::from(&plan) />
        },
        RenderPlan::Dashboard(plan) => html! {
            <div class="grid grid-cols-1 lg:grid-cols-3 gap-6">
                <ForecastChart series={plan.chart.points().to_vec()} />
                <RiskGauge gauge={plan.gauge.clone()} />
                <div class="lg:col-span-2">
                    <InsightCard text={plan.insight.text.to_string()} />
                </div>
                <QuickActions heading={plan.actions.heading} actions={plan.actions.actions} />
            </div>
        },
        RenderPlan::Failed(plan) => html! {
            <ErrorDisplay
                heading={FAILURE_HEADING}
                message={plan.message()}
                retry_label={plan.retry_label}
                on_retry={Some(on_retry)}
            />
        },
    }
}

#[function_component(Dashboard)]
pub fn dashboard_page() -> Html {
    let pipeline_state = use_fetch_once(get_pipeline);

    match &*pipeline_state {
        FetchState::Loading => html! { <Loading text="Connecting to forecast service..." /> },
        FetchState::Success(config) => html! {
            <DashboardSessionView pipeline={resolve_pipeline(Some(config))} />
        },
        FetchState::Error(err) => {
            log::warn!("Using default pipeline, configuration unavailable: {}", err);
            html! { <DashboardSessionView pipeline={resolve_pipeline(None)} /> }
        }
    }
}
