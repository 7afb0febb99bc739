use dashboard::compose::{ProcessingPlan, StageStatus};
use yew::prelude::*;

#[derive(Clone, PartialEq)]
pub struct StageItem {
    pub label: AttrValue,
    pub status: StageStatus,
}

#[derive(Properties, PartialEq)]
pub struct ProcessingPanelProps {
    pub title: AttrValue,
    pub stages: Vec<StageItem>,
    /// Fill of the progress bar, in `(0, 1]`
    pub progress: f64,
}

impl From<&ProcessingPlan<'_>> for ProcessingPanelProps {
    fn from(plan: &ProcessingPlan<'_>) -> Self {
        Self {
            title: AttrValue::Static(plan.title),
            stages: plan
                .stages
                .iter()
                .map(|row| StageItem {
                    label: AttrValue::from(row.label.to_string()),
                    status: row.status,
                })
                .collect(),
            progress: plan.progress,
        }
    }
}

#[function_component(ProcessingPanel)]
pub fn processing_panel(props: &ProcessingPanelProps) -> Html {
    let percent = (props.progress * 100.0).round();

    html! {
        <div class="flex justify-center items-center py-16">
            <div class="card bg-base-100 shadow w-full max-w-md">
                <div class="card-body gap-4">
                    <h2 class="card-title"><span class="loading loading-ring loading-md"></span>{&props.title}</h2>
                    <ul class="flex flex-col gap-2">
                        {for props.stages.iter().map(|stage| {
                            let (icon, class) = match stage.status {
                                StageStatus::Done => ("fas fa-check-circle text-success", "opacity-70"),
                                StageStatus::Active => ("fas fa-circle-notch fa-spin text-primary", "font-semibold"),
                                StageStatus::Pending => ("far fa-circle opacity-40", "opacity-40"),
                            };
                            html! {
                                <li class={classes!("flex", "items-center", "gap-3", class)}>
                                    <i class={icon}></i>
                                    <span>{&stage.label}</span>
                                </li>
                            }
                        })}
                    </ul>
                    <progress class="progress progress-primary w-full" value={percent.to_string()} max="100"></progress>
                </div>
            </div>
        </div>
    }
}
