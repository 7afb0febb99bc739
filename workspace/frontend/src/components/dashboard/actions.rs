use dashboard::{dispatch, QuickAction};
use yew::prelude::*;

use crate::common::toast::ToastContext;

pub fn action_icon(action: QuickAction) -> &'static str {
    match action {
        QuickAction::AcknowledgeDashboard => "fas fa-home",
        QuickAction::OpenAnalytics => "fas fa-chart-line",
        QuickAction::OpenRiskSettings => "fas fa-shield-alt",
        QuickAction::OpenProfile => "fas fa-user-circle",
        QuickAction::UploadStatement => "fas fa-file-upload",
        QuickAction::AddExpense => "fas fa-plus-circle",
    }
}

/// Callback that turns a clicked action into its toast.
#[hook]
pub fn use_action_dispatcher() -> Callback<QuickAction> {
    let toast_ctx = use_context::<ToastContext>();
    Callback::from(move |action: QuickAction| match &toast_ctx {
        Some(toast_ctx) => dispatch(action, toast_ctx),
        None => log::warn!("No toast context, dropping notification for {:?}", action),
    })
}

#[derive(Properties, PartialEq)]
pub struct QuickActionsProps {
    pub heading: AttrValue,
    pub actions: &'static [QuickAction],
}

#[function_component(QuickActions)]
pub fn quick_actions(props: &QuickActionsProps) -> Html {
    let on_action = use_action_dispatcher();

    html! {
        <div class="card bg-base-100 shadow">
            <div class="card-body">
                <h2 class="card-title">{&props.heading}</h2>
                <div class="grid grid-cols-2 gap-3">
                    {for props.actions.iter().map(|action| {
                        let action = *action;
                        let onclick = on_action.reform(move |_: MouseEvent| action);
                        html! {
                            <button class="btn btn-outline" {onclick}>
                                <i class={action_icon(action)}></i>
                                {" "}{action.label()}
                            </button>
                        }
                    })}
                </div>
            </div>
        </div>
    }
}
