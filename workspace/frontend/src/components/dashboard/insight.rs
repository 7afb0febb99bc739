use dashboard::compose::{INSIGHT_DETAIL_LABEL, INSIGHT_HEADING};
use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct InsightCardProps {
    pub text: AttrValue,
}

#[function_component(InsightCard)]
pub fn insight_card(props: &InsightCardProps) -> Html {
    html! {
        <div class="card bg-primary text-primary-content shadow">
            <div class="card-body">
                <h2 class="card-title"><i class="fas fa-lightbulb"></i>{" "}{INSIGHT_HEADING}</h2>
                <p>{&props.text}</p>
                <div class="card-actions justify-end">
                    <button class="btn btn-sm btn-ghost">{INSIGHT_DETAIL_LABEL}</button>
                </div>
            </div>
        </div>
    }
}
