use dashboard::QuickAction;
use yew::prelude::*;

use crate::components::dashboard::{action_icon, use_action_dispatcher};

/// Navigation rail. Every entry only raises a notification; profile sits
/// below the divider.
#[function_component(Sidebar)]
pub fn sidebar() -> Html {
    let on_action = use_action_dispatcher();

    let entry = |action: QuickAction| {
        let onclick = on_action.reform(move |_: MouseEvent| action);
        html! {
            <li>
                <a class="nav-link" {onclick}>
                    <i class={classes!(action_icon(action), "w-5")}></i>
                    {" "}{action.label()}
                </a>
            </li>
        }
    };

    let entries = QuickAction::SIDEBAR;
    let (main, pinned) = entries.split_at(entries.len() - 1);

    html! {
        <div class="drawer-side z-50">
            <label aria-label="close sidebar" class="drawer-overlay" for="app-drawer"></label>
            <ul class="menu p-4 w-64 min-h-full bg-base-100 text-base-content border-r border-base-300">
                <li class="mb-4">
                    <div class="flex items-center gap-3 px-2">
                        <div class="w-10 h-10 rounded-lg bg-primary flex items-center justify-center text-primary-content font-bold text-2xl">
                            <i class="fas fa-chart-area"></i>
                        </div>
                        <span class="text-2xl font-bold tracking-tight">{"Fincast"}</span>
                    </div>
                </li>

                { for main.iter().copied().map(&entry) }

                <div class="divider"></div>

                { for pinned.iter().copied().map(&entry) }
            </ul>
        </div>
    }
}
