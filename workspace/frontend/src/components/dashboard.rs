mod actions;
mod chart;
mod gauge;
mod insight;
mod processing;
mod session;
mod view;

pub use actions::{action_icon, use_action_dispatcher};
pub use view::Dashboard;
