use anyhow::Result;
use dashboard::{DashboardSession, Pipeline, ReadinessState, Transition, compose};
use std::cell::RefCell;
use std::rc::Rc;
use tracing::{debug, info, trace};

use crate::config::Settings;
use crate::preview::{render_plan, TokioTimer};

/// Runs one dashboard session against the configured provider, printing every
/// published state until the session settles.
pub async fn preview(settings: &Settings) -> Result<()> {
    trace!("Entering preview function");
    let state = run_session(settings, |frame| println!("{}", frame)).await?;
    info!("Preview finished settled={}", state.is_terminal());
    Ok(())
}

/// Drives a session on tokio timers, handing every rendered frame to `emit`,
/// and returns the state it settled in.
pub async fn run_session<F>(settings: &Settings, emit: F) -> Result<ReadinessState>
where
    F: FnMut(String) + 'static,
{
    let pipeline = Pipeline::new(&settings.pipeline_config()?)?;
    info!(
        "Previewing dashboard, data expected after {:?}",
        pipeline.total_duration()
    );

    let emit = Rc::new(RefCell::new(emit));
    let (mut timer, mut boundaries) = TokioTimer::new();
    let mut session = DashboardSession::mount(pipeline.clone(), &mut timer, settings.provider());

    (*emit.borrow_mut())(render_plan(&session.render_plan()));
    {
        let emit = emit.clone();
        session.subscribe(move |state| {
            (*emit.borrow_mut())(render_plan(&compose(state, &pipeline)));
        });
    }

    while let Some(boundary) = boundaries.recv().await {
        match session.on_boundary(boundary).await {
            Transition::Ignored(reason) => debug!(?reason, "Boundary ignored"),
            transition => debug!(?transition, "Session advanced"),
        }
        if session.is_settled() {
            break;
        }
    }

    let state = session.state().clone();
    session.unmount();
    Ok(state)
}
