use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

use dashboard::{ForecastProvider, Pipeline, ReadinessMachine, ReadinessState, Timer, Transition};
use gloo_timers::callback::Timeout;
use yew::prelude::*;

use crate::api_client::dashboard::HttpForecastProvider;

/// Schedules boundaries as browser timeouts. Dropping the returned
/// [`Timeout`] clears it.
pub struct GlooTimer {
    on_boundary: Callback<usize>,
}

impl Timer for GlooTimer {
    type Handle = Timeout;

    fn schedule(&mut self, boundary: usize, deadline: Duration) -> Timeout {
        let on_boundary = self.on_boundary.clone();
        let millis = u32::try_from(deadline.as_millis()).unwrap_or(u32::MAX);
        Timeout::new(millis, move || on_boundary.emit(boundary))
    }
}

/// Runs one readiness session per `(pipeline, generation)` and returns the
/// latest published state. Bumping `generation` tears the current session
/// down and mounts a fresh one.
#[hook]
pub fn use_readiness(pipeline: Pipeline, generation: u32) -> ReadinessState {
    let state = use_state(|| ReadinessState::Loading { stage: 0 });

    {
        let state = state.clone();
        use_effect_with((pipeline, generation), move |(pipeline, generation)| {
            log::info!(
                "Mounting dashboard session #{} with {} stages",
                generation,
                pipeline.stage_count()
            );
            let machine = Rc::new(RefCell::new(ReadinessMachine::new(pipeline.clone())));
            state.set(machine.borrow().state().clone());
            {
                let state = state.clone();
                machine
                    .borrow_mut()
                    .subscribe(move |published| state.set(published.clone()));
            }

            let on_boundary = {
                let machine = machine.clone();
                Callback::from(move |boundary: usize| {
                    let transition = machine.borrow_mut().on_boundary(boundary);
                    if transition == Transition::FetchRequested {
                        let machine = machine.clone();
                        wasm_bindgen_futures::spawn_local(async move {
                            let result = HttpForecastProvider.fetch_dashboard_data().await;
                            machine.borrow_mut().on_data(result);
                        });
                    }
                })
            };

            let handles = machine.borrow().arm(&mut GlooTimer { on_boundary });
            let generation = *generation;

            move || {
                log::debug!("Tearing down dashboard session #{}", generation);
                drop(handles);
                machine.borrow_mut().teardown();
            }
        });
    }

    (*state).clone()
}
