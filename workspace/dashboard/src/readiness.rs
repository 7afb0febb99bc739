use common::DashboardData;
use std::fmt;
use tracing::{debug, info, instrument, warn};

use crate::error::ProviderError;
use crate::pipeline::Pipeline;
use crate::timer::Timer;

/// Where a dashboard session is in its lifecycle.
#[derive(Debug, Clone, PartialEq)]
pub enum ReadinessState {
    /// Stage `stage` of the pipeline is active.
    Loading { stage: usize },
    /// The provider answered; the dashboard may render.
    Ready(DashboardData),
    /// The provider failed; the view shows an error instead of spinning forever.
    Failed(ProviderError),
}

impl ReadinessState {
    pub fn is_terminal(&self) -> bool {
        !matches!(self, ReadinessState::Loading { .. })
    }

    pub fn stage(&self) -> Option<usize> {
        match self {
            ReadinessState::Loading { stage } => Some(*stage),
            _ => None,
        }
    }

    pub fn data(&self) -> Option<&DashboardData> {
        match self {
            ReadinessState::Ready(data) => Some(data),
            _ => None,
        }
    }
}

/// Why an input was dropped without changing state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IgnoreReason {
    /// The session was torn down.
    TornDown,
    /// The session already reached `Ready` or `Failed`.
    Settled,
    /// The boundary belongs to a stage that already passed.
    StaleBoundary { boundary: usize, stage: usize },
    /// The boundary index does not exist in this pipeline.
    UnknownBoundary(usize),
    /// Provider data arrived without a pending request.
    NotAwaitingData,
}

/// Outcome of feeding one input to the machine.
#[derive(Debug, Clone, PartialEq)]
pub enum Transition {
    /// Moved from `from` to `to`, publishing every stage in between.
    Advanced { from: usize, to: usize },
    /// The last boundary passed; the host must invoke the provider and hand the
    /// result to [`ReadinessMachine::on_data`].
    FetchRequested,
    Ready,
    Failed,
    Ignored(IgnoreReason),
}

type Observer = Box<dyn FnMut(&ReadinessState)>;

/// Sans-io state machine gating when provider data becomes visible.
///
/// States move forward only: `Loading(0) -> ... -> Loading(n-1)` and then exactly
/// one of `Ready` or `Failed`. Inputs that arrive late, out of turn or after
/// teardown are dropped and reported as [`Transition::Ignored`].
pub struct ReadinessMachine {
    pipeline: Pipeline,
    state: ReadinessState,
    awaiting_data: bool,
    torn_down: bool,
    observers: Vec<Observer>,
}

impl fmt::Debug for ReadinessMachine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ReadinessMachine")
            .field("pipeline", &self.pipeline)
            .field("state", &self.state)
            .field("awaiting_data", &self.awaiting_data)
            .field("torn_down", &self.torn_down)
            .field("observers", &self.observers.len())
            .finish()
    }
}

impl ReadinessMachine {
    pub fn new(pipeline: Pipeline) -> Self {
        Self {
            pipeline,
            state: ReadinessState::Loading { stage: 0 },
            awaiting_data: false,
            torn_down: false,
            observers: Vec::new(),
        }
    }

    pub fn pipeline(&self) -> &Pipeline {
        &self.pipeline
    }

    pub fn state(&self) -> &ReadinessState {
        &self.state
    }

    /// `(stage + 1) / stage_count` while loading, `None` once settled.
    pub fn progress(&self) -> Option<f64> {
        self.state.stage().map(|stage| self.pipeline.progress(stage))
    }

    /// True between the last boundary and the provider's answer.
    pub fn is_awaiting_data(&self) -> bool {
        self.awaiting_data
    }

    pub fn is_torn_down(&self) -> bool {
        self.torn_down
    }

    /// Registers a reader notified with every published state.
    pub fn subscribe(&mut self, observer: impl FnMut(&ReadinessState) + 'static) {
        self.observers.push(Box::new(observer));
    }

    /// Schedules every boundary on `timer`. Dropping the returned handles
    /// cancels whatever has not fired yet.
    pub fn arm<T: Timer>(&self, timer: &mut T) -> Vec<T::Handle> {
        self.pipeline
            .boundaries()
            .map(|(boundary, deadline)| timer.schedule(boundary, deadline))
            .collect()
    }

    /// Handles the end of stage `boundary`.
    ///
    /// A boundary ahead of the current stage walks through every intermediate
    /// stage so readers still observe `Loading(i)` before `Loading(i + 1)`.
    #[instrument(skip(self))]
    pub fn on_boundary(&mut self, boundary: usize) -> Transition {
        if self.torn_down {
            return self.ignore(IgnoreReason::TornDown);
        }
        let stage = match self.state {
            ReadinessState::Loading { stage } => stage,
            _ => return self.ignore(IgnoreReason::Settled),
        };
        let last = self.pipeline.last_stage();
        if boundary > last {
            return self.ignore(IgnoreReason::UnknownBoundary(boundary));
        }
        if boundary < stage || self.awaiting_data {
            return self.ignore(IgnoreReason::StaleBoundary { boundary, stage });
        }

        let target = (boundary + 1).min(last);
        for next in stage + 1..=target {
            self.publish(ReadinessState::Loading { stage: next });
        }

        if boundary == last {
            info!("Final stage elapsed, requesting dashboard data");
            self.awaiting_data = true;
            Transition::FetchRequested
        } else {
            debug!("Advanced from stage {} to {}", stage, target);
            Transition::Advanced {
                from: stage,
                to: target,
            }
        }
    }

    /// Settles the session with the provider's answer.
    #[instrument(skip(self, result), fields(ok = result.is_ok()))]
    pub fn on_data(&mut self, result: Result<DashboardData, ProviderError>) -> Transition {
        if self.torn_down {
            return self.ignore(IgnoreReason::TornDown);
        }
        if !self.awaiting_data {
            return self.ignore(IgnoreReason::NotAwaitingData);
        }
        self.awaiting_data = false;

        match result {
            Ok(data) => {
                if !data.is_risk_consistent() {
                    warn!(
                        risk_score = data.risk_score,
                        risk_level = %data.risk_level,
                        "Provider returned a risk level that disagrees with its score"
                    );
                }
                info!("Dashboard data ready ({} periods)", data.series.len());
                self.publish(ReadinessState::Ready(data));
                Transition::Ready
            }
            Err(err) => {
                warn!(error = %err, "Forecast provider failed");
                self.publish(ReadinessState::Failed(err));
                Transition::Failed
            }
        }
    }

    /// Detaches the machine from its view. Every later input is a no-op.
    pub fn teardown(&mut self) {
        if !self.torn_down {
            debug!("Readiness machine torn down in state {:?}", self.state.stage());
        }
        self.torn_down = true;
        self.awaiting_data = false;
        self.observers.clear();
    }

    fn publish(&mut self, state: ReadinessState) {
        self.state = state;
        for observer in self.observers.iter_mut() {
            observer(&self.state);
        }
    }

    fn ignore(&self, reason: IgnoreReason) -> Transition {
        debug!(?reason, "Dropping stale transition");
        Transition::Ignored(reason)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::provider::sample_dashboard_data;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn recording_machine() -> (ReadinessMachine, Rc<RefCell<Vec<ReadinessState>>>) {
        let mut machine = ReadinessMachine::new(Pipeline::default());
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = seen.clone();
        machine.subscribe(move |state| sink.borrow_mut().push(state.clone()));
        (machine, seen)
    }

    #[test]
    fn test_starts_loading_stage_zero() {
        let machine = ReadinessMachine::new(Pipeline::default());
        assert_eq!(machine.state(), &ReadinessState::Loading { stage: 0 });
        assert!(!machine.is_awaiting_data());
        assert!((machine.progress().unwrap() - 1.0 / 3.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_full_sequence_to_ready() {
        let (mut machine, seen) = recording_machine();

        assert_eq!(machine.on_boundary(0), Transition::Advanced { from: 0, to: 1 });
        assert_eq!(machine.on_boundary(1), Transition::Advanced { from: 1, to: 2 });
        assert_eq!(machine.on_boundary(2), Transition::FetchRequested);
        assert!(machine.is_awaiting_data());
        assert_eq!(machine.progress(), Some(1.0));

        assert_eq!(machine.on_data(Ok(sample_dashboard_data())), Transition::Ready);
        assert!(machine.state().is_terminal());
        assert_eq!(machine.progress(), None);

        let seen = seen.borrow();
        assert_eq!(seen.len(), 3);
        assert_eq!(seen[0], ReadinessState::Loading { stage: 1 });
        assert_eq!(seen[1], ReadinessState::Loading { stage: 2 });
        assert!(matches!(seen[2], ReadinessState::Ready(_)));
    }

    #[test]
    fn test_provider_failure_is_terminal() {
        let (mut machine, seen) = recording_machine();
        machine.on_boundary(0);
        machine.on_boundary(1);
        machine.on_boundary(2);

        let err = ProviderError::Unavailable("connection refused".to_string());
        assert_eq!(machine.on_data(Err(err.clone())), Transition::Failed);
        assert_eq!(machine.state(), &ReadinessState::Failed(err));

        // A late success cannot overwrite the failure
        assert_eq!(
            machine.on_data(Ok(sample_dashboard_data())),
            Transition::Ignored(IgnoreReason::NotAwaitingData)
        );
        assert_eq!(seen.borrow().len(), 3);
    }

    #[test]
    fn test_no_loading_after_ready() {
        let (mut machine, seen) = recording_machine();
        for boundary in 0..3 {
            machine.on_boundary(boundary);
        }
        machine.on_data(Ok(sample_dashboard_data()));

        for boundary in 0..3 {
            assert_eq!(
                machine.on_boundary(boundary),
                Transition::Ignored(IgnoreReason::Settled)
            );
        }
        let ready_count = seen
            .borrow()
            .iter()
            .filter(|state| matches!(state, ReadinessState::Ready(_)))
            .count();
        assert_eq!(ready_count, 1);
        assert!(matches!(seen.borrow().last(), Some(ReadinessState::Ready(_))));
    }

    #[test]
    fn test_stale_and_repeated_boundaries_are_dropped() {
        let mut machine = ReadinessMachine::new(Pipeline::default());
        machine.on_boundary(0);
        machine.on_boundary(1);

        assert_eq!(
            machine.on_boundary(0),
            Transition::Ignored(IgnoreReason::StaleBoundary { boundary: 0, stage: 2 })
        );
        assert_eq!(
            machine.on_boundary(7),
            Transition::Ignored(IgnoreReason::UnknownBoundary(7))
        );

        assert_eq!(machine.on_boundary(2), Transition::FetchRequested);
        // Second delivery of the final boundary must not request a second fetch
        assert!(matches!(
            machine.on_boundary(2),
            Transition::Ignored(IgnoreReason::StaleBoundary { .. })
        ));
    }

    #[test]
    fn test_out_of_order_boundary_visits_every_stage() {
        let (mut machine, seen) = recording_machine();

        assert_eq!(machine.on_boundary(2), Transition::FetchRequested);
        assert_eq!(
            *seen.borrow(),
            vec![
                ReadinessState::Loading { stage: 1 },
                ReadinessState::Loading { stage: 2 },
            ]
        );
    }

    #[test]
    fn test_progress_is_monotonic() {
        let mut machine = ReadinessMachine::new(Pipeline::default());
        let mut last = machine.progress().unwrap();
        for boundary in 0..2 {
            machine.on_boundary(boundary);
            let progress = machine.progress().unwrap();
            assert!(progress >= last);
            assert!(progress < 1.0 || machine.state().stage() == Some(2));
            last = progress;
        }
        assert_eq!(last, 1.0);
    }

    #[test]
    fn test_data_before_fetch_request_is_ignored() {
        let mut machine = ReadinessMachine::new(Pipeline::default());
        assert_eq!(
            machine.on_data(Ok(sample_dashboard_data())),
            Transition::Ignored(IgnoreReason::NotAwaitingData)
        );
        assert_eq!(machine.state(), &ReadinessState::Loading { stage: 0 });
    }

    #[test]
    fn test_teardown_drops_everything() {
        let (mut machine, seen) = recording_machine();
        machine.on_boundary(0);
        machine.teardown();

        assert_eq!(
            machine.on_boundary(1),
            Transition::Ignored(IgnoreReason::TornDown)
        );
        assert_eq!(
            machine.on_data(Ok(sample_dashboard_data())),
            Transition::Ignored(IgnoreReason::TornDown)
        );
        assert_eq!(machine.state(), &ReadinessState::Loading { stage: 1 });
        assert_eq!(seen.borrow().len(), 1);
    }

    #[test]
    fn test_single_stage_pipeline_fetches_on_first_boundary() {
        let config = common::PipelineConfig::uniform(["Only"], 10);
        let mut machine = ReadinessMachine::new(Pipeline::new(&config).unwrap());
        assert_eq!(machine.progress(), Some(1.0));
        assert_eq!(machine.on_boundary(0), Transition::FetchRequested);
        assert_eq!(machine.state(), &ReadinessState::Loading { stage: 0 });
    }
}
