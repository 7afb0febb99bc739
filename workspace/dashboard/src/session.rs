use tracing::{debug, info, instrument};

use crate::compose::{RenderPlan, compose};
use crate::pipeline::Pipeline;
use crate::provider::ForecastProvider;
use crate::readiness::{ReadinessMachine, ReadinessState, Transition};
use crate::timer::Timer;

/// One mounted dashboard: the readiness machine plus the scheduled boundaries
/// and the provider it will call.
///
/// The host feeds boundaries delivered by its timer into [`on_boundary`]. When
/// the session is unmounted (or dropped) every pending boundary is cancelled.
///
/// [`on_boundary`]: DashboardSession::on_boundary
pub struct DashboardSession<T: Timer, P: ForecastProvider> {
    machine: ReadinessMachine,
    provider: P,
    handles: Vec<T::Handle>,
}

impl<T: Timer, P: ForecastProvider> DashboardSession<T, P> {
    /// Creates the session in `Loading(0)` and schedules every boundary on `timer`.
    #[instrument(skip_all, fields(stages = pipeline.stage_count()))]
    pub fn mount(pipeline: Pipeline, timer: &mut T, provider: P) -> Self {
        let machine = ReadinessMachine::new(pipeline);
        let handles = machine.arm(timer);
        info!(
            "Dashboard session mounted, data expected after {:?}",
            machine.pipeline().total_duration()
        );
        Self {
            machine,
            provider,
            handles,
        }
    }

    pub fn machine(&self) -> &ReadinessMachine {
        &self.machine
    }

    pub fn state(&self) -> &ReadinessState {
        self.machine.state()
    }

    pub fn progress(&self) -> Option<f64> {
        self.machine.progress()
    }

    pub fn is_settled(&self) -> bool {
        self.machine.state().is_terminal()
    }

    pub fn is_mounted(&self) -> bool {
        !self.machine.is_torn_down()
    }

    pub fn subscribe(&mut self, observer: impl FnMut(&ReadinessState) + 'static) {
        self.machine.subscribe(observer);
    }

    pub fn render_plan(&self) -> RenderPlan<'_> {
        compose(self.machine.state(), self.machine.pipeline())
    }

    /// Delivers a fired boundary. On the last one the provider is awaited and
    /// the session settles as `Ready` or `Failed`.
    pub async fn on_boundary(&mut self, boundary: usize) -> Transition {
        match self.machine.on_boundary(boundary) {
            Transition::FetchRequested => {
                let result = self.provider.fetch_dashboard_data().await;
                let transition = self.machine.on_data(result);
                self.handles.clear();
                transition
            }
            other => other,
        }
    }

    /// Cancels every pending boundary and detaches the machine.
    pub fn unmount(&mut self) {
        if self.machine.is_torn_down() {
            return;
        }
        debug!("Unmounting dashboard session, cancelling {} timers", self.handles.len());
        self.handles.clear();
        self.machine.teardown();
    }
}

impl<T: Timer, P: ForecastProvider> Drop for DashboardSession<T, P> {
    fn drop(&mut self) {
        self.unmount();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ProviderError;
    use crate::provider::StubForecastProvider;
    use crate::readiness::IgnoreReason;
    use crate::timer::ManualTimer;
    use async_trait::async_trait;
    use common::DashboardData;
    use std::cell::{Cell, RefCell};
    use std::rc::Rc;
    use std::time::Duration;
    use tracing::Level;
    use tracing_subscriber::FmtSubscriber;

    /// Initialize tracing for tests with output to STDERR, level from RUST_LOG
    /// (defaults to WARN).
    fn init_test_tracing() -> tracing::subscriber::DefaultGuard {
        let log_level = std::env::var("RUST_LOG")
            .ok()
            .and_then(|level| level.parse::<Level>().ok())
            .unwrap_or(Level::WARN);

        let subscriber = FmtSubscriber::builder()
            .with_max_level(log_level)
            .with_writer(std::io::stderr)
            .finish();
        tracing::subscriber::set_default(subscriber)
    }

    /// Counts calls and delegates to a stub.
    struct CountingProvider {
        inner: StubForecastProvider,
        calls: Rc<Cell<usize>>,
    }

    #[async_trait(?Send)]
    impl ForecastProvider for CountingProvider {
        async fn fetch_dashboard_data(&self) -> Result<DashboardData, ProviderError> {
            self.calls.set(self.calls.get() + 1);
            self.inner.fetch_dashboard_data().await
        }
    }

    async fn run_until_settled<P: ForecastProvider>(
        timer: &ManualTimer,
        session: &mut DashboardSession<ManualTimer, P>,
        step: Duration,
    ) {
        for _ in 0..100 {
            for boundary in timer.advance(step) {
                session.on_boundary(boundary).await;
            }
            if session.is_settled() {
                return;
            }
        }
        panic!("session never settled");
    }

    #[tokio::test]
    async fn test_session_reaches_ready_after_all_deadlines() {
        let _guard = init_test_tracing();
        let mut timer = ManualTimer::new();
        let calls = Rc::new(Cell::new(0));
        let provider = CountingProvider {
            inner: StubForecastProvider::sample(),
            calls: calls.clone(),
        };
        let mut session = DashboardSession::mount(Pipeline::default(), &mut timer, provider);
        assert_eq!(timer.pending(), 3);

        // Nothing happens before the first deadline
        assert!(timer.advance(Duration::from_millis(1499)).is_empty());
        assert_eq!(session.state(), &ReadinessState::Loading { stage: 0 });

        for boundary in timer.advance(Duration::from_millis(1)) {
            session.on_boundary(boundary).await;
        }
        assert_eq!(session.state(), &ReadinessState::Loading { stage: 1 });

        for boundary in timer.advance(Duration::from_millis(1500)) {
            session.on_boundary(boundary).await;
        }
        assert_eq!(session.state(), &ReadinessState::Loading { stage: 2 });
        assert_eq!(calls.get(), 0);

        for boundary in timer.advance(Duration::from_millis(1500)) {
            assert_eq!(session.on_boundary(boundary).await, Transition::Ready);
        }
        assert!(session.is_settled());
        assert_eq!(calls.get(), 1);
        assert!(matches!(session.render_plan(), RenderPlan::Dashboard(_)));
    }

    #[tokio::test]
    async fn test_observed_sequence_is_ordered() {
        let _guard = init_test_tracing();
        let mut timer = ManualTimer::new();
        let mut session =
            DashboardSession::mount(Pipeline::default(), &mut timer, StubForecastProvider::sample());
        let seen = Rc::new(RefCell::new(vec![session.state().clone()]));
        let sink = seen.clone();
        session.subscribe(move |state| sink.borrow_mut().push(state.clone()));

        run_until_settled(&timer, &mut session, Duration::from_millis(250)).await;

        let seen = seen.borrow();
        let stages: Vec<_> = seen.iter().filter_map(|s| s.stage()).collect();
        assert_eq!(stages, vec![0, 1, 2]);
        assert_eq!(seen.iter().filter(|s| s.is_terminal()).count(), 1);
        assert!(matches!(seen.last(), Some(ReadinessState::Ready(_))));
    }

    #[tokio::test]
    async fn test_late_single_advance_still_visits_every_stage() {
        let mut timer = ManualTimer::new();
        let mut session =
            DashboardSession::mount(Pipeline::default(), &mut timer, StubForecastProvider::sample());
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = seen.clone();
        session.subscribe(move |state| sink.borrow_mut().push(state.stage()));

        // The host was blocked well past every deadline
        let fired = timer.advance(Duration::from_secs(10));
        assert_eq!(fired, vec![0, 1, 2]);
        for boundary in fired {
            session.on_boundary(boundary).await;
        }

        assert_eq!(*seen.borrow(), vec![Some(1), Some(2), None]);
        assert!(session.is_settled());
    }

    #[tokio::test]
    async fn test_provider_failure_settles_as_failed() {
        let mut timer = ManualTimer::new();
        let mut session = DashboardSession::mount(
            Pipeline::default(),
            &mut timer,
            StubForecastProvider::failing("forecast service returned 500"),
        );

        run_until_settled(&timer, &mut session, Duration::from_millis(500)).await;

        assert_eq!(
            session.state(),
            &ReadinessState::Failed(ProviderError::Unavailable(
                "forecast service returned 500".to_string()
            ))
        );
        assert!(matches!(session.render_plan(), RenderPlan::Failed(_)));
    }

    #[tokio::test]
    async fn test_unmount_mid_loading_cancels_pending_boundaries() {
        let mut timer = ManualTimer::new();
        let calls = Rc::new(Cell::new(0));
        let provider = CountingProvider {
            inner: StubForecastProvider::sample(),
            calls: calls.clone(),
        };
        let mut session = DashboardSession::mount(Pipeline::default(), &mut timer, provider);
        let updates = Rc::new(Cell::new(0));
        let counter = updates.clone();
        session.subscribe(move |_| counter.set(counter.get() + 1));

        for boundary in timer.advance(Duration::from_millis(1600)) {
            session.on_boundary(boundary).await;
        }
        assert_eq!(updates.get(), 1);
        let fired_before = timer.fired();

        session.unmount();
        assert!(!session.is_mounted());
        assert_eq!(timer.pending(), 0);

        // Advance past every deadline: nothing fires
        let fired = timer.advance(Duration::from_secs(60));
        assert!(fired.is_empty());
        assert_eq!(timer.fired(), fired_before);

        // Even a boundary delivered by a misbehaving host is a no-op
        assert_eq!(
            session.on_boundary(2).await,
            Transition::Ignored(IgnoreReason::TornDown)
        );
        assert_eq!(updates.get(), 1);
        assert_eq!(calls.get(), 0);
        assert_eq!(session.state(), &ReadinessState::Loading { stage: 1 });
    }

    #[tokio::test]
    async fn test_dropping_session_cancels_timers() {
        let mut timer = ManualTimer::new();
        {
            let _session = DashboardSession::mount(
                Pipeline::default(),
                &mut timer,
                StubForecastProvider::sample(),
            );
            assert_eq!(timer.pending(), 3);
        }
        assert_eq!(timer.pending(), 0);
        assert!(timer.advance(Duration::from_secs(60)).is_empty());
    }

    #[tokio::test]
    async fn test_retry_mounts_a_fresh_session() {
        let mut timer = ManualTimer::new();
        let mut failed = DashboardSession::mount(
            Pipeline::default(),
            &mut timer,
            StubForecastProvider::failing("offline"),
        );
        run_until_settled(&timer, &mut failed, Duration::from_millis(500)).await;
        assert!(matches!(failed.state(), ReadinessState::Failed(_)));
        failed.unmount();

        let mut retried =
            DashboardSession::mount(Pipeline::default(), &mut timer, StubForecastProvider::sample());
        assert_eq!(retried.state(), &ReadinessState::Loading { stage: 0 });
        run_until_settled(&timer, &mut retried, Duration::from_millis(500)).await;
        assert!(matches!(retried.state(), ReadinessState::Ready(_)));
    }
}
