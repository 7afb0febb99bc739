//! Scheduling seam for stage boundaries.
//!
//! The readiness machine never sleeps itself. A host event loop implements
//! [`Timer`] and delivers each boundary back to the machine when its deadline
//! passes: `gloo-timers` in the browser, tokio tasks in the terminal preview and
//! [`ManualTimer`] in tests.

use std::cell::RefCell;
use std::rc::{Rc, Weak};
use std::time::Duration;

/// Schedules stage boundaries on a host event loop.
///
/// Implementations must cancel the scheduled callback when the returned handle
/// is dropped. Sessions rely on that to stop every pending boundary on unmount.
pub trait Timer {
    type Handle;

    /// Arrange for `boundary` to be delivered `deadline` after the moment of the call.
    fn schedule(&mut self, boundary: usize, deadline: Duration) -> Self::Handle;
}

#[derive(Debug)]
struct PendingBoundary {
    id: u64,
    boundary: usize,
    due: Duration,
}

#[derive(Debug, Default)]
struct ManualTimerState {
    now: Duration,
    next_id: u64,
    pending: Vec<PendingBoundary>,
    fired: usize,
}

/// Deterministic timer driven by explicit calls to [`ManualTimer::advance`].
///
/// Clones share the same simulated clock.
#[derive(Debug, Clone, Default)]
pub struct ManualTimer {
    state: Rc<RefCell<ManualTimerState>>,
}

/// Cancels its boundary when dropped.
#[derive(Debug)]
pub struct ManualTimerHandle {
    id: u64,
    state: Weak<RefCell<ManualTimerState>>,
}

impl Drop for ManualTimerHandle {
    fn drop(&mut self) {
        if let Some(state) = self.state.upgrade() {
            state.borrow_mut().pending.retain(|p| p.id != self.id);
        }
    }
}

impl ManualTimer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current simulated time.
    pub fn now(&self) -> Duration {
        self.state.borrow().now
    }

    /// Boundaries scheduled and not yet fired or cancelled.
    pub fn pending(&self) -> usize {
        self.state.borrow().pending.len()
    }

    /// Total number of boundaries delivered so far.
    pub fn fired(&self) -> usize {
        self.state.borrow().fired
    }

    /// Moves the clock forward by `by` and returns the boundaries that came due,
    /// ordered by deadline and then by scheduling order.
    pub fn advance(&self, by: Duration) -> Vec<usize> {
        let mut state = self.state.borrow_mut();
        state.now += by;
        let now = state.now;

        let mut due: Vec<PendingBoundary> = Vec::new();
        let mut index = 0;
        while index < state.pending.len() {
            if state.pending[index].due <= now {
                due.push(state.pending.remove(index));
            } else {
                index += 1;
            }
        }
        due.sort_by_key(|p| (p.due, p.id));
        state.fired += due.len();

        due.into_iter().map(|p| p.boundary).collect()
    }
}

impl Timer for ManualTimer {
    type Handle = ManualTimerHandle;

    fn schedule(&mut self, boundary: usize, deadline: Duration) -> ManualTimerHandle {
        let mut state = self.state.borrow_mut();
        let id = state.next_id;
        state.next_id += 1;
        let due = state.now + deadline;
        state.pending.push(PendingBoundary { id, boundary, due });

        ManualTimerHandle {
            id,
            state: Rc::downgrade(&self.state),
        }
    }
}
