//! Deferred work.
//!
//! The engine never waits: anything that happens later (the second note of a
//! dyad, the end of a cooldown window) is handed to a [`Scheduler`] as a
//! one-shot task. The browser front-end backs this with `setTimeout`; the
//! native front-end and the tests drive a [`TimerQueue`] from their own loop.

use std::cell::{Cell, RefCell};
use std::rc::Rc;
use std::time::Duration;

pub type Task = Box<dyn FnOnce()>;

pub trait Scheduler {
    /// Run `task` once, no sooner than `delay` from now.
    fn defer(&self, delay: Duration, task: Task);
}

/// A task that can be handed to a timer while the caller keeps a way to run
/// it directly. Whichever [`run`](Self::run) comes first wins; later calls
/// do nothing. Clones share the same slot.
#[derive(Clone)]
pub struct OnceTask {
    slot: Rc<Cell<Option<Task>>>,
}

impl OnceTask {
    pub fn new(task: Task) -> Self {
        Self {
            slot: Rc::new(Cell::new(Some(task))),
        }
    }

    /// Returns `false` if the task had already run.
    pub fn run(&self) -> bool {
        match self.slot.take() {
            Some(task) => {
                task();
                true
            }
            None => false,
        }
    }
}

struct Pending {
    due: Duration,
    seq: u64,
    task: Task,
}

#[derive(Default)]
struct QueueState {
    now: Duration,
    next_seq: u64,
    pending: Vec<Pending>,
}

/// Virtual-clock timer queue.
///
/// Time only moves when the owner calls [`advance`](Self::advance) or
/// [`advance_to`](Self::advance_to); due tasks then run in due order, ties in
/// the order they were deferred. Tasks may defer further work, which runs in
/// the same call if it falls due before the target time. Clones share the
/// same queue.
#[derive(Clone, Default)]
pub struct TimerQueue {
    state: Rc<RefCell<QueueState>>,
}

impl TimerQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current virtual time since the queue was created.
    pub fn now(&self) -> Duration {
        self.state.borrow().now
    }

    pub fn pending(&self) -> usize {
        self.state.borrow().pending.len()
    }

    pub fn is_idle(&self) -> bool {
        self.state.borrow().pending.is_empty()
    }

    /// Time at which the next task falls due, if any.
    pub fn next_due(&self) -> Option<Duration> {
        self.state.borrow().pending.iter().map(|p| p.due).min()
    }

    pub fn advance(&self, dt: Duration) -> usize {
        let target = self.now() + dt;
        self.advance_to(target)
    }

    /// Move the clock to `target` (never backwards) running every task due on
    /// the way. Returns how many tasks ran.
    pub fn advance_to(&self, target: Duration) -> usize {
        let mut ran = 0;
        while let Some(task) = self.pop_due(target) {
            task();
            ran += 1;
        }
        let mut state = self.state.borrow_mut();
        if target > state.now {
            state.now = target;
        }
        ran
    }

    // The borrow must be released before the task runs: tasks may call
    // `defer` on this same queue.
    fn pop_due(&self, target: Duration) -> Option<Task> {
        let mut state = self.state.borrow_mut();
        let idx = state
            .pending
            .iter()
            .enumerate()
            .filter(|(_, p)| p.due <= target)
            .min_by_key(|(_, p)| (p.due, p.seq))
            .map(|(i, _)| i)?;
        let Pending { due, task, .. } = state.pending.swap_remove(idx);
        if due > state.now {
            state.now = due;
        }
        Some(task)
    }
}

impl Scheduler for TimerQueue {
    fn defer(&self, delay: Duration, task: Task) {
        let mut state = self.state.borrow_mut();
        let due = state.now + delay;
        let seq = state.next_seq;
        state.next_seq += 1;
        state.pending.push(Pending { due, seq, task });
    }
}
