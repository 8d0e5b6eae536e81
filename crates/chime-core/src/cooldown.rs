use crate::schedule::Scheduler;
use std::cell::Cell;
use std::rc::Rc;
use std::time::Duration;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CooldownState {
    Idle,
    Cooling,
}

/// Rate limiter for a repeated trigger.
///
/// `Idle -> Cooling` when a trigger is accepted; a timer armed at that moment
/// moves it back to `Idle` after `window`. Triggers arriving while `Cooling`
/// are dropped, not queued.
#[derive(Clone, Debug)]
pub struct Cooldown {
    window: Duration,
    state: Rc<Cell<CooldownState>>,
}

impl Cooldown {
    pub fn new(window: Duration) -> Self {
        Self {
            window,
            state: Rc::new(Cell::new(CooldownState::Idle)),
        }
    }

    pub fn window(&self) -> Duration {
        self.window
    }

    pub fn state(&self) -> CooldownState {
        self.state.get()
    }

    pub fn is_cooling(&self) -> bool {
        self.state.get() == CooldownState::Cooling
    }

    /// Accept the trigger if idle and arm the reset timer. Returns whether the
    /// trigger was accepted.
    pub fn try_begin(&self, scheduler: &dyn Scheduler) -> bool {
        if self.is_cooling() {
            return false;
        }
        self.state.set(CooldownState::Cooling);
        let state = Rc::clone(&self.state);
        scheduler.defer(
            self.window,
            Box::new(move || state.set(CooldownState::Idle)),
        );
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schedule::TimerQueue;

    #[test]
    fn drops_triggers_inside_the_window() {
        let q = TimerQueue::new();
        let cd = Cooldown::new(Duration::from_millis(300));
        assert!(cd.try_begin(&q));
        assert_eq!(cd.state(), CooldownState::Cooling);
        q.advance(Duration::from_millis(150));
        assert!(!cd.try_begin(&q));
        // the rejected trigger must not extend the window
        q.advance(Duration::from_millis(150));
        assert_eq!(cd.state(), CooldownState::Idle);
        assert!(cd.try_begin(&q));
    }

    #[test]
    fn only_one_reset_timer_per_window() {
        let q = TimerQueue::new();
        let cd = Cooldown::new(Duration::from_millis(300));
        cd.try_begin(&q);
        cd.try_begin(&q);
        cd.try_begin(&q);
        assert_eq!(q.pending(), 1);
    }

    struct Immediate;

    impl Scheduler for Immediate {
        fn defer(&self, _delay: Duration, task: crate::schedule::Task) {
            task();
        }
    }

    #[test]
    fn reset_run_inline_leaves_cooldown_idle() {
        let cd = Cooldown::new(Duration::from_millis(300));
        assert!(cd.try_begin(&Immediate));
        assert_eq!(cd.state(), CooldownState::Idle);
        assert!(cd.try_begin(&Immediate));
    }
}
