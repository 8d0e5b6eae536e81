use chime_core::{OnceTask, Scheduler, Task};
use std::time::Duration;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

/// `setTimeout`-backed scheduler; the browser event loop runs the task.
///
/// When no timer can be armed the task runs immediately instead, so a
/// cooldown reset is never lost.
#[derive(Clone, Copy, Debug, Default)]
pub struct TimeoutScheduler;

impl Scheduler for TimeoutScheduler {
    fn defer(&self, delay: Duration, task: Task) {
        let Some(window) = web::window() else {
            log::warn!("[timer] no window; running deferred task now");
            task();
            return;
        };
        let task = OnceTask::new(task);
        let pending = task.clone();
        let callback = Closure::once_into_js(move || {
            pending.run();
        });
        let ms = delay.as_millis().min(i32::MAX as u128) as i32;
        let result = window.set_timeout_with_callback_and_timeout_and_arguments_0(
            callback.unchecked_ref::<js_sys::Function>(),
            ms,
        );
        if let Err(e) = result {
            log::warn!("[timer] setTimeout failed: {:?}; running deferred task now", e);
            task.run();
        }
    }
}
