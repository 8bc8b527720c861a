//! Browser timers behind the core [`Scheduler`] trait.

use std::time::Duration;

use gloo_timers::callback::{Interval, Timeout};
use vitrina_core::{MAX_TIMER_MILLIS, Scheduler, TimerHandle};

/// Convert a duration to the millisecond count `setTimeout` accepts.
///
/// gloo hands the value to the browser as an `i32`, so it is clamped to
/// `i32::MAX` rather than `u32::MAX`.
pub fn timer_millis(duration: Duration) -> u32 {
    let millis = u64::try_from(duration.as_millis()).unwrap_or(u64::MAX);
    u32::try_from(millis.min(MAX_TIMER_MILLIS)).unwrap_or(i32::MAX as u32)
}

/// Schedules work with `setInterval` / `setTimeout`.
///
/// The gloo handles clear their timer when dropped.
#[derive(Debug, Default, Clone, Copy)]
pub struct BrowserScheduler;

impl Scheduler for BrowserScheduler {
    fn every(&self, period: Duration, mut task: Box<dyn FnMut()>) -> TimerHandle {
        TimerHandle::new(Interval::new(timer_millis(period), move || task()))
    }

    fn after(&self, delay: Duration, task: Box<dyn FnOnce()>) -> TimerHandle {
        TimerHandle::new(Timeout::new(timer_millis(delay), task))
    }
}
