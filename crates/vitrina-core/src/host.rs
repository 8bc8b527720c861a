//! Host environment abstractions.
//!
//! The controllers in this crate never talk to a browser directly. They are
//! handed a host that can schedule timers and register listeners, and get
//! back RAII handles: dropping a [`Subscription`] removes the listener,
//! dropping a [`TimerHandle`] cancels the timer.
//!
//! Everything here is single-threaded, so nothing requires `Send` or `Sync`.

use std::any::Any;
use std::fmt;
use std::time::Duration;

/// A registered listener. Dropping it unregisters the listener.
pub struct Subscription {
    _guard: Box<dyn Any>,
}

impl Subscription {
    /// Wrap any guard whose `Drop` releases a listener.
    pub fn new<G: Any>(guard: G) -> Self {
        Self {
            _guard: Box::new(guard),
        }
    }

    /// A subscription that owns nothing.
    pub fn noop() -> Self {
        Self::new(())
    }
}

impl fmt::Debug for Subscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Subscription")
    }
}

/// A scheduled timer. Dropping it cancels the timer if it has not fired yet.
pub struct TimerHandle {
    _guard: Box<dyn Any>,
}

impl TimerHandle {
    /// Wrap any guard whose `Drop` cancels a timer.
    pub fn new<G: Any>(guard: G) -> Self {
        Self {
            _guard: Box::new(guard),
        }
    }
}

impl fmt::Debug for TimerHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("TimerHandle")
    }
}

// Spelled as an alias: mockall's automock rejects `Fn(..)` sugar in signatures.
type RepeatingTask = Box<dyn FnMut()>;
type OnceTask = Box<dyn FnOnce()>;

/// Timer scheduling provided by the host.
#[cfg_attr(test, mockall::automock)]
pub trait Scheduler {
    /// Run `task` every `period` until the returned handle is dropped.
    fn every(&self, period: Duration, task: RepeatingTask) -> TimerHandle;

    /// Run `task` once after `delay` unless the returned handle is dropped first.
    fn after(&self, delay: Duration, task: OnceTask) -> TimerHandle;
}

/// Identification of the client platform, supplied by the host at startup.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Platform {
    /// The client is an iPhone or iPod.
    pub is_iphone: bool,
}

impl Platform {
    /// A platform with no special capabilities.
    #[must_use]
    pub const fn generic() -> Self {
        Self { is_iphone: false }
    }
}
