//! Carousel controller.
//!
//! A carousel is a track of full-width slides moved with a percentage
//! `translateX`, so the geometry stays correct at any container width. Each
//! bound carousel owns its index and timers. Nothing is shared between
//! instances.
//!
//! ```rust,ignore
//! use vitrina_core::{CarouselConfig, carousel};
//!
//! // `host` resolves container ids to views and owns the window listeners.
//! if let Some(gallery) = carousel::bind(&host, &CarouselConfig::autoplay("imageSlider", 4000)) {
//!     gallery.next();
//! }
//! ```

use std::cell::RefCell;
use std::rc::{Rc, Weak};
use std::time::Duration;

use tracing::{debug, info, trace};

use crate::config::CarouselConfig;
use crate::host::{Scheduler, Subscription, TimerHandle};

/// Quiet period after the last resize event before the slide is re-rendered.
pub const RESIZE_DEBOUNCE: Duration = Duration::from_millis(100);

/// Layout properties written on every slide so each one spans the container.
pub const SLIDE_LAYOUT: [(&str, &str); 5] = [
    ("flex-shrink", "0"),
    ("flex-basis", "100%"),
    ("width", "100%"),
    ("min-width", "100%"),
    ("max-width", "100%"),
];

/// Inline properties removed from every slide so stylesheets control visibility.
pub const SLIDE_CLEARED: [&str; 3] = ["opacity", "visibility", "display"];

/// Wrap any index into `0..count`.
///
/// Returns 0 for an empty carousel.
#[must_use]
pub fn wrap_index(target: isize, count: usize) -> usize {
    if count == 0 {
        return 0;
    }
    // Slide counts come from the DOM and are far below isize::MAX.
    target.rem_euclid(count as isize) as usize
}

/// Track `transform` value showing the slide at `index`.
#[must_use]
pub fn track_transform(index: usize) -> String {
    format!("translateX(-{}%)", index * 100)
}

/// Track `width` value for `count` slides.
#[must_use]
pub fn track_width(count: usize) -> String {
    format!("{}%", count * 100)
}

// Spelled as an alias: mockall's automock rejects `Fn(..)` sugar in signatures.
type Handler = Box<dyn FnMut()>;

/// The markup of one carousel, as seen by the controller.
#[cfg_attr(test, mockall::automock)]
pub trait CarouselView {
    /// Number of slides in the track. Fixed for the lifetime of the view.
    fn slide_count(&self) -> usize;

    /// Set an inline style property on the track.
    fn set_track_style(&self, property: &str, value: &str);

    /// Set an inline style property on a slide.
    fn set_slide_style(&self, slide: usize, property: &str, value: &str);

    /// Remove an inline style property from a slide.
    fn clear_slide_style(&self, slide: usize, property: &str);

    /// Pause the slide's video and rewind it to the start. No-op without a video.
    fn stop_video(&self, slide: usize);

    /// Whether a resize listener was already attached for this container.
    fn resize_listener_attached(&self) -> bool;

    /// Record (or clear) resize listener attachment on the container.
    fn set_resize_listener_attached(&self, attached: bool);

    /// Listen for clicks on the previous button, if the markup has one.
    fn on_previous_click(&self, handler: Handler) -> Option<Subscription>;

    /// Listen for clicks on the next button, if the markup has one.
    fn on_next_click(&self, handler: Handler) -> Option<Subscription>;

    /// Listen for the pointer entering the container.
    fn on_pointer_enter(&self, handler: Handler) -> Subscription;

    /// Listen for the pointer leaving the container.
    fn on_pointer_leave(&self, handler: Handler) -> Subscription;
}

/// Environment a carousel binds to.
pub trait CarouselHost {
    /// View type produced for a container.
    type View: CarouselView + 'static;

    /// Resolve a container id to its view.
    ///
    /// Returns `None` when the container or its track is missing.
    fn find_carousel(&self, container_id: &str) -> Option<Self::View>;

    /// Listen for viewport resizes.
    fn on_resize(&self, handler: Box<dyn FnMut()>) -> Subscription;

    /// Timer scheduling.
    fn scheduler(&self) -> Rc<dyn Scheduler>;
}

/// Mutable state of one carousel.
struct Carousel<V> {
    view: V,
    slide_count: usize,
    index: usize,
    interval: Option<Duration>,
    autoplay: Option<TimerHandle>,
    pending_resize: Option<TimerHandle>,
    owns_resize_flag: bool,
}

impl<V: CarouselView> Carousel<V> {
    fn show_slide(&mut self, target: isize) {
        self.index = wrap_index(target, self.slide_count);
        trace!(index = self.index, "Showing slide");

        self.view
            .set_track_style("transform", &track_transform(self.index));
        self.view
            .set_track_style("width", &track_width(self.slide_count));

        for slide in 0..self.slide_count {
            for (property, value) in SLIDE_LAYOUT {
                self.view.set_slide_style(slide, property, value);
            }
            for property in SLIDE_CLEARED {
                self.view.clear_slide_style(slide, property);
            }
        }

        for slide in (0..self.slide_count).filter(|&slide| slide != self.index) {
            self.view.stop_video(slide);
        }
    }

    fn step(&mut self, delta: isize) {
        self.show_slide(self.index as isize + delta);
    }
}

/// A bound carousel.
///
/// Dropping the handle cancels its timers and removes every listener it
/// registered. Only the first instance bound to a container owns the resize
/// listener; when it is dropped, other live instances on that container get
/// no resize handling until the container is bound again.
pub struct CarouselHandle<V: CarouselView> {
    container_id: String,
    state: Rc<RefCell<Carousel<V>>>,
    _listeners: Vec<Subscription>,
}

impl<V: CarouselView> std::fmt::Debug for CarouselHandle<V> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let state = self.state.borrow();
        f.debug_struct("CarouselHandle")
            .field("container_id", &self.container_id)
            .field("index", &state.index)
            .field("slide_count", &state.slide_count)
            .field("autoplay_active", &state.autoplay.is_some())
            .finish()
    }
}

impl<V: CarouselView> CarouselHandle<V> {
    /// Id of the container this carousel is bound to.
    pub fn container_id(&self) -> &str {
        &self.container_id
    }

    /// Index of the visible slide.
    pub fn current_index(&self) -> usize {
        self.state.borrow().index
    }

    /// Number of slides.
    pub fn slide_count(&self) -> usize {
        self.state.borrow().slide_count
    }

    /// Whether an autoplay timer is currently running.
    pub fn is_autoplaying(&self) -> bool {
        self.state.borrow().autoplay.is_some()
    }

    /// Show the slide at `target`, wrapping out-of-range values.
    pub fn show_slide(&self, target: isize) {
        self.state.borrow_mut().show_slide(target);
    }

    /// Advance to the next slide, wrapping to the first.
    pub fn next(&self) {
        self.state.borrow_mut().step(1);
    }

    /// Go back to the previous slide, wrapping to the last.
    pub fn previous(&self) {
        self.state.borrow_mut().step(-1);
    }

    /// Release timers and listeners.
    pub fn dispose(self) {
        drop(self);
    }
}

impl<V: CarouselView> Drop for CarouselHandle<V> {
    fn drop(&mut self) {
        let mut state = self.state.borrow_mut();
        state.autoplay = None;
        state.pending_resize = None;
        if state.owns_resize_flag {
            state.view.set_resize_listener_attached(false);
        }
        debug!(container = %self.container_id, "Carousel disposed");
    }
}

/// Callback that applies `action` to the carousel if it is still alive.
fn with_state<V, F>(state: &Weak<RefCell<Carousel<V>>>, action: F) -> impl FnMut() + 'static
where
    V: CarouselView + 'static,
    F: Fn(&mut Carousel<V>) + 'static,
{
    let state = state.clone();
    move || {
        if let Some(state) = state.upgrade() {
            action(&mut state.borrow_mut());
        }
    }
}

fn start_autoplay<V: CarouselView + 'static>(
    scheduler: &dyn Scheduler,
    state: &Weak<RefCell<Carousel<V>>>,
    interval: Duration,
) -> TimerHandle {
    scheduler.every(interval, Box::new(with_state(state, |c| c.step(1))))
}

/// Bind a carousel to its container.
///
/// Returns `None`, without registering anything, when the host cannot find
/// the container or its track. On success the first slide is rendered.
pub fn bind<H: CarouselHost>(
    host: &H,
    config: &CarouselConfig,
) -> Option<CarouselHandle<H::View>> {
    let Some(view) = host.find_carousel(&config.container_id) else {
        debug!(container = %config.container_id, "Carousel markup not found, skipping");
        return None;
    };

    let slide_count = view.slide_count();
    let interval = config.autoplay_interval().filter(|d| !d.is_zero());
    let scheduler = host.scheduler();

    let state = Rc::new(RefCell::new(Carousel {
        view,
        slide_count,
        index: 0,
        interval,
        autoplay: None,
        pending_resize: None,
        owns_resize_flag: false,
    }));
    let weak = Rc::downgrade(&state);
    let mut listeners = Vec::new();

    {
        let mut carousel = state.borrow_mut();

        if !carousel.view.resize_listener_attached() {
            let debounce_scheduler = Rc::clone(&scheduler);
            let debounce_state = weak.clone();
            listeners.push(host.on_resize(Box::new(move || {
                let Some(state) = debounce_state.upgrade() else {
                    return;
                };
                let timer = debounce_scheduler.after(
                    RESIZE_DEBOUNCE,
                    Box::new(with_state(&debounce_state, |c| c.step(0))),
                );
                // Replacing the handle cancels the previous pending re-render.
                state.borrow_mut().pending_resize = Some(timer);
            })));
            carousel.view.set_resize_listener_attached(true);
            carousel.owns_resize_flag = true;
        }

        if let Some(subscription) = carousel
            .view
            .on_previous_click(Box::new(with_state(&weak, |c| c.step(-1))))
        {
            listeners.push(subscription);
        }
        if let Some(subscription) = carousel
            .view
            .on_next_click(Box::new(with_state(&weak, |c| c.step(1))))
        {
            listeners.push(subscription);
        }

        if let Some(interval) = carousel.interval {
            carousel.autoplay = Some(start_autoplay(scheduler.as_ref(), &weak, interval));

            listeners.push(carousel.view.on_pointer_enter(Box::new(with_state(
                &weak,
                |c| c.autoplay = None,
            ))));

            let resume_scheduler = Rc::clone(&scheduler);
            let resume_state = weak.clone();
            listeners.push(carousel.view.on_pointer_leave(Box::new(move || {
                if let Some(state) = resume_state.upgrade() {
                    let mut carousel = state.borrow_mut();
                    // Cancel before rescheduling so two timers never overlap.
                    carousel.autoplay = None;
                    carousel.autoplay =
                        Some(start_autoplay(resume_scheduler.as_ref(), &resume_state, interval));
                }
            })));
        }

        carousel.show_slide(0);
    }

    info!(
        container = %config.container_id,
        slides = slide_count,
        autoplay_ms = interval.map(|d| d.as_millis()),
        "Carousel bound"
    );

    Some(CarouselHandle {
        container_id: config.container_id.clone(),
        state,
        _listeners: listeners,
    })
}
