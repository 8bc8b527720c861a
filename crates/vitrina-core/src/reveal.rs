//! Scroll-triggered reveal animations.
//!
//! Each observed section is revealed the first time it scrolls into view and
//! is never watched again afterwards. The feature is desktop-only: at or below
//! the configured viewport width nothing is observed at all.

use std::cell::Cell;
use std::rc::Rc;

use tracing::{debug, info};

use crate::config::RevealConfig;
use crate::host::Subscription;

/// What an observer should do after a visibility notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Observation {
    /// Keep delivering notifications.
    Continue,
    /// Stop observing this target.
    Stop,
}

/// Intersection observer settings.
#[derive(Debug, Clone, PartialEq)]
pub struct ObserverOptions {
    /// Fraction of the target that must be visible.
    pub threshold: f64,
    /// Root margin, CSS syntax.
    pub root_margin: String,
}

impl From<&RevealConfig> for ObserverOptions {
    fn from(config: &RevealConfig) -> Self {
        Self {
            threshold: config.threshold,
            root_margin: config.root_margin.clone(),
        }
    }
}

/// A section that can be revealed.
pub trait RevealTarget {
    /// Add a CSS class to the section.
    fn add_class(&self, class: &str);
}

impl<T: RevealTarget + ?Sized> RevealTarget for Rc<T> {
    fn add_class(&self, class: &str) {
        (**self).add_class(class);
    }
}

/// Environment the reveal feature binds to.
pub trait RevealHost {
    /// Section handle type.
    type Section: RevealTarget + Clone + 'static;

    /// Current viewport width in CSS pixels.
    fn viewport_width(&self) -> f64;

    /// Look up a section by id.
    fn find_section(&self, id: &str) -> Option<Self::Section>;

    /// Watch a section's visibility.
    ///
    /// `on_change` receives `true` while the section intersects the viewport.
    /// The host stops observing once it returns [`Observation::Stop`].
    fn observe(
        &self,
        section: &Self::Section,
        options: &ObserverOptions,
        on_change: Box<dyn FnMut(bool) -> Observation>,
    ) -> Subscription;
}

/// Fire-once latch for a single section.
#[derive(Debug, Default)]
pub struct FireOnce {
    fired: Cell<bool>,
}

impl FireOnce {
    /// Whether the latch has fired.
    pub fn has_fired(&self) -> bool {
        self.fired.get()
    }

    /// Feed a visibility notification. Returns `true` exactly once, on the
    /// first visible notification.
    pub fn notify(&self, visible: bool) -> bool {
        if !visible || self.fired.get() {
            return false;
        }
        self.fired.set(true);
        true
    }
}

/// Installed reveal observers. Dropping it stops all observation.
#[derive(Debug)]
pub struct RevealHandle {
    sections: Vec<(String, Rc<FireOnce>)>,
    _observers: Vec<Subscription>,
}

impl RevealHandle {
    /// Ids of the sections being (or having been) observed.
    pub fn observed(&self) -> impl Iterator<Item = &str> {
        self.sections.iter().map(|(id, _)| id.as_str())
    }

    /// Whether the section with `id` has been revealed.
    pub fn is_revealed(&self, id: &str) -> bool {
        self.sections
            .iter()
            .any(|(section, latch)| section == id && latch.has_fired())
    }
}

/// Start observing the configured sections.
///
/// Returns `None` when the viewport is at or below the desktop threshold.
pub fn install<H: RevealHost>(host: &H, config: &RevealConfig) -> Option<RevealHandle> {
    let width = host.viewport_width();
    if width <= config.min_viewport_width {
        debug!(width, "Viewport below reveal threshold, skipping");
        return None;
    }

    let options = ObserverOptions::from(config);
    let mut sections = Vec::new();
    let mut observers = Vec::new();

    for entry in &config.sections {
        if entry.max_viewport_width.is_some_and(|max| width > max) {
            continue;
        }
        let Some(section) = host.find_section(&entry.id) else {
            debug!(section = %entry.id, "Reveal section not found");
            continue;
        };

        let latch = Rc::new(FireOnce::default());
        let target = section.clone();
        let class = config.revealed_class.clone();
        let fired = Rc::clone(&latch);

        observers.push(host.observe(
            &section,
            &options,
            Box::new(move |visible| {
                if fired.notify(visible) {
                    target.add_class(&class);
                }
                if fired.has_fired() {
                    Observation::Stop
                } else {
                    Observation::Continue
                }
            }),
        ));
        sections.push((entry.id.clone(), latch));
    }

    info!(sections = sections.len(), "Scroll reveal installed");
    Some(RevealHandle {
        sections,
        _observers: observers,
    })
}
