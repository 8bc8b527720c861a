//! Intersection observers for scroll reveal.

use tracing::warn;
use vitrina_core::{Observation, ObserverOptions, RevealTarget, Subscription};
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{Element, IntersectionObserver, IntersectionObserverEntry, IntersectionObserverInit};

use crate::events::js_error;

/// A section element that can be revealed.
#[derive(Debug, Clone)]
pub struct DomSection(pub Element);

impl RevealTarget for DomSection {
    fn add_class(&self, class: &str) {
        if let Err(e) = self.0.class_list().add_1(class) {
            warn!(class, error = %js_error(&e), "Could not add reveal class");
        }
    }
}

type ObserverCallback = Closure<dyn FnMut(js_sys::Array, IntersectionObserver)>;

/// A live observer. Dropping it disconnects the observer.
struct ObserverGuard {
    observer: IntersectionObserver,
    _callback: ObserverCallback,
}

impl Drop for ObserverGuard {
    fn drop(&mut self) {
        self.observer.disconnect();
    }
}

/// Observe one section with its own observer.
pub fn observe_section(
    section: &DomSection,
    options: &ObserverOptions,
    mut on_change: Box<dyn FnMut(bool) -> Observation>,
) -> Subscription {
    let callback: ObserverCallback = Closure::new(
        move |entries: js_sys::Array, observer: IntersectionObserver| {
            for entry in entries.iter() {
                let entry: IntersectionObserverEntry = entry.unchecked_into();
                if on_change(entry.is_intersecting()) == Observation::Stop {
                    observer.unobserve(&entry.target());
                }
            }
        },
    );

    let init = IntersectionObserverInit::new();
    init.set_threshold(&JsValue::from_f64(options.threshold));
    init.set_root_margin(&options.root_margin);

    match IntersectionObserver::new_with_options(callback.as_ref().unchecked_ref(), &init) {
        Ok(observer) => {
            observer.observe(&section.0);
            Subscription::new(ObserverGuard {
                observer,
                _callback: callback,
            })
        }
        Err(e) => {
            warn!(error = %js_error(&e), "IntersectionObserver unavailable");
            Subscription::noop()
        }
    }
}
