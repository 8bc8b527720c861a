//! DOM event listeners with RAII removal.

use tracing::warn;
use vitrina_core::{Error, Subscription};
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{Event, EventTarget};

/// Render a JavaScript error value as text.
pub fn js_error(value: &JsValue) -> String {
    value
        .as_string()
        .or_else(|| {
            value
                .dyn_ref::<js_sys::Error>()
                .map(|error| String::from(error.message()))
        })
        .unwrap_or_else(|| format!("{value:?}"))
}

/// An attached DOM event listener. Dropping it removes the listener.
pub struct EventListener {
    target: EventTarget,
    event_type: &'static str,
    callback: Closure<dyn FnMut(Event)>,
}

impl std::fmt::Debug for EventListener {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventListener")
            .field("event_type", &self.event_type)
            .finish_non_exhaustive()
    }
}

impl EventListener {
    /// Attach `handler` to `target` for `event_type`.
    pub fn new<F>(target: &EventTarget, event_type: &'static str, handler: F) -> Result<Self, Error>
    where
        F: FnMut(Event) + 'static,
    {
        let callback = Closure::<dyn FnMut(Event)>::new(handler);
        target
            .add_event_listener_with_callback(event_type, callback.as_ref().unchecked_ref())
            .map_err(|e| Error::dom(format!("addEventListener({event_type})"), js_error(&e)))?;

        Ok(Self {
            target: target.clone(),
            event_type,
            callback,
        })
    }
}

impl Drop for EventListener {
    fn drop(&mut self) {
        if let Err(e) = self
            .target
            .remove_event_listener_with_callback(self.event_type, self.callback.as_ref().unchecked_ref())
        {
            warn!(event = self.event_type, error = %js_error(&e), "Failed to remove listener");
        }
    }
}

/// Attach a listener and wrap it as a [`Subscription`].
///
/// A failed attachment is logged and yields a subscription that owns nothing.
pub fn listen<F>(target: &EventTarget, event_type: &'static str, handler: F) -> Subscription
where
    F: FnMut(Event) + 'static,
{
    match EventListener::new(target, event_type, handler) {
        Ok(listener) => Subscription::new(listener),
        Err(e) => {
            warn!(error = %e, "Listener not attached");
            Subscription::noop()
        }
    }
}
