//! Mobile menu markup bound to the DOM.

use tracing::warn;
use vitrina_core::{ClickRegion, MenuConfig, MenuView, Subscription};
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, Event, HtmlElement, Node};

use crate::carousel::write_style;
use crate::events::{js_error, listen};

/// The elements a document click is classified against.
#[derive(Debug, Clone)]
struct MenuRegions {
    toggle: Element,
    panel: Element,
    backdrop: Option<Element>,
}

impl MenuRegions {
    fn region_of(&self, node: Option<&Node>) -> ClickRegion {
        if self.panel.contains(node) {
            ClickRegion::Panel
        } else if self.toggle.contains(node) {
            ClickRegion::Toggle
        } else if self
            .backdrop
            .as_ref()
            .is_some_and(|backdrop| backdrop.contains(node))
        {
            ClickRegion::Backdrop
        } else {
            ClickRegion::Outside
        }
    }
}

/// The menu's elements plus the classes it toggles.
#[derive(Debug)]
pub struct DomMenu {
    document: Document,
    body: Option<HtmlElement>,
    regions: MenuRegions,
    close: Element,
    controls: Option<Element>,
    config: MenuConfig,
}

fn event_node(event: &Event) -> Option<Node> {
    event.target().and_then(|target| target.dyn_into::<Node>().ok())
}

fn set_class(element: &Element, class: &str, on: bool) {
    if let Err(e) = element.class_list().toggle_with_force(class, on) {
        warn!(class, error = %js_error(&e), "Class toggle failed");
    }
}

impl DomMenu {
    /// Resolve the menu elements.
    ///
    /// Returns `None` when the toggle, the panel or the close button is missing.
    pub fn find(document: &Document, config: &MenuConfig) -> Option<Self> {
        let toggle = document.get_element_by_id(&config.toggle_id)?;
        let panel = document.get_element_by_id(&config.panel_id)?;
        let close = document.get_element_by_id(&config.close_id)?;
        let backdrop = document.get_element_by_id(&config.backdrop_id);
        let controls = toggle
            .closest(&format!(".{}", config.controls_class))
            .ok()
            .flatten()
            .or_else(|| toggle.parent_element());

        Some(Self {
            document: document.clone(),
            body: document.body(),
            regions: MenuRegions {
                toggle,
                panel,
                backdrop,
            },
            close,
            controls,
            config: config.clone(),
        })
    }
}

impl MenuView for DomMenu {
    fn set_panel_open(&self, open: bool) {
        set_class(&self.regions.panel, &self.config.panel_open_class, open);
    }

    fn set_backdrop_active(&self, active: bool) {
        if let Some(backdrop) = &self.regions.backdrop {
            set_class(backdrop, &self.config.backdrop_active_class, active);
        }
    }

    fn set_controls_open(&self, open: bool) {
        if let Some(controls) = &self.controls {
            set_class(controls, &self.config.controls_open_class, open);
        }
    }

    fn set_scroll_locked(&self, locked: bool) {
        if let Some(body) = &self.body {
            write_style(body, "overflow", locked.then_some("hidden"));
        }
    }

    fn on_toggle_click(&self, mut handler: Box<dyn FnMut()>) -> Subscription {
        listen(&self.regions.toggle, "click", move |event| {
            event.stop_propagation();
            handler();
        })
    }

    fn on_close_click(&self, mut handler: Box<dyn FnMut()>) -> Subscription {
        listen(&self.close, "click", move |event| {
            event.stop_propagation();
            handler();
        })
    }

    fn on_backdrop_click(&self, mut handler: Box<dyn FnMut()>) -> Option<Subscription> {
        self.regions
            .backdrop
            .as_ref()
            .map(|backdrop| listen(backdrop, "click", move |_| handler()))
    }

    fn on_link_click(&self, mut handler: Box<dyn FnMut()>) -> Subscription {
        // Delegated: fires for any `a` inside the panel.
        listen(&self.regions.panel, "click", move |event| {
            let on_link = event
                .target()
                .and_then(|target| target.dyn_into::<Element>().ok())
                .and_then(|element| element.closest("a").ok().flatten())
                .is_some();
            if on_link {
                handler();
            }
        })
    }

    fn on_document_click(&self, mut handler: Box<dyn FnMut(ClickRegion)>) -> Subscription {
        let regions = self.regions.clone();
        listen(&self.document, "click", move |event| {
            let node = event_node(&event);
            handler(regions.region_of(node.as_ref()));
        })
    }
}
