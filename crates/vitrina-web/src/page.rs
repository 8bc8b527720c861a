//! The browser page as a host for every site feature.

use std::rc::Rc;

use tracing::warn;
use vitrina_core::{
    CarouselHost, MenuConfig, MenuHost, Observation, ObserverOptions, PatchHost, RevealHost,
    Scheduler, StyleTarget, Subscription, VideoHost,
};
use wasm_bindgen::JsCast;
use web_sys::{Document, HtmlElement, Window};

use crate::carousel::{DomCarousel, write_style};
use crate::events::{js_error, listen};
use crate::menu::DomMenu;
use crate::reveal::{DomSection, observe_section};
use crate::timers::BrowserScheduler;
use crate::video::DomGallery;

/// An element whose inline style the platform patch rewrites.
#[derive(Debug, Clone)]
pub struct DomElement(pub HtmlElement);

impl StyleTarget for DomElement {
    fn set_style(&self, property: &str, value: &str) {
        write_style(&self.0, property, Some(value));
    }
}

/// The live document plus a browser scheduler.
#[derive(Debug, Clone)]
pub struct DomPage {
    window: Window,
    document: Document,
    scheduler: Rc<BrowserScheduler>,
}

impl DomPage {
    /// Wrap the current window. Returns `None` outside a browser.
    pub fn current() -> Option<Self> {
        let window = web_sys::window()?;
        let document = window.document()?;
        Some(Self::new(window, document))
    }

    /// Wrap an explicit window and document.
    pub fn new(window: Window, document: Document) -> Self {
        Self {
            window,
            document,
            scheduler: Rc::new(BrowserScheduler),
        }
    }

    /// The wrapped window.
    pub const fn window(&self) -> &Window {
        &self.window
    }

    /// The wrapped document.
    pub const fn document(&self) -> &Document {
        &self.document
    }
}

impl CarouselHost for DomPage {
    type View = DomCarousel;

    fn find_carousel(&self, container_id: &str) -> Option<DomCarousel> {
        DomCarousel::find(&self.document, container_id)
    }

    fn on_resize(&self, mut handler: Box<dyn FnMut()>) -> Subscription {
        listen(&self.window, "resize", move |_| handler())
    }

    fn scheduler(&self) -> Rc<dyn Scheduler> {
        self.scheduler.clone()
    }
}

impl MenuHost for DomPage {
    type Menu = DomMenu;

    fn find_menu(&self, config: &MenuConfig) -> Option<DomMenu> {
        DomMenu::find(&self.document, config)
    }
}

impl RevealHost for DomPage {
    type Section = DomSection;

    fn viewport_width(&self) -> f64 {
        self.window
            .inner_width()
            .ok()
            .and_then(|width| width.as_f64())
            .unwrap_or_default()
    }

    fn find_section(&self, id: &str) -> Option<DomSection> {
        self.document.get_element_by_id(id).map(DomSection)
    }

    fn observe(
        &self,
        section: &DomSection,
        options: &ObserverOptions,
        on_change: Box<dyn FnMut(bool) -> Observation>,
    ) -> Subscription {
        observe_section(section, options, on_change)
    }
}

impl VideoHost for DomPage {
    type Gallery = DomGallery;

    fn find_gallery(&self, container_id: &str) -> Option<DomGallery> {
        DomGallery::find(&self.document, container_id)
    }
}

impl PatchHost for DomPage {
    type Element = DomElement;

    fn query(&self, selector: &str) -> Option<DomElement> {
        match self.document.query_selector(selector) {
            Ok(element) => element
                .and_then(|element| element.dyn_into::<HtmlElement>().ok())
                .map(DomElement),
            Err(e) => {
                warn!(selector, error = %js_error(&e), "Invalid selector");
                None
            }
        }
    }

    fn query_all(&self, selector: &str) -> Vec<DomElement> {
        let nodes = match self.document.query_selector_all(selector) {
            Ok(nodes) => nodes,
            Err(e) => {
                warn!(selector, error = %js_error(&e), "Invalid selector");
                return Vec::new();
            }
        };
        (0..nodes.length())
            .filter_map(|i| nodes.get(i))
            .filter_map(|node| node.dyn_into::<HtmlElement>().ok())
            .map(DomElement)
            .collect()
    }

    fn scheduler(&self) -> Rc<dyn Scheduler> {
        self.scheduler.clone()
    }
}
