//! Carousel markup bound to the DOM.
//!
//! Expected structure:
//!
//! ```html
//! <div id="imageSlider">
//!   <div class="slider-track">
//!     <div class="slide">...</div>
//!     <div class="slide"><video ...></video></div>
//!   </div>
//!   <button class="prev"></button>
//!   <button class="next"></button>
//! </div>
//! ```

use tracing::warn;
use vitrina_core::{CarouselView, Subscription};
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, HtmlElement, HtmlMediaElement};

use crate::events::{js_error, listen};

const TRACK_SELECTOR: &str = ".slider-track";
const SLIDE_SELECTOR: &str = ".slide";
const PREVIOUS_SELECTOR: &str = ".prev";
const NEXT_SELECTOR: &str = ".next";
const RESIZE_FLAG: &str = "resizeListenerAdded";

/// Every element matching `selector` under `root`, in document order.
pub fn select_all<T: JsCast>(root: &Element, selector: &str) -> Vec<T> {
    let Ok(nodes) = root.query_selector_all(selector) else {
        return Vec::new();
    };
    (0..nodes.length())
        .filter_map(|i| nodes.get(i))
        .filter_map(|node| node.dyn_into::<T>().ok())
        .collect()
}

/// First element matching `selector` under `root`.
pub fn select<T: JsCast>(root: &Element, selector: &str) -> Option<T> {
    root.query_selector(selector)
        .ok()
        .flatten()
        .and_then(|element| element.dyn_into::<T>().ok())
}

/// Set or remove an inline style property, logging failures.
pub fn write_style(element: &HtmlElement, property: &str, value: Option<&str>) {
    let style = element.style();
    let result = match value {
        Some(value) => style.set_property(property, value),
        None => style.remove_property(property).map(drop),
    };
    if let Err(e) = result {
        warn!(property, error = %js_error(&e), "Style write failed");
    }
}

/// One carousel container and its parts.
#[derive(Debug)]
pub struct DomCarousel {
    container: HtmlElement,
    track: HtmlElement,
    slides: Vec<HtmlElement>,
    videos: Vec<Option<HtmlMediaElement>>,
    previous: Option<Element>,
    next: Option<Element>,
}

impl DomCarousel {
    /// Resolve the carousel under `container_id`.
    ///
    /// Returns `None` when the container or its track is missing.
    pub fn find(document: &Document, container_id: &str) -> Option<Self> {
        let container = document
            .get_element_by_id(container_id)?
            .dyn_into::<HtmlElement>()
            .ok()?;
        let track = select::<HtmlElement>(&container, TRACK_SELECTOR)?;
        let slides: Vec<HtmlElement> = select_all(&container, SLIDE_SELECTOR);
        let videos = slides
            .iter()
            .map(|slide| select::<HtmlMediaElement>(slide, "video"))
            .collect();

        Some(Self {
            previous: select(&container, PREVIOUS_SELECTOR),
            next: select(&container, NEXT_SELECTOR),
            container,
            track,
            slides,
            videos,
        })
    }
}

impl CarouselView for DomCarousel {
    fn slide_count(&self) -> usize {
        self.slides.len()
    }

    fn set_track_style(&self, property: &str, value: &str) {
        write_style(&self.track, property, Some(value));
    }

    fn set_slide_style(&self, slide: usize, property: &str, value: &str) {
        if let Some(slide) = self.slides.get(slide) {
            write_style(slide, property, Some(value));
        }
    }

    fn clear_slide_style(&self, slide: usize, property: &str) {
        if let Some(slide) = self.slides.get(slide) {
            write_style(slide, property, None);
        }
    }

    fn stop_video(&self, slide: usize) {
        let Some(Some(video)) = self.videos.get(slide) else {
            return;
        };
        if let Err(e) = video.pause() {
            warn!(slide, error = %js_error(&e), "Video pause failed");
        }
        video.set_current_time(0.0);
    }

    fn resize_listener_attached(&self) -> bool {
        self.container.dataset().get(RESIZE_FLAG).is_some()
    }

    fn set_resize_listener_attached(&self, attached: bool) {
        let dataset = self.container.dataset();
        if attached {
            if let Err(e) = dataset.set(RESIZE_FLAG, "true") {
                warn!(error = %js_error(&e), "Could not mark resize listener");
            }
        } else {
            dataset.delete(RESIZE_FLAG);
        }
    }

    fn on_previous_click(&self, mut handler: Box<dyn FnMut()>) -> Option<Subscription> {
        self.previous
            .as_ref()
            .map(|button| listen(button, "click", move |_| handler()))
    }

    fn on_next_click(&self, mut handler: Box<dyn FnMut()>) -> Option<Subscription> {
        self.next
            .as_ref()
            .map(|button| listen(button, "click", move |_| handler()))
    }

    fn on_pointer_enter(&self, mut handler: Box<dyn FnMut()>) -> Subscription {
        listen(&self.container, "mouseenter", move |_| handler())
    }

    fn on_pointer_leave(&self, mut handler: Box<dyn FnMut()>) -> Subscription {
        listen(&self.container, "mouseleave", move |_| handler())
    }
}
