//! Browser tests. Run with `wasm-pack test --headless --firefox crates/vitrina-web`.

#![cfg(target_arch = "wasm32")]
#![allow(clippy::unwrap_used)]

use vitrina_core::{CarouselConfig, MenuConfig, carousel, menu};
use vitrina_web::DomPage;
use vitrina_web::carousel::DomCarousel;
use wasm_bindgen::JsCast;
use wasm_bindgen_test::{wasm_bindgen_test, wasm_bindgen_test_configure};
use web_sys::{Element, HtmlElement};

wasm_bindgen_test_configure!(run_in_browser);

fn fixture(html: &str) -> (DomPage, Element) {
    let page = DomPage::current().unwrap();
    let root = page.document().create_element("div").unwrap();
    root.set_inner_html(html);
    page.document().body().unwrap().append_child(&root).unwrap();
    (page, root)
}

fn by_id(page: &DomPage, id: &str) -> HtmlElement {
    page.document()
        .get_element_by_id(id)
        .unwrap()
        .dyn_into::<HtmlElement>()
        .unwrap()
}

const CAROUSEL: &str = r#"
<div id="testSlider">
  <div class="slider-track" id="testTrack">
    <div class="slide"></div><div class="slide"></div><div class="slide"></div>
  </div>
  <button class="prev" id="testPrev"></button>
  <button class="next" id="testNext"></button>
</div>"#;

#[wasm_bindgen_test]
fn carousel_renders_and_wraps() {
    let (page, root) = fixture(CAROUSEL);
    let handle = carousel::bind(&page, &CarouselConfig::manual("testSlider")).unwrap();
    let track = by_id(&page, "testTrack");

    assert_eq!(track.style().get_property_value("width").unwrap(), "300%");
    assert_eq!(by_id(&page, "testSlider").dataset().get("resizeListenerAdded").as_deref(), Some("true"));

    by_id(&page, "testPrev").click();
    assert_eq!(handle.current_index(), 2);
    assert_eq!(
        track.style().get_property_value("transform").unwrap(),
        "translateX(-200%)"
    );

    by_id(&page, "testNext").click();
    assert_eq!(handle.current_index(), 0);

    handle.dispose();
    assert!(by_id(&page, "testSlider").dataset().get("resizeListenerAdded").is_none());
    root.remove();
}

#[wasm_bindgen_test]
fn missing_carousel_binds_nothing() {
    let page = DomPage::current().unwrap();
    assert!(carousel::bind(&page, &CarouselConfig::manual("noSuchSlider")).is_none());
}

const TRACKLESS: &str = r#"
<div id="tracklessSlider">
  <div class="slide" id="tracklessSlide"></div>
  <button class="next" id="tracklessNext"></button>
</div>"#;

#[wasm_bindgen_test]
fn container_without_track_binds_nothing() {
    let (page, root) = fixture(TRACKLESS);

    assert!(DomCarousel::find(page.document(), "tracklessSlider").is_none());
    assert!(carousel::bind(&page, &CarouselConfig::autoplay("tracklessSlider", 4000)).is_none());

    let container = by_id(&page, "tracklessSlider");
    assert!(container.dataset().get("resizeListenerAdded").is_none());

    // Nothing is listening: a click renders nothing.
    by_id(&page, "tracklessNext").click();
    let slide = by_id(&page, "tracklessSlide");
    assert_eq!(slide.style().length(), 0);
    assert!(slide.get_attribute("style").is_none());

    root.remove();
}

const MENU: &str = r##"
<div class="menu-controls"><button id="menuToggle"></button></div>
<nav id="navLinks"><button id="closeMenu"></button><a id="testLink" href="#">x</a></nav>
<div id="menuBackdrop"></div>"##;

#[wasm_bindgen_test]
fn menu_opens_and_closes() {
    let (page, root) = fixture(MENU);
    let handle = menu::bind(&page, &MenuConfig::default()).unwrap();
    let panel = by_id(&page, "navLinks");

    by_id(&page, "menuToggle").click();
    assert!(handle.is_open());
    assert!(panel.class_list().contains("open"));
    assert_eq!(
        page.document()
            .body()
            .unwrap()
            .style()
            .get_property_value("overflow")
            .unwrap(),
        "hidden"
    );

    by_id(&page, "testLink").click();
    assert!(!handle.is_open());
    assert!(!panel.class_list().contains("open"));

    drop(handle);
    root.remove();
}
