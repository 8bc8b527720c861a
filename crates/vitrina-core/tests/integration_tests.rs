//! End-to-end behavior of the page controllers against the in-memory page.

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

use std::time::Duration;

use vitrina_core::testing::{FakeCarousel, FakeMenu, FakePage};
use vitrina_core::{
    CarouselConfig, Platform, RevealConfig, Site, SiteConfig, carousel, menu, patch, reveal,
    video,
};

const AUTOPLAY: Duration = Duration::from_millis(4000);

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_test_writer()
        .with_max_level(tracing::Level::DEBUG)
        .try_init();
}

fn image_page() -> (FakePage, FakeCarousel) {
    let page = FakePage::new();
    let slides = page.add_carousel("imageSlider", FakeCarousel::new(3));
    (page, slides)
}

// ---------------------------------------------------------------------------
// Carousel
// ---------------------------------------------------------------------------

#[test]
fn test_bind_renders_first_slide() {
    init_tracing();
    let (page, slides) = image_page();
    let handle = carousel::bind(&page, &CarouselConfig::manual("imageSlider")).unwrap();

    assert_eq!(handle.current_index(), 0);
    assert_eq!(handle.slide_count(), 3);
    assert_eq!(slides.track_style("transform").as_deref(), Some("translateX(-0%)"));
    assert_eq!(slides.track_style("width").as_deref(), Some("300%"));
    for slide in 0..3 {
        assert_eq!(slides.slide_style(slide, "flex-shrink").as_deref(), Some("0"));
        assert_eq!(slides.slide_style(slide, "flex-basis").as_deref(), Some("100%"));
        assert_eq!(slides.slide_style(slide, "width").as_deref(), Some("100%"));
        assert_eq!(slides.slide_style(slide, "min-width").as_deref(), Some("100%"));
        assert_eq!(slides.slide_style(slide, "max-width").as_deref(), Some("100%"));
        assert_eq!(slides.slide_style(slide, "opacity"), None);
    }
}

#[test]
fn test_show_slide_follows_wraparound_law() {
    let page = FakePage::new();
    page.add_carousel("gallery", FakeCarousel::new(4));
    let handle = carousel::bind(&page, &CarouselConfig::manual("gallery")).unwrap();

    for i in -9..9_isize {
        handle.show_slide(i);
        assert_eq!(handle.current_index() as isize, ((i % 4) + 4) % 4, "index {i}");
    }
}

#[test]
fn test_show_slide_stops_every_other_video() {
    let page = FakePage::new();
    let slides = page.add_carousel("videoSlider", FakeCarousel::with_videos(3));
    let handle = carousel::bind(&page, &CarouselConfig::manual("videoSlider")).unwrap();

    for video in 0..3 {
        slides.video(video).unwrap().play_to(12.5);
    }
    handle.show_slide(1);

    let current = slides.video(1).unwrap();
    assert!(current.is_playing());
    assert_eq!(current.current_time(), 12.5);
    for other in [0, 2] {
        let video = slides.video(other).unwrap();
        assert!(!video.is_playing());
        assert_eq!(video.current_time(), 0.0);
    }
}

#[test]
fn test_next_n_times_is_cyclic() {
    let page = FakePage::new();
    page.add_carousel("gallery", FakeCarousel::new(5));
    let handle = carousel::bind(&page, &CarouselConfig::manual("gallery")).unwrap();

    handle.show_slide(3);
    for _ in 0..5 {
        handle.next();
    }
    assert_eq!(handle.current_index(), 3);
}

#[test]
fn test_missing_markup_registers_nothing() {
    let page = FakePage::new();

    let handle = carousel::bind(&page, &CarouselConfig::autoplay("imageSlider", 4000));

    assert!(handle.is_none());
    assert_eq!(page.resize_listener_count(), 0);
    assert_eq!(page.clock().scheduled_count(), 0);
}

#[test]
fn test_resize_listener_attached_once_per_container() {
    let (page, slides) = image_page();
    let config = CarouselConfig::manual("imageSlider");

    let first = carousel::bind(&page, &config).unwrap();
    let second = carousel::bind(&page, &config).unwrap();

    assert!(slides.has_resize_flag());
    assert_eq!(page.resize_listener_count(), 1);
    drop(second);
    assert_eq!(page.resize_listener_count(), 1);
    assert!(slides.has_resize_flag());
    drop(first);
    assert_eq!(page.resize_listener_count(), 0);
    assert!(!slides.has_resize_flag());
}

#[test]
fn test_rebind_restores_resize_after_owner_disposed() {
    let (page, _slides) = image_page();
    let config = CarouselConfig::manual("imageSlider");

    let owner = carousel::bind(&page, &config).unwrap();
    let survivor = carousel::bind(&page, &config).unwrap();
    drop(owner);

    // The surviving instance never owned the listener and does not inherit it.
    page.resize();
    assert_eq!(page.clock().scheduled_count(), 0);
    survivor.next();
    assert_eq!(survivor.current_index(), 1);

    let rebound = carousel::bind(&page, &config).unwrap();
    assert_eq!(page.resize_listener_count(), 1);
    page.resize();
    page.clock().advance(Duration::from_millis(100));
    assert_eq!(page.clock().scheduled_count(), 1);
    assert_eq!(rebound.current_index(), 0);
}

#[test]
fn test_resize_is_debounced_and_keeps_index() {
    let (page, slides) = image_page();
    let handle = carousel::bind(&page, &CarouselConfig::manual("imageSlider")).unwrap();
    handle.next();

    page.resize();
    page.clock().advance(Duration::from_millis(60));
    page.resize();
    page.clock().advance(Duration::from_millis(60));
    page.resize();
    assert_eq!(page.clock().active_timers(), 1);

    page.clock().advance(Duration::from_millis(100));
    assert_eq!(page.clock().active_timers(), 0);
    assert_eq!(page.clock().scheduled_count(), 3);
    assert_eq!(handle.current_index(), 1);
    assert_eq!(slides.track_style("transform").as_deref(), Some("translateX(-100%)"));
}

#[test]
fn test_autoplay_advances_every_interval() {
    let (page, _slides) = image_page();
    let handle = carousel::bind(&page, &CarouselConfig::autoplay("imageSlider", 4000)).unwrap();

    page.clock().advance(AUTOPLAY);
    assert_eq!(handle.current_index(), 1);
    page.clock().advance(AUTOPLAY * 2);
    assert_eq!(handle.current_index(), 0);
}

#[test]
fn test_hover_pauses_and_resumes_with_single_timer() {
    let (page, slides) = image_page();
    let handle = carousel::bind(&page, &CarouselConfig::autoplay("imageSlider", 4000)).unwrap();
    assert_eq!(page.clock().active_timers(), 1);

    slides.pointer_enter();
    assert_eq!(page.clock().active_timers(), 0);
    assert!(!handle.is_autoplaying());
    page.clock().advance(AUTOPLAY * 3);
    assert_eq!(handle.current_index(), 0);

    slides.pointer_leave();
    assert_eq!(page.clock().active_timers(), 1);
    page.clock().advance(AUTOPLAY);
    assert_eq!(handle.current_index(), 1);
}

#[test]
fn test_repeated_leave_never_double_schedules() {
    let (page, slides) = image_page();
    let handle = carousel::bind(&page, &CarouselConfig::autoplay("imageSlider", 4000)).unwrap();

    slides.pointer_leave();
    slides.pointer_leave();
    slides.pointer_enter();
    slides.pointer_leave();
    assert_eq!(page.clock().active_timers(), 1);

    page.clock().advance(AUTOPLAY);
    assert_eq!(handle.current_index(), 1);
}

#[test]
fn test_image_carousel_scenario() {
    let (page, slides) = image_page();
    let handle = carousel::bind(&page, &CarouselConfig::autoplay("imageSlider", 4000)).unwrap();

    handle.next();
    assert_eq!(handle.current_index(), 1);
    assert_eq!(slides.track_style("transform").as_deref(), Some("translateX(-100%)"));

    handle.show_slide(0);
    handle.previous();
    assert_eq!(handle.current_index(), 2);
    assert_eq!(slides.track_style("transform").as_deref(), Some("translateX(-200%)"));
}

#[test]
fn test_video_carousel_scenario() {
    let page = FakePage::new();
    let slides = page.add_carousel("videoSlider", FakeCarousel::with_videos(2));
    let handle = carousel::bind(&page, &CarouselConfig::manual("videoSlider")).unwrap();

    let first = slides.video(0).unwrap();
    first.play_to(3.0);
    assert!(slides.click_next());

    assert_eq!(handle.current_index(), 1);
    assert!(!first.is_playing());
    assert_eq!(first.current_time(), 0.0);
    assert_eq!(slides.hover_listener_count(), 0);
    assert_eq!(page.clock().scheduled_count(), 0);
}

#[test]
fn test_buttons_are_optional() {
    let page = FakePage::new();
    let slides = page.add_carousel("gallery", FakeCarousel::without_buttons(2));
    let handle = carousel::bind(&page, &CarouselConfig::manual("gallery")).unwrap();

    assert!(!slides.click_next());
    assert!(!slides.click_previous());
    assert_eq!(handle.current_index(), 0);
}

#[test]
fn test_previous_button_wraps() {
    let (page, slides) = image_page();
    let handle = carousel::bind(&page, &CarouselConfig::manual("imageSlider")).unwrap();

    slides.click_previous();
    assert_eq!(handle.current_index(), 2);
}

#[test]
fn test_empty_carousel_is_harmless() {
    let page = FakePage::new();
    let slides = page.add_carousel("empty", FakeCarousel::new(0));
    let handle = carousel::bind(&page, &CarouselConfig::autoplay("empty", 1000)).unwrap();

    handle.next();
    handle.previous();
    page.clock().advance(Duration::from_secs(5));
    assert_eq!(handle.current_index(), 0);
    assert_eq!(slides.track_style("width").as_deref(), Some("0%"));
}

#[test]
fn test_carousels_are_independent() {
    let page = FakePage::new();
    page.add_carousel("imageSlider", FakeCarousel::new(3));
    page.add_carousel("videoSlider", FakeCarousel::with_videos(2));
    let images = carousel::bind(&page, &CarouselConfig::autoplay("imageSlider", 4000)).unwrap();
    let videos = carousel::bind(&page, &CarouselConfig::manual("videoSlider")).unwrap();

    videos.next();
    page.clock().advance(AUTOPLAY);

    assert_eq!(images.current_index(), 1);
    assert_eq!(videos.current_index(), 1);
    assert_eq!(page.resize_listener_count(), 2);
}

#[test]
fn test_dispose_releases_everything() {
    let (page, slides) = image_page();
    let handle = carousel::bind(&page, &CarouselConfig::autoplay("imageSlider", 4000)).unwrap();
    page.resize();

    handle.dispose();

    assert_eq!(page.clock().active_timers(), 0);
    assert_eq!(page.resize_listener_count(), 0);
    assert_eq!(slides.hover_listener_count(), 0);
    assert_eq!(slides.button_listener_count(), 0);
}

// ---------------------------------------------------------------------------
// Video exclusivity
// ---------------------------------------------------------------------------

#[test]
fn test_playing_one_video_pauses_siblings() {
    let page = FakePage::new();
    let slides = page.add_carousel("videoSlider", FakeCarousel::with_videos(3));
    let gallery = video::install(&page, "videoSlider").unwrap();
    assert_eq!(gallery.video_count(), 3);

    slides.video(0).unwrap().play_to(4.0);
    slides.video(2).unwrap().play();

    let first = slides.video(0).unwrap();
    assert!(!first.is_playing());
    // Sibling pausing keeps the position; only slide changes rewind.
    assert_eq!(first.current_time(), 4.0);
    assert!(slides.video(2).unwrap().is_playing());
}

#[test]
fn test_gallery_videos_are_muted() {
    let page = FakePage::new();
    let slides = page.add_carousel("videoSlider", FakeCarousel::with_videos(2));
    let _gallery = video::install(&page, "videoSlider").unwrap();

    assert!(slides.video(0).unwrap().is_muted());
    assert!(slides.video(1).unwrap().is_muted());
}

#[test]
fn test_both_exclusivity_triggers_coexist() {
    let page = FakePage::new();
    let slides = page.add_carousel("videoSlider", FakeCarousel::with_videos(2));
    let handle = carousel::bind(&page, &CarouselConfig::manual("videoSlider")).unwrap();
    let _gallery = video::install(&page, "videoSlider").unwrap();

    slides.video(0).unwrap().play_to(2.0);
    slides.video(1).unwrap().play();
    assert!(!slides.video(0).unwrap().is_playing());
    assert_eq!(slides.video(0).unwrap().current_time(), 2.0);

    handle.show_slide(0);
    assert!(!slides.video(1).unwrap().is_playing());
    assert_eq!(slides.video(1).unwrap().current_time(), 0.0);
}

#[test]
fn test_missing_gallery_is_skipped() {
    let page = FakePage::new();
    assert!(video::install(&page, "videoSlider").is_none());
}

// ---------------------------------------------------------------------------
// Menu
// ---------------------------------------------------------------------------

fn menu_page(has_backdrop: bool) -> (FakePage, FakeMenu) {
    let page = FakePage::new();
    let markup = page.add_menu(FakeMenu::new(has_backdrop));
    (page, markup)
}

#[test]
fn test_toggle_opens_menu() {
    let (page, markup) = menu_page(true);
    let handle = menu::bind(&page, &SiteConfig::default().menu).unwrap();

    markup.click_toggle();

    assert!(handle.is_open());
    assert!(markup.panel_open());
    assert!(markup.backdrop_active());
    assert!(markup.controls_open());
    assert!(markup.scroll_locked());
}

#[test]
fn test_close_triggers_restore_page() {
    let (page, markup) = menu_page(true);
    let handle = menu::bind(&page, &SiteConfig::default().menu).unwrap();

    markup.click_toggle();
    markup.click_close();
    assert!(!handle.is_open());
    assert!(!markup.panel_open());
    assert!(!markup.backdrop_active());
    assert!(!markup.controls_open());
    assert!(!markup.scroll_locked());

    markup.click_toggle();
    markup.click_backdrop();
    assert!(!handle.is_open());

    markup.click_toggle();
    markup.click_outside();
    assert!(!handle.is_open());
}

#[test]
fn test_link_click_closes_once() {
    let (page, markup) = menu_page(true);
    let handle = menu::bind(&page, &SiteConfig::default().menu).unwrap();

    markup.click_toggle();
    markup.click_link();

    assert!(!handle.is_open());
    assert_eq!(markup.panel_writes(), 2);
}

#[test]
fn test_clicks_inside_panel_keep_menu_open() {
    let (page, markup) = menu_page(true);
    let handle = menu::bind(&page, &SiteConfig::default().menu).unwrap();

    markup.click_toggle();
    markup.click_panel();

    assert!(handle.is_open());
}

#[test]
fn test_outside_clicks_while_closed_write_nothing() {
    let (page, markup) = menu_page(true);
    let _handle = menu::bind(&page, &SiteConfig::default().menu).unwrap();

    markup.click_outside();
    markup.click_outside();

    assert_eq!(markup.panel_writes(), 0);
}

#[test]
fn test_menu_without_backdrop() {
    let (page, markup) = menu_page(false);
    let handle = menu::bind(&page, &SiteConfig::default().menu).unwrap();

    markup.click_toggle();
    assert!(handle.is_open());
    assert!(!markup.backdrop_active());
    markup.click_backdrop();
    assert!(handle.is_open());
    markup.click_close();
    assert!(!handle.is_open());
}

#[test]
fn test_missing_menu_is_skipped() {
    let page = FakePage::new();
    assert!(menu::bind(&page, &SiteConfig::default().menu).is_none());
}

#[test]
fn test_menu_dispose_removes_listeners() {
    let (page, markup) = menu_page(true);
    let handle = menu::bind(&page, &SiteConfig::default().menu).unwrap();
    assert_eq!(markup.listener_count(), 5);

    drop(handle);
    assert_eq!(markup.listener_count(), 0);
    markup.click_toggle();
    assert!(!markup.panel_open());
}

// ---------------------------------------------------------------------------
// Scroll reveal
// ---------------------------------------------------------------------------

#[test]
fn test_section_revealed_once_then_unobserved() {
    let page = FakePage::new();
    let about = page.add_section("onama");
    let config = RevealConfig::default();
    let handle = reveal::install(&page, &config).unwrap();

    assert!(about.is_observed());
    assert_eq!(about.options().unwrap().threshold, 0.2);

    about.set_visible(false);
    assert!(!about.has_class("animate-in"));
    assert!(about.is_observed());

    about.set_visible(true);
    assert!(about.has_class("animate-in"));
    assert!(!about.is_observed());
    assert!(handle.is_revealed("onama"));
}

#[test]
fn test_reveal_disabled_on_narrow_viewport() {
    let page = FakePage::new();
    page.set_viewport_width(768.0);
    let about = page.add_section("onama");

    assert!(reveal::install(&page, &RevealConfig::default()).is_none());
    assert!(!about.is_observed());
}

#[test]
fn test_compact_only_section_needs_narrow_viewport() {
    let page = FakePage::new();
    let shop = page.add_section("shop");
    let contact = page.add_section("kontakt");

    let handle = reveal::install(&page, &RevealConfig::default()).unwrap();

    assert!(contact.is_observed());
    assert!(!shop.is_observed());
    assert_eq!(handle.observed().collect::<Vec<_>>(), vec!["kontakt"]);
}

#[test]
fn test_compact_section_observed_when_gate_allows() {
    let page = FakePage::new();
    page.set_viewport_width(400.0);
    let shop = page.add_section("shop");
    let config = RevealConfig {
        min_viewport_width: 320.0,
        ..RevealConfig::default()
    };

    let _handle = reveal::install(&page, &config).unwrap();
    assert!(shop.is_observed());
}

#[test]
fn test_reveal_dispose_stops_observing() {
    let page = FakePage::new();
    let contact = page.add_section("kontakt");
    let handle = reveal::install(&page, &RevealConfig::default()).unwrap();

    drop(handle);
    assert!(!contact.is_observed());
}

// ---------------------------------------------------------------------------
// Platform patch
// ---------------------------------------------------------------------------

#[test]
fn test_patch_skipped_on_other_platforms() {
    let page = FakePage::new();
    let menu = page.add_element(".mobile-menu");
    let link = page.add_element(".mobile-menu a");

    let handle = patch::apply(&page, Platform::generic(), &SiteConfig::default().platform_patch);

    assert!(handle.is_none());
    assert!(menu.is_unstyled());
    assert!(link.is_unstyled());
    assert_eq!(page.clock().scheduled_count(), 0);
}

#[test]
fn test_patch_styles_and_staggers_links() {
    let page = FakePage::new();
    let menu = page.add_element(".mobile-menu");
    let hero = page.add_element(".hero");
    let links: Vec<_> = (0..3).map(|_| page.add_element(".mobile-menu a")).collect();

    let handle = patch::apply(
        &page,
        Platform { is_iphone: true },
        &SiteConfig::default().platform_patch,
    )
    .unwrap();

    assert_eq!(handle.scheduled_fades(), 3);
    assert_eq!(menu.style("backdrop-filter").as_deref(), Some("blur(16px)"));
    assert_eq!(hero.style("opacity").as_deref(), Some("0.95"));
    assert_eq!(hero.style("transition").as_deref(), Some("opacity 0.3s ease"));
    assert!(links.iter().all(|link| link.style("opacity").as_deref() == Some("0")));

    page.clock().advance(Duration::ZERO);
    assert_eq!(links[0].style("opacity").as_deref(), Some("1"));
    assert_eq!(links[1].style("opacity").as_deref(), Some("0"));

    page.clock().advance(Duration::from_millis(150));
    assert_eq!(links[1].style("opacity").as_deref(), Some("1"));
    assert_eq!(links[2].style("opacity").as_deref(), Some("0"));

    page.clock().advance(Duration::from_millis(150));
    assert_eq!(links[2].style("opacity").as_deref(), Some("1"));
    assert_eq!(
        links[2].style("transition").as_deref(),
        Some("opacity 0.5s ease")
    );
}

// ---------------------------------------------------------------------------
// Whole site
// ---------------------------------------------------------------------------

#[test]
fn test_site_mounts_stock_page() {
    init_tracing();
    let page = FakePage::new();
    let images = page.add_carousel("imageSlider", FakeCarousel::new(3));
    let videos = page.add_carousel("videoSlider", FakeCarousel::with_videos(2));
    let markup = page.add_menu(FakeMenu::new(true));
    let about = page.add_section("onama");

    let site = Site::mount(&page, &SiteConfig::default(), Platform::generic());

    assert_eq!(site.carousels.len(), 2);
    assert!(site.videos.is_some());
    assert!(site.menu.is_some());
    assert!(site.reveal.is_some());
    assert!(site.patch.is_none());

    page.clock().advance(AUTOPLAY);
    assert_eq!(site.carousel("imageSlider").unwrap().current_index(), 1);
    assert_eq!(site.carousel("videoSlider").unwrap().current_index(), 0);
    assert_eq!(images.track_style("transform").as_deref(), Some("translateX(-100%)"));
    assert!(videos.video(0).unwrap().is_muted());

    markup.click_toggle();
    assert!(markup.panel_open());
    about.set_visible(true);
    assert!(about.has_class("animate-in"));

    drop(site);
    assert_eq!(page.clock().active_timers(), 0);
    assert_eq!(page.resize_listener_count(), 0);
}

#[test]
fn test_site_on_empty_page_mounts_nothing() {
    let page = FakePage::new();
    let site = Site::mount(&page, &SiteConfig::default(), Platform { is_iphone: true });

    assert!(site.carousels.is_empty());
    assert!(site.videos.is_none());
    assert!(site.menu.is_none());
    assert!(site.patch.is_some());
    assert_eq!(site.patch.as_ref().unwrap().scheduled_fades(), 0);
}
