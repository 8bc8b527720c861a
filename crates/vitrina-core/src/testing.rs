//! In-memory doubles of the host environment.
//!
//! [`FakePage`] implements every host trait without a browser, and
//! [`ManualClock`] runs timers on virtual time. They back this crate's tests
//! and can drive the controllers headlessly elsewhere.
//!
//! ```rust,ignore
//! let page = FakePage::new();
//! let gallery = page.add_carousel("imageSlider", FakeCarousel::new(3));
//! let handle = carousel::bind(&page, &CarouselConfig::autoplay("imageSlider", 4000)).unwrap();
//! page.clock().advance(Duration::from_millis(4000));
//! assert_eq!(handle.current_index(), 1);
//! ```

use std::cell::{Cell, RefCell};
use std::collections::{BTreeMap, HashMap};
use std::rc::{Rc, Weak};
use std::time::Duration;

use crate::carousel::{CarouselHost, CarouselView};
use crate::config::MenuConfig;
use crate::host::{Scheduler, Subscription, TimerHandle};
use crate::menu::{ClickRegion, MenuHost, MenuView};
use crate::patch::{PatchHost, StyleTarget};
use crate::reveal::{Observation, ObserverOptions, RevealHost, RevealTarget};
use crate::video::{VideoGallery, VideoHost};

type Handler<A> = Rc<RefCell<Box<dyn FnMut(A)>>>;

struct ListenerList<A> {
    next_id: u64,
    handlers: Vec<(u64, Handler<A>)>,
}

/// A list of event handlers that can be emitted to.
pub struct Listeners<A = ()> {
    inner: Rc<RefCell<ListenerList<A>>>,
}

impl<A> Clone for Listeners<A> {
    fn clone(&self) -> Self {
        Self {
            inner: Rc::clone(&self.inner),
        }
    }
}

impl<A> Default for Listeners<A> {
    fn default() -> Self {
        Self {
            inner: Rc::new(RefCell::new(ListenerList {
                next_id: 0,
                handlers: Vec::new(),
            })),
        }
    }
}

struct Unsubscribe<A> {
    list: Weak<RefCell<ListenerList<A>>>,
    id: u64,
}

impl<A> Drop for Unsubscribe<A> {
    fn drop(&mut self) {
        if let Some(list) = self.list.upgrade() {
            list.borrow_mut().handlers.retain(|(id, _)| *id != self.id);
        }
    }
}

impl<A: Copy + 'static> Listeners<A> {
    /// Register a handler; dropping the subscription removes it.
    pub fn subscribe(&self, handler: Box<dyn FnMut(A)>) -> Subscription {
        let mut list = self.inner.borrow_mut();
        let id = list.next_id;
        list.next_id += 1;
        list.handlers.push((id, Rc::new(RefCell::new(handler))));
        Subscription::new(Unsubscribe {
            list: Rc::downgrade(&self.inner),
            id,
        })
    }

    /// Call every registered handler with `arg`.
    pub fn emit(&self, arg: A) {
        let handlers: Vec<_> = self
            .inner
            .borrow()
            .handlers
            .iter()
            .map(|(_, handler)| Rc::clone(handler))
            .collect();
        for handler in handlers {
            (handler.borrow_mut())(arg);
        }
    }

    /// Number of registered handlers.
    pub fn len(&self) -> usize {
        self.inner.borrow().handlers.len()
    }

    /// Whether no handler is registered.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Listeners<()> {
    /// Register a handler that takes no argument.
    pub fn subscribe_fn(&self, mut handler: Box<dyn FnMut()>) -> Subscription {
        self.subscribe(Box::new(move |()| handler()))
    }
}

enum Task {
    Repeating {
        period: Duration,
        run: Box<dyn FnMut()>,
    },
    Once(Box<dyn FnOnce()>),
}

struct Pending {
    id: u64,
    due: Duration,
    live: Rc<Cell<bool>>,
    task: Task,
}

struct Cancel(Rc<Cell<bool>>);

impl Drop for Cancel {
    fn drop(&mut self) {
        self.0.set(false);
    }
}

#[derive(Default)]
struct ClockState {
    now: Cell<Duration>,
    next_id: Cell<u64>,
    scheduled: Cell<usize>,
    pending: RefCell<Vec<Pending>>,
}

/// A [`Scheduler`] driven by virtual time.
#[derive(Clone, Default)]
pub struct ManualClock {
    state: Rc<ClockState>,
}

impl std::fmt::Debug for ManualClock {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ManualClock")
            .field("now", &self.now())
            .field("active_timers", &self.active_timers())
            .finish()
    }
}

impl ManualClock {
    /// A clock at time zero with nothing scheduled.
    pub fn new() -> Self {
        Self::default()
    }

    /// Virtual time elapsed so far.
    pub fn now(&self) -> Duration {
        self.state.now.get()
    }

    /// Timers that are scheduled and not yet cancelled or fired.
    pub fn active_timers(&self) -> usize {
        self.state
            .pending
            .borrow()
            .iter()
            .filter(|pending| pending.live.get())
            .count()
    }

    /// Total number of timers ever scheduled.
    pub fn scheduled_count(&self) -> usize {
        self.state.scheduled.get()
    }

    fn push(&self, due: Duration, task: Task) -> TimerHandle {
        let id = self.state.next_id.get();
        self.state.next_id.set(id + 1);
        self.state.scheduled.set(self.state.scheduled.get() + 1);
        let live = Rc::new(Cell::new(true));
        self.state.pending.borrow_mut().push(Pending {
            id,
            due,
            live: Rc::clone(&live),
            task,
        });
        TimerHandle::new(Cancel(live))
    }

    fn take_next_due(&self, until: Duration) -> Option<Pending> {
        let mut pending = self.state.pending.borrow_mut();
        pending.retain(|p| p.live.get());
        let position = pending
            .iter()
            .enumerate()
            .filter(|(_, p)| p.due <= until)
            .min_by_key(|(_, p)| (p.due, p.id))
            .map(|(position, _)| position)?;
        Some(pending.remove(position))
    }

    /// Move time forward, firing every timer that comes due on the way.
    pub fn advance(&self, by: Duration) {
        let until = self.now() + by;
        while let Some(pending) = self.take_next_due(until) {
            self.state.now.set(pending.due);
            match pending.task {
                Task::Repeating { period, mut run } => {
                    run();
                    if pending.live.get() {
                        self.state.pending.borrow_mut().push(Pending {
                            id: pending.id,
                            due: pending.due + period,
                            live: pending.live,
                            task: Task::Repeating { period, run },
                        });
                    }
                }
                Task::Once(run) => {
                    pending.live.set(false);
                    run();
                }
            }
        }
        self.state.now.set(until);
    }
}

impl Scheduler for ManualClock {
    fn every(&self, period: Duration, task: Box<dyn FnMut()>) -> TimerHandle {
        let period = period.max(Duration::from_millis(1));
        self.push(self.now() + period, Task::Repeating { period, run: task })
    }

    fn after(&self, delay: Duration, task: Box<dyn FnOnce()>) -> TimerHandle {
        self.push(self.now() + delay, Task::Once(task))
    }
}

struct VideoState {
    playing: Cell<bool>,
    muted: Cell<bool>,
    current_time: Cell<f64>,
    play: Listeners,
}

/// A video element.
#[derive(Clone)]
pub struct FakeVideo {
    state: Rc<VideoState>,
}

impl Default for FakeVideo {
    fn default() -> Self {
        Self {
            state: Rc::new(VideoState {
                playing: Cell::new(false),
                muted: Cell::new(false),
                current_time: Cell::new(0.0),
                play: Listeners::default(),
            }),
        }
    }
}

impl std::fmt::Debug for FakeVideo {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FakeVideo")
            .field("playing", &self.is_playing())
            .field("muted", &self.is_muted())
            .field("current_time", &self.current_time())
            .finish()
    }
}

impl FakeVideo {
    /// Start playback and fire `play` listeners.
    pub fn play(&self) {
        self.state.playing.set(true);
        self.state.play.emit(());
    }

    /// Play until `seconds` into the video.
    pub fn play_to(&self, seconds: f64) {
        self.play();
        self.state.current_time.set(seconds);
    }

    /// Pause playback.
    pub fn pause(&self) {
        self.state.playing.set(false);
    }

    /// Whether the video is playing.
    pub fn is_playing(&self) -> bool {
        self.state.playing.get()
    }

    /// Whether the video is muted.
    pub fn is_muted(&self) -> bool {
        self.state.muted.get()
    }

    /// Playback position in seconds.
    pub fn current_time(&self) -> f64 {
        self.state.current_time.get()
    }
}

type StyleMap = BTreeMap<String, String>;

struct CarouselMarkup {
    track_style: RefCell<StyleMap>,
    slide_styles: RefCell<Vec<StyleMap>>,
    videos: Vec<Option<FakeVideo>>,
    resize_flag: Cell<bool>,
    previous: Option<Listeners>,
    next: Option<Listeners>,
    pointer_enter: Listeners,
    pointer_leave: Listeners,
}

/// Carousel markup: a track of slides, optional buttons and videos.
///
/// Clones share the same markup, like two lookups of the same DOM node.
#[derive(Clone)]
pub struct FakeCarousel {
    markup: Rc<CarouselMarkup>,
}

impl std::fmt::Debug for FakeCarousel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FakeCarousel")
            .field("slides", &self.markup.videos.len())
            .field("track_style", &self.markup.track_style.borrow())
            .finish_non_exhaustive()
    }
}

impl FakeCarousel {
    fn build(slides: usize, videos: bool, buttons: bool) -> Self {
        // Slides start with stale inline opacity that rendering must clear.
        let stale = StyleMap::from([("opacity".to_string(), "0".to_string())]);
        Self {
            markup: Rc::new(CarouselMarkup {
                track_style: RefCell::new(StyleMap::new()),
                slide_styles: RefCell::new(vec![stale; slides]),
                videos: (0..slides)
                    .map(|_| videos.then(FakeVideo::default))
                    .collect(),
                resize_flag: Cell::new(false),
                previous: buttons.then(Listeners::default),
                next: buttons.then(Listeners::default),
                pointer_enter: Listeners::default(),
                pointer_leave: Listeners::default(),
            }),
        }
    }

    /// Image slides with previous/next buttons.
    pub fn new(slides: usize) -> Self {
        Self::build(slides, false, true)
    }

    /// Video slides with previous/next buttons.
    pub fn with_videos(slides: usize) -> Self {
        Self::build(slides, true, true)
    }

    /// Image slides without navigation buttons.
    pub fn without_buttons(slides: usize) -> Self {
        Self::build(slides, false, false)
    }

    /// Click the next button. Returns `false` when there is none.
    pub fn click_next(&self) -> bool {
        self.markup.next.as_ref().map(|next| next.emit(())).is_some()
    }

    /// Click the previous button. Returns `false` when there is none.
    pub fn click_previous(&self) -> bool {
        self.markup
            .previous
            .as_ref()
            .map(|previous| previous.emit(()))
            .is_some()
    }

    /// Move the pointer over the carousel.
    pub fn pointer_enter(&self) {
        self.markup.pointer_enter.emit(());
    }

    /// Move the pointer off the carousel.
    pub fn pointer_leave(&self) {
        self.markup.pointer_leave.emit(());
    }

    /// An inline style property of the track.
    pub fn track_style(&self, property: &str) -> Option<String> {
        self.markup.track_style.borrow().get(property).cloned()
    }

    /// An inline style property of a slide.
    pub fn slide_style(&self, slide: usize, property: &str) -> Option<String> {
        self.markup
            .slide_styles
            .borrow()
            .get(slide)
            .and_then(|styles| styles.get(property).cloned())
    }

    /// The video in a slide, if it has one.
    pub fn video(&self, slide: usize) -> Option<FakeVideo> {
        self.markup.videos.get(slide).cloned().flatten()
    }

    /// Whether the resize registration flag is set on the container.
    pub fn has_resize_flag(&self) -> bool {
        self.markup.resize_flag.get()
    }

    /// Number of hover listeners currently registered.
    pub fn hover_listener_count(&self) -> usize {
        self.markup.pointer_enter.len() + self.markup.pointer_leave.len()
    }

    /// Number of button listeners currently registered.
    pub fn button_listener_count(&self) -> usize {
        [&self.markup.previous, &self.markup.next]
            .into_iter()
            .flatten()
            .map(Listeners::len)
            .sum()
    }

    fn gallery(&self) -> FakeGallery {
        FakeGallery {
            videos: self.markup.videos.iter().flatten().cloned().collect(),
        }
    }
}

impl CarouselView for FakeCarousel {
    fn slide_count(&self) -> usize {
        self.markup.videos.len()
    }

    fn set_track_style(&self, property: &str, value: &str) {
        self.markup
            .track_style
            .borrow_mut()
            .insert(property.to_string(), value.to_string());
    }

    fn set_slide_style(&self, slide: usize, property: &str, value: &str) {
        if let Some(styles) = self.markup.slide_styles.borrow_mut().get_mut(slide) {
            styles.insert(property.to_string(), value.to_string());
        }
    }

    fn clear_slide_style(&self, slide: usize, property: &str) {
        if let Some(styles) = self.markup.slide_styles.borrow_mut().get_mut(slide) {
            styles.remove(property);
        }
    }

    fn stop_video(&self, slide: usize) {
        if let Some(video) = self.video(slide) {
            video.pause();
            video.state.current_time.set(0.0);
        }
    }

    fn resize_listener_attached(&self) -> bool {
        self.markup.resize_flag.get()
    }

    fn set_resize_listener_attached(&self, attached: bool) {
        self.markup.resize_flag.set(attached);
    }

    fn on_previous_click(&self, handler: Box<dyn FnMut()>) -> Option<Subscription> {
        self.markup
            .previous
            .as_ref()
            .map(|previous| previous.subscribe_fn(handler))
    }

    fn on_next_click(&self, handler: Box<dyn FnMut()>) -> Option<Subscription> {
        self.markup
            .next
            .as_ref()
            .map(|next| next.subscribe_fn(handler))
    }

    fn on_pointer_enter(&self, handler: Box<dyn FnMut()>) -> Subscription {
        self.markup.pointer_enter.subscribe_fn(handler)
    }

    fn on_pointer_leave(&self, handler: Box<dyn FnMut()>) -> Subscription {
        self.markup.pointer_leave.subscribe_fn(handler)
    }
}

/// The videos of a carousel, as a gallery.
#[derive(Debug, Clone)]
pub struct FakeGallery {
    videos: Vec<FakeVideo>,
}

impl VideoGallery for FakeGallery {
    fn video_count(&self) -> usize {
        self.videos.len()
    }

    fn mute(&self, video: usize) {
        if let Some(video) = self.videos.get(video) {
            video.state.muted.set(true);
        }
    }

    fn pause(&self, video: usize) {
        if let Some(video) = self.videos.get(video) {
            video.pause();
        }
    }

    fn on_play(&self, video: usize, handler: Box<dyn FnMut()>) -> Subscription {
        self.videos
            .get(video)
            .map_or_else(Subscription::noop, |video| {
                video.state.play.subscribe_fn(handler)
            })
    }
}

struct MenuMarkup {
    has_backdrop: bool,
    panel_open: Cell<bool>,
    backdrop_active: Cell<bool>,
    controls_open: Cell<bool>,
    scroll_locked: Cell<bool>,
    panel_writes: Cell<usize>,
    toggle: Listeners,
    close: Listeners,
    backdrop: Listeners,
    links: Listeners,
    document: Listeners<ClickRegion>,
}

/// Menu markup with click simulation.
///
/// Toggle and close clicks do not propagate to the document; backdrop and
/// link clicks do.
#[derive(Clone)]
pub struct FakeMenu {
    markup: Rc<MenuMarkup>,
}

impl std::fmt::Debug for FakeMenu {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FakeMenu")
            .field("panel_open", &self.panel_open())
            .field("scroll_locked", &self.scroll_locked())
            .finish_non_exhaustive()
    }
}

impl FakeMenu {
    /// Menu markup, with or without a backdrop.
    pub fn new(has_backdrop: bool) -> Self {
        Self {
            markup: Rc::new(MenuMarkup {
                has_backdrop,
                panel_open: Cell::new(false),
                backdrop_active: Cell::new(false),
                controls_open: Cell::new(false),
                scroll_locked: Cell::new(false),
                panel_writes: Cell::new(0),
                toggle: Listeners::default(),
                close: Listeners::default(),
                backdrop: Listeners::default(),
                links: Listeners::default(),
                document: Listeners::default(),
            }),
        }
    }

    /// Click the hamburger toggle.
    pub fn click_toggle(&self) {
        self.markup.toggle.emit(());
    }

    /// Click the close button.
    pub fn click_close(&self) {
        self.markup.close.emit(());
    }

    /// Click the backdrop, if present.
    pub fn click_backdrop(&self) {
        if self.markup.has_backdrop {
            self.markup.backdrop.emit(());
            self.markup.document.emit(ClickRegion::Backdrop);
        }
    }

    /// Click a navigation link inside the panel.
    pub fn click_link(&self) {
        self.markup.links.emit(());
        self.markup.document.emit(ClickRegion::Panel);
    }

    /// Click somewhere inside the panel that is not a link.
    pub fn click_panel(&self) {
        self.markup.document.emit(ClickRegion::Panel);
    }

    /// Click outside the menu.
    pub fn click_outside(&self) {
        self.markup.document.emit(ClickRegion::Outside);
    }

    /// Whether the panel shows as open.
    pub fn panel_open(&self) -> bool {
        self.markup.panel_open.get()
    }

    /// Whether the backdrop shows as active.
    pub fn backdrop_active(&self) -> bool {
        self.markup.backdrop_active.get()
    }

    /// Whether the controls wrapper shows as open.
    pub fn controls_open(&self) -> bool {
        self.markup.controls_open.get()
    }

    /// Whether page scrolling is locked.
    pub fn scroll_locked(&self) -> bool {
        self.markup.scroll_locked.get()
    }

    /// Number of times the panel state was written.
    pub fn panel_writes(&self) -> usize {
        self.markup.panel_writes.get()
    }

    /// Number of registered listeners across all menu elements.
    pub fn listener_count(&self) -> usize {
        let m = &self.markup;
        m.toggle.len() + m.close.len() + m.backdrop.len() + m.links.len() + m.document.len()
    }
}

impl MenuView for FakeMenu {
    fn set_panel_open(&self, open: bool) {
        self.markup.panel_open.set(open);
        self.markup
            .panel_writes
            .set(self.markup.panel_writes.get() + 1);
    }

    fn set_backdrop_active(&self, active: bool) {
        if self.markup.has_backdrop {
            self.markup.backdrop_active.set(active);
        }
    }

    fn set_controls_open(&self, open: bool) {
        self.markup.controls_open.set(open);
    }

    fn set_scroll_locked(&self, locked: bool) {
        self.markup.scroll_locked.set(locked);
    }

    fn on_toggle_click(&self, handler: Box<dyn FnMut()>) -> Subscription {
        self.markup.toggle.subscribe_fn(handler)
    }

    fn on_close_click(&self, handler: Box<dyn FnMut()>) -> Subscription {
        self.markup.close.subscribe_fn(handler)
    }

    fn on_backdrop_click(&self, handler: Box<dyn FnMut()>) -> Option<Subscription> {
        self.markup
            .has_backdrop
            .then(|| self.markup.backdrop.subscribe_fn(handler))
    }

    fn on_link_click(&self, handler: Box<dyn FnMut()>) -> Subscription {
        self.markup.links.subscribe_fn(handler)
    }

    fn on_document_click(&self, handler: Box<dyn FnMut(ClickRegion)>) -> Subscription {
        self.markup.document.subscribe(handler)
    }
}

type VisibilityCallback = Box<dyn FnMut(bool) -> Observation>;

/// A page section watched by an intersection observer.
#[derive(Default)]
pub struct FakeSection {
    classes: RefCell<Vec<String>>,
    observer: RefCell<Option<VisibilityCallback>>,
    options: RefCell<Option<ObserverOptions>>,
}

impl std::fmt::Debug for FakeSection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FakeSection")
            .field("classes", &self.classes.borrow())
            .field("observed", &self.is_observed())
            .finish()
    }
}

impl FakeSection {
    /// Whether an observer is watching this section.
    pub fn is_observed(&self) -> bool {
        self.observer.borrow().is_some()
    }

    /// Whether the section carries `class`.
    pub fn has_class(&self, class: &str) -> bool {
        self.classes.borrow().iter().any(|c| c == class)
    }

    /// Options the section is observed with.
    pub fn options(&self) -> Option<ObserverOptions> {
        self.options.borrow().clone()
    }

    /// Deliver a visibility notification to the observer, if any.
    pub fn set_visible(&self, visible: bool) {
        let Some(mut callback) = self.observer.borrow_mut().take() else {
            return;
        };
        if callback(visible) == Observation::Continue {
            *self.observer.borrow_mut() = Some(callback);
        }
    }
}

impl RevealTarget for FakeSection {
    fn add_class(&self, class: &str) {
        let mut classes = self.classes.borrow_mut();
        if !classes.iter().any(|c| c == class) {
            classes.push(class.to_string());
        }
    }
}

struct Unobserve(Weak<FakeSection>);

impl Drop for Unobserve {
    fn drop(&mut self) {
        if let Some(section) = self.0.upgrade() {
            section.observer.borrow_mut().take();
        }
    }
}

/// An element with an inline style.
#[derive(Debug, Clone, Default)]
pub struct FakeElement {
    styles: Rc<RefCell<StyleMap>>,
}

impl FakeElement {
    /// An inline style property.
    pub fn style(&self, property: &str) -> Option<String> {
        self.styles.borrow().get(property).cloned()
    }

    /// Whether no inline style has been written.
    pub fn is_unstyled(&self) -> bool {
        self.styles.borrow().is_empty()
    }
}

impl StyleTarget for FakeElement {
    fn set_style(&self, property: &str, value: &str) {
        self.styles
            .borrow_mut()
            .insert(property.to_string(), value.to_string());
    }
}

/// A whole page: carousels, menu, sections, styled elements and a clock.
pub struct FakePage {
    clock: ManualClock,
    viewport_width: Cell<f64>,
    resize: Listeners,
    carousels: RefCell<HashMap<String, FakeCarousel>>,
    menu: RefCell<Option<FakeMenu>>,
    sections: RefCell<HashMap<String, Rc<FakeSection>>>,
    elements: RefCell<Vec<(String, FakeElement)>>,
}

impl std::fmt::Debug for FakePage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FakePage")
            .field("clock", &self.clock)
            .field("viewport_width", &self.viewport_width.get())
            .field("resize_listeners", &self.resize.len())
            .finish_non_exhaustive()
    }
}

impl Default for FakePage {
    fn default() -> Self {
        Self::new()
    }
}

impl FakePage {
    /// An empty desktop-width page.
    pub fn new() -> Self {
        Self {
            clock: ManualClock::new(),
            viewport_width: Cell::new(1280.0),
            resize: Listeners::default(),
            carousels: RefCell::new(HashMap::new()),
            menu: RefCell::new(None),
            sections: RefCell::new(HashMap::new()),
            elements: RefCell::new(Vec::new()),
        }
    }

    /// The page's clock.
    pub const fn clock(&self) -> &ManualClock {
        &self.clock
    }

    /// Set the viewport width.
    pub fn set_viewport_width(&self, width: f64) {
        self.viewport_width.set(width);
    }

    /// Fire a window resize event.
    pub fn resize(&self) {
        self.resize.emit(());
    }

    /// Number of window resize listeners.
    pub fn resize_listener_count(&self) -> usize {
        self.resize.len()
    }

    /// Add carousel markup under `container_id`.
    pub fn add_carousel(&self, container_id: &str, carousel: FakeCarousel) -> FakeCarousel {
        self.carousels
            .borrow_mut()
            .insert(container_id.to_string(), carousel.clone());
        carousel
    }

    /// Add menu markup.
    pub fn add_menu(&self, menu: FakeMenu) -> FakeMenu {
        *self.menu.borrow_mut() = Some(menu.clone());
        menu
    }

    /// Add a section with the given id.
    pub fn add_section(&self, id: &str) -> Rc<FakeSection> {
        let section = Rc::new(FakeSection::default());
        self.sections
            .borrow_mut()
            .insert(id.to_string(), Rc::clone(&section));
        section
    }

    /// Add an element matched by `selector`.
    pub fn add_element(&self, selector: &str) -> FakeElement {
        let element = FakeElement::default();
        self.elements
            .borrow_mut()
            .push((selector.to_string(), element.clone()));
        element
    }
}

impl CarouselHost for FakePage {
    type View = FakeCarousel;

    fn find_carousel(&self, container_id: &str) -> Option<FakeCarousel> {
        self.carousels.borrow().get(container_id).cloned()
    }

    fn on_resize(&self, handler: Box<dyn FnMut()>) -> Subscription {
        self.resize.subscribe_fn(handler)
    }

    fn scheduler(&self) -> Rc<dyn Scheduler> {
        Rc::new(self.clock.clone())
    }
}

impl VideoHost for FakePage {
    type Gallery = FakeGallery;

    fn find_gallery(&self, container_id: &str) -> Option<FakeGallery> {
        self.carousels
            .borrow()
            .get(container_id)
            .map(FakeCarousel::gallery)
    }
}

impl MenuHost for FakePage {
    type Menu = FakeMenu;

    fn find_menu(&self, _config: &MenuConfig) -> Option<FakeMenu> {
        self.menu.borrow().clone()
    }
}

impl RevealHost for FakePage {
    type Section = Rc<FakeSection>;

    fn viewport_width(&self) -> f64 {
        self.viewport_width.get()
    }

    fn find_section(&self, id: &str) -> Option<Rc<FakeSection>> {
        self.sections.borrow().get(id).cloned()
    }

    fn observe(
        &self,
        section: &Rc<FakeSection>,
        options: &ObserverOptions,
        on_change: Box<dyn FnMut(bool) -> Observation>,
    ) -> Subscription {
        *section.observer.borrow_mut() = Some(on_change);
        *section.options.borrow_mut() = Some(options.clone());
        Subscription::new(Unobserve(Rc::downgrade(section)))
    }
}

impl PatchHost for FakePage {
    type Element = FakeElement;

    fn query(&self, selector: &str) -> Option<FakeElement> {
        self.elements
            .borrow()
            .iter()
            .find(|(s, _)| s == selector)
            .map(|(_, element)| element.clone())
    }

    fn query_all(&self, selector: &str) -> Vec<FakeElement> {
        self.elements
            .borrow()
            .iter()
            .filter(|(s, _)| s == selector)
            .map(|(_, element)| element.clone())
            .collect()
    }

    fn scheduler(&self) -> Rc<dyn Scheduler> {
        Rc::new(self.clock.clone())
    }
}
