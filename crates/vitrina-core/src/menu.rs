//! Mobile slide-out menu.
//!
//! The menu is a boolean: open or closed. Several triggers can close it
//! (close button, backdrop, a navigation link, any click outside the panel),
//! and some of them fire for the same physical click. Open and close are
//! therefore idempotent: a request that does not change the state writes
//! nothing.

use std::cell::RefCell;
use std::rc::Rc;

use tracing::{debug, info};

use crate::config::MenuConfig;
use crate::host::Subscription;

/// Where a document-level click landed, relative to the menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClickRegion {
    /// Inside the navigation panel.
    Panel,
    /// On the hamburger toggle.
    Toggle,
    /// On the backdrop.
    Backdrop,
    /// Anywhere else.
    Outside,
}

/// Something the user did to the menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuEvent {
    /// The hamburger toggle was clicked.
    ToggleClicked,
    /// The close button was clicked.
    CloseClicked,
    /// The backdrop was clicked.
    BackdropClicked,
    /// A navigation link inside the panel was clicked.
    LinkClicked,
    /// A click reached the document.
    DocumentClicked(ClickRegion),
}

// Spelled as an alias: mockall's automock rejects `Fn(..)` sugar in signatures.
type Handler = Box<dyn FnMut()>;
type ClickHandler = Box<dyn FnMut(ClickRegion)>;

/// The menu markup, as seen by the controller.
#[cfg_attr(test, mockall::automock)]
pub trait MenuView {
    /// Show or hide the navigation panel.
    fn set_panel_open(&self, open: bool);

    /// Activate the backdrop. No-op when the page has none.
    fn set_backdrop_active(&self, active: bool);

    /// Mark the toggle's controls wrapper as open.
    fn set_controls_open(&self, open: bool);

    /// Prevent or restore page scrolling.
    fn set_scroll_locked(&self, locked: bool);

    /// Listen for clicks on the toggle. The click must not reach the document.
    fn on_toggle_click(&self, handler: Handler) -> Subscription;

    /// Listen for clicks on the close button. The click must not reach the document.
    fn on_close_click(&self, handler: Handler) -> Subscription;

    /// Listen for clicks on the backdrop, if the page has one.
    fn on_backdrop_click(&self, handler: Handler) -> Option<Subscription>;

    /// Listen for clicks on any link inside the panel.
    fn on_link_click(&self, handler: Handler) -> Subscription;

    /// Listen for every click on the document, classified by region.
    fn on_document_click(&self, handler: ClickHandler) -> Subscription;
}

/// Environment the menu binds to.
pub trait MenuHost {
    /// View type produced for the menu.
    type Menu: MenuView + 'static;

    /// Resolve the menu markup.
    ///
    /// Returns `None` when the toggle, the panel or the close button is missing.
    fn find_menu(&self, config: &MenuConfig) -> Option<Self::Menu>;
}

/// Open/closed state plus the view it drives.
#[derive(Debug)]
pub struct MenuController<V> {
    view: V,
    open: bool,
}

impl<V: MenuView> MenuController<V> {
    /// A closed menu over `view`.
    pub const fn new(view: V) -> Self {
        Self { view, open: false }
    }

    /// Whether the menu is open.
    pub const fn is_open(&self) -> bool {
        self.open
    }

    /// Open the menu. Does nothing if it is already open.
    pub fn open(&mut self) {
        if self.open {
            return;
        }
        self.open = true;
        self.apply();
        debug!("Menu opened");
    }

    /// Close the menu. Does nothing if it is already closed.
    pub fn close(&mut self) {
        if !self.open {
            return;
        }
        self.open = false;
        self.apply();
        debug!("Menu closed");
    }

    /// React to a user event.
    pub fn handle(&mut self, event: MenuEvent) {
        match event {
            MenuEvent::ToggleClicked => self.open(),
            MenuEvent::CloseClicked | MenuEvent::BackdropClicked | MenuEvent::LinkClicked => {
                self.close();
            }
            MenuEvent::DocumentClicked(ClickRegion::Outside) => self.close(),
            MenuEvent::DocumentClicked(_) => {}
        }
    }

    fn apply(&self) {
        self.view.set_panel_open(self.open);
        self.view.set_backdrop_active(self.open);
        self.view.set_controls_open(self.open);
        self.view.set_scroll_locked(self.open);
    }
}

/// A bound menu. Dropping it removes every listener.
pub struct MenuHandle<V: MenuView> {
    controller: Rc<RefCell<MenuController<V>>>,
    _listeners: Vec<Subscription>,
}

impl<V: MenuView> std::fmt::Debug for MenuHandle<V> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MenuHandle")
            .field("open", &self.is_open())
            .field("listeners", &self._listeners.len())
            .finish()
    }
}

impl<V: MenuView> MenuHandle<V> {
    /// Whether the menu is open.
    pub fn is_open(&self) -> bool {
        self.controller.borrow().is_open()
    }

    /// Feed an event to the controller, as a listener would.
    pub fn handle(&self, event: MenuEvent) {
        self.controller.borrow_mut().handle(event);
    }
}

fn dispatch<V: MenuView + 'static>(
    controller: &Rc<RefCell<MenuController<V>>>,
    event: MenuEvent,
) -> Box<dyn FnMut()> {
    let controller = Rc::downgrade(controller);
    Box::new(move || {
        if let Some(controller) = controller.upgrade() {
            controller.borrow_mut().handle(event);
        }
    })
}

/// Bind the menu controller to the page.
///
/// Returns `None` when the required menu markup is missing.
pub fn bind<H: MenuHost>(host: &H, config: &MenuConfig) -> Option<MenuHandle<H::Menu>> {
    let Some(view) = host.find_menu(config) else {
        debug!(panel = %config.panel_id, "Menu markup not found, skipping");
        return None;
    };

    let controller = Rc::new(RefCell::new(MenuController::new(view)));
    let mut listeners = Vec::new();
    {
        let menu = controller.borrow();
        let view = &menu.view;

        listeners.push(view.on_toggle_click(dispatch(&controller, MenuEvent::ToggleClicked)));
        listeners.push(view.on_close_click(dispatch(&controller, MenuEvent::CloseClicked)));
        if let Some(subscription) =
            view.on_backdrop_click(dispatch(&controller, MenuEvent::BackdropClicked))
        {
            listeners.push(subscription);
        }
        listeners.push(view.on_link_click(dispatch(&controller, MenuEvent::LinkClicked)));

        let weak = Rc::downgrade(&controller);
        listeners.push(view.on_document_click(Box::new(move |region| {
            if let Some(controller) = weak.upgrade() {
                controller
                    .borrow_mut()
                    .handle(MenuEvent::DocumentClicked(region));
            }
        })));
    }

    info!(listeners = listeners.len(), "Menu bound");
    Some(MenuHandle {
        controller,
        _listeners: listeners,
    })
}
