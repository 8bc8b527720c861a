//! `Vitrina` Web - browser bindings for the site behavior.
//!
//! This crate implements the `vitrina-core` host traits against the DOM
//! (`web-sys`) and exports the WASM entry points:
//! - [`mount`] binds every configured feature to the current page
//! - [`unmount`] releases every timer and listener again

// Dom* type names repeat their module names
#![allow(clippy::module_name_repetitions)]

pub mod carousel;
pub mod config;
pub mod events;
pub mod logging;
pub mod menu;
pub mod page;
pub mod platform;
pub mod reveal;
pub mod timers;
pub mod video;

use std::cell::RefCell;

use tracing::{debug, info};
use vitrina_core::Site;
use wasm_bindgen::prelude::wasm_bindgen;

pub use page::DomPage;

thread_local! {
    static MOUNTED: RefCell<Option<Site<DomPage>>> = const { RefCell::new(None) };
}

/// Whether a site is currently mounted.
pub fn is_mounted() -> bool {
    MOUNTED.with(|mounted| mounted.borrow().is_some())
}

/// Mount every configured feature on the current page.
///
/// Calling it again while mounted does nothing.
#[wasm_bindgen]
pub fn mount() {
    console_error_panic_hook::set_once();
    if let Err(e) = logging::init_auto() {
        // Already installed on a previous mount.
        debug!(error = %e, "Logging not reinitialized");
    }

    if is_mounted() {
        debug!("Site already mounted");
        return;
    }

    let Some(page) = DomPage::current() else {
        debug!("No window or document, nothing to mount");
        return;
    };

    let platform = platform::detect(page.window());
    let config = config::load_config(page.document());
    let site = Site::mount(&page, &config, platform);
    MOUNTED.with(|mounted| *mounted.borrow_mut() = Some(site));
}

/// Release every timer and listener registered by [`mount`].
#[wasm_bindgen]
pub fn unmount() {
    let site = MOUNTED.with(|mounted| mounted.borrow_mut().take());
    if let Some(site) = site {
        drop(site);
        info!("Site unmounted");
    }
}
