//! `Vitrina` Core Library
//!
//! This crate provides the page behavior of the `Vitrina` website, independent
//! of any browser binding:
//! - Carousels with wraparound navigation, hover-pausing autoplay and
//!   debounced resize handling
//! - The mobile slide-out menu
//! - Fire-once scroll reveal animations
//! - Exclusive playback for the video gallery
//! - The iPhone styling patch
//! - Site configuration
//!
//! Each feature binds to a host through small traits (see [`host`]) and
//! returns an owned handle. Dropping the handle releases every timer and
//! listener it registered. With the `testing` feature, `testing` implements
//! all hosts in memory.
//!
//! # Error Handling
//!
//! Missing markup is not an error: binding returns `None`. Configuration and
//! host failures use the typed [`Error`].
//!
//! ```rust,ignore
//! use vitrina_core::{Platform, Site, SiteConfig};
//!
//! let site = Site::mount(&host, &SiteConfig::default(), Platform::generic());
//! ```

pub mod carousel;
pub mod config;
pub mod error;
pub mod host;
pub mod menu;
pub mod patch;
pub mod reveal;
pub mod site;
#[cfg(any(test, feature = "testing"))]
pub mod testing;
pub mod video;

pub use carousel::{
    CarouselHandle, CarouselHost, CarouselView, RESIZE_DEBOUNCE, SLIDE_CLEARED, SLIDE_LAYOUT,
    track_transform, track_width, wrap_index,
};
pub use config::{
    CarouselConfig, MAX_TIMER_MILLIS, MenuConfig, PlatformPatchConfig, RevealConfig, RevealSection,
    SiteConfig,
};
pub use error::{Error, Result};
pub use host::{Platform, Scheduler, Subscription, TimerHandle};
pub use menu::{ClickRegion, MenuController, MenuEvent, MenuHandle, MenuHost, MenuView};
pub use patch::{PatchHandle, PatchHost, StyleTarget, stagger_delay};
pub use reveal::{
    FireOnce, Observation, ObserverOptions, RevealHandle, RevealHost, RevealTarget,
};
pub use site::{Site, SiteHost};
pub use video::{VideoExclusivity, VideoGallery, VideoHost, pause_siblings};
