//! Whole-page wiring.
//!
//! [`Site::mount`] binds every configured feature against one host and keeps
//! the resulting handles. Features whose markup is missing are skipped.

use tracing::info;

use crate::carousel::{self, CarouselHandle, CarouselHost};
use crate::config::SiteConfig;
use crate::host::Platform;
use crate::menu::{self, MenuHandle, MenuHost};
use crate::patch::{self, PatchHandle, PatchHost};
use crate::reveal::{self, RevealHandle, RevealHost};
use crate::video::{self, VideoExclusivity, VideoHost};

/// A host providing every environment the site needs.
pub trait SiteHost: CarouselHost + MenuHost + RevealHost + VideoHost + PatchHost {}

impl<T> SiteHost for T where T: CarouselHost + MenuHost + RevealHost + VideoHost + PatchHost {}

/// Everything mounted on a page. Dropping it releases all timers and listeners.
pub struct Site<H: SiteHost> {
    /// Bound carousels, in configuration order.
    pub carousels: Vec<CarouselHandle<<H as CarouselHost>::View>>,
    /// Exclusive playback for the video gallery.
    pub videos: Option<VideoExclusivity>,
    /// The mobile menu.
    pub menu: Option<MenuHandle<H::Menu>>,
    /// Scroll reveal observers.
    pub reveal: Option<RevealHandle>,
    /// iPhone styling patch.
    pub patch: Option<PatchHandle>,
}

impl<H: SiteHost> std::fmt::Debug for Site<H> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Site")
            .field("carousels", &self.carousels)
            .field("videos", &self.videos)
            .field("menu", &self.menu)
            .field("reveal", &self.reveal)
            .field("patch", &self.patch)
            .finish()
    }
}

impl<H: SiteHost> Site<H> {
    /// Mount every feature described by `config`.
    pub fn mount(host: &H, config: &SiteConfig, platform: Platform) -> Self {
        let carousels: Vec<_> = config
            .carousels
            .iter()
            .filter_map(|carousel| carousel::bind(host, carousel))
            .collect();

        let videos = config
            .video_gallery
            .as_deref()
            .and_then(|gallery| video::install(host, gallery));

        let menu = menu::bind(host, &config.menu);
        let reveal = reveal::install(host, &config.reveal);
        let patch = patch::apply(host, platform, &config.platform_patch);

        info!(
            carousels = carousels.len(),
            videos = videos.is_some(),
            menu = menu.is_some(),
            reveal = reveal.is_some(),
            patch = patch.is_some(),
            "Site mounted"
        );

        Self {
            carousels,
            videos,
            menu,
            reveal,
            patch,
        }
    }

    /// The carousel bound to `container_id`, if any.
    pub fn carousel(&self, container_id: &str) -> Option<&CarouselHandle<<H as CarouselHost>::View>> {
        self.carousels
            .iter()
            .find(|carousel| carousel.container_id() == container_id)
    }
}
