//! Site behavior configuration.
//!
//! The defaults reproduce the stock page: an autoplaying image carousel, a
//! manual video carousel with exclusive playback, the slide-out menu, reveal
//! animations on the desktop layout and the iPhone styling patch. A page can
//! override any section with a JSON document.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{Error, Result};

/// Longest delay a browser timer accepts (`setTimeout` takes a signed 32-bit value).
pub const MAX_TIMER_MILLIS: u64 = i32::MAX as u64;

/// Configuration for one carousel instance.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CarouselConfig {
    /// Id of the carousel container element.
    pub container_id: String,
    /// Autoplay interval in milliseconds. `None` means manual navigation only.
    #[serde(default)]
    pub autoplay_ms: Option<u64>,
}

impl CarouselConfig {
    /// A manual-only carousel.
    pub fn manual(container_id: impl Into<String>) -> Self {
        Self {
            container_id: container_id.into(),
            autoplay_ms: None,
        }
    }

    /// A carousel that advances every `millis` milliseconds.
    pub fn autoplay(container_id: impl Into<String>, millis: u64) -> Self {
        Self {
            container_id: container_id.into(),
            autoplay_ms: Some(millis),
        }
    }

    /// The autoplay interval as a [`Duration`].
    #[must_use]
    pub fn autoplay_interval(&self) -> Option<Duration> {
        self.autoplay_ms.map(Duration::from_millis)
    }
}

/// Element ids and class names used by the mobile menu.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct MenuConfig {
    /// Id of the hamburger button.
    pub toggle_id: String,
    /// Id of the navigation panel.
    pub panel_id: String,
    /// Id of the close button inside the panel.
    pub close_id: String,
    /// Id of the optional backdrop.
    pub backdrop_id: String,
    /// Class of the wrapper around the toggle.
    pub controls_class: String,
    /// Class added to the panel while open.
    pub panel_open_class: String,
    /// Class added to the backdrop while open.
    pub backdrop_active_class: String,
    /// Class added to the controls wrapper while open.
    pub controls_open_class: String,
}

impl Default for MenuConfig {
    fn default() -> Self {
        Self {
            toggle_id: "menuToggle".to_string(),
            panel_id: "navLinks".to_string(),
            close_id: "closeMenu".to_string(),
            backdrop_id: "menuBackdrop".to_string(),
            controls_class: "menu-controls".to_string(),
            panel_open_class: "open".to_string(),
            backdrop_active_class: "active".to_string(),
            controls_open_class: "menu-open".to_string(),
        }
    }
}

/// A section that gets revealed when scrolled into view.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RevealSection {
    /// Id of the section element.
    pub id: String,
    /// Only observe this section when the viewport is at most this wide.
    #[serde(default)]
    pub max_viewport_width: Option<f64>,
}

impl RevealSection {
    /// A section observed at every viewport width.
    pub fn always(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            max_viewport_width: None,
        }
    }
}

/// Scroll reveal settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct RevealConfig {
    /// Reveal is disabled when the viewport is this wide or narrower.
    pub min_viewport_width: f64,
    /// Fraction of the section that must be visible.
    pub threshold: f64,
    /// Observer root margin, CSS syntax.
    pub root_margin: String,
    /// Class added to a revealed section.
    pub revealed_class: String,
    /// Sections to observe.
    pub sections: Vec<RevealSection>,
}

impl Default for RevealConfig {
    fn default() -> Self {
        Self {
            min_viewport_width: 768.0,
            threshold: 0.2,
            root_margin: "0px 0px -100px 0px".to_string(),
            revealed_class: "animate-in".to_string(),
            sections: vec![
                RevealSection::always("onama"),
                RevealSection::always("kontakt"),
                RevealSection {
                    id: "shop".to_string(),
                    max_viewport_width: Some(480.0),
                },
            ],
        }
    }
}

/// Styling applied on iPhone clients.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct PlatformPatchConfig {
    /// Selector of the mobile menu container.
    pub menu_selector: String,
    /// Selector of the hero section.
    pub hero_selector: String,
    /// Selector of the menu links that fade in.
    pub link_selector: String,
    /// Backdrop blur applied to the menu.
    pub menu_blur: String,
    /// Resting opacity of the hero section.
    pub hero_opacity: f64,
    /// Delay between consecutive link fade-ins, in milliseconds.
    pub link_stagger_ms: u64,
}

impl Default for PlatformPatchConfig {
    fn default() -> Self {
        Self {
            menu_selector: ".mobile-menu".to_string(),
            hero_selector: ".hero".to_string(),
            link_selector: ".mobile-menu a".to_string(),
            menu_blur: "blur(16px)".to_string(),
            hero_opacity: 0.95,
            link_stagger_ms: 150,
        }
    }
}

/// Complete site configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SiteConfig {
    /// Carousels to bind, in order.
    #[serde(default = "default_carousels")]
    pub carousels: Vec<CarouselConfig>,
    /// Container whose videos play exclusively of each other.
    #[serde(default = "default_video_gallery")]
    pub video_gallery: Option<String>,
    /// Mobile menu settings.
    #[serde(default)]
    pub menu: MenuConfig,
    /// Scroll reveal settings.
    #[serde(default)]
    pub reveal: RevealConfig,
    /// iPhone styling patch.
    #[serde(default)]
    pub platform_patch: PlatformPatchConfig,
}

fn default_carousels() -> Vec<CarouselConfig> {
    vec![
        CarouselConfig::autoplay("imageSlider", 4000),
        CarouselConfig::manual("videoSlider"),
    ]
}

#[allow(clippy::unnecessary_wraps)]
fn default_video_gallery() -> Option<String> {
    Some("videoSlider".to_string())
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            carousels: default_carousels(),
            video_gallery: default_video_gallery(),
            menu: MenuConfig::default(),
            reveal: RevealConfig::default(),
            platform_patch: PlatformPatchConfig::default(),
        }
    }
}

impl SiteConfig {
    /// Parse and validate a configuration document.
    ///
    /// Sections missing from the document keep their defaults.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        debug!(carousels = config.carousels.len(), "Parsed site config");
        Ok(config)
    }

    /// Check the configuration for values the page cannot act on.
    pub fn validate(&self) -> Result<()> {
        for carousel in &self.carousels {
            if carousel.container_id.trim().is_empty() {
                return Err(Error::Configuration(
                    "carousel container id must not be empty".to_string(),
                ));
            }
            if let Some(millis) = carousel.autoplay_ms
                && (millis == 0 || millis > MAX_TIMER_MILLIS)
            {
                return Err(Error::InvalidInterval {
                    carousel: carousel.container_id.clone(),
                    millis,
                });
            }
        }

        if let Some(gallery) = &self.video_gallery
            && gallery.trim().is_empty()
        {
            return Err(Error::Configuration(
                "video gallery id must not be empty".to_string(),
            ));
        }

        let menu_ids = [
            &self.menu.toggle_id,
            &self.menu.panel_id,
            &self.menu.close_id,
        ];
        if menu_ids.iter().any(|id| id.trim().is_empty()) {
            return Err(Error::Configuration(
                "menu toggle, panel and close ids must not be empty".to_string(),
            ));
        }

        if !(0.0..=1.0).contains(&self.reveal.threshold) {
            return Err(Error::Configuration(format!(
                "reveal threshold must be within 0.0..=1.0, got {}",
                self.reveal.threshold
            )));
        }

        if !(0.0..=1.0).contains(&self.platform_patch.hero_opacity) {
            return Err(Error::Configuration(format!(
                "hero opacity must be within 0.0..=1.0, got {}",
                self.platform_patch.hero_opacity
            )));
        }

        Ok(())
    }
}
