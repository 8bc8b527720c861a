//! Cosmetic styling for iPhone clients.
//!
//! The host decides what platform it runs on and passes a [`Platform`]; this
//! module only looks at the flag.

use std::rc::Rc;
use std::time::Duration;

use tracing::info;

use crate::config::PlatformPatchConfig;
use crate::host::{Platform, Scheduler, TimerHandle};

/// An element whose inline style can be written.
pub trait StyleTarget {
    /// Set an inline style property.
    fn set_style(&self, property: &str, value: &str);
}

/// Environment the patch is applied to.
pub trait PatchHost {
    /// Element handle type.
    type Element: StyleTarget + 'static;

    /// First element matching a CSS selector.
    fn query(&self, selector: &str) -> Option<Self::Element>;

    /// Every element matching a CSS selector, in document order.
    fn query_all(&self, selector: &str) -> Vec<Self::Element>;

    /// Timer scheduling.
    fn scheduler(&self) -> Rc<dyn Scheduler>;
}

/// Delay before link `position` starts fading in.
#[must_use]
pub fn stagger_delay(position: usize, step_ms: u64) -> Duration {
    Duration::from_millis(step_ms.saturating_mul(position as u64))
}

/// Pending fade-in timers of an applied patch.
#[derive(Debug)]
pub struct PatchHandle {
    fades: Vec<TimerHandle>,
}

impl PatchHandle {
    /// Number of scheduled link fade-ins.
    pub fn scheduled_fades(&self) -> usize {
        self.fades.len()
    }
}

/// Apply the iPhone styling if `platform` asks for it.
///
/// Returns `None`, writing nothing, on any other platform.
pub fn apply<H: PatchHost>(
    host: &H,
    platform: Platform,
    config: &PlatformPatchConfig,
) -> Option<PatchHandle> {
    if !platform.is_iphone {
        return None;
    }

    info!("iPhone detected, applying styling patch");

    if let Some(menu) = host.query(&config.menu_selector) {
        menu.set_style("backdrop-filter", &config.menu_blur);
    }

    if let Some(hero) = host.query(&config.hero_selector) {
        hero.set_style("transition", "opacity 0.3s ease");
        hero.set_style("opacity", &config.hero_opacity.to_string());
    }

    let scheduler = host.scheduler();
    let fades = host
        .query_all(&config.link_selector)
        .into_iter()
        .enumerate()
        .map(|(position, link)| {
            link.set_style("opacity", "0");
            scheduler.after(
                stagger_delay(position, config.link_stagger_ms),
                Box::new(move || {
                    link.set_style("transition", "opacity 0.5s ease");
                    link.set_style("opacity", "1");
                }),
            )
        })
        .collect();

    Some(PatchHandle { fades })
}
