//! Page-embedded site configuration.
//!
//! A page may override the defaults with a JSON block:
//!
//! ```html
//! <script type="application/json" id="vitrina-config">
//!   { "carousels": [{ "container_id": "imageSlider", "autoplay_ms": 6000 }] }
//! </script>
//! ```

use tracing::{debug, warn};
use vitrina_core::{Result, SiteConfig};
use web_sys::Document;

/// Id of the configuration script element.
pub const CONFIG_ELEMENT_ID: &str = "vitrina-config";

/// Parse the text of a configuration block.
///
/// Blank text means "no overrides".
pub fn parse_config(text: &str) -> Result<SiteConfig> {
    if text.trim().is_empty() {
        return Ok(SiteConfig::default());
    }
    SiteConfig::from_json(text)
}

/// Load the page configuration, falling back to defaults.
pub fn load_config(document: &Document) -> SiteConfig {
    let Some(text) = document
        .get_element_by_id(CONFIG_ELEMENT_ID)
        .and_then(|element| element.text_content())
    else {
        debug!("No embedded config, using defaults");
        return SiteConfig::default();
    };

    match parse_config(&text) {
        Ok(config) => config,
        Err(e) => {
            warn!(error = %e, "Ignoring invalid embedded config");
            SiteConfig::default()
        }
    }
}
