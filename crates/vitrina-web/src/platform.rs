//! Client platform detection.
//!
//! This is the only place that looks at the user agent. The rest of the site
//! receives a [`Platform`] descriptor.

use std::sync::LazyLock;

use regex::Regex;
use tracing::{debug, warn};
use vitrina_core::Platform;
use wasm_bindgen::JsValue;
use web_sys::Window;

const IPHONE_PATTERN: &str = r"(?i)iPhone|iPod";

static IPHONE: LazyLock<Option<Regex>> = LazyLock::new(|| {
    Regex::new(IPHONE_PATTERN)
        .inspect_err(|e| warn!(error = %e, "iPhone pattern failed to compile"))
        .ok()
});

/// Classify a user agent string.
///
/// `has_ms_stream` reports whether `window.MSStream` exists; old Windows
/// phones put "iPhone" in their user agent and are told apart by it.
pub fn platform_from_user_agent(user_agent: &str, has_ms_stream: bool) -> Platform {
    let mentions_iphone = IPHONE.as_ref().is_some_and(|re| re.is_match(user_agent));
    Platform {
        is_iphone: mentions_iphone && !has_ms_stream,
    }
}

/// Detect the platform of the running browser.
pub fn detect(window: &Window) -> Platform {
    let Ok(user_agent) = window.navigator().user_agent() else {
        debug!("User agent unavailable, assuming generic platform");
        return Platform::generic();
    };
    let has_ms_stream = js_sys::Reflect::get(window, &JsValue::from_str("MSStream"))
        .is_ok_and(|value| !value.is_undefined());

    let platform = platform_from_user_agent(&user_agent, has_ms_stream);
    debug!(?platform, "Detected platform");
    platform
}
