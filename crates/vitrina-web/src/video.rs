//! Video gallery bound to the DOM.

use tracing::warn;
use vitrina_core::{Subscription, VideoGallery};
use web_sys::{Document, HtmlMediaElement};

use crate::carousel::select_all;
use crate::events::{js_error, listen};

/// Every `video` under a container.
#[derive(Debug)]
pub struct DomGallery {
    videos: Vec<HtmlMediaElement>,
}

impl DomGallery {
    /// Collect the videos under `container_id`.
    pub fn find(document: &Document, container_id: &str) -> Option<Self> {
        let container = document.get_element_by_id(container_id)?;
        Some(Self {
            videos: select_all(&container, "video"),
        })
    }
}

impl VideoGallery for DomGallery {
    fn video_count(&self) -> usize {
        self.videos.len()
    }

    fn mute(&self, video: usize) {
        if let Some(video) = self.videos.get(video) {
            video.set_muted(true);
        }
    }

    fn pause(&self, video: usize) {
        if let Some(element) = self.videos.get(video)
            && let Err(e) = element.pause()
        {
            warn!(video, error = %js_error(&e), "Video pause failed");
        }
    }

    fn on_play(&self, video: usize, mut handler: Box<dyn FnMut()>) -> Subscription {
        self.videos
            .get(video)
            .map_or_else(Subscription::noop, |element| {
                listen(element, "play", move |_| handler())
            })
    }
}
