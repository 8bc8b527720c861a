//! Exclusive playback for the video gallery.
//!
//! Starting any video pauses its siblings. This works alongside the carousel,
//! which stops off-screen videos when the slide changes; the two cover
//! different triggers and both stay in place.

use std::rc::Rc;

use tracing::{debug, info};

use crate::host::Subscription;

// Spelled as an alias: mockall's automock rejects `Fn(..)` sugar in signatures.
type Handler = Box<dyn FnMut()>;

/// The videos of one gallery, addressed by position.
#[cfg_attr(test, mockall::automock)]
pub trait VideoGallery {
    /// Number of videos.
    fn video_count(&self) -> usize;

    /// Mute a video.
    fn mute(&self, video: usize);

    /// Pause a video, leaving its position alone.
    fn pause(&self, video: usize);

    /// Listen for a video starting to play.
    fn on_play(&self, video: usize, handler: Handler) -> Subscription;
}

/// Environment the gallery coordinator binds to.
pub trait VideoHost {
    /// Gallery type.
    type Gallery: VideoGallery + 'static;

    /// Collect the videos under a container.
    fn find_gallery(&self, container_id: &str) -> Option<Self::Gallery>;
}

/// Pause every video except `playing`.
pub fn pause_siblings<G: VideoGallery + ?Sized>(gallery: &G, playing: usize) {
    for video in (0..gallery.video_count()).filter(|&video| video != playing) {
        gallery.pause(video);
    }
}

/// Installed play listeners. Dropping it removes them.
#[derive(Debug)]
pub struct VideoExclusivity {
    videos: usize,
    _listeners: Vec<Subscription>,
}

impl VideoExclusivity {
    /// Number of coordinated videos.
    pub const fn video_count(&self) -> usize {
        self.videos
    }
}

/// Mute every video in the gallery and make playback exclusive.
pub fn install<H: VideoHost>(host: &H, container_id: &str) -> Option<VideoExclusivity> {
    let Some(gallery) = host.find_gallery(container_id) else {
        debug!(container = %container_id, "Video gallery not found, skipping");
        return None;
    };

    let gallery = Rc::new(gallery);
    let videos = gallery.video_count();
    let mut listeners = Vec::with_capacity(videos);

    for video in 0..videos {
        gallery.mute(video);
        let siblings = Rc::clone(&gallery);
        listeners.push(gallery.on_play(
            video,
            Box::new(move || pause_siblings(siblings.as_ref(), video)),
        ));
    }

    info!(container = %container_id, videos, "Video exclusivity installed");
    Some(VideoExclusivity {
        videos,
        _listeners: listeners,
    })
}

#[cfg(test)]
mod tests {
    use mockall::predicate::eq;

    use super::*;

    #[test]
    fn test_pause_siblings_skips_playing_video() {
        let mut gallery = MockVideoGallery::new();
        gallery.expect_video_count().return_const(3_usize);
        gallery.expect_pause().with(eq(0_usize)).times(1).return_const(());
        gallery.expect_pause().with(eq(2_usize)).times(1).return_const(());
        gallery.expect_pause().with(eq(1_usize)).never();

        pause_siblings(&gallery, 1);
    }

    #[test]
    fn test_single_video_pauses_nothing() {
        let mut gallery = MockVideoGallery::new();
        gallery.expect_video_count().return_const(1_usize);
        gallery.expect_pause().never();

        pause_siblings(&gallery, 0);
    }
}
