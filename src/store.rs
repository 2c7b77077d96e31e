// src/store.rs
//! In-memory session state. Nothing here touches disk.
//!
//! - `Session::events`: the last collection pass, replaced wholesale each pass.
//! - `VideoAccumulator`: every video seen this session, one per URL.

use crate::engine::types::{CapturedVideo, Event};

/// Append `incoming` to `existing`, skipping URLs already present.
///
/// A known URL whose duration was still 0 (metadata not loaded at first
/// sight) takes the loaded duration from a later sighting. Returns how many
/// new URLs were added.
pub fn merge_deduplicated<I>(existing: &mut Vec<CapturedVideo>, incoming: I) -> usize
where
    I: IntoIterator<Item = CapturedVideo>,
{
    let mut added = 0usize;
    for video in incoming {
        match existing.iter_mut().find(|v| v.url == video.url) {
            Some(known) => {
                if known.duration <= 0.0 && video.duration > 0.0 {
                    logd!("Store: {} duration now {:.1}s", known.url, video.duration);
                    known.duration = video.duration;
                }
            }
            None => {
                existing.push(video);
                added += 1;
            }
        }
    }
    added
}

#[derive(Clone, Debug, Default)]
pub struct VideoAccumulator {
    videos: Vec<CapturedVideo>,
}

impl VideoAccumulator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn merge<I>(&mut self, incoming: I) -> usize
    where
        I: IntoIterator<Item = CapturedVideo>,
    {
        merge_deduplicated(&mut self.videos, incoming)
    }

    pub fn videos(&self) -> &[CapturedVideo] {
        &self.videos
    }

    pub fn len(&self) -> usize {
        self.videos.len()
    }

    pub fn is_empty(&self) -> bool {
        self.videos.is_empty()
    }
}

#[derive(Clone, Debug, Default)]
pub struct Session {
    pub events: Vec<Event>,
    pub videos: VideoAccumulator,
    /// Connections made by the last reconciliation.
    pub connections: usize,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    /// Events still waiting on a video URL.
    pub fn unresolved(&self) -> usize {
        self.events.iter().filter(|e| e.needs_video()).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::types::SourceKind;

    fn v(url: &str, d: f64) -> CapturedVideo {
        CapturedVideo::new(url, d, SourceKind::Source)
    }

    #[test]
    fn merge_skips_known_urls() {
        let mut acc = VideoAccumulator::new();
        assert_eq!(acc.merge(vec![v("a", 10.0), v("b", 20.0)]), 2);
        assert_eq!(acc.merge(vec![v("b", 20.0), v("c", 30.0), v("c", 31.0)]), 1);
        let urls: Vec<&str> = acc.videos().iter().map(|x| x.url.as_str()).collect();
        assert_eq!(urls, vec!["a", "b", "c"]);
        assert_eq!(acc.videos()[2].duration, 30.0);
    }

    #[test]
    fn merge_fills_in_late_duration() {
        let mut acc = VideoAccumulator::new();
        acc.merge(vec![v("a", 0.0)]);
        acc.merge(vec![v("a", 42.0)]);
        assert_eq!(acc.len(), 1);
        assert_eq!(acc.videos()[0].duration, 42.0);

        acc.merge(vec![v("a", 50.0)]);
        assert_eq!(acc.videos()[0].duration, 42.0);
    }
}
