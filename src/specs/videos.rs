// src/specs/videos.rs
//! Playable video discovery, independent of cards.
//!
//! Reads every `<video>` and its `<source>` children. Which card a video
//! belongs to is not knowable here; that is the reconciler's job.

use std::collections::HashSet;

use crate::config::selectors::SelectorTable;
use crate::core::dom::{Node, Page};
use crate::engine::types::{CapturedVideo, SourceKind};
use crate::error::Result;

const MEDIA_EXTENSIONS: &[&str] = &[".mp4", ".webm", ".mov", ".m4v", ".m3u8", ".mpd", ".ogv", ".ogg"];
const MEDIA_SCHEMES: &[&str] = &["blob:", "data:video/"];

pub struct VideoSourceScanner<'s> {
    sel: &'s SelectorTable,
}

impl<'s> VideoSourceScanner<'s> {
    pub fn new(sel: &'s SelectorTable) -> Self {
        Self { sel }
    }

    /// All playable URLs on the page, first occurrence per URL kept.
    pub fn scan<P: Page>(&self, page: &P) -> Result<Vec<CapturedVideo>> {
        let mut seen: HashSet<String> = HashSet::new();
        let mut out: Vec<CapturedVideo> = Vec::new();

        let mut push = |url: String, duration: f64, kind: SourceKind| {
            if is_playable(&url) && seen.insert(url.clone()) {
                out.push(CapturedVideo::new(url, duration, kind));
            }
        };

        for video in page.query_all(&self.sel.video)? {
            let duration = video.media_duration().filter(|d| *d > 0.0).unwrap_or(0.0);

            let direct = video
                .attr("src")
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .or_else(|| video.media_current_src());
            if let Some(url) = direct {
                push(url, duration, SourceKind::Direct);
            }

            for source in video.select(&self.sel.source) {
                if let Some(url) = source.attr("src").map(|s| s.trim().to_string()) {
                    push(url, duration, SourceKind::Source);
                }
            }
        }

        logd!("Scan: {} playable videos", out.len());
        Ok(out)
    }
}

/// Known media extension (query/fragment ignored) or a media-only scheme.
pub fn is_playable(url: &str) -> bool {
    let lc = url.trim().to_ascii_lowercase();
    if lc.is_empty() {
        return false;
    }
    if MEDIA_SCHEMES.iter().any(|s| lc.starts_with(s)) {
        return true;
    }
    let path = lc.split(['?', '#']).next().unwrap_or("");
    MEDIA_EXTENSIONS.iter().any(|ext| path.ends_with(ext))
}
