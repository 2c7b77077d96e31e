// src/engine/types.rs
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::config::consts::{NO_LABEL, PLACEHOLDER};

/// Where an event's video stands.
///
/// Replaces the old "URL field or magic sentinel string" encoding:
/// - `Unknown`: no video on the card
/// - `Detected`: the card shows a video but its URL is not known yet
/// - `Resolved`: a concrete URL, either read off the card or reconciled
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", content = "url", rename_all = "lowercase")]
pub enum VideoState {
    #[default]
    Unknown,
    Detected,
    Resolved(String),
}

impl VideoState {
    pub fn is_detected(&self) -> bool {
        matches!(self, VideoState::Detected)
    }

    pub fn url(&self) -> Option<&str> {
        match self {
            VideoState::Resolved(url) => Some(url),
            _ => None,
        }
    }

    /// Export rendering: empty / placeholder text / URL.
    pub fn display_src(&self) -> &str {
        match self {
            VideoState::Unknown => "",
            VideoState::Detected => PLACEHOLDER,
            VideoState::Resolved(url) => url,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Platform {
    Facebook,
    Instagram,
    YouTube,
    X,
    LinkedIn,
    Email,
    Blog,
}

impl Platform {
    pub fn name(self) -> &'static str {
        match self {
            Platform::Facebook => "Facebook",
            Platform::Instagram => "Instagram",
            Platform::YouTube => "YouTube",
            Platform::X => "X",
            Platform::LinkedIn => "LinkedIn",
            Platform::Email => "Email",
            Platform::Blog => "Blog",
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// One calendar card.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    pub label: String,
    pub platforms: Vec<Platform>,
    pub timestamp: String,
    pub description: String,
    pub image_src: Option<String>,
    pub video: VideoState,
    pub has_video: bool,
    pub video_duration: String,
    pub is_new: bool,
    pub card_index: usize,
    pub card_classes: String,
    pub event_url: Option<String>,
}

impl Default for Event {
    fn default() -> Self {
        Self {
            label: s!(NO_LABEL),
            platforms: Vec::new(),
            timestamp: s!(),
            description: s!(),
            image_src: None,
            video: VideoState::Unknown,
            has_video: false,
            video_duration: s!(),
            is_new: false,
            card_index: 0,
            card_classes: s!(),
            event_url: None,
        }
    }
}

impl Event {
    /// Waiting on reconciliation: a detected video without a URL.
    pub fn needs_video(&self) -> bool {
        self.has_video && self.video.is_detected()
    }

    /// Swap the placeholder for a URL. Refuses anything that isn't `Detected`,
    /// so a resolved URL is never overwritten and never reverts.
    pub fn resolve_video(&mut self, url: impl Into<String>) -> bool {
        if !self.video.is_detected() {
            return false;
        }
        self.video = VideoState::Resolved(url.into());
        true
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceKind {
    /// `src`/`currentSrc` of a `<video>`
    Direct,
    /// a `<source>` child
    Source,
}

/// A playable video found on the page, independent of any card.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CapturedVideo {
    pub url: String,
    /// Seconds; 0.0 until the media has loaded.
    pub duration: f64,
    #[serde(rename = "type")]
    pub kind: SourceKind,
}

impl CapturedVideo {
    pub fn new(url: impl Into<String>, duration: f64, kind: SourceKind) -> Self {
        Self { url: url.into(), duration, kind }
    }
}
