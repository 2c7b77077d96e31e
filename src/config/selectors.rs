// src/config/selectors.rs
//! CSS selectors and attribute names for the calendar view.
//!
//! All extraction goes through this table so the same algorithm can be pointed
//! at a changed markup (or a test fixture) without touching code. Load an
//! override from JSON; missing keys keep their defaults.

use std::path::Path;

use scraper::Selector;
use serde::{Deserialize, Serialize};

use crate::error::{Result, ScrapeError};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SelectorTable {
    /// One per event card.
    pub card: String,
    /// "Show more" control inside a card.
    pub show_more: String,

    pub channel_container: String,
    pub channel_text: String,
    /// Any text span, used when the channel container is missing.
    pub generic_text: String,

    pub header: String,
    /// The timestamp is the *second* match inside the header.
    pub header_text: String,

    pub caption: String,
    pub image: String,

    pub play_overlay: String,
    pub video_container: String,
    pub video: String,
    pub source: String,
    /// Attribute on the video container carrying a lazy URL.
    pub video_data_attr: String,
    pub duration_label: String,

    pub platform_icon: String,
    pub new_badge: String,
    /// Class on the card itself marking it new.
    pub new_class: String,
    pub event_link: String,
}

impl Default for SelectorTable {
    fn default() -> Self {
        Self {
            card: s!(".calendar-event-card"),
            show_more: s!(".show-more, .see-more, button[aria-label='Show more']"),

            channel_container: s!(".channel-container"),
            channel_text: s!(".channel-name, span"),
            generic_text: s!("span"),

            header: s!(".event-header"),
            header_text: s!("span"),

            caption: s!(".event-caption, .post-caption"),
            image: s!("img"),

            play_overlay: s!(".play-button, .play-overlay, .video-play-icon"),
            video_container: s!(".video-player, .video-container"),
            video: s!("video"),
            source: s!("source"),
            video_data_attr: s!("data-src"),
            duration_label: s!(".video-duration, .duration-label"),

            platform_icon: s!(".platform-icon, .social-icon"),
            new_badge: s!(".new-badge, .is-new"),
            new_class: s!("is-new"),
            event_link: s!("a[href]"),
        }
    }
}

impl SelectorTable {
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        let table: SelectorTable = serde_json::from_str(&text)?;
        table.validate()?;
        Ok(table)
    }

    /// Every selector must parse. Node-level lookups swallow bad selectors,
    /// so this is the one place they get reported.
    pub fn validate(&self) -> Result<()> {
        let all = [
            &self.card,
            &self.show_more,
            &self.channel_container,
            &self.channel_text,
            &self.generic_text,
            &self.header,
            &self.header_text,
            &self.caption,
            &self.image,
            &self.play_overlay,
            &self.video_container,
            &self.video,
            &self.source,
            &self.duration_label,
            &self.platform_icon,
            &self.new_badge,
            &self.event_link,
        ];
        for css in all {
            if Selector::parse(css).is_err() {
                return Err(ScrapeError::InvalidSelector(css.clone()));
            }
        }
        Ok(())
    }
}
