// src/specs/fields.rs
//! Per-card field extraction.
//!
//! The calendar markup belongs to a third party and shifts without notice, so
//! every accessor here is total: a missing sub-element gives an empty string,
//! `None` or `false`, never an error. Each field has an ordered list of
//! places to look; the first one that yields something wins.

use crate::config::consts::NO_LABEL;
use crate::config::selectors::SelectorTable;
use crate::core::dom::Node;
use crate::core::sanitize::{looks_truncated, normalize_ws};
use crate::engine::duration::format_duration;
use crate::engine::types::{Event, VideoState};
use crate::specs::text;

pub struct FieldExtractor<'s> {
    sel: &'s SelectorTable,
}

impl<'s> FieldExtractor<'s> {
    pub fn new(sel: &'s SelectorTable) -> Self {
        Self { sel }
    }

    /// Every field except `platforms` and `card_index`, which the collector owns.
    pub fn extract<N: Node>(&self, card: &N) -> Event {
        let (has_video, video) = self.video(card);
        Event {
            label: self.label(card),
            platforms: Vec::new(),
            timestamp: self.timestamp(card),
            description: self.description(card),
            image_src: self.image(card),
            video,
            has_video,
            video_duration: self.duration(card),
            is_new: self.is_new(card),
            card_index: 0,
            card_classes: normalize_ws(&card.class_name()),
            event_url: self.event_url(card),
        }
    }

    /// Channel name, else the first non-empty text span, else "No Label".
    pub fn label<N: Node>(&self, card: &N) -> String {
        let scoped = card
            .select_first(&self.sel.channel_container)
            .and_then(|c| first_text(&c, &self.sel.channel_text));
        scoped
            .or_else(|| first_text(card, &self.sel.generic_text))
            .unwrap_or_else(|| s!(NO_LABEL))
    }

    /// Second text span of the header, else an `H:MM AM/PM` anywhere on the card.
    pub fn timestamp<N: Node>(&self, card: &N) -> String {
        let structural = card
            .select_first(&self.sel.header)
            .and_then(|h| h.select(&self.sel.header_text).into_iter().nth(1))
            .map(|span| normalize_ws(&span.text()))
            .filter(|t| !t.is_empty());
        if let Some(t) = structural {
            return t;
        }
        text::find_time(&normalize_ws(&card.text())).unwrap_or_default()
    }

    /// Caption text if it is fully expanded. A caption still ending in an
    /// ellipsis didn't expand in time; then the longest caption-like text of
    /// any descendant, then of the raw text lines, and only then the
    /// truncated caption itself.
    pub fn description<N: Node>(&self, card: &N) -> String {
        let caption = card
            .select_first(&self.sel.caption)
            .map(|c| normalize_ws(&c.text()))
            .unwrap_or_default();

        if !caption.is_empty() && !looks_truncated(&caption) {
            return caption;
        }

        let own_texts = card.select("*").into_iter().map(|n| n.own_text());
        if let Some(d) = text::longest_description(own_texts) {
            return d;
        }

        let raw = card.text();
        if let Some(d) = text::longest_description(raw.lines()) {
            return d;
        }

        caption
    }

    /// First `<img>` that is neither a data-URI nor collapsed to zero width.
    pub fn image<N: Node>(&self, card: &N) -> Option<String> {
        card.select(&self.sel.image).into_iter().find_map(|img| {
            let src = img.attr("src")?.trim().to_string();
            if src.is_empty() || src.starts_with("data:") {
                return None;
            }
            (img.rect().width > 0.0).then_some(src)
        })
    }

    /// `(has_video, state)`. Any of overlay / container / `<video>` means a
    /// video exists; its URL comes from the element, then the container's
    /// lazy attribute, else it stays `Detected` for reconciliation.
    pub fn video<N: Node>(&self, card: &N) -> (bool, VideoState) {
        let overlay = card.select_first(&self.sel.play_overlay);
        let container = card.select_first(&self.sel.video_container);
        let video_el = card.select_first(&self.sel.video);

        if overlay.is_none() && container.is_none() && video_el.is_none() {
            return (false, VideoState::Unknown);
        }

        let direct = video_el.as_ref().and_then(|v| {
            non_empty(v.attr("src")).or_else(|| v.media_current_src())
        });
        let lazy = || {
            container
                .as_ref()
                .and_then(|c| non_empty(c.attr(&self.sel.video_data_attr)))
        };

        match direct.or_else(lazy) {
            Some(url) => (true, VideoState::Resolved(url)),
            None => (true, VideoState::Detected),
        }
    }

    /// Duration label text, else the loaded `<video>` duration as `M:SS`.
    pub fn duration<N: Node>(&self, card: &N) -> String {
        if let Some(label) = card
            .select_first(&self.sel.duration_label)
            .map(|d| normalize_ws(&d.text()))
            .filter(|t| !t.is_empty())
        {
            return label;
        }
        card.select_first(&self.sel.video)
            .and_then(|v| v.media_duration())
            .map(format_duration)
            .unwrap_or_default()
    }

    fn is_new<N: Node>(&self, card: &N) -> bool {
        card.class_name().split_whitespace().any(|c| c == self.sel.new_class)
            || card.select_first(&self.sel.new_badge).is_some()
    }

    fn event_url<N: Node>(&self, card: &N) -> Option<String> {
        card.select(&self.sel.event_link)
            .into_iter()
            .find_map(|a| non_empty(a.attr("href")))
            .filter(|href| !href.starts_with('#') && !href.starts_with("javascript:"))
    }
}

fn first_text<N: Node>(scope: &N, selector: &str) -> Option<String> {
    scope
        .select(selector)
        .into_iter()
        .map(|n| normalize_ws(&n.text()))
        .find(|t| !t.is_empty())
}

fn non_empty(v: Option<String>) -> Option<String> {
    v.map(|s| s.trim().to_string()).filter(|s| !s.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::dom::Page;
    use crate::core::html::HtmlPage;

    fn with_card<F: FnOnce(&FieldExtractor<'_>, &crate::core::html::HtmlNode<'_>)>(html: &str, f: F) {
        let page = HtmlPage::parse(html);
        let sel = SelectorTable::default();
        let fx = FieldExtractor::new(&sel);
        let cards = page.query_all(&sel.card).unwrap();
        f(&fx, &cards[0]);
    }

    #[test]
    fn label_prefers_channel_container() {
        with_card(
            r#"<div class="calendar-event-card">
                 <span>Draft</span>
                 <div class="channel-container"><span class="channel-name">Acme Instagram</span></div>
               </div>"#,
            |fx, card| assert_eq!(fx.label(card), "Acme Instagram"),
        );
    }

    #[test]
    fn label_falls_back_to_generic_then_default() {
        with_card(
            r#"<div class="calendar-event-card"><span> </span><span>Newsletter</span></div>"#,
            |fx, card| assert_eq!(fx.label(card), "Newsletter"),
        );
        with_card(
            r#"<div class="calendar-event-card"><p>nothing labelled</p></div>"#,
            |fx, card| assert_eq!(fx.label(card), NO_LABEL),
        );
    }

    #[test]
    fn timestamp_structural_then_regex() {
        with_card(
            r#"<div class="calendar-event-card">
                 <div class="event-header"><span>Acme</span><span>10:30 AM</span></div>
               </div>"#,
            |fx, card| assert_eq!(fx.timestamp(card), "10:30 AM"),
        );
        with_card(
            r#"<div class="calendar-event-card"><p>Posting at 4:15 PM today</p></div>"#,
            |fx, card| assert_eq!(fx.timestamp(card), "4:15 PM"),
        );
        with_card(
            r#"<div class="calendar-event-card"><p>whenever</p></div>"#,
            |fx, card| assert_eq!(fx.timestamp(card), ""),
        );
    }

    #[test]
    fn truncated_caption_falls_through_to_heuristic() {
        with_card(
            r#"<div class="calendar-event-card">
                 <div class="event-caption">Summer sale starts...</div>
                 <div class="hidden-full"><p>Summer sale starts Monday with 30% off everything in store</p></div>
                 <span>@acme</span><span>3 min</span>
               </div>"#,
            |fx, card| {
                assert_eq!(
                    fx.description(card),
                    "Summer sale starts Monday with 30% off everything in store"
                )
            },
        );
    }

    #[test]
    fn truncated_caption_is_last_resort() {
        with_card(
            r#"<div class="calendar-event-card"><div class="event-caption">Short…</div></div>"#,
            |fx, card| assert_eq!(fx.description(card), "Short…"),
        );
    }

    #[test]
    fn image_skips_data_uri_and_zero_width() {
        with_card(
            r#"<div class="calendar-event-card">
                 <img src="data:image/png;base64,AAAA">
                 <img src="https://cdn.example.com/hidden.jpg" width="0">
                 <img src="https://cdn.example.com/post.jpg">
               </div>"#,
            |fx, card| assert_eq!(fx.image(card).as_deref(), Some("https://cdn.example.com/post.jpg")),
        );
    }

    #[test]
    fn video_states() {
        with_card(
            r#"<div class="calendar-event-card"><span class="play-button"></span></div>"#,
            |fx, card| assert_eq!(fx.video(card), (true, VideoState::Detected)),
        );
        with_card(
            r#"<div class="calendar-event-card">
                 <div class="video-player" data-src="https://cdn.example.com/lazy.mp4"></div>
               </div>"#,
            |fx, card| {
                assert_eq!(
                    fx.video(card),
                    (true, VideoState::Resolved(s!("https://cdn.example.com/lazy.mp4")))
                )
            },
        );
        with_card(
            r#"<div class="calendar-event-card"><video data-current-src="blob:abc"></video></div>"#,
            |fx, card| assert_eq!(fx.video(card), (true, VideoState::Resolved(s!("blob:abc")))),
        );
        with_card(
            r#"<div class="calendar-event-card"><p>text only</p></div>"#,
            |fx, card| assert_eq!(fx.video(card), (false, VideoState::Unknown)),
        );
    }

    #[test]
    fn duration_label_then_media() {
        with_card(
            r#"<div class="calendar-event-card"><span class="video-duration">1:05</span><video data-duration="99"></video></div>"#,
            |fx, card| assert_eq!(fx.duration(card), "1:05"),
        );
        with_card(
            r#"<div class="calendar-event-card"><video data-duration="125.4"></video></div>"#,
            |fx, card| assert_eq!(fx.duration(card), "2:05"),
        );
        with_card(
            r#"<div class="calendar-event-card"><video></video></div>"#,
            |fx, card| assert_eq!(fx.duration(card), ""),
        );
    }

    #[test]
    fn new_marker_class_comes_from_table() {
        let page = HtmlPage::parse(
            r#"<div class="calendar-event-card fresh"></div><div class="calendar-event-card is-new"></div>"#,
        );
        let sel = SelectorTable { new_class: s!("fresh"), new_badge: s!(".new-badge"), ..SelectorTable::default() };
        let fx = FieldExtractor::new(&sel);
        let cards = page.query_all(&sel.card).unwrap();
        assert!(fx.is_new(&cards[0]));
        assert!(!fx.is_new(&cards[1]));
    }
}
