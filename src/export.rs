// src/export.rs
//! Event → table/JSON rendering. Reads events only; never mutates them.

use serde::Serialize;

use crate::config::options::{ExportFormat, ExportOptions, ExportVariant};
use crate::engine::types::Event;
use crate::error::Result;

const SIMPLE_HEADERS: &[&str] = &["Timestamp", "Content", "Link", "Image URL", "GIF URL", "Video URL"];

const FULL_HEADERS: &[&str] = &[
    "Card", "Label", "Platforms", "Timestamp", "Description", "Image URL", "Video URL", "Duration", "New",
];

pub fn headers(variant: ExportVariant) -> Vec<String> {
    let names = match variant {
        ExportVariant::Simple => SIMPLE_HEADERS,
        ExportVariant::Full => FULL_HEADERS,
    };
    names.iter().map(|h| s!(*h)).collect()
}

/// One row per event, in event order.
pub fn rows(events: &[Event], variant: ExportVariant) -> Vec<Vec<String>> {
    events
        .iter()
        .map(|e| match variant {
            ExportVariant::Simple => simple_row(e),
            ExportVariant::Full => full_row(e),
        })
        .collect()
}

fn simple_row(e: &Event) -> Vec<String> {
    let image = e.image_src.as_deref().unwrap_or("");
    let (image_url, gif_url) = if is_gif(image) { ("", image) } else { (image, "") };
    vec![
        e.timestamp.clone(),
        e.description.clone(),
        e.event_url.clone().unwrap_or_default(),
        s!(image_url),
        s!(gif_url),
        s!(e.video.display_src()),
    ]
}

fn full_row(e: &Event) -> Vec<String> {
    let platforms: Vec<&str> = e.platforms.iter().map(|p| p.name()).collect();
    vec![
        e.card_index.to_string(),
        e.label.clone(),
        platforms.join(", "),
        e.timestamp.clone(),
        e.description.clone(),
        e.image_src.clone().unwrap_or_default(),
        s!(e.video.display_src()),
        e.video_duration.clone(),
        s!(if e.is_new { "yes" } else { "" }),
    ]
}

fn is_gif(url: &str) -> bool {
    let path = url.split(['?', '#']).next().unwrap_or("");
    path.to_ascii_lowercase().ends_with(".gif")
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct SimpleRecord<'a> {
    timestamp: &'a str,
    content: &'a str,
    link: Option<&'a str>,
    image_url: Option<&'a str>,
    gif_url: Option<&'a str>,
    video_url: Option<&'a str>,
}

impl<'a> From<&'a Event> for SimpleRecord<'a> {
    fn from(e: &'a Event) -> Self {
        let image = e.image_src.as_deref();
        let gif = image.filter(|u| is_gif(u));
        let video = Some(e.video.display_src()).filter(|s| !s.is_empty());
        Self {
            timestamp: &e.timestamp,
            content: &e.description,
            link: e.event_url.as_deref(),
            image_url: if gif.is_some() { None } else { image },
            gif_url: gif,
            video_url: video,
        }
    }
}

/// Pretty JSON array. The full variant is the event records as-is.
pub fn to_json(events: &[Event], variant: ExportVariant) -> Result<String> {
    let out = match variant {
        ExportVariant::Simple => {
            let records: Vec<SimpleRecord<'_>> = events.iter().map(SimpleRecord::from).collect();
            serde_json::to_string_pretty(&records)?
        }
        ExportVariant::Full => serde_json::to_string_pretty(events)?,
    };
    Ok(out)
}

/// Render `events` in the configured format and schema.
pub fn render(events: &[Event], opts: &ExportOptions) -> Result<String> {
    match opts.format.delimiter() {
        Some(sep) => {
            let header_row = opts.include_headers.then(|| headers(opts.variant));
            Ok(crate::csv::rows_to_string(
                header_row.as_deref(),
                &rows(events, opts.variant),
                sep,
            ))
        }
        None => {
            debug_assert_eq!(opts.format, ExportFormat::Json);
            to_json(events, opts.variant)
        }
    }
}
