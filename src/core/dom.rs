// src/core/dom.rs
//! The page seam.
//!
//! Extraction only ever talks to these two traits, so it runs the same against
//! a captured snapshot (`core::html::HtmlPage`) or anything else that can
//! answer selector queries. Node lookups never fail: a missing element or a
//! selector that doesn't parse is simply "nothing found".

use crate::error::Result;

/// Rendered box of an element, CSS pixels.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Rect {
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub const ZERO: Rect = Rect { width: 0.0, height: 0.0 };

    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// Non-zero in both directions.
    pub fn is_visible(&self) -> bool {
        self.width > 0.0 && self.height > 0.0
    }
}

pub trait Node: Clone {
    /// Descendants matching `selector`, document order.
    fn select(&self, selector: &str) -> Vec<Self>;

    fn select_first(&self, selector: &str) -> Option<Self> {
        self.select(selector).into_iter().next()
    }

    /// Full `textContent`.
    fn text(&self) -> String;

    /// Text of direct text children only.
    fn own_text(&self) -> String;

    fn attr(&self, name: &str) -> Option<String>;

    fn class_name(&self) -> String {
        self.attr("class").unwrap_or_default()
    }

    fn rect(&self) -> Rect;

    /// `HTMLMediaElement.duration` once metadata has loaded.
    fn media_duration(&self) -> Option<f64>;

    /// `HTMLMediaElement.currentSrc`.
    fn media_current_src(&self) -> Option<String>;
}

pub trait Page {
    type Node<'a>: Node
    where
        Self: 'a;

    /// Top-level query. Errors only when the page itself is unusable
    /// (or the selector is invalid), never for "no matches".
    fn query_all(&self, selector: &str) -> Result<Vec<Self::Node<'_>>>;

    /// Simulated user click.
    fn click(&self, node: &Self::Node<'_>) -> Result<()>;
}
