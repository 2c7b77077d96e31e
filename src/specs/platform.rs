// src/specs/platform.rs
//! Which networks a card posts to.
//!
//! Icons first: every icon element's class list is matched against a fixed
//! table, giving zero, one or several platforms (cross-posts). Only when no
//! icon matches does the card label get a keyword guess, and that guess is at
//! most one platform.

use crate::core::dom::Node;
use crate::engine::types::Platform;

/// Class-name fragment → platform.
const ICON_CLASSES: &[(&str, Platform)] = &[
    ("facebook", Platform::Facebook),
    ("instagram", Platform::Instagram),
    ("youtube", Platform::YouTube),
    ("twitter", Platform::X),
    ("x", Platform::X),
    ("linkedin", Platform::LinkedIn),
];

/// Label keyword → platform, first hit wins.
const LABEL_RULES: &[(&str, Platform)] = &[
    ("email", Platform::Email),
    ("mail", Platform::Email),
    ("blog", Platform::Blog),
    ("story", Platform::Instagram),
];

pub struct PlatformDetector<'s> {
    icon_selector: &'s str,
}

impl<'s> PlatformDetector<'s> {
    pub fn new(icon_selector: &'s str) -> Self {
        Self { icon_selector }
    }

    /// Platforms named by the card's icons, de-duplicated in first-seen order.
    pub fn detect<N: Node>(&self, card: &N) -> Vec<Platform> {
        let mut found: Vec<Platform> = Vec::new();
        for icon in card.select(self.icon_selector) {
            let classes = icon.class_name().to_ascii_lowercase();
            for token in classes.split_whitespace() {
                if let Some(p) = platform_for_class(token) {
                    if !found.contains(&p) {
                        found.push(p);
                    }
                }
            }
        }
        found
    }

    /// Icons, or failing that a guess from the label.
    pub fn detect_or_infer<N: Node>(&self, card: &N, label: &str) -> Vec<Platform> {
        let found = self.detect(card);
        if !found.is_empty() {
            return found;
        }
        infer_from_label(label).into_iter().collect()
    }
}

/// Keyword guess from a channel label (`"Newsletter Email"` → Email).
pub fn infer_from_label(label: &str) -> Option<Platform> {
    let lc = label.to_lowercase();
    LABEL_RULES
        .iter()
        .find(|(kw, _)| lc.contains(kw))
        .map(|&(_, p)| p)
}

/// Short fragments (`x`) must name the icon itself: the last dash-separated
/// part (`icon-x`) or the first part before `icon`/`logo` (`x-icon`). So
/// `box`, `flex` and `icon-x-close` don't read as X. Longer fragments may
/// appear anywhere.
fn platform_for_class(token: &str) -> Option<Platform> {
    let parts: Vec<&str> = token.split(['-', '_']).collect();
    ICON_CLASSES.iter().find_map(|&(frag, p)| {
        let hit = if frag.len() <= 2 {
            parts.last() == Some(&frag)
                || matches!(parts.as_slice(), [first, "icon" | "logo"] if *first == frag)
        } else {
            token.contains(frag)
        };
        hit.then_some(p)
    })
}
