// src/engine/reconcile.rs
//! Duration-based matching of captured videos to placeholder events.
//!
//! Events come from card scraping, videos from scanning `<video>`/`<source>`
//! elements; nothing links the two except an approximate duration. Matching
//! is greedy in event order against a working pool:
//!
//! - candidates are events with a detected but unresolved video
//! - each takes the closest pool video within the tolerance, ties to pool order
//! - a matched video leaves the pool (1:1)
//!
//! The caller's video list is never touched.

use serde::{Deserialize, Serialize};

use crate::config::consts::MATCH_TOLERANCE_SECS;
use crate::engine::duration::parse_duration_secs;
use crate::engine::types::{CapturedVideo, Event};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MatchPolicy {
    /// Max `|round(video) - event|` in seconds, inclusive.
    pub tolerance_secs: u32,
    /// Leave events with unknown (0 s) duration alone.
    pub skip_zero_duration: bool,
}

impl Default for MatchPolicy {
    fn default() -> Self {
        Self {
            tolerance_secs: MATCH_TOLERANCE_SECS,
            skip_zero_duration: true,
        }
    }
}

/// Reconcile with the default policy. Returns the number of connections made.
pub fn reconcile(events: &mut [Event], captured: &[CapturedVideo]) -> usize {
    reconcile_with(events, captured, &MatchPolicy::default())
}

pub fn reconcile_with(
    events: &mut [Event],
    captured: &[CapturedVideo],
    policy: &MatchPolicy,
) -> usize {
    let mut pool: Vec<&CapturedVideo> = captured.iter().collect();
    let mut connections = 0usize;

    for event in events.iter_mut().filter(|e| e.needs_video()) {
        if pool.is_empty() {
            break;
        }

        let secs = parse_duration_secs(&event.video_duration);
        if secs == 0 && policy.skip_zero_duration {
            logd!("Reconcile: card {} has no usable duration, skipped", event.card_index);
            continue;
        }

        let Some(ix) = closest_within(&pool, secs, policy.tolerance_secs) else {
            logd!(
                "Reconcile: card {} ({}s) has no video within {}s",
                event.card_index, secs, policy.tolerance_secs
            );
            continue;
        };

        let video = pool.remove(ix);
        if event.resolve_video(video.url.clone()) {
            logd!(
                "Reconcile: card {} ({}s) <- {} ({:.1}s)",
                event.card_index, secs, video.url, video.duration
            );
            connections += 1;
        }
    }

    connections
}

/// Pool index of the closest video within `tolerance`; first one wins on ties.
fn closest_within(pool: &[&CapturedVideo], secs: u32, tolerance: u32) -> Option<usize> {
    let mut best: Option<(usize, f64)> = None;

    for (i, video) in pool.iter().enumerate() {
        if !video.duration.is_finite() || video.duration < 0.0 {
            continue;
        }
        let diff = (video.duration.round() - f64::from(secs)).abs();
        if diff > f64::from(tolerance) {
            continue;
        }
        match best {
            Some((_, d)) if d <= diff => {}
            _ => best = Some((i, diff)),
        }
    }

    best.map(|(i, _)| i)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::types::{SourceKind, VideoState};

    fn video(url: &str, duration: f64) -> CapturedVideo {
        CapturedVideo::new(url, duration, SourceKind::Source)
    }

    #[test]
    fn closest_prefers_smaller_diff_then_pool_order() {
        let a = video("a", 62.0);
        let b = video("b", 59.0);
        let c = video("c", 61.0);
        let pool = vec![&a, &b, &c];
        // a:2 b:1 c:1 → b (earlier of the two 1s)
        assert_eq!(closest_within(&pool, 60, 3), Some(1));
    }

    #[test]
    fn closest_rounds_fractional_durations() {
        let a = video("a", 63.4);
        let b = video("b", 63.6);
        assert_eq!(closest_within(&[&a], 60, 3), Some(0));
        assert_eq!(closest_within(&[&b], 60, 3), None);
    }

    #[test]
    fn zero_duration_policy_is_configurable() {
        let mut events = vec![Event {
            has_video: true,
            video: VideoState::Detected,
            ..Event::default()
        }];
        let videos = vec![video("blob:x", 0.0)];

        assert_eq!(reconcile(&mut events, &videos), 0);

        let policy = MatchPolicy { skip_zero_duration: false, ..MatchPolicy::default() };
        assert_eq!(reconcile_with(&mut events, &videos, &policy), 1);
        assert_eq!(events[0].video.url(), Some("blob:x"));
    }
}
