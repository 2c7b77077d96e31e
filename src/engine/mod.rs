// src/engine/mod.rs
//! Record types and the video reconciliation engine.
//! Pure and synchronous: no DOM, no I/O.

pub mod duration;
pub mod reconcile;
pub mod types;

pub use reconcile::{MatchPolicy, reconcile, reconcile_with};
pub use types::{CapturedVideo, Event, Platform, SourceKind, VideoState};
