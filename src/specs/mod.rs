//! # Scraping "specs" module
//!
//! This module hosts the **page readers** for the calendar view. Together they
//! encode *where the ground truth lives in the markup* and *how to extract it
//! robustly*.
//!
//! ## What lives here
//! - **Card collection** (`cards`): visible cards in DOM order, "show more"
//!   expansion, numbering.
//! - **Field extraction** (`fields`): label, timestamp, description, image,
//!   video state, duration of one card, each with its fallback chain.
//! - **Platform detection** (`platform`): icon classes, label keywords as a
//!   fallback.
//! - **Video discovery** (`videos`): playable `<video>`/`<source>` URLs with
//!   their loaded durations.
//! - **Text heuristics** (`text`): what counts as a timestamp, a handle, a
//!   relative time, a caption.
//!
//! ## What does **not** live here
//! - **Matching videos to cards** – `engine::reconcile`.
//! - **Accumulating videos across scans** – `store`.
//! - **Sequencing, retries, polling** – `runner`.
//! - **Export formatting** – `export`, `csv`, `file`.
//!
//! ## Typical call chain
//! ```text
//! runner → specs::cards::EventCollector::collect  → Vec<Event>
//!        → specs::videos::VideoSourceScanner::scan → Vec<CapturedVideo>
//!        → store::VideoAccumulator::merge
//!        → engine::reconcile
//! ```
//!
//! ## Conventions & invariants
//! - Every selector comes from `config::SelectorTable`; no literals here.
//! - A missing sub-element is a default value, never an error. Only the page
//!   itself being gone is.
//! - Specs are testable **offline** against HTML fixtures via `core::HtmlPage`.
//!
//! In short: **`specs` knows how to read the page.** Other layers decide when
//! to read it and what to do with the result.

pub mod cards;
pub mod fields;
pub mod platform;
pub mod text;
pub mod videos;

pub use cards::EventCollector;
pub use fields::FieldExtractor;
pub use platform::{PlatformDetector, infer_from_label};
pub use videos::VideoSourceScanner;
