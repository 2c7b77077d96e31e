// src/config/consts.rs

// Records
pub const NO_LABEL: &str = "No Label";
pub const PLACEHOLDER: &str = "VIDEO_DETECTED";

// Reconcile
pub const MATCH_TOLERANCE_SECS: u32 = 3;

// Extraction
pub const EXPAND_DELAY_MS: u64 = 300; // let "show more" re-render
pub const MIN_DESCRIPTION_CHARS: usize = 20;

// Capture
pub const CAPTURE_ATTEMPTS: u32 = 3;
pub const RETRY_DELAY_MS: u64 = 1_000;
pub const POLL_INTERVAL_MS: u64 = 3_000;

// Status check
pub const STATUS_URL_ENV: &str = "CAL_SCRAPE_STATUS_URL";
pub const STATUS_TIMEOUT_SECS: u64 = 5;

// Export
pub const DEFAULT_OUT_DIR: &str = "out";
pub const DEFAULT_FILE: &str = "events";
