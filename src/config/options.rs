// src/config/options.rs
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::time::Duration;

use super::consts::*;
use super::selectors::SelectorTable;
use crate::engine::MatchPolicy;

#[derive(Clone, Debug, Default, PartialEq)]
pub struct AppOptions {
    pub scan: ScanOptions,
    pub capture: CaptureOptions,
    pub export: ExportOptions,
}

#[derive(Clone, Debug, PartialEq)]
pub struct ScanOptions {
    pub selectors: SelectorTable,
    /// Wait after clicking "show more" before reading the card.
    pub expand_delay: Duration,
    pub policy: MatchPolicy,
}

impl Default for ScanOptions {
    fn default() -> Self {
        Self {
            selectors: SelectorTable::default(),
            expand_delay: Duration::from_millis(EXPAND_DELAY_MS),
            policy: MatchPolicy::default(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CaptureOptions {
    pub max_attempts: u32,
    pub retry_delay: Duration,
    pub poll_interval: Duration,
}

impl Default for CaptureOptions {
    fn default() -> Self {
        Self {
            max_attempts: CAPTURE_ATTEMPTS,
            retry_delay: Duration::from_millis(RETRY_DELAY_MS),
            poll_interval: Duration::from_millis(POLL_INTERVAL_MS),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, clap::ValueEnum)]
pub enum ExportFormat {
    Csv,
    Tsv,
    Json,
}

impl ExportFormat {
    pub fn ext(&self) -> &'static str {
        match self {
            ExportFormat::Csv => "csv",
            ExportFormat::Tsv => "tsv",
            ExportFormat::Json => "json",
        }
    }

    /// Field separator; `None` for non-tabular formats.
    pub fn delimiter(&self) -> Option<char> {
        match self {
            ExportFormat::Csv => Some(','),
            ExportFormat::Tsv => Some('\t'),
            ExportFormat::Json => None,
        }
    }
}

/// Column schema for tabular exports.
#[derive(Clone, Copy, Debug, PartialEq, Eq, clap::ValueEnum)]
pub enum ExportVariant {
    /// timestamp, content, link, image URL, gif URL, video URL
    Simple,
    /// label, platforms, description, duration and friends
    Full,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ExportOptions {
    pub format: ExportFormat,
    pub variant: ExportVariant,
    pub include_headers: bool,
    /// Write to stdout instead of a file.
    pub to_stdout: bool,
    out_path: OutputPath,
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self {
            format: ExportFormat::Csv,
            variant: ExportVariant::Simple,
            include_headers: true,
            to_stdout: false,
            out_path: OutputPath::default(),
        }
    }
}

impl ExportOptions {
    /// Resolved output file. A user-typed extension is kept; otherwise the
    /// format decides it.
    pub fn out_path(&self) -> PathBuf {
        let mut path = self.out_path.dir.clone();
        let stem = self.out_path.file_stem.to_string_lossy();
        match &self.out_path.ext {
            Some(ext) => path.push(join!(&*stem, ".", &ext.to_string_lossy())),
            None => path.push(join!(&*stem, ".", self.format.ext())),
        }
        path
    }

    /// Parse a user path into dir + stem (+ explicit extension).
    /// A trailing separator means "directory, default file name".
    pub fn set_path(&mut self, text: &str) {
        let s = text.trim();
        if s.is_empty() {
            self.out_path = OutputPath::default();
            return;
        }
        if s.ends_with('/') || s.ends_with('\\') {
            self.out_path = OutputPath {
                dir: PathBuf::from(s),
                ..OutputPath::default()
            };
            return;
        }

        let p = Path::new(s);
        self.out_path.dir = p.parent().map(Path::to_path_buf).unwrap_or_default();
        if let Some(stem) = p.file_stem() {
            self.out_path.file_stem = stem.to_os_string();
        }
        self.out_path.ext = p.extension().map(|e| e.to_os_string());
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
struct OutputPath {
    dir: PathBuf,
    file_stem: OsString,
    ext: Option<OsString>,
}

impl Default for OutputPath {
    fn default() -> Self {
        Self {
            dir: PathBuf::from(DEFAULT_OUT_DIR),
            file_stem: OsString::from(DEFAULT_FILE),
            ext: None,
        }
    }
}
