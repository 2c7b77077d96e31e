// src/runner.rs
//! Capture orchestration: load page → collect cards → scan videos →
//! accumulate → reconcile, plus retry and live polling around that pass.

use std::io;
use std::path::PathBuf;
use std::time::Duration;

use tokio::sync::watch;
use tokio::time::MissedTickBehavior;

use crate::config::options::{CaptureOptions, ScanOptions};
use crate::core::dom::Page;
use crate::core::html::HtmlPage;
use crate::core::pause::Pause;
use crate::engine::reconcile_with;
use crate::error::{Result, ScrapeError};
use crate::progress::Progress;
use crate::specs::{EventCollector, VideoSourceScanner};
use crate::store::Session;

/// Where a fresh view of the page comes from on each pass.
pub trait PageSource {
    type Page: Page;

    fn load(&self) -> Result<Self::Page>;
}

/// A snapshot file, re-read on every load so an external capture can keep
/// refreshing it.
#[derive(Clone, Debug)]
pub struct FileSource {
    path: PathBuf,
}

impl FileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl PageSource for FileSource {
    type Page = HtmlPage;

    fn load(&self) -> Result<HtmlPage> {
        let html = match std::fs::read_to_string(&self.path) {
            Ok(s) => s,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                return Err(ScrapeError::PageUnavailable(format!(
                    "no snapshot at {}",
                    self.path.display()
                )));
            }
            Err(e) => return Err(e.into()),
        };
        if html.trim().is_empty() {
            return Err(ScrapeError::PageUnavailable(format!(
                "empty snapshot at {}",
                self.path.display()
            )));
        }
        Ok(HtmlPage::parse(&html))
    }
}

/// Fixed markup, parsed on every load.
#[derive(Clone, Debug)]
pub struct StaticSource {
    html: String,
}

impl StaticSource {
    pub fn new(html: impl Into<String>) -> Self {
        Self { html: html.into() }
    }
}

impl PageSource for StaticSource {
    type Page = HtmlPage;

    fn load(&self) -> Result<HtmlPage> {
        Ok(HtmlPage::parse(&self.html))
    }
}

/// Outcome of one pass.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CaptureReport {
    pub cards: usize,
    /// Playable videos on the page this pass.
    pub videos_found: usize,
    /// Of those, URLs not seen before this session.
    pub videos_new: usize,
    pub videos_total: usize,
    pub connections: usize,
    pub unresolved: usize,
}

pub struct Orchestrator<S: PageSource, W: Pause> {
    source: S,
    pause: W,
    scan: ScanOptions,
    capture: CaptureOptions,
    session: Session,
}

impl<S: PageSource, W: Pause> Orchestrator<S, W> {
    pub fn new(source: S, pause: W, scan: ScanOptions, capture: CaptureOptions) -> Self {
        Self {
            source,
            pause,
            scan,
            capture,
            session: Session::new(),
        }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn into_session(self) -> Session {
        self.session
    }

    /// One full pass. Replaces the session's events; accumulates its videos.
    pub async fn capture(&mut self, progress: Option<&mut dyn Progress>) -> Result<CaptureReport> {
        let page = self.source.load()?;

        let collector = EventCollector::new(&self.scan.selectors, &self.pause, self.scan.expand_delay);
        let mut events = collector.collect(&page, progress).await?;

        let found = VideoSourceScanner::new(&self.scan.selectors).scan(&page)?;
        let videos_found = found.len();
        let videos_new = self.session.videos.merge(found);

        let connections = reconcile_with(&mut events, self.session.videos.videos(), &self.scan.policy);

        self.session.events = events;
        self.session.connections = connections;

        let report = CaptureReport {
            cards: self.session.events.len(),
            videos_found,
            videos_new,
            videos_total: self.session.videos.len(),
            connections,
            unresolved: self.session.unresolved(),
        };
        logf!(
            "Capture: {} cards, {} videos ({} new), {} connected, {} unresolved",
            report.cards, report.videos_total, report.videos_new, report.connections, report.unresolved
        );
        Ok(report)
    }

    /// `capture` with bounded retries on environment failures (page gone,
    /// snapshot unreadable). Other errors are returned at once.
    pub async fn capture_with_retry(
        &mut self,
        mut progress: Option<&mut dyn Progress>,
    ) -> Result<CaptureReport> {
        let attempts = self.capture.max_attempts.max(1);
        let mut attempt = 1u32;
        loop {
            let reborrow = progress.as_mut().map(|p| &mut **p as &mut dyn Progress);
            let outcome = self.capture(reborrow).await;
            match outcome {
                Ok(report) => return Ok(report),
                Err(e) if !e.is_environment() => return Err(e),
                Err(e) if attempt >= attempts => {
                    loge!("Capture: giving up after {} attempts: {}", attempt, e);
                    return Err(ScrapeError::RetriesExhausted {
                        attempts: attempt,
                        last: Box::new(e),
                    });
                }
                Err(e) => {
                    logw!("Capture: attempt {}/{} failed: {}", attempt, attempts, e);
                    if let Some(p) = progress.as_deref_mut() {
                        p.log(&format!("Page not ready, retrying ({attempt}/{attempts})…"));
                    }
                    self.pause.pause(self.capture.retry_delay).await;
                    attempt += 1;
                }
            }
        }
    }

    /// Re-capture on a fixed interval until `stop` flips to `true` (or its
    /// sender is dropped). Failures are logged at debug level and skipped:
    /// the page navigating away mid-poll is expected. Returns passes run.
    pub async fn live_scan<F>(&mut self, mut stop: watch::Receiver<bool>, mut on_pass: F) -> usize
    where
        F: FnMut(&Session, &CaptureReport),
    {
        let period = self.capture.poll_interval.max(Duration::from_millis(1));
        let mut ticker = tokio::time::interval(period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        let mut passes = 0usize;

        loop {
            if *stop.borrow() {
                break;
            }
            tokio::select! {
                biased;
                changed = stop.changed() => {
                    if changed.is_err() || *stop.borrow() {
                        break;
                    }
                }
                _ = ticker.tick() => {
                    match self.capture(None).await {
                        Ok(report) => {
                            passes += 1;
                            on_pass(&self.session, &report);
                        }
                        Err(e) => logd!("Live scan: pass skipped: {}", e),
                    }
                }
            }
        }

        logf!("Live scan stopped after {} passes", passes);
        passes
    }
}
