// tests/session.rs
//
// Orchestrator passes: capture, retry, live scan.
//
use std::cell::Cell;
use std::time::Duration;

use tokio::sync::watch;

use cal_scrape::config::AppOptions;
use cal_scrape::core::{HtmlPage, NoPause};
use cal_scrape::error::{Result, ScrapeError};
use cal_scrape::runner::{FileSource, Orchestrator, PageSource, StaticSource};

const CALENDAR: &str = include_str!("fixtures/calendar.html");

/// Fails with "page gone" for the first `failures` loads.
struct Flaky {
    failures: usize,
    loads: Cell<usize>,
}

impl PageSource for Flaky {
    type Page = HtmlPage;

    fn load(&self) -> Result<HtmlPage> {
        let n = self.loads.get();
        self.loads.set(n + 1);
        if n < self.failures {
            return Err(ScrapeError::PageUnavailable("tab navigated away".into()));
        }
        Ok(HtmlPage::parse(CALENDAR))
    }
}

fn orchestrator<S: PageSource>(source: S) -> Orchestrator<S, NoPause> {
    let opts = AppOptions::default();
    Orchestrator::new(source, NoPause, opts.scan, opts.capture)
}

#[tokio::test]
async fn capture_reconciles_fixture() {
    let mut orch = orchestrator(StaticSource::new(CALENDAR));
    let report = orch.capture(None).await.unwrap();

    assert_eq!(report.cards, 4);
    assert_eq!(report.videos_found, 3);
    assert_eq!(report.videos_new, 3);
    assert_eq!(report.connections, 2);
    assert_eq!(report.unresolved, 0);

    let urls: Vec<Option<&str>> = orch.session().events.iter().map(|e| e.video.url()).collect();
    assert_eq!(
        urls,
        vec![
            Some("https://cdn.example.com/v/teaser.mp4"),
            Some("https://cdn.example.com/v/bts.mp4"),
            None,
            Some("https://cdn.example.com/v/walkthrough.webm"),
        ]
    );
}

#[tokio::test]
async fn repeated_capture_accumulates_without_duplicates() {
    let mut orch = orchestrator(StaticSource::new(CALENDAR));
    orch.capture(None).await.unwrap();
    let second = orch.capture(None).await.unwrap();

    assert_eq!(second.videos_new, 0);
    assert_eq!(second.videos_total, 3);
    assert_eq!(orch.session().events.len(), 4);
    assert_eq!(orch.into_session().videos.len(), 3);
}

#[tokio::test]
async fn retry_recovers_after_transient_failures() {
    let mut orch = orchestrator(Flaky { failures: 2, loads: Cell::new(0) });
    let report = orch.capture_with_retry(None).await.unwrap();
    assert_eq!(report.cards, 4);
}

#[tokio::test]
async fn retry_gives_up_after_max_attempts() {
    let source = Flaky { failures: usize::MAX, loads: Cell::new(0) };
    let mut orch = orchestrator(source);

    match orch.capture_with_retry(None).await {
        Err(ScrapeError::RetriesExhausted { attempts, last }) => {
            assert_eq!(attempts, 3);
            assert!(matches!(*last, ScrapeError::PageUnavailable(_)));
        }
        other => panic!("expected RetriesExhausted, got {other:?}"),
    }
}

#[tokio::test]
async fn missing_snapshot_is_page_unavailable() {
    let path = std::env::temp_dir().join("cal_scrape_no_such_snapshot.html");
    let _ = std::fs::remove_file(&path);
    let err = FileSource::new(&path).load().err().unwrap();
    assert!(err.is_environment());
}

#[tokio::test]
async fn snapshot_file_is_reread_each_load() {
    let dir = std::env::temp_dir().join("cal_scrape_session_reread");
    let _ = std::fs::remove_dir_all(&dir);
    std::fs::create_dir_all(&dir).unwrap();
    let path = dir.join("page.html");

    std::fs::write(&path, "<html><body></body></html>").unwrap();
    let mut orch = orchestrator(FileSource::new(&path));
    assert_eq!(orch.capture(None).await.unwrap().cards, 0);

    std::fs::write(&path, CALENDAR).unwrap();
    assert_eq!(orch.capture(None).await.unwrap().cards, 4);
}

#[tokio::test(start_paused = true)]
async fn live_scan_stops_on_signal() {
    let mut opts = AppOptions::default();
    opts.capture.poll_interval = Duration::from_millis(50);
    let mut orch = Orchestrator::new(StaticSource::new(CALENDAR), NoPause, opts.scan, opts.capture);

    let (tx, rx) = watch::channel(false);
    let mut seen = Vec::new();
    let passes = orch
        .live_scan(rx, |session, report| {
            seen.push(report.connections);
            assert_eq!(session.events.len(), 4);
            if seen.len() == 3 {
                tx.send(true).unwrap();
            }
        })
        .await;

    assert_eq!(passes, 3);
    // events are rebuilt every pass and matched again against the accumulated pool
    assert_eq!(seen, vec![2, 2, 2]);
}

#[tokio::test(start_paused = true)]
async fn live_scan_skips_failed_passes() {
    let mut opts = AppOptions::default();
    opts.capture.poll_interval = Duration::from_millis(50);
    let source = Flaky { failures: 2, loads: Cell::new(0) };
    let mut orch = Orchestrator::new(source, NoPause, opts.scan, opts.capture);

    let (tx, rx) = watch::channel(false);
    let passes = orch
        .live_scan(rx, |_, _| {
            let _ = tx.send(true);
        })
        .await;

    assert_eq!(passes, 1);
    assert_eq!(orch.session().events.len(), 4);
}

#[tokio::test]
async fn live_scan_ends_when_sender_dropped() {
    let mut orch = orchestrator(StaticSource::new(CALENDAR));
    let (tx, rx) = watch::channel(false);
    drop(tx);
    let passes = orch.live_scan(rx, |_, _| {}).await;
    assert_eq!(passes, 0);
}
