// src/core/pause.rs
use std::future::Future;
use std::time::Duration;

/// Fixed-delay suspension after a UI interaction.
///
/// There is no "rendered" signal to wait on, so callers sleep a bounded time
/// and carry on regardless. Injected so tests don't sleep on the wall clock.
pub trait Pause {
    fn pause(&self, delay: Duration) -> impl Future<Output = ()>;
}

/// Real wall-clock wait on the tokio timer.
#[derive(Clone, Copy, Debug, Default)]
pub struct TokioPause;

impl Pause for TokioPause {
    fn pause(&self, delay: Duration) -> impl Future<Output = ()> {
        tokio::time::sleep(delay)
    }
}

/// Returns immediately.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoPause;

impl Pause for NoPause {
    fn pause(&self, _delay: Duration) -> impl Future<Output = ()> {
        std::future::ready(())
    }
}

impl<T: Pause + ?Sized> Pause for &T {
    fn pause(&self, delay: Duration) -> impl Future<Output = ()> {
        (**self).pause(delay)
    }
}
