// src/progress.rs
/// Lightweight progress reporting used by long-running operations (capture/export).
/// Frontends implement this to surface status to users.
pub trait Progress {
    /// Called at the start with the total number of items (if known).
    fn begin(&mut self, _total: usize) {}

    /// Free-form status line for human eyes.
    fn log(&mut self, _msg: &str) {}

    /// Called when one card has been extracted (1-based card index).
    fn item_done(&mut self, _card_index: usize) {}

    /// Called at the end, successful or not.
    fn finish(&mut self) {}
}
