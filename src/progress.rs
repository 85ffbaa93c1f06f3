// src/progress.rs
/// Lightweight progress reporting used by long-running operations (scrape/export).
/// Frontends implement this to surface status to users.
pub trait Progress {
    /// Called when a listing page yields new jobs, with the number about to be fetched.
    fn begin(&mut self, _total: usize) {}

    /// Free-form status line for human eyes.
    fn log(&mut self, _msg: &str) {}

    /// A detail page was fetched and assembled.
    fn item_done(&mut self, _id: &str, _title: &str) {}

    /// A detail page could not be fetched; the job was skipped.
    fn item_failed(&mut self, _id: &str) {}

    /// Called at the end, successful or not.
    fn finish(&mut self) {}
}

/// A no-op progress sink.
pub struct NullProgress;
impl Progress for NullProgress {}
