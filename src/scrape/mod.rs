// src/scrape/mod.rs
mod scrape;
mod probe;

pub use scrape::{Outcome, RunSummary, StopReason, execute, run};
pub use probe::{ProbePage, probe};
