// src/lib.rs
#[macro_use]
pub mod macros;

pub mod config;
pub mod core;
pub mod error;
pub mod log;
pub mod progress;
pub mod record;
pub mod specs;
pub mod scrape;
pub mod store;

pub mod csv;
pub mod file;

#[cfg(feature = "cli")]
pub mod cli;

pub use error::{Result, ScrapeError};
pub use record::JobRecord;
