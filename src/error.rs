// src/error.rs
//! Typed errors for the scraper.
//!
//! Only transport and persistence can fail. A label that is missing from a page
//! is never an error; extractors resolve it to the field default.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ScrapeError {
    /// Connection, timeout or body decoding failure
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Server answered with a non-2xx status
    #[error("HTTP {status} from {url}")]
    Status { url: String, status: u16 },

    #[error("invalid URL: {0}")]
    Url(#[from] url::ParseError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] ::csv::Error),
}

pub type Result<T> = std::result::Result<T, ScrapeError>;
