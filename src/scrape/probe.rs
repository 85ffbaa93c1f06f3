// src/scrape/probe.rs
//! Pagination check: list the identifiers of the first few listing pages
//! without fetching any detail page.

use std::{collections::HashSet, thread};

use tracing::{info, warn};
use url::Url;

use crate::{config::options::Pacing, core::net::Fetch, specs::listing};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ProbePage {
    pub page: u32,
    pub ids: Vec<String>,
    /// Identifiers not listed on any earlier probed page.
    pub new: usize,
    pub has_more: bool,
    pub sample_urls: Vec<String>,
}

/// Fetch listing pages `1..=pages`; stops at the first fetch failure.
pub fn probe<F: Fetch>(fetcher: &F, base: &Url, pages: u32, pacing: &Pacing) -> Vec<ProbePage> {
    let mut seen: HashSet<String> = HashSet::new();
    let mut out = Vec::new();

    for page in 1..=pages {
        let listing = match listing::fetch(fetcher, base, page) {
            Ok(l) => l,
            Err(e) => {
                warn!(page, error = %e, "probe: listing fetch failed");
                break;
            }
        };
        let ids: Vec<String> = listing.ids().into_iter().map(String::from).collect();
        let new = ids.iter().filter(|id| seen.insert((*id).clone())).count();
        let sample_urls = listing.entries.iter().take(3).map(|e| e.url.to_string()).collect();
        info!(page, total = ids.len(), new, has_more = listing.has_more, "probe");

        out.push(ProbePage { page, ids, new, has_more: listing.has_more, sample_urls });

        if page < pages && !pacing.between_pages.is_zero() {
            thread::sleep(pacing.between_pages);
        }
    }
    out
}
