// src/scrape/scrape.rs
use std::{collections::HashSet, fmt, path::PathBuf, thread, time::Duration};

use chrono::NaiveDate;
use tracing::{info, warn};

use crate::{
    config::options::{AppOptions, ScrapeOptions},
    core::net::Fetch,
    error::Result,
    file,
    progress::Progress,
    record::JobRecord,
    specs::{detail, listing::{self, ListingEntry}},
    store,
};

/// Why the page loop ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StopReason {
    /// The configured page ceiling was reached.
    PageLimit,
    /// A page after the first only listed identifiers already seen.
    NoNewIdentifiers,
    /// The listing showed no pagination controls.
    NoMorePages,
    /// A listing page could not be fetched; records so far are kept.
    ListingFetchFailed,
}

impl fmt::Display for StopReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            StopReason::PageLimit          => "page limit reached",
            StopReason::NoNewIdentifiers   => "no new jobs on page",
            StopReason::NoMorePages        => "no more pages",
            StopReason::ListingFetchFailed => "listing fetch failed",
        };
        f.write_str(s)
    }
}

#[derive(Clone, Debug)]
pub struct RunSummary {
    /// One record per distinct identifier, in fetch order.
    pub records: Vec<JobRecord>,
    pub pages_visited: u32,
    /// Identifiers whose detail page could not be fetched.
    pub failed: Vec<String>,
    pub stop: StopReason,
}

/// What `execute` did after scraping.
#[derive(Clone, Debug)]
pub struct Outcome {
    pub summary: RunSummary,
    /// Records in the written set (the union, for update runs).
    pub total: usize,
    /// Records that were not in the persisted set before.
    pub added: usize,
    pub written: Vec<PathBuf>,
}

/// Walk listing pages and fetch every new job, one request at a time.
///
/// Never fails: a listing error ends the walk, a detail error skips that job.
pub fn run<F: Fetch>(
    fetcher: &F,
    opts: &ScrapeOptions,
    today: NaiveDate,
    mut progress: Option<&mut dyn Progress>,
) -> RunSummary {
    let base = &opts.extract.base_url;
    let mut seen: HashSet<String> = HashSet::new();
    let mut records = Vec::new();
    let mut failed = Vec::new();
    let mut pages_visited = 0;
    let mut page = 1;

    let stop = loop {
        if page > opts.max_pages {
            break StopReason::PageLimit;
        }
        if let Some(p) = progress.as_deref_mut() {
            p.log(&format!("Page {page}/{}", opts.max_pages));
        }

        let listing = match listing::fetch(fetcher, base, page) {
            Ok(l) => l,
            Err(e) => {
                warn!(page, error = %e, "listing fetch failed; stopping");
                break StopReason::ListingFetchFailed;
            }
        };
        pages_visited += 1;
        pause(opts.pacing.after_listing);

        let found = listing.entries.len();
        let fresh: Vec<ListingEntry> = listing
            .entries
            .into_iter()
            .filter(|e| seen.insert(e.id.clone()))
            .collect();
        info!(page, found, new = fresh.len(), "listing page");

        if fresh.is_empty() && page > 1 {
            break StopReason::NoNewIdentifiers;
        }

        if let Some(p) = progress.as_deref_mut() {
            p.begin(fresh.len());
        }
        for entry in &fresh {
            match detail::fetch(fetcher, entry, today, &opts.extract) {
                Ok(rec) => {
                    if let Some(p) = progress.as_deref_mut() {
                        p.item_done(&entry.id, &rec.title);
                    }
                    records.push(rec);
                }
                Err(e) => {
                    warn!(id = %entry.id, url = %entry.url, error = %e, "detail fetch failed; skipping");
                    if let Some(p) = progress.as_deref_mut() {
                        p.item_failed(&entry.id);
                    }
                    failed.push(entry.id.clone());
                }
            }
            pause(opts.pacing.after_detail);
        }

        // Ceiling first, then the pagination hint
        if page >= opts.max_pages {
            break StopReason::PageLimit;
        }
        if !listing.has_more {
            break StopReason::NoMorePages;
        }
        page += 1;
        pause(opts.pacing.between_pages);
    };

    info!(records = records.len(), pages = pages_visited, failed = failed.len(), %stop, "run finished");
    if let Some(p) = progress.as_deref_mut() {
        p.finish();
    }

    RunSummary { records, pages_visited, failed, stop }
}

/// Scrape per `app.scrape`, then write JSON + CSV per `app.export`.
///
/// Update runs merge into the persisted set by apply URL. A run that scraped
/// nothing leaves existing files untouched.
pub fn execute<F: Fetch>(
    fetcher: &F,
    app: &AppOptions,
    today: NaiveDate,
    mut progress: Option<&mut dyn Progress>,
) -> Result<Outcome> {
    // Shorten the trait-object lifetime so `progress` is usable again below
    let summary = run(
        fetcher,
        &app.scrape,
        today,
        progress.as_deref_mut().map(|p| p as &mut dyn Progress),
    );

    if summary.records.is_empty() {
        warn!(stop = %summary.stop, "no jobs scraped; nothing written");
        if let Some(p) = progress.as_deref_mut() {
            p.log("No jobs were scraped");
        }
        return Ok(Outcome { summary, total: 0, added: 0, written: Vec::new() });
    }

    let (set, added) = if app.scrape.mode.merges() {
        let existing = store::load_records(&app.export.json_path())?;
        let before = existing.len();
        let merged = store::merge(existing, summary.records.clone());
        info!(existing = before, added = merged.added, "merged into persisted set");
        (merged.records, merged.added)
    } else {
        let n = summary.records.len();
        (summary.records.clone(), n)
    };

    let written = file::export(&app.export, &set)?;
    if let Some(p) = progress.as_deref_mut() {
        p.log(&format!("Saved {} jobs ({} new)", set.len(), added));
    }

    Ok(Outcome { total: set.len(), added, written, summary })
}

fn pause(d: Duration) {
    if !d.is_zero() {
        thread::sleep(d);
    }
}
