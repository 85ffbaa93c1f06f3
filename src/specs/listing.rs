// src/specs/listing.rs
//! Scraping *spec* for the search-results (listing) page.
//!
//! Purpose:
//! - Build the listing URL for a page number (`buscar_vacantes.php`, `pagelocales=N` past page 1).
//! - Collect job links (`/puesto/<id>`) in first-seen order, one entry per identifier.
//! - Report whether the page *looks* paginated. This is a hint only; the runner
//!   combines it with the page ceiling and the "no new identifiers" rule.
//!
//! Non-Responsibilities:
//! - Remembering identifiers across pages (runner owns the seen set).
//! - Fetching detail pages.

use std::collections::HashSet;

use lazy_static::lazy_static;
use regex::Regex;
use scraper::Selector;
use tracing::debug;
use url::Url;

use crate::config::consts::{COUNTRY_CODE, PAGE_PARAM, SEARCH_PATH};
use crate::core::html::{Page, text_of};
use crate::core::net::Fetch;
use crate::error::Result;

lazy_static! {
    static ref JOB_PATH: Regex = Regex::new(r"/puesto/(\d+)").unwrap();
    static ref CARD_CLASS: Regex = Regex::new(r"(?i)job|vacancy|puesto|oferta").unwrap();
    static ref NEXT_TEXT: Regex = Regex::new(r"(?i)siguiente|next|>|»").unwrap();
    static ref PAGE_HREF: Regex = Regex::new(r"(?i)Pag=\d+").unwrap();
    static ref PAGINATION_CLASS: Regex = Regex::new(r"(?i)pag|page|navigation").unwrap();
    static ref ANCHORS: Selector = Selector::parse("a[href]").unwrap();
}

/// One job found on a listing page.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ListingEntry {
    pub id: String,
    pub url: Url,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ListingPage {
    pub page: u32,
    pub entries: Vec<ListingEntry>,
    pub has_more: bool,
}

impl ListingPage {
    pub fn ids(&self) -> Vec<&str> {
        self.entries.iter().map(|e| e.id.as_str()).collect()
    }
}

/// `https://empleos.net/buscar_vacantes.php?Claves=&Area=&Pais=1[&pagelocales=N]`
pub fn listing_url(base: &Url, page: u32) -> Result<Url> {
    let mut url = base.join(SEARCH_PATH)?;
    {
        let mut q = url.query_pairs_mut();
        q.append_pair("Claves", "")
            .append_pair("Area", "")
            .append_pair("Pais", COUNTRY_CODE);
        if page > 1 {
            q.append_pair(PAGE_PARAM, &page.to_string());
        }
    }
    Ok(url)
}

/// Numeric job id from a detail link, e.g. `/puesto/48211/cajero` → `48211`.
pub fn job_id(href: &str) -> Option<String> {
    JOB_PATH.captures(href).map(|c| c[1].to_string())
}

/// Fetch and parse one listing page.
pub fn fetch(fetcher: &impl Fetch, base: &Url, page: u32) -> Result<ListingPage> {
    let url = listing_url(base, page)?;
    let doc = fetcher.get(&url)?;
    Ok(parse(&doc, base, page))
}

pub fn parse(doc: &str, base: &Url, page_no: u32) -> ListingPage {
    let page = Page::parse(doc);
    let entries = extract_identifiers(&page, base);
    let has_more = has_more_pages(&page);
    debug!(page = page_no, found = entries.len(), has_more, "listing parsed");
    ListingPage { page: page_no, entries, has_more }
}

/// Job links in first-seen order, deduplicated by identifier.
pub fn extract_identifiers(page: &Page, base: &Url) -> Vec<ListingEntry> {
    // 1) Every anchor pointing at /puesto/<id>
    let direct = page
        .html()
        .select(&ANCHORS)
        .filter_map(|a| a.value().attr("href"))
        .filter(|href| JOB_PATH.is_match(href));

    // 2) First job link inside each job card
    let carded = page.by_class(Some("div"), &CARD_CLASS).filter_map(|card| {
        card.select(&ANCHORS)
            .filter_map(|a| a.value().attr("href"))
            .find(|href| href.contains("/puesto/"))
    });

    let mut seen = HashSet::new();
    let mut out = Vec::new();
    for href in direct.chain(carded) {
        let Some(id) = job_id(href) else { continue };
        if seen.contains(&id) {
            continue;
        }
        let Ok(url) = base.join(href) else { continue };
        seen.insert(id.clone());
        out.push(ListingEntry { id, url });
    }
    out
}

/// Any of: a "next" link, numbered `Pag=N` links, or a pagination container.
pub fn has_more_pages(page: &Page) -> bool {
    let mut anchors = page.html().select(&ANCHORS);
    let next_link = anchors.any(|a| {
        a.value().attr("href").is_some_and(|h| !h.is_empty()) && NEXT_TEXT.is_match(&text_of(a, " "))
    });
    if next_link {
        return true;
    }

    let numbered = page
        .html()
        .select(&ANCHORS)
        .any(|a| a.value().attr("href").is_some_and(|h| PAGE_HREF.is_match(h)));
    if numbered {
        return true;
    }

    page.first_by_class(Some("div"), &PAGINATION_CLASS).is_some()
        || page.first_by_class(Some("ul"), &PAGINATION_CLASS).is_some()
}
