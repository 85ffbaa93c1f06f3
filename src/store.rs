// src/store.rs
//! The persisted cumulative record set: loading it back and merging new runs in.

use std::{collections::HashSet, fs, io, path::Path};

use tracing::debug;

use crate::{error::Result, record::JobRecord};

pub struct MergeOutcome {
    pub records: Vec<JobRecord>,
    /// How many incoming records were novel.
    pub added: usize,
}

/// Read a JSON array of records. A missing file is an empty set.
pub fn load_records(path: &Path) -> Result<Vec<JobRecord>> {
    let text = match fs::read_to_string(path) {
        Ok(t) => t,
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            debug!(path = %path.display(), "no persisted set yet");
            return Ok(Vec::new());
        }
        Err(e) => return Err(e.into()),
    };
    // Tolerate the BOM some editors add
    let text = text.strip_prefix('\u{FEFF}').unwrap_or(&text);
    Ok(serde_json::from_str(text)?)
}

/// Keep `existing` in order and append the incoming records whose apply URL
/// (or non-empty identifier) is not already present.
pub fn merge(existing: Vec<JobRecord>, incoming: Vec<JobRecord>) -> MergeOutcome {
    let mut urls: HashSet<String> = HashSet::new();
    let mut ids: HashSet<String> = HashSet::new();
    let mut records = Vec::with_capacity(existing.len() + incoming.len());

    for rec in existing {
        if seen_before(&mut urls, &mut ids, &rec) {
            continue;
        }
        records.push(rec);
    }
    let before = records.len();

    for rec in incoming {
        if seen_before(&mut urls, &mut ids, &rec) {
            continue;
        }
        records.push(rec);
    }

    let added = records.len() - before;
    MergeOutcome { records, added }
}

/// Registers the record's keys; true if either was already taken.
fn seen_before(urls: &mut HashSet<String>, ids: &mut HashSet<String>, rec: &JobRecord) -> bool {
    let dup_url = urls.contains(&rec.apply_url);
    let dup_id = !rec.identifier.is_empty() && ids.contains(&rec.identifier);
    if dup_url || dup_id {
        return true;
    }
    urls.insert(rec.apply_url.clone());
    if !rec.identifier.is_empty() {
        ids.insert(rec.identifier.clone());
    }
    false
}
