// src/file.rs

use std::{
    fs,
    io::{self, BufWriter, Write},
    path::{Path, PathBuf},
};

use tracing::info;

use crate::{
    config::options::ExportOptions,
    csv::write_records,
    error::Result,
    record::JobRecord,
};

/// Write `<stem>.json` and `<stem>.csv` under `export.out_dir`.
/// Returns the paths written, JSON first.
pub fn export(export: &ExportOptions, records: &[JobRecord]) -> Result<Vec<PathBuf>> {
    ensure_directory(&export.out_dir)?;

    let json = export.json_path();
    write_json(&json, records)?;
    let csv = export.csv_path();
    write_csv(&csv, records)?;

    info!(count = records.len(), json = %json.display(), csv = %csv.display(), "export written");
    Ok(vec![json, csv])
}

/// Pretty JSON array; non-ASCII kept as is.
pub fn write_json(path: &Path, records: &[JobRecord]) -> Result<()> {
    write_atomic(path, |w| {
        serde_json::to_writer_pretty(&mut *w, records)?;
        w.write_all(b"\n")?;
        Ok(())
    })
}

pub fn write_csv(path: &Path, records: &[JobRecord]) -> Result<()> {
    write_atomic(path, |w| write_records(w, records))
}

/// Write to a sibling temp file, then rename it over `path`.
pub fn write_atomic<F>(path: &Path, fill: F) -> Result<()>
where
    F: FnOnce(&mut BufWriter<fs::File>) -> Result<()>,
{
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            ensure_directory(parent)?;
        }
    }
    let tmp = temp_sibling(path);
    let result = (|| -> Result<()> {
        let mut out = BufWriter::new(fs::File::create(&tmp)?);
        fill(&mut out)?;
        out.flush()?;
        out.get_ref().sync_all()?;
        Ok(())
    })();
    if let Err(e) = result {
        let _ = fs::remove_file(&tmp);
        return Err(e);
    }
    fs::rename(&tmp, path)?;
    Ok(())
}

fn temp_sibling(path: &Path) -> PathBuf {
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    path.with_file_name(join!(".", &name, ".tmp"))
}

pub fn ensure_directory(dir: &Path) -> Result<()> {
    if dir.exists() && !dir.is_dir() {
        return Err(io::Error::new(
            io::ErrorKind::AlreadyExists,
            format!("Path exists but is not a directory: {}", dir.display()),
        )
        .into());
    }
    if !dir.exists() {
        fs::create_dir_all(dir)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn temp_file_sits_next_to_target() {
        let p = Path::new("out").join("jobs.json");
        assert_eq!(temp_sibling(&p), Path::new("out").join(".jobs.json.tmp"));
    }

    #[test]
    fn ensure_directory_rejects_files() {
        let dir = std::env::temp_dir().join("empleos_scrape_file_test");
        fs::create_dir_all(&dir).unwrap();
        let file = dir.join("plain.txt");
        fs::write(&file, "x").unwrap();
        assert!(ensure_directory(&file).is_err());
        assert!(ensure_directory(&dir.join("sub")).is_ok());
    }
}
