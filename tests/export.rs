// tests/export.rs
use std::fs;
use std::path::PathBuf;

use chrono::NaiveDate;
use url::Url;

use empleos_scrape::config::options::{AppOptions, ExtractConfig, Pacing, RunMode};
use empleos_scrape::core::{Fetch, Page};
use empleos_scrape::csv::BOM;
use empleos_scrape::progress::Progress;
use empleos_scrape::specs::detail::assemble;
use empleos_scrape::{JobRecord, Result, ScrapeError, file, scrape, store};

const FULL: &str = include_str!("fixtures/detail_full.html");
const LISTING: &str = "https://empleos.net/buscar_vacantes.php?Claves=&Area=&Pais=1";

fn tmp_dir(name: &str) -> PathBuf {
    let mut p = std::env::temp_dir();
    p.push(format!("empleos_e2e_{}_{}", name, std::process::id()));
    let _ = fs::remove_dir_all(&p);
    fs::create_dir_all(&p).unwrap();
    p
}

fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 1, 10).unwrap()
}

/// One listing page with the given ids (no pagination) and a detail page per id.
struct SiteStub {
    ids: Vec<&'static str>,
}

impl SiteStub {
    fn new(ids: &[&'static str]) -> Self {
        Self { ids: ids.to_vec() }
    }
}

impl Fetch for SiteStub {
    fn get(&self, url: &Url) -> Result<String> {
        if url.as_str() == LISTING {
            let cards: String = self
                .ids
                .iter()
                .map(|id| format!(r#"<div class="oferta"><a href="/puesto/{id}">Puesto {id}</a></div>"#))
                .collect();
            return Ok(format!("<html><body>{cards}</body></html>"));
        }
        if url.path().starts_with("/puesto/") {
            return Ok(format!("<html><body><h1>Puesto {}</h1></body></html>", url.path()));
        }
        Err(ScrapeError::Status { url: url.to_string(), status: 404 })
    }
}

fn app(mode: RunMode, dir: &PathBuf) -> AppOptions {
    let mut app = AppOptions::for_mode(mode);
    app.scrape.pacing = Pacing::none();
    app.export.out_dir = dir.clone();
    app
}

fn csv_rows(path: &PathBuf) -> (Vec<String>, Vec<Vec<String>>) {
    let bytes = fs::read(path).unwrap();
    assert!(bytes.starts_with(BOM), "CSV must start with a UTF-8 BOM");
    let mut rdr = csv::Reader::from_reader(&bytes[BOM.len()..]);
    let header = rdr.headers().unwrap().iter().map(String::from).collect();
    let rows = rdr
        .records()
        .map(|r| r.unwrap().iter().map(String::from).collect())
        .collect();
    (header, rows)
}

#[test]
fn json_round_trip_is_lossless() {
    let dir = tmp_dir("roundtrip");
    let url = Url::parse("https://empleos.net/puesto/48211").unwrap();
    let rec = assemble(&Page::parse(FULL), &url, today(), &ExtractConfig::default());
    let set = vec![rec.clone(), JobRecord { identifier: "2".into(), apply_url: "https://empleos.net/puesto/2".into(), ..rec }];

    let path = dir.join("jobs.json");
    file::write_json(&path, &set).unwrap();
    let back = store::load_records(&path).unwrap();
    assert_eq!(back, set);

    // Accents are written verbatim, not escaped
    let text = fs::read_to_string(&path).unwrap();
    assert!(text.contains("Barrio Tournon, San José, Costa Rica"));
    assert!(text.contains("\"_job_featured\": 1"));
}

#[test]
fn csv_has_bom_header_and_one_row_per_record() {
    let dir = tmp_dir("csv");
    let url = Url::parse("https://empleos.net/puesto/48211").unwrap();
    let rec = assemble(&Page::parse(FULL), &url, today(), &ExtractConfig::default());

    let path = dir.join("jobs.csv");
    file::write_csv(&path, &[rec]).unwrap();
    let (header, rows) = csv_rows(&path);

    assert_eq!(header, JobRecord::FIELDS.to_vec());
    assert_eq!(rows.len(), 1);
    let col = |name: &str| JobRecord::FIELDS.iter().position(|f| *f == name).unwrap();
    assert_eq!(rows[0][col("_job_salary")], "450000");
    assert_eq!(rows[0][col("_job_type")], "Tiempo Parcial");
    assert_eq!(rows[0][col("_job_urgent")], "1");
    assert_eq!(
        rows[0][col("_job_photos")],
        "https://empleos.net/fotos/oficina1.jpg,https://empleos.net/fotos/oficina2.jpg"
    );
    assert_eq!(rows[0][col("_job_description")], "Registrar asientos contables\nConciliaciones bancarias");
}

#[test]
fn update_merges_into_full_set() {
    let dir = tmp_dir("update");

    let first = scrape::execute(&SiteStub::new(&["100", "101"]), &app(RunMode::Full, &dir), today(), None).unwrap();
    assert_eq!(first.total, 2);
    assert_eq!(first.written.len(), 2);

    let update = app(RunMode::Update, &dir);
    let second = scrape::execute(&SiteStub::new(&["101", "102"]), &update, today(), None).unwrap();
    assert_eq!(second.summary.records.len(), 2);
    assert_eq!(second.added, 1);
    assert_eq!(second.total, 3);

    let stored = store::load_records(&update.export.json_path()).unwrap();
    let ids: Vec<&str> = stored.iter().map(|r| r.identifier.as_str()).collect();
    assert_eq!(ids, vec!["100", "101", "102"]);

    let (_, rows) = csv_rows(&update.export.csv_path());
    assert_eq!(rows.len(), 3);

    // Same update again: nothing new, nothing duplicated
    let third = scrape::execute(&SiteStub::new(&["101", "102"]), &update, today(), None).unwrap();
    assert_eq!(third.added, 0);
    assert_eq!(store::load_records(&update.export.json_path()).unwrap().len(), 3);
}

#[test]
fn empty_run_leaves_files_alone() {
    let dir = tmp_dir("empty");
    let full = app(RunMode::Full, &dir);
    scrape::execute(&SiteStub::new(&["100"]), &full, today(), None).unwrap();

    let out = scrape::execute(&SiteStub::new(&[]), &full, today(), None).unwrap();
    assert!(out.written.is_empty());
    assert_eq!(store::load_records(&full.export.json_path()).unwrap().len(), 1);
}

#[test]
fn snapshot_modes_write_separate_files() {
    let dir = tmp_dir("snapshots");
    let first_page = app(RunMode::FirstPage, &dir);
    let out = scrape::execute(&SiteStub::new(&["7"]), &first_page, today(), None).unwrap();
    assert_eq!(
        out.written,
        vec![dir.join("costa_rica_jobs.json"), dir.join("costa_rica_jobs.csv")]
    );
    assert!(!dir.join("costa_rica_jobs_full.json").exists());
}

/// Keeps every status line and finished id.
#[derive(Default)]
struct Recorder {
    lines: Vec<String>,
    done: Vec<String>,
}

impl Progress for Recorder {
    fn log(&mut self, msg: &str) {
        self.lines.push(msg.to_string());
    }

    fn item_done(&mut self, id: &str, _title: &str) {
        self.done.push(id.to_string());
    }
}

#[test]
fn progress_sink_sees_run_and_save() {
    let dir = tmp_dir("progress");
    let mut rec = Recorder::default();
    let out = scrape::execute(&SiteStub::new(&["100", "101"]), &app(RunMode::Full, &dir), today(), Some(&mut rec)).unwrap();

    assert_eq!(out.total, 2);
    assert_eq!(rec.done, vec!["100", "101"]);
    assert_eq!(rec.lines.last().map(String::as_str), Some("Saved 2 jobs (2 new)"));
}

#[test]
fn progress_sink_hears_about_empty_run() {
    let dir = tmp_dir("progress_empty");
    let mut rec = Recorder::default();
    scrape::execute(&SiteStub::new(&[]), &app(RunMode::Full, &dir), today(), Some(&mut rec)).unwrap();
    assert_eq!(rec.lines.last().map(String::as_str), Some("No jobs were scraped"));
}
