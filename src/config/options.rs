// src/config/options.rs
use std::path::PathBuf;
use std::time::Duration;

use url::Url;

use super::consts::*;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AppOptions {
    pub scrape: ScrapeOptions,
    pub export: ExportOptions,
}

impl AppOptions {
    pub fn for_mode(mode: RunMode) -> Self {
        Self {
            scrape: ScrapeOptions::for_mode(mode),
            export: ExportOptions::for_mode(mode),
        }
    }
}

impl Default for AppOptions {
    fn default() -> Self {
        Self::for_mode(RunMode::Full)
    }
}

/// Named runs. They differ only in page ceiling, output stem, and whether the
/// result is merged into the persisted cumulative set.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RunMode {
    /// Crawl up to the full ceiling, write a fresh snapshot.
    Full,
    /// Refresh the first page(s) and merge novel jobs into the full set.
    Update,
    /// Bounded snapshot named after the two-page run.
    TwoPages,
    /// First listing page only, separate snapshot.
    FirstPage,
}

impl RunMode {
    pub fn default_max_pages(self) -> u32 {
        match self {
            RunMode::Full      => FULL_MAX_PAGES,
            RunMode::Update    => UPDATE_MAX_PAGES,
            RunMode::TwoPages  => TWO_PAGES_MAX_PAGES,
            RunMode::FirstPage => FIRST_PAGE_MAX_PAGES,
        }
    }

    pub fn file_stem(self) -> &'static str {
        match self {
            // Update writes back into the cumulative set
            RunMode::Full | RunMode::Update => FULL_STEM,
            RunMode::TwoPages               => TWO_PAGES_STEM,
            RunMode::FirstPage              => FIRST_PAGE_STEM,
        }
    }

    pub fn merges(self) -> bool {
        matches!(self, RunMode::Update)
    }

    pub fn label(self) -> &'static str {
        match self {
            RunMode::Full      => "full crawl",
            RunMode::Update    => "update",
            RunMode::TwoPages  => "two-page snapshot",
            RunMode::FirstPage => "first-page snapshot",
        }
    }
}

/// How `_job_max_salary` is filled.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum MaxSalary {
    /// Same value as `_job_salary`.
    #[default]
    MirrorSalary,
    /// Second number in the salary label's own text (e.g. "1000 - 2000").
    SecondNumber,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ExtractConfig {
    /// Relative links (images, job URLs) are resolved against this.
    pub base_url: Url,
    /// Written to `_job_tag`, and the fallback for every location field.
    pub country: String,
    pub expiry_days: u64,
    pub max_photos: usize,
    pub max_salary: MaxSalary,
}

impl Default for ExtractConfig {
    fn default() -> Self {
        Self {
            base_url: Url::parse(BASE_URL).expect("BASE_URL is a valid absolute URL"),
            country: s!(COUNTRY_NAME),
            expiry_days: EXPIRY_DAYS,
            max_photos: MAX_PHOTOS,
            max_salary: MaxSalary::default(),
        }
    }
}

/// Fixed sleeps between requests.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Pacing {
    pub after_listing: Duration,
    pub after_detail: Duration,
    pub between_pages: Duration,
}

impl Pacing {
    /// No sleeps at all (tests, local fixtures).
    pub fn none() -> Self {
        Self {
            after_listing: Duration::ZERO,
            after_detail: Duration::ZERO,
            between_pages: Duration::ZERO,
        }
    }
}

impl Default for Pacing {
    fn default() -> Self {
        Self {
            after_listing: Duration::from_millis(LISTING_PAUSE_MS),
            after_detail: Duration::from_millis(DETAIL_PAUSE_MS),
            between_pages: Duration::from_millis(PAGE_PAUSE_MS),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ScrapeOptions {
    pub mode: RunMode,
    pub max_pages: u32,
    pub pacing: Pacing,
    pub extract: ExtractConfig,
}

impl ScrapeOptions {
    pub fn for_mode(mode: RunMode) -> Self {
        Self {
            mode,
            max_pages: mode.default_max_pages(),
            pacing: Pacing::default(),
            extract: ExtractConfig::default(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ExportOptions {
    pub out_dir: PathBuf,
    pub file_stem: String,
}

impl ExportOptions {
    pub fn for_mode(mode: RunMode) -> Self {
        Self {
            out_dir: PathBuf::from(DEFAULT_OUT_DIR),
            file_stem: s!(mode.file_stem()),
        }
    }

    pub fn json_path(&self) -> PathBuf {
        self.out_dir.join(join!(&self.file_stem, ".json"))
    }

    pub fn csv_path(&self) -> PathBuf {
        self.out_dir.join(join!(&self.file_stem, ".csv"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn update_writes_into_full_set() {
        let full = ExportOptions::for_mode(RunMode::Full);
        let update = ExportOptions::for_mode(RunMode::Update);
        assert_eq!(full.json_path(), update.json_path());
        assert!(RunMode::Update.merges());
        assert!(!RunMode::Full.merges());
    }

    #[test]
    fn ceilings_follow_mode() {
        assert_eq!(ScrapeOptions::for_mode(RunMode::Full).max_pages, FULL_MAX_PAGES);
        assert_eq!(ScrapeOptions::for_mode(RunMode::FirstPage).max_pages, 1);
        assert_eq!(
            ExportOptions::for_mode(RunMode::TwoPages).csv_path(),
            PathBuf::from("out").join("costa_rica_jobs_two_pages.csv")
        );
    }
}
