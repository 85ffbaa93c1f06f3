// src/config/consts.rs

// Net config
pub const BASE_URL: &str = "https://empleos.net";
pub const SEARCH_PATH: &str = "/buscar_vacantes.php";
pub const COUNTRY_CODE: &str = "1"; // Pais=1 → Costa Rica
pub const PAGE_PARAM: &str = "pagelocales";
pub const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";
pub const REQUEST_TIMEOUT_SECS: u64 = 30;

// Record defaults
pub const COUNTRY_NAME: &str = "Costa Rica";
pub const EXPIRY_DAYS: u64 = 90;
pub const MAX_PHOTOS: usize = 5;

// Pacing (slow site, one request at a time)
pub const LISTING_PAUSE_MS: u64 = 3_000;
pub const DETAIL_PAUSE_MS: u64 = 2_000;
pub const PAGE_PAUSE_MS: u64 = 3_000;

// Page ceilings per run mode
pub const FULL_MAX_PAGES: u32 = 44;
pub const UPDATE_MAX_PAGES: u32 = 1;
// Historical value for the two-page run. Pass --max-pages 2 for two pages; see DESIGN.md.
pub const TWO_PAGES_MAX_PAGES: u32 = 1;
pub const FIRST_PAGE_MAX_PAGES: u32 = 1;

// Export
pub const DEFAULT_OUT_DIR: &str = "out";
pub const FULL_STEM: &str = "costa_rica_jobs_full";
pub const TWO_PAGES_STEM: &str = "costa_rica_jobs_two_pages";
pub const FIRST_PAGE_STEM: &str = "costa_rica_jobs";
