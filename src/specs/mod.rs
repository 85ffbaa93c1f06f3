// src/specs/mod.rs
//! # Scraping “specs” module
//!
//! Page-specific scraping specifications for empleos.net. Each spec focuses on a
//! single page kind and encodes *where the ground truth lives in the HTML* and
//! *how to extract it robustly*.
//!
//! ## What lives here
//! - **Pure HTML reading** for remote pages (`/buscar_vacantes.php`, `/puesto/<id>`).
//! - **Label precedence** per field (e.g. prefer "Funciones del Puesto" over the
//!   generic "Descripción" block).
//! - **Tolerant extraction** on top of `core::html::Page`: locate a label, step to
//!   the adjacent element, fall back to a class lookup, then to a fixed default.
//!
//! ## What does **not** live here
//! - **Pacing, stop rules, the seen-identifier set** – `scrape::run` owns those.
//! - **Persistence and merging** – `store` and `file`.
//!
//! ## Typical call chain
//! ```text
//! cli → scrape::execute → scrape::run → specs::listing::fetch()
//!                                     ↘ specs::detail::fetch() → JobRecord
//!       store::merge / file::export (outside of specs)
//! ```
//!
//! ## Conventions & invariants
//! - Extractors never fail. A missing anchor yields the field's default.
//! - Every text value goes through `sanitize::clean_text` exactly once, at the end.
//! - Script and style text is never taken for a label.
//!
//! ## Current specs
//! - `listing` – job links and the pagination hint of one search-results page.
//! - `detail` – every field of a single job posting, assembled into a `JobRecord`.
//!
//! ## Testing notes
//! - Specs are testable **offline** against saved HTML (`tests/fixtures/`).
pub mod listing;
pub mod detail;
