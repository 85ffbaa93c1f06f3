// src/specs/detail.rs
//! Scraping *spec* for a single job posting (`/puesto/<id>`).
//!
//! Purpose:
//! - One extractor per record field. Each locates a label or a class, reads the
//!   adjacent value, and returns the field default when nothing is found.
//! - `assemble` runs every extractor over a parsed page and fills a `JobRecord`.
//!
//! Extractors are independent of each other; the only shared work is the
//! location, which is read once and copied into three fields.

use chrono::{Days, NaiveDate};
use lazy_static::lazy_static;
use regex::Regex;
use scraper::{ElementRef, Selector};
use tracing::debug;
use url::Url;

use crate::config::options::{ExtractConfig, MaxSalary};
use crate::core::html::{Adjacent, Page, following_siblings, line_of, next_sibling_element, parent_element, text_of};
use crate::core::net::Fetch;
use crate::core::sanitize::clean_text;
use crate::error::Result;
use crate::record::{ApplyType, EmploymentType, Gender, JobRecord, SalaryType};
use crate::specs::listing::{ListingEntry, job_id};

lazy_static! {
    static ref HEADINGS: Selector = Selector::parse("h1, h2, h3").unwrap();
    static ref TOP_HEADINGS: Selector = Selector::parse("h1, h2").unwrap();
    static ref IMAGES: Selector = Selector::parse("img").unwrap();
    static ref IFRAMES: Selector = Selector::parse("iframe").unwrap();

    static ref LOGO_CLASS: Regex = Regex::new(r"(?i)logo|company").unwrap();
    static ref TITLE_CLASS: Regex = Regex::new(r"title|puesto|job-title").unwrap();
    static ref FRESH_BADGE: Regex = Regex::new(r"(?i)Vacante\s+Fresca").unwrap();
    static ref FEATURED_CLASS: Regex = Regex::new(r"(?i)featured|destacado").unwrap();
    static ref URGENT: Regex = Regex::new(r"(?i)Vacante\s+Fresca|Urgente").unwrap();

    static ref DESCRIPTION_LABEL: Regex = Regex::new(r"(?i)Funciones del Puesto|Descripción").unwrap();
    static ref DESCRIPTION_FALLBACKS: [Regex; 3] = [
        Regex::new(r"(?i)ACERCA DE LA VACANTE").unwrap(),
        Regex::new(r"(?i)Funciones").unwrap(),
        Regex::new(r"(?i)Descripción").unwrap(),
    ];

    static ref AREA_LABEL: Regex = Regex::new(r"(?i)Área del Puesto").unwrap();
    static ref AREA_CLASS: Regex = Regex::new(r"area|category").unwrap();
    static ref EMPLOYMENT: Regex =
        Regex::new(r"(?i)Tiempo Completo|Tiempo Parcial|Full[-\s]?Time|Part[-\s]?Time").unwrap();
    static ref GENDER_LABEL: Regex = Regex::new(r"(?i)Género|Gender|Sexo").unwrap();
    static ref EMAIL: Regex = Regex::new(r"[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}").unwrap();

    static ref SALARY_ANY: Regex = Regex::new(r"(?i)Salario|Salary|Sueldo").unwrap();
    static ref SALARY_LABEL: Regex = Regex::new(r"(?i)Salario").unwrap();
    static ref DIGITS: Regex = Regex::new(r"\d+").unwrap();

    static ref EXPERIENCE_LABEL: Regex = Regex::new(r"(?i)Experiencia Deseada|Experiencia|Experience").unwrap();
    static ref CAREER_LABEL: Regex = Regex::new(r"(?i)Nivel de Cómputo|Career Level|Nivel").unwrap();
    static ref QUALIFICATION_LABEL: Regex = Regex::new(r"(?i)Nivel Académico").unwrap();
    static ref VIDEO_SRC: Regex = Regex::new(r"(?i)youtube|vimeo").unwrap();
    static ref DEADLINE_LABEL: Regex = Regex::new(r"(?i)Fecha\s+Límite|Deadline|Cierre").unwrap();
    static ref DEADLINE_SHAPE: Regex = Regex::new(r"^\d{1,2}/\d{1,2}/\d{4}$").unwrap();

    static ref LOCATION_LABEL: Regex = Regex::new(r"(?i)Ubicación del Puesto").unwrap();
    static ref LOCATION_CLASS: Regex = Regex::new(r"location|ubicacion").unwrap();
    static ref LOCATION_ICON: Regex = Regex::new(r"location|map|pin").unwrap();
}

const DEADLINE_FORMAT: &str = "%d/%m/%Y";

/// Fetch one detail page and assemble its record.
pub fn fetch(fetcher: &impl Fetch, entry: &ListingEntry, today: NaiveDate, cfg: &ExtractConfig) -> Result<JobRecord> {
    let doc = fetcher.get(&entry.url)?;
    let page = Page::parse(&doc);
    let mut rec = assemble(&page, &entry.url, today, cfg);
    rec.identifier = entry.id.clone();
    Ok(rec)
}

/// Run every extractor and fill the fixed schema. Never fails.
pub fn assemble(page: &Page, url: &Url, today: NaiveDate, cfg: &ExtractConfig) -> JobRecord {
    let expiry = today.checked_add_days(Days::new(cfg.expiry_days)).unwrap_or(NaiveDate::MAX);
    let location = location(page, &cfg.country);
    let salary = salary(page);
    let max_salary = max_salary(page, &salary, cfg.max_salary);

    let rec = JobRecord {
        identifier: job_id(url.as_str()).unwrap_or_default(),
        featured_image: featured_image(page, &cfg.base_url),
        title: title(page),
        is_featured: is_featured(page),
        is_filled: false,
        is_urgent: is_urgent(page),
        description: description(page),
        category: category(page),
        employment_type: employment_type(page),
        tag: cfg.country.clone(),
        expiry_date: expiry,
        gender: gender(page),
        apply_type: ApplyType::External,
        apply_url: url.to_string(),
        apply_email: apply_email(page),
        salary_type: salary_type(page),
        salary,
        max_salary,
        experience: experience(page),
        career_level: career_level(page),
        qualification: qualification(page),
        video_url: video_url(page),
        photos: photos(page, &cfg.base_url, cfg.max_photos),
        application_deadline: application_deadline(page, expiry),
        address: location.clone(),
        location: location.clone(),
        map_location: location,
    };
    debug!(id = %rec.identifier, title = %rec.title, "detail assembled");
    rec
}

/// Company logo, else the first image next to the main heading.
pub fn featured_image(page: &Page, base: &Url) -> String {
    let logo = page
        .html()
        .select(&IMAGES)
        .filter(|img| img.value().attr("class").is_some_and(|c| LOGO_CLASS.is_match(c)))
        .find_map(src_of);
    if let Some(src) = logo {
        return resolve(base, src).unwrap_or_default();
    }

    page.html()
        .select(&TOP_HEADINGS)
        .next()
        .and_then(parent_element)
        .and_then(|area| area.select(&IMAGES).next())
        .and_then(src_of)
        .and_then(|src| resolve(base, src))
        .unwrap_or_default()
}

/// First heading with more than two characters once the "Vacante Fresca" badge is removed.
pub fn title(page: &Page) -> String {
    let heading = page
        .html()
        .select(&HEADINGS)
        .map(without_badge)
        .find(|t| t.chars().count() > 2);
    if let Some(t) = heading {
        return clean_text(&t);
    }

    page.first_by_class(None, &TITLE_CLASS)
        .map(|el| clean_text(&without_badge(el)))
        .unwrap_or_default()
}

fn without_badge(el: ElementRef<'_>) -> String {
    FRESH_BADGE.replace_all(&line_of(el), "").trim().to_string()
}

pub fn is_featured(page: &Page) -> bool {
    page.first_by_class(None, &FEATURED_CLASS).is_some()
}

pub fn is_urgent(page: &Page) -> bool {
    page.has_text(&URGENT)
}

/// Multi-line text of the block after the description heading.
pub fn description(page: &Page) -> String {
    if let Some(block) = page.labeled(&DESCRIPTION_LABEL, &[Adjacent::NextSibling, Adjacent::Grandparent]) {
        return clean_text(&text_of(block, "\n"));
    }
    DESCRIPTION_FALLBACKS
        .iter()
        .find_map(|label| page.labeled(label, &[Adjacent::NextSibling]))
        .map(|block| clean_text(&text_of(block, "\n")))
        .unwrap_or_default()
}

pub fn category(page: &Page) -> String {
    if let Some(hit) = page.find_text(&AREA_LABEL) {
        let direct = next_sibling_element(hit.parent)
            .map(line_of)
            .filter(|t| !t.is_empty());
        let later = || {
            following_siblings(hit.parent)
                .map(line_of)
                .find(|t| !t.starts_with("Ubicación") && t.chars().count() > 2)
        };
        if let Some(t) = direct.or_else(later) {
            return clean_text(&t);
        }
    }
    page.first_by_class(Some("div"), &AREA_CLASS)
        .map(|el| clean_text(&line_of(el)))
        .unwrap_or_default()
}

pub fn employment_type(page: &Page) -> EmploymentType {
    let Some(hit) = page.find_text(&EMPLOYMENT) else {
        return EmploymentType::default();
    };
    let text = hit.text.to_lowercase();
    if text.contains("completo") || text.contains("full") {
        EmploymentType::FullTime
    } else if ["parcial", "medio", "part"].iter().any(|w| text.contains(w)) {
        EmploymentType::PartTime
    } else {
        EmploymentType::default()
    }
}

pub fn gender(page: &Page) -> Gender {
    let Some(value) = page.labeled(&GENDER_LABEL, &[Adjacent::NextSibling, Adjacent::NextInOrder]) else {
        return Gender::default();
    };
    let text = line_of(value).to_lowercase();
    let has = |words: &[&str]| words.iter().any(|w| text.contains(w));
    // "female" contains "male"; female terms are tested first
    if has(&["indistinto", "ambos", "both"]) {
        Gender::Any
    } else if has(&["femenino", "mujer", "female"]) {
        Gender::Female
    } else if has(&["masculino", "hombre", "male"]) {
        Gender::Male
    } else {
        Gender::default()
    }
}

/// First email-shaped token in the visible text.
pub fn apply_email(page: &Page) -> String {
    EMAIL
        .find(&page.visible_text())
        .map(|m| m.as_str().to_string())
        .unwrap_or_default()
}

pub fn salary_type(page: &Page) -> SalaryType {
    let Some(hit) = page.find_text(&SALARY_ANY) else {
        return SalaryType::default();
    };
    let text = line_of(hit.parent).to_lowercase();
    let has = |words: &[&str]| words.iter().any(|w| text.contains(w));
    if has(&["mensual", "monthly", "mes"]) {
        SalaryType::Monthly
    } else if has(&["anual", "yearly", "año"]) {
        SalaryType::Annual
    } else if has(&["hora", "hourly"]) {
        SalaryType::Hourly
    } else if has(&["semanal", "weekly", "semana"]) {
        SalaryType::Weekly
    } else {
        SalaryType::default()
    }
}

/// Digits of the salary block, separators stripped: "350,000 (Moneda Local)" → "350000".
pub fn salary(page: &Page) -> String {
    page.labeled(&SALARY_LABEL, &[Adjacent::NextSibling, Adjacent::Grandparent])
        .and_then(|block| numbers(&block.text().collect::<String>()).into_iter().next())
        .unwrap_or_default()
}

pub fn max_salary(page: &Page, salary: &str, policy: MaxSalary) -> String {
    match policy {
        MaxSalary::MirrorSalary => salary.to_string(),
        MaxSalary::SecondNumber => page
            .find_text(&SALARY_ANY)
            .and_then(|hit| numbers(&hit.parent.text().collect::<String>()).into_iter().nth(1))
            .unwrap_or_default(),
    }
}

/// Digit runs after dropping `,` and `.` thousands separators.
pub fn numbers(text: &str) -> Vec<String> {
    let stripped: String = text.chars().filter(|c| !matches!(c, ',' | '.')).collect();
    DIGITS.find_iter(&stripped).map(|m| m.as_str().to_string()).collect()
}

pub fn experience(page: &Page) -> String {
    labeled_line(page, &EXPERIENCE_LABEL)
}

pub fn career_level(page: &Page) -> String {
    labeled_line(page, &CAREER_LABEL)
}

fn labeled_line(page: &Page, label: &Regex) -> String {
    page.labeled(label, &[Adjacent::NextSibling, Adjacent::NextInOrder])
        .map(|el| clean_text(&line_of(el)))
        .unwrap_or_default()
}

pub fn qualification(page: &Page) -> String {
    let Some(hit) = page.find_text(&QUALIFICATION_LABEL) else {
        return s!();
    };
    next_sibling_element(hit.parent)
        .map(line_of)
        .filter(|t| !t.is_empty())
        .or_else(|| following_siblings(hit.parent).map(line_of).find(|t| t.chars().count() > 2))
        .map(|t| clean_text(&t))
        .unwrap_or_default()
}

/// Embedded YouTube/Vimeo player, `src` as written.
pub fn video_url(page: &Page) -> String {
    page.html()
        .select(&IFRAMES)
        .filter_map(src_of)
        .find(|src| VIDEO_SRC.is_match(src))
        .map(str::to_string)
        .unwrap_or_default()
}

/// Non-logo, non-icon images, resolved and deduplicated, at most `limit`.
pub fn photos(page: &Page, base: &Url, limit: usize) -> Vec<String> {
    let mut out: Vec<String> = Vec::new();
    for src in page.html().select(&IMAGES).filter_map(src_of) {
        if out.len() == limit {
            break;
        }
        let lower = src.to_lowercase();
        if lower.contains("logo") || lower.contains("icon") {
            continue;
        }
        let Some(full) = resolve(base, src) else { continue };
        // Stored with literal commas; `%2C` is how the record writes them
        let full = full.replace("%2C", ",").replace("%2c", ",");
        if !out.contains(&full) {
            out.push(full);
        }
    }
    out
}

pub fn application_deadline(page: &Page, fallback: NaiveDate) -> NaiveDate {
    page.labeled(&DEADLINE_LABEL, &[Adjacent::NextSibling, Adjacent::NextInOrder])
        .and_then(|el| parse_deadline(&line_of(el)))
        .unwrap_or(fallback)
}

/// Strict `dd/mm/yyyy`; anything else is `None`.
pub fn parse_deadline(text: &str) -> Option<NaiveDate> {
    let text = text.trim();
    // `%Y` alone would take "25" as year 25
    if !DEADLINE_SHAPE.is_match(text) {
        return None;
    }
    NaiveDate::parse_from_str(text, DEADLINE_FORMAT).ok()
}

/// Read once per page; feeds address, location and map location.
pub fn location(page: &Page, country: &str) -> String {
    if let Some(hit) = page.find_text(&LOCATION_LABEL) {
        let direct = next_sibling_element(hit.parent)
            .map(line_of)
            .filter(|t| t.chars().count() > 3);
        let later = || {
            following_siblings(hit.parent)
                .map(line_of)
                .find(|t| t.contains(',') && t.chars().count() > 5)
        };
        if let Some(t) = direct.or_else(later) {
            return clean_text(&t);
        }
    }

    if let Some(t) = page
        .first_by_class(None, &LOCATION_CLASS)
        .map(line_of)
        .filter(|t| !t.is_empty())
    {
        return clean_text(&t);
    }

    let beside_icon = page
        .by_class(Some("i"), &LOCATION_ICON)
        .filter_map(next_sibling_element)
        .map(line_of)
        .find(|t| t.chars().count() > 3);
    if let Some(t) = beside_icon {
        return clean_text(&t);
    }

    // "Barrio Tournon, San Jose, Costa Rica"
    let shape = format!(
        r"(?i)[A-Z][a-záéíóúñ\s]+,\s*[A-Z][a-záéíóúñ\s]+,\s*{}",
        regex::escape(country)
    );
    if let Ok(re) = Regex::new(&shape) {
        if let Some(hit) = page.find_text(&re) {
            return clean_text(hit.text);
        }
    }

    country.to_string()
}

fn src_of(el: ElementRef<'_>) -> Option<&str> {
    el.value().attr("src").map(str::trim).filter(|s| !s.is_empty())
}

/// Absolute form of a possibly relative link.
pub fn resolve(base: &Url, href: &str) -> Option<String> {
    base.join(href).ok().map(String::from)
}
