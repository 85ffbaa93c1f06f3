// tests/assemble.rs
use chrono::NaiveDate;
use url::Url;

use empleos_scrape::config::options::ExtractConfig;
use empleos_scrape::core::Page;
use empleos_scrape::record::{EmploymentType, Gender, SalaryType};
use empleos_scrape::specs::detail::assemble;

const FULL: &str = include_str!("fixtures/detail_full.html");
const EMPTY: &str = include_str!("fixtures/detail_empty.html");

fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 1, 10).unwrap()
}

#[test]
fn bare_page_yields_all_defaults() {
    let url = Url::parse("https://empleos.net/puesto/555").unwrap();
    let rec = assemble(&Page::parse(EMPTY), &url, today(), &ExtractConfig::default());
    let expiry = NaiveDate::from_ymd_opt(2025, 4, 10).unwrap();

    assert_eq!(rec.identifier, "555");
    assert_eq!(rec.title, "");
    assert_eq!(rec.description, "");
    assert_eq!(rec.category, "");
    assert_eq!(rec.featured_image, "");
    assert!(!rec.is_featured && !rec.is_urgent && !rec.is_filled);
    assert_eq!(rec.employment_type, EmploymentType::FullTime);
    assert_eq!(rec.gender, Gender::Any);
    assert_eq!(rec.salary_type, SalaryType::Monthly);
    assert_eq!(rec.salary, "");
    assert_eq!(rec.max_salary, "");
    assert_eq!(rec.apply_email, "");
    assert_eq!(rec.video_url, "");
    assert!(rec.photos.is_empty());
    assert_eq!(rec.expiry_date, expiry);
    assert_eq!(rec.application_deadline, expiry);
    assert_eq!(rec.tag, "Costa Rica");
    assert_eq!(rec.address, "Costa Rica");
    assert_eq!(rec.location, "Costa Rica");
    assert_eq!(rec.map_location, "Costa Rica");
    assert_eq!(rec.apply_url, "https://empleos.net/puesto/555");
}

#[test]
fn full_page_fills_every_field() {
    let url = Url::parse("https://empleos.net/puesto/48211").unwrap();
    let rec = assemble(&Page::parse(FULL), &url, today(), &ExtractConfig::default());

    assert_eq!(rec.identifier, "48211");
    assert_eq!(rec.title, "Asistente Contable");
    assert_eq!(rec.featured_image, "https://empleos.net/logos/acme.png");
    assert!(rec.is_featured);
    assert!(rec.is_urgent);
    assert!(!rec.is_filled);
    assert_eq!(rec.description, "Registrar asientos contables\nConciliaciones bancarias");
    assert_eq!(rec.category, "Contabilidad");
    assert_eq!(rec.employment_type, EmploymentType::PartTime);
    assert_eq!(rec.gender, Gender::Female);
    assert_eq!(rec.apply_email, "rrhh@acme.cr");
    assert_eq!(rec.salary_type, SalaryType::Monthly);
    assert_eq!(rec.salary, "450000");
    assert_eq!(rec.max_salary, "450000");
    assert_eq!(rec.experience, "2 años en puestos similares");
    assert_eq!(rec.career_level, "Intermedio");
    assert_eq!(rec.qualification, "Bachillerato en Administración");
    assert_eq!(rec.video_url, "https://www.youtube.com/embed/abc123");
    assert_eq!(
        rec.photos,
        vec!["https://empleos.net/fotos/oficina1.jpg", "https://empleos.net/fotos/oficina2.jpg"]
    );
    assert_eq!(rec.application_deadline, NaiveDate::from_ymd_opt(2025, 3, 15).unwrap());
    assert_eq!(rec.location, "Barrio Tournon, San José, Costa Rica");
    assert_eq!(rec.address, rec.location);
    assert_eq!(rec.map_location, rec.location);
}

#[test]
fn country_and_horizon_are_configurable() {
    let cfg = ExtractConfig { country: "Panamá".into(), expiry_days: 30, ..ExtractConfig::default() };
    let url = Url::parse("https://empleos.net/puesto/1").unwrap();
    let rec = assemble(&Page::parse(EMPTY), &url, today(), &cfg);
    assert_eq!(rec.tag, "Panamá");
    assert_eq!(rec.location, "Panamá");
    assert_eq!(rec.expiry_date, NaiveDate::from_ymd_opt(2025, 2, 9).unwrap());
}
