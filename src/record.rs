// src/record.rs
//! The flat job record written to JSON and CSV.
//!
//! Field names carry the `_job_` prefix the downstream importer expects.
//! Enum values are serialised with the Spanish labels the site itself uses.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EmploymentType {
    #[default]
    #[serde(rename = "Tiempo Completo")]
    FullTime,
    #[serde(rename = "Tiempo Parcial")]
    PartTime,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Gender {
    #[serde(rename = "Masculino")]
    Male,
    #[serde(rename = "Femenino")]
    Female,
    #[default]
    #[serde(rename = "Indistinto")]
    Any,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SalaryType {
    #[default]
    #[serde(rename = "Mensual")]
    Monthly,
    #[serde(rename = "Anual")]
    Annual,
    #[serde(rename = "Semanal")]
    Weekly,
    #[serde(rename = "Por Hora")]
    Hourly,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ApplyType {
    #[default]
    #[serde(rename = "external")]
    External,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobRecord {
    /// Numeric id from the detail URL. Older persisted files lack it.
    #[serde(rename = "_job_id", default)]
    pub identifier: String,
    #[serde(rename = "_job_featured_image")]
    pub featured_image: String,
    #[serde(rename = "_job_title")]
    pub title: String,
    #[serde(rename = "_job_featured", with = "flag")]
    pub is_featured: bool,
    #[serde(rename = "_job_filled", with = "flag")]
    pub is_filled: bool,
    #[serde(rename = "_job_urgent", with = "flag")]
    pub is_urgent: bool,
    #[serde(rename = "_job_description")]
    pub description: String,
    #[serde(rename = "_job_category")]
    pub category: String,
    #[serde(rename = "_job_type")]
    pub employment_type: EmploymentType,
    #[serde(rename = "_job_tag")]
    pub tag: String,
    #[serde(rename = "_job_expiry_date")]
    pub expiry_date: NaiveDate,
    #[serde(rename = "_job_gender")]
    pub gender: Gender,
    #[serde(rename = "_job_apply_type")]
    pub apply_type: ApplyType,
    #[serde(rename = "_job_apply_url")]
    pub apply_url: String,
    #[serde(rename = "_job_apply_email")]
    pub apply_email: String,
    #[serde(rename = "_job_salary_type")]
    pub salary_type: SalaryType,
    #[serde(rename = "_job_salary")]
    pub salary: String,
    #[serde(rename = "_job_max_salary")]
    pub max_salary: String,
    #[serde(rename = "_job_experience")]
    pub experience: String,
    #[serde(rename = "_job_career_level")]
    pub career_level: String,
    #[serde(rename = "_job_qualification")]
    pub qualification: String,
    #[serde(rename = "_job_video_url")]
    pub video_url: String,
    #[serde(rename = "_job_photos", with = "photos")]
    pub photos: Vec<String>,
    #[serde(rename = "_job_application_deadline_date")]
    pub application_deadline: NaiveDate,
    #[serde(rename = "_job_address")]
    pub address: String,
    #[serde(rename = "_job_location")]
    pub location: String,
    #[serde(rename = "_job_map_location")]
    pub map_location: String,
}

impl JobRecord {
    /// Column order of the CSV export; matches the struct's field order.
    pub const FIELDS: [&'static str; 27] = [
        "_job_id",
        "_job_featured_image",
        "_job_title",
        "_job_featured",
        "_job_filled",
        "_job_urgent",
        "_job_description",
        "_job_category",
        "_job_type",
        "_job_tag",
        "_job_expiry_date",
        "_job_gender",
        "_job_apply_type",
        "_job_apply_url",
        "_job_apply_email",
        "_job_salary_type",
        "_job_salary",
        "_job_max_salary",
        "_job_experience",
        "_job_career_level",
        "_job_qualification",
        "_job_video_url",
        "_job_photos",
        "_job_application_deadline_date",
        "_job_address",
        "_job_location",
        "_job_map_location",
    ];
}

/// Booleans go out as `1`/`0`; either form is accepted back.
mod flag {
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(v: &bool, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_u8(u8::from(*v))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<bool, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Flag {
            Bool(bool),
            Int(i64),
        }
        Ok(match Flag::deserialize(d)? {
            Flag::Bool(b) => b,
            Flag::Int(n) => n != 0,
        })
    }
}

/// Photos go out comma-joined, with commas inside a URL written as `%2C` and
/// read back as `,`. A JSON array is accepted back as well.
mod photos {
    use serde::{Deserialize, Deserializer, Serializer};

    const COMMA: &str = "%2C";

    pub fn serialize<S: Serializer>(v: &[String], s: S) -> Result<S::Ok, S::Error> {
        let joined = v.iter().map(|p| p.replace(',', COMMA)).collect::<Vec<_>>().join(",");
        s.serialize_str(&joined)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Vec<String>, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Photos {
            Joined(String),
            List(Vec<String>),
        }
        Ok(match Photos::deserialize(d)? {
            Photos::Joined(s) => s
                .split(',')
                .map(str::trim)
                .filter(|p| !p.is_empty())
                .map(|p| p.replace(COMMA, ","))
                .collect(),
            Photos::List(v) => v,
        })
    }
}
