// src/types/experience.rs
//! Work-experience records owned by the experience service

use serde::{Deserialize, Serialize};

use super::lenient;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExperienceRecord {
    pub id: i64,
    pub employee_id: i64,
    #[serde(default, deserialize_with = "lenient::text")]
    pub tech_stack: String,
    #[serde(default, deserialize_with = "lenient::text")]
    pub company: String,
    #[serde(default, deserialize_with = "lenient::years")]
    pub years: u32,
}

impl ExperienceRecord {
    pub fn new(id: i64, employee_id: i64, tech_stack: &str, company: &str, years: u32) -> Self {
        Self {
            id,
            employee_id,
            tech_stack: tech_stack.to_string(),
            company: company.to_string(),
            years,
        }
    }
}

/// Create/update body for `/api/experience`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExperienceRequest {
    pub employee_id: i64,
    pub tech_stack: String,
    pub company: String,
    pub years: u32,
}

/// Years summed per tech stack, as returned by the summary endpoints
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExperienceSummary {
    #[serde(default, deserialize_with = "lenient::text")]
    pub tech_stack: String,
    #[serde(default, deserialize_with = "lenient::years")]
    pub total_years: u32,
}

/// Query parameters accepted by `/api/experience/filter`
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExperienceQuery {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub employee_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tech_stack: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_years: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sort_by: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sort_dir: Option<String>,
}
