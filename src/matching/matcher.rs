// src/matching/matcher.rs
//! Candidate scoring for talent search.
//!
//! Each active dimension (tech stack, company) selects the employee's
//! experience records whose field contains any tag, sums their years and
//! scores that sum against the target years, capped at 100. An employee must
//! match every active dimension to be a candidate; the match score is the
//! mean of the active dimension scores.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::{debug, warn};

use super::filter::{MatchError, SearchFilter};
use crate::types::{Employee, ExperienceRecord};
use crate::utils::{contains_ci, round_half_up};

const MAX_SCORE: u32 = 100;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CandidateMatch {
    #[serde(flatten)]
    pub employee: Employee,
    pub match_score: u32,
    /// Relevant years estimated from the tech dimension only. Stays `0` when
    /// the search has no tech tags, even if the company dimension matched.
    pub total_relevant: f64,
}

/// Outcome of scoring one dimension for one employee
#[derive(Debug, Clone, Copy, PartialEq)]
struct DimensionScore {
    matched: bool,
    score: u32,
}

/// Rank `employees` against `filter` using their `experience` records.
///
/// Records whose `employee_id` is not in the roster are ignored. The result is
/// sorted by descending score; equal scores keep roster order.
pub fn match_candidates(
    employees: &[Employee],
    experience: &[ExperienceRecord],
    filter: &SearchFilter,
) -> Result<Vec<CandidateMatch>, MatchError> {
    if let Err(e) = filter.validate() {
        warn!("Rejected talent search filter: {}", e);
        return Err(e);
    }

    let tech_tags = filter.active_tech_tags();
    let company_tags = filter.active_company_tags();
    let target_years = filter.target_years();

    let mut by_employee: HashMap<i64, Vec<&ExperienceRecord>> = HashMap::new();
    for record in experience {
        by_employee.entry(record.employee_id).or_default().push(record);
    }

    let mut candidates = Vec::new();

    for employee in employees {
        let Some(records) = by_employee.get(&employee.id) else {
            continue;
        };

        let mut active_scores = Vec::with_capacity(2);
        let mut tech_score = 0;

        if !tech_tags.is_empty() {
            let dimension =
                score_dimension(records, &tech_tags, target_years, |r| r.tech_stack.as_str());
            if !dimension.matched {
                continue;
            }
            tech_score = dimension.score;
            active_scores.push(dimension.score);
        }

        if !company_tags.is_empty() {
            let dimension =
                score_dimension(records, &company_tags, target_years, |r| r.company.as_str());
            if !dimension.matched {
                continue;
            }
            active_scores.push(dimension.score);
        }

        let sum: u32 = active_scores.iter().sum();
        let match_score = round_half_up(sum as f64 / active_scores.len() as f64) as u32;

        let total_relevant = if tech_score > 0 {
            tech_score as f64 * target_years as f64 / 100.0
        } else {
            0.0
        };

        candidates.push(CandidateMatch {
            employee: employee.clone(),
            match_score,
            total_relevant,
        });
    }

    // stable: ties keep roster order
    candidates.sort_by(|a, b| b.match_score.cmp(&a.match_score));

    debug!(
        "Talent search matched {} of {} employees ({} experience records)",
        candidates.len(),
        employees.len(),
        experience.len()
    );

    Ok(candidates)
}

fn score_dimension<F>(
    records: &[&ExperienceRecord],
    tags: &[String],
    target_years: u32,
    field: F,
) -> DimensionScore
where
    F: Fn(&ExperienceRecord) -> &str,
{
    let mut matched = false;
    let mut years: u64 = 0;

    for record in records {
        let value = field(record);
        if tags.iter().any(|tag| contains_ci(value, tag)) {
            matched = true;
            years += record.years as u64;
        }
    }

    if !matched {
        return DimensionScore {
            matched: false,
            score: 0,
        };
    }

    let ratio = years as f64 / target_years.max(1) as f64 * 100.0;
    let score = round_half_up(ratio).min(MAX_SCORE as f64) as u32;

    DimensionScore {
        matched: true,
        score,
    }
}
