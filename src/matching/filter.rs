// src/matching/filter.rs
//! Talent-search criteria and their validation

use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::utils::normalize_tag;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MatchError {
    #[error("invalid filter: a minimum-years threshold needs a tech or company tag")]
    InvalidFilter,
    #[error("empty filter: no search criteria given")]
    EmptyFilter,
}

impl MatchError {
    pub fn message(&self) -> &'static str {
        match self {
            MatchError::InvalidFilter => {
                "Cannot search by experience alone. Add a tech stack or company tag."
            }
            MatchError::EmptyFilter => "Please add filters.",
        }
    }
}

/// Tags keep their entry order for display; matching ignores order and case.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchFilter {
    #[serde(default)]
    pub tech_tags: Vec<String>,
    #[serde(default)]
    pub company_tags: Vec<String>,
    #[serde(default)]
    pub min_years: Option<u32>,
}

impl SearchFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_tech_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for tag in tags {
            self.add_tech_tag(tag.as_ref());
        }
        self
    }

    pub fn with_company_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for tag in tags {
            self.add_company_tag(tag.as_ref());
        }
        self
    }

    pub fn with_min_years(mut self, years: u32) -> Self {
        self.min_years = Some(years);
        self
    }

    /// Adds a tech tag unless it is blank or already present. Returns whether it was added.
    pub fn add_tech_tag(&mut self, tag: &str) -> bool {
        push_unique(&mut self.tech_tags, tag)
    }

    /// Adds a company tag unless it is blank or already present. Returns whether it was added.
    pub fn add_company_tag(&mut self, tag: &str) -> bool {
        push_unique(&mut self.company_tags, tag)
    }

    pub fn remove_tech_tag(&mut self, tag: &str) {
        remove_ci(&mut self.tech_tags, tag);
    }

    pub fn remove_company_tag(&mut self, tag: &str) {
        remove_ci(&mut self.company_tags, tag);
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }

    /// Lowercased, non-blank tech tags
    pub fn active_tech_tags(&self) -> Vec<String> {
        self.tech_tags.iter().filter_map(|t| normalize_tag(t)).collect()
    }

    /// Lowercased, non-blank company tags
    pub fn active_company_tags(&self) -> Vec<String> {
        self.company_tags
            .iter()
            .filter_map(|t| normalize_tag(t))
            .collect()
    }

    /// A zero threshold counts as unset.
    pub fn effective_min_years(&self) -> Option<u32> {
        self.min_years.filter(|years| *years > 0)
    }

    /// Years a candidate needs in a dimension to score 100.
    pub fn target_years(&self) -> u32 {
        self.effective_min_years().unwrap_or(1)
    }

    pub fn validate(&self) -> Result<(), MatchError> {
        let has_tags = !self.active_tech_tags().is_empty() || !self.active_company_tags().is_empty();
        if has_tags {
            return Ok(());
        }
        // any threshold, zero included, is a search by experience alone
        match self.min_years {
            Some(_) => Err(MatchError::InvalidFilter),
            None => Err(MatchError::EmptyFilter),
        }
    }
}

fn push_unique(tags: &mut Vec<String>, tag: &str) -> bool {
    let Some(normalized) = normalize_tag(tag) else {
        return false;
    };
    if tags
        .iter()
        .any(|existing| normalize_tag(existing).as_deref() == Some(normalized.as_str()))
    {
        return false;
    }
    tags.push(tag.trim().to_string());
    true
}

fn remove_ci(tags: &mut Vec<String>, tag: &str) {
    let target = normalize_tag(tag);
    tags.retain(|existing| normalize_tag(existing) != target);
}

/// How many ranked candidates to show
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ResultLimit {
    Top(usize),
    #[default]
    All,
}

impl ResultLimit {
    pub fn apply<'a, T>(&self, ranked: &'a [T]) -> &'a [T] {
        match self {
            ResultLimit::Top(n) => &ranked[..(*n).min(ranked.len())],
            ResultLimit::All => ranked,
        }
    }
}

impl FromStr for ResultLimit {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.eq_ignore_ascii_case("all") {
            return Ok(ResultLimit::All);
        }
        match trimmed.parse::<usize>() {
            Ok(n) if n > 0 => Ok(ResultLimit::Top(n)),
            _ => Err(format!(
                "Invalid result limit '{}': use a positive number or 'all'",
                s
            )),
        }
    }
}
