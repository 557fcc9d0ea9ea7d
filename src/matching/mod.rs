// src/matching/mod.rs
//! Talent search: filter criteria and candidate ranking

pub mod filter;
pub mod matcher;

pub use filter::{MatchError, ResultLimit, SearchFilter};
pub use matcher::{match_candidates, CandidateMatch};
