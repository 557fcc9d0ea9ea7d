pub mod analytics;
pub mod cli;
pub mod core;
pub mod logging;
pub mod matching;
pub mod session;
pub mod types;
pub mod utils;

pub use analytics::{EmployeeAnalytics, PersonalStats};
pub use matching::{match_candidates, CandidateMatch, MatchError, ResultLimit, SearchFilter};
pub use session::{can_access, Session, SessionStore};
pub use types::{Employee, ExperienceRecord, Role};
