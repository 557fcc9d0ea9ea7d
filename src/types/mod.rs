// src/types/mod.rs
pub mod employee;
pub mod experience;
pub mod lenient;
pub mod response;

pub use employee::{Employee, EmployeeForm, Role};
pub use experience::{ExperienceQuery, ExperienceRecord, ExperienceRequest, ExperienceSummary};
pub use response::{AuthResponse, ForgotPasswordRequest, HomeStats, LoginRequest};
