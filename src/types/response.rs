use serde::{Deserialize, Serialize};

use super::employee::Role;
use super::lenient;

// ===== Auth Payloads =====

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ForgotPasswordRequest {
    pub security_key: String,
    pub new_password: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthResponse {
    pub token: String,
    #[serde(default)]
    pub role: Role,
    pub employee_id: Option<i64>,
}

// ===== Public Payloads =====

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HomeStats {
    #[serde(default)]
    pub total_employees: u64,
    #[serde(default)]
    pub new_joinees: u64,
    #[serde(default, deserialize_with = "lenient::amount")]
    pub avg_salary: f64,
}
