// src/core/ems_api.rs
//! Employee service: authentication, directory and public stats

use anyhow::{Context, Result};
use tracing::info;

use super::service_client::ServiceClient;
use crate::types::{
    AuthResponse, Employee, EmployeeForm, ForgotPasswordRequest, HomeStats, LoginRequest, Role,
};

#[derive(Debug, Clone)]
pub struct EmsApi {
    client: ServiceClient,
}

/// Login endpoint for the portal the user is signing in to
pub fn login_endpoint(role: Role) -> &'static str {
    match role {
        Role::Admin => "/auth/admin/login",
        Role::User => "/auth/user/login",
    }
}

impl EmsApi {
    pub fn new(client: ServiceClient) -> Self {
        Self { client }
    }

    pub async fn login(&self, credentials: &LoginRequest, role: Role) -> Result<AuthResponse> {
        let auth: AuthResponse = self
            .client
            .post_json(login_endpoint(role), credentials)
            .await
            .with_context(|| format!("Login failed for {}", credentials.username))?;

        info!("Logged in as {} ({})", credentials.username, auth.role);
        Ok(auth)
    }

    pub async fn forgot_password(&self, request: &ForgotPasswordRequest) -> Result<String> {
        self.client
            .post_for_text("/auth/forgot-password", Some(request))
            .await
            .context("Failed to reset password")
    }

    pub async fn reset_credentials(&self, employee_id: i64) -> Result<String> {
        self.client
            .post_for_text::<()>(&format!("/auth/reset-credentials/{}", employee_id), None)
            .await
            .with_context(|| format!("Failed to reset credentials of employee {}", employee_id))
    }

    pub async fn list_employees(&self) -> Result<Vec<Employee>> {
        self.client
            .get("/api/employees")
            .await
            .context("Failed to list employees")
    }

    pub async fn get_employee(&self, id: i64) -> Result<Employee> {
        self.client
            .get(&format!("/api/employees/{}", id))
            .await
            .with_context(|| format!("Failed to fetch employee {}", id))
    }

    pub async fn create_employee(&self, form: &EmployeeForm) -> Result<Employee> {
        let created: Employee = self
            .client
            .post_json("/api/employees", form)
            .await
            .context("Failed to create employee")?;
        info!("Created employee {} ({})", created.id, created.name);
        Ok(created)
    }

    pub async fn update_employee(&self, id: i64, form: &EmployeeForm) -> Result<Employee> {
        self.client
            .put_json(&format!("/api/employees/{}", id), form)
            .await
            .with_context(|| format!("Failed to update employee {}", id))
    }

    pub async fn delete_employee(&self, id: i64) -> Result<()> {
        self.client
            .delete(&format!("/api/employees/{}", id))
            .await
            .with_context(|| format!("Failed to delete employee {}", id))?;
        info!("Deleted employee {}", id);
        Ok(())
    }

    pub async fn my_profile(&self) -> Result<Employee> {
        self.client
            .get("/api/profile/me")
            .await
            .context("Failed to fetch profile")
    }

    pub async fn public_stats(&self) -> Result<HomeStats> {
        self.client
            .get("/public/stats")
            .await
            .context("Failed to fetch public stats")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_login_endpoint_per_role() {
        assert_eq!(login_endpoint(Role::Admin), "/auth/admin/login");
        assert_eq!(login_endpoint(Role::User), "/auth/user/login");
    }
}
