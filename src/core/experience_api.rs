// src/core/experience_api.rs
use anyhow::{Context, Result};
use serde::Serialize;
use tracing::{debug, info};

use super::service_client::ServiceClient;
use crate::types::{ExperienceQuery, ExperienceRecord, ExperienceRequest, ExperienceSummary};

const BASE: &str = "/api/experience";

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct OwnerQuery {
    employee_id: i64,
}

/// Experience service client
#[derive(Debug, Clone)]
pub struct ExperienceApi {
    client: ServiceClient,
}

impl ExperienceApi {
    pub fn new(client: ServiceClient) -> Self {
        Self { client }
    }

    /// Feed for talent search. An empty query returns every record.
    pub async fn filter(&self, query: &ExperienceQuery) -> Result<Vec<ExperienceRecord>> {
        let records: Vec<ExperienceRecord> = self
            .client
            .get_with_query(&format!("{}/filter", BASE), query)
            .await
            .context("Failed to filter experience records")?;
        debug!("Experience filter returned {} records", records.len());
        Ok(records)
    }

    pub async fn list_all(&self) -> Result<Vec<ExperienceRecord>> {
        self.client
            .get(BASE)
            .await
            .context("Failed to list experience records")
    }

    pub async fn mine(&self) -> Result<Vec<ExperienceRecord>> {
        self.client
            .get(&format!("{}/me", BASE))
            .await
            .context("Failed to fetch own experience")
    }

    pub async fn my_summary(&self) -> Result<Vec<ExperienceSummary>> {
        self.client
            .get(&format!("{}/summary/me", BASE))
            .await
            .context("Failed to fetch own experience summary")
    }

    pub async fn for_employee(&self, employee_id: i64) -> Result<Vec<ExperienceRecord>> {
        self.client
            .get(&format!("{}/employee/{}", BASE, employee_id))
            .await
            .with_context(|| format!("Failed to fetch experience of employee {}", employee_id))
    }

    pub async fn summary_for_employee(&self, employee_id: i64) -> Result<Vec<ExperienceSummary>> {
        self.client
            .get(&format!("{}/employee/summary/{}", BASE, employee_id))
            .await
            .with_context(|| format!("Failed to fetch summary of employee {}", employee_id))
    }

    pub async fn create(&self, request: &ExperienceRequest) -> Result<ExperienceRecord> {
        let created: ExperienceRecord = self
            .client
            .post_json(BASE, request)
            .await
            .context("Failed to add experience")?;
        info!(
            "Added experience {} for employee {}",
            created.id, created.employee_id
        );
        Ok(created)
    }

    pub async fn update(&self, id: i64, request: &ExperienceRequest) -> Result<ExperienceRecord> {
        self.client
            .put_json(&format!("{}/{}", BASE, id), request)
            .await
            .with_context(|| format!("Failed to update experience {}", id))
    }

    pub async fn delete(&self, id: i64, employee_id: i64) -> Result<()> {
        self.client
            .delete_with_query(&format!("{}/{}", BASE, id), &OwnerQuery { employee_id })
            .await
            .with_context(|| format!("Failed to delete experience {}", id))?;
        info!("Deleted experience {}", id);
        Ok(())
    }
}
