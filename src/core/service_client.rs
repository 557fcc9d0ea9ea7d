// src/core/service_client.rs
//! Thin authenticated JSON client for one gateway-routed service

use anyhow::{Context, Result};
use reqwest::{Method, RequestBuilder, Response, StatusCode};
use serde::{de::DeserializeOwned, Serialize};
use std::time::Duration;
use tracing::{debug, error, trace};
use uuid::Uuid;

use super::error::ClientError;
use crate::session::Session;

const REQUEST_ID_HEADER: &str = "X-Request-Id";

#[derive(Debug, Clone)]
pub struct ServiceClient {
    client: reqwest::Client,
    base_url: String,
    token: Option<String>,
}

impl ServiceClient {
    /// Create new service client with configuration
    pub fn new(base_url: String, timeout_seconds: u64) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(timeout_seconds))
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            token: None,
        })
    }

    /// Attach the session's bearer token to every request
    pub fn with_session(mut self, session: &Session) -> Self {
        self.token = Some(session.token.clone());
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn url(&self, endpoint: &str) -> String {
        if endpoint.starts_with('/') {
            format!("{}{}", self.base_url, endpoint)
        } else {
            format!("{}/{}", self.base_url, endpoint)
        }
    }

    fn request(&self, method: Method, endpoint: &str) -> RequestBuilder {
        let url = self.url(endpoint);
        let request_id = Uuid::new_v4().to_string();
        trace!("{} {} ({})", method, url, request_id);

        let builder = self
            .client
            .request(method, &url)
            .header(REQUEST_ID_HEADER, request_id);

        match &self.token {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    /// Send and return the response if its status is a success
    async fn send(&self, builder: RequestBuilder, endpoint: &str) -> Result<Response> {
        let response = builder
            .send()
            .await
            .with_context(|| format!("HTTP request to {} failed", self.url(endpoint)))?;

        let status = response.status();
        debug!("{} -> {}", self.url(endpoint), status);

        if status.is_success() {
            return Ok(response);
        }

        let error_text = response
            .text()
            .await
            .unwrap_or_else(|_| "Unknown error".to_string());
        Err(status_error(status, &error_text))
    }

    async fn send_json<R>(&self, builder: RequestBuilder, endpoint: &str) -> Result<R>
    where
        R: DeserializeOwned,
    {
        self.send(builder, endpoint)
            .await?
            .json::<R>()
            .await
            .with_context(|| format!("Failed to parse JSON response from {}", endpoint))
    }

    /// Generic GET request
    pub async fn get<R>(&self, endpoint: &str) -> Result<R>
    where
        R: DeserializeOwned,
    {
        self.send_json(self.request(Method::GET, endpoint), endpoint)
            .await
    }

    /// GET with query parameters
    pub async fn get_with_query<Q, R>(&self, endpoint: &str, query: &Q) -> Result<R>
    where
        Q: Serialize + ?Sized,
        R: DeserializeOwned,
    {
        let builder = self.request(Method::GET, endpoint).query(query);
        self.send_json(builder, endpoint).await
    }

    /// Generic POST request with JSON
    pub async fn post_json<T, R>(&self, endpoint: &str, payload: &T) -> Result<R>
    where
        T: Serialize + ?Sized,
        R: DeserializeOwned,
    {
        let builder = self.request(Method::POST, endpoint).json(payload);
        self.send_json(builder, endpoint).await
    }

    /// POST whose response body is plain text
    pub async fn post_for_text<T>(&self, endpoint: &str, payload: Option<&T>) -> Result<String>
    where
        T: Serialize + ?Sized,
    {
        let mut builder = self.request(Method::POST, endpoint);
        if let Some(payload) = payload {
            builder = builder.json(payload);
        }
        self.send(builder, endpoint)
            .await?
            .text()
            .await
            .context("Failed to read response text")
    }

    /// Generic PUT request with JSON
    pub async fn put_json<T, R>(&self, endpoint: &str, payload: &T) -> Result<R>
    where
        T: Serialize + ?Sized,
        R: DeserializeOwned,
    {
        let builder = self.request(Method::PUT, endpoint).json(payload);
        self.send_json(builder, endpoint).await
    }

    /// DELETE, ignoring any response body
    pub async fn delete(&self, endpoint: &str) -> Result<()> {
        self.send(self.request(Method::DELETE, endpoint), endpoint)
            .await?;
        Ok(())
    }

    pub async fn delete_with_query<Q>(&self, endpoint: &str, query: &Q) -> Result<()>
    where
        Q: Serialize + ?Sized,
    {
        let builder = self.request(Method::DELETE, endpoint).query(query);
        self.send(builder, endpoint).await?;
        Ok(())
    }
}

/// Map a non-success status to an error. 401 becomes [`ClientError::Unauthorized`].
pub fn status_error(status: StatusCode, body: &str) -> anyhow::Error {
    if status == StatusCode::UNAUTHORIZED {
        error!("Service rejected the session token");
        return ClientError::Unauthorized.into();
    }
    error!("Service error response {}: {}", status, body);
    anyhow::anyhow!("HTTP {} error: {}", status, body)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Role;

    #[test]
    fn test_url_joining() {
        let client = ServiceClient::new("http://localhost:9999/ems/".to_string(), 5).unwrap();
        assert_eq!(client.base_url(), "http://localhost:9999/ems");
        assert_eq!(
            client.url("/api/employees"),
            "http://localhost:9999/ems/api/employees"
        );
        assert_eq!(
            client.url("public/stats"),
            "http://localhost:9999/ems/public/stats"
        );
    }

    #[test]
    fn test_request_carries_bearer_and_request_id() {
        let session = Session {
            token: "abc.def.ghi".to_string(),
            role: Role::Admin,
            employee_id: None,
        };
        let client = ServiceClient::new("http://localhost:9999/ems".to_string(), 5)
            .unwrap()
            .with_session(&session);

        let request = client
            .request(Method::GET, "/api/employees")
            .build()
            .unwrap();
        let headers = request.headers();
        assert_eq!(headers["authorization"], "Bearer abc.def.ghi");
        assert!(Uuid::parse_str(headers[REQUEST_ID_HEADER].to_str().unwrap()).is_ok());
    }

    #[test]
    fn test_anonymous_request_has_no_bearer() {
        let client = ServiceClient::new("http://localhost:9999/ems".to_string(), 5).unwrap();
        let request = client
            .request(Method::GET, "/public/stats")
            .build()
            .unwrap();
        assert!(request.headers().get("authorization").is_none());
    }

    #[test]
    fn test_status_error_mapping() {
        let unauthorized = status_error(StatusCode::UNAUTHORIZED, "");
        assert_eq!(
            unauthorized.downcast_ref::<ClientError>(),
            Some(&ClientError::Unauthorized)
        );

        let server = status_error(StatusCode::INTERNAL_SERVER_ERROR, "boom");
        assert!(server.downcast_ref::<ClientError>().is_none());
        assert!(server.to_string().contains("boom"));
    }
}
