// src/core/config_manager.rs
//! Unified configuration: environment variables, then `config.yaml`, then defaults

use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

const DEFAULT_GATEWAY_URL: &str = "http://localhost:9999";
const DEFAULT_TIMEOUT_SECS: u64 = 30;
const CONFIG_FILE: &str = "config.yaml";
const SESSION_DIR: &str = ".ems-portal";
const SESSION_FILE: &str = "session.json";

const EMS_PREFIX: &str = "/ems";
const EXPERIENCE_PREFIX: &str = "/experience";

#[derive(Debug, Clone, PartialEq)]
pub struct ConfigManager {
    pub environment: String,
    pub gateway: GatewayConfig,
    pub session_path: PathBuf,
    pub log_path: Option<PathBuf>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct GatewayConfig {
    pub url: String,
    pub timeout_seconds: u64,
}

/// One environment section of `config.yaml`; every key is optional
#[derive(Debug, Clone, Default, Deserialize)]
struct FileSection {
    gateway_url: Option<String>,
    timeout_seconds: Option<u64>,
    session_path: Option<PathBuf>,
    log_path: Option<PathBuf>,
}

#[derive(Debug, Default, Deserialize)]
struct ConfigFile {
    #[serde(default)]
    local: FileSection,
    #[serde(default)]
    production: FileSection,
}

impl ConfigManager {
    /// Load configuration from the process environment and `./config.yaml`
    pub fn load() -> Result<Self> {
        let config_path = std::env::current_dir()
            .context("Failed to get current directory")?
            .join(CONFIG_FILE);
        Self::load_from(|key| std::env::var(key).ok(), &config_path)
    }

    /// Load configuration with an explicit variable lookup and config file path
    pub fn load_from<F>(env: F, config_path: &Path) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let environment = env("EMS_ENV")
            .or_else(|| env("ENVIRONMENT"))
            .unwrap_or_else(|| "local".to_string());

        let section = Self::load_file_section(config_path, &environment)?;

        let url = env("EMS_GATEWAY_URL")
            .or(section.gateway_url)
            .unwrap_or_else(|| DEFAULT_GATEWAY_URL.to_string());

        let timeout_seconds = match env("EMS_TIMEOUT_SECS") {
            Some(raw) => raw
                .trim()
                .parse::<u64>()
                .with_context(|| format!("EMS_TIMEOUT_SECS must be a number, got '{}'", raw))?,
            None => section.timeout_seconds.unwrap_or(DEFAULT_TIMEOUT_SECS),
        };

        let session_path = env("EMS_SESSION_PATH")
            .map(PathBuf::from)
            .or(section.session_path)
            .unwrap_or_else(|| Self::default_session_path(&env));

        let log_path = env("EMS_LOG_PATH").map(PathBuf::from).or(section.log_path);

        Ok(Self {
            environment,
            gateway: GatewayConfig {
                url: url.trim_end_matches('/').to_string(),
                timeout_seconds,
            },
            session_path,
            log_path,
        })
    }

    fn load_file_section(config_path: &Path, environment: &str) -> Result<FileSection> {
        if !config_path.exists() {
            return Ok(FileSection::default());
        }

        let content = std::fs::read_to_string(config_path)
            .with_context(|| format!("Failed to read {}", config_path.display()))?;
        let file: ConfigFile = serde_yaml::from_str(&content)
            .with_context(|| format!("Failed to parse {}", config_path.display()))?;

        Ok(match environment {
            "production" => file.production,
            _ => file.local,
        })
    }

    fn default_session_path<F>(env: &F) -> PathBuf
    where
        F: Fn(&str) -> Option<String>,
    {
        let base = env("HOME")
            .or_else(|| env("USERPROFILE"))
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from("."));
        base.join(SESSION_DIR).join(SESSION_FILE)
    }

    /// Base URL of the employee service behind the gateway
    pub fn ems_url(&self) -> String {
        format!("{}{}", self.gateway.url, EMS_PREFIX)
    }

    /// Base URL of the experience service behind the gateway
    pub fn experience_url(&self) -> String {
        format!("{}{}", self.gateway.url, EXPERIENCE_PREFIX)
    }

    /// One-line description for the startup log
    pub fn summary(&self) -> String {
        format!(
            "environment={} gateway={} session={}",
            self.environment,
            self.gateway.url,
            self.session_path.display()
        )
    }

    pub fn with_gateway_url(mut self, url: &str) -> Self {
        self.gateway.url = url.trim_end_matches('/').to_string();
        self
    }

    /// Ensure the session directory exists
    pub async fn ensure_directories(&self) -> Result<()> {
        if let Some(parent) = self.session_path.parent() {
            if !parent.as_os_str().is_empty() {
                tokio::fs::create_dir_all(parent).await.with_context(|| {
                    format!("Failed to create session directory: {}", parent.display())
                })?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn test_defaults_without_file() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("none.yaml");
        let config = ConfigManager::load_from(lookup(&[("HOME", "/home/asha")]), &missing).unwrap();

        assert_eq!(config.environment, "local");
        assert_eq!(config.gateway.url, "http://localhost:9999");
        assert_eq!(config.gateway.timeout_seconds, 30);
        assert_eq!(
            config.session_path,
            PathBuf::from("/home/asha/.ems-portal/session.json")
        );
        assert_eq!(config.log_path, None);
        assert_eq!(config.ems_url(), "http://localhost:9999/ems");
        assert_eq!(config.experience_url(), "http://localhost:9999/experience");
        assert_eq!(
            config.summary(),
            "environment=local gateway=http://localhost:9999 session=/home/asha/.ems-portal/session.json"
        );
    }

    #[test]
    fn test_file_section_by_environment() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.yaml");
        std::fs::write(
            &path,
            "local:\n  gateway_url: http://localhost:8080/\nproduction:\n  gateway_url: https://gateway.example.com\n  timeout_seconds: 10\n  log_path: /var/log/ems.log\n",
        )
        .unwrap();

        let local = ConfigManager::load_from(lookup(&[]), &path).unwrap();
        assert_eq!(local.gateway.url, "http://localhost:8080");

        let production =
            ConfigManager::load_from(lookup(&[("EMS_ENV", "production")]), &path).unwrap();
        assert_eq!(production.gateway.url, "https://gateway.example.com");
        assert_eq!(production.gateway.timeout_seconds, 10);
        assert_eq!(production.log_path, Some(PathBuf::from("/var/log/ems.log")));
    }

    #[test]
    fn test_environment_variables_win() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.yaml");
        std::fs::write(&path, "local:\n  gateway_url: http://from-file:1\n").unwrap();

        let config = ConfigManager::load_from(
            lookup(&[
                ("EMS_GATEWAY_URL", "http://from-env:2"),
                ("EMS_TIMEOUT_SECS", "5"),
                ("EMS_SESSION_PATH", "/tmp/s.json"),
            ]),
            &path,
        )
        .unwrap();

        assert_eq!(config.gateway.url, "http://from-env:2");
        assert_eq!(config.gateway.timeout_seconds, 5);
        assert_eq!(config.session_path, PathBuf::from("/tmp/s.json"));
    }

    #[test]
    fn test_bad_timeout_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let result = ConfigManager::load_from(
            lookup(&[("EMS_TIMEOUT_SECS", "soon")]),
            &dir.path().join("none.yaml"),
        );
        assert!(result.is_err());
    }
}
