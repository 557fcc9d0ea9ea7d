// src/utils.rs
use anyhow::{Context, Result};
use serde::Serialize;
use std::path::Path;

/// Normalize a search tag: trimmed, lowercased, `None` when blank
pub fn normalize_tag(tag: &str) -> Option<String> {
    let trimmed = tag.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_lowercase())
    }
}

/// Case-insensitive substring test. `needle` must already be lowercase.
pub fn contains_ci(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(needle)
}

/// Round half toward positive infinity, like the dashboard's `Math.round`
pub fn round_half_up(value: f64) -> f64 {
    (value + 0.5).floor()
}

/// Write rows to a CSV file with a header line
pub fn write_csv<S: Serialize>(path: &Path, rows: &[S]) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
        }
    }

    let mut writer = csv::Writer::from_path(path)
        .with_context(|| format!("Failed to create CSV file: {}", path.display()))?;

    for row in rows {
        writer
            .serialize(row)
            .with_context(|| format!("Failed to write CSV row to {}", path.display()))?;
    }

    writer
        .flush()
        .with_context(|| format!("Failed to flush CSV file: {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_tag() {
        assert_eq!(normalize_tag("  Java "), Some("java".to_string()));
        assert_eq!(normalize_tag("Spring Boot"), Some("spring boot".to_string()));
        assert_eq!(normalize_tag("   "), None);
        assert_eq!(normalize_tag(""), None);
    }

    #[test]
    fn test_contains_ci() {
        assert!(contains_ci("Java, Spring", "java"));
        assert!(contains_ci("ACME Corp", "acme"));
        assert!(!contains_ci("Kotlin", "java"));
    }

    #[test]
    fn test_round_half_up() {
        assert_eq!(round_half_up(2.5), 3.0);
        assert_eq!(round_half_up(2.49), 2.0);
        assert_eq!(round_half_up(66.666), 67.0);
        assert_eq!(round_half_up(150.0), 150.0);
    }

    #[test]
    fn test_write_csv() {
        #[derive(Serialize)]
        struct Row {
            name: &'static str,
            count: usize,
        }

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out").join("rows.csv");
        write_csv(&path, &[Row { name: "Engineer", count: 2 }]).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        assert_eq!(content, "name,count\nEngineer,2\n");
    }
}
