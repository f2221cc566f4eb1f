use anyhow::{Context, Result};

use crate::matching::similarity::SimilarityBackend;

const DEFAULT_MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

/// Application configuration loaded from environment variables.
/// Every variable is optional; malformed values fail startup.
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub rust_log: String,
    pub max_upload_bytes: usize,
    pub similarity_backend: SimilarityBackend,
    /// Skill keywords appended to the built-in requirement vocabulary.
    pub extra_skills: Vec<String>,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            port: 8000,
            rust_log: "info".to_string(),
            max_upload_bytes: DEFAULT_MAX_UPLOAD_BYTES,
            similarity_backend: SimilarityBackend::default(),
            extra_skills: Vec::new(),
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the config from any key lookup. `from_env` passes the process environment.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Config::default();

        Ok(Config {
            port: match lookup("PORT") {
                Some(v) => v
                    .parse::<u16>()
                    .context("PORT must be a valid port number")?,
                None => defaults.port,
            },
            rust_log: lookup("RUST_LOG").unwrap_or(defaults.rust_log),
            max_upload_bytes: match lookup("MAX_UPLOAD_BYTES") {
                Some(v) => v
                    .parse::<usize>()
                    .context("MAX_UPLOAD_BYTES must be a byte count")?,
                None => defaults.max_upload_bytes,
            },
            similarity_backend: match lookup("SIMILARITY_BACKEND") {
                Some(v) => v
                    .parse::<SimilarityBackend>()
                    .map_err(anyhow::Error::msg)
                    .context("SIMILARITY_BACKEND is invalid")?,
                None => defaults.similarity_backend,
            },
            extra_skills: lookup("EXTRA_SKILLS")
                .map(|v| parse_skill_list(&v))
                .unwrap_or_default(),
        })
    }
}

/// "kubernetes, rust,,go" → ["kubernetes", "rust", "go"]
fn parse_skill_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults_when_nothing_is_set() {
        let config = Config::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config.port, 8000);
        assert_eq!(config.rust_log, "info");
        assert_eq!(config.max_upload_bytes, 10 * 1024 * 1024);
        assert_eq!(config.similarity_backend, SimilarityBackend::TfIdf);
        assert!(config.extra_skills.is_empty());
    }

    #[test]
    fn test_values_are_read() {
        let config = Config::from_lookup(lookup(&[
            ("PORT", "9001"),
            ("RUST_LOG", "debug"),
            ("MAX_UPLOAD_BYTES", "2048"),
            ("SIMILARITY_BACKEND", "overlap"),
            ("EXTRA_SKILLS", "kubernetes, rust,,go "),
        ]))
        .unwrap();
        assert_eq!(config.port, 9001);
        assert_eq!(config.rust_log, "debug");
        assert_eq!(config.max_upload_bytes, 2048);
        assert_eq!(config.similarity_backend, SimilarityBackend::Overlap);
        assert_eq!(config.extra_skills, vec!["kubernetes", "rust", "go"]);
    }

    #[test]
    fn test_invalid_port_fails() {
        let err = Config::from_lookup(lookup(&[("PORT", "eighty")])).unwrap_err();
        assert!(err.to_string().contains("PORT"));
    }

    #[test]
    fn test_unknown_backend_fails() {
        let err = Config::from_lookup(lookup(&[("SIMILARITY_BACKEND", "bm25")])).unwrap_err();
        assert!(err.to_string().contains("SIMILARITY_BACKEND"));
    }
}
