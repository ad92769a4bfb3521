use anyhow::{bail, Context, Result};

use crate::suggestion::resolver::OnUpstreamFailure;

/// Application configuration loaded from environment variables.
///
/// The generative credential is intentionally optional: its absence selects
/// the rule-based fallback path rather than failing startup.
#[derive(Debug, Clone)]
pub struct Config {
    pub openai_api_key: Option<String>,
    pub on_upstream_failure: OnUpstreamFailure,
    pub llm_timeout_secs: u64,
    pub port: u16,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            openai_api_key: optional_env("OPENAI_API_KEY"),
            on_upstream_failure: parse_policy(
                optional_env("ON_UPSTREAM_FAILURE")
                    .as_deref()
                    .unwrap_or("fallback"),
            )?,
            llm_timeout_secs: std::env::var("LLM_TIMEOUT_SECS")
                .unwrap_or_else(|_| "30".to_string())
                .parse::<u64>()
                .context("LLM_TIMEOUT_SECS must be a whole number of seconds")?,
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
        })
    }
}

/// Reads an environment variable, treating empty strings as unset.
fn optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}

fn parse_policy(value: &str) -> Result<OnUpstreamFailure> {
    match value.to_lowercase().as_str() {
        "fallback" => Ok(OnUpstreamFailure::Fallback),
        "surface" => Ok(OnUpstreamFailure::Surface),
        other => bail!("ON_UPSTREAM_FAILURE must be 'fallback' or 'surface', got '{other}'"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_policy_fallback() {
        assert!(matches!(
            parse_policy("fallback").unwrap(),
            OnUpstreamFailure::Fallback
        ));
    }

    #[test]
    fn test_parse_policy_surface_case_insensitive() {
        assert!(matches!(
            parse_policy("Surface").unwrap(),
            OnUpstreamFailure::Surface
        ));
    }

    #[test]
    fn test_parse_policy_rejects_unknown() {
        assert!(parse_policy("retry").is_err());
    }
}
