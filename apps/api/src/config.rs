use anyhow::{bail, Context, Result};

use crate::budget::{BudgetTier, DEFAULT_CHARS_PER_TOKEN};
use crate::llm_client::GROQ_API_URL;

const DEFAULT_MAX_UPLOAD_BYTES: usize = 1024 * 1024;

/// Application configuration loaded from environment variables.
///
/// `GROQ_API_KEY` is optional at startup; AI requests fail with
/// "AI service not configured" until it is set.
#[derive(Debug, Clone)]
pub struct Config {
    pub groq_api_key: Option<String>,
    pub groq_api_url: String,
    pub port: u16,
    pub rust_log: String,
    pub budget_tier: BudgetTier,
    pub chars_per_token: usize,
    pub max_upload_bytes: usize,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the config from an arbitrary key lookup.
    fn from_lookup(get: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let budget_tier = match get("BUDGET_TIER") {
            Some(raw) => raw
                .parse::<BudgetTier>()
                .map_err(anyhow::Error::msg)
                .context("BUDGET_TIER is invalid")?,
            None => BudgetTier::default(),
        };

        let chars_per_token = parse_or("CHARS_PER_TOKEN", &get, DEFAULT_CHARS_PER_TOKEN)?;
        if chars_per_token == 0 {
            bail!("CHARS_PER_TOKEN must be at least 1");
        }

        Ok(Config {
            groq_api_key: get("GROQ_API_KEY").filter(|k| !k.trim().is_empty()),
            groq_api_url: get("GROQ_API_URL").unwrap_or_else(|| GROQ_API_URL.to_string()),
            port: parse_or("PORT", &get, 8080u16)?,
            rust_log: get("RUST_LOG").unwrap_or_else(|| "info".to_string()),
            budget_tier,
            chars_per_token,
            max_upload_bytes: parse_or("MAX_UPLOAD_BYTES", &get, DEFAULT_MAX_UPLOAD_BYTES)?,
        })
    }

    pub fn ai_configured(&self) -> bool {
        self.groq_api_key.is_some()
    }
}

fn parse_or<T>(key: &str, get: &impl Fn(&str) -> Option<String>, default: T) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match get(key) {
        Some(raw) => raw
            .trim()
            .parse::<T>()
            .with_context(|| format!("{key} must be a valid number, got '{raw}'")),
        None => Ok(default),
    }
}

#[cfg(test)]
impl Config {
    pub fn for_tests() -> Self {
        Config {
            groq_api_key: Some("test-key".to_string()),
            groq_api_url: GROQ_API_URL.to_string(),
            port: 0,
            rust_log: "debug".to_string(),
            budget_tier: BudgetTier::Free,
            chars_per_token: DEFAULT_CHARS_PER_TOKEN,
            max_upload_bytes: DEFAULT_MAX_UPLOAD_BYTES,
        }
    }
}
