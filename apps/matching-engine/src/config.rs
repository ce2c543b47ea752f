use anyhow::{Context, Result};

/// Application configuration loaded from environment variables.
/// Panics at startup (via `?` in `main`) if required variables are missing
/// or malformed.
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub rust_log: String,
    pub cache_ttl_seconds: u64,
    pub default_deadline_ms: u64,
    pub geo_service_url: Option<String>,
    pub geo_service_timeout_ms: u64,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
            cache_ttl_seconds: parse_or_default("CACHE_TTL_SECONDS", 3600)?,
            default_deadline_ms: parse_or_default("DEFAULT_DEADLINE_MS", 150)?,
            geo_service_url: std::env::var("GEO_SERVICE_URL").ok(),
            geo_service_timeout_ms: parse_or_default("GEO_SERVICE_TIMEOUT_MS", 80)?,
        })
    }
}

fn parse_or_default(key: &str, default: u64) -> Result<u64> {
    match std::env::var(key) {
        Ok(raw) => raw.parse::<u64>().with_context(|| format!("{key} must be a non-negative integer")),
        Err(_) => Ok(default),
    }
}
