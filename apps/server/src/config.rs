use std::{net::SocketAddr, time::Duration};

use anyhow::Context;
use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};
use rand::{rngs::OsRng, RngCore};

/// Output format of the tracing subscriber.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Text,
    Json,
}

pub struct Config {
    pub listen_addr: SocketAddr,
    pub db_path: String,
    pub cors_allow: Vec<String>,
    pub request_timeout: Duration,
    /// HMAC key used to sign access tokens. `None` means a random key is
    /// generated at startup.
    pub secret_key: Option<Vec<u8>>,
    pub token_ttl: Duration,
    pub log_format: LogFormat,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        let listen_addr: SocketAddr = std::env::var("SC_LISTEN_ADDR")
            .unwrap_or_else(|_| "0.0.0.0:8080".to_string())
            .parse()
            .context("Invalid SC_LISTEN_ADDR")?;
        let db_path = std::env::var("SC_DB_PATH").unwrap_or_else(|_| "./db/app.db".into());
        let cors_allow = parse_origins(
            &std::env::var("SC_CORS_ALLOW_ORIGINS").unwrap_or_else(|_| "*".into()),
        );
        let timeout_ms: u64 = std::env::var("SC_REQUEST_TIMEOUT_MS")
            .unwrap_or_else(|_| "30000".into())
            .parse()
            .unwrap_or(30000);
        let secret_key = std::env::var("SC_SECRET_KEY")
            .ok()
            .map(|raw| decode_secret_key(&raw))
            .transpose()?;
        let ttl_secs: u64 = std::env::var("SC_TOKEN_TTL_SECS")
            .unwrap_or_else(|_| "3600".into())
            .parse()
            .context("Invalid SC_TOKEN_TTL_SECS")?;
        let log_format = match std::env::var("SC_LOG_FORMAT") {
            Ok(raw) => parse_log_format(&raw)?,
            Err(_) => LogFormat::Text,
        };

        Ok(Self {
            listen_addr,
            db_path,
            cors_allow,
            request_timeout: Duration::from_millis(timeout_ms),
            secret_key,
            token_ttl: Duration::from_secs(ttl_secs),
            log_format,
        })
    }
}

fn parse_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}

fn parse_log_format(raw: &str) -> anyhow::Result<LogFormat> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "text" => Ok(LogFormat::Text),
        "json" => Ok(LogFormat::Json),
        other => anyhow::bail!("Invalid SC_LOG_FORMAT '{other}' (expected text or json)"),
    }
}

/// Accepts base64 of 32 bytes, or a 32-character ASCII string.
pub fn decode_secret_key(raw: &str) -> anyhow::Result<Vec<u8>> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        anyhow::bail!("SC_SECRET_KEY cannot be empty");
    }
    match BASE64.decode(trimmed) {
        Ok(bytes) if bytes.len() == 32 => Ok(bytes),
        _ if trimmed.len() == 32 => Ok(trimmed.as_bytes().to_vec()),
        Ok(_) => anyhow::bail!("SC_SECRET_KEY must decode to exactly 32 bytes"),
        Err(_) => {
            anyhow::bail!("SC_SECRET_KEY must be base64 encoded or a 32-byte ASCII string")
        }
    }
}

pub fn random_secret_key() -> Vec<u8> {
    let mut bytes = vec![0u8; 32];
    OsRng.fill_bytes(&mut bytes);
    bytes
}
