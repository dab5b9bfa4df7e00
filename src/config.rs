use anyhow::{Context, Result};
use dotenvy::dotenv;
use std::collections::HashSet;
use std::env;

use crate::adapters::static_partner_directory::{reference_credentials, StaticPartnerDirectory};
use crate::domain::PartnerCredential;
use crate::logging::LogFormat;
use crate::services::freshness::DEFAULT_FRESHNESS_WINDOW_SECS;

#[derive(Debug, Clone)]
pub struct Config {
    pub server_port: u16,
    pub freshness_window_secs: i64,
    pub partners: Vec<PartnerCredential>,
    pub log_level: String,
    pub log_format: LogFormat,
    pub log_request_body: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server_port: 3000,
            freshness_window_secs: DEFAULT_FRESHNESS_WINDOW_SECS,
            partners: reference_credentials(),
            log_level: "info".to_string(),
            log_format: LogFormat::Pretty,
            log_request_body: false,
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenv().ok(); // Load .env file if present

        let defaults = Config::default();

        let partners = match env::var("PARTNER_CREDENTIALS") {
            Ok(raw) => parse_partners(&raw).context("PARTNER_CREDENTIALS is invalid")?,
            Err(_) => defaults.partners,
        };

        Ok(Config {
            server_port: env::var("SERVER_PORT")
                .unwrap_or_else(|_| defaults.server_port.to_string())
                .parse()
                .context("SERVER_PORT must be a port number")?,
            freshness_window_secs: parse_freshness_window(
                &env::var("FRESHNESS_WINDOW_SECS")
                    .unwrap_or_else(|_| defaults.freshness_window_secs.to_string()),
            )?,
            partners,
            log_level: env::var("LOG_LEVEL").unwrap_or(defaults.log_level),
            log_format: env::var("LOG_FORMAT")
                .map(|raw| LogFormat::from_str_lossy(&raw))
                .unwrap_or(defaults.log_format),
            log_request_body: env::var("LOG_REQUEST_BODY")
                .unwrap_or_else(|_| "false".to_string())
                .trim()
                .parse()
                .context("LOG_REQUEST_BODY must be true or false")?,
        })
    }

    pub fn freshness_window(&self) -> chrono::Duration {
        chrono::Duration::seconds(self.freshness_window_secs)
    }

    pub fn partner_directory(&self) -> StaticPartnerDirectory {
        StaticPartnerDirectory::new(self.partners.clone())
    }
}

fn parse_freshness_window(raw: &str) -> Result<i64> {
    let secs: i64 = raw
        .trim()
        .parse()
        .context("FRESHNESS_WINDOW_SECS must be a whole number of seconds")?;

    if secs <= 0 {
        anyhow::bail!("FRESHNESS_WINDOW_SECS must be greater than 0");
    }

    Ok(secs)
}

/// Parses `KEY:secret,KEY:secret`. Secrets are base64-looking strings, so
/// neither `:` nor `,` can appear inside them.
fn parse_partners(raw: &str) -> Result<Vec<PartnerCredential>> {
    let mut seen = HashSet::new();
    let mut partners = Vec::new();

    for entry in raw.split(',').map(str::trim).filter(|entry| !entry.is_empty()) {
        let (key, secret) = entry
            .split_once(':')
            .context("partner entry is not in KEY:secret form")?;
        let (key, secret) = (key.trim(), secret.trim());

        if key.is_empty() || secret.is_empty() {
            anyhow::bail!("partner key and secret must both be non-empty");
        }
        if !seen.insert(key.to_string()) {
            anyhow::bail!("partner '{}' is listed more than once", key);
        }

        partners.push(PartnerCredential::new(key, secret));
    }

    if partners.is_empty() {
        anyhow::bail!("at least one partner must be configured");
    }

    Ok(partners)
}
