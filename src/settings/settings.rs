use crate::domain_model::ReplayPolicy;
use anyhow::{Result, anyhow};
use config::{Config, Environment, File};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct Settings {
    pub account: Account,
    pub log: Log,
    pub session: Session,
    pub token: Token,
}

#[derive(Debug, Deserialize)]
pub struct Account {
    pub directory: String, // "memory" or "mysql"
    pub mysql_url: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct Log {
    pub filter: String,
}

#[derive(Debug, Deserialize)]
pub struct Session {
    pub store: String, // "memory" or "redis"
    pub redis_url: Option<String>,
    pub key_prefix: String,
    pub op_timeout_ms: u64,
    /// Falls back to `token.refresh_ttl_secs` when unset.
    pub revocation_ttl_secs: Option<u64>,
    #[serde(default)]
    pub replay_policy: ReplayPolicy,
}

#[derive(Debug, Deserialize)]
pub struct Token {
    pub issuer: String,
    pub audience: String,
    pub access_ttl_secs: u64,
    pub refresh_ttl_secs: u64,
}

/// Upper bound for any configured lifetime (ten years).
const MAX_TTL_SECS: u64 = 10 * 365 * 24 * 60 * 60;

fn check_ttl(name: &str, secs: u64) -> Result<()> {
    if secs == 0 || secs > MAX_TTL_SECS {
        return Err(anyhow!(
            "{name} must be between 1 and {MAX_TTL_SECS} seconds, got {secs}"
        ));
    }
    Ok(())
}

impl Settings {
    pub fn validate(&self) -> Result<()> {
        check_ttl("token.access_ttl_secs", self.token.access_ttl_secs)?;
        check_ttl("token.refresh_ttl_secs", self.token.refresh_ttl_secs)?;
        if let Some(secs) = self.session.revocation_ttl_secs {
            check_ttl("session.revocation_ttl_secs", secs)?;
        }
        Ok(())
    }
}

#[cfg(debug_assertions)]
const SETTINGS_PATH: &str = "settings/dev.toml";
#[cfg(not(debug_assertions))]
const SETTINGS_PATH: &str = "settings/release.toml";

pub fn parse_settings(path: Option<&str>) -> Result<Settings> {
    let path = path.unwrap_or(SETTINGS_PATH);

    let settings: Settings = Config::builder()
        .add_source(File::with_name(path))
        .add_source(Environment::with_prefix("RACKET").separator("__"))
        .build()
        .map_err(|e| anyhow!(e))?
        .try_deserialize()
        .map_err(|e| anyhow!(e))?;
    settings.validate()?;

    Ok(settings)
}
