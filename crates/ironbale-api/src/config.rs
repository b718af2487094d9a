use anyhow::Context;
use ironbale_backoffice::OperatorAccount;
use serde::Deserialize;
use std::fs;
use tracing::{info, warn};

const BYTES_PER_MB: u64 = 1024 * 1024;
/// Longest accepted dashboard session: one year.
const MAX_SESSION_TTL_MINUTES: i64 = 60 * 24 * 365;

const DEFAULT_CONFIG: &str = r#"[environment]
env_type = "default"

[limits]
max_body_size_mb = 64
max_upload_mb = 25

[auth]
session_ttl_minutes = 480
operators = []

[storage]
bucket = "media"
public_base_url = "http://127.0.0.1:3000/storage"
"#;

#[derive(Deserialize, Debug, Clone)]
pub struct Environment {
    pub env_type: String,
}

#[derive(Deserialize, Debug, Clone)]
pub struct LimitsConfig {
    #[serde(default = "default_max_body_size_mb")]
    pub max_body_size_mb: usize,
    #[serde(default = "default_max_upload_mb")]
    pub max_upload_mb: u64,
}

impl LimitsConfig {
    pub fn max_body_bytes(&self) -> usize {
        self.max_body_size_mb.saturating_mul(BYTES_PER_MB as usize)
    }

    pub fn max_upload_bytes(&self) -> u64 {
        self.max_upload_mb.saturating_mul(BYTES_PER_MB)
    }

    /// Uploads travel inside a request body, so a larger upload limit never applies.
    pub fn upload_exceeds_body(&self) -> bool {
        u64::try_from(self.max_body_bytes()).is_ok_and(|body| self.max_upload_bytes() > body)
    }
}

#[derive(Deserialize, Debug, Clone)]
pub struct AuthConfig {
    #[serde(default = "default_session_ttl_minutes")]
    pub session_ttl_minutes: i64,
    /// Accounts allowed into the dashboard
    #[serde(default)]
    pub operators: Vec<OperatorAccount>,
}

#[derive(Deserialize, Debug, Clone)]
pub struct StorageConfig {
    pub bucket: String,
    pub public_base_url: String,
}

#[derive(Deserialize, Debug, Clone)]
pub struct IronbaleConfig {
    pub environment: Environment,
    pub limits: LimitsConfig,
    pub auth: AuthConfig,
    pub storage: StorageConfig,
}

impl IronbaleConfig {
    /// Reads `IRONBALE_CONFIG_PATH` (default `ironbale.toml`), falling back to
    /// the embedded default when the file is missing.
    pub fn load() -> anyhow::Result<Self> {
        let config_path =
            std::env::var("IRONBALE_CONFIG_PATH").unwrap_or_else(|_| "ironbale.toml".to_string());

        match fs::read_to_string(&config_path) {
            Ok(config_str) => Self::from_toml(&config_str)
                .with_context(|| format!("Failed to parse configuration file '{config_path}'")),
            Err(_) => {
                warn!(
                    "Configuration file '{}' not found. Using default configuration.",
                    config_path
                );
                Self::embedded()
            }
        }
    }

    /// The built-in configuration used when no file is present.
    pub fn embedded() -> anyhow::Result<Self> {
        Self::from_toml(DEFAULT_CONFIG)
    }

    pub fn from_toml(config_str: &str) -> anyhow::Result<Self> {
        Ok(toml::from_str(config_str)?)
    }

    pub fn apply_profile(mut self) -> Self {
        info!(
            "Applying configuration profile for '{}' environment.",
            self.environment.env_type
        );

        if let Some(ttl) = env_number::<i64>("IRONBALE_SESSION_TTL_MINUTES") {
            self.auth.session_ttl_minutes = ttl;
        }
        if let Some(max_upload) = env_number::<u64>("IRONBALE_MAX_UPLOAD_MB") {
            self.limits.max_upload_mb = max_upload;
        }

        self
    }

    /// Configured TTL, held to between one minute and one year.
    pub fn session_ttl(&self) -> chrono::Duration {
        let minutes = self.auth.session_ttl_minutes;
        let clamped = minutes.clamp(1, MAX_SESSION_TTL_MINUTES);
        if clamped != minutes {
            warn!(configured = minutes, applied = clamped, "Session TTL out of range; clamping");
        }
        chrono::Duration::try_minutes(clamped).unwrap_or(chrono::Duration::MAX)
    }
}

fn env_number<T: std::str::FromStr>(key: &str) -> Option<T> {
    let raw = std::env::var(key).ok()?;
    match raw.trim().parse::<T>() {
        Ok(value) => Some(value),
        Err(_) => {
            warn!(key, value = %raw, "Ignoring non-numeric environment override");
            None
        }
    }
}

fn default_max_body_size_mb() -> usize {
    64
}
fn default_max_upload_mb() -> u64 {
    25
}
fn default_session_ttl_minutes() -> i64 {
    480
}
