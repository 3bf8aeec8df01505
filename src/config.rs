//! Environment configuration.
//!
//! Values come from the process environment, optionally seeded from a `.env`
//! file by `dotenvy` in `main`.

use std::path::PathBuf;
use std::time::Duration;

use crate::notify::DEFAULT_API_URL;
use crate::pricing::services::DEFAULT_MAX_PARTY_SIZE;

const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_PORT: u16 = 3000;
const DEFAULT_SENDER: &str = "Wadi Rum Contact <onboarding@resend.dev>";
const DEFAULT_RECIPIENT: &str = "camp@localhost";
const DEFAULT_EMAIL_TIMEOUT_SECS: u64 = 10;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{0} must be set when RESEND_API_KEY is configured")]
    Missing(&'static str),

    #[error("Invalid value for {var}: {value:?}")]
    Invalid { var: &'static str, value: String },
}

/// Runtime settings
#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    /// Email API key; without it messages are only logged
    pub resend_api_key: Option<String>,
    pub resend_api_url: String,
    pub contact_recipient: String,
    pub contact_sender: String,
    pub email_timeout: Duration,
    /// Catalog JSON file; the built-in price list is used when unset
    pub catalog_path: Option<PathBuf>,
    pub max_party_size: u32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            resend_api_key: None,
            resend_api_url: DEFAULT_API_URL.to_string(),
            contact_recipient: DEFAULT_RECIPIENT.to_string(),
            contact_sender: DEFAULT_SENDER.to_string(),
            email_timeout: Duration::from_secs(DEFAULT_EMAIL_TIMEOUT_SECS),
            catalog_path: None,
            max_party_size: DEFAULT_MAX_PARTY_SIZE,
        }
    }
}

impl Config {
    /// Read configuration from the process environment
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read configuration through an arbitrary lookup. Empty values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let defaults = Self::default();

        let resend_api_key = get("RESEND_API_KEY");

        let contact_recipient = match get("CONTACT_RECIPIENT") {
            Some(recipient) => recipient,
            None if resend_api_key.is_some() => {
                return Err(ConfigError::Missing("CONTACT_RECIPIENT"))
            }
            None => defaults.contact_recipient,
        };

        let max_party_size = parse(get("MAX_PARTY_SIZE"), "MAX_PARTY_SIZE")?
            .unwrap_or(defaults.max_party_size);
        if max_party_size == 0 {
            return Err(ConfigError::Invalid {
                var: "MAX_PARTY_SIZE",
                value: "0".to_string(),
            });
        }

        Ok(Self {
            host: get("HOST").unwrap_or(defaults.host),
            port: parse(get("PORT"), "PORT")?.unwrap_or(defaults.port),
            resend_api_key,
            resend_api_url: get("RESEND_API_URL").unwrap_or(defaults.resend_api_url),
            contact_recipient,
            contact_sender: get("CONTACT_SENDER").unwrap_or(defaults.contact_sender),
            email_timeout: parse(get("EMAIL_TIMEOUT_SECS"), "EMAIL_TIMEOUT_SECS")?
                .map(Duration::from_secs)
                .unwrap_or(defaults.email_timeout),
            catalog_path: get("CATALOG_PATH").map(PathBuf::from),
            max_party_size,
        })
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn parse<T: std::str::FromStr>(
    value: Option<String>,
    var: &'static str,
) -> Result<Option<T>, ConfigError> {
    value
        .map(|v| {
            v.trim()
                .parse::<T>()
                .map_err(|_| ConfigError::Invalid { var, value: v })
        })
        .transpose()
}
