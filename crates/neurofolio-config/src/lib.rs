//! Configuration for the neurofolio portfolio.
//!
//! Configuration comes from an optional TOML file in the platform config
//! directory, then selected environment variables override it. A missing file
//! is not an error; every field has a default.

mod error;
mod paths;

use std::path::Path;

use neurofolio_core::{PointerMode, Settings};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

pub use error::ConfigError;
pub use paths::{config_path, log_path};

/// Default EmailJS send endpoint.
pub const DEFAULT_EMAIL_ENDPOINT: &str = "https://api.emailjs.com/api/v1.0/email/send";

/// Environment variable names that override the file.
pub mod env {
    pub const SERVICE_ID: &str = "EMAILJS_SERVICE_ID";
    pub const TEMPLATE_ID: &str = "EMAILJS_TEMPLATE_ID";
    pub const PUBLIC_KEY: &str = "EMAILJS_PUBLIC_KEY";
    pub const SITE_URL: &str = "NEUROFOLIO_SITE_URL";
    pub const ADDR: &str = "NEUROFOLIO_ADDR";
}

/// Complete application configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub background: BackgroundConfig,
    pub page: PageConfig,
    pub relay: RelayConfig,
}

/// Animated background configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BackgroundConfig {
    /// Initial settings, adjustable at runtime from the control panel.
    #[serde(flatten)]
    pub settings: Settings,
    /// Target time between frames.
    pub frame_interval_ms: u64,
    /// Whether nearby nodes flee from or follow the pointer.
    pub pointer_mode: PointerMode,
}

impl Default for BackgroundConfig {
    fn default() -> Self {
        Self {
            settings: Settings::default(),
            frame_interval_ms: 33,
            pointer_mode: PointerMode::default(),
        }
    }
}

/// Text shown in the hero overlay.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PageConfig {
    pub title: String,
    pub tagline: String,
    pub summary: String,
}

impl Default for PageConfig {
    fn default() -> Self {
        Self {
            title: "ALEX NEURAL".to_string(),
            tagline: "Cybersecurity Specialist & Network Engineer".to_string(),
            summary: "Specializing in advanced network security, penetration testing, and \
                      cryptographic systems."
                .to_string(),
        }
    }
}

/// Contact relay configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RelayConfig {
    /// Listen address for `serve`.
    pub addr: String,
    /// Public URL of the site; sent as `Origin` upstream and accepted by the guard.
    pub site_url: Option<String>,
    /// Recipient display name in the email template.
    pub to_name: String,
    /// Email delivery endpoint.
    pub endpoint: String,
    /// Timeout for the outbound request.
    pub timeout_secs: u64,
    pub emailjs: EmailJsIds,
}

impl Default for RelayConfig {
    fn default() -> Self {
        Self {
            addr: "127.0.0.1:3000".to_string(),
            site_url: None,
            to_name: "Portfolio Owner".to_string(),
            endpoint: DEFAULT_EMAIL_ENDPOINT.to_string(),
            timeout_secs: 10,
            emailjs: EmailJsIds::default(),
        }
    }
}

/// EmailJS identifiers. All three are required to deliver mail.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EmailJsIds {
    pub service_id: Option<String>,
    pub template_id: Option<String>,
    pub public_key: Option<String>,
}

impl Config {
    /// Load from `path`, or from the default location when `None`, then apply
    /// environment overrides.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let mut config = match path {
            Some(path) => Self::from_file(path)?,
            None => match config_path() {
                Some(path) if path.exists() => Self::from_file(&path)?,
                _ => {
                    debug!("no config file found, using defaults");
                    Self::default()
                }
            },
        };
        config.apply_overrides(|key| std::env::var(key).ok());
        Ok(config)
    }

    /// Parse a TOML file. Settings are clamped into range.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_toml(&text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        info!(path = %path.display(), "loaded config");
        Ok(config)
    }

    /// Parse TOML text. Settings are clamped into range.
    pub fn from_toml(text: &str) -> Result<Self, toml::de::Error> {
        let mut config: Config = toml::from_str(text)?;
        config.background.settings = config.background.settings.clamped();
        Ok(config)
    }

    /// Override fields from an environment lookup. Empty values count as unset.
    pub fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if let Some(v) = get(env::SERVICE_ID) {
            self.relay.emailjs.service_id = Some(v);
        }
        if let Some(v) = get(env::TEMPLATE_ID) {
            self.relay.emailjs.template_id = Some(v);
        }
        if let Some(v) = get(env::PUBLIC_KEY) {
            self.relay.emailjs.public_key = Some(v);
        }
        if let Some(v) = get(env::SITE_URL) {
            self.relay.site_url = Some(v);
        }
        if let Some(v) = get(env::ADDR) {
            self.relay.addr = v;
        }
    }
}
