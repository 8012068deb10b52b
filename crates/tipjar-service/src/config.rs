//! Service configuration.

use std::path::Path;

use serde::Deserialize;
use tipjar_core::{default_main_menu, MenuButton, TierTable, DEFAULT_LEADERBOARD_LIMIT};

/// Service configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct ServiceConfig {
    /// Address to listen on (default: "0.0.0.0:8080").
    pub listen_addr: String,

    /// Path to `RocksDB` data directory (default: "/data/tipjar").
    pub data_dir: String,

    /// API key the bot front-end must present.
    pub service_api_key: Option<String>,

    /// Maximum request body size in bytes.
    pub max_body_bytes: usize,

    /// Request timeout in seconds.
    pub request_timeout_seconds: u64,

    /// Leaderboard size when the caller gives none.
    pub leaderboard_default_limit: usize,

    /// Upper bound on any requested leaderboard or history page size.
    pub leaderboard_max_limit: usize,

    /// Stars tiers offered in the menu and used for classification.
    pub tiers: TierTable,

    /// Main menu buttons, in display order.
    pub main_menu: Vec<MenuButton>,
}

/// Errors loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Donation config file could not be read.
    #[error("cannot read {path}: {source}")]
    Io {
        /// File path.
        path: String,
        /// Underlying error.
        source: std::io::Error,
    },

    /// Donation config file is not valid.
    #[error("invalid donation config {path}: {source}")]
    Parse {
        /// File path.
        path: String,
        /// Underlying error.
        source: serde_json::Error,
    },
}

/// Donation config file structure.
///
/// ```json
/// {
///   "tiers": [{"amount": 5, "label": "Starter"}],
///   "main_menu": [
///     {"label": "Crypto", "action": {"type": "callback", "target": "crypto"}},
///     {"label": "Patreon", "action": {"type": "url", "target": "https://patreon.example"}}
///   ]
/// }
/// ```
#[derive(Debug, Default, Deserialize)]
struct DonationConfigFile {
    #[serde(default)]
    tiers: Option<TierTable>,
    #[serde(default)]
    main_menu: Option<Vec<MenuButton>>,
}

impl ServiceConfig {
    /// Load configuration from environment variables and the optional
    /// donation config file named by `DONATION_CONFIG_PATH`.
    ///
    /// # Errors
    ///
    /// Returns an error if `DONATION_CONFIG_PATH` is set but the file cannot be
    /// read or does not parse. An invalid tier table never falls back silently.
    pub fn from_env() -> Result<Self, ConfigError> {
        let file = match std::env::var("DONATION_CONFIG_PATH") {
            Ok(path) => load_donation_config(&path)?,
            Err(_) => {
                tracing::debug!("DONATION_CONFIG_PATH not set, using default tiers and menu");
                DonationConfigFile::default()
            }
        };

        let defaults = Self::default();

        Ok(Self {
            listen_addr: std::env::var("LISTEN_ADDR").unwrap_or(defaults.listen_addr),
            data_dir: std::env::var("DATA_DIR").unwrap_or(defaults.data_dir),
            service_api_key: std::env::var("SERVICE_API_KEY").ok(),
            max_body_bytes: env_parse("MAX_BODY_BYTES").unwrap_or(defaults.max_body_bytes),
            request_timeout_seconds: env_parse("REQUEST_TIMEOUT_SECONDS")
                .unwrap_or(defaults.request_timeout_seconds),
            leaderboard_default_limit: env_parse("LEADERBOARD_DEFAULT_LIMIT")
                .unwrap_or(defaults.leaderboard_default_limit),
            leaderboard_max_limit: env_parse("LEADERBOARD_MAX_LIMIT")
                .unwrap_or(defaults.leaderboard_max_limit),
            tiers: file.tiers.unwrap_or(defaults.tiers),
            main_menu: file.main_menu.unwrap_or(defaults.main_menu),
        })
    }

    /// Clamp a requested page size into `1..=leaderboard_max_limit`.
    #[must_use]
    pub fn clamp_limit(&self, requested: Option<usize>) -> usize {
        requested
            .unwrap_or(self.leaderboard_default_limit)
            .clamp(1, self.leaderboard_max_limit.max(1))
    }
}

fn env_parse<T: std::str::FromStr>(name: &str) -> Option<T> {
    std::env::var(name).ok().and_then(|s| s.parse().ok())
}

/// Load the donation config from a JSON file.
fn load_donation_config(path: &str) -> Result<DonationConfigFile, ConfigError> {
    let contents = std::fs::read_to_string(Path::new(path)).map_err(|source| ConfigError::Io {
        path: path.to_string(),
        source,
    })?;

    let config: DonationConfigFile =
        serde_json::from_str(&contents).map_err(|source| ConfigError::Parse {
            path: path.to_string(),
            source,
        })?;

    tracing::info!(
        path = %path,
        custom_tiers = config.tiers.is_some(),
        custom_menu = config.main_menu.is_some(),
        "Loaded donation config from file"
    );

    Ok(config)
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            listen_addr: "0.0.0.0:8080".into(),
            data_dir: "/data/tipjar".into(),
            service_api_key: None,
            max_body_bytes: 64 * 1024,
            request_timeout_seconds: 30,
            leaderboard_default_limit: DEFAULT_LEADERBOARD_LIMIT,
            leaderboard_max_limit: 100,
            tiers: TierTable::default(),
            main_menu: default_main_menu(),
        }
    }
}
