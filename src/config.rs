//! Configuration for lexicon-daily

use std::net::SocketAddr;
use std::path::{Path, PathBuf};

use chrono::NaiveTime;
use serde::{Deserialize, Serialize};

use crate::enricher::DictionaryApiClient;

/// Environment variable prefix, e.g. `LEXICON_SERVER__LISTEN_ADDR`.
pub const ENV_PREFIX: &str = "LEXICON";

/// Main configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,

    #[serde(default)]
    pub storage: StorageConfig,

    #[serde(default)]
    pub lookup: LookupConfig,

    #[serde(default)]
    pub schedule: ScheduleConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_listen_addr")]
    pub listen_addr: SocketAddr,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            listen_addr: default_listen_addr(),
        }
    }
}

/// Where the three JSON artifacts live
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    #[serde(default = "default_corpus_path")]
    pub corpus_path: PathBuf,

    #[serde(default = "default_ledger_path")]
    pub ledger_path: PathBuf,

    #[serde(default = "default_history_path")]
    pub history_path: PathBuf,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            corpus_path: default_corpus_path(),
            ledger_path: default_ledger_path(),
            history_path: default_history_path(),
        }
    }
}

/// Definition lookup service
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LookupConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Per-request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for LookupConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

/// Daily trigger
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScheduleConfig {
    /// UTC time of day, `HH:MM:SS`
    #[serde(default = "default_daily_at")]
    pub daily_at: NaiveTime,

    #[serde(default = "default_true")]
    pub run_on_startup: bool,
}

impl Default for ScheduleConfig {
    fn default() -> Self {
        Self {
            daily_at: default_daily_at(),
            run_on_startup: true,
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,

    #[serde(default)]
    pub json: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            json: false,
        }
    }
}

fn default_true() -> bool {
    true
}

fn default_listen_addr() -> SocketAddr {
    SocketAddr::from(([127, 0, 0, 1], 8080))
}

fn default_corpus_path() -> PathBuf {
    PathBuf::from("data/words.json")
}

fn default_ledger_path() -> PathBuf {
    PathBuf::from("data/used_words.json")
}

fn default_history_path() -> PathBuf {
    PathBuf::from("data/history.json")
}

fn default_base_url() -> String {
    DictionaryApiClient::DEFAULT_BASE_URL.to_string()
}

fn default_timeout_secs() -> u64 {
    10
}

fn default_daily_at() -> NaiveTime {
    NaiveTime::MIN
}

fn default_log_level() -> String {
    "info".to_string()
}

impl AppConfig {
    /// Defaults, then the optional file, then `LEXICON_*` environment variables
    /// (`__` separates nested keys).
    pub fn load(path: Option<&Path>) -> Result<Self, config::ConfigError> {
        let defaults = config::Config::try_from(&AppConfig::default())?;
        let mut builder = config::Config::builder().add_source(defaults);

        if let Some(path) = path {
            builder = builder.add_source(config::File::from(path).required(true));
        }

        builder = builder.add_source(
            config::Environment::with_prefix(ENV_PREFIX)
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        builder.build()?.try_deserialize()
    }
}
