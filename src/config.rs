//! Configuration for Kudos
//!
//! Settings are layered, later sources winning:
//! 1. Built-in defaults
//! 2. TOML file (`--config`, else `<config dir>/kudos/config.toml`), optional
//! 3. Environment variables `KUDOS_<SECTION>__<KEY>`, e.g.
//!    `KUDOS_PAYOUT__RELAYER__API_KEY`

use crate::error::{KudosError, Result};
use config::{Config, Environment, File, FileFormat};
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::debug;

const ENV_PREFIX: &str = "KUDOS";
const REDACTED: &str = "<redacted>";

/// Top-level configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct KudosConfig {
    pub scoring: ScoringConfig,
    pub payout: PayoutConfig,
    pub api: ApiConfig,
}

/// Scoring settings
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringConfig {
    /// Extra lexicon merged over the built-in word tables
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lexicon_path: Option<PathBuf>,
}

/// Where payouts go
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PayoutBackend {
    /// Append to the JSON payout file
    #[default]
    File,
    /// Settle through the transaction relayer only
    Relayer,
    /// Settle through the relayer, then append with the transaction id
    RelayerThenFile,
}

impl PayoutBackend {
    pub fn uses_relayer(self) -> bool {
        matches!(self, PayoutBackend::Relayer | PayoutBackend::RelayerThenFile)
    }
}

/// Payout settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PayoutConfig {
    pub backend: PayoutBackend,

    /// JSON array file payouts are appended to
    pub file_path: PathBuf,

    pub relayer: RelayerConfig,
}

impl Default for PayoutConfig {
    fn default() -> Self {
        Self {
            backend: PayoutBackend::File,
            file_path: PathBuf::from("payouts.json"),
            relayer: RelayerConfig::default(),
        }
    }
}

/// Transaction relayer settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RelayerConfig {
    /// Base URL of the relayer API
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,

    /// Bearer token
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,

    /// Contract the attestation call is sent to
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contract_address: Option<String>,

    /// Contract method invoked per payout
    pub method: String,

    pub confirmation_timeout_secs: u64,
    pub poll_interval_ms: u64,

    /// Submission attempts, including the first
    pub max_attempts: u32,
    pub initial_backoff_ms: u64,
}

impl Default for RelayerConfig {
    fn default() -> Self {
        Self {
            url: None,
            api_key: None,
            contract_address: None,
            method: "attestInteraction".to_string(),
            confirmation_timeout_secs: 120,
            poll_interval_ms: 2000,
            max_attempts: 3,
            initial_backoff_ms: 500,
        }
    }
}

impl RelayerConfig {
    pub fn confirmation_timeout(&self) -> Duration {
        Duration::from_secs(self.confirmation_timeout_secs)
    }

    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }

    pub fn initial_backoff(&self) -> Duration {
        Duration::from_millis(self.initial_backoff_ms)
    }
}

/// HTTP API settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    pub addr: String,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            addr: "127.0.0.1:3000".to_string(),
        }
    }
}

impl ApiConfig {
    pub fn socket_addr(&self) -> Result<SocketAddr> {
        self.addr
            .parse()
            .map_err(|e| invalid(format!("api.addr '{}': {}", self.addr, e)))
    }
}

impl KudosConfig {
    /// Default config file location, if the platform has a config directory
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("kudos").join("config.toml"))
    }

    /// Load from an explicit file (or the default location) plus environment
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let path = path.map(Path::to_path_buf).or_else(Self::default_path);
        Self::load_with_env(path.as_deref(), Environment::with_prefix(ENV_PREFIX))
    }

    fn load_with_env(path: Option<&Path>, env: Environment) -> Result<Self> {
        let mut builder = Config::builder();

        if let Some(path) = path {
            debug!("Reading config file: {}", path.display());
            builder = builder.add_source(File::from(path).format(FileFormat::Toml).required(false));
        }

        let config: KudosConfig = builder
            .add_source(
                env.prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize()?;

        config.validate()?;
        Ok(config)
    }

    /// Reject settings the payout backends cannot run with
    pub fn validate(&self) -> Result<()> {
        let relayer = &self.payout.relayer;

        if self.payout.backend.uses_relayer() {
            if relayer.url.as_deref().map_or(true, |u| u.trim().is_empty()) {
                return Err(invalid(
                    "payout.relayer.url is required for the relayer backend".to_string(),
                ));
            }
            if relayer.contract_address.as_deref().map_or(true, |a| a.trim().is_empty()) {
                return Err(invalid(
                    "payout.relayer.contract_address is required for the relayer backend"
                        .to_string(),
                ));
            }
        }

        if relayer.confirmation_timeout_secs == 0 {
            return Err(invalid(
                "payout.relayer.confirmation_timeout_secs must be positive".to_string(),
            ));
        }
        if relayer.poll_interval_ms == 0 {
            return Err(invalid("payout.relayer.poll_interval_ms must be positive".to_string()));
        }
        if relayer.max_attempts == 0 {
            return Err(invalid("payout.relayer.max_attempts must be at least 1".to_string()));
        }

        self.api.socket_addr()?;
        Ok(())
    }

    /// Effective configuration as TOML with secrets masked
    pub fn to_redacted_toml(&self) -> Result<String> {
        let mut shown = self.clone();
        if shown.payout.relayer.api_key.is_some() {
            shown.payout.relayer.api_key = Some(REDACTED.to_string());
        }
        toml::to_string_pretty(&shown).map_err(|e| KudosError::Other(e.to_string()))
    }
}

fn invalid(message: String) -> KudosError {
    KudosError::Config(config::ConfigError::Message(message))
}
