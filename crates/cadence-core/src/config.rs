use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};

/// Timezone attached to a recurring task when the form leaves it unset.
pub const DEFAULT_TIMEZONE: &str = "UTC";
/// Log filter used when neither `RUST_LOG` nor the config file sets one.
pub const DEFAULT_LOG_FILTER: &str = "cadence=info";

/// Top-level config (cadence.toml + CADENCE_* env overrides).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CadenceConfig {
    #[serde(default)]
    pub editor: EditorConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Defaults applied when a recurrence editor session starts.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EditorConfig {
    /// IANA name of the timezone stamped on submitted payloads.
    /// Override with env var: CADENCE_EDITOR_TIMEZONE=Europe/Berlin
    #[serde(default = "default_timezone")]
    pub timezone: String,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            timezone: default_timezone(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// `tracing_subscriber::EnvFilter` directive; `RUST_LOG` wins when set.
    #[serde(default = "default_log_filter")]
    pub filter: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: default_log_filter(),
        }
    }
}

fn default_timezone() -> String {
    DEFAULT_TIMEZONE.to_string()
}
fn default_log_filter() -> String {
    DEFAULT_LOG_FILTER.to_string()
}

impl CadenceConfig {
    /// Load config from a TOML file with CADENCE_* env var overrides.
    ///
    /// Checks in order:
    ///   1. Explicit path argument
    ///   2. CADENCE_CONFIG env var
    ///   3. ~/.cadence/cadence.toml
    ///
    /// A missing file is not an error; every field has a default.
    pub fn load(config_path: Option<&str>) -> crate::error::Result<Self> {
        let path = config_path
            .map(String::from)
            .or_else(|| std::env::var("CADENCE_CONFIG").ok())
            .unwrap_or_else(default_config_path);

        tracing::debug!(%path, "loading config");

        Self::from_figment(
            Figment::new()
                .merge(Toml::file(&path))
                .merge(Env::prefixed("CADENCE_").split("_")),
        )
    }

    /// Extract a config from an arbitrary figment, layered over the defaults.
    pub fn from_figment(figment: Figment) -> crate::error::Result<Self> {
        Figment::from(Serialized::defaults(CadenceConfig::default()))
            .merge(figment)
            .extract()
            .map_err(|e| crate::error::CadenceError::Config(e.to_string()))
    }
}

fn default_config_path() -> String {
    let home = std::env::var("HOME").unwrap_or_else(|_| ".".to_string());
    format!("{}/.cadence/cadence.toml", home)
}
