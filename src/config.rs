use recipebox_core::{PlanKey, PlanKeyError};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// `default_plan` value meaning "the ISO week containing today".
pub const CURRENT_PLAN: &str = "current";

/// Source of a configuration value
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ConfigSource {
    Default,
    File,
    Environment,
}

impl std::fmt::Display for ConfigSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigSource::Default => write!(f, "default"),
            ConfigSource::File => write!(f, "file"),
            ConfigSource::Environment => write!(f, "environment"),
        }
    }
}

/// A configuration value with its source
#[derive(Debug, Clone, Serialize)]
pub struct ConfigValue<T> {
    pub value: T,
    pub source: ConfigSource,
}

impl<T> ConfigValue<T> {
    pub fn new(value: T, source: ConfigSource) -> Self {
        Self { value, source }
    }
}

/// Remote document service settings
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct StoreConfig {
    /// Document service URL (e.g., "http://localhost:8080")
    pub server_url: Option<String>,
    /// Shared bearer key for the service
    #[serde(skip_serializing)]
    pub api_key: Option<String>,
}

impl StoreConfig {
    /// Returns true if recipes and plans live on a remote service
    pub fn is_remote(&self) -> bool {
        self.server_url.is_some()
    }
}

/// Application configuration with source tracking
#[derive(Debug, Clone, Serialize)]
pub struct Config {
    /// Root for the local document store and preferences
    pub data_dir: ConfigValue<PathBuf>,
    /// Plan key used when a command gets no `--week`
    pub default_plan: ConfigValue<String>,
    /// Config file path used (if any)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub config_file: Option<PathBuf>,
    /// Document store settings
    pub store: StoreConfig,
}

/// Internal struct for deserializing config file
#[derive(Debug, Deserialize, Default)]
#[serde(default)]
struct ConfigFile {
    data_dir: Option<PathBuf>,
    default_plan: Option<String>,
    store: Option<StoreConfig>,
}

impl Config {
    /// Load configuration with priority: env vars > config file > defaults
    pub fn load(config_path: Option<PathBuf>) -> Result<Self, ConfigError> {
        let mut data_dir = ConfigValue::new(Self::default_data_dir(), ConfigSource::Default);
        let mut default_plan = ConfigValue::new(CURRENT_PLAN.to_string(), ConfigSource::Default);
        let mut config_file = None;
        let mut store = StoreConfig::default();

        let path = config_path.unwrap_or_else(Self::default_config_path);
        if path.exists() {
            let contents = std::fs::read_to_string(&path)
                .map_err(|e| ConfigError::ReadError(path.clone(), e))?;
            let file_config: ConfigFile = serde_yaml::from_str(&contents)
                .map_err(|e| ConfigError::ParseError(path.clone(), e))?;

            config_file = Some(path.clone());

            if let Some(dir) = file_config.data_dir {
                // Resolve relative paths against config file's directory
                let resolved = if dir.is_relative() {
                    path.parent().map(|p| p.join(&dir)).unwrap_or(dir)
                } else {
                    dir
                };
                data_dir = ConfigValue::new(resolved, ConfigSource::File);
            }
            if let Some(plan) = file_config.default_plan {
                default_plan = ConfigValue::new(plan, ConfigSource::File);
            }
            if let Some(store_config) = file_config.store {
                store = store_config;
            }
        }

        if let Ok(dir) = std::env::var("RECIPEBOX_DATA_DIR") {
            data_dir = ConfigValue::new(PathBuf::from(dir), ConfigSource::Environment);
        }
        if let Ok(plan) = std::env::var("RECIPEBOX_DEFAULT_PLAN") {
            default_plan = ConfigValue::new(plan, ConfigSource::Environment);
        }
        if let Ok(url) = std::env::var("RECIPEBOX_SERVER_URL") {
            store.server_url = Some(url);
        }
        if let Ok(key) = std::env::var("RECIPEBOX_API_KEY") {
            store.api_key = Some(key);
        }

        Ok(Self {
            data_dir,
            default_plan,
            config_file,
            store,
        })
    }

    /// Resolves the plan a command should act on.
    ///
    /// An explicit `--week` wins over `default_plan`; `current` in either
    /// place means the ISO week containing today.
    pub fn plan_key(&self, week: Option<&str>) -> Result<PlanKey, PlanKeyError> {
        let raw = week.unwrap_or(&self.default_plan.value);
        if raw.trim().eq_ignore_ascii_case(CURRENT_PLAN) {
            Ok(PlanKey::current())
        } else {
            raw.parse()
        }
    }

    /// Directory holding the local document store
    pub fn store_dir(&self) -> PathBuf {
        self.data_dir.value.join("store")
    }

    /// Default config directory (platform-specific):
    /// - Linux: ~/.config/recipebox/
    /// - macOS: ~/Library/Application Support/recipebox/
    /// - Windows: %APPDATA%/recipebox/
    pub fn default_config_dir() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("recipebox")
    }

    /// Default data directory (platform-specific):
    /// - Linux: ~/.local/share/recipebox/
    /// - macOS: ~/Library/Application Support/recipebox/
    /// - Windows: %APPDATA%/recipebox/
    pub fn default_data_dir() -> PathBuf {
        dirs::data_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("recipebox")
    }

    /// Default config file path (platform-specific config dir + config.yaml)
    pub fn default_config_path() -> PathBuf {
        Self::default_config_dir().join("config.yaml")
    }
}

#[derive(Debug)]
pub enum ConfigError {
    ReadError(PathBuf, std::io::Error),
    ParseError(PathBuf, serde_yaml::Error),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::ReadError(path, e) => {
                write!(f, "Failed to read config file '{}': {}", path.display(), e)
            }
            ConfigError::ParseError(path, e) => {
                write!(f, "Failed to parse config file '{}': {}", path.display(), e)
            }
        }
    }
}

impl std::error::Error for ConfigError {}
