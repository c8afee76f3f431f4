//! Configuration loading and root folder resolution
//!
//! Bootstrap settings come from a small TOML file. A missing or unreadable
//! file is not fatal: compiled defaults are used and the [`ConfigSource`]
//! returned alongside says why, so it can be logged after tracing starts.
//!
//! Root folder priority:
//! 1. Command-line argument (highest priority)
//! 2. `JTOUR_ROOT_FOLDER` environment variable
//! 3. `root_folder` in the TOML config file
//! 4. OS-dependent compiled default (fallback)

use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{info, warn};

use crate::store::StoreBackend;
use crate::viewer::{default_approaches, Approach, DEFAULT_LOAD_TIMEOUT};
use crate::{Error, Result};

/// Environment variable overriding the root folder
pub const ROOT_FOLDER_ENV: &str = "JTOUR_ROOT_FOLDER";

/// Environment variable holding the Google Maps embed API key
pub const MAPS_API_KEY_ENV: &str = "NEXT_PUBLIC_GOOGLE_MAPS_API_KEY";

/// Bootstrap configuration loaded from TOML
#[derive(Debug, Clone, Deserialize)]
pub struct TomlConfig {
    /// Folder holding the review store (optional)
    #[serde(default)]
    pub root_folder: Option<PathBuf>,

    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,

    #[serde(default)]
    pub store: StoreBackend,

    /// Google Maps embed API key; keyed approaches are skipped without it
    #[serde(default)]
    pub maps_api_key: Option<String>,

    #[serde(default)]
    pub logging: LoggingConfig,

    #[serde(default)]
    pub viewer: ViewerConfig,
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Log file path (optional, logs to stderr if not specified)
    #[serde(default)]
    pub file: Option<PathBuf>,
}

/// Map viewer configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ViewerConfig {
    /// Seconds an approach has to load before the next one is tried
    #[serde(default = "default_load_timeout_secs")]
    pub load_timeout_secs: u64,

    /// Seconds without any request before an open viewer is closed
    #[serde(default = "default_idle_timeout_secs")]
    pub idle_timeout_secs: u64,

    /// Candidate embeds, tried in order
    #[serde(default = "default_approaches")]
    pub approaches: Vec<Approach>,
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    5730
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_load_timeout_secs() -> u64 {
    DEFAULT_LOAD_TIMEOUT.as_secs()
}

fn default_idle_timeout_secs() -> u64 {
    30 * 60
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            file: None,
        }
    }
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            load_timeout_secs: default_load_timeout_secs(),
            idle_timeout_secs: default_idle_timeout_secs(),
            approaches: default_approaches(),
        }
    }
}

impl ViewerConfig {
    pub fn load_timeout(&self) -> Duration {
        Duration::from_secs(self.load_timeout_secs)
    }

    pub fn idle_timeout(&self) -> Duration {
        Duration::from_secs(self.idle_timeout_secs)
    }
}

impl Default for TomlConfig {
    fn default() -> Self {
        Self {
            root_folder: None,
            host: default_host(),
            port: default_port(),
            store: StoreBackend::default(),
            maps_api_key: None,
            logging: LoggingConfig::default(),
            viewer: ViewerConfig::default(),
        }
    }
}

impl TomlConfig {
    /// Parse and validate TOML content
    pub fn parse(content: &str) -> Result<Self> {
        let config: TomlConfig =
            toml::from_str(content).map_err(|e| Error::Config(format!("Invalid TOML: {}", e)))?;
        if config.viewer.load_timeout_secs == 0 {
            return Err(Error::Config("viewer.load_timeout_secs must be positive".to_string()));
        }
        if config.viewer.idle_timeout_secs == 0 {
            return Err(Error::Config("viewer.idle_timeout_secs must be positive".to_string()));
        }
        Ok(config)
    }

    /// Load from `path`, or from the platform config file when `path` is None
    ///
    /// Never fails: problems fall back to defaults and are reported in the
    /// returned [`ConfigSource`], which the caller logs once tracing is up.
    pub fn load(path: Option<&Path>) -> (Self, ConfigSource) {
        let path = match path.map(Path::to_path_buf).or_else(config_file_path) {
            Some(path) => path,
            None => return (Self::default(), ConfigSource::Defaults),
        };

        let content = match std::fs::read_to_string(&path) {
            Ok(content) => content,
            Err(e) => {
                let error = e.to_string();
                return (Self::default(), ConfigSource::Unreadable { path, error });
            }
        };

        match Self::parse(&content) {
            Ok(config) => (config, ConfigSource::File(path)),
            Err(e) => {
                let error = e.to_string();
                (Self::default(), ConfigSource::Invalid { path, error })
            }
        }
    }
}

/// Outcome of loading the bootstrap config file
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigSource {
    /// No config file found; compiled defaults in use
    Defaults,
    /// Settings read from this file
    File(PathBuf),
    /// The file could not be read; compiled defaults in use
    Unreadable { path: PathBuf, error: String },
    /// The file did not parse or validate; compiled defaults in use
    Invalid { path: PathBuf, error: String },
}

impl ConfigSource {
    /// Report the outcome; info for a loaded or absent file, warn for a fallback
    pub fn log(&self) {
        match self {
            Self::Defaults => info!("No config file found, using compiled defaults"),
            Self::File(path) => info!("Loaded config file {}", path.display()),
            Self::Unreadable { path, error } => {
                warn!("Could not read config file {}: {} (using defaults)", path.display(), error)
            }
            Self::Invalid { path, error } => {
                warn!("{} in {} (using defaults)", error, path.display())
            }
        }
    }
}

/// Platform config file, if one exists
///
/// Linux checks `~/.config/jtour/config.toml` then `/etc/jtour/config.toml`;
/// other platforms check the user config directory only.
pub fn config_file_path() -> Option<PathBuf> {
    let user_config = dirs::config_dir().map(|d| d.join("jtour").join("config.toml"));
    if let Some(path) = user_config.filter(|p| p.exists()) {
        return Some(path);
    }

    if cfg!(target_os = "linux") {
        let system_config = PathBuf::from("/etc/jtour/config.toml");
        if system_config.exists() {
            return Some(system_config);
        }
    }
    None
}

/// Resolve the root folder following the priority order above
pub fn resolve_root_folder(cli_arg: Option<&Path>, config: &TomlConfig) -> PathBuf {
    if let Some(path) = cli_arg {
        return path.to_path_buf();
    }

    if let Ok(path) = std::env::var(ROOT_FOLDER_ENV) {
        if !path.trim().is_empty() {
            return PathBuf::from(path);
        }
    }

    if let Some(path) = &config.root_folder {
        return path.clone();
    }

    default_root_folder()
}

/// OS-dependent default root folder path
pub fn default_root_folder() -> PathBuf {
    if cfg!(target_os = "linux") {
        // ~/.local/share/jtour (or /var/lib/jtour for system-wide)
        dirs::data_local_dir()
            .map(|d| d.join("jtour"))
            .unwrap_or_else(|| PathBuf::from("/var/lib/jtour"))
    } else if cfg!(target_os = "macos") {
        // ~/Library/Application Support/jtour
        dirs::data_dir()
            .map(|d| d.join("jtour"))
            .unwrap_or_else(|| PathBuf::from("/Library/Application Support/jtour"))
    } else if cfg!(target_os = "windows") {
        // %LOCALAPPDATA%\jtour
        dirs::data_local_dir()
            .map(|d| d.join("jtour"))
            .unwrap_or_else(|| PathBuf::from("C:\\ProgramData\\jtour"))
    } else {
        PathBuf::from("./jtour_data")
    }
}

/// Create the root folder if missing
pub fn ensure_root_folder(path: &Path) -> Result<()> {
    if !path.exists() {
        std::fs::create_dir_all(path)?;
        info!("Created root folder: {}", path.display());
    }
    Ok(())
}

/// Pick the maps key: explicit value first, then the config file; blanks count as unset
pub fn resolve_maps_api_key(explicit: Option<&str>, config: &TomlConfig) -> Option<String> {
    let clean = |key: &str| {
        let key = key.trim();
        (!key.is_empty()).then(|| key.to_string())
    };
    explicit
        .and_then(clean)
        .or_else(|| config.maps_api_key.as_deref().and_then(clean))
}
