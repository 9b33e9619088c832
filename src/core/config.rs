//! # Configuration
//!
//! Where the dashboard finds its server, how long the splash screen stays
//! up, and which packages the list starts filtered to.
//!
//! Settings are read from `~/.wanderlust/config.toml`; `WANDERLUST_SERVER_URL`
//! and `--server` override the server URL, in that order. A first run
//! writes a fully commented-out file listing every setting.

use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::api::{PackageFilter, PackageStatus};

pub const DEFAULT_SERVER_URL: &str = "http://localhost:8000";
pub const DEFAULT_SPLASH_DELAY_MS: u64 = 3000;
pub const SERVER_URL_ENV: &str = "WANDERLUST_SERVER_URL";

const CONFIG_TEMPLATE: &str = r#"# Wanderlust settings. Uncomment a line to change it.

# [api]
# server_url = "http://localhost:8000"   # WANDERLUST_SERVER_URL and --server win over this

# [app]
# splash_delay_ms = 3000                 # How long the splash screen shows

# [dashboard]
# status = "active"                      # Start filtered: active, draft, sold_out, archived
# featured = true                        # Start with featured (or non-featured) packages only
"#;

/// The file as written; every setting may be missing.
#[derive(Debug, Default, Deserialize, Serialize)]
pub struct WanderlustConfig {
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub app: AppConfig,
    #[serde(default)]
    pub dashboard: DashboardConfig,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct ApiConfig {
    pub server_url: Option<String>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct AppConfig {
    pub splash_delay_ms: Option<u64>,
}

/// Initial list filter for the package dashboard.
#[derive(Debug, Default, Deserialize, Serialize)]
pub struct DashboardConfig {
    pub status: Option<PackageStatus>,
    pub featured: Option<bool>,
}

/// Settings after overrides, ready for `run_app` / `run_dashboard`.
#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    pub server_url: String,
    pub splash_delay: Duration,
    pub filter: PackageFilter,
}

#[derive(Debug)]
pub enum ConfigError {
    Read(PathBuf, std::io::Error),
    Invalid(PathBuf, toml::de::Error),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Read(path, e) => write!(f, "cannot read {}: {e}", path.display()),
            ConfigError::Invalid(path, e) => {
                write!(f, "invalid settings in {}: {e}", path.display())
            }
        }
    }
}

impl std::error::Error for ConfigError {}

pub fn config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(".wanderlust").join("config.toml"))
}

/// Reads the settings file, writing the template first if there is none.
/// Without a home directory every setting takes its default.
pub fn load_config() -> Result<WanderlustConfig, ConfigError> {
    let Some(path) = config_path() else {
        warn!("No home directory; using default settings");
        return Ok(WanderlustConfig::default());
    };
    if !path.exists() {
        write_template(&path);
        return Ok(WanderlustConfig::default());
    }
    read_config(&path)
}

fn read_config(path: &Path) -> Result<WanderlustConfig, ConfigError> {
    let contents =
        fs::read_to_string(path).map_err(|e| ConfigError::Read(path.to_path_buf(), e))?;
    let config: WanderlustConfig =
        toml::from_str(&contents).map_err(|e| ConfigError::Invalid(path.to_path_buf(), e))?;
    info!("Loaded settings from {}", path.display());
    debug!("Settings: {:?}", config);
    Ok(config)
}

fn write_template(path: &Path) {
    let written = path
        .parent()
        .map_or(Ok(()), fs::create_dir_all)
        .and_then(|()| fs::write(path, CONFIG_TEMPLATE));
    match written {
        Ok(()) => info!("Wrote settings template to {}", path.display()),
        Err(e) => warn!("Could not write settings template to {}: {}", path.display(), e),
    }
}

/// Applies the overrides. `cli_server` is the `--server` flag.
pub fn resolve(config: &WanderlustConfig, cli_server: Option<&str>) -> ResolvedConfig {
    resolve_with(config, cli_server, std::env::var(SERVER_URL_ENV).ok())
}

fn resolve_with(
    config: &WanderlustConfig,
    cli_server: Option<&str>,
    env_server: Option<String>,
) -> ResolvedConfig {
    let server_url = cli_server
        .map(str::to_string)
        .or(env_server.filter(|url| !url.trim().is_empty()))
        .or_else(|| config.api.server_url.clone())
        .unwrap_or_else(|| DEFAULT_SERVER_URL.to_string());
    let splash_ms = config.app.splash_delay_ms.unwrap_or(DEFAULT_SPLASH_DELAY_MS);

    ResolvedConfig {
        server_url,
        splash_delay: Duration::from_millis(splash_ms),
        filter: PackageFilter {
            status: config.dashboard.status,
            featured: config.dashboard.featured,
        },
    }
}
