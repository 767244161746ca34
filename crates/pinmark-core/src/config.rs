use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;
use std::time::Duration;

/// Remote image fetch policy (optional `[fetch]` section in config.toml).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FetchConfig {
    /// Seconds allowed for the TCP/TLS connect phase.
    pub connect_timeout_secs: u64,
    /// Seconds allowed for the whole transfer, connect included.
    pub timeout_secs: u64,
    /// Follow `Location` redirects from the image host.
    pub follow_redirects: bool,
    /// Upper bound on redirects followed when `follow_redirects` is set.
    pub max_redirections: u32,
    /// Largest response body accepted, in bytes.
    pub max_bytes: u64,
    /// Optional `User-Agent` header sent with the GET.
    #[serde(default)]
    pub user_agent: Option<String>,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            connect_timeout_secs: 15,
            timeout_secs: 30,
            follow_redirects: true,
            max_redirections: 5,
            max_bytes: 20 * 1024 * 1024,
            user_agent: None,
        }
    }
}

impl FetchConfig {
    pub fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.connect_timeout_secs)
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

/// Global configuration loaded from `~/.config/pinmark/config.toml`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PinmarkConfig {
    /// Root directory for stored images. Defaults to `~/.local/share/pinmark/media`.
    #[serde(default)]
    pub media_root: Option<PathBuf>,
    /// SQLite database file. Defaults to `~/.local/state/pinmark/pinmark.db`.
    #[serde(default)]
    pub database_path: Option<PathBuf>,
    #[serde(default)]
    pub fetch: FetchConfig,
}

impl PinmarkConfig {
    /// Configured media root, or the XDG data default.
    pub fn media_root(&self) -> Result<PathBuf> {
        if let Some(p) = &self.media_root {
            return Ok(p.clone());
        }
        let xdg_dirs = xdg::BaseDirectories::with_prefix("pinmark")?;
        Ok(xdg_dirs.create_data_directory("media")?)
    }

    /// Configured database path, or the XDG state default.
    pub fn database_path(&self) -> Result<PathBuf> {
        if let Some(p) = &self.database_path {
            return Ok(p.clone());
        }
        let xdg_dirs = xdg::BaseDirectories::with_prefix("pinmark")?;
        Ok(xdg_dirs.place_state_file("pinmark.db")?)
    }
}

pub fn config_path() -> Result<PathBuf> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("pinmark")?;
    Ok(xdg_dirs.place_config_file("config.toml")?)
}

/// Load configuration from disk, creating a default file if none exists.
pub fn load_or_init() -> Result<PinmarkConfig> {
    let path = config_path()?;
    if !path.exists() {
        let default_cfg = PinmarkConfig::default();
        let toml = toml::to_string_pretty(&default_cfg)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, toml)?;
        tracing::info!("created default config at {}", path.display());
        return Ok(default_cfg);
    }

    let data = fs::read_to_string(&path)?;
    let cfg: PinmarkConfig = toml::from_str(&data)?;
    Ok(cfg)
}
