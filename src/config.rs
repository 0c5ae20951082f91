use color_eyre::{eyre::eyre, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
  /// Sync backend settings. When absent the dashboard runs unsynced and
  /// state lives only for the session.
  pub sync: Option<SyncConfig>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SyncConfig {
  /// Base URL of the sync backend, e.g. "https://sync.example.com/v1/"
  pub url: String,
  /// User whose document to read and write
  pub user: String,
}

impl Config {
  /// Load configuration from file.
  ///
  /// Search order:
  /// 1. Explicit path if provided
  /// 2. ./dayboard.yaml (current directory)
  /// 3. $XDG_CONFIG_HOME/dayboard/config.yaml
  ///
  /// No config file is not an error: the defaults run without sync.
  pub fn load(explicit_path: Option<&Path>) -> Result<Self> {
    let path = if let Some(p) = explicit_path {
      if p.exists() {
        Some(p.to_path_buf())
      } else {
        return Err(eyre!("Config file not found: {}", p.display()));
      }
    } else {
      Self::find_config_file()
    };

    match path {
      Some(p) => Self::load_from_path(&p),
      None => Ok(Config::default()),
    }
  }

  fn find_config_file() -> Option<PathBuf> {
    // Check current directory
    let local = PathBuf::from("dayboard.yaml");
    if local.exists() {
      return Some(local);
    }

    // Check XDG config directory
    if let Some(config_dir) = dirs::config_dir() {
      let xdg_path = config_dir.join("dayboard").join("config.yaml");
      if xdg_path.exists() {
        return Some(xdg_path);
      }
    }

    None
  }

  fn load_from_path(path: &Path) -> Result<Self> {
    let contents = std::fs::read_to_string(path)
      .map_err(|e| eyre!("Failed to read config file {}: {}", path.display(), e))?;

    let config: Config = serde_yaml::from_str(&contents)
      .map_err(|e| eyre!("Failed to parse config file {}: {}", path.display(), e))?;

    Ok(config)
  }

  /// Get the sync backend token from the environment, if any.
  pub fn get_sync_token() -> Option<String> {
    std::env::var("DAYBOARD_SYNC_TOKEN").ok()
  }
}
