use std::path::{Path, PathBuf};

use anyhow::Context;
use serde::{Deserialize, Serialize};

pub const DEFAULT_BRIDGE_TIMEOUT_MS: u64 = 1500;

#[derive(Debug, Serialize, Deserialize)]
pub struct Profile {
    pub db_path: Option<String>,
    /// Service key the operator acts as
    pub job: Option<String>,
    /// Grade the operator holds within the service
    pub grade: Option<u8>,
    /// Base URL of the host bridge; absent means the terminal runs offline
    pub bridge_url: Option<String>,
    #[serde(default = "default_bridge_timeout_ms")]
    pub bridge_timeout_ms: u64,
}

fn default_bridge_timeout_ms() -> u64 {
    DEFAULT_BRIDGE_TIMEOUT_MS
}

impl Default for Profile {
    fn default() -> Self {
        Profile {
            db_path: None,
            job: None,
            grade: None,
            bridge_url: None,
            bridge_timeout_ms: DEFAULT_BRIDGE_TIMEOUT_MS,
        }
    }
}

impl Profile {
    /// Loads the profile at `path`. A missing file is not an error, it just
    /// means the terminal runs on defaults.
    pub fn from_path(path: &Path) -> anyhow::Result<Option<Self>> {
        if !path.exists() {
            return Ok(None);
        }

        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read profile {}", path.display()))?;
        let profile =
            toml::from_str(&contents).with_context(|| format!("Invalid profile {}", path.display()))?;

        Ok(Some(profile))
    }

    pub fn save(&self, path: &Path) -> anyhow::Result<()> {
        let contents = toml::to_string(self).context("Failed to serialize profile")?;
        std::fs::write(path, contents)
            .with_context(|| format!("Failed to write profile {}", path.display()))?;

        Ok(())
    }
}

/// Name of the active profile, `default` when none was ever selected.
pub fn get_current_profile_name() -> anyhow::Result<String> {
    let marker = current_profile_marker();
    if !marker.exists() {
        return Ok("default".to_string());
    }

    let name = std::fs::read_to_string(&marker).context("Failed to read current profile")?;
    Ok(name.trim().to_string())
}

pub fn set_current_profile_name(name: &str) -> anyhow::Result<()> {
    let marker = current_profile_marker();
    if let Some(parent) = marker.parent() {
        std::fs::create_dir_all(parent).context("Failed to create config directory")?;
    }
    std::fs::write(&marker, name).context("Failed to write current profile")?;

    Ok(())
}

/// Config directory for the terminal. XDG_CONFIG_HOME wins over the
/// platform-native location so tests and containers can relocate it.
fn config_dir() -> PathBuf {
    match std::env::var("XDG_CONFIG_HOME") {
        Ok(base) => PathBuf::from(base).join("mdt"),
        Err(_) => directories::ProjectDirs::from("com", "kiwifruit", "mdt")
            .map(|dirs| dirs.config_dir().to_path_buf())
            .unwrap_or_else(|| PathBuf::from(".")),
    }
}

/// Data directory, same resolution order as [`config_dir`] via XDG_DATA_HOME.
fn data_dir() -> PathBuf {
    match std::env::var("XDG_DATA_HOME") {
        Ok(base) => PathBuf::from(base).join("mdt"),
        Err(_) => directories::ProjectDirs::from("com", "kiwifruit", "mdt")
            .map(|dirs| dirs.data_dir().to_path_buf())
            .unwrap_or_else(|| PathBuf::from(".")),
    }
}

fn current_profile_marker() -> PathBuf {
    config_dir().join("current")
}

pub fn get_profile_config_path(profile_name: &str) -> PathBuf {
    config_dir()
        .join("profiles")
        .join(format!("{}.toml", profile_name))
}

/// Cache database location for a profile, under the data dir.
pub fn get_profile_db_path(profile_name: &str) -> PathBuf {
    data_dir()
        .join("profiles")
        .join(profile_name)
        .join(crate::app_config::DEFAULT_DB_FILENAME)
}

/// Every profile with a config file, plus the implicit `default`, sorted.
pub fn list_profiles() -> anyhow::Result<Vec<String>> {
    let profiles_dir = config_dir().join("profiles");
    if !profiles_dir.exists() {
        return Ok(vec!["default".to_string()]);
    }

    let mut profiles: Vec<String> = std::fs::read_dir(&profiles_dir)
        .context("Failed to read profiles directory")?
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .filter(|path| path.is_file() && path.extension().and_then(|s| s.to_str()) == Some("toml"))
        .filter_map(|path| path.file_stem().and_then(|s| s.to_str()).map(str::to_string))
        .collect();

    if !profiles.iter().any(|name| name == "default") {
        profiles.push("default".to_string());
    }
    profiles.sort();

    Ok(profiles)
}

/// Resolves which profile file this invocation uses: the explicitly named
/// one, or whatever `profile use` selected last.
pub fn get_profile_path(arg_profile: &Option<String>) -> PathBuf {
    match arg_profile {
        Some(name) => get_profile_config_path(name),
        None => {
            let current = get_current_profile_name().unwrap_or_else(|_| "default".to_string());
            get_profile_config_path(&current)
        }
    }
}
