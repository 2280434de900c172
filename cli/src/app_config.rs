use std::path::Path;

use mdt_core::Actor;
use serde::Serialize;

use crate::{args::ConfigArgs, profile::Profile};

pub const DEFAULT_DB_FILENAME: &str = "mdt.db";
pub const DEFAULT_JOB: &str = "lspd";
pub const DEFAULT_GRADE: u8 = 1;

/// Effective configuration for one invocation: flags and environment beat the
/// profile, the profile beats the built-in defaults.
#[derive(Debug, Serialize)]
pub struct AppConfig {
    pub profile_path: String,
    pub db_path: String,
    pub job: String,
    pub grade: u8,
    pub bridge_url: Option<String>,
    pub bridge_timeout_ms: u64,
    pub profile_exists: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        AppConfig {
            profile_path: "./".to_string(),
            db_path: format!("./{}", DEFAULT_DB_FILENAME),
            job: DEFAULT_JOB.to_string(),
            grade: DEFAULT_GRADE,
            bridge_url: None,
            bridge_timeout_ms: crate::profile::DEFAULT_BRIDGE_TIMEOUT_MS,
            profile_exists: false,
        }
    }
}

impl AppConfig {
    pub fn from_args(args: ConfigArgs, profile_path: &Path, profile: Option<&Profile>) -> Self {
        let defaults = AppConfig::default();

        let db_path = profile
            .and_then(|p| p.db_path.as_ref())
            .cloned()
            .or(build_db_path(profile_path))
            .unwrap_or(defaults.db_path);

        let job = args
            .job
            .or_else(|| profile.and_then(|p| p.job.clone()))
            .unwrap_or(defaults.job)
            .to_lowercase();

        let grade = args
            .grade
            .or_else(|| profile.and_then(|p| p.grade))
            .unwrap_or(defaults.grade);

        let bridge_url = args
            .bridge_url
            .or_else(|| profile.and_then(|p| p.bridge_url.clone()))
            .filter(|url| !url.trim().is_empty());

        AppConfig {
            profile_exists: profile.is_some(),
            profile_path: profile_path
                .to_str()
                .map(|p| p.to_string())
                .unwrap_or(defaults.profile_path),
            db_path,
            job,
            grade,
            bridge_url,
            bridge_timeout_ms: profile
                .map(|p| p.bridge_timeout_ms)
                .unwrap_or(defaults.bridge_timeout_ms),
        }
    }

    /// The identity report operations run under.
    pub fn actor(&self) -> Actor {
        Actor::new(self.job.clone(), self.grade)
    }
}

fn build_db_path(profile_path: &Path) -> Option<String> {
    profile_path
        .parent()
        .map(|p| p.join(Path::new(DEFAULT_DB_FILENAME)))
        .map(|p| p.to_string_lossy().into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(job: Option<&str>, grade: Option<u8>) -> ConfigArgs {
        ConfigArgs {
            profile_path: None,
            job: job.map(str::to_string),
            grade,
            bridge_url: None,
        }
    }

    fn profile(job: Option<&str>, grade: Option<u8>) -> Profile {
        Profile {
            db_path: None,
            job: job.map(str::to_string),
            grade,
            bridge_url: Some("http://localhost:3030".to_string()),
            bridge_timeout_ms: 250,
        }
    }

    #[test]
    fn flags_override_profile() {
        let config = AppConfig::from_args(
            args(Some("DOJ"), Some(5)),
            Path::new("/tmp/profiles/p.toml"),
            Some(&profile(Some("lspd"), Some(2))),
        );
        assert_eq!(config.job, "doj");
        assert_eq!(config.grade, 5);
        assert_eq!(config.bridge_url.as_deref(), Some("http://localhost:3030"));
        assert_eq!(config.bridge_timeout_ms, 250);
    }

    #[test]
    fn profile_overrides_defaults() {
        let config = AppConfig::from_args(
            args(None, None),
            Path::new("/tmp/profiles/p.toml"),
            Some(&profile(Some("lsfd"), Some(3))),
        );
        assert_eq!(config.job, "lsfd");
        assert_eq!(config.grade, 3);
    }

    #[test]
    fn defaults_apply_without_profile() {
        let config = AppConfig::from_args(args(None, None), Path::new("/tmp/profiles/p.toml"), None);
        assert_eq!(config.job, DEFAULT_JOB);
        assert_eq!(config.grade, DEFAULT_GRADE);
        assert!(config.bridge_url.is_none());
        assert!(!config.profile_exists);
        // The cache lands next to the profile when the profile does not say otherwise.
        assert!(config.db_path.ends_with(DEFAULT_DB_FILENAME));
    }
}
