use std::path::Path;

use crate::{app_config::AppConfig, profile::Profile};

/// Writes a profile file carrying the effective configuration, so later runs
/// pick it up without flags.
pub fn init_cmd(config: &AppConfig, profile_path: &Path) -> Result<(), anyhow::Error> {
    if profile_path.exists() {
        println!("Profile already exists: {}", profile_path.display());
        return Ok(());
    }

    if let Some(parent) = profile_path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    let profile = Profile {
        db_path: Some(config.db_path.clone()),
        job: Some(config.job.clone()),
        grade: Some(config.grade),
        bridge_url: config.bridge_url.clone(),
        bridge_timeout_ms: config.bridge_timeout_ms,
    };
    profile.save(profile_path)?;

    println!("Created profile: {}", profile_path.display());

    Ok(())
}
