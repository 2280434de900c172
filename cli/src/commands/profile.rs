use crate::{
    args::ProfileCommand,
    profile::{self, Profile},
};

pub fn profile_cmd(subcommand: Option<ProfileCommand>) -> Result<(), anyhow::Error> {
    match subcommand.unwrap_or(ProfileCommand::Current) {
        ProfileCommand::Use { name } => {
            let config_path = profile::get_profile_config_path(&name);

            if !config_path.exists() {
                if let Some(parent) = config_path.parent() {
                    std::fs::create_dir_all(parent)?;
                }

                // Point the cache at the data dir so `list` shows where it
                // actually lives.
                let db_path = profile::get_profile_db_path(&name);
                if let Some(parent) = db_path.parent() {
                    std::fs::create_dir_all(parent)?;
                }

                Profile {
                    db_path: Some(db_path.to_string_lossy().into_owned()),
                    ..Profile::default()
                }
                .save(&config_path)?;

                println!("Created new profile: {}", name);
            }

            profile::set_current_profile_name(&name)?;
            println!("Switched to profile: {}", name);
        }
        ProfileCommand::List => {
            let current =
                profile::get_current_profile_name().unwrap_or_else(|_| "default".to_string());

            println!("Available profiles:");
            for name in profile::list_profiles()? {
                let marker = if name == current { "*" } else { " " };
                let stored = Profile::from_path(&profile::get_profile_config_path(&name))?;
                let identity = stored
                    .as_ref()
                    .and_then(|p| p.job.as_ref())
                    .map(|job| {
                        let grade = stored
                            .as_ref()
                            .and_then(|p| p.grade)
                            .unwrap_or(crate::app_config::DEFAULT_GRADE);
                        format!(" [{} grade {}]", job, grade)
                    })
                    .unwrap_or_default();
                let db_path = stored
                    .as_ref()
                    .and_then(|p| p.db_path.clone())
                    .unwrap_or_else(|| {
                        profile::get_profile_db_path(&name).display().to_string()
                    });
                println!("{} {}{} ({})", marker, name, identity, db_path);
            }
        }
        ProfileCommand::Current => {
            let current = profile::get_current_profile_name()?;
            let db_path = profile::get_profile_db_path(&current);
            println!("Current profile: {} ({})", current, db_path.display());
        }
    }

    Ok(())
}
