use crate::{app_config::AppConfig, commands::report::open_repository};

/// Pulls the host-persisted reports into the local working set. When the host
/// cannot be reached the working set is left untouched.
pub fn sync_cmd(config: &AppConfig) -> Result<(), anyhow::Error> {
    let mut repo = open_repository(config)?;

    match repo.refresh()? {
        Some(count) => println!("Loaded {} reports from the host", count),
        None => println!("Host unreachable, keeping the local working set"),
    }

    Ok(())
}
