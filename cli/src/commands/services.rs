use mdt_core::{Feature, ServiceKey};

use crate::app_config::AppConfig;

/// Lists every wired service with the terminal capabilities it exposes.
/// The acting service from the profile is marked with an asterisk.
pub fn services_cmd(config: &AppConfig) -> Result<(), anyhow::Error> {
    for service in ServiceKey::ALL {
        let marker = if service.as_str() == config.job {
            "*"
        } else {
            " "
        };

        let mut features = Vec::new();
        if service.has_feature(Feature::Reports) {
            features.push("reports");
        }
        if service.has_feature(Feature::Warrants) {
            features.push("warrants");
        }
        if service.has_feature(Feature::Penalties) {
            features.push("penalties");
        }

        println!(
            "{} {:<7} {} ({})",
            marker,
            service.as_str(),
            service.display_name(),
            features.join(", ")
        );
    }

    Ok(())
}
