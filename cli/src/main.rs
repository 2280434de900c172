#![deny(clippy::expect_used, clippy::unwrap_used, clippy::panic)]
#![warn(clippy::expect_used)]

use crate::app_config::AppConfig;
use args::{CliArgs, Command};
use clap::Parser;
use commands::{
    close::close_cmd, config::config_cmd, init::init_cmd, profile::profile_cmd,
    report::report_cmd, services::services_cmd, sync::sync_cmd, users::users_cmd,
};
use profile::{get_profile_path, Profile};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod app_config;
mod args;
mod commands;
mod editor;
mod formatters;
mod net;
mod profile;

#[cfg(test)]
mod test;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    setup_tracing();

    let args = CliArgs::parse();

    let profile_path = get_profile_path(&args.config.profile_path);

    if let Some(command) = args.command {
        let profile = Profile::from_path(&profile_path)?;
        let config = AppConfig::from_args(args.config, &profile_path, profile.as_ref());

        match command {
            Command::Config => config_cmd(config)?,
            Command::Init => init_cmd(&config, &profile_path)?,
            Command::Profile { command } => profile_cmd(command)?,
            Command::Report(subcommand) => report_cmd(&config, subcommand)?,
            Command::Users(subcommand) => users_cmd(subcommand)?,
            Command::Services => services_cmd(&config)?,
            Command::Sync => sync_cmd(&config)?,
            Command::Close => close_cmd(&config)?,
        }
    }

    Ok(())
}

/// Diagnostics go to stderr so they never mix with command output. Silent
/// unless RUST_LOG opts in.
fn setup_tracing() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn".into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .without_time(),
        )
        .init();
}
