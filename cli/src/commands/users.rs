use mdt_core::Directory;

use crate::{args::UsersCommand, formatters::UserFormatter};

pub fn users_cmd(subcommand: UsersCommand) -> Result<(), anyhow::Error> {
    let directory = Directory::bundled();

    match subcommand {
        UsersCommand::List(args) => {
            let users = match args.job.as_deref() {
                Some(job) => directory.by_job(job),
                None => directory.all().iter().collect(),
            };

            let mut formatter = UserFormatter::new(args.output);
            formatter
                .print_users(&users)
                .map_err(|e| anyhow::anyhow!("Error while formatting users: {}", e))?;
        }
        UsersCommand::Search(args) => {
            let users = directory.search(&args.query);

            let mut formatter = UserFormatter::new(args.output);
            formatter
                .print_users(&users)
                .map_err(|e| anyhow::anyhow!("Error while formatting users: {}", e))?;
        }
    }

    Ok(())
}
