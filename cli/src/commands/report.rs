use std::io::{BufRead, Write};
use std::path::Path;

use mdt_core::{Directory, Report, ReportDraft, ReportRepository, ServiceKey};

use crate::{
    app_config::AppConfig,
    args::{ReportCommand, ReportFieldArgs},
    editor::{self, Editor},
    formatters::ReportFormatter,
    net,
};

pub fn report_cmd(config: &AppConfig, subcommand: ReportCommand) -> Result<(), anyhow::Error> {
    let mut repo = open_repository(config)?;
    let actor = config.actor();

    match subcommand {
        ReportCommand::List(args) => {
            let reports = repo.list_visible(&actor.job, args.term.as_deref().unwrap_or(""))?;

            let mut formatter = ReportFormatter::new(args.output).searched(args.term.is_some());
            formatter
                .print_reports(&reports)
                .map_err(|e| anyhow::anyhow!("Error while formatting reports: {}", e))?;
        }
        ReportCommand::Show(args) => match repo.get(&actor.job, args.id)? {
            Some(report) => {
                let mut formatter = ReportFormatter::new(args.output);
                formatter
                    .print_report(&report)
                    .map_err(|e| anyhow::anyhow!("Error while formatting reports: {}", e))?;
            }
            None => anyhow::bail!("Report {} not found", args.id),
        },
        ReportCommand::Create(args) => {
            let draft = build_draft(&config.job, None, args)?;
            let report = repo.save(&actor, draft)?;

            println!("Report saved successfully ({})", report.id);
        }
        ReportCommand::Edit(args) => {
            let existing = repo
                .get(&actor.job, args.id)?
                .ok_or_else(|| anyhow::anyhow!("Report {} not found", args.id))?;

            let draft = build_draft(&config.job, Some(&existing), args.fields)?;
            let report = repo.save(&actor, draft)?;

            println!("Report saved successfully ({})", report.id);
        }
        ReportCommand::Delete(args) => {
            for id in args.ids {
                if !args.yes && !confirm_delete(id)? {
                    println!("Skipped report {}", id);
                    continue;
                }

                repo.delete(&actor, id)?;
                println!("Report {} deleted", id);
            }
        }
        ReportCommand::Tags => {
            let service: ServiceKey = config.job.parse()?;
            for tag in service.suggested_tags() {
                println!("{}", tag);
            }
        }
    };

    Ok(())
}

pub fn open_repository(config: &AppConfig) -> Result<ReportRepository, anyhow::Error> {
    let db_path = Path::new(&config.db_path);
    if let Some(parent) = db_path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    let bridge = net::bridge_for(config);
    let repo = ReportRepository::open(db_path, bridge)?;

    Ok(repo)
}

/// Turns field flags (and, with `--edit`, the external editor) into a draft.
///
/// The editor owns title, type, tags and description when it runs; list
/// fields always come from flags. Flags left out keep the existing values on
/// an edit and fall back to the service defaults on a create.
fn build_draft(
    job: &str,
    existing: Option<&Report>,
    args: ReportFieldArgs,
) -> Result<ReportDraft, anyhow::Error> {
    let mut draft = match existing {
        Some(report) => ReportDraft::from_report(report),
        None => ReportDraft::new(job),
    };

    if args.edit {
        let template = match existing {
            Some(report) => editor::edit_template(report)?,
            None => editor::create_template(),
        };

        let editor = Editor::new(&template);
        let result = editor.open()?;

        if let Some(title) = result.title {
            draft.title = Some(title);
        }
        if let Some(report_type) = result.report_type {
            draft.report_type = Some(report_type);
        }
        if !result.tags.is_empty() {
            draft.tags = result.tags;
        }
        draft.description = Some(result.description);
    } else {
        if let Some(title) = args.title {
            draft.title = Some(title);
        }
        if let Some(description) = args.description {
            draft.description = Some(description);
        }
        if let Some(report_type) = args.report_type {
            draft.report_type = Some(report_type);
        }
        if !args.tag.is_empty() {
            draft.tags = args.tag;
        }
    }

    if !args.image.is_empty() {
        draft.gallery = args.image;
    }
    if !args.vehicle.is_empty() {
        draft.vehicles_involved = args.vehicle;
    }
    if !args.officer.is_empty() {
        let directory = Directory::bundled();
        draft.officers_involved = args
            .officer
            .iter()
            .map(|reference| resolve_officer(&directory, reference))
            .collect();
    }
    if !args.civilian.is_empty() {
        draft.civilians_involved = args.civilian;
    }
    if !args.suspect.is_empty() {
        draft.criminals_involved = args.suspect;
    }

    Ok(draft)
}

/// Resolves a directory id or username to the canonical "Name (badge)" label.
/// Anything the directory does not know passes through as free text.
fn resolve_officer(directory: &Directory, reference: &str) -> String {
    if let Some(user) = directory
        .by_id(reference)
        .or_else(|| directory.by_username(reference))
    {
        return user.officer_label();
    }

    let matches = directory.search(reference);
    if let [user] = matches.as_slice() {
        return user.officer_label();
    }

    reference.to_string()
}

fn confirm_delete(id: i64) -> Result<bool, anyhow::Error> {
    print!("Delete report {}? [y/N] ", id);
    std::io::stdout().flush()?;

    let mut line = String::new();
    std::io::stdin().lock().read_line(&mut line)?;

    Ok(matches!(line.trim().to_lowercase().as_str(), "y" | "yes"))
}
