use std::io::{self, Write};

use chrono::{LocalResult, TimeZone, Utc};
use mdt_core::{Report, User};
use termcolor::{Color, ColorChoice, ColorSpec, StandardStream, WriteColor};

use crate::args::OutputFormat;

/// Renders an epoch-millisecond timestamp the way the terminal displays it,
/// e.g. "12 January 2025 at 14:30". Zero and invalid values have no date.
pub fn format_timestamp(ms: i64) -> String {
    if ms <= 0 {
        return "Unknown date".to_string();
    }
    match Utc.timestamp_millis_opt(ms) {
        LocalResult::Single(date) => date.format("%-d %B %Y at %H:%M").to_string(),
        _ => "Unknown date".to_string(),
    }
}

pub struct ReportFormatter {
    output: OutputFormat,
    searched: bool,
}

impl ReportFormatter {
    pub fn new(output: OutputFormat) -> Self {
        ReportFormatter {
            output,
            searched: false,
        }
    }

    /// Marks that the listing came from a search, which only changes the
    /// empty-state wording.
    pub fn searched(mut self, searched: bool) -> Self {
        self.searched = searched;
        self
    }

    pub fn print_reports(&mut self, reports: &[Report]) -> io::Result<()> {
        match self.output {
            OutputFormat::Json => print_json(reports),
            OutputFormat::Plain => {
                for report in reports {
                    println!("{}\t{}\t{}", report.id, report.job, report.title);
                }
                Ok(())
            }
            OutputFormat::Pretty => self.print_pretty_list(reports),
        }
    }

    fn print_pretty_list(&mut self, reports: &[Report]) -> io::Result<()> {
        if reports.is_empty() {
            if self.searched {
                println!("No reports found for this search");
            } else {
                println!("No reports available");
            }
            return Ok(());
        }

        let mut stdout = StandardStream::stdout(ColorChoice::Auto);
        for report in reports {
            stdout.set_color(ColorSpec::new().set_bold(true))?;
            writeln!(stdout, "{}", report.title)?;
            stdout.set_color(ColorSpec::new().set_dimmed(true))?;
            writeln!(
                stdout,
                "{} - Report ID: {}    {}",
                report.job.to_uppercase(),
                report.id,
                format_timestamp(report.timestamp)
            )?;
            stdout.reset()?;
            if !report.tags.is_empty() {
                stdout.set_color(ColorSpec::new().set_fg(Some(Color::Cyan)))?;
                let tags: Vec<String> = report.tags.iter().map(|t| format!("#{}", t)).collect();
                writeln!(stdout, "{}", tags.join(" "))?;
                stdout.reset()?;
            }
            writeln!(stdout)?;
        }
        Ok(())
    }

    pub fn print_report(&mut self, report: &Report) -> io::Result<()> {
        match self.output {
            OutputFormat::Json => print_json(report),
            OutputFormat::Plain => {
                println!("{}\t{}\t{}", report.id, report.job, report.title);
                Ok(())
            }
            OutputFormat::Pretty => print_pretty_report(report),
        }
    }
}

fn print_pretty_report(report: &Report) -> io::Result<()> {
    let mut stdout = StandardStream::stdout(ColorChoice::Auto);

    stdout.set_color(ColorSpec::new().set_bold(true))?;
    writeln!(stdout, "{}", report.title)?;
    stdout.set_color(ColorSpec::new().set_dimmed(true))?;
    writeln!(
        stdout,
        "{} - Report ID: {}    {}",
        report.job.to_uppercase(),
        report.id,
        format_timestamp(report.timestamp)
    )?;
    stdout.reset()?;

    writeln!(stdout, "Type: {}", report.report_type)?;
    if !report.tags.is_empty() {
        let tags: Vec<String> = report.tags.iter().map(|t| format!("#{}", t)).collect();
        writeln!(stdout, "Tags: {}", tags.join(" "))?;
    }

    writeln!(stdout)?;
    writeln!(stdout, "{}", report.description)?;

    print_section(&mut stdout, "Officers involved", &report.officers_involved)?;
    print_section(&mut stdout, "Civilians involved", &report.civilians_involved)?;
    print_section(&mut stdout, "Criminals involved", &report.criminals_involved)?;
    print_section(&mut stdout, "Vehicles involved", &report.vehicles_involved)?;
    print_section(&mut stdout, "Gallery", &report.gallery)?;

    Ok(())
}

fn print_section(stdout: &mut StandardStream, label: &str, items: &[String]) -> io::Result<()> {
    if items.is_empty() {
        return Ok(());
    }
    writeln!(stdout)?;
    stdout.set_color(ColorSpec::new().set_bold(true))?;
    writeln!(stdout, "{}:", label)?;
    stdout.reset()?;
    for item in items {
        writeln!(stdout, "  - {}", item)?;
    }
    Ok(())
}

pub struct UserFormatter {
    output: OutputFormat,
}

impl UserFormatter {
    pub fn new(output: OutputFormat) -> Self {
        UserFormatter { output }
    }

    pub fn print_users(&mut self, users: &[&User]) -> io::Result<()> {
        match self.output {
            OutputFormat::Json => print_json(users),
            OutputFormat::Plain => {
                for user in users {
                    println!("{}\t{}\t{}\t{}", user.id, user.job, user.grade, user.officer_label());
                }
                Ok(())
            }
            OutputFormat::Pretty => {
                if users.is_empty() {
                    println!("No users found");
                    return Ok(());
                }
                let mut stdout = StandardStream::stdout(ColorChoice::Auto);
                for user in users {
                    stdout.set_color(ColorSpec::new().set_bold(true))?;
                    write!(stdout, "{}", user.officer_label())?;
                    stdout.reset()?;
                    writeln!(
                        stdout,
                        "  {} grade {}  ({})",
                        user.job.to_uppercase(),
                        user.grade,
                        user.username
                    )?;
                }
                Ok(())
            }
        }
    }
}

fn print_json<T: serde::Serialize>(value: T) -> io::Result<()> {
    let json = serde_json::to_string_pretty(&value)
        .map_err(|e| io::Error::new(io::ErrorKind::Other, e))?;
    println!("{}", json);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn timestamps_render_in_terminal_style() {
        // 2025-01-12 14:30:00 UTC
        assert_eq!(format_timestamp(1_736_692_200_000), "12 January 2025 at 14:30");
    }

    #[test]
    fn missing_timestamps_have_no_date() {
        assert_eq!(format_timestamp(0), "Unknown date");
        assert_eq!(format_timestamp(-5), "Unknown date");
    }
}
