use std::io::{self, Read, Write};

use anyhow::Context;
use mdt_core::models::{DEFAULT_TITLE, DESCRIPTION_TEMPLATE};
use mdt_core::Report;
use serde::{Deserialize, Serialize};

/// Editable fields of a report: TOML frontmatter above the `+++` divider,
/// description below it.
#[derive(Debug, Default, Deserialize, Serialize)]
pub struct ReportTemplate {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default, rename = "type")]
    pub report_type: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(skip)]
    pub description: String,
}

/// Buffer handed to a fresh report.
pub fn create_template() -> String {
    format!("title = \"{DEFAULT_TITLE}\"\n#type = \"\"\ntags = []\n+++\n{DESCRIPTION_TEMPLATE}")
}

/// Buffer pre-filled with an existing report, for editing.
pub fn edit_template(report: &Report) -> anyhow::Result<String> {
    let frontmatter = ReportTemplate {
        title: Some(report.title.clone()),
        report_type: Some(report.report_type.clone()),
        tags: report.tags.clone(),
        description: String::new(),
    };
    let toml = toml::to_string(&frontmatter).context("Failed to serialize report header")?;
    Ok(format!("{}+++\n{}", toml, report.description))
}

pub struct Editor {
    template: String,
}

impl Editor {
    pub fn new(template: &str) -> Self {
        Editor {
            template: template.to_string(),
        }
    }

    /// Format error message as safe TOML comments
    fn format_error_header(error: &anyhow::Error, content: &str) -> String {
        // Each line of the error message gets prefixed with "# " to make it a TOML comment
        let error_lines = format!("{}", error)
            .lines()
            .map(|line| format!("# {}", line))
            .collect::<Vec<_>>()
            .join("\n");

        format!(
            "# ===== PARSING ERROR =====\n{}\n# ===== Fix the issue below and save again =====\n\n{}",
            error_lines, content
        )
    }

    fn read_from_file(&self, tempfile: tempfile::NamedTempFile) -> anyhow::Result<String> {
        // Read VISUAL or EDITOR environment variable
        let editor = std::env::var("VISUAL")
            .unwrap_or_else(|_| std::env::var("EDITOR").unwrap_or_else(|_| "vi".to_string()));

        let mut child = std::process::Command::new(editor)
            .arg(tempfile.path())
            .spawn()
            .context("Failed to open editor")?;

        let status = child.wait().context("Failed to wait for editor")?;

        if !status.success() {
            return Err(anyhow::anyhow!("Editor returned non-zero exit code"));
        }

        // Read content of the tempfile
        let mut content = String::new();
        let mut file = std::fs::File::open(tempfile.path())
            .context("Failed to open temporary file".to_string())?;
        file.read_to_string(&mut content)
            .context("Failed to read temporary file".to_string())?;

        Ok(content)
    }

    fn edit_buffer(&self, content: &str) -> anyhow::Result<String> {
        let mut tempfile =
            tempfile::NamedTempFile::new().context("Failed to create temporary file")?;

        std::io::Write::write_all(&mut tempfile, content.as_bytes())
            .context("Failed to write initial content")?;

        self.read_from_file(tempfile)
    }

    /// Open the buffer in the external editor, with recovery when the saved
    /// frontmatter does not parse.
    pub fn open(&self) -> anyhow::Result<ReportTemplate> {
        print!("\x1B[?1049h");
        io::stdout().flush()?;

        let mut current_content = self.template.to_string();

        loop {
            let edited_content = self.edit_buffer(&current_content)?;

            match edited_content.parse_template() {
                Ok(parsed) => {
                    // Success! Restore terminal and return
                    print!("\x1B[?1049l\x1B[H\x1B[2J");
                    io::stdout().flush()?;
                    return Ok(parsed);
                }
                Err(e) => {
                    // Restore terminal for prompt
                    print!("\x1B[?1049l\x1B[H\x1B[2J");
                    io::stdout().flush()?;

                    // Show error and prompt user
                    println!("Error parsing report: {}\n", e);
                    println!("Your changes have been preserved in the editor.");
                    println!("Do you want to:");
                    println!("  [R]etry (re-open editor with your changes)");
                    println!("  [S]ave anyway (ignore frontmatter, keep the text as description)");
                    println!("  [A]bort (discard changes)");
                    print!("Choice (R/s/a): ");
                    io::stdout().flush()?;

                    let mut input = String::new();
                    io::stdin().read_line(&mut input)?;
                    let choice = input.trim().to_lowercase();

                    match choice.as_str() {
                        "" | "r" => {
                            // Retry - prepend error message and re-open
                            current_content = Self::format_error_header(&e, &edited_content);
                            print!("\x1B[?1049h");
                            io::stdout().flush()?;
                            continue;
                        }
                        "s" => {
                            // Save anyway - everything becomes the description
                            print!("\x1B[?1049l\x1B[H\x1B[2J");
                            io::stdout().flush()?;
                            return Ok(ReportTemplate {
                                description: edited_content,
                                ..ReportTemplate::default()
                            });
                        }
                        "a" => {
                            return Err(anyhow::anyhow!("User aborted report edit"));
                        }
                        _ => {
                            println!("\nInvalid choice. Please enter R, S, or A.");
                            current_content = Self::format_error_header(&e, &edited_content);
                            print!("\x1B[?1049h");
                            io::stdout().flush()?;
                            continue;
                        }
                    }
                }
            }
        }
    }
}

pub trait ParseTemplate {
    fn parse_template(&self) -> anyhow::Result<ReportTemplate>;
}

impl ParseTemplate for String {
    fn parse_template(&self) -> anyhow::Result<ReportTemplate> {
        // Split on lines to find the +++ delimiter (must be on its own line)
        let lines: Vec<&str> = self.lines().collect();

        let delimiter_pos = lines.iter().position(|line| line.trim() == "+++");

        let (toml_lines, body_lines) = match delimiter_pos {
            Some(pos) => (&lines[..pos], &lines[pos + 1..]),
            None => {
                // No delimiter found - treat entire input as frontmatter
                (lines.as_slice(), &[] as &[&str])
            }
        };

        let toml_string = toml_lines.join("\n");
        let mut parsed: ReportTemplate = toml::from_str(&toml_string)?;

        // Join body lines back together, preserving original line breaks
        if !body_lines.is_empty() {
            parsed.description = body_lines.join("\n");
        }

        Ok(parsed)
    }
}
