use clap::{Args, Parser, Subcommand, ValueEnum};
use serde::{Deserialize, Serialize};

#[derive(Parser, Debug)]
#[command(
    name = "mdt",
    version,
    about,
    long_about = "Terminal client for the department report system"
)]
pub struct CliArgs {
    #[clap(subcommand)]
    pub command: Option<Command>,

    #[command(flatten)]
    pub config: ConfigArgs,
}

#[derive(Debug, Args, Serialize)]
pub struct ConfigArgs {
    /// Profile to use (a name under the config directory)
    #[arg(long, short, env = "MDT_PROFILE")]
    pub profile_path: Option<String>,

    /// Acting service key, overrides the profile
    #[arg(long, env = "MDT_JOB")]
    pub job: Option<String>,

    /// Acting grade, overrides the profile
    #[arg(long, env = "MDT_GRADE")]
    pub grade: Option<u8>,

    /// Base URL of the host bridge, overrides the profile
    #[arg(long, env = "MDT_BRIDGE_URL")]
    pub bridge_url: Option<String>,
}

#[derive(Debug, Subcommand, Serialize, PartialEq)]
pub enum Command {
    /// Prints out current configuration
    Config,
    /// Initializes a new profile
    Init,
    /// Profile subcommands
    Profile {
        #[clap(subcommand)]
        command: Option<ProfileCommand>,
    },
    /// Report subcommands
    #[clap(subcommand)]
    Report(ReportCommand),
    /// Directory subcommands
    #[clap(subcommand)]
    Users(UsersCommand),
    /// Lists the wired services and their terminal capabilities
    Services,
    /// Pulls the host-persisted reports into the local cache
    Sync,
    /// Asks the host to close the terminal overlay
    Close,
}

#[derive(Debug, Subcommand, Serialize, PartialEq, Clone)]
pub enum ProfileCommand {
    /// Switch to a profile, creating it if needed
    Use { name: String },
    /// List available profiles
    List,
    /// Show the current profile
    Current,
}

#[derive(Debug, Subcommand, Serialize, PartialEq)]
pub enum ReportCommand {
    /// Lists reports visible to the acting service.
    List(ReportListArgs),
    /// Shows a single report.
    Show(ReportShowArgs),
    /// Creates a new report.
    Create(ReportFieldArgs),
    /// Edits an existing report.
    Edit(ReportEditArgs),
    /// Deletes a report (soft delete).
    Delete(ReportDeleteArgs),
    /// Lists the tags suggested for the acting service.
    Tags,
}

#[derive(Debug, Clone, ValueEnum, PartialEq, Serialize, Deserialize)]
pub enum OutputFormat {
    Pretty,
    Plain,
    Json,
}

impl Default for OutputFormat {
    fn default() -> Self {
        Self::Pretty
    }
}

#[derive(Debug, clap::Args, PartialEq, Serialize, Deserialize)]
#[command(about = "Search and list reports")]
pub struct ReportListArgs {
    /// Title search term
    #[arg(default_value = None)]
    pub term: Option<String>,

    /// Output format (pretty, plain, or json)
    #[arg(long, value_enum, default_value_t = OutputFormat::Pretty)]
    pub output: OutputFormat,
}

impl Default for ReportListArgs {
    fn default() -> Self {
        Self {
            term: None,
            output: OutputFormat::Pretty,
        }
    }
}

#[derive(Debug, clap::Args, PartialEq, Serialize, Deserialize)]
pub struct ReportShowArgs {
    /// Report ID
    #[arg(value_name = "ID")]
    pub id: i64,

    /// Output format (pretty, plain, or json)
    #[arg(long, value_enum, default_value_t = OutputFormat::Pretty)]
    pub output: OutputFormat,
}

#[derive(Debug, Args, Serialize, PartialEq, Default)]
pub struct ReportFieldArgs {
    /// Report title
    #[arg(long, short)]
    pub title: Option<String>,

    /// Report body
    #[arg(long, short)]
    pub description: Option<String>,

    /// Report type label (defaults to the first tag)
    #[arg(long = "type", value_name = "TYPE")]
    pub report_type: Option<String>,

    /// Tags (can be specified multiple times or comma-separated)
    #[arg(long, value_name = "TAGS", value_delimiter = ',')]
    pub tag: Vec<String>,

    /// Evidence image URL
    #[arg(long, value_name = "URL")]
    pub image: Vec<String>,

    /// Involved vehicle
    #[arg(long, value_name = "PLATE")]
    pub vehicle: Vec<String>,

    /// Involved officer (directory id, username, or free text)
    #[arg(long, value_name = "OFFICER")]
    pub officer: Vec<String>,

    /// Involved civilian
    #[arg(long, value_name = "NAME")]
    pub civilian: Vec<String>,

    /// Involved suspect
    #[arg(long, value_name = "NAME")]
    pub suspect: Vec<String>,

    /// Open the report in an external editor
    #[arg(long, short, default_value_t = false)]
    pub edit: bool,
}

#[derive(Debug, Args, Serialize, PartialEq)]
pub struct ReportEditArgs {
    /// Report ID to edit
    #[arg(value_name = "ID")]
    pub id: i64,

    #[command(flatten)]
    pub fields: ReportFieldArgs,
}

#[derive(Debug, Args, Serialize, PartialEq)]
pub struct ReportDeleteArgs {
    /// Report ID(s) to delete
    #[arg(value_name = "ID", required = true)]
    pub ids: Vec<i64>,

    /// Skip confirmation prompt
    #[arg(long, short = 'y')]
    pub yes: bool,
}

#[derive(Debug, Subcommand, Serialize, PartialEq)]
pub enum UsersCommand {
    /// Lists directory entries.
    List(UsersListArgs),
    /// Searches the directory by name, badge, or username.
    Search(UsersSearchArgs),
}

#[derive(Debug, Args, Serialize, PartialEq, Default)]
pub struct UsersListArgs {
    /// Restrict to one service
    #[arg(long)]
    pub job: Option<String>,

    /// Output format (pretty, plain, or json)
    #[arg(long, value_enum, default_value_t = OutputFormat::Pretty)]
    pub output: OutputFormat,
}

#[derive(Debug, Args, Serialize, PartialEq)]
pub struct UsersSearchArgs {
    /// Search query
    pub query: String,

    /// Output format (pretty, plain, or json)
    #[arg(long, value_enum, default_value_t = OutputFormat::Pretty)]
    pub output: OutputFormat,
}
