//! Clap derive structures for the `airwright` CLI.
//!
//! Kept free of workspace crates so `build.rs` can include it for man pages.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

// ── Top-Level CLI ────────────────────────────────────────────────────

/// airwright -- declarative Airbyte pipelines
#[derive(Debug, Parser)]
#[command(
    name = "airwright",
    version,
    about = "Reconcile declarative Airbyte pipelines against a running server",
    long_about = "Reads source, destination and connection documents and makes the\n\
        remote Airbyte server match them. Entities are matched by name, so\n\
        running `apply` repeatedly updates rather than duplicates.",
    propagate_version = true,
    subcommand_required = true,
    arg_required_else_help = true
)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalOpts,

    #[command(subcommand)]
    pub command: Command,
}

// ── Global Options ───────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct GlobalOpts {
    /// Server profile to use
    #[arg(long, short = 'p', env = "AIRWRIGHT_PROFILE", global = true)]
    pub profile: Option<String>,

    /// Server root URL (overrides profile)
    #[arg(long, short = 'u', env = "AIRBYTE_URL", global = true)]
    pub url: Option<String>,

    /// Basic-auth username (overrides profile)
    #[arg(long, env = "AIRBYTE_USERNAME", global = true)]
    pub username: Option<String>,

    /// Basic-auth password (overrides profile and keyring)
    #[arg(long, env = "AIRBYTE_PASSWORD", global = true, hide_env_values = true)]
    pub password: Option<String>,

    /// Output format [default: from config, else json]
    #[arg(long, short = 'o', env = "AIRWRIGHT_OUTPUT", global = true)]
    pub output: Option<OutputFormat>,

    /// When to use color output
    #[arg(long, default_value = "auto", global = true)]
    pub color: ColorMode,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(long, short = 'v', action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress non-error output
    #[arg(long, short = 'q', global = true)]
    pub quiet: bool,

    /// Log line format on stderr
    #[arg(long, env = "AIRWRIGHT_LOG_FORMAT", default_value = "text", global = true)]
    pub log_format: LogFormat,

    /// Request timeout in seconds (overrides profile)
    #[arg(long, env = "AIRWRIGHT_TIMEOUT", global = true)]
    pub timeout: Option<u64>,
}

// ── Output, Color & Log Enums ────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Pretty-printed JSON (default)
    Json,
    /// Compact single-line JSON
    JsonCompact,
    /// YAML
    Yaml,
    /// Pretty table
    Table,
    /// Plain text, one value per line (scripting)
    Plain,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ColorMode {
    /// Auto-detect (color if terminal is interactive)
    Auto,
    /// Always emit color codes
    Always,
    /// Never emit color codes
    Never,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogFormat {
    /// Human-readable lines
    Text,
    /// One JSON object per event
    Json,
}

// ── Top-Level Command Enum ───────────────────────────────────────────

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Make the server match the pipeline documents
    Apply(PipelineArgs),

    /// Show what `apply` would create or update, without writing
    Plan(PipelineArgs),

    /// Discover the streams of an existing source
    Discover(DiscoverArgs),

    /// List remote entities
    #[command(alias = "ls")]
    List(ListArgs),

    /// Show the workspace that would be reconciled into
    #[command(alias = "ws")]
    Workspace,

    /// Manage CLI configuration and profiles
    Config(ConfigArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  Pipeline
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// Locations of the three pipeline documents (.json, .yaml, .yml, .toml).
#[derive(Debug, Args)]
pub struct PipelineArgs {
    /// Source document
    #[arg(long, default_value = "resources/sources/s3_to_bigquery.json")]
    pub source: PathBuf,

    /// Destination document
    #[arg(long, default_value = "resources/destinations/bigquery.json")]
    pub destination: PathBuf,

    /// Connection document
    #[arg(long, default_value = "resources/connections/s3_to_bigquery.yaml")]
    pub connection: PathBuf,
}

#[derive(Debug, Args)]
pub struct DiscoverArgs {
    /// Name of an existing source in the workspace
    pub source: String,
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  List
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct ListArgs {
    /// What to list
    #[arg(value_enum)]
    pub resource: ListResource,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ListResource {
    Sources,
    Destinations,
    Connections,
    SourceDefinitions,
    DestinationDefinitions,
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  Config
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Show the resolved configuration (secrets redacted)
    Show,

    /// Print the config file location
    Path,

    /// Set a profile value (url, username, password-env, timeout, file-var.<NAME>)
    Set {
        /// Key to set
        key: String,
        /// Value
        value: String,
    },

    /// List configured profiles
    Profiles,

    /// Set the default profile
    Use {
        /// Profile name
        name: String,
    },

    /// Store a profile's password in the system keyring
    SetPassword {
        /// Profile to store the password for (defaults to the active one)
        #[arg(long)]
        profile: Option<String>,
    },
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  Completions
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    #[arg(value_enum)]
    pub shell: clap_complete::Shell,
}
