//! Clap derive structures for the `astrodash` CLI.
//!
//! Defines the command tree, global flags, and shared types.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

// ── Top-Level CLI ────────────────────────────────────────────────────

/// astrodash -- NASA's picture of the day and Mars rover photos in your terminal
#[derive(Debug, Parser)]
#[command(
    name = "astrodash",
    version,
    about = "Browse NASA's Astronomy Picture of the Day and Mars rover photos",
    long_about = "Command-line client for the astrodash NASA proxy.\n\n\
        Fetches the Astronomy Picture of the Day, the latest photos of the\n\
        Mars rovers, and their mission manifests.",
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
    /// Config file (defaults to the platform config directory)
    #[arg(long, env = "ASTRODASH_CONFIG", global = true)]
    pub config: Option<PathBuf>,

    /// Proxy base URL (overrides the config file)
    #[arg(long, short = 'u', env = "ASTRODASH_PROXY_URL", global = true)]
    pub proxy_url: Option<String>,

    /// Request timeout in seconds (overrides the config file)
    #[arg(long, env = "ASTRODASH_TIMEOUT", global = true)]
    pub timeout: Option<u64>,

    /// Output format
    #[arg(
        long,
        short = 'o',
        env = "ASTRODASH_OUTPUT",
        default_value = "table",
        global = true
    )]
    pub output: OutputFormat,

    /// When to use color output
    #[arg(long, default_value = "auto", global = true)]
    pub color: ColorMode,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(long, short = 'v', action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress non-error output
    #[arg(long, short = 'q', global = true)]
    pub quiet: bool,
}

// ── Output & Color Enums ─────────────────────────────────────────────

#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    /// Pretty table (default, interactive)
    Table,
    /// Pretty-printed JSON
    Json,
    /// Compact single-line JSON
    JsonCompact,
    /// YAML
    Yaml,
    /// Plain text, one value per line (scripting)
    Plain,
}

#[derive(Debug, Clone, ValueEnum)]
pub enum ColorMode {
    /// Auto-detect (color if terminal is interactive)
    Auto,
    /// Always emit color codes
    Always,
    /// Never emit color codes
    Never,
}

// ── Top-Level Command Enum ───────────────────────────────────────────

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Show the Astronomy Picture of the Day
    Apod,

    /// List the latest photos of a rover
    #[command(alias = "p")]
    Photos(PhotosArgs),

    /// Show a rover's mission manifest
    #[command(alias = "m")]
    Manifest(RoverArg),

    /// List the configured rovers
    Rovers,

    /// Fetch everything and print the dashboard once
    #[command(alias = "dash")]
    Dashboard(DashboardArgs),

    /// Manage the configuration file
    Config(ConfigArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

#[derive(Debug, Args)]
pub struct RoverArg {
    /// Rover name (curiosity, opportunity, spirit, perseverance)
    pub rover: String,
}

#[derive(Debug, Args)]
pub struct PhotosArgs {
    /// Rover name (curiosity, opportunity, spirit, perseverance)
    pub rover: String,

    /// Maximum number of photos to list
    #[arg(long, short = 'l', default_value = "50")]
    pub limit: usize,
}

#[derive(Debug, Args)]
pub struct DashboardArgs {
    /// Rover to select (defaults to dashboard.default_rover)
    #[arg(long, short = 'r')]
    pub rover: Option<String>,
}

#[derive(Debug, Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Print the effective configuration (file + environment)
    Show,
    /// Print the config file path
    Path,
    /// Write a default config file
    Init {
        /// Overwrite an existing file
        #[arg(long, short = 'f')]
        force: bool,
    },
}

#[derive(Debug, Args)]
pub struct CompletionsArgs {
    /// Target shell
    pub shell: clap_complete::Shell,
}
