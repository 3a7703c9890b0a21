//! Clap derive structures for the `navdash` CLI.
//!
//! Defines the command tree, global flags, and shared types. Kept free of
//! workspace dependencies so `build.rs` can include it for man pages.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

// ── Top-Level CLI ────────────────────────────────────────────────────

/// navdash -- your bookmark dashboard from the terminal
#[derive(Debug, Parser)]
#[command(
    name = "navdash",
    version,
    about = "Browse and edit a navdash bookmark dashboard from the command line",
    long_about = "A terminal client for the navdash bookmark dashboard.\n\n\
        Views and edits go through the same session rules as the web UI:\n\
        log in once, and the token is kept until it expires or you log out.",
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
    /// Dashboard profile to use
    #[arg(long, short = 'p', env = "NAVDASH_PROFILE", global = true)]
    pub profile: Option<String>,

    /// API base URL (overrides profile)
    #[arg(long, short = 'u', env = "NAVDASH_API_BASE", global = true)]
    pub api_base: Option<String>,

    /// Output format
    #[arg(
        long,
        short = 'o',
        env = "NAVDASH_OUTPUT",
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

    /// Skip confirmation prompts
    #[arg(long, short = 'y', global = true)]
    pub yes: bool,

    /// Accept self-signed TLS certificates
    #[arg(long, short = 'k', env = "NAVDASH_INSECURE", global = true)]
    pub insecure: bool,

    /// Request timeout in seconds (defaults to the profile's, then 30)
    #[arg(long, env = "NAVDASH_TIMEOUT", global = true)]
    pub timeout: Option<u64>,

    /// Directory for persisted session and theme state
    #[arg(long, env = "NAVDASH_STATE_DIR", global = true)]
    pub state_dir: Option<PathBuf>,
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

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum ThemeArg {
    /// Follow the terminal's colour scheme
    System,
    /// Always light
    Light,
    /// Always dark
    Dark,
}

// ── Top-Level Command Enum ───────────────────────────────────────────

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Log in and keep the session token
    Login(LoginArgs),

    /// Drop the session token and cached links
    Logout(LogoutArgs),

    /// Browse and edit links
    #[command(alias = "l")]
    Links(LinksArgs),

    /// Browse and edit categories
    #[command(alias = "cat")]
    Categories(CategoriesArgs),

    /// Fetch a website's icon through the dashboard
    Icon(IconArgs),

    /// Show session, cache and server state
    Status,

    /// Show the server's feature flags
    ServerConfig,

    /// Show or change the colour theme
    Theme(ThemeArgs),

    /// Manage CLI configuration and profiles
    Config(ConfigArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

// ── Session ──────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct LoginArgs {
    /// Username (overrides profile)
    #[arg(long, env = "NAVDASH_USERNAME", hide_env = true)]
    pub username: Option<String>,

    /// Read the password from stdin
    #[arg(long)]
    pub password_stdin: bool,

    /// Log in again even if the current session is valid
    #[arg(long, short = 'f')]
    pub force: bool,
}

#[derive(Debug, Args)]
pub struct LogoutArgs {
    /// Also remove the profile's password from the system keyring
    #[arg(long)]
    pub forget: bool,
}

// ── Links ────────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct LinksArgs {
    #[command(subcommand)]
    pub command: LinksCommand,
}

#[derive(Debug, Subcommand)]
pub enum LinksCommand {
    /// List links grouped by category
    #[command(alias = "ls")]
    List {
        /// Only show this category
        #[arg(long, short = 'c')]
        category: Option<String>,
    },

    /// Add a link at the end of its category
    Add {
        /// Display name
        name: String,

        /// Target URL
        url: String,

        /// Category
        #[arg(long, short = 'c')]
        category: String,

        /// Icon URL or data URI
        #[arg(long, conflicts_with = "fetch_icon")]
        icon: Option<String>,

        /// Ask the dashboard to fetch the site's icon
        #[arg(long)]
        fetch_icon: bool,
    },

    /// Change fields of an existing link
    Update {
        /// Server position of the link (see `links list`)
        index: usize,

        #[arg(long)]
        name: Option<String>,

        #[arg(long)]
        url: Option<String>,

        #[arg(long, short = 'c')]
        category: Option<String>,

        #[arg(long)]
        icon: Option<String>,
    },

    /// Delete a link
    #[command(alias = "rm")]
    Delete {
        /// Server position of the link (see `links list`)
        index: usize,
    },

    /// Reorder a link, optionally into another category
    #[command(alias = "mv")]
    Move {
        /// Server position of the link (see `links list`)
        index: usize,

        /// Target position within the category (0 = first)
        position: usize,

        /// Target category (defaults to the link's current one)
        #[arg(long, short = 'c')]
        category: Option<String>,
    },
}

// ── Categories ───────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct CategoriesArgs {
    #[command(subcommand)]
    pub command: CategoriesCommand,
}

#[derive(Debug, Subcommand)]
pub enum CategoriesCommand {
    /// List categories with link counts
    #[command(alias = "ls")]
    List,

    /// Replace the whole category list (also sets its order)
    Set {
        /// Categories in display order
        #[arg(required = true)]
        categories: Vec<String>,
    },

    /// Append a category
    Add { name: String },

    /// Remove an unused category
    #[command(alias = "rm")]
    Remove { name: String },
}

// ── Icon ─────────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct IconArgs {
    /// Website URL
    pub url: String,

    /// Write the decoded icon to this file instead of printing the data URI
    #[arg(long, short = 'O')]
    pub out: Option<PathBuf>,
}

// ── Theme ────────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct ThemeArgs {
    #[command(subcommand)]
    pub command: Option<ThemeCommand>,
}

#[derive(Debug, Subcommand)]
pub enum ThemeCommand {
    /// Show the current mode and resolved palette
    Show,

    /// Cycle system → light → dark → system
    Toggle,

    /// Select a mode directly
    Set { mode: ThemeArg },
}

// ── Config ───────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Create initial config file with guided setup
    Init,

    /// Display current configuration
    Show,

    /// Set a value on the active profile
    Set {
        /// Profile key (api_base, username, password_env, ca_cert, insecure, timeout, state_dir)
        key: String,

        /// Value to set
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
        /// Profile name (defaults to the active profile)
        #[arg(long)]
        profile: Option<String>,
    },

    /// Print the config file path
    Path,
}

#[derive(Debug, Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    pub shell: clap_complete::Shell,
}
