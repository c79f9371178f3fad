//! CLI argument definitions using clap derive

use clap::{Parser, Subcommand, ValueEnum};

use crate::cli::commands::{
    completions::CompletionsArgs, config::ConfigCommands, part::PartCommands,
    product::ProductCommands,
};

#[derive(Parser)]
#[command(name = "invm")]
#[command(author, version, about = "Inventory Manager")]
#[command(long_about = "Manage parts, products and the parts each product uses. \
Run without a subcommand for the interactive session. Data lives in memory and \
is re-seeded with sample rows on every start.")]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    #[command(flatten)]
    pub global: GlobalOpts,
}

#[derive(clap::Args, Clone, Debug)]
pub struct GlobalOpts {
    /// Output format
    #[arg(long, short = 'f', global = true, default_value = "auto")]
    pub format: OutputFormat,

    /// Suppress non-essential output
    #[arg(long, short = 'q', global = true)]
    pub quiet: bool,

    /// Enable verbose output (debug logging)
    #[arg(long, short = 'v', global = true)]
    pub verbose: bool,

    /// Start with an empty inventory instead of the sample rows
    #[arg(long, global = true)]
    pub empty: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Interactive session (the default)
    Shell,

    /// Part management
    #[command(subcommand)]
    Part(PartCommands),

    /// Product management
    #[command(subcommand)]
    Product(ProductCommands),

    /// Show configuration
    #[command(subcommand)]
    Config(ConfigCommands),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

#[derive(ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum OutputFormat {
    /// Automatically detect based on context (pretty for show, tsv for list)
    #[default]
    Auto,
    /// YAML format (full fidelity)
    Yaml,
    /// Tab-separated values (for piping)
    Tsv,
    /// JSON format (for programming)
    Json,
    /// CSV format (for spreadsheets)
    Csv,
    /// Markdown tables
    Md,
    /// Just IDs, one per line
    Id,
}
