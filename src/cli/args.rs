//! CLI argument definitions using clap

use std::path::PathBuf;

use clap::{ArgAction, Parser, Subcommand, ValueEnum, ValueHint};

use crate::application::OutputFormat;

/// Namespaced, camelCased configuration from flat environment variables, and back
#[derive(Parser, Debug)]
#[command(name = "camelspace")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    /// Project directory for local config (default: cwd)
    #[arg(short = 'C', long, global = true, value_hint = ValueHint::DirPath)]
    pub project_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Print environment variables under a scope as camelCased config
    Import {
        /// Scope label, repeatable: -s myApp -s core reads MY_APP_CORE_*
        #[arg(short, long = "scope")]
        scopes: Vec<String>,
        /// Output format (default: from config)
        #[arg(short, long, value_enum)]
        format: Option<OutputFormat>,
    },

    /// Turn camelCased config back into export statements
    Export {
        /// Scope label, repeatable
        #[arg(short, long = "scope")]
        scopes: Vec<String>,
        /// TOML or JSON file with string values (default: TOML from stdin)
        #[arg(value_hint = ValueHint::FilePath)]
        file: Option<PathBuf>,
    },

    /// Print several top-level scopes side by side, keyed by label
    Of {
        /// Scope labels
        #[arg(required = true, num_args = 1..)]
        labels: Vec<String>,
        /// Output format (default: from config)
        #[arg(short, long, value_enum)]
        format: Option<OutputFormat>,
    },

    /// Print the variable prefix of a scope
    Prefix {
        /// Scope label, repeatable
        #[arg(short, long = "scope")]
        scopes: Vec<String>,
    },

    /// Convert identifiers between camelCase and CONSTANT_CASE
    Case {
        /// Target case
        #[arg(value_enum)]
        to: CaseTarget,
        /// Identifiers to convert
        #[arg(required = true, num_args = 1..)]
        words: Vec<String>,
    },

    /// Check whether keys would be imported (exit 1 if any is rejected)
    Check {
        /// Keys to check
        #[arg(required = true, num_args = 1..)]
        keys: Vec<String>,
    },

    /// Manage settings
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },

    /// Generate shell completions
    Completion {
        /// Shell type
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum CaseTarget {
    /// camelCase
    Camel,
    /// CONSTANT_CASE
    Constant,
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Show merged config
    Show,

    /// Create config template
    Init {
        /// Create global config
        #[arg(short, long)]
        global: bool,
    },

    /// Show config paths
    Path,
}
