//! CLI struct definitions for the meetnote command-line interface.
//!
//! All clap-derived types live here. Dispatch logic lives in `main.rs`.

use clap::{Parser, Subcommand};
use meetnote::core::meeting::GroupStrategy;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[clap(
    name = "meetnote",
    version = env!("CARGO_PKG_VERSION"),
    about = "Meeting notes as files: grouped by domain or date, created from templates, queried by wildcard."
)]
pub(crate) struct Cli {
    /// Config file (default: ~/.config/meetnote/config.toml).
    #[clap(long, global = true)]
    pub config: Option<PathBuf>,
    #[clap(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub(crate) enum Command {
    /// Open a meeting note in the editor, creating it if needed
    Open {
        /// Dot-separated domain, e.g. 'team.backend' ('' uses the default)
        domain: String,
        name: String,
        /// Meeting date as YYYY-MM-DD (default: today)
        #[clap(long)]
        date: Option<String>,
        /// Template to render into the note on first creation
        #[clap(long)]
        template: Option<String>,
    },
    /// List stored meetings matching wildcard filters
    List {
        #[clap(long, default_value = "*")]
        name: String,
        #[clap(long, default_value = "*")]
        domain: String,
        #[clap(long, default_value = "*")]
        date: String,
        /// Output format: 'text' or 'json'
        #[clap(long, default_value = "text")]
        format: String,
    },
    /// Remove a meeting note and clean up emptied directories
    Remove {
        date: String,
        domain: String,
        name: String,
    },
    /// Change how meetings are grouped on disk (migrates existing notes)
    GroupBy {
        #[clap(value_enum)]
        strategy: GroupStrategy,
    },
    /// Manage note templates
    Template {
        #[clap(subcommand)]
        command: TemplateCommand,
    },
    /// List checklist tasks extracted from matching notes
    Tasks {
        #[clap(long, default_value = "*")]
        name: String,
        #[clap(long, default_value = "*")]
        domain: String,
        #[clap(long, default_value = "*")]
        date: String,
        #[clap(long, default_value = "*")]
        description: String,
        /// Only complete (true) or incomplete (false) tasks
        #[clap(long)]
        complete: Option<bool>,
        /// Output format: 'text' or 'json'
        #[clap(long, default_value = "text")]
        format: String,
    },
}

#[derive(Subcommand, Debug)]
pub(crate) enum TemplateCommand {
    /// Copy template files into the store
    Add { paths: Vec<PathBuf> },
    /// List stored template names
    List,
    /// Remove stored templates by name
    Remove { names: Vec<String> },
}
