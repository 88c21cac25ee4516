use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// rolegrant - cascading role permission editor
#[derive(Parser, Debug)]
#[command(name = "rolegrant")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Output format for CI
    #[arg(long, global = true)]
    pub json: bool,

    /// Verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Config file (default: ./rolegrant.toml, then the user config)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Show the menu tree of a system with the current selection
    Inspect {
        /// Permission forest (JSON array of system nodes)
        #[arg(short, long)]
        forest: PathBuf,

        /// Ids already granted to the role ({systemIds, menuIds, resourceIds})
        #[arg(short, long)]
        granted: Option<PathBuf>,

        /// System to show (default: the first one)
        #[arg(short, long)]
        system: Option<String>,

        /// Only keep menus whose name contains this text
        #[arg(short, long)]
        keyword: Option<String>,
    },

    /// Count selected and known systems, menus, and resources
    Stats {
        /// Permission forest (JSON array of system nodes)
        #[arg(short, long)]
        forest: PathBuf,

        /// Ids already granted to the role ({systemIds, menuIds, resourceIds})
        #[arg(short, long)]
        granted: Option<PathBuf>,
    },

    /// Apply a toggle script and print the resulting payload
    Apply {
        /// Permission forest (JSON array of system nodes)
        #[arg(short, long)]
        forest: PathBuf,

        /// Ids already granted to the role ({systemIds, menuIds, resourceIds})
        #[arg(short, long)]
        granted: Option<PathBuf>,

        /// Directory of `<menuId>.json` resource files for lazy loading
        #[arg(short, long)]
        resources: Option<PathBuf>,

        /// Toggle script (one `verb id` per line)
        #[arg(long)]
        script: PathBuf,

        /// Role being edited (used in logs)
        #[arg(long, default_value = "role")]
        role: String,
    },
}
