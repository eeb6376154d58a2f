//! Command-line definitions

use clap::{ArgAction, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "tfd-search", version)]
#[command(about = "The First Descendant weapon and module browser", long_about = None)]
pub struct Cli {
    /// Directory holding the cached datasets (uses configured default if not provided)
    #[arg(long, global = true, env = "TFD_SEARCH_CACHE_DIR")]
    pub cache_dir: Option<PathBuf>,

    /// Base URL of the static metadata endpoint
    #[arg(long, global = true, env = "TFD_SEARCH_BASE_URL")]
    pub base_url: Option<String>,

    /// Re-download every dataset before starting
    #[arg(long)]
    pub refresh: bool,

    /// Don't clear the screen before each menu
    #[arg(long)]
    pub no_clear: bool,

    /// Increase log output (-v info, -vv debug)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Configure default settings
    #[command(visible_alias = "c")]
    Configure {
        /// Set the default cache directory
        #[arg(long)]
        set_cache_dir: Option<PathBuf>,

        /// Set the default metadata base URL
        #[arg(long)]
        set_base_url: Option<String>,

        /// Show current configuration
        #[arg(long)]
        show: bool,
    },

    /// Re-download every dataset into the cache and exit
    #[command(visible_alias = "r")]
    Refresh,
}
