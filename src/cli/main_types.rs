use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "artwork-table")]
#[command(about = "Browse and select artworks from the Art Institute of Chicago API")]
#[command(version)]
pub struct Cli {
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[arg(long, global = true)]
    pub config_dir: Option<String>,

    /// API base URL, overrides the configuration file
    #[arg(long, global = true, env = "ARTWORK_TABLE_BASE_URL")]
    pub base_url: Option<String>,

    /// Disable colored table output
    #[arg(long, global = true)]
    pub no_color: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Show one page of artworks
    Page {
        /// Page number, starting at 1
        #[arg(default_value_t = 1)]
        page: usize,
    },
    /// Select the first COUNT artworks from a page onward
    Select {
        /// Number of rows to select
        #[arg(allow_hyphen_values = true)]
        count: String,
        /// Page to start from, starting at 1
        #[arg(long, default_value_t = 1)]
        page: usize,
    },
    /// Interactive table session
    Browse {
        /// Page to open, starting at 1
        #[arg(long, default_value_t = 1)]
        page: usize,
    },
    /// Configuration management
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Show the current configuration
    Show,
    /// Set configuration value
    Set {
        /// Configuration key (base_url, timeout_seconds, use_colors)
        key: String,
        /// Configuration value
        value: String,
    },
}
