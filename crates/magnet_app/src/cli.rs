//! Command-line surface for Magnet Courier.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

use crate::platform::logging::{LogDestination, DEFAULT_LOG_FILE};
use crate::platform::persistence::DEFAULT_SETTINGS_FILENAME;

#[derive(Debug, Parser)]
#[command(name = "magnet-courier")]
#[command(about = "Collect magnet links from a page and send them to qBittorrent", long_about = None)]
pub struct Cli {
    /// Connection settings file.
    #[arg(long, global = true, env = "MAGNET_SETTINGS", default_value = DEFAULT_SETTINGS_FILENAME)]
    pub settings: PathBuf,

    /// Where log output goes.
    #[arg(long, global = true, value_enum, default_value_t = LogTarget::Off)]
    pub log: LogTarget,

    /// Log file used by `--log file` and `--log both`.
    #[arg(long, global = true, default_value = DEFAULT_LOG_FILE)]
    pub log_file: PathBuf,

    /// Increase log verbosity (-v debug, -vv trace).
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: CliCommand,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogTarget {
    Off,
    Terminal,
    File,
    Both,
}

impl Cli {
    pub fn log_destination(&self) -> LogDestination {
        match self.log {
            LogTarget::Off => LogDestination::Off,
            LogTarget::Terminal => LogDestination::Terminal,
            LogTarget::File => LogDestination::File(self.log_file.clone()),
            LogTarget::Both => LogDestination::Both(self.log_file.clone()),
        }
    }

    pub fn log_level(&self) -> log::LevelFilter {
        match self.verbose {
            0 => log::LevelFilter::Info,
            1 => log::LevelFilter::Debug,
            _ => log::LevelFilter::Trace,
        }
    }
}

#[derive(Debug, Subcommand)]
pub enum CliCommand {
    /// List the magnet links found on a page.
    Scan {
        /// http(s) URL, file:// URL or local HTML file.
        page: String,
        /// Only show links whose name contains this text.
        #[arg(long)]
        filter: Option<String>,
    },

    /// Send links from a page to qBittorrent.
    Add {
        /// http(s) URL, file:// URL or local HTML file.
        page: String,
        /// Narrow the list before selecting.
        #[arg(long)]
        filter: Option<String>,
        /// 1-based row numbers as shown by `scan`.
        #[arg(long, value_delimiter = ',', value_name = "N")]
        select: Vec<usize>,
        /// Select every row that passes the filter.
        #[arg(long)]
        all: bool,
        /// qBittorrent category for the added torrents.
        #[arg(long)]
        category: Option<String>,
    },

    /// Print the toolbar badge for a page.
    Badge {
        page: String,
    },

    /// Log in and report the qBittorrent version.
    Test,

    /// Show or change the connection settings.
    Settings {
        #[command(subcommand)]
        action: SettingsAction,
    },
}

#[derive(Debug, Subcommand)]
pub enum SettingsAction {
    /// Print the stored settings with the password masked.
    Show,
    /// Update one or more fields; unspecified fields keep their value.
    Set {
        #[arg(long)]
        url: Option<String>,
        #[arg(long)]
        username: Option<String>,
        #[arg(long)]
        password: Option<String>,
    },
}
