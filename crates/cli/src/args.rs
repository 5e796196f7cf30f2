//! Flags shared by every droidci binary

use crate::logging::LogConfig;
use clap::Args;
use std::ffi::OsStr;
use std::path::PathBuf;

/// Global flags: config file, verbosity, color
#[derive(Debug, Clone, Args)]
pub struct CommonArgs {
    /// Config file path (defaults to ./.droidci.toml when present)
    #[arg(long, env = "DROIDCI_CONFIG", value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Increase diagnostic output on stderr (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Disable colored output (any non-empty NO_COLOR does the same)
    #[arg(long)]
    pub no_color: bool,
}

/// `NO_COLOR` disables color whenever it is set to a non-empty value
fn no_color_env(value: Option<&OsStr>) -> bool {
    value.is_some_and(|v| !v.is_empty())
}

impl CommonArgs {
    /// Whether color is off, from the flag or the environment
    pub fn color_disabled(&self) -> bool {
        self.no_color || no_color_env(std::env::var_os("NO_COLOR").as_deref())
    }

    /// Apply the color override and start logging
    pub fn init_output(&self) {
        let no_color = self.color_disabled();
        if no_color {
            owo_colors::set_override(false);
        }
        let config = LogConfig {
            ansi: !no_color,
            ..LogConfig::from_verbosity(self.verbose)
        };
        if let Err(e) = crate::logging::init(&config) {
            eprintln!("warning: logging unavailable: {}", e);
        }
    }
}
