use std::path::PathBuf;

use clap::Parser;

use crate::application::data::LogLevel;

#[derive(Parser, Debug, Clone)]
#[command(version, about = "In-memory directory tree shell")]
pub struct Cli {
    #[clap(long, short, default_value = "warn", value_enum)]
    pub log_level: LogLevel,

    /// YAML file describing the tree to start with
    #[clap(long)]
    pub layout: Option<PathBuf>,

    /// Read commands from this file instead of stdin
    #[clap(long, short)]
    pub script: Option<PathBuf>,
}
