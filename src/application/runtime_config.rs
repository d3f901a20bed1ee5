use std::path::PathBuf;

use crate::cli::Cli;

#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    pub layout: Option<PathBuf>,
    pub script: Option<PathBuf>,
}

impl From<Cli> for RuntimeConfig {
    fn from(cli: Cli) -> Self {
        Self {
            layout: cli.layout,
            script: cli.script,
        }
    }
}
