use std::fs::File;
use std::io::{self, BufReader, IsTerminal};
use std::path::PathBuf;

use memtree::config::{Layout, LayoutError};
use memtree::filesystem::FileTree;
use memtree::shell::Shell;
use snafu::Snafu;
use snafu::prelude::*;
use supports_color::Stream;
use tracing::{debug, info};

use crate::application::RuntimeConfig;

pub struct Application;

impl Application {
    pub fn run(app_config: impl Into<RuntimeConfig>) -> Result<(), ApplicationError> {
        let app_config: RuntimeConfig = app_config.into();
        colored::control::set_override(supports_color::on(Stream::Stderr).is_some());

        let tree = Self::initial_tree(&app_config).context(InitialTreeSnafu)?;
        let mut shell = Shell::new(tree);

        let mut output = io::stdout().lock();
        let mut errors = io::stderr().lock();

        match &app_config.script {
            Some(path) => {
                info!("Running script: {}", path.display());
                let file = File::open(path).context(ScriptSnafu {
                    file_path: path.clone(),
                })?;
                shell
                    .run(BufReader::new(file), &mut output, &mut errors, false)
                    .context(SessionSnafu)?;
            }
            None => {
                let stdin = io::stdin();
                let interactive = stdin.is_terminal();
                debug!("Reading commands from stdin (interactive: {interactive})");
                shell
                    .run(stdin.lock(), &mut output, &mut errors, interactive)
                    .context(SessionSnafu)?;
            }
        }

        Ok(())
    }

    fn initial_tree(app_config: &RuntimeConfig) -> Result<FileTree, LayoutError> {
        let mut tree = FileTree::new();
        if let Some(path) = &app_config.layout {
            let layout = Layout::from_path(path)?;
            debug!("Loaded layout: {:?}", layout);
            layout.apply(&mut tree)?;
        }
        Ok(tree)
    }
}

#[derive(Debug, Snafu)]
pub enum ApplicationError {
    #[snafu(display("Critical failure encountered while building the initial tree"))]
    InitialTreeError { source: LayoutError },
    #[snafu(display("Failed to open the script file: {}", file_path.display()))]
    ScriptError {
        file_path: PathBuf,
        source: io::Error,
    },
    #[snafu(display("Critical failure encountered during the shell session"))]
    SessionError { source: io::Error },
}
