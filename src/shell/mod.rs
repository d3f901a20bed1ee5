//! Line-oriented shell that maps text commands onto a [`FileTree`](crate::filesystem::FileTree).

mod command;
mod session;

pub use command::{Command, CommandParseError, HELP};
pub use session::{Outcome, Shell, ShellError};
