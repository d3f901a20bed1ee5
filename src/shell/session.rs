use std::io::{self, BufRead, Write};

use colored::Colorize;
use snafu::Snafu;
use tracing::{debug, info};

use super::command::{Command, CommandParseError, HELP};
use crate::filesystem::{FileTree, FileTreeError};

/// What the caller should do after a command ran
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Output(String),
    Exit,
}

/// Interactive front end over a single [`FileTree`]
#[derive(Debug, Default)]
pub struct Shell {
    tree: FileTree,
}

impl Shell {
    pub fn new(tree: FileTree) -> Self {
        Self { tree }
    }

    pub fn tree(&self) -> &FileTree {
        &self.tree
    }

    pub fn into_tree(self) -> FileTree {
        self.tree
    }

    pub fn execute(&mut self, command: Command) -> Result<Outcome, ShellError> {
        debug!("Executing '{}' in {}", command, self.tree.pwd());
        let output = match command {
            Command::Mkdir(name) => self.tree.mkdir(&name).map(|_| String::new())?,
            Command::Touch(name) => self.tree.touch(&name).map(|_| String::new())?,
            Command::Cd(path) => self.tree.cd(&path).map(|_| String::new())?,
            Command::Rm(name) => self.tree.rm(&name).map(|_| String::new())?,
            Command::Ls => self.tree.ls(),
            Command::Tree => self.tree.tree(),
            Command::Pwd => format!("{}\n", self.tree.pwd()),
            Command::Find(name) => match self.tree.find(&name) {
                Some(node) => format!("{}\n", node.path()),
                None => format!("find: '{name}' not found\n"),
            },
            Command::Help => HELP.to_string(),
            Command::Exit => return Ok(Outcome::Exit),
        };
        Ok(Outcome::Output(output))
    }

    /// Parses and runs one line. Blank lines yield `None`.
    pub fn execute_line(&mut self, line: &str) -> Result<Option<Outcome>, ShellError> {
        match Command::parse(line)? {
            Some(command) => self.execute(command).map(Some),
            None => Ok(None),
        }
    }

    /// Reads commands until `exit` or end of input. Command failures are
    /// written to `errors` and the session continues; only I/O errors on
    /// the streams themselves end it early.
    pub fn run<R, W, E>(
        &mut self,
        input: R,
        output: &mut W,
        errors: &mut E,
        interactive: bool,
    ) -> io::Result<()>
    where
        R: BufRead,
        W: Write,
        E: Write,
    {
        info!("Starting shell session");
        let mut lines = input.lines();
        loop {
            if interactive {
                write!(output, "{}$ ", self.tree.pwd())?;
                output.flush()?;
            }
            let Some(line) = lines.next() else {
                break;
            };
            let line = line?;

            match self.execute_line(&line) {
                Ok(Some(Outcome::Output(text))) => output.write_all(text.as_bytes())?,
                Ok(Some(Outcome::Exit)) => break,
                Ok(None) => {}
                Err(err) => {
                    debug!("Command '{}' failed: {}", line.trim(), err);
                    writeln!(errors, "{} {}", "error:".red().bold(), err)?;
                }
            }
        }
        output.flush()?;
        info!("Shell session finished");
        Ok(())
    }
}

#[derive(Debug, Snafu)]
pub enum ShellError {
    #[snafu(transparent)]
    ParseError { source: CommandParseError },
    #[snafu(transparent)]
    TreeError { source: FileTreeError },
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use std::io::Cursor;

    fn run_script(script: &str) -> (Shell, String, String) {
        let mut shell = Shell::default();
        let mut output = Vec::new();
        let mut errors = Vec::new();
        shell
            .run(Cursor::new(script), &mut output, &mut errors, false)
            .expect("In-memory streams should not fail");
        (
            shell,
            String::from_utf8(output).unwrap(),
            String::from_utf8(errors).unwrap(),
        )
    }

    #[test]
    fn session_prints_command_output() {
        let (_, output, errors) =
            run_script("mkdir a\ncd a\nmkdir b\ncd b\npwd\ncd ..\ncd ..\npwd\ntree\n");
        assert_eq!(output, "/a/b/\n/\n/\n  a/\n    b/\n");
        assert!(errors.is_empty());
    }

    #[test]
    fn session_continues_after_errors() {
        let (shell, output, errors) = run_script("mkdir x\nmkdir x\nfrobnicate\ntouch x\nls\n");
        assert_eq!(output, "x/\nx\n");
        let error_lines = errors.lines().collect::<Vec<_>>();
        assert_eq!(error_lines.len(), 2);
        assert!(error_lines[0].contains("A directory named 'x' already exists"));
        assert!(error_lines[1].contains("Unknown command 'frobnicate'"));
        assert_eq!(shell.tree().len(), 3);
    }

    #[test]
    fn session_stops_at_exit() {
        let (shell, output, _) = run_script("mkdir a\nexit\nmkdir b\n");
        assert_eq!(output, "");
        assert!(shell.tree().find("a").is_some());
        assert!(shell.tree().find("b").is_none());
    }

    #[test]
    fn interactive_session_writes_prompts() {
        let mut shell = Shell::default();
        let mut output = Vec::new();
        let mut errors = Vec::new();
        shell
            .run(Cursor::new("mkdir a\ncd a\n"), &mut output, &mut errors, true)
            .unwrap();
        assert_eq!(String::from_utf8(output).unwrap(), "/$ /$ /a/$ ");
    }

    #[rstest]
    #[case("find b", "/a/b/\n")]
    #[case("find f", "/a/f\n")]
    #[case("find /", "/\n")]
    #[case("find zzz", "find: 'zzz' not found\n")]
    fn find_prints_paths(#[case] line: &str, #[case] expected: &str) {
        let mut shell = Shell::default();
        for setup in ["mkdir a", "cd a", "mkdir b", "touch f", "cd /"] {
            shell.execute_line(setup).unwrap();
        }

        let outcome = shell.execute_line(line).unwrap();
        assert_eq!(outcome, Some(Outcome::Output(expected.to_string())));
    }

    #[test]
    fn rm_removes_subtree_through_shell() {
        let (shell, output, errors) = run_script("mkdir a\ncd a\nmkdir b\ncd /\nrm a\nfind b\nls\n");
        assert_eq!(output, "find: 'b' not found\n");
        assert!(errors.is_empty());
        assert_eq!(shell.into_tree().tree(), "/\n");
    }

    #[test]
    fn execute_reports_tree_errors() {
        let mut shell = Shell::default();
        let result = shell.execute(Command::Rm("ghost".into()));
        assert!(matches!(
            result,
            Err(ShellError::TreeError {
                source: FileTreeError::NotFound { .. }
            })
        ));
    }

    #[test]
    fn blank_lines_produce_nothing() {
        let mut shell = Shell::new(FileTree::new());
        assert_eq!(shell.execute_line("   ").unwrap(), None);
    }

    #[test]
    fn help_lists_every_command() {
        let mut shell = Shell::default();
        let Some(Outcome::Output(text)) = shell.execute_line("help").unwrap() else {
            panic!("help should print output");
        };
        for command in ["mkdir", "touch", "ls", "cd", "rm", "pwd", "tree", "find", "exit"] {
            assert!(text.contains(command), "help is missing {command}");
        }
    }
}
