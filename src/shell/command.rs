use derive_more::Display;
use snafu::prelude::*;

pub const HELP: &str = "\
mkdir <name>   create a directory in the current directory
touch <name>   create a file in the current directory
ls             list the current directory
cd <path>      change directory: '/', '..' or a child directory
rm <name>      remove a file or directory with everything inside it
pwd            print the current directory
tree           print the whole tree
find <name>    print the path of the first node with this name
help           show this message
exit           leave the shell
";

/// A single shell command with its argument
#[derive(Debug, Clone, PartialEq, Eq, Display)]
pub enum Command {
    #[display("mkdir {_0}")]
    Mkdir(String),
    #[display("touch {_0}")]
    Touch(String),
    #[display("ls")]
    Ls,
    #[display("cd {_0}")]
    Cd(String),
    #[display("rm {_0}")]
    Rm(String),
    #[display("pwd")]
    Pwd,
    #[display("tree")]
    Tree,
    #[display("find {_0}")]
    Find(String),
    #[display("help")]
    Help,
    #[display("exit")]
    Exit,
}

impl Command {
    /// Parses one input line. Blank lines yield `None`.
    pub fn parse(line: &str) -> Result<Option<Self>, CommandParseError> {
        let mut tokens = line.split_whitespace();
        let Some(program) = tokens.next() else {
            return Ok(None);
        };
        let args = tokens.collect::<Vec<_>>();

        let command = match program {
            "mkdir" => Command::Mkdir(single_argument(program, &args)?),
            "touch" => Command::Touch(single_argument(program, &args)?),
            "cd" => Command::Cd(single_argument(program, &args)?),
            "rm" => Command::Rm(single_argument(program, &args)?),
            "find" => Command::Find(single_argument(program, &args)?),
            "ls" => no_arguments(program, &args, Command::Ls)?,
            "pwd" => no_arguments(program, &args, Command::Pwd)?,
            "tree" => no_arguments(program, &args, Command::Tree)?,
            "help" => no_arguments(program, &args, Command::Help)?,
            "exit" | "quit" => no_arguments(program, &args, Command::Exit)?,
            _ => return UnknownCommandSnafu { command: program }.fail(),
        };
        Ok(Some(command))
    }
}

fn single_argument(program: &str, args: &[&str]) -> Result<String, CommandParseError> {
    match args {
        [] => MissingArgumentSnafu { command: program }.fail(),
        [name] => Ok(name.to_string()),
        [_, extra, ..] => UnexpectedArgumentSnafu {
            command: program,
            argument: *extra,
        }
        .fail(),
    }
}

fn no_arguments(
    program: &str,
    args: &[&str],
    command: Command,
) -> Result<Command, CommandParseError> {
    match args.first() {
        None => Ok(command),
        Some(extra) => UnexpectedArgumentSnafu {
            command: program,
            argument: *extra,
        }
        .fail(),
    }
}

#[derive(Debug, Snafu, PartialEq, Eq)]
pub enum CommandParseError {
    #[snafu(display("Unknown command '{}', try 'help'", command))]
    UnknownCommand { command: String },
    #[snafu(display("'{}' expects a name", command))]
    MissingArgument { command: String },
    #[snafu(display("Unexpected argument '{}' for '{}'", argument, command))]
    UnexpectedArgument { command: String, argument: String },
}
