use snafu::Snafu;

use super::NodeKind;

#[derive(Debug, Snafu, PartialEq, Eq)]
#[snafu(visibility(pub(super)))]
pub enum FileTreeError {
    #[snafu(display("A {} named '{}' already exists", kind, name))]
    AlreadyExists { name: String, kind: NodeKind },
    #[snafu(display("Directory '{}' not found", name))]
    DirectoryNotFound { name: String },
    #[snafu(display("File or directory '{}' not found", name))]
    NotFound { name: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_messages_name_the_entry() {
        let exists = FileTreeError::AlreadyExists {
            name: "src".into(),
            kind: NodeKind::Directory,
        };
        let missing_dir = FileTreeError::DirectoryNotFound { name: "lib".into() };
        let missing = FileTreeError::NotFound { name: "a.txt".into() };

        assert_eq!(exists.to_string(), "A directory named 'src' already exists");
        assert_eq!(missing_dir.to_string(), "Directory 'lib' not found");
        assert_eq!(missing.to_string(), "File or directory 'a.txt' not found");
    }
}
