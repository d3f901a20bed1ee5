use derive_more::{Display, IsVariant};

/// Kind of a filesystem node, fixed when the node is created
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, IsVariant)]
pub enum NodeKind {
    #[display("directory")]
    Directory,
    #[display("file")]
    File,
}

/// Payload stored in the arena for every node of the tree.
/// Parent and children links are kept by the arena itself.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Node {
    name: String,
    kind: NodeKind,
}

impl Node {
    pub fn directory(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: NodeKind::Directory,
        }
    }

    pub fn file(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: NodeKind::File,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> NodeKind {
        self.kind
    }

    pub fn is_directory(&self) -> bool {
        self.kind.is_directory()
    }

    /// Name as shown by `ls` and `tree`: directories get a trailing slash
    pub fn display_name(&self) -> String {
        match self.kind {
            NodeKind::Directory => format!("{}/", self.name),
            NodeKind::File => self.name.clone(),
        }
    }

    pub(super) fn matches(&self, name: &str, kind: NodeKind) -> bool {
        self.kind == kind && self.name == name
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(Node::directory("docs"), "docs/")]
    #[case(Node::file("notes.txt"), "notes.txt")]
    fn display_name_marks_directories(#[case] node: Node, #[case] expected: &str) {
        assert_eq!(node.display_name(), expected);
    }

    #[test]
    fn matches_requires_same_kind() {
        let node = Node::directory("x");
        assert!(node.matches("x", NodeKind::Directory));
        assert!(!node.matches("x", NodeKind::File));
        assert!(!node.matches("y", NodeKind::Directory));
    }

    #[test]
    fn kind_display_is_lowercase() {
        assert_eq!(NodeKind::Directory.to_string(), "directory");
        assert_eq!(NodeKind::File.to_string(), "file");
        assert!(NodeKind::File.is_file());
    }
}
