use hashlink::LinkedHashMap;
use saphyr::{LoadableYamlNode, Scalar, Yaml};
use snafu::prelude::*;
use std::{
    borrow::Cow,
    path::{Path, PathBuf},
};
use tracing::{debug, info};

use crate::filesystem::{FileTree, FileTreeError, NodeKind};

/// Description of a tree to create at startup, in document order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Layout {
    entries: Vec<LayoutEntry>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LayoutEntry {
    File { name: String },
    Directory { name: String, entries: Vec<LayoutEntry> },
}

impl Layout {
    pub fn from_path(path: &Path) -> Result<Self, LayoutError> {
        debug!("Reading layout file: {}", path.display());
        let contents = std::fs::read_to_string(path).context(ReadSnafu {
            file_path: path.to_path_buf(),
        })?;
        debug!("Successfully read layout file: {} bytes", contents.len());
        contents.as_str().try_into()
    }

    pub fn entries(&self) -> &[LayoutEntry] {
        &self.entries
    }

    /// Replays the layout onto `tree` starting at its root.
    /// The cursor is back at the root afterwards. On conflict with an
    /// existing root entry nothing is created and the cursor stays put.
    pub fn apply(&self, tree: &mut FileTree) -> Result<(), LayoutError> {
        self.check_conflicts(tree).context(ApplySnafu)?;

        tree.cd("/").context(ApplySnafu)?;
        Self::apply_entries(&self.entries, tree).context(ApplySnafu)?;
        tree.cd("/").context(ApplySnafu)?;
        info!("Applied layout: {} nodes in tree", tree.len());
        Ok(())
    }

    /// Only top-level entries can clash: everything nested lands in a
    /// directory the layout itself creates, and names within one mapping
    /// are checked for duplicates when parsing.
    fn check_conflicts(&self, tree: &FileTree) -> Result<(), FileTreeError> {
        for entry in &self.entries {
            let (name, kind) = entry.name_and_kind();
            let exists = tree
                .root()
                .children()
                .any(|child| child.name() == name && child.kind() == kind);
            if exists {
                return Err(FileTreeError::AlreadyExists {
                    name: name.to_string(),
                    kind,
                });
            }
        }
        Ok(())
    }

    fn apply_entries(entries: &[LayoutEntry], tree: &mut FileTree) -> Result<(), FileTreeError> {
        for entry in entries {
            match entry {
                LayoutEntry::File { name } => tree.touch(name)?,
                LayoutEntry::Directory { name, entries } => {
                    tree.mkdir(name)?;
                    tree.cd(name)?;
                    Self::apply_entries(entries, tree)?;
                    tree.cd("..")?;
                }
            }
        }
        Ok(())
    }

    fn parse_entries(
        mapping: &LinkedHashMap<Yaml, Yaml>,
        parent_path: &str,
    ) -> Result<Vec<LayoutEntry>, LayoutError> {
        let mut entries: Vec<LayoutEntry> = Vec::with_capacity(mapping.len());
        for (key, value) in mapping {
            let name = scalar_text(key).context(InvalidEntrySnafu {
                path: format!("{parent_path}<non-scalar key>"),
            })?;
            let path = format!("{parent_path}{name}");

            let entry = match value {
                Yaml::Value(Scalar::Null) => LayoutEntry::File { name },
                // `cd` could never enter these
                Yaml::Mapping(_) if name == "/" || name == ".." => {
                    return InvalidEntrySnafu { path }.fail();
                }
                Yaml::Mapping(children) => LayoutEntry::Directory {
                    entries: Self::parse_entries(children, &format!("{path}/"))?,
                    name,
                },
                _ => return InvalidEntrySnafu { path }.fail(),
            };

            // `1` and `"1"` are distinct YAML keys but the same name
            ensure!(
                !entries
                    .iter()
                    .any(|other| other.name_and_kind() == entry.name_and_kind()),
                DuplicateEntrySnafu { path }
            );
            entries.push(entry);
        }
        Ok(entries)
    }
}

impl LayoutEntry {
    fn name_and_kind(&self) -> (&str, NodeKind) {
        match self {
            LayoutEntry::File { name } => (name, NodeKind::File),
            LayoutEntry::Directory { name, .. } => (name, NodeKind::Directory),
        }
    }
}

/// Text of a scalar key, so unquoted `2024` or `true` work as names
fn scalar_text(key: &Yaml) -> Option<String> {
    match key {
        Yaml::Value(Scalar::String(text)) => Some(text.to_string()),
        Yaml::Value(Scalar::Integer(number)) => Some(number.to_string()),
        Yaml::Value(Scalar::FloatingPoint(number)) => Some(number.to_string()),
        Yaml::Value(Scalar::Boolean(flag)) => Some(flag.to_string()),
        _ => None,
    }
}

impl TryFrom<&str> for Layout {
    type Error = LayoutError;

    fn try_from(contents: &str) -> Result<Self, Self::Error> {
        let documents = Yaml::load_from_str(contents).context(ParseSnafu)?;
        let document = documents.first().context(MalformedLayoutSnafu)?;

        let top_level = document.as_mapping().context(TopLevelNotMapSnafu)?;

        let entries = match top_level.get(&Yaml::Value(Scalar::String(Cow::Borrowed("tree")))) {
            None | Some(Yaml::Value(Scalar::Null)) => Vec::new(),
            Some(tree) => {
                let mapping = tree.as_mapping().context(TreeNotMapSnafu)?;
                Self::parse_entries(mapping, "/")?
            }
        };

        Ok(Layout { entries })
    }
}

#[derive(Debug, Snafu)]
pub enum LayoutError {
    #[snafu(display("Failed to read the layout file: {}", file_path.display()))]
    ReadError {
        file_path: PathBuf,
        source: std::io::Error,
    },
    #[snafu(display("Failed to parse the layout file"))]
    ParseError { source: saphyr::ScanError },
    #[snafu(display("Improperly formatted layout file"))]
    MalformedLayout,
    #[snafu(display("Top level of layout should be a map"))]
    TopLevelNotMap,
    #[snafu(display("Tree section should be a map"))]
    TreeNotMap,
    #[snafu(display("Entry '{}' must be a map (directory) or null (file)", path))]
    InvalidEntry { path: String },
    #[snafu(display("Entry '{}' is defined more than once", path))]
    DuplicateEntry { path: String },
    #[snafu(display("Failed to build the tree from the layout"))]
    ApplyError { source: FileTreeError },
}
