use std::fmt;

use indextree::{Arena, NodeEdge, NodeId};
use snafu::{OptionExt, ensure};
use tracing::{debug, warn};

use super::error::{AlreadyExistsSnafu, DirectoryNotFoundSnafu, NotFoundSnafu};
use super::{FileTreeError, Node, NodeKind};

/// Name of the root directory
pub const ROOT_NAME: &str = "/";

const INDENT: &str = "  ";

/// Directory hierarchy plus the cursor that relative operations act on.
///
/// The root directory is created once and lives as long as the tree. Every
/// other node is owned by its parent through the arena, and `current` always
/// points at a live directory.
#[derive(Debug)]
pub struct FileTree {
    arena: Arena<Node>,
    root: NodeId,
    current: NodeId,
}

impl FileTree {
    pub fn new() -> Self {
        let mut arena = Arena::new();
        let root = arena.new_node(Node::directory(ROOT_NAME));
        Self {
            arena,
            root,
            current: root,
        }
    }

    /// Creates an empty directory in the current directory.
    /// Only an existing directory with the same name is a conflict.
    pub fn mkdir(&mut self, name: &str) -> Result<(), FileTreeError> {
        self.create(Node::directory(name))
    }

    /// Creates a file in the current directory.
    /// Only an existing file with the same name is a conflict.
    pub fn touch(&mut self, name: &str) -> Result<(), FileTreeError> {
        self.create(Node::file(name))
    }

    fn create(&mut self, node: Node) -> Result<(), FileTreeError> {
        ensure!(
            self.find_child(|child| child.matches(node.name(), node.kind()))
                .is_none(),
            AlreadyExistsSnafu {
                name: node.name(),
                kind: node.kind(),
            }
        );

        debug!(
            "Creating {} '{}' in {}",
            node.kind(),
            node.name(),
            self.pwd()
        );
        let id = self.arena.new_node(node);
        self.current.append(id, &mut self.arena);
        Ok(())
    }

    /// Lists the direct children of the current directory, one per line
    pub fn ls(&self) -> String {
        self.current
            .children(&self.arena)
            .fold(String::new(), |mut listing, id| {
                listing.push_str(&self.node(id).display_name());
                listing.push('\n');
                listing
            })
    }

    /// Moves the cursor. Accepts `/`, `..` or the name of a direct child
    /// directory; no multi-segment paths.
    pub fn cd(&mut self, path: &str) -> Result<(), FileTreeError> {
        self.current = match path {
            ROOT_NAME => self.root,
            ".." => self.arena[self.current].parent().unwrap_or(self.current),
            name => self
                .find_child(|child| child.matches(name, NodeKind::Directory))
                .context(DirectoryNotFoundSnafu { name })?,
        };
        debug!("Changed directory to {}", self.pwd());
        Ok(())
    }

    /// Removes the first direct child with this name, whatever its kind,
    /// together with everything below it.
    pub fn rm(&mut self, name: &str) -> Result<(), FileTreeError> {
        let target = self
            .find_child(|child| child.name() == name)
            .context(NotFoundSnafu { name })?;

        // Unreachable through single-segment names, but the cursor must
        // never be left inside a freed subtree.
        if self.current.ancestors(&self.arena).any(|id| id == target) {
            let parent = self.arena[target].parent().unwrap_or(self.root);
            warn!("Removing '{}' which contains the current directory", name);
            self.current = parent;
        }

        debug!(
            "Removing {} '{}' from {}",
            self.node(target).kind(),
            name,
            self.pwd()
        );
        target.remove_subtree(&mut self.arena);
        Ok(())
    }

    /// Depth-first pre-order search of the whole tree, root included
    pub fn find(&self, name: &str) -> Option<NodeRef<'_>> {
        self.root
            .descendants(&self.arena)
            .find(|id| self.node(*id).name() == name)
            .map(|id| self.node_ref(id))
    }

    /// Absolute path of the current directory, always ending in `/`
    pub fn pwd(&self) -> String {
        let mut path = self.absolute_path(self.current);
        path.push('/');
        path
    }

    /// Renders the whole hierarchy from the root, two spaces per level
    pub fn tree(&self) -> String {
        let mut rendered = String::new();
        let mut depth = 0usize;
        for edge in self.root.traverse(&self.arena) {
            match edge {
                NodeEdge::Start(id) => {
                    rendered.push_str(&INDENT.repeat(depth));
                    // root is already named "/"
                    if id == self.root {
                        rendered.push_str(ROOT_NAME);
                    } else {
                        rendered.push_str(&self.node(id).display_name());
                    }
                    rendered.push('\n');
                    depth += 1;
                }
                NodeEdge::End(_) => depth -= 1,
            }
        }
        rendered
    }

    pub fn root(&self) -> NodeRef<'_> {
        self.node_ref(self.root)
    }

    pub fn current(&self) -> NodeRef<'_> {
        self.node_ref(self.current)
    }

    /// Number of live nodes, root included
    pub fn len(&self) -> usize {
        self.root.descendants(&self.arena).count()
    }

    /// A tree always holds its root
    pub fn is_empty(&self) -> bool {
        false
    }

    fn node(&self, id: NodeId) -> &Node {
        self.arena[id].get()
    }

    fn node_ref(&self, id: NodeId) -> NodeRef<'_> {
        NodeRef { tree: self, id }
    }

    fn find_child(&self, predicate: impl Fn(&Node) -> bool) -> Option<NodeId> {
        self.current
            .children(&self.arena)
            .find(|id| predicate(self.node(*id)))
    }

    /// `/a/b` for a node named `b` under `a`, the empty string for the root
    fn absolute_path(&self, id: NodeId) -> String {
        let mut segments = id
            .ancestors(&self.arena)
            .take_while(|ancestor| *ancestor != self.root)
            .map(|ancestor| self.node(ancestor).name())
            .collect::<Vec<_>>();
        segments.reverse();

        segments.into_iter().fold(String::new(), |mut path, segment| {
            path.push('/');
            path.push_str(segment);
            path
        })
    }
}

impl Default for FileTree {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for FileTree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.tree())
    }
}

/// Borrowed handle to a node of a [`FileTree`]
#[derive(Debug, Clone, Copy)]
pub struct NodeRef<'a> {
    tree: &'a FileTree,
    id: NodeId,
}

impl<'a> NodeRef<'a> {
    pub fn name(&self) -> &'a str {
        self.tree.node(self.id).name()
    }

    pub fn kind(&self) -> NodeKind {
        self.tree.node(self.id).kind()
    }

    pub fn is_directory(&self) -> bool {
        self.kind().is_directory()
    }

    pub fn is_file(&self) -> bool {
        self.kind().is_file()
    }

    /// Direct children in creation order
    pub fn children(&self) -> impl Iterator<Item = NodeRef<'a>> + use<'a> {
        let tree = self.tree;
        self.id
            .children(&tree.arena)
            .map(move |id| tree.node_ref(id))
    }

    pub fn parent(&self) -> Option<NodeRef<'a>> {
        self.tree.arena[self.id]
            .parent()
            .map(|id| self.tree.node_ref(id))
    }

    /// Absolute path; directories end in `/`, files don't
    pub fn path(&self) -> String {
        let mut path = self.tree.absolute_path(self.id);
        if self.is_directory() {
            path.push('/');
        }
        path
    }
}
