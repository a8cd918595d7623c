//! Maps definition files onto a tree mirroring the directory layout below `src/`.
//!
//! Nodes are stored in an arena and addressed by [`NodeId`]. Children are kept
//! in insertion order and are unique by name; parents are plain back-indices.
//! Definition files located directly at the kind root hang off a distinguished
//! empty-named child of the root, never off the root itself.

use indexmap::IndexMap;
use log::debug;
use std::ops::Range;
use std::path::{Component, Path, PathBuf};

use crate::kind::Kind;
use crate::loader::{Definition, DefinitionFile};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

impl NodeId {
    pub fn index(self) -> usize {
        self.0
    }
}

#[derive(Debug, Clone, Default)]
pub struct PackageNode {
    name: String,
    children: IndexMap<String, NodeId>,
    definitions: Vec<Definition>,
    /// Each attached file with the span of `definitions` it contributed
    sources: Vec<(PathBuf, Range<usize>)>,
    parent: Option<NodeId>,
}

impl PackageNode {
    fn new(name: &str, parent: Option<NodeId>) -> Self {
        Self { name: name.to_string(), parent, ..Self::default() }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn children(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.children.values().copied()
    }

    pub fn child(&self, name: &str) -> Option<NodeId> {
        self.children.get(name).copied()
    }

    pub fn definitions(&self) -> &[Definition] {
        &self.definitions
    }

    /// The definition files attached at this node, in attach order.
    pub fn files(&self) -> impl Iterator<Item = &Path> + '_ {
        self.sources.iter().map(|(file, _)| file.as_path())
    }

    /// Attached files paired with the indices of the definitions each one holds.
    pub fn sources(&self) -> &[(PathBuf, Range<usize>)] {
        &self.sources
    }

    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }
}

/// The per-kind tree of definition files.
#[derive(Debug, Clone)]
pub struct PackageTree {
    kind: Kind,
    src_dir: PathBuf,
    nodes: Vec<PackageNode>,
}

impl PackageTree {
    pub const ROOT: NodeId = NodeId(0);

    pub fn new<P: AsRef<Path>>(kind: Kind, src_dir: P) -> Self {
        Self {
            kind,
            src_dir: src_dir.as_ref().to_path_buf(),
            nodes: vec![PackageNode::new("", None)],
        }
    }

    /// Builds the tree for `files`, in order.
    pub fn build<P: AsRef<Path>>(kind: Kind, src_dir: P, files: Vec<DefinitionFile>) -> Self {
        let mut tree = Self::new(kind, src_dir);
        for file in files {
            let trail = tree.trail(&file.path);
            debug!("Placing {} at [{}]", file.path.display(), trail.join("/"));
            tree.attach(&trail, &file.path, file.definitions);
        }
        tree
    }

    /// Directory segments between the kind root and the parent of `file`.
    ///
    /// The scan root is `src/`; a leading segment named after the kind
    /// (`src/aliases/...`) is the kind root itself and is dropped.
    pub fn trail(&self, file: &Path) -> Vec<String> {
        let parent = file.parent().unwrap_or(Path::new(""));
        let mut trail: Vec<String> = parent
            .strip_prefix(&self.src_dir)
            .map(|relative| {
                relative
                    .components()
                    .filter_map(|component| match component {
                        Component::Normal(segment) => Some(segment.to_string_lossy().into_owned()),
                        _ => None,
                    })
                    .collect()
            })
            .unwrap_or_default();

        if trail.first().map(String::as_str) == Some(self.kind.plural()) {
            trail.remove(0);
        }
        trail
    }

    /// Walks `trail` from the root, creating missing nodes, and appends
    /// `definitions` at the final node. An empty trail lands on the
    /// empty-named top-level child.
    pub fn attach(&mut self, trail: &[String], file: &Path, definitions: Vec<Definition>) -> NodeId {
        let node = if trail.is_empty() {
            self.child_or_insert(Self::ROOT, "")
        } else {
            trail.iter().fold(Self::ROOT, |node, segment| self.child_or_insert(node, segment))
        };

        let target = &mut self.nodes[node.0];
        let start = target.definitions.len();
        target.definitions.extend(definitions);
        let span = start..target.definitions.len();
        target.sources.push((file.to_path_buf(), span));
        node
    }

    fn child_or_insert(&mut self, parent: NodeId, name: &str) -> NodeId {
        if let Some(existing) = self.nodes[parent.0].child(name) {
            return existing;
        }
        let id = NodeId(self.nodes.len());
        self.nodes.push(PackageNode::new(name, Some(parent)));
        self.nodes[parent.0].children.insert(name.to_string(), id);
        id
    }

    pub fn kind(&self) -> Kind {
        self.kind
    }

    pub fn src_dir(&self) -> &Path {
        &self.src_dir
    }

    pub fn node(&self, id: NodeId) -> &PackageNode {
        &self.nodes[id.0]
    }

    pub(crate) fn definitions_mut(&mut self, id: NodeId) -> &mut Vec<Definition> {
        &mut self.nodes[id.0].definitions
    }

    /// Follows named children from the root.
    pub fn find(&self, path: &[&str]) -> Option<NodeId> {
        path.iter().try_fold(Self::ROOT, |node, name| self.node(node).child(name))
    }

    /// Ancestors of `id` that carry a name, the node itself included.
    pub fn named_depth(&self, id: NodeId) -> usize {
        std::iter::successors(Some(id), |current| self.node(*current).parent)
            .filter(|current| !self.node(*current).name.is_empty())
            .count()
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.len() == 1
    }

    /// Total number of definitions attached anywhere in the tree.
    pub fn definition_count(&self) -> usize {
        self.nodes.iter().map(|node| node.definitions.len()).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn file(path: &str) -> DefinitionFile {
        DefinitionFile { path: PathBuf::from(path), definitions: Vec::new() }
    }

    #[test]
    fn test_trail_drops_kind_root() {
        let tree = PackageTree::new(Kind::Aliases, "/p/src");
        assert_eq!(tree.trail(Path::new("/p/src/aliases/a/b/aliases.json")), ["a", "b"]);
        assert_eq!(tree.trail(Path::new("/p/src/other/aliases.json")), ["other"]);
        assert!(tree.trail(Path::new("/p/src/aliases/aliases.json")).is_empty());
        assert!(tree.trail(Path::new("/p/src/aliases.json")).is_empty());
    }

    #[test]
    fn test_loose_file_uses_empty_child() {
        let tree = PackageTree::build(Kind::Keys, "/p/src", vec![file("/p/src/keys.json")]);
        let loose = tree.node(PackageTree::ROOT).child("").unwrap();

        assert_ne!(loose, PackageTree::ROOT);
        assert_eq!(tree.node(loose).files().collect::<Vec<_>>(), [Path::new("/p/src/keys.json")]);
        assert_eq!(tree.node(PackageTree::ROOT).files().count(), 0);
    }

    #[test]
    fn test_child_order_is_insertion_order() {
        let tree = PackageTree::build(
            Kind::Timers,
            "/p/src",
            vec![
                file("/p/src/timers/zeta/timers.json"),
                file("/p/src/timers/alpha/timers.json"),
                file("/p/src/timers/zeta/inner/timers.json"),
            ],
        );
        let names: Vec<_> = tree
            .node(PackageTree::ROOT)
            .children()
            .map(|id| tree.node(id).name().to_string())
            .collect();

        assert_eq!(names, ["zeta", "alpha"]);
        assert!(tree.find(&["zeta", "inner"]).is_some());
    }

    #[test]
    fn test_sources_track_each_file_span() {
        let mut tree = PackageTree::new(Kind::Keys, "/p/src");
        let trail = vec!["Combat".to_string()];
        let one = Definition::new();
        tree.attach(&trail, Path::new("/p/src/Combat/keys.json"), vec![one.clone(), one.clone()]);
        let node = tree.attach(&trail, Path::new("/p/src/keys/Combat/keys.json"), vec![one]);

        let spans: Vec<_> = tree.node(node).sources().iter().map(|(_, span)| span.clone()).collect();
        assert_eq!(spans, [0..2, 2..3]);
        assert_eq!(tree.node(node).definitions().len(), 3);
    }
}
