//! Turns a [`PackageTree`] into a forest of typed modules.
//!
//! The pass is post-order: a node's children are realized first, then one
//! module per local definition. Every named directory with at least one module
//! below it is wrapped in exactly one synthesized folder module; empty or
//! unnamed levels stay transparent. The root itself is never wrapped.

use log::{debug, info};
use std::collections::HashMap;

use crate::error::Result;
use crate::kind::Kind;
use crate::module::{ModuleArena, ModuleId};
use crate::tree::{NodeId, PackageTree};

/// The realized modules of one kind.
#[derive(Debug)]
pub struct ModuleForest {
    kind: Kind,
    arena: ModuleArena,
    roots: Vec<ModuleId>,
    by_node: HashMap<NodeId, Vec<ModuleId>>,
}

impl ModuleForest {
    pub fn kind(&self) -> Kind {
        self.kind
    }

    pub fn arena(&self) -> &ModuleArena {
        &self.arena
    }

    /// Top-level modules, in tree order.
    pub fn roots(&self) -> &[ModuleId] {
        &self.roots
    }

    /// Modules created from the definitions attached at `node`.
    pub fn modules_at(&self, node: NodeId) -> &[ModuleId] {
        self.by_node.get(&node).map(Vec::as_slice).unwrap_or_default()
    }

    /// Number of modules, synthesized folders included.
    pub fn len(&self) -> usize {
        self.arena.len()
    }

    pub fn is_empty(&self) -> bool {
        self.arena.is_empty()
    }
}

/// Creates the module forest for `tree`.
///
/// # Errors
/// * `Error::ValidationError` if any definition violates its kind's schema
pub fn create_modules(tree: &PackageTree) -> Result<ModuleForest> {
    info!("Building tree for {}", tree.kind());

    let mut forest = ModuleForest {
        kind: tree.kind(),
        arena: ModuleArena::new(),
        roots: Vec::new(),
        by_node: HashMap::new(),
    };
    forest.roots = realize(tree, PackageTree::ROOT, &mut forest)?;
    Ok(forest)
}

fn realize(tree: &PackageTree, id: NodeId, forest: &mut ModuleForest) -> Result<Vec<ModuleId>> {
    let node = tree.node(id);
    let kind = tree.kind().module_kind();

    let mut collected = Vec::new();
    for child in node.children() {
        collected.extend(realize(tree, child, forest)?);
    }

    for definition in node.definitions() {
        let module = forest.arena.create(kind, definition)?;
        debug!("Adding {}", forest.arena[module]);
        forest.by_node.entry(id).or_default().push(module);
        collected.push(module);
    }

    if id == PackageTree::ROOT || node.name().is_empty() || collected.is_empty() {
        return Ok(collected);
    }

    let folder = forest.arena.create_folder(kind, node.name())?;
    for module in collected {
        forest.arena.add_child(folder, module)?;
    }
    Ok(vec![folder])
}
