//! Loads scripts referenced by name from files next to their definition file.

use log::{info, warn};
use regex::Regex;
use serde_json::Value;
use std::fs;
use std::sync::LazyLock;

use crate::constants::SCRIPT_EXTENSION;
use crate::error::Result;
use crate::loader::Definition;
use crate::module::Flag;
use crate::tree::{NodeId, PackageTree};

static WHITESPACE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("whitespace pattern is valid"));

/// File name a definition called `name` takes its script from.
///
/// ```
/// assert_eq!(muddy::resolver::script_file_name("Say Hello"), "Say_Hello.lua");
/// ```
pub fn script_file_name(name: &str) -> String {
    format!("{}.{SCRIPT_EXTENSION}", WHITESPACE.replace_all(name, "_"))
}

/// The name of a definition that should take its script from disk.
fn wants_script_file(definition: &Definition) -> Option<&str> {
    let name = definition.get("name").and_then(Value::as_str).filter(|n| !n.is_empty())?;
    let inline = definition.get("script").and_then(Value::as_str).unwrap_or("");
    let is_folder = definition.get("isFolder").and_then(Value::as_str) == Some(Flag::Yes.as_str());

    (inline.is_empty() && !is_folder).then_some(name)
}

/// Resolves scripts for every node of `tree`, depth first.
///
/// A missing script file is not an error: it is logged and the script is left empty.
///
/// # Returns
/// * `Result<usize>` - Number of scripts read from disk
pub fn resolve_scripts(tree: &mut PackageTree) -> Result<usize> {
    resolve_node(tree, PackageTree::ROOT)
}

fn resolve_node(tree: &mut PackageTree, id: NodeId) -> Result<usize> {
    let children: Vec<NodeId> = tree.node(id).children().collect();
    let mut resolved = 0;
    for child in children {
        resolved += resolve_node(tree, child)?;
    }

    let sources = tree.node(id).sources().to_vec();
    let kind = tree.kind();
    let src_dir = tree.src_dir().to_path_buf();

    for (file, span) in sources {
        let Some(dir) = file.parent() else {
            continue;
        };
        for definition in &mut tree.definitions_mut(id)[span] {
            let Some(name) = wants_script_file(definition).map(str::to_string) else {
                continue;
            };
            let script_file = dir.join(script_file_name(&name));
            let shown = script_file
                .strip_prefix(&src_dir)
                .unwrap_or(script_file.as_path())
                .display()
                .to_string();

            let script = if script_file.is_file() {
                info!("Using script from {shown} for {} '{name}'", kind.singular());
                resolved += 1;
                fs::read_to_string(&script_file)?
            } else {
                warn!("{shown} does not exist");
                String::new()
            };
            definition.insert("script".to_string(), Value::String(script));
        }
    }

    Ok(resolved)
}
