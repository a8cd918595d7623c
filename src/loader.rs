//! Discovery and loading of JSON definition files.
//! Definition files are named after their kind (`aliases.json`, `keys.json`, ...)
//! and may live at any depth below `src/`.

use globset::Glob;
use log::{debug, info};
use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use crate::error::{Error, Result};
use crate::kind::Kind;
use crate::module::Flag;

/// One raw definition record as found in a definition file.
pub type Definition = serde_json::Map<String, Value>;

/// A definition file together with the records it holds.
#[derive(Debug, Clone, PartialEq)]
pub struct DefinitionFile {
    pub path: PathBuf,
    pub definitions: Vec<Definition>,
}

/// Finds every definition file of `kind` below `src_dir`, in file-name order.
///
/// # Arguments
/// * `src_dir` - The project's `src/` directory
/// * `kind` - Kind whose `<kind>.json` files are wanted
///
/// # Returns
/// * `Result<Vec<PathBuf>>` - Absolute paths of the matching files
pub fn scan(src_dir: &Path, kind: Kind) -> Result<Vec<PathBuf>> {
    let matcher = Glob::new(&kind.pattern())?.compile_matcher();
    let mut found = Vec::new();

    for entry in WalkDir::new(src_dir).sort_by_file_name() {
        let entry = entry?;
        if !entry.file_type().is_file() {
            continue;
        }
        let relative = entry.path().strip_prefix(src_dir).unwrap_or(entry.path());
        if matcher.is_match(relative) {
            info!("Found {}", relative.display());
            found.push(entry.path().to_path_buf());
        }
    }

    debug!("Scanned {} {} file(s)", found.len(), kind);
    Ok(found)
}

/// Parses the content of a definition file.
///
/// The content must be a JSON array of objects. Empty content and `null`
/// both yield no definitions.
pub fn parse_definitions(content: &str, path: &Path) -> Result<Vec<Definition>> {
    if content.trim().is_empty() {
        return Ok(Vec::new());
    }

    let definitions: Option<Vec<Definition>> = serde_json::from_str(content).map_err(|source| {
        Error::DefinitionParseError { path: path.display().to_string(), source }
    })?;

    Ok(normalize_boolean_values(definitions.unwrap_or_default()))
}

/// Rewrites top-level booleans into the host's `"yes"`/`"no"` encoding.
pub fn normalize_boolean_values(mut definitions: Vec<Definition>) -> Vec<Definition> {
    for definition in &mut definitions {
        for value in definition.values_mut() {
            if let Value::Bool(flag) = value {
                *value = Value::from(Flag::from(*flag).as_str());
            }
        }
    }
    definitions
}

pub fn load_definitions(path: &Path) -> Result<DefinitionFile> {
    let content = fs::read_to_string(path)?;
    let definitions = parse_definitions(&content, path)?;
    info!("Loaded {} ({} definition(s))", path.display(), definitions.len());
    Ok(DefinitionFile { path: path.to_path_buf(), definitions })
}

/// Scans for and loads every definition file of `kind`.
pub fn load_kind(src_dir: &Path, kind: Kind) -> Result<Vec<DefinitionFile>> {
    scan(src_dir, kind)?.iter().map(|path| load_definitions(path)).collect()
}
