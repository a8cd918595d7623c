//! Copies `src/resources/` into the package workspace.
//!
//! Every directory level fans out over its entries in parallel and each
//! subdirectory starts a fan-out of its own. Failures are collected per entry
//! and reported together once the whole tree has been walked.

use log::{debug, info, warn};
use rayon::prelude::*;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::config::Mfile;
use crate::constants::{ICON_DIR, RESOURCES_DIR};
use crate::error::Result;
use crate::pipeline::settle;

/// Copies the icon and every resource into `work_dir`.
///
/// # Returns
/// * `Result<usize>` - Number of files copied, icon excluded
///
/// # Errors
/// * `Error::StageError` naming every resource that could not be copied
pub fn process_resources(src_dir: &Path, work_dir: &Path, mfile: &Mfile) -> Result<usize> {
    let resources = src_dir.join(RESOURCES_DIR);
    if !resources.is_dir() {
        warn!("No such directory '{RESOURCES_DIR}'");
        return Ok(0);
    }

    if let Some(icon) = mfile.icon.as_deref().filter(|icon| !icon.is_empty()) {
        route_icon(&resources, work_dir, icon)?;
    }

    let copied = settle("Copying resources", copy_dir(&resources, work_dir))?;
    info!("Copied {} resource file(s)", copied.len());
    Ok(copied.len())
}

/// Places the package icon at `.mudlet/Icon/<icon>` inside the workspace.
pub fn route_icon(resources: &Path, work_dir: &Path, icon: &str) -> Result<Option<PathBuf>> {
    let source = resources.join(icon);
    if !source.is_file() {
        warn!("No such icon file '{icon}'");
        return Ok(None);
    }

    let icon_dir = ICON_DIR.iter().fold(work_dir.to_path_buf(), |dir, part| dir.join(part));
    fs::create_dir_all(&icon_dir)?;
    let file_name = source.file_name().unwrap_or(icon.as_ref());
    let target = icon_dir.join(file_name);
    fs::copy(&source, &target)?;
    debug!("Icon copied to {}", target.display());
    Ok(Some(target))
}

/// Recursively copies the contents of `from` into `to`.
///
/// Returns one outcome per file, keyed by its source path; nothing is
/// abandoned when a sibling fails.
pub fn copy_dir(from: &Path, to: &Path) -> Vec<(String, Result<PathBuf>)> {
    let entries: Vec<io::Result<PathBuf>> = match fs::read_dir(from) {
        Ok(entries) => entries.map(|entry| entry.map(|entry| entry.path())).collect(),
        Err(e) => return vec![(from.display().to_string(), Err(e.into()))],
    };

    entries
        .into_par_iter()
        .flat_map_iter(|entry| match entry {
            Ok(entry) => copy_entry(&entry, to),
            Err(e) => vec![(from.display().to_string(), Err(e.into()))],
        })
        .collect()
}

fn copy_entry(entry: &Path, to: &Path) -> Vec<(String, Result<PathBuf>)> {
    let Some(name) = entry.file_name() else {
        return Vec::new();
    };
    let target = to.join(name);

    if entry.is_dir() {
        return match fs::create_dir_all(&target) {
            Ok(()) => copy_dir(entry, &target),
            Err(e) => vec![(entry.display().to_string(), Err(e.into()))],
        };
    }

    let outcome = fs::copy(entry, &target).map(|_| target).map_err(Into::into);
    vec![(entry.display().to_string(), outcome)]
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_copy_dir_nested() {
        let temp = TempDir::new().unwrap();
        let from = temp.path().join("resources");
        let to = temp.path().join("work");
        fs::create_dir_all(from.join("sounds")).unwrap();
        fs::create_dir_all(&to).unwrap();
        fs::write(from.join("a.txt"), "a").unwrap();
        fs::write(from.join("sounds").join("ding.wav"), "wav").unwrap();

        let copied = settle("Copying resources", copy_dir(&from, &to)).unwrap();
        assert_eq!(copied.len(), 2);
        assert_eq!(fs::read_to_string(to.join("sounds").join("ding.wav")).unwrap(), "wav");
    }

    #[test]
    fn test_copy_failures_are_reported() {
        let temp = TempDir::new().unwrap();
        let from = temp.path().join("resources");
        fs::create_dir_all(&from).unwrap();
        fs::write(from.join("a.txt"), "a").unwrap();
        fs::write(from.join("b.txt"), "b").unwrap();

        let outcomes = copy_dir(&from, &temp.path().join("missing"));
        let err = settle("Copying resources", outcomes).unwrap_err();
        assert_eq!(err.failed_branches().len(), 2);

        let outcomes = copy_dir(&temp.path().join("absent"), temp.path());
        assert_eq!(outcomes.len(), 1);
        assert!(outcomes[0].1.is_err());
    }
}
