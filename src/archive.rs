//! Zip archive writing for the package workspace.

use log::{debug, info};
use std::fs::{self, File};
use std::io;
use std::path::{Component, Path};
use walkdir::WalkDir;
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

use crate::error::Result;

/// Archive entry name for `path` relative to `root`, always `/`-separated.
fn entry_name(root: &Path, path: &Path) -> String {
    path.strip_prefix(root)
        .unwrap_or(path)
        .components()
        .filter_map(|component| match component {
            Component::Normal(part) => Some(part.to_string_lossy().into_owned()),
            _ => None,
        })
        .collect::<Vec<_>>()
        .join("/")
}

/// Writes every file below `work_dir` into a fresh archive at `archive`.
///
/// An existing archive at that path is replaced.
///
/// # Returns
/// * `Result<u64>` - Size of the written archive in bytes
pub fn write_archive(work_dir: &Path, archive: &Path) -> Result<u64> {
    if archive.exists() {
        fs::remove_file(archive)?;
    }

    info!("Adding contents of '{}'", work_dir.display());
    let mut zip = ZipWriter::new(File::create(archive)?);
    let options = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);

    for entry in WalkDir::new(work_dir).min_depth(1).sort_by_file_name() {
        let entry = entry?;
        let name = entry_name(work_dir, entry.path());

        if entry.file_type().is_dir() {
            zip.add_directory(name, options)?;
        } else {
            debug!("Archiving {name}");
            zip.start_file(name, options)?;
            io::copy(&mut File::open(entry.path())?, &mut zip)?;
        }
    }
    zip.finish()?;

    let size = fs::metadata(archive)?.len();
    info!("'{}' written to disk ({} bytes)", archive.display(), size);
    Ok(size)
}
