//! Build orchestration.
//!
//! Each kind runs through its stages (scan, load, tree, scripts, modules, XML)
//! independently of the others, and all kinds run concurrently. A concurrent
//! stage only fails once every branch has settled, so one bad kind never hides
//! the outcome of the rest. Packaging happens in a scratch workspace that is
//! removed on every exit path.

use log::{debug, error, info};
use rayon::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};

use crate::archive::write_archive;
use crate::config::{created_timestamp, load_mfile, write_output_manifest, Mfile};
use crate::constants::{CONFIG_LUA, SRC_DIR, TEMP_PREFIX};
use crate::error::{BranchFailure, Error, Result};
use crate::factory::create_modules;
use crate::kind::Kind;
use crate::loader::load_kind;
use crate::resolver::resolve_scripts;
use crate::resources::process_resources;
use crate::tree::PackageTree;
use crate::xml::{document_element, package_element, render_document, substitute_placeholders, Element};

/// What to build.
#[derive(Debug, Clone)]
pub struct BuildOptions {
    /// Directory holding `mfile` and `src/`
    pub project_dir: PathBuf,
}

impl BuildOptions {
    pub fn new<P: Into<PathBuf>>(project_dir: P) -> Self {
        Self { project_dir: project_dir.into() }
    }
}

/// Result of processing a single kind.
#[derive(Debug)]
pub struct KindOutput {
    pub kind: Kind,
    /// The kind's `<…Package>` fragment
    pub package: Element,
    pub module_count: usize,
}

/// Summary of a finished build.
#[derive(Debug)]
pub struct BuildReport {
    pub package: String,
    pub archive: PathBuf,
    /// Copy of the package XML next to the archive
    pub xml: PathBuf,
    pub manifest: Option<PathBuf>,
    pub archive_size: u64,
    pub resource_count: usize,
    /// Modules per kind, in document order
    pub module_counts: Vec<(Kind, usize)>,
}

impl BuildReport {
    pub fn module_count(&self, kind: Kind) -> usize {
        self.module_counts.iter().find(|(k, _)| *k == kind).map_or(0, |(_, n)| *n)
    }
}

/// Collects the outcomes of a concurrent stage.
///
/// # Returns
/// * `Result<Vec<T>>` - Every successful value, in branch order, if no branch failed
///
/// # Errors
/// * `Error::StageError` carrying every failed branch
pub fn settle<T>(stage: &str, outcomes: Vec<(String, Result<T>)>) -> Result<Vec<T>> {
    let total = outcomes.len();
    let mut values = Vec::with_capacity(total);
    let mut failures = Vec::new();

    for (branch, outcome) in outcomes {
        match outcome {
            Ok(value) => values.push(value),
            Err(e) => {
                error!("{stage} [{branch}]: {e}");
                failures.push(BranchFailure { branch, error: e });
            }
        }
    }

    if failures.is_empty() {
        Ok(values)
    } else {
        Err(Error::StageError { stage: stage.to_string(), total, failures })
    }
}

fn stage<T>(kind: Kind, name: &str, run: impl FnOnce() -> Result<T>) -> Result<T> {
    debug!("[{kind}] {name}");
    run()
}

/// Runs every per-kind stage for `kind` in order.
pub fn process_kind(src_dir: &Path, kind: Kind) -> Result<KindOutput> {
    let files = stage(kind, "scan and load", || load_kind(src_dir, kind))?;
    let mut tree = stage(kind, "build tree", || Ok(PackageTree::build(kind, src_dir, files)))?;
    stage(kind, "resolve scripts", || resolve_scripts(&mut tree))?;
    let forest = stage(kind, "create modules", || create_modules(&tree))?;
    let package = stage(kind, "build xml", || Ok(package_element(kind, &forest)))?;

    Ok(KindOutput { kind, package, module_count: forest.len() })
}

/// Processes all kinds concurrently; one outcome per kind in document order.
pub fn process_kinds(src_dir: &Path) -> Vec<(String, Result<KindOutput>)> {
    Kind::ALL
        .par_iter()
        .map(|kind| (kind.to_string(), process_kind(src_dir, *kind)))
        .collect()
}

/// Renders the package document and fills in its placeholders.
pub fn assemble_document(mfile: &Mfile, packages: Vec<Element>) -> String {
    let document = render_document(&document_element(packages));
    substitute_placeholders(&document, &mfile.package, mfile.version())
}

fn validate_project(project_dir: &Path) -> Result<(Mfile, PathBuf)> {
    if !project_dir.is_dir() {
        return Err(Error::ProjectDirectoryNotFound {
            project_dir: project_dir.display().to_string(),
        });
    }

    let mfile = load_mfile(project_dir)?;

    let src_dir = project_dir.join(SRC_DIR);
    if !src_dir.is_dir() {
        return Err(Error::MissingSourceDirectoryError {
            project_dir: project_dir.display().to_string(),
        });
    }
    Ok((mfile, src_dir))
}

/// Builds the package for `options.project_dir`.
///
/// # Flow
/// 1. Validates the project and reads its metadata
/// 2. Processes every kind concurrently
/// 3. Writes the XML document and `config.lua` into a scratch workspace
/// 4. Copies resources into the workspace
/// 5. Archives the workspace to `<project>/<package>.mpackage`
/// 6. Writes the XML copy and, if requested, the `.output` manifest
///
/// Nothing is written to the project directory unless every kind succeeds.
/// Reported paths are absolute even when `project_dir` is relative.
pub fn build(options: &BuildOptions) -> Result<BuildReport> {
    let project_dir = std::path::absolute(&options.project_dir)?;
    let project_dir = project_dir.as_path();
    let (mfile, src_dir) = validate_project(project_dir)?;

    let outputs = settle("Processing modules", process_kinds(&src_dir))?;
    let (module_counts, packages): (Vec<_>, Vec<_>) =
        outputs.into_iter().map(|output| ((output.kind, output.module_count), output.package)).unzip();

    let workspace = tempfile::Builder::new().prefix(TEMP_PREFIX).tempdir()?;
    let work_dir = workspace.path().join("work");
    fs::create_dir_all(&work_dir)?;
    debug!("Workspace at {}", work_dir.display());

    let document = assemble_document(&mfile, packages);
    fs::write(work_dir.join(mfile.xml_name()), &document)?;
    info!("Wrote {}", mfile.xml_name());
    fs::write(work_dir.join(CONFIG_LUA), mfile.config_lua(&created_timestamp()))?;
    info!("Wrote {CONFIG_LUA}");

    let resource_count = process_resources(&src_dir, &work_dir, &mfile)?;

    let archive = project_dir.join(mfile.archive_name());
    let archive_size = write_archive(&work_dir, &archive)?;

    let xml = project_dir.join(mfile.xml_name());
    fs::write(&xml, &document)?;

    let manifest = if mfile.output_file {
        Some(write_output_manifest(project_dir, &mfile, &archive)?)
    } else {
        None
    };

    workspace.close()?;
    info!("Built {} at {}", mfile.package, archive.display());

    Ok(BuildReport {
        package: mfile.package,
        archive,
        xml,
        manifest,
        archive_size,
        resource_count,
        module_counts,
    })
}
