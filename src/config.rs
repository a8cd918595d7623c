//! Project metadata handling.
//! This module loads the `mfile` descriptor of a project and derives the
//! generated `config.lua` and the optional `.output` manifest from it.

use chrono::Utc;
use log::{debug, info};
use serde::{de, Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};

use crate::constants::{ARCHIVE_EXTENSION, MFILE, OUTPUT_MANIFEST, README_FILE};
use crate::error::{Error, Result};

/// Metadata fields mapped into `config.lua`, as `(mfile field, config key)`.
pub const MFILE_TO_CONFIG: [(&str, &str); 5] = [
    ("package", "mpackage"),
    ("author", "author"),
    ("icon", "icon"),
    ("description", "description"),
    ("version", "version"),
];

/// Reads a string, number or boolean as text; `null` counts as absent.
fn scalar_string<'de, D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Option<String>, D::Error> {
    match Option::<Value>::deserialize(deserializer)? {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) => Ok(Some(s)),
        Some(Value::Number(n)) => Ok(Some(n.to_string())),
        Some(Value::Bool(b)) => Ok(Some(b.to_string())),
        Some(other) => Err(de::Error::custom(format!("expected a string or number, found {other}"))),
    }
}

/// The project's metadata record. Immutable once read.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Mfile {
    /// Unique package identifier, also the archive's base name
    pub package: String,
    /// A string or a number such as `1.2`
    #[serde(default, deserialize_with = "scalar_string")]
    pub version: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub author: Option<String>,
    /// Icon file name inside `src/resources/`
    #[serde(default)]
    pub icon: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub dependencies: Vec<String>,
    /// Write the `.output` manifest after the build
    #[serde(default)]
    pub output_file: bool,
}

impl Mfile {
    /// Parses and validates an `mfile`.
    ///
    /// # Errors
    /// * `Error::ConfigError` if the content is not valid metadata or `package` is empty
    pub fn parse(content: &str) -> Result<Self> {
        let mfile: Mfile = serde_json::from_str(content)
            .map_err(|e| Error::ConfigError(format!("Invalid mfile: {e}")))?;

        if mfile.package.trim().is_empty() {
            return Err(Error::ConfigError("mfile 'package' must not be empty".to_string()));
        }
        if mfile.package.contains(['/', '\\']) || mfile.package.starts_with('.') {
            return Err(Error::ConfigError(format!(
                "mfile 'package' must be a plain file name, got '{}'",
                mfile.package
            )));
        }
        Ok(mfile)
    }

    /// Value of a metadata field by its `mfile` name.
    pub fn field(&self, key: &str) -> Option<String> {
        match key {
            "package" => Some(self.package.clone()),
            "version" => self.version.clone(),
            "title" => self.title.clone(),
            "author" => self.author.clone(),
            "icon" => self.icon.clone(),
            "description" => self.description.clone(),
            "dependencies" if !self.dependencies.is_empty() => Some(self.dependencies.join(",")),
            _ => None,
        }
    }

    pub fn version(&self) -> &str {
        self.version.as_deref().unwrap_or_default()
    }

    /// `<package>.mpackage`
    pub fn archive_name(&self) -> String {
        format!("{}.{ARCHIVE_EXTENSION}", self.package)
    }

    /// `<package>.xml`
    pub fn xml_name(&self) -> String {
        format!("{}.xml", self.package)
    }

    /// Renders `config.lua`: one `key = [[value]]` line per mapped field,
    /// then `title` and `dependencies` when set, then the creation stamp.
    pub fn config_lua(&self, created: &str) -> String {
        let mut lines: Vec<String> = MFILE_TO_CONFIG
            .iter()
            .map(|(field, key)| format!("{key} = [[{}]]", self.field(field).unwrap_or_default()))
            .collect();

        for key in ["title", "dependencies"] {
            if let Some(value) = self.field(key).filter(|v| !v.is_empty()) {
                lines.push(format!("{key} = [[{value}]]"));
            }
        }

        lines.push(format!("created = [[{created}]]"));
        lines.join("\n")
    }
}

/// Reads the `mfile` of `project_dir`.
///
/// An absent or empty description is taken from the project's `README.md`.
///
/// # Errors
/// * `Error::MissingMetadataError` if there is no `mfile`
/// * `Error::ConfigError` if it cannot be parsed
pub fn load_mfile<P: AsRef<Path>>(project_dir: P) -> Result<Mfile> {
    let project_dir = project_dir.as_ref();
    let path = project_dir.join(MFILE);
    if !path.is_file() {
        return Err(Error::MissingMetadataError { path: path.display().to_string() });
    }

    info!("Pulling metadata from {MFILE}.");
    let mut mfile = Mfile::parse(&fs::read_to_string(&path)?)?;

    if mfile.description.as_deref().unwrap_or_default().is_empty() {
        let readme = project_dir.join(README_FILE);
        if readme.is_file() {
            debug!("Using {} as description", readme.display());
            mfile.description = Some(fs::read_to_string(readme)?);
        }
    }

    if mfile.output_file {
        info!(
            "Will write {OUTPUT_MANIFEST} file at root of project with json object \
             containing package name and file location at build end."
        );
    }

    debug!("{mfile:#?}");
    Ok(mfile)
}

/// UTC creation stamp in the form `2024-01-31T12:00:00+0000`.
pub fn created_timestamp() -> String {
    Utc::now().format("%Y-%m-%dT%H:%M:%S+0000").to_string()
}

/// Contents of the `.output` manifest.
#[derive(Debug, Serialize)]
pub struct OutputManifest<'a> {
    pub name: &'a str,
    pub path: String,
}

/// Writes the `.output` manifest naming the package and its archive.
pub fn write_output_manifest(project_dir: &Path, mfile: &Mfile, archive: &Path) -> Result<PathBuf> {
    let manifest = OutputManifest { name: &mfile.package, path: archive.display().to_string() };
    let path = project_dir.join(OUTPUT_MANIFEST);
    fs::write(&path, serde_json::to_string(&manifest)?)?;
    info!("Wrote {}", path.display());
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_minimal_mfile() {
        let mfile = Mfile::parse(r#"{"package": "Foo"}"#).unwrap();
        assert_eq!(mfile.package, "Foo");
        assert_eq!(mfile.version(), "");
        assert!(!mfile.output_file);
        assert!(mfile.dependencies.is_empty());
    }

    #[test]
    fn test_package_is_required() {
        assert!(Mfile::parse(r#"{"version": "1.0"}"#).is_err());
        assert!(Mfile::parse(r#"{"package": " "}"#).is_err());
        assert!(Mfile::parse("not json").is_err());
    }

    #[test]
    fn test_numeric_version() {
        assert_eq!(Mfile::parse(r#"{"package": "Foo", "version": 1.2}"#).unwrap().version(), "1.2");
        assert_eq!(Mfile::parse(r#"{"package": "Foo", "version": 3}"#).unwrap().version(), "3");
        assert_eq!(Mfile::parse(r#"{"package": "Foo", "version": null}"#).unwrap().version(), "");
        assert!(Mfile::parse(r#"{"package": "Foo", "version": [1]}"#).is_err());
    }

    #[test]
    fn test_package_must_be_file_name() {
        for package in ["../x", "a/b", "a\\b", ".hidden", ".."] {
            let content = format!(r#"{{"package": "{}"}}"#, package.replace('\\', "\\\\"));
            assert!(Mfile::parse(&content).is_err(), "accepted {package}");
        }
        assert!(Mfile::parse(r#"{"package": "my-pkg_1.0"}"#).is_ok());
    }

    #[test]
    fn test_config_lua() {
        let mfile = Mfile::parse(
            r#"{"package": "Foo", "author": "me", "version": "1.2", "dependencies": ["a", "b"]}"#,
        )
        .unwrap();

        assert_eq!(
            mfile.config_lua("2024-01-01T00:00:00+0000"),
            "mpackage = [[Foo]]\nauthor = [[me]]\nicon = [[]]\ndescription = [[]]\n\
             version = [[1.2]]\ndependencies = [[a,b]]\ncreated = [[2024-01-01T00:00:00+0000]]"
        );
    }

    #[test]
    fn test_created_timestamp_shape() {
        let stamp = created_timestamp();
        assert_eq!(stamp.len(), "2024-01-01T00:00:00+0000".len());
        assert!(stamp.ends_with("+0000"));
    }
}
