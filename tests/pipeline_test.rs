use std::fs::{self, File};
use std::path::Path;

use muddy::error::Error;
use muddy::kind::Kind;
use muddy::pipeline::{build, process_kinds, BuildOptions};
use tempfile::TempDir;

fn write(root: &Path, relative: &str, content: &str) {
    let path = root.join(relative);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, content).unwrap();
}

fn project(mfile: &str) -> TempDir {
    let temp = TempDir::new().unwrap();
    write(temp.path(), "mfile", mfile);
    fs::create_dir_all(temp.path().join("src")).unwrap();
    temp
}

fn archive_entries(path: &Path) -> Vec<String> {
    let archive = zip::ZipArchive::new(File::open(path).unwrap()).unwrap();
    let mut names: Vec<String> = archive.file_names().map(str::to_string).collect();
    names.sort();
    names
}

#[test_log::test]
fn test_full_build() {
    let temp = project(
        r#"{"package": "Demo", "version": "1.0", "author": "me", "icon": "icon.png", "outputFile": true}"#,
    );
    let root = temp.path();
    write(root, "src/aliases/aliases.json", r#"[{"name": "Hello", "regex": "^hi$"}]"#);
    write(root, "src/aliases/Hello.lua", "send('hi')");
    write(root, "src/triggers/Group/triggers.json", r#"[{"name": "T", "script": "print('@PKGNAME@ @VERSION@')"}]"#);
    write(root, "src/resources/icon.png", "png");
    write(root, "src/resources/sounds/ding.wav", "wav");

    let report = build(&BuildOptions::new(root)).unwrap();

    assert_eq!(report.package, "Demo");
    assert_eq!(report.archive, root.join("Demo.mpackage"));
    assert_eq!(report.module_count(Kind::Aliases), 1);
    assert_eq!(report.module_count(Kind::Triggers), 2);
    assert_eq!(report.module_count(Kind::Keys), 0);
    assert_eq!(report.resource_count, 2);

    let xml = fs::read_to_string(&report.xml).unwrap();
    assert!(xml.starts_with("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n<!DOCTYPE MudletPackage>\n"));
    assert!(xml.contains("<script>send('hi')</script>"));
    assert!(xml.contains("<script>print('Demo 1.0')</script>"));
    assert!(xml.contains("<TriggerGroup isActive=\"yes\" isFolder=\"yes\" isTempTrigger=\"no\""));
    assert!(xml.contains("<KeyPackage/>"));

    let entries = archive_entries(&report.archive);
    for expected in [".mudlet/Icon/icon.png", "Demo.xml", "config.lua", "icon.png", "sounds/ding.wav"] {
        assert!(entries.iter().any(|e| e == expected), "missing {expected} in {entries:?}");
    }

    let manifest: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(report.manifest.unwrap()).unwrap()).unwrap();
    assert_eq!(manifest["name"], "Demo");
    assert_eq!(manifest["path"], report.archive.display().to_string());
}

#[test]
fn test_config_lua_in_archive() {
    let temp = project(r#"{"package": "Demo", "version": "2.0", "title": "A demo"}"#);
    let report = build(&BuildOptions::new(temp.path())).unwrap();

    let mut archive = zip::ZipArchive::new(File::open(&report.archive).unwrap()).unwrap();
    let mut config = String::new();
    std::io::Read::read_to_string(&mut archive.by_name("config.lua").unwrap(), &mut config).unwrap();

    assert!(config.starts_with("mpackage = [[Demo]]\n"));
    assert!(config.contains("version = [[2.0]]\n"));
    assert!(config.contains("title = [[A demo]]\n"));
    assert!(config.contains("created = [["));
    assert!(report.manifest.is_none());
}

#[test]
fn test_rebuild_replaces_archive() {
    let temp = project(r#"{"package": "Demo"}"#);
    fs::write(temp.path().join("Demo.mpackage"), "stale").unwrap();

    let report = build(&BuildOptions::new(temp.path())).unwrap();
    assert!(archive_entries(&report.archive).contains(&"Demo.xml".to_string()));
}

#[test_log::test]
fn test_failures_are_collected_across_kinds() {
    let temp = project(r#"{"package": "Demo"}"#);
    let root = temp.path();
    write(root, "src/aliases/aliases.json", "[{broken");
    write(root, "src/scripts/scripts.json", r#"[{"name": "Start Up"}]"#);
    write(root, "src/scripts/Start_Up.lua", "start_up()");
    write(root, "src/triggers/triggers.json", r#"[{"name": "bad", "triggerType": 9}]"#);

    let outcomes = process_kinds(&root.join("src"));
    let branches: Vec<&str> = outcomes.iter().map(|(branch, _)| branch.as_str()).collect();
    assert_eq!(branches, ["aliases", "keys", "scripts", "timers", "triggers"]);
    assert!(outcomes[0].1.is_err());
    assert!(outcomes[4].1.is_err());

    let scripts = outcomes[2].1.as_ref().unwrap();
    assert_eq!(scripts.module_count, 1);
    assert!(scripts.package.render().contains("<script>start_up()</script>"));

    let err = build(&BuildOptions::new(root)).unwrap_err();

    assert!(matches!(err, Error::StageError { total: 5, .. }));
    assert_eq!(err.failed_branches(), vec!["aliases", "triggers"]);
    assert!(!root.join("Demo.mpackage").exists());
    assert!(!root.join("Demo.xml").exists());
}

#[test]
fn test_missing_project_parts() {
    let temp = TempDir::new().unwrap();

    let err = build(&BuildOptions::new(temp.path().join("nope"))).unwrap_err();
    assert!(matches!(err, Error::ProjectDirectoryNotFound { .. }));

    let err = build(&BuildOptions::new(temp.path())).unwrap_err();
    assert!(matches!(err, Error::MissingMetadataError { .. }));

    write(temp.path(), "mfile", r#"{"package": "Demo"}"#);
    let err = build(&BuildOptions::new(temp.path())).unwrap_err();
    assert!(matches!(err, Error::MissingSourceDirectoryError { .. }));
}

#[test]
fn test_readme_becomes_description() {
    let temp = project(r#"{"package": "Demo"}"#);
    write(temp.path(), "README.md", "Hello world");

    let report = build(&BuildOptions::new(temp.path())).unwrap();
    let mut archive = zip::ZipArchive::new(File::open(&report.archive).unwrap()).unwrap();
    let mut config = String::new();
    std::io::Read::read_to_string(&mut archive.by_name("config.lua").unwrap(), &mut config).unwrap();

    assert!(config.contains("description = [[Hello world]]"));
}

#[test]
fn test_relative_project_dir_reports_absolute_paths() {
    let temp = project(r#"{"package": "Demo", "outputFile": true}"#);
    let root = temp.path().canonicalize().unwrap();
    let previous = std::env::current_dir().unwrap();

    std::env::set_current_dir(&root).unwrap();
    let report = build(&BuildOptions::new("."));
    std::env::set_current_dir(previous).unwrap();
    let report = report.unwrap();

    assert!(report.archive.is_absolute());
    assert!(report.xml.is_absolute());
    assert!(report.archive.starts_with(&root));

    let manifest: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(report.manifest.unwrap()).unwrap()).unwrap();
    let path = manifest["path"].as_str().unwrap();
    assert!(Path::new(path).is_absolute(), "relative manifest path {path}");
    assert!(Path::new(path).is_file());
}
