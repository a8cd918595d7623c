use clap::Parser;
use muddy::cli::Args;
use std::ffi::OsString;
use std::path::PathBuf;

fn make_args(args: &[&str]) -> Vec<OsString> {
    let mut res = vec![OsString::from("muddy")];
    res.extend(args.iter().map(OsString::from));
    res
}

#[test]
fn test_defaults_to_current_directory() {
    let parsed = Args::try_parse_from(make_args(&[])).unwrap();

    assert_eq!(parsed.project_dir, PathBuf::from("."));
    assert!(!parsed.verbose);
}

#[test]
fn test_project_dir() {
    let parsed = Args::try_parse_from(make_args(&["./my-package"])).unwrap();
    assert_eq!(parsed.project_dir, PathBuf::from("./my-package"));
}

#[test]
fn test_verbose_flags() {
    let parsed = Args::try_parse_from(make_args(&["-v", "pkg"])).unwrap();
    assert!(parsed.verbose);

    let parsed = Args::try_parse_from(make_args(&["--verbose"])).unwrap();
    assert!(parsed.verbose);
}

#[test]
fn test_too_many_args() {
    assert!(Args::try_parse_from(make_args(&["one", "two"])).is_err());
}

#[test]
fn test_unknown_flag() {
    assert!(Args::try_parse_from(make_args(&["--force"])).is_err());
}
