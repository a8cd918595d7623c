use std::io;

use muddy::error::{BranchFailure, Error};

#[test]
fn test_error_conversion() {
    let io_err = io::Error::new(io::ErrorKind::NotFound, "file not found");
    let err: Error = io_err.into();

    match err {
        Error::IoError(_) => (),
        _ => panic!("Expected IoError variant"),
    }
}

#[test]
fn test_error_display() {
    let err = Error::ConfigError("invalid mfile".to_string());
    assert_eq!(err.to_string(), "Configuration error: invalid mfile.");

    let err = Error::ValidationError {
        kind: "trigger",
        name: "Prompt".to_string(),
        message: "triggerType must be between 0 and 7".to_string(),
    };
    assert_eq!(err.to_string(), "Invalid trigger 'Prompt': triggerType must be between 0 and 7.");
}

#[test]
fn test_stage_error_lists_every_branch() {
    let err = Error::StageError {
        stage: "Processing modules".to_string(),
        total: 5,
        failures: vec![
            BranchFailure {
                branch: "aliases".to_string(),
                error: Error::ConfigError("first".to_string()),
            },
            BranchFailure {
                branch: "timers".to_string(),
                error: Error::ConfigError("second".to_string()),
            },
        ],
    };

    assert_eq!(err.failed_branches(), vec!["aliases", "timers"]);
    assert_eq!(
        err.to_string(),
        "Processing modules failed in 2 of 5 branches: \
         [aliases] Configuration error: first.; [timers] Configuration error: second."
    );
}

#[test]
fn test_failed_branches_of_plain_error() {
    assert!(Error::ConfigError("x".to_string()).failed_branches().is_empty());
}
