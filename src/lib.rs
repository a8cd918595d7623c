//! Muddy builds Mudlet packages from a project directory.
//! It collects JSON definitions of aliases, keys, scripts, timers and triggers,
//! turns them into typed modules and writes a `.mpackage` archive holding the
//! package XML, the generated `config.lua` and the project's resources.

/// Zip archive writing for the package workspace
pub mod archive;

/// Command-line interface module for the Muddy application
pub mod cli;

/// Project metadata (`mfile`), `config.lua` and the `.output` manifest
pub mod config;

pub mod constants;

/// Error types and handling for the Muddy application
pub mod error;

/// Folder synthesis and module creation from a package tree
pub mod factory;

/// The five definition kinds and their naming conventions
pub mod kind;

/// Discovery and parsing of definition files
pub mod loader;

pub mod logger;

/// Typed module model and the arena that owns it
pub mod module;

/// Build orchestration
/// Runs every kind concurrently, then packages the results
pub mod pipeline;

/// Script file resolution for definitions without an inline script
pub mod resolver;

/// Resource and icon copying
pub mod resources;

/// Directory-mirroring tree of definitions
pub mod tree;

/// XML element model and document rendering
pub mod xml;
