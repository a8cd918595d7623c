//! Common constants used throughout the Muddy application.

/// Project metadata file name
pub const MFILE: &str = "mfile";

/// Directory holding the package sources
pub const SRC_DIR: &str = "src";

/// Directory under `src/` copied verbatim into the package
pub const RESOURCES_DIR: &str = "resources";

/// Fallback for an empty package description
pub const README_FILE: &str = "README.md";

/// Extension of the interpreted scripts referenced by definitions
pub const SCRIPT_EXTENSION: &str = "lua";

/// Generated configuration file inside the package
pub const CONFIG_LUA: &str = "config.lua";

/// Archive extension understood by the host
pub const ARCHIVE_EXTENSION: &str = "mpackage";

/// Manifest written at the project root when `outputFile` is set
pub const OUTPUT_MANIFEST: &str = ".output";

/// Where the package icon lives inside the archive
pub const ICON_DIR: [&str; 2] = [".mudlet", "Icon"];

/// Root element and schema version of the package document
pub const DOCUMENT_ROOT: &str = "MudletPackage";
pub const SCHEMA_VERSION: &str = "1.001";

/// Both spellings are substituted after the document is rendered.
pub const PACKAGE_PLACEHOLDERS: [&str; 2] = ["@PKGNAME@", "__PKGNAME__"];
pub const VERSION_PLACEHOLDERS: [&str; 2] = ["@VERSION@", "__VERSION__"];

/// Prefix of the temporary build workspace
pub const TEMP_PREFIX: &str = "muddy-";
