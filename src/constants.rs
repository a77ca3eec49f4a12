//! Constants shared across resmeta.

/// Name of the project configuration file looked up in the working directory.
pub const CONFIG_FILE_NAME: &str = "resmeta.toml";

/// File extensions picked up when a mapping path is a directory.
///
/// Explicit file paths are not filtered; an unknown extension there is reported
/// as an unsupported format instead of being skipped.
pub const MAPPING_EXTENSIONS: &[&str] = &["yaml", "yml", "xml"];

/// Environment variable overriding the log filter when neither `--verbose`
/// nor `--quiet` is given.
pub const LOG_ENV_VAR: &str = "RUST_LOG";

/// Log filter used when nothing else is configured.
pub const DEFAULT_LOG_LEVEL: &str = "warn";
