//! Error types for `WLData`

use std::path::PathBuf;

use thiserror::Error;

/// The error type for `WLData` operations.
///
/// Absent assets and exports are not errors; lookups report them as `None`.
/// Everything here aborts the calling run.
#[non_exhaustive]
#[derive(Error, Debug)]
pub enum Error {
    // ==================== IO Errors ====================
    /// IO error from file operations.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON parsing or serialization error.
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    // ==================== Configuration Errors ====================
    /// A fresh config file was written and needs to be filled in.
    #[error("created sample config file {path}; populate it to continue")]
    ConfigCreated {
        /// Where the sample config was written.
        path: PathBuf,
    },

    /// A config section still holds placeholder values.
    #[error("populate the \"{section}\" section in {path} to continue")]
    ConfigIncomplete {
        /// The section that still needs values.
        section: String,
        /// The config file path.
        path: PathBuf,
    },

    /// The platform config directory could not be determined.
    #[error("could not determine a config directory for this platform")]
    ConfigDirNotFound,

    /// The config file could not be parsed.
    #[error("config parse error: {0}")]
    ConfigParse(#[from] toml::de::Error),

    /// The config file could not be written.
    #[error("config write error: {0}")]
    ConfigWrite(#[from] toml::ser::Error),

    // ==================== Serializer Errors ====================
    /// The external serializer executable does not exist.
    #[error("could not find serializer executable at: {path}")]
    SerializerNotFound {
        /// The configured executable path.
        path: PathBuf,
    },

    /// The external serializer exited unsuccessfully.
    #[error("serializer failed on {base} (exit status {status}): {stderr}")]
    SerializerFailed {
        /// The base path handed to the serializer.
        base: PathBuf,
        /// The exit status description.
        status: String,
        /// Captured standard error.
        stderr: String,
    },

    /// A serialization is still older than the supported version after re-serializing.
    #[error("serialization of {object} is version {found:?}, at least {required} is required")]
    StaleSerialization {
        /// The asset identifier.
        object: String,
        /// The version found in the file, if any.
        found: Option<u64>,
        /// The minimum supported version.
        required: u64,
    },

    // ==================== Data Shape Errors ====================
    /// An asset expected to carry an export of some type doesn't.
    #[error("no {export_type} export found in {object}")]
    MissingExport {
        /// The asset identifier.
        object: String,
        /// The export type looked for.
        export_type: String,
    },

    /// A value had a different JSON shape than expected.
    #[error("unexpected value for {context}: {value}")]
    UnexpectedValue {
        /// Where the value was read from.
        context: String,
        /// The offending JSON, rendered.
        value: String,
    },

    /// Invalid glob pattern.
    #[error("invalid glob pattern: {0}")]
    InvalidGlob(#[from] glob::PatternError),

    // ==================== BVC Resolution Errors ====================
    /// An attribute didn't have exactly one resolvable `GbxAttributeData` export.
    #[error("could not resolve attribute: {attribute}")]
    AttributeResolution {
        /// The attribute path.
        attribute: String,
    },

    /// An attribute's value resolver is of a kind we don't know how to evaluate.
    #[error("unknown value resolver type {kind} for {attribute}")]
    UnknownResolver {
        /// The resolver's export type.
        kind: String,
        /// The attribute path.
        attribute: String,
    },

    /// An attribute initializer with no documented assumption.
    #[error("unknown attribute initializer: {0}")]
    UnknownInitializer(String),

    // ==================== Expansion Errors ====================
    /// An `EXPD_` object with an export type we don't handle.
    #[error("unknown expansion type \"{kind}\" in {object}")]
    UnknownExpansion {
        /// The export type found.
        kind: String,
        /// The expansion object.
        object: String,
    },

    // ==================== Reference Database Errors ====================
    /// References were requested from a `WlData` built without any config.
    #[error("no wldata config loaded; the reference database is set in its \"database\" section")]
    ReferencesNotConfigured,

    /// The configured reference database file doesn't exist.
    #[error("reference database file not found: {0}")]
    ReferenceDbMissing(PathBuf),

    /// SQLite error from the reference database.
    #[error("reference database error: {0}")]
    Sqlite(#[from] rusqlite::Error),
}

/// A specialized Result type for `WLData` operations.
pub type Result<T> = std::result::Result<T, Error>;
