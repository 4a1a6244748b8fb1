//! Error types for the metadata mapper.
//!
//! - [`ConverterError`] - source text could not be turned into a nested mapping
//! - [`MapperError`] - a mapper configuration is malformed
//! - [`CliError`] - top-level errors of the command line tool
//!
//! An unresolved field is never an error: resolution returns `None`.
//! Error conversion is automatic via `From` implementations,
//! allowing `?` to work across error boundaries.

use thiserror::Error;

// =============================================================================
// Converter Errors
// =============================================================================

/// Errors while converting source metadata text into a nested mapping.
#[derive(Debug, Error)]
pub enum ConverterError {
    /// The source text is not well-formed XML.
    #[error("Malformed XML: {0}")]
    Xml(#[from] quick_xml::Error),

    /// A name or CDATA section is not valid UTF-8.
    #[error("Invalid UTF-8 in XML: {0}")]
    Utf8(#[from] std::str::Utf8Error),

    /// The document ends inside an element.
    #[error("Unclosed element at end of document: {0}")]
    UnclosedElement(String),

    /// The document does not contain the expected envelope.
    #[error("Missing element in document: {0}")]
    MissingRecord(String),
}

// =============================================================================
// Mapper Errors
// =============================================================================

/// Errors while building a mapper from its configuration.
///
/// All of these indicate a defect in a static configuration and are raised
/// at build time, never while resolving a field.
#[derive(Debug, Error)]
pub enum MapperError {
    /// A linear map entry has neither or both of `value` and `path`.
    #[error("Invalid linear map entry for field '{field}': {message}")]
    InvalidEntry { field: String, message: String },

    /// A path entry without any segment.
    #[error("Empty path for field '{0}'")]
    EmptyPath(String),

    /// Two keys collapse to the same field once lowercased.
    #[error("Duplicate field key: {0}")]
    DuplicateField(String),

    /// A pattern filter does not compile.
    #[error("Invalid pattern for field '{field}': {source}")]
    InvalidPattern {
        field: String,
        #[source]
        source: regex::Error,
    },

    /// No mapper is registered under this name.
    #[error("Unknown repository: {0}")]
    UnknownRepository(String),

    /// Failed to read a mapper definition.
    #[error("Failed to read mapper definition: {0}")]
    Io(#[from] std::io::Error),

    /// A mapper definition is not valid JSON.
    #[error("Mapper definition JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

// =============================================================================
// CLI Errors (top-level)
// =============================================================================

/// Top-level errors of the `metadata-mapper` binary.
#[derive(Debug, Error)]
pub enum CliError {
    /// Conversion error.
    #[error("Converter error: {0}")]
    Converter(#[from] ConverterError),

    /// Mapper configuration error.
    #[error("Mapper error: {0}")]
    Mapper(#[from] MapperError),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// No repository given on the command line or in the environment.
    #[error("No repository selected (use --repository or METADATA_MAPPER_REPOSITORY)")]
    NoRepository,
}

// =============================================================================
// Result Type Aliases
// =============================================================================

/// Result type for converter operations.
pub type ConverterResult<T> = Result<T, ConverterError>;

/// Result type for mapper construction.
pub type MapperResult<T> = Result<T, MapperError>;

/// Result type for CLI commands.
pub type CliResult<T> = Result<T, CliError>;
