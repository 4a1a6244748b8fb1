//! Shared data structures.
//!
//! - [`NestedMapping`] - parsed source metadata, as produced by a converter
//! - [`SpecVersion`] - compatibility revision of a converter or mapper
//! - [`fields`] - the target field vocabulary shared by all repositories

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

/// Parsed source metadata.
///
/// Either an atomic string, a sequence of atomic values (some possibly
/// null), or an object of string keys to nested mappings.
pub type NestedMapping = Value;

// =============================================================================
// Spec Version
// =============================================================================

/// Compatibility revision of a converter or mapper interface.
///
/// Purely descriptive. Nothing in this crate checks it, callers may compare
/// two versions (ordering is major, minor, patch, then label).
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct SpecVersion {
    pub major: u32,
    pub minor: u32,
    pub patch: u32,
    #[serde(default)]
    pub label: String,
}

impl SpecVersion {
    /// Create a version without label.
    pub fn new(major: u32, minor: u32, patch: u32) -> Self {
        Self {
            major,
            minor,
            patch,
            label: String::new(),
        }
    }

    /// Set the label.
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }

    /// The version as `(major, minor, patch, label)`.
    pub fn as_tuple(&self) -> (u32, u32, u32, &str) {
        (self.major, self.minor, self.patch, &self.label)
    }
}

impl fmt::Display for SpecVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.patch)?;
        if !self.label.is_empty() {
            write!(f, "-{}", self.label)?;
        }
        Ok(())
    }
}

// =============================================================================
// Field Vocabulary
// =============================================================================

/// Target field keys, in their canonical BagIt spelling.
///
/// Lookups are case-insensitive, so these can be passed to
/// [`crate::MetadataMapper::resolve`] as they are.
pub mod fields {
    pub const SOURCE_ORGANIZATION: &str = "Source-Organization";
    pub const ORIGIN_SYSTEM_IDENTIFIER: &str = "Origin-System-Identifier";
    pub const EXTERNAL_IDENTIFIER: &str = "External-Identifier";
    pub const DC_CREATOR: &str = "DC-Creator";
    pub const DC_TITLE: &str = "DC-Title";
    pub const DC_RIGHTS: &str = "DC-Rights";
    pub const DC_TERMS_IDENTIFIER: &str = "DC-Terms-Identifier";
    pub const TRANSFER_URLS: &str = "Transfer-URLs";

    // Known to the packaging process but not mapped from source metadata.
    pub const DC_TERMS_RIGHTS: &str = "DC-Terms-Rights";
    pub const DC_TERMS_LICENSE: &str = "DC-Terms-License";
    pub const DC_TERMS_ACCESS_RIGHTS: &str = "DC-Terms-Access-Rights";
    pub const EMBARGO_ENDDATE: &str = "Embargo-Enddate";
    pub const DC_TERMS_RIGHTS_HOLDER: &str = "DC-Terms-Rights-Holder";
    pub const PRESERVATION_LEVEL: &str = "Preservation-Level";
}
