//! Source-format converters.
//!
//! A converter turns harvested source text into the [`NestedMapping`] the
//! mappers resolve fields from:
//! - `xml`: generic XML to nested mapping conversion
//! - `oaipmh`: OAI-PMH `GetRecord` responses
//!
//! ## Usage Flow
//!
//! ```text
//! XML text → OaiPmhConverter::get_dict → record mapping (header + metadata)
//! ```

pub mod oaipmh;
pub mod xml;

use crate::error::ConverterResult;
use crate::models::{NestedMapping, SpecVersion};

// Re-exports for convenience
pub use oaipmh::OaiPmhConverter;
pub use xml::xml_to_value;

/// Capability of a metadata converter: turn source text (e.g. XML) into a
/// nested mapping compatible with the mappers.
pub trait MetadataConverter {
    /// String identifier of the implementation
    fn converter_tag(&self) -> &str;

    /// Compatibility revision of the implementation
    fn spec_version(&self) -> &SpecVersion;

    /// Convert source metadata text into a nested mapping
    fn get_dict(&self, source: &str) -> ConverterResult<NestedMapping>;
}
