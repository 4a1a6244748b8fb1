//! Converter for OAI-PMH `GetRecord` responses.

use serde_json::Value;
use tracing::debug;

use super::xml::xml_to_value;
use super::MetadataConverter;
use crate::error::{ConverterError, ConverterResult};
use crate::models::{NestedMapping, SpecVersion};

/// Tag of [`OaiPmhConverter`]
pub const CONVERTER_TAG: &str = "OAI-PMH Metadata Converter";

/// Location of the record inside the response envelope
const RECORD_POINTER: &str = "/OAI-PMH/GetRecord/record";

/// Converts an OAI-PMH `GetRecord` response into the mapping of its
/// `record` element (`header` and, unless deleted, `metadata`).
#[derive(Debug, Clone)]
pub struct OaiPmhConverter {
    version: SpecVersion,
}

impl OaiPmhConverter {
    pub fn new() -> Self {
        Self {
            version: SpecVersion::new(0, 3, 1),
        }
    }
}

impl Default for OaiPmhConverter {
    fn default() -> Self {
        Self::new()
    }
}

impl MetadataConverter for OaiPmhConverter {
    fn converter_tag(&self) -> &str {
        CONVERTER_TAG
    }

    fn spec_version(&self) -> &SpecVersion {
        &self.version
    }

    fn get_dict(&self, source: &str) -> ConverterResult<NestedMapping> {
        let mut document = xml_to_value(source)?;

        let record = document
            .pointer_mut(RECORD_POINTER)
            .map(Value::take)
            .filter(Value::is_object)
            .ok_or_else(|| ConverterError::MissingRecord("OAI-PMH/GetRecord/record".to_string()))?;

        // `Value` is shadowed by `tracing::field::Value` inside the macro
        let identifier = record
            .pointer("/header/identifier")
            .and_then(Value::as_str)
            .unwrap_or("<none>");
        debug!(identifier, "converted OAI-PMH record");

        Ok(record)
    }
}
