//! Standard field catalog.
//!
//! The baseline linear map shared by all OAI-PMH repositories. Mappers
//! built with `use_standard_catalog` start from a copy of it, the catalog
//! itself is never modified.
//!
//! | Field | Path | Post-process |
//! |-------|------|--------------|
//! | `origin-system-identifier` | `header/identifier` | before the last `:` |
//! | `external-identifier` | `header/identifier` | after the last `:` |
//! | `dc-creator` | `metadata/oai_dc:dc/dc:creator` | - |
//! | `dc-title` | `metadata/oai_dc:dc/dc:title` | - |
//! | `dc-rights` | `metadata/oai_dc:dc/dc:rights` | - |
//! | `dc-terms-identifier` | `metadata/oai_dc:dc/dc:identifier` | DOIs and URNs only |

use once_cell::sync::Lazy;

use super::config::{LinearMap, LinearMapEntry};
use super::operations::Operation;
use crate::models::fields;

/// Record identifier in the OAI-PMH header
pub const HEADER_IDENTIFIER_PATH: [&str; 2] = ["header", "identifier"];

/// Prefix of every Dublin Core element path
pub const OAI_DC_PATH: [&str; 2] = ["metadata", "oai_dc:dc"];

/// DOI (`10.NNNN/...`) or URN:NBN, matched case-insensitively
pub const PERSISTENT_IDENTIFIER_PATTERN: &str = r"10\.\d{4,9}/[-._;()/:A-Z0-9]+|urn:nbn";

/// Fields the packaging process knows about but which are not mapped from
/// source metadata. They are filled by other components, or not at all.
pub const UNMAPPED_FIELDS: [&str; 6] = [
    fields::DC_TERMS_RIGHTS,
    fields::DC_TERMS_LICENSE,
    fields::DC_TERMS_ACCESS_RIGHTS,
    fields::EMBARGO_ENDDATE,
    fields::DC_TERMS_RIGHTS_HOLDER,
    fields::PRESERVATION_LEVEL,
];

/// Path to a Dublin Core element, e.g. `dc_path(&["dc:title"])`
pub fn dc_path(segments: &[&str]) -> Vec<String> {
    OAI_DC_PATH
        .iter()
        .chain(segments)
        .map(|s| s.to_string())
        .collect()
}

/// The standard catalog
pub static STANDARD_CATALOG: Lazy<LinearMap> = Lazy::new(|| {
    let mut catalog = LinearMap::new();

    catalog.insert(
        "origin-system-identifier".to_string(),
        LinearMapEntry::path(HEADER_IDENTIFIER_PATH).with_operation(Operation::SplitBeforeLast {
            separator: ":".to_string(),
        }),
    );
    catalog.insert(
        "external-identifier".to_string(),
        LinearMapEntry::path(HEADER_IDENTIFIER_PATH).with_operation(Operation::SplitAfterLast {
            separator: ":".to_string(),
        }),
    );
    catalog.insert(
        "dc-creator".to_string(),
        LinearMapEntry::path(dc_path(&["dc:creator"])),
    );
    catalog.insert(
        "dc-title".to_string(),
        LinearMapEntry::path(dc_path(&["dc:title"])),
    );
    catalog.insert(
        "dc-rights".to_string(),
        LinearMapEntry::path(dc_path(&["dc:rights"])),
    );
    catalog.insert(
        "dc-terms-identifier".to_string(),
        LinearMapEntry::path(dc_path(&["dc:identifier"])).with_operation(Operation::MatchFilter {
            pattern: PERSISTENT_IDENTIFIER_PATTERN.to_string(),
            case_insensitive: true,
        }),
    );

    catalog
});

/// Shared reference to the standard catalog
pub fn standard_catalog() -> &'static LinearMap {
    &STANDARD_CATALOG
}
