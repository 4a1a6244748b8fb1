//! Mapper configurations of the supported source repositories.
//!
//! Every repository extends the standard catalog with a constant
//! `source-organization`, a `transfer-urls` filter on the Dublin Core
//! identifiers and, where titles carry a language attribute, a `dc-title`
//! path into `#text`.
//!
//! | Repository | Name | Transfer URL prefix |
//! |------------|------|---------------------|
//! | Miami (Münster) | `miami` | `https://repositorium.uni-muenster.de/transfer/` |
//! | hbz OPUS | `hbz-opus` | `https://hbz.opus.hbz-nrw.de/files/` |
//! | HfM Detmold OPUS | `hfm-opus` | `https://opus.hfm-detmold.de/files/` |
//! | WHGE OPUS | `whge-opus` | `https://whge.opus.hbz-nrw.de/files/` |

pub mod hbz_opus;
pub mod hfm_opus;
pub mod miami;
pub mod whge_opus;

use once_cell::sync::OnceCell;
use std::fmt;
use std::str::FromStr;

use crate::error::{MapperError, MapperResult};
use crate::mapping::catalog::dc_path;
use crate::mapping::{LinearMapEntry, MapperConfig, Operation, ResolvedMapper};
use crate::models::SpecVersion;

/// Spec version shared by all repository mappers
pub fn repository_spec_version() -> SpecVersion {
    SpecVersion::new(0, 3, 2)
}

/// `transfer-urls`: Dublin Core identifiers containing `prefix`
pub fn transfer_urls_entry(prefix: &str) -> LinearMapEntry {
    LinearMapEntry::path(dc_path(&["dc:identifier"])).with_operation(Operation::ContainsFilter {
        needle: prefix.to_string(),
    })
}

/// `dc-title` for repositories emitting `<dc:title xml:lang="..">`
pub fn attributed_title_entry() -> LinearMapEntry {
    LinearMapEntry::path(dc_path(&["dc:title", "#text"]))
}

/// Configuration shared by the OPUS instances
pub(crate) fn opus_config(tag: &str, source_organization: &str, transfer_prefix: &str) -> MapperConfig {
    MapperConfig::new(tag, repository_spec_version())
        .with_standard_catalog()
        .linear("dc-title", attributed_title_entry())
        .linear(
            "source-organization",
            LinearMapEntry::constant(source_organization),
        )
        .linear("transfer-urls", transfer_urls_entry(transfer_prefix))
}

// =============================================================================
// Registry
// =============================================================================

/// A supported source repository
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Repository {
    Miami,
    HbzOpus,
    HfmOpus,
    WhgeOpus,
}

static MAPPERS: [OnceCell<ResolvedMapper>; 4] = [
    OnceCell::new(),
    OnceCell::new(),
    OnceCell::new(),
    OnceCell::new(),
];

impl Repository {
    /// All supported repositories
    pub const ALL: [Repository; 4] = [
        Repository::Miami,
        Repository::HbzOpus,
        Repository::HfmOpus,
        Repository::WhgeOpus,
    ];

    /// Short name, as accepted by [`Repository::from_str`]
    pub fn name(self) -> &'static str {
        match self {
            Repository::Miami => "miami",
            Repository::HbzOpus => "hbz-opus",
            Repository::HfmOpus => "hfm-opus",
            Repository::WhgeOpus => "whge-opus",
        }
    }

    /// The mapper configuration of this repository
    pub fn config(self) -> MapperConfig {
        match self {
            Repository::Miami => miami::config(),
            Repository::HbzOpus => hbz_opus::config(),
            Repository::HfmOpus => hfm_opus::config(),
            Repository::WhgeOpus => whge_opus::config(),
        }
    }

    /// The shared mapper of this repository, built on first use
    pub fn mapper(self) -> MapperResult<&'static ResolvedMapper> {
        MAPPERS[self as usize].get_or_try_init(|| self.config().build())
    }
}

impl fmt::Display for Repository {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Repository {
    type Err = MapperError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase().replace('_', "-");
        Repository::ALL
            .into_iter()
            .find(|r| r.name() == normalized)
            .ok_or_else(|| MapperError::UnknownRepository(s.to_string()))
    }
}

/// OAI-PMH fixtures shared by the repository tests
#[cfg(test)]
pub(crate) mod fixtures {
    use super::Repository;
    use crate::converter::{MetadataConverter, OaiPmhConverter};
    use crate::MetadataMapper;
    use serde_json::{json, Value};

    /// Wrap a `<record>` into a namespaced `GetRecord` response and convert it
    pub fn convert_record(record: &str) -> Value {
        let xml = format!(
            r#"<?xml version="1.0" encoding="UTF-8"?>
<OAI-PMH xmlns="http://www.openarchives.org/OAI/2.0/"
         xmlns:xsi="http://www.w3.org/2001/XMLSchema-instance"
         xsi:schemaLocation="http://www.openarchives.org/OAI/2.0/ http://www.openarchives.org/OAI/2.0/OAI-PMH.xsd">
    <responseDate>2023-09-12T06:45:12Z</responseDate>
    <request verb="GetRecord" metadataPrefix="oai_dc">https://example.org/oai</request>
    <GetRecord>
{record}
    </GetRecord>
</OAI-PMH>"#
        );
        OaiPmhConverter::new().get_dict(&xml).unwrap()
    }

    /// `<oai_dc:dc>` with namespace declarations around `elements`
    pub fn oai_dc(elements: &str) -> String {
        format!(
            r#"<oai_dc:dc xmlns:oai_dc="http://www.openarchives.org/OAI/2.0/oai_dc/"
                   xmlns:dc="http://purl.org/dc/elements/1.1/"
                   xsi:schemaLocation="http://www.openarchives.org/OAI/2.0/oai_dc/ http://www.openarchives.org/OAI/2.0/oai_dc.xsd">
{elements}
</oai_dc:dc>"#
        )
    }

    pub fn deleted_record() -> Value {
        convert_record(
            r#"<record>
    <header status="deleted">
        <identifier>oai:id0</identifier>
    </header>
</record>"#,
        )
    }

    /// An OPUS 4 record with a language-tagged title, a frontdoor URL and
    /// one file below `transfer_prefix`
    pub fn opus_record(identifier: &str, transfer_prefix: &str) -> Value {
        let metadata = oai_dc(&format!(
            r#"<dc:creator>Mustermann, M.</dc:creator>
<dc:creator>Mustermann, E.</dc:creator>
<dc:title xml:lang="de">This is a test</dc:title>
<dc:identifier>
    https://nbn-resolving.org/urn:nbn:de:hbz:x-xxxxxxxxxxx
</dc:identifier>
<dc:identifier>urn:nbn:de:hbz:x-xxxxxxxxxxx</dc:identifier>
<dc:identifier>https://example.org/frontdoor/index/index/docId/xx</dc:identifier>
<dc:identifier>
    {transfer_prefix}xx/xxxxxxxxxxx.pdf
</dc:identifier>"#
        ));
        convert_record(&format!(
            r#"<record>
    <header><identifier>{identifier}</identifier></header>
    <metadata>{metadata}</metadata>
</record>"#
        ))
    }

    /// Check an OPUS mapper against [`opus_record`]
    pub fn assert_opus_mapper(
        repository: Repository,
        tag: &str,
        source_organization: &str,
        transfer_prefix: &str,
        origin_system: &str,
    ) {
        let mapper = repository.mapper().unwrap();
        let record = opus_record(&format!("{origin_system}:x"), transfer_prefix);

        assert_eq!(mapper.mapper_tag(), tag);
        assert_eq!(
            mapper.resolve("DC-Creator", &record),
            Some(json!(["Mustermann, M.", "Mustermann, E."]))
        );
        assert_eq!(mapper.resolve("DC-Title", &record), Some(json!("This is a test")));
        assert_eq!(
            mapper.resolve("DC-Terms-Identifier", &record),
            Some(json!([
                "https://nbn-resolving.org/urn:nbn:de:hbz:x-xxxxxxxxxxx",
                "urn:nbn:de:hbz:x-xxxxxxxxxxx"
            ]))
        );
        assert_eq!(
            mapper.resolve("Origin-System-Identifier", &record),
            Some(json!(origin_system))
        );
        assert_eq!(mapper.resolve("External-Identifier", &record), Some(json!("x")));
        assert_eq!(
            mapper.resolve("Source-Organization", &record),
            Some(json!(source_organization))
        );
        assert_eq!(
            mapper.resolve("transfer-urls", &record),
            Some(json!([format!("{transfer_prefix}xx/xxxxxxxxxxx.pdf")]))
        );
    }

    /// Only constants and header fields resolve on a deleted record
    pub fn assert_deleted_record(repository: Repository, source_organization: &str) {
        let mapper = repository.mapper().unwrap();
        let record = deleted_record();

        assert_eq!(
            mapper.resolve("source-organization", &record),
            Some(json!(source_organization))
        );
        assert_eq!(
            mapper.resolve("origin-system-identifier", &record),
            Some(json!("oai"))
        );
        assert_eq!(mapper.resolve("external-identifier", &record), Some(json!("id0")));
        assert_eq!(mapper.resolve("dc-creator", &record), None);
        assert_eq!(mapper.resolve("dc-title", &record), None);
        assert_eq!(mapper.resolve("transfer-urls", &record), None);
    }
}
