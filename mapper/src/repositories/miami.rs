//! Miami, the repository of the University of Münster.
//!
//! Titles carry no language attribute, so the standard `dc-title` applies.

use super::{repository_spec_version, transfer_urls_entry};
use crate::mapping::{LinearMapEntry, MapperConfig};

pub const TAG: &str = "Miami Metadata Mapper";
pub const SOURCE_ORGANIZATION: &str = "https://d-nb.info/gnd/5091030-9";
pub const TRANSFER_URL_PREFIX: &str = "https://repositorium.uni-muenster.de/transfer/";

pub fn config() -> MapperConfig {
    MapperConfig::new(TAG, repository_spec_version())
        .with_standard_catalog()
        .linear(
            "source-organization",
            LinearMapEntry::constant(SOURCE_ORGANIZATION),
        )
        .linear("transfer-urls", transfer_urls_entry(TRANSFER_URL_PREFIX))
}

#[cfg(test)]
mod tests {
    use super::SOURCE_ORGANIZATION;
    use crate::repositories::fixtures::{assert_deleted_record, convert_record, oai_dc};
    use crate::repositories::Repository;
    use crate::MetadataMapper;
    use serde_json::{json, Value};

    fn minimal_record() -> Value {
        let metadata = oai_dc(
            r#"<dc:title>This is a test</dc:title>
<dc:creator>Mustermann, M.</dc:creator>
<dc:creator>Mustermann, E.</dc:creator>
<dc:identifier />
<dc:identifier>
    https://nbn-resolving.org/urn:nbn:de:hbz:x-xxxxxxxxxxx
</dc:identifier>
<dc:identifier>urn:nbn:de:hbz:x-xxxxxxxxxxx</dc:identifier>
<dc:identifier>10.11111/xxxxxxxxxxx</dc:identifier>
<dc:identifier>
    https://repositorium.uni-muenster.de/transfer/miami/xxxxxxxxxxx.pdf
</dc:identifier>"#,
        );
        convert_record(&format!(
            r#"<record>
    <header>
        <identifier>oai:wwu.de:xxxxxxxx-xxxx-xxxx-xxxx-xxxxxxxxxxxx</identifier>
    </header>
    <metadata>{metadata}</metadata>
</record>"#
        ))
    }

    #[test]
    fn test_miami_mapper() {
        let mapper = Repository::Miami.mapper().unwrap();
        let record = minimal_record();

        assert_eq!(mapper.mapper_tag(), "Miami Metadata Mapper");
        assert_eq!(
            mapper.resolve("DC-Creator", &record),
            Some(json!(["Mustermann, M.", "Mustermann, E."]))
        );
        assert_eq!(mapper.resolve("DC-Title", &record), Some(json!("This is a test")));
        assert_eq!(
            mapper.resolve("DC-Terms-Identifier", &record),
            Some(json!([
                "https://nbn-resolving.org/urn:nbn:de:hbz:x-xxxxxxxxxxx",
                "urn:nbn:de:hbz:x-xxxxxxxxxxx",
                "10.11111/xxxxxxxxxxx"
            ]))
        );
        assert_eq!(
            mapper.resolve("Origin-System-Identifier", &record),
            Some(json!("oai:wwu.de"))
        );
        assert_eq!(
            mapper.resolve("External-Identifier", &record),
            Some(json!("xxxxxxxx-xxxx-xxxx-xxxx-xxxxxxxxxxxx"))
        );
        assert_eq!(
            mapper.resolve("Source-Organization", &record),
            Some(json!("https://d-nb.info/gnd/5091030-9"))
        );
        assert_eq!(
            mapper.resolve("transfer-urls", &record),
            Some(json!([
                "https://repositorium.uni-muenster.de/transfer/miami/xxxxxxxxxxx.pdf"
            ]))
        );
        assert_eq!(mapper.resolve("DC-Rights", &record), None);
    }

    #[test]
    fn test_scenario_with_single_null_identifier() {
        let mapper = Repository::Miami.mapper().unwrap();
        let record = json!({
            "header": {"identifier": "oai:wwu.de:ID"},
            "metadata": {"oai_dc:dc": {"dc:identifier": [
                null,
                "urn:nbn:de:hbz:x-1",
                "10.11111/x",
                "https://repositorium.uni-muenster.de/transfer/miami/x.pdf"
            ]}}
        });
        assert_eq!(
            mapper.resolve("origin-system-identifier", &record),
            Some(json!("oai:wwu.de"))
        );
        assert_eq!(mapper.resolve("external-identifier", &record), Some(json!("ID")));
        assert_eq!(
            mapper.resolve("dc-terms-identifier", &record),
            Some(json!(["urn:nbn:de:hbz:x-1", "10.11111/x"]))
        );
        assert_eq!(
            mapper.resolve("transfer-urls", &record),
            Some(json!(["https://repositorium.uni-muenster.de/transfer/miami/x.pdf"]))
        );
    }

    #[test]
    fn test_deleted_record() {
        assert_deleted_record(Repository::Miami, SOURCE_ORGANIZATION);
    }
}
