//! Projection of resolved fields onto BagIt `bag-info` tags.
//!
//! Tags are multi-valued, so every resolved value is flattened into a list
//! of strings. Fields a mapper does not resolve are left out; the packaging
//! process fills them elsewhere or not at all.

use indexmap::IndexMap;
use serde_json::Value;

use crate::converter::xml::TEXT_KEY;
use crate::mapping::MetadataMapper;
use crate::models::{fields, NestedMapping};

/// Tags of the shared field vocabulary, in output order
pub const BAG_INFO_FIELDS: [&str; 13] = [
    fields::SOURCE_ORGANIZATION,
    fields::ORIGIN_SYSTEM_IDENTIFIER,
    fields::EXTERNAL_IDENTIFIER,
    fields::DC_CREATOR,
    fields::DC_TITLE,
    fields::DC_RIGHTS,
    fields::DC_TERMS_IDENTIFIER,
    fields::DC_TERMS_RIGHTS,
    fields::DC_TERMS_LICENSE,
    fields::DC_TERMS_ACCESS_RIGHTS,
    fields::EMBARGO_ENDDATE,
    fields::DC_TERMS_RIGHTS_HOLDER,
    fields::PRESERVATION_LEVEL,
];

/// Flatten a resolved value into tag values.
///
/// Strings, numbers and booleans become one value each, lists contribute
/// their flattened items, objects contribute their `#text`.
pub fn flatten_value(value: &Value) -> Vec<String> {
    match value {
        Value::Null => Vec::new(),
        Value::String(s) => vec![s.clone()],
        Value::Number(n) => vec![n.to_string()],
        Value::Bool(b) => vec![b.to_string()],
        Value::Array(items) => items.iter().flat_map(flatten_value).collect(),
        Value::Object(map) => map
            .get(TEXT_KEY)
            .and_then(Value::as_str)
            .map(|s| vec![s.to_string()])
            .unwrap_or_default(),
    }
}

/// Resolve `fields` and collect the non-empty results by tag.
pub fn resolve_fields<M, S>(mapper: &M, fields: &[S], source: &NestedMapping) -> IndexMap<String, Vec<String>>
where
    M: MetadataMapper + ?Sized,
    S: AsRef<str>,
{
    fields
        .iter()
        .filter_map(|field| {
            let values = flatten_value(&mapper.resolve(field.as_ref(), source)?);
            if values.is_empty() {
                None
            } else {
                Some((field.as_ref().to_string(), values))
            }
        })
        .collect()
}

/// The `bag-info` tags of one record
pub fn bag_info<M>(mapper: &M, source: &NestedMapping) -> IndexMap<String, Vec<String>>
where
    M: MetadataMapper + ?Sized,
{
    resolve_fields(mapper, &BAG_INFO_FIELDS, source)
}

/// Payload URLs of one record, empty if there are none
pub fn transfer_urls<M>(mapper: &M, source: &NestedMapping) -> Vec<String>
where
    M: MetadataMapper + ?Sized,
{
    mapper
        .resolve(fields::TRANSFER_URLS, source)
        .map(|value| flatten_value(&value))
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repositories::Repository;
    use serde_json::json;

    fn record() -> Value {
        json!({
            "header": {"identifier": "oai:opus4-whge:17"},
            "metadata": {
                "oai_dc:dc": {
                    "dc:title": {"@xml:lang": "de", "#text": "Ein Titel"},
                    "dc:creator": "Mustermann, M.",
                    "dc:identifier": [
                        "urn:nbn:de:hbz:1010-opus4-17",
                        "https://whge.opus.hbz-nrw.de/files/17/a.pdf",
                        "https://whge.opus.hbz-nrw.de/files/17/b.pdf"
                    ]
                }
            }
        })
    }

    #[test]
    fn test_flatten_value() {
        assert_eq!(flatten_value(&json!(null)), Vec::<String>::new());
        assert_eq!(flatten_value(&json!("a")), vec!["a"]);
        assert_eq!(flatten_value(&json!(["a", null, ["b"], 3])), vec!["a", "b", "3"]);
        assert_eq!(flatten_value(&json!({"@xml:lang": "en", "#text": "t"})), vec!["t"]);
        assert_eq!(flatten_value(&json!({"@xml:lang": "en"})), Vec::<String>::new());
    }

    #[test]
    fn test_bag_info_order_and_omissions() {
        let mapper = Repository::WhgeOpus.mapper().unwrap();
        let tags = bag_info(mapper, &record());

        let keys: Vec<&str> = tags.keys().map(String::as_str).collect();
        assert_eq!(
            keys,
            vec![
                "Source-Organization",
                "Origin-System-Identifier",
                "External-Identifier",
                "DC-Creator",
                "DC-Title",
                "DC-Terms-Identifier",
            ]
        );
        assert_eq!(tags["DC-Title"], vec!["Ein Titel"]);
        assert_eq!(tags["External-Identifier"], vec!["17"]);
        assert_eq!(tags["DC-Terms-Identifier"], vec!["urn:nbn:de:hbz:1010-opus4-17"]);
    }

    #[test]
    fn test_unmapped_fields_never_filled() {
        let mapper = Repository::Miami.mapper().unwrap();
        let tags = bag_info(mapper, &record());
        assert!(!tags.contains_key(fields::EMBARGO_ENDDATE));
        assert!(!tags.contains_key(fields::DC_TERMS_LICENSE));
    }

    #[test]
    fn test_transfer_urls() {
        let mapper = Repository::WhgeOpus.mapper().unwrap();
        assert_eq!(
            transfer_urls(mapper, &record()),
            vec![
                "https://whge.opus.hbz-nrw.de/files/17/a.pdf",
                "https://whge.opus.hbz-nrw.de/files/17/b.pdf"
            ]
        );
        let deleted = json!({"header": {"@status": "deleted", "identifier": "oai:id0"}});
        assert!(transfer_urls(mapper, &deleted).is_empty());
    }
}
