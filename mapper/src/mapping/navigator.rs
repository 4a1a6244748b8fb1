//! Path navigation through nested mappings.

use serde_json::Value;

/// Walk `nested` along `path` and return the value found there.
///
/// Returns `None` as soon as a segment is missing, or the current value is
/// not an object while segments remain. A `null` at the end of the path is
/// reported as `None` as well, so absent and empty elements look the same
/// to post-processing.
///
/// ```rust
/// use serde_json::json;
/// use metadata_mapper::navigate;
///
/// let record = json!({"header": {"identifier": "oai:wwu.de:1"}});
/// assert_eq!(navigate(&record, &["header", "identifier"]), Some(&json!("oai:wwu.de:1")));
/// assert_eq!(navigate(&record, &["metadata", "oai_dc:dc"]), None);
/// ```
pub fn navigate<'a, S: AsRef<str>>(nested: &'a Value, path: &[S]) -> Option<&'a Value> {
    let found = path
        .iter()
        .try_fold(nested, |current, segment| current.as_object()?.get(segment.as_ref()))?;

    if found.is_null() {
        None
    } else {
        Some(found)
    }
}
