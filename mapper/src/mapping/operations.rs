//! Post-process operations for linear map entries.
//!
//! Operations are declarative (serializable in mapper definitions) and get
//! compiled once when a mapper is built. Every operation maps a null input
//! to a null output.

use regex::{Regex, RegexBuilder};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// All available post-process operations
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Operation {
    /// Keep everything before the last occurrence of `separator`
    /// (the whole string if the separator does not occur)
    SplitBeforeLast {
        #[serde(default = "default_separator")]
        separator: String,
    },

    /// Keep everything after the last occurrence of `separator`.
    ///
    /// Input without the separator has no such part and resolves to null
    /// instead of failing the whole record.
    SplitAfterLast {
        #[serde(default = "default_separator")]
        separator: String,
    },

    /// Keep the list entries in which the regex `pattern` matches
    MatchFilter {
        pattern: String,
        #[serde(default)]
        case_insensitive: bool,
    },

    /// Keep the list entries containing `needle` (case-sensitive)
    ContainsFilter { needle: String },
}

fn default_separator() -> String {
    ":".to_string()
}

impl Operation {
    /// Compile the operation, validating any pattern it carries.
    pub fn compile(&self) -> Result<CompiledOperation, regex::Error> {
        Ok(match self {
            Operation::SplitBeforeLast { separator } => {
                CompiledOperation::SplitBeforeLast(separator.clone())
            }
            Operation::SplitAfterLast { separator } => {
                CompiledOperation::SplitAfterLast(separator.clone())
            }
            Operation::MatchFilter {
                pattern,
                case_insensitive,
            } => CompiledOperation::MatchFilter(
                RegexBuilder::new(pattern)
                    .case_insensitive(*case_insensitive)
                    .build()?,
            ),
            Operation::ContainsFilter { needle } => {
                CompiledOperation::ContainsFilter(needle.clone())
            }
        })
    }
}

/// An [`Operation`] ready to be applied.
#[derive(Debug, Clone)]
pub enum CompiledOperation {
    SplitBeforeLast(String),
    SplitAfterLast(String),
    MatchFilter(Regex),
    ContainsFilter(String),
}

impl CompiledOperation {
    /// Apply this operation to a (possibly absent) value
    pub fn apply(&self, value: Option<&Value>) -> Option<Value> {
        let value = value?;
        match self {
            CompiledOperation::SplitBeforeLast(separator) => {
                Self::map_str(value, |s| match s.rsplit_once(separator.as_str()) {
                    Some((head, _)) => Some(head.to_string()),
                    None => Some(s.to_string()),
                })
            }
            CompiledOperation::SplitAfterLast(separator) => Self::map_str(value, |s| {
                s.rsplit_once(separator.as_str())
                    .map(|(_, tail)| tail.to_string())
            }),
            CompiledOperation::MatchFilter(re) => Self::filter(value, |s| re.is_match(s)),
            CompiledOperation::ContainsFilter(needle) => {
                Self::filter(value, |s| s.contains(needle.as_str()))
            }
        }
    }

    fn map_str(value: &Value, f: impl Fn(&str) -> Option<String>) -> Option<Value> {
        match value {
            Value::String(s) => f(s).map(Value::String),
            // Nothing to split on; leave non-string values as they are
            other => Some(other.clone()),
        }
    }

    /// Filter the string entries of a list. A single string counts as a
    /// list of one, null and non-string entries are dropped.
    fn filter(value: &Value, keep: impl Fn(&str) -> bool) -> Option<Value> {
        let kept = match value {
            Value::Array(items) => items
                .iter()
                .filter_map(Value::as_str)
                .filter(|s| keep(s))
                .map(|s| Value::String(s.to_string()))
                .collect(),
            Value::String(s) if keep(s) => vec![Value::String(s.clone())],
            Value::String(_) => Vec::new(),
            _ => return None,
        };
        Some(Value::Array(kept))
    }
}

/// Get a description of all available operations
pub fn operations_description() -> String {
    r#"Available post-process operations:

| Operation | Description | Parameters |
|-----------|-------------|------------|
| split_before_last | Keep text before the last separator | separator (default ":") |
| split_after_last | Keep text after the last separator, null if absent | separator (default ":") |
| match_filter | Keep list entries matching a regex | pattern: regex, case_insensitive: bool |
| contains_filter | Keep list entries containing a substring | needle: substring |

All operations return null for null input.

Example linear map entries in JSON:
{
  "origin-system-identifier": {"path": ["header", "identifier"], "post_process": {"type": "split_before_last"}},
  "transfer-urls": {
    "path": ["metadata", "oai_dc:dc", "dc:identifier"],
    "post_process": {"type": "contains_filter", "needle": "https://example.org/files/"}
  },
  "source-organization": {"value": "https://d-nb.info/gnd/0000000-0"}
}"#
    .to_string()
}
