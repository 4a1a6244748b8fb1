//! Mapper configuration.
//!
//! A [`MapperConfig`] describes a mapper declaratively: a linear map of
//! path lookups and constants, a nonlinear map of computed fields, and
//! whether the [standard catalog](super::catalog) is used as a baseline.
//! [`MapperDefinition`] is the serializable subset, loadable from JSON.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;
use std::fmt;
use std::fs;
use std::path::Path;
use std::sync::Arc;

use super::operations::Operation;
use super::resolver::ResolvedMapper;
use crate::error::{MapperError, MapperResult};
use crate::models::{NestedMapping, SpecVersion};

/// Linear map: lowercase field key to entry.
pub type LinearMap = HashMap<String, LinearMapEntry>;

/// Nonlinear map: lowercase field key to computed function.
pub type NonlinearMap = HashMap<String, Computed>;

// =============================================================================
// Functions
// =============================================================================

/// A custom post-process function.
///
/// Receives the navigation result, which is `None` whenever the path is
/// absent, and must handle that case itself.
#[derive(Clone)]
pub struct Transform(Arc<dyn Fn(Option<Value>) -> Option<Value> + Send + Sync>);

impl Transform {
    pub fn new(f: impl Fn(Option<Value>) -> Option<Value> + Send + Sync + 'static) -> Self {
        Self(Arc::new(f))
    }

    pub fn call(&self, value: Option<Value>) -> Option<Value> {
        (self.0)(value)
    }
}

impl fmt::Debug for Transform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Transform(..)")
    }
}

/// A nonlinear field: an arbitrary function over the whole source mapping.
#[derive(Clone)]
pub struct Computed(Arc<dyn Fn(&NestedMapping) -> Option<Value> + Send + Sync>);

impl Computed {
    pub fn new(f: impl Fn(&NestedMapping) -> Option<Value> + Send + Sync + 'static) -> Self {
        Self(Arc::new(f))
    }

    pub fn call(&self, source: &NestedMapping) -> Option<Value> {
        (self.0)(source)
    }
}

impl fmt::Debug for Computed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Computed(..)")
    }
}

// =============================================================================
// Linear Map Entries
// =============================================================================

/// Post-processing attached to a path lookup.
#[derive(Debug, Clone)]
pub enum PostProcess {
    /// A declarative operation
    Operation(Operation),
    /// Arbitrary Rust code
    Custom(Transform),
}

/// How a linear field is resolved.
#[derive(Debug, Clone)]
pub enum LinearMapEntry {
    /// Constant value, independent of the source
    Constant(Value),

    /// Value found at `path` in the source, optionally post-processed
    Path {
        path: Vec<String>,
        post_process: Option<PostProcess>,
    },
}

impl LinearMapEntry {
    /// Create a constant entry
    pub fn constant(value: impl Into<Value>) -> Self {
        LinearMapEntry::Constant(value.into())
    }

    /// Create a path lookup
    pub fn path<I, S>(segments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        LinearMapEntry::Path {
            path: segments.into_iter().map(Into::into).collect(),
            post_process: None,
        }
    }

    /// Attach a declarative post-process operation.
    ///
    /// Has no effect on constant entries.
    pub fn with_operation(self, op: Operation) -> Self {
        self.with(PostProcess::Operation(op))
    }

    /// Attach a custom post-process function.
    ///
    /// Has no effect on constant entries.
    pub fn with_transform(
        self,
        f: impl Fn(Option<Value>) -> Option<Value> + Send + Sync + 'static,
    ) -> Self {
        self.with(PostProcess::Custom(Transform::new(f)))
    }

    fn with(self, post: PostProcess) -> Self {
        match self {
            LinearMapEntry::Path { path, .. } => LinearMapEntry::Path {
                path,
                post_process: Some(post),
            },
            constant => constant,
        }
    }

    /// The serializable form, `None` if a custom function is attached.
    pub fn to_definition(&self) -> Option<EntryDefinition> {
        match self {
            LinearMapEntry::Constant(value) => Some(EntryDefinition {
                value: Some(value.clone()),
                ..Default::default()
            }),
            LinearMapEntry::Path { path, post_process } => {
                let post_process = match post_process {
                    None => None,
                    Some(PostProcess::Operation(op)) => Some(op.clone()),
                    Some(PostProcess::Custom(_)) => return None,
                };
                Some(EntryDefinition {
                    value: None,
                    path: Some(path.clone()),
                    post_process,
                })
            }
        }
    }
}

// =============================================================================
// Mapper Config
// =============================================================================

/// Declarative description of a mapper, frozen by [`ResolvedMapper::build`].
#[derive(Debug, Clone)]
pub struct MapperConfig {
    /// String identifier of the mapper
    pub tag: String,
    /// Compatibility revision
    pub version: SpecVersion,
    /// Path lookups and constants
    pub linear_map: Option<LinearMap>,
    /// Computed fields, these win over linear entries with the same key
    pub nonlinear_map: Option<NonlinearMap>,
    /// Extend the standard catalog instead of starting empty
    pub use_standard_catalog: bool,
}

impl MapperConfig {
    /// Create a config with no maps and without the standard catalog
    pub fn new(tag: impl Into<String>, version: SpecVersion) -> Self {
        Self {
            tag: tag.into(),
            version,
            linear_map: None,
            nonlinear_map: None,
            use_standard_catalog: false,
        }
    }

    /// Use the standard catalog as baseline
    pub fn with_standard_catalog(mut self) -> Self {
        self.use_standard_catalog = true;
        self
    }

    /// Replace the linear map
    pub fn with_linear_map(mut self, linear_map: LinearMap) -> Self {
        self.linear_map = Some(linear_map);
        self
    }

    /// Replace the nonlinear map
    pub fn with_nonlinear_map(mut self, nonlinear_map: NonlinearMap) -> Self {
        self.nonlinear_map = Some(nonlinear_map);
        self
    }

    /// Add a single linear entry
    pub fn linear(mut self, key: impl Into<String>, entry: LinearMapEntry) -> Self {
        self.linear_map
            .get_or_insert_with(HashMap::new)
            .insert(key.into(), entry);
        self
    }

    /// Add a single computed field
    pub fn nonlinear(
        mut self,
        key: impl Into<String>,
        f: impl Fn(&NestedMapping) -> Option<Value> + Send + Sync + 'static,
    ) -> Self {
        self.nonlinear_map
            .get_or_insert_with(HashMap::new)
            .insert(key.into(), Computed::new(f));
        self
    }

    /// Freeze this config into a mapper
    pub fn build(self) -> MapperResult<ResolvedMapper> {
        ResolvedMapper::build(self)
    }
}

/// Lowercase all keys of a map, rejecting keys that collide once lowercased.
pub fn normalize_keys<T>(map: HashMap<String, T>) -> MapperResult<HashMap<String, T>> {
    let mut normalized = HashMap::with_capacity(map.len());
    for (key, value) in map {
        let lower = key.to_lowercase();
        if normalized.insert(lower.clone(), value).is_some() {
            return Err(MapperError::DuplicateField(lower));
        }
    }
    Ok(normalized)
}

/// Union of two linear maps where entries of `overrides` replace entries of
/// `base` under the same key.
pub fn merge_linear_maps(base: &LinearMap, overrides: LinearMap) -> LinearMap {
    let mut merged = base.clone();
    for (key, entry) in overrides {
        merged.insert(key, entry);
    }
    merged
}

// =============================================================================
// Mapper Definitions (JSON)
// =============================================================================

/// Serialized form of a linear map entry.
///
/// Exactly one of `value` and `path` must be set, `post_process` requires
/// `path`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct EntryDefinition {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub post_process: Option<Operation>,
}

impl EntryDefinition {
    /// Validate and turn into a [`LinearMapEntry`]
    pub fn into_entry(self, field: &str) -> MapperResult<LinearMapEntry> {
        let invalid = |message: &str| MapperError::InvalidEntry {
            field: field.to_string(),
            message: message.to_string(),
        };

        match (self.value, self.path, self.post_process) {
            (Some(_), Some(_), _) => Err(invalid("both 'value' and 'path' given")),
            (None, None, _) => Err(invalid("neither 'value' nor 'path' given")),
            (Some(_), None, Some(_)) => Err(invalid("'post_process' requires 'path'")),
            (Some(value), None, None) => Ok(LinearMapEntry::Constant(value)),
            (None, Some(path), post_process) => Ok(LinearMapEntry::Path {
                path,
                post_process: post_process.map(PostProcess::Operation),
            }),
        }
    }
}

/// A mapper described in JSON.
///
/// ```json
/// {
///   "tag": "Example Metadata Mapper",
///   "version": {"major": 0, "minor": 3, "patch": 2},
///   "use_standard_catalog": true,
///   "linear_map": {
///     "source-organization": {"value": "https://d-nb.info/gnd/0000000-0"}
///   }
/// }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MapperDefinition {
    pub tag: String,
    pub version: SpecVersion,
    #[serde(default)]
    pub use_standard_catalog: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub linear_map: Option<HashMap<String, EntryDefinition>>,
}

impl MapperDefinition {
    /// Parse a definition from JSON string
    pub fn from_json(json: &str) -> MapperResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Read a definition from a JSON file
    pub fn from_file(path: impl AsRef<Path>) -> MapperResult<Self> {
        let content = fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    /// Serialize to JSON string
    pub fn to_json(&self) -> MapperResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Validate all entries and turn into a [`MapperConfig`]
    pub fn into_config(self) -> MapperResult<MapperConfig> {
        let linear_map = self
            .linear_map
            .map(|entries| {
                entries
                    .into_iter()
                    .map(|(field, def)| {
                        let entry = def.into_entry(&field)?;
                        Ok::<_, MapperError>((field, entry))
                    })
                    .collect::<MapperResult<LinearMap>>()
            })
            .transpose()?;

        Ok(MapperConfig {
            tag: self.tag,
            version: self.version,
            linear_map,
            nonlinear_map: None,
            use_standard_catalog: self.use_standard_catalog,
        })
    }

    /// Validate and build the mapper
    pub fn build(self) -> MapperResult<ResolvedMapper> {
        self.into_config()?.build()
    }
}
