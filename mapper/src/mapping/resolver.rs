//! Mapper factory and field resolution.
//!
//! [`ResolvedMapper::build`] freezes a [`MapperConfig`] into its effective
//! maps. [`ResolvedMapper::resolve`] then answers field queries against
//! any number of source records.

use serde_json::Value;
use std::collections::HashMap;
use tracing::{debug, trace};

use super::catalog::standard_catalog;
use super::config::{
    merge_linear_maps, normalize_keys, Computed, LinearMap, LinearMapEntry, MapperConfig,
    NonlinearMap, PostProcess, Transform,
};
use super::navigator::navigate;
use super::operations::CompiledOperation;
use super::MetadataMapper;
use crate::error::{MapperError, MapperResult};
use crate::models::{NestedMapping, SpecVersion};

/// Which map a field is resolved from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Strategy {
    /// Path lookup or constant
    Linear,
    /// Computed function
    Nonlinear,
}

#[derive(Debug, Clone)]
enum Processor {
    Operation(CompiledOperation),
    Custom(Transform),
}

/// A linear entry together with its compiled post-process
#[derive(Debug, Clone)]
struct ResolvedEntry {
    entry: LinearMapEntry,
    processor: Option<Processor>,
}

impl ResolvedEntry {
    fn compile(field: &str, entry: LinearMapEntry) -> MapperResult<Self> {
        let processor = match &entry {
            LinearMapEntry::Constant(_) => None,
            LinearMapEntry::Path { path, .. } if path.is_empty() => {
                return Err(MapperError::EmptyPath(field.to_string()));
            }
            LinearMapEntry::Path { post_process, .. } => match post_process {
                None => None,
                Some(PostProcess::Operation(op)) => Some(Processor::Operation(
                    op.compile().map_err(|source| MapperError::InvalidPattern {
                        field: field.to_string(),
                        source,
                    })?,
                )),
                Some(PostProcess::Custom(f)) => Some(Processor::Custom(f.clone())),
            },
        };
        Ok(Self { entry, processor })
    }

    fn resolve(&self, source: &NestedMapping) -> Option<Value> {
        match &self.entry {
            LinearMapEntry::Constant(value) => Some(value.clone()),
            LinearMapEntry::Path { path, .. } => {
                let found = navigate(source, path);
                match &self.processor {
                    None => found.cloned(),
                    Some(Processor::Operation(op)) => op.apply(found),
                    Some(Processor::Custom(f)) => f.call(found.cloned()),
                }
            }
        }
    }
}

/// A mapper frozen from its configuration.
///
/// Holds the effective linear map (after merging with the standard catalog
/// and removing keys claimed by the nonlinear map) and the nonlinear map.
/// Immutable, `Send` and `Sync`: one instance can serve any number of
/// concurrent callers.
#[derive(Debug, Clone)]
pub struct ResolvedMapper {
    tag: String,
    version: SpecVersion,
    linear_map: HashMap<String, ResolvedEntry>,
    nonlinear_map: NonlinearMap,
}

impl ResolvedMapper {
    /// Build a mapper from its configuration.
    ///
    /// 1. Start from the standard catalog (merged with the user linear map,
    ///    user entries winning) or from the user linear map alone.
    /// 2. Drop every linear key that also appears in the nonlinear map.
    /// 3. Compile post-process operations.
    ///
    /// Fails on malformed configuration: duplicate keys after lowercasing,
    /// empty paths, or patterns that do not compile.
    pub fn build(config: MapperConfig) -> MapperResult<Self> {
        let MapperConfig {
            tag,
            version,
            linear_map,
            nonlinear_map,
            use_standard_catalog,
        } = config;

        let user_linear = linear_map.map(normalize_keys).transpose()?;
        let mut linear: LinearMap = match (use_standard_catalog, user_linear) {
            (true, Some(user)) => merge_linear_maps(standard_catalog(), user),
            (true, None) => standard_catalog().clone(),
            (false, Some(user)) => user,
            (false, None) => LinearMap::new(),
        };

        let nonlinear_map = nonlinear_map
            .map(normalize_keys)
            .transpose()?
            .unwrap_or_default();

        let before = linear.len();
        linear.retain(|key, _| !nonlinear_map.contains_key(key));
        let shadowed = before - linear.len();

        let linear_map = linear
            .into_iter()
            .map(|(field, entry)| {
                let resolved = ResolvedEntry::compile(&field, entry)?;
                Ok::<_, MapperError>((field, resolved))
            })
            .collect::<MapperResult<HashMap<_, _>>>()?;

        debug!(
            tag = %tag,
            version = %version,
            linear = linear_map.len(),
            nonlinear = nonlinear_map.len(),
            shadowed,
            "built metadata mapper"
        );

        Ok(Self {
            tag,
            version,
            linear_map,
            nonlinear_map,
        })
    }

    /// String identifier of this mapper
    pub fn tag(&self) -> &str {
        &self.tag
    }

    /// Compatibility revision of this mapper
    pub fn spec_version(&self) -> &SpecVersion {
        &self.version
    }

    /// Resolve `field` (case-insensitive) against `source`.
    ///
    /// Returns `None` for fields this mapper does not know, and for fields
    /// whose source data is absent. Never fails; panics raised by custom
    /// functions are not caught.
    pub fn resolve(&self, field: &str, source: &NestedMapping) -> Option<Value> {
        let key = field.to_lowercase();

        let value = if let Some(entry) = self.linear_map.get(&key) {
            trace!(field = %key, "linear resolution");
            entry.resolve(source)
        } else if let Some(computed) = self.nonlinear_map.get(&key) {
            trace!(field = %key, "nonlinear resolution");
            computed.call(source)
        } else {
            trace!(field = %key, "field not mapped");
            return None;
        };

        value.filter(|v| !v.is_null())
    }

    /// Which strategy resolves `field`, if any
    pub fn strategy(&self, field: &str) -> Option<Strategy> {
        let key = field.to_lowercase();
        if self.linear_map.contains_key(&key) {
            Some(Strategy::Linear)
        } else if self.nonlinear_map.contains_key(&key) {
            Some(Strategy::Nonlinear)
        } else {
            None
        }
    }

    /// The effective linear entry for `field`
    pub fn linear_entry(&self, field: &str) -> Option<&LinearMapEntry> {
        self.linear_map
            .get(&field.to_lowercase())
            .map(|resolved| &resolved.entry)
    }

    /// The computed function for `field`
    pub fn nonlinear_entry(&self, field: &str) -> Option<&Computed> {
        self.nonlinear_map.get(&field.to_lowercase())
    }

    /// All fields this mapper can resolve, sorted
    pub fn fields(&self) -> Vec<&str> {
        let mut fields: Vec<&str> = self
            .linear_map
            .keys()
            .chain(self.nonlinear_map.keys())
            .map(String::as_str)
            .collect();
        fields.sort_unstable();
        fields
    }
}

impl MetadataMapper for ResolvedMapper {
    fn mapper_tag(&self) -> &str {
        &self.tag
    }

    fn spec_version(&self) -> &SpecVersion {
        &self.version
    }

    fn resolve(&self, field: &str, source: &NestedMapping) -> Option<Value> {
        ResolvedMapper::resolve(self, field, source)
    }
}
