//! Metadata mapping engine.
//!
//! Resolves target fields from a [`NestedMapping`], either linearly (path
//! lookup or constant) or through a computed function.
//!
//! - `config`: linear map entries (constants, paths), nonlinear maps, mapper definitions
//! - `operations`: declarative post-processing of path lookups
//! - `navigator`: null-propagating path lookup
//! - `catalog`: the standard field catalog shared by all repositories
//! - `resolver`: build a [`ResolvedMapper`] and resolve fields
//!
//! ## Usage Flow
//!
//! ```text
//! MapperConfig → ResolvedMapper::build → resolve(field, record) → value | None
//! ```
//!
//! ## Example
//!
//! ```rust
//! use serde_json::json;
//! use metadata_mapper::{LinearMapEntry, MapperConfig, SpecVersion};
//!
//! let mapper = MapperConfig::new("Example Metadata Mapper", SpecVersion::new(0, 3, 2))
//!     .with_standard_catalog()
//!     .linear("source-organization", LinearMapEntry::constant("https://d-nb.info/gnd/0000000-0"))
//!     .build()
//!     .unwrap();
//!
//! let record = json!({"header": {"identifier": "oai:example.org:42"}});
//! assert_eq!(mapper.resolve("External-Identifier", &record), Some(json!("42")));
//! assert_eq!(mapper.resolve("DC-Creator", &record), None);
//! ```

pub mod catalog;
pub mod config;
pub mod navigator;
pub mod operations;
pub mod resolver;

use serde_json::Value;

use crate::models::{NestedMapping, SpecVersion};

// Re-exports for convenience
pub use catalog::{standard_catalog, STANDARD_CATALOG, UNMAPPED_FIELDS};
pub use config::{
    Computed, EntryDefinition, LinearMap, LinearMapEntry, MapperConfig, MapperDefinition,
    NonlinearMap, PostProcess, Transform,
};
pub use navigator::navigate;
pub use operations::{operations_description, Operation};
pub use resolver::{ResolvedMapper, Strategy};

/// Capability of a metadata mapper: resolve target fields from a nested
/// mapping produced by a [`crate::MetadataConverter`].
pub trait MetadataMapper {
    /// String identifier of the implementation
    fn mapper_tag(&self) -> &str;

    /// Compatibility revision of the implementation
    fn spec_version(&self) -> &SpecVersion;

    /// Value of `field` in `source`, `None` if unmapped or absent
    fn resolve(&self, field: &str, source: &NestedMapping) -> Option<Value>;
}
