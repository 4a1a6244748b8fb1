//! # Metadata Mapper - flat archival fields from harvested repository records
//!
//! Turns OAI-PMH records from several institutional repositories into the
//! shared field vocabulary (creator, title, identifiers, transfer URLs, ...)
//! used to build BagIt `bag-info` tags.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────┐     ┌─────────────┐     ┌─────────────┐     ┌─────────────┐
//! │  OAI-PMH    │────▶│  Converter  │────▶│   Mapper    │────▶│  bag-info   │
//! │  XML text   │     │ (xml→dict)  │     │ (resolve)   │     │    tags     │
//! └─────────────┘     └─────────────┘     └─────────────┘     └─────────────┘
//! ```
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use metadata_mapper::{MetadataConverter, MetadataMapper, OaiPmhConverter, Repository};
//!
//! let record = OaiPmhConverter::new().get_dict(&xml)?;
//! let mapper = Repository::Miami.mapper()?;
//! let creators = mapper.resolve("DC-Creator", &record);
//! ```
//!
//! ## Modules
//!
//! - [`error`] - Error types
//! - [`models`] - Nested mappings, spec versions, field vocabulary
//! - [`converter`] - Source text to nested mapping
//! - [`mapping`] - Path navigation, catalog, mapper factory and resolution
//! - [`repositories`] - Mapper configurations per source repository
//! - [`bag_info`] - Resolved fields as BagIt tags

// Core modules
pub mod error;
pub mod models;

// Conversion
pub mod converter;

// Mapping
pub mod mapping;
pub mod repositories;

// Packaging
pub mod bag_info;

// =============================================================================
// Re-exports - Error types
// =============================================================================

pub use error::{
    CliError, CliResult, ConverterError, ConverterResult, MapperError, MapperResult,
};

// =============================================================================
// Re-exports - Models
// =============================================================================

pub use models::{fields, NestedMapping, SpecVersion};

// =============================================================================
// Re-exports - Converter
// =============================================================================

pub use converter::{xml_to_value, MetadataConverter, OaiPmhConverter};

// =============================================================================
// Re-exports - Mapping
// =============================================================================

pub use mapping::{
    navigate, operations_description, standard_catalog, Computed, EntryDefinition, LinearMap,
    LinearMapEntry, MapperConfig, MapperDefinition, MetadataMapper, NonlinearMap, Operation,
    PostProcess, ResolvedMapper, Strategy, Transform, STANDARD_CATALOG, UNMAPPED_FIELDS,
};

// =============================================================================
// Re-exports - Repositories
// =============================================================================

pub use repositories::Repository;

// =============================================================================
// Re-exports - bag-info
// =============================================================================

pub use bag_info::{bag_info, resolve_fields, transfer_urls, BAG_INFO_FIELDS};
