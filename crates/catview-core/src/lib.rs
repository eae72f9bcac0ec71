//! catview core - catalog store, hierarchy navigator, and detail resolver.
//!
//! This crate indexes a read-only snapshot of six relational catalog tables
//! and answers the class -> subclass -> object drill-down plus the object
//! attribute sheet.

pub mod catalog;
pub mod config;
pub mod detail;
pub mod error;
pub mod navigator;
pub mod source;

pub use catalog::{
    Attribute, CatalogStore, Class, DomainValue, Link, LoadReport, Object, Subclass, TableReport,
};
pub use config::{CatalogOptions, ExplorerConfig, SourceConfig, TableFiles};
pub use detail::{AttributeRow, DetailResolver, DomainEntry, DomainRepr, ObjectDetail};
pub use error::{Error, Result, TableFailure};
pub use navigator::{Navigator, Selection};
pub use source::{DirectorySource, RawRecord, RawTables, SnapshotSource, TableKind};

use std::sync::Arc;

/// Load a snapshot from a source and index it.
///
/// This is the readiness gate: navigators can only be built from the store
/// this returns.
pub fn open_catalog(
    source: &impl SnapshotSource,
    options: CatalogOptions,
) -> Result<Arc<CatalogStore>> {
    let tables = source.load()?;
    Ok(Arc::new(CatalogStore::load_with_options(&tables, options)))
}

/// Load and index the snapshot described by a configuration.
pub fn open_with_config(config: &ExplorerConfig) -> Result<Arc<CatalogStore>> {
    let source = DirectorySource::new(config.source.clone());
    open_catalog(&source, config.catalog.clone())
}
