//! Catalog store.
//!
//! Holds the six loaded tables as typed rows and the primary-key and
//! foreign-key indexes the navigator and resolver query.

mod rows;
mod store;

pub use rows::{
    columns, field_text, Attribute, Class, DomainValue, FromRecord, Link, Object, Subclass,
};
pub use store::{CatalogStore, LoadReport, TableReport};
