//! Snapshot sources.
//!
//! A source delivers the six raw catalog tables as a single unit. Either every
//! table is available or the whole load fails with [`Error::LoadFailed`].
//!
//! [`Error::LoadFailed`]: crate::error::Error::LoadFailed

mod directory;

pub use directory::DirectorySource;

use std::fmt;

use serde::Serialize;

use crate::error::Result;

/// A raw table record: one JSON object per row, keyed by column name.
pub type RawRecord = serde_json::Map<String, serde_json::Value>;

/// The six source tables of a catalog snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TableKind {
    Classes,
    Subclasses,
    Objects,
    Attributes,
    Links,
    Domains,
}

impl TableKind {
    /// All tables, in load order.
    pub const ALL: [TableKind; 6] = [
        TableKind::Classes,
        TableKind::Subclasses,
        TableKind::Objects,
        TableKind::Attributes,
        TableKind::Links,
        TableKind::Domains,
    ];

    /// Short table name used in logs and reports.
    pub fn as_str(&self) -> &'static str {
        match self {
            TableKind::Classes => "classes",
            TableKind::Subclasses => "subclasses",
            TableKind::Objects => "objects",
            TableKind::Attributes => "attributes",
            TableKind::Links => "links",
            TableKind::Domains => "domains",
        }
    }

    /// File name written by the catalog export.
    pub fn default_file_name(&self) -> &'static str {
        match self {
            TableKind::Classes => "clases.json",
            TableKind::Subclasses => "subclases.json",
            TableKind::Objects => "objetos.json",
            TableKind::Attributes => "atributos.json",
            TableKind::Links => "link_objeto_atributo.json",
            TableKind::Domains => "dominios.json",
        }
    }
}

impl fmt::Display for TableKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Six parsed tables, rows in source order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawTables {
    pub classes: Vec<RawRecord>,
    pub subclasses: Vec<RawRecord>,
    pub objects: Vec<RawRecord>,
    pub attributes: Vec<RawRecord>,
    pub links: Vec<RawRecord>,
    pub domains: Vec<RawRecord>,
}

impl RawTables {
    /// Rows of a table.
    pub fn table(&self, kind: TableKind) -> &[RawRecord] {
        match kind {
            TableKind::Classes => &self.classes,
            TableKind::Subclasses => &self.subclasses,
            TableKind::Objects => &self.objects,
            TableKind::Attributes => &self.attributes,
            TableKind::Links => &self.links,
            TableKind::Domains => &self.domains,
        }
    }

    /// Replace the rows of a table.
    pub fn with_table(mut self, kind: TableKind, rows: Vec<RawRecord>) -> Self {
        let slot = match kind {
            TableKind::Classes => &mut self.classes,
            TableKind::Subclasses => &mut self.subclasses,
            TableKind::Objects => &mut self.objects,
            TableKind::Attributes => &mut self.attributes,
            TableKind::Links => &mut self.links,
            TableKind::Domains => &mut self.domains,
        };
        *slot = rows;
        self
    }

    /// Total row count across all tables.
    pub fn total_rows(&self) -> usize {
        TableKind::ALL.iter().map(|k| self.table(*k).len()).sum()
    }
}

/// Parse the text of one exported table.
///
/// The export writes each table as a JSON array of flat objects.
pub fn parse_table(text: &str) -> std::result::Result<Vec<RawRecord>, serde_json::Error> {
    serde_json::from_str(text)
}

/// Something that can deliver a complete catalog snapshot.
pub trait SnapshotSource {
    /// Load all six tables, or fail as a whole.
    fn load(&self) -> Result<RawTables>;
}

impl SnapshotSource for RawTables {
    fn load(&self) -> Result<RawTables> {
        Ok(self.clone())
    }
}
