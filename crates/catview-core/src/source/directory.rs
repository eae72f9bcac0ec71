//! Directory-backed snapshot source.

use std::io;
use std::path::PathBuf;

use tracing::{debug, info};

use super::{parse_table, RawRecord, RawTables, SnapshotSource, TableKind};
use crate::config::SourceConfig;
use crate::error::{Error, Result, TableFailure};

/// Reads the six exported JSON tables from a directory.
#[derive(Debug, Clone)]
pub struct DirectorySource {
    config: SourceConfig,
}

impl DirectorySource {
    /// Create a source for the given configuration.
    pub fn new(config: SourceConfig) -> Self {
        Self { config }
    }

    /// Create a source for a directory using the default file names.
    pub fn open(data_dir: impl Into<PathBuf>) -> Self {
        Self::new(SourceConfig::new(data_dir))
    }

    /// The source configuration.
    pub fn config(&self) -> &SourceConfig {
        &self.config
    }

    /// Load all six tables concurrently.
    #[cfg(feature = "async")]
    pub async fn load_async(&self) -> Result<RawTables> {
        let read = |kind: TableKind| {
            let path = self.config.path_for(kind);
            async move {
                let text = tokio::fs::read_to_string(&path).await;
                (kind, path, text)
            }
        };

        let (classes, subclasses, objects, attributes, links, domains) = tokio::join!(
            read(TableKind::Classes),
            read(TableKind::Subclasses),
            read(TableKind::Objects),
            read(TableKind::Attributes),
            read(TableKind::Links),
            read(TableKind::Domains),
        );

        assemble(vec![classes, subclasses, objects, attributes, links, domains])
    }
}

impl SnapshotSource for DirectorySource {
    fn load(&self) -> Result<RawTables> {
        let reads = TableKind::ALL
            .iter()
            .map(|&kind| {
                let path = self.config.path_for(kind);
                let text = std::fs::read_to_string(&path);
                (kind, path, text)
            })
            .collect();

        assemble(reads)
    }
}

/// Parse every read result, collecting all failures into one error.
fn assemble(reads: Vec<(TableKind, PathBuf, io::Result<String>)>) -> Result<RawTables> {
    let mut tables = RawTables::default();
    let mut failures = Vec::new();

    for (kind, path, text) in reads {
        match text.map_err(|e| e.to_string()).and_then(|t| parse_rows(&t)) {
            Ok(rows) => {
                debug!(table = %kind, path = %path.display(), rows = rows.len(), "Read table");
                tables = tables.with_table(kind, rows);
            }
            Err(reason) => {
                failures.push(TableFailure::new(
                    kind,
                    format!("{}: {}", path.display(), reason),
                ));
            }
        }
    }

    if !failures.is_empty() {
        return Err(Error::LoadFailed { failures });
    }

    info!(rows = tables.total_rows(), "Catalog tables read");
    Ok(tables)
}

fn parse_rows(text: &str) -> std::result::Result<Vec<RawRecord>, String> {
    parse_table(text).map_err(|e| e.to_string())
}
