//! Explorer configuration.

use std::path::{Path, PathBuf};

use crate::source::TableKind;

/// Default directory holding the exported catalog tables.
pub const DEFAULT_DATA_DIR: &str = "./datos";

/// Label shown for scalar attributes whose type cell is blank.
pub const DEFAULT_UNSPECIFIED_TYPE_LABEL: &str = "N/A";

/// Cell values that mark an attribute as domain-typed (compared case-insensitively).
pub const DEFAULT_DOMAIN_MARKERS: &[&str] = &["SI", "true", "1"];

/// File names of the six exported tables.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableFiles {
    pub classes: String,
    pub subclasses: String,
    pub objects: String,
    pub attributes: String,
    pub links: String,
    pub domains: String,
}

impl Default for TableFiles {
    fn default() -> Self {
        Self {
            classes: TableKind::Classes.default_file_name().to_string(),
            subclasses: TableKind::Subclasses.default_file_name().to_string(),
            objects: TableKind::Objects.default_file_name().to_string(),
            attributes: TableKind::Attributes.default_file_name().to_string(),
            links: TableKind::Links.default_file_name().to_string(),
            domains: TableKind::Domains.default_file_name().to_string(),
        }
    }
}

impl TableFiles {
    /// File name configured for a table.
    pub fn file_name(&self, table: TableKind) -> &str {
        match table {
            TableKind::Classes => &self.classes,
            TableKind::Subclasses => &self.subclasses,
            TableKind::Objects => &self.objects,
            TableKind::Attributes => &self.attributes,
            TableKind::Links => &self.links,
            TableKind::Domains => &self.domains,
        }
    }

    /// Override the file name of a single table.
    pub fn with_file_name(mut self, table: TableKind, name: impl Into<String>) -> Self {
        let name = name.into();
        match table {
            TableKind::Classes => self.classes = name,
            TableKind::Subclasses => self.subclasses = name,
            TableKind::Objects => self.objects = name,
            TableKind::Attributes => self.attributes = name,
            TableKind::Links => self.links = name,
            TableKind::Domains => self.domains = name,
        }
        self
    }
}

/// Where the snapshot source reads tables from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceConfig {
    /// Directory containing the table files.
    pub data_dir: PathBuf,
    /// Per-table file names inside `data_dir`.
    pub files: TableFiles,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from(DEFAULT_DATA_DIR),
            files: TableFiles::default(),
        }
    }
}

impl SourceConfig {
    /// Create a source configuration rooted at the given directory.
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
            ..Default::default()
        }
    }

    /// Set the table file names.
    pub fn with_files(mut self, files: TableFiles) -> Self {
        self.files = files;
        self
    }

    /// Full path of a table file.
    pub fn path_for(&self, table: TableKind) -> PathBuf {
        self.data_dir.join(self.files.file_name(table))
    }

    /// The data directory.
    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }
}

/// How raw cells are interpreted while indexing and resolving.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogOptions {
    /// Cell values that mark an attribute as domain-typed.
    pub domain_markers: Vec<String>,
    /// Scalar tag used when an attribute has no type.
    pub unspecified_type_label: String,
}

impl Default for CatalogOptions {
    fn default() -> Self {
        Self {
            domain_markers: DEFAULT_DOMAIN_MARKERS
                .iter()
                .map(|m| m.to_string())
                .collect(),
            unspecified_type_label: DEFAULT_UNSPECIFIED_TYPE_LABEL.to_string(),
        }
    }
}

impl CatalogOptions {
    /// Replace the domain markers.
    pub fn with_domain_markers<I, S>(mut self, markers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.domain_markers = markers.into_iter().map(Into::into).collect();
        self
    }

    /// Set the unspecified type label.
    pub fn with_unspecified_type_label(mut self, label: impl Into<String>) -> Self {
        self.unspecified_type_label = label.into();
        self
    }

    /// Check whether a cell value marks an attribute as domain-typed.
    pub fn is_domain_marker(&self, value: &str) -> bool {
        let value = value.trim();
        self.domain_markers
            .iter()
            .any(|m| m.trim().eq_ignore_ascii_case(value))
    }
}

/// Top-level configuration for loading and browsing a catalog.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExplorerConfig {
    /// Snapshot source settings.
    pub source: SourceConfig,
    /// Cell interpretation settings.
    pub catalog: CatalogOptions,
}

impl ExplorerConfig {
    /// Create a configuration reading tables from the given directory.
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            source: SourceConfig::new(data_dir),
            catalog: CatalogOptions::default(),
        }
    }

    /// Set the source configuration.
    pub fn with_source(mut self, source: SourceConfig) -> Self {
        self.source = source;
        self
    }

    /// Set the catalog options.
    pub fn with_catalog_options(mut self, catalog: CatalogOptions) -> Self {
        self.catalog = catalog;
        self
    }
}
