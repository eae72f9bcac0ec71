//! Indexed, read-only catalog snapshot.

use std::collections::HashMap;

use serde::Serialize;
use tracing::{debug, info, warn};

use super::rows::{Attribute, Class, DomainValue, FromRecord, Link, Object, Subclass};
use crate::config::CatalogOptions;
use crate::source::{RawRecord, RawTables, TableKind};

/// Row counts for one table after indexing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TableReport {
    pub table: TableKind,
    /// Rows decoded and indexed.
    pub accepted: usize,
    /// Rows dropped for missing required fields.
    pub ignored: usize,
}

/// Summary of a snapshot load.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct LoadReport {
    pub tables: Vec<TableReport>,
}

impl LoadReport {
    /// Report for a single table.
    pub fn table(&self, kind: TableKind) -> Option<&TableReport> {
        self.tables.iter().find(|t| t.table == kind)
    }

    /// Total rows dropped across all tables.
    pub fn ignored_total(&self) -> usize {
        self.tables.iter().map(|t| t.ignored).sum()
    }

    /// Total rows indexed across all tables.
    pub fn accepted_total(&self) -> usize {
        self.tables.iter().map(|t| t.accepted).sum()
    }
}

/// Primary-key index: id -> row position. Later rows overwrite earlier ones.
type KeyIndex = HashMap<String, usize>;

/// Foreign-key index: parent id -> row positions in source order.
type GroupIndex = HashMap<String, Vec<usize>>;

/// The loaded catalog snapshot and its indexes.
///
/// Immutable after [`CatalogStore::load`]; share it between navigators with
/// an `Arc`.
#[derive(Debug, Clone)]
pub struct CatalogStore {
    classes: Vec<Class>,
    subclasses: Vec<Subclass>,
    objects: Vec<Object>,
    attributes: Vec<Attribute>,
    links: Vec<Link>,
    domains: Vec<DomainValue>,

    class_by_id: KeyIndex,
    subclass_by_id: KeyIndex,
    object_by_id: KeyIndex,
    attribute_by_id: KeyIndex,

    subclasses_by_class: GroupIndex,
    objects_by_subclass: GroupIndex,
    links_by_object: GroupIndex,
    domains_by_attribute: GroupIndex,

    options: CatalogOptions,
    report: LoadReport,
}

impl CatalogStore {
    /// Index a snapshot with default options.
    pub fn load(tables: &RawTables) -> Self {
        Self::load_with_options(tables, CatalogOptions::default())
    }

    /// Index a snapshot.
    ///
    /// Rows missing required fields are dropped and counted in the
    /// [`LoadReport`]; nothing here fails.
    pub fn load_with_options(tables: &RawTables, options: CatalogOptions) -> Self {
        let mut report = LoadReport::default();

        let classes: Vec<Class> =
            decode(TableKind::Classes, &tables.classes, &options, &mut report);
        let subclasses: Vec<Subclass> =
            decode(TableKind::Subclasses, &tables.subclasses, &options, &mut report);
        let objects: Vec<Object> =
            decode(TableKind::Objects, &tables.objects, &options, &mut report);
        let attributes: Vec<Attribute> =
            decode(TableKind::Attributes, &tables.attributes, &options, &mut report);
        let links: Vec<Link> = decode(TableKind::Links, &tables.links, &options, &mut report);
        let domains: Vec<DomainValue> =
            decode(TableKind::Domains, &tables.domains, &options, &mut report);

        let store = Self {
            class_by_id: key_index(&classes, |c| &c.id),
            subclass_by_id: key_index(&subclasses, |s| &s.id),
            object_by_id: key_index(&objects, |o| &o.id),
            attribute_by_id: key_index(&attributes, |a| &a.id),

            subclasses_by_class: group_index(&subclasses, |s| &s.class_id),
            objects_by_subclass: group_index(&objects, |o| &o.subclass_id),
            links_by_object: group_index(&links, |l| &l.object_id),
            domains_by_attribute: group_index(&domains, |d| &d.attribute_id),

            classes,
            subclasses,
            objects,
            attributes,
            links,
            domains,
            options,
            report,
        };

        info!(
            classes = store.classes.len(),
            subclasses = store.subclasses.len(),
            objects = store.objects.len(),
            attributes = store.attributes.len(),
            links = store.links.len(),
            domain_values = store.domains.len(),
            ignored = store.report.ignored_total(),
            "Catalog snapshot indexed"
        );

        store
    }

    /// Options the snapshot was indexed with.
    pub fn options(&self) -> &CatalogOptions {
        &self.options
    }

    /// Load summary.
    pub fn report(&self) -> &LoadReport {
        &self.report
    }

    /// Every class, in source order.
    pub fn classes(&self) -> &[Class] {
        &self.classes
    }

    pub fn class(&self, id: &str) -> Option<&Class> {
        lookup(&self.classes, &self.class_by_id, id)
    }

    pub fn subclass(&self, id: &str) -> Option<&Subclass> {
        lookup(&self.subclasses, &self.subclass_by_id, id)
    }

    pub fn object(&self, id: &str) -> Option<&Object> {
        lookup(&self.objects, &self.object_by_id, id)
    }

    pub fn attribute(&self, id: &str) -> Option<&Attribute> {
        lookup(&self.attributes, &self.attribute_by_id, id)
    }

    /// Subclasses whose parent is `class_id`, in source order.
    pub fn subclasses_of(&self, class_id: &str) -> impl Iterator<Item = &Subclass> + '_ {
        group(&self.subclasses, &self.subclasses_by_class, class_id)
    }

    /// Objects whose parent is `subclass_id`, in source order.
    pub fn objects_of(&self, subclass_id: &str) -> impl Iterator<Item = &Object> + '_ {
        group(&self.objects, &self.objects_by_subclass, subclass_id)
    }

    /// Link rows for `object_id`, in source order.
    pub fn links_of(&self, object_id: &str) -> impl Iterator<Item = &Link> + '_ {
        group(&self.links, &self.links_by_object, object_id)
    }

    /// Domain values of `attribute_id`, in source order.
    pub fn domain_of(&self, attribute_id: &str) -> impl Iterator<Item = &DomainValue> + '_ {
        group(&self.domains, &self.domains_by_attribute, attribute_id)
    }
}

fn decode<T: FromRecord>(
    kind: TableKind,
    records: &[RawRecord],
    options: &CatalogOptions,
    report: &mut LoadReport,
) -> Vec<T> {
    let mut rows = Vec::with_capacity(records.len());
    let mut ignored = 0;

    for (position, record) in records.iter().enumerate() {
        match T::from_record(record, options) {
            Some(row) => rows.push(row),
            None => {
                ignored += 1;
                debug!(table = %kind, position, "Row missing required fields");
            }
        }
    }

    if ignored > 0 {
        warn!(table = %kind, ignored, "Ignored rows with missing required fields");
    }

    report.tables.push(TableReport {
        table: kind,
        accepted: rows.len(),
        ignored,
    });
    rows
}

fn key_index<T>(rows: &[T], key: impl Fn(&T) -> &String) -> KeyIndex {
    let mut index = KeyIndex::with_capacity(rows.len());
    for (position, row) in rows.iter().enumerate() {
        index.insert(key(row).clone(), position);
    }
    index
}

fn group_index<T>(rows: &[T], key: impl Fn(&T) -> &String) -> GroupIndex {
    let mut index = GroupIndex::new();
    for (position, row) in rows.iter().enumerate() {
        index.entry(key(row).clone()).or_default().push(position);
    }
    index
}

fn lookup<'a, T>(rows: &'a [T], index: &KeyIndex, id: &str) -> Option<&'a T> {
    index.get(id).map(|&position| &rows[position])
}

fn group<'a, T>(
    rows: &'a [T],
    index: &'a GroupIndex,
    id: &str,
) -> impl Iterator<Item = &'a T> + 'a {
    index
        .get(id)
        .into_iter()
        .flatten()
        .map(move |&position| &rows[position])
}
