//! Typed catalog rows decoded from raw table records.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::config::CatalogOptions;
use crate::source::RawRecord;

/// Column names written by the catalog export.
pub mod columns {
    pub const CLASS_ID: &str = "ID_Clase";
    pub const CLASS_NAME: &str = "Nombre_Clase";

    pub const SUBCLASS_ID: &str = "ID_Subclase";
    pub const SUBCLASS_NAME: &str = "Nombre_Subclase";
    pub const SUBCLASS_CLASS_FK: &str = "ID_Clase_FK";

    pub const OBJECT_ID: &str = "ID_Objeto";
    pub const OBJECT_NAME: &str = "Nombre_Objeto";
    pub const OBJECT_SUBCLASS_FK: &str = "ID_Subclase_FK";
    pub const GEOMETRY: &str = "Geometria";

    pub const ATTRIBUTE_ID: &str = "ID_Atributo";
    pub const ATTRIBUTE_NAME: &str = "Nombre_Atributo";
    pub const ATTRIBUTE_TYPE: &str = "Tipo_Atributo";
    pub const HAS_DOMAIN: &str = "Tiene_Dominio";
    pub const NOTES: &str = "Observaciones";

    pub const DEFINITION: &str = "Definicion";
    pub const OBJECT_FK: &str = "ID_Objeto_FK";
    pub const ATTRIBUTE_FK: &str = "ID_Atributo_FK";

    pub const DOMAIN_CODE: &str = "Codigo";
    pub const DOMAIN_LABEL: &str = "Etiqueta";
}

/// Decoding of a raw record into a typed row.
///
/// Returns `None` when a required field is absent; the caller counts the row
/// as ignored.
pub trait FromRecord: Sized {
    fn from_record(record: &RawRecord, options: &CatalogOptions) -> Option<Self>;
}

/// Text of a cell, or `None` for missing, null, blank, or nested values.
///
/// Numbers and booleans are rendered as text since the export may or may not
/// have forced every column to a string.
pub fn field_text(record: &RawRecord, column: &str) -> Option<String> {
    let text = match record.get(column)? {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Null | Value::Array(_) | Value::Object(_) => return None,
    };

    if text.trim().is_empty() {
        None
    } else {
        Some(text)
    }
}

fn field_or_empty(record: &RawRecord, column: &str) -> String {
    field_text(record, column).unwrap_or_default()
}

/// A top-level class.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Class {
    pub id: String,
    pub name: String,
}

impl FromRecord for Class {
    fn from_record(record: &RawRecord, _options: &CatalogOptions) -> Option<Self> {
        Some(Self {
            id: field_text(record, columns::CLASS_ID)?,
            name: field_text(record, columns::CLASS_NAME)?,
        })
    }
}

/// A subclass, child of a [`Class`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Subclass {
    pub id: String,
    pub name: String,
    pub class_id: String,
}

impl FromRecord for Subclass {
    fn from_record(record: &RawRecord, _options: &CatalogOptions) -> Option<Self> {
        Some(Self {
            id: field_text(record, columns::SUBCLASS_ID)?,
            name: field_text(record, columns::SUBCLASS_NAME)?,
            class_id: field_text(record, columns::SUBCLASS_CLASS_FK)?,
        })
    }
}

/// A catalog object, child of a [`Subclass`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Object {
    pub id: String,
    pub name: String,
    pub definition: String,
    pub geometry: String,
    pub subclass_id: String,
}

impl FromRecord for Object {
    fn from_record(record: &RawRecord, _options: &CatalogOptions) -> Option<Self> {
        Some(Self {
            id: field_text(record, columns::OBJECT_ID)?,
            name: field_text(record, columns::OBJECT_NAME)?,
            definition: field_or_empty(record, columns::DEFINITION),
            geometry: field_or_empty(record, columns::GEOMETRY),
            subclass_id: field_text(record, columns::OBJECT_SUBCLASS_FK)?,
        })
    }
}

/// An attribute that objects may carry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attribute {
    pub id: String,
    pub name: String,
    pub definition: String,
    /// Declared scalar type, absent when the cell is blank.
    pub type_label: Option<String>,
    /// Whether legal values come from the domain table.
    pub has_domain: bool,
    pub notes: Option<String>,
}

impl FromRecord for Attribute {
    fn from_record(record: &RawRecord, options: &CatalogOptions) -> Option<Self> {
        let has_domain = match record.get(columns::HAS_DOMAIN) {
            Some(Value::Bool(flag)) => *flag,
            _ => field_text(record, columns::HAS_DOMAIN)
                .map(|v| options.is_domain_marker(&v))
                .unwrap_or(false),
        };

        Some(Self {
            id: field_text(record, columns::ATTRIBUTE_ID)?,
            name: field_text(record, columns::ATTRIBUTE_NAME)?,
            definition: field_or_empty(record, columns::DEFINITION),
            type_label: field_text(record, columns::ATTRIBUTE_TYPE),
            has_domain,
            notes: field_text(record, columns::NOTES),
        })
    }
}

/// A row of the object↔attribute link table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Link {
    pub object_id: String,
    pub attribute_id: String,
}

impl FromRecord for Link {
    fn from_record(record: &RawRecord, _options: &CatalogOptions) -> Option<Self> {
        Some(Self {
            object_id: field_text(record, columns::OBJECT_FK)?,
            attribute_id: field_text(record, columns::ATTRIBUTE_FK)?,
        })
    }
}

/// One enumerated value of a domain-typed attribute.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DomainValue {
    pub attribute_id: String,
    pub code: String,
    pub label: String,
}

impl FromRecord for DomainValue {
    fn from_record(record: &RawRecord, _options: &CatalogOptions) -> Option<Self> {
        Some(Self {
            attribute_id: field_text(record, columns::ATTRIBUTE_FK)?,
            code: field_text(record, columns::DOMAIN_CODE)?,
            label: field_or_empty(record, columns::DOMAIN_LABEL),
        })
    }
}
