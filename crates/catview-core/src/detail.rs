//! Object detail resolution.
//!
//! Resolves an object's attribute sheet in two hops:
//! - Object -> Link -> Attribute: links to a missing attribute are dropped.
//! - Attribute -> DomainValue: a domain-typed attribute always yields an
//!   enumeration, even an empty one; only non-domain attributes fall back to
//!   a scalar tag.

use serde::Serialize;
use tracing::debug;

use crate::catalog::{Attribute, CatalogStore, Object};
use crate::error::{Error, Result};

/// A code/label pair of a domain-typed attribute.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DomainEntry {
    pub code: String,
    pub label: String,
}

/// How an attribute's legal values are described.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum DomainRepr {
    /// Enumerated values, in source order. May be empty.
    Enumerated(Vec<DomainEntry>),
    /// Free scalar type tag.
    Scalar(String),
}

impl DomainRepr {
    pub fn is_enumerated(&self) -> bool {
        matches!(self, DomainRepr::Enumerated(_))
    }

    /// Enumerated entries, or `None` for scalar attributes.
    pub fn entries(&self) -> Option<&[DomainEntry]> {
        match self {
            DomainRepr::Enumerated(entries) => Some(entries.as_slice()),
            DomainRepr::Scalar(_) => None,
        }
    }

    /// Scalar tag, or `None` for enumerated attributes.
    pub fn scalar_tag(&self) -> Option<&str> {
        match self {
            DomainRepr::Scalar(tag) => Some(tag.as_str()),
            DomainRepr::Enumerated(_) => None,
        }
    }
}

/// One line of an object's attribute sheet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AttributeRow {
    pub id: String,
    pub name: String,
    pub definition: String,
    /// Declared type, as stored.
    pub type_label: Option<String>,
    pub domain: DomainRepr,
    pub notes: Option<String>,
}

/// Full detail of one object.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ObjectDetail {
    pub id: String,
    pub name: String,
    pub definition: String,
    pub geometry: String,
    pub attributes: Vec<AttributeRow>,
}

/// Resolves object detail records against a catalog store.
pub struct DetailResolver<'a> {
    store: &'a CatalogStore,
}

impl<'a> DetailResolver<'a> {
    pub fn new(store: &'a CatalogStore) -> Self {
        Self { store }
    }

    /// Resolve the full attribute sheet of an object.
    ///
    /// Fails with [`Error::NotFound`] if the object id is unknown; every other
    /// lookup miss is absorbed.
    pub fn resolve_object_detail(&self, object_id: &str) -> Result<ObjectDetail> {
        let object = self
            .store
            .object(object_id)
            .ok_or_else(|| Error::NotFound(object_id.to_string()))?;

        let attributes = self
            .store
            .links_of(object_id)
            .filter_map(|link| match self.store.attribute(&link.attribute_id) {
                Some(attribute) => Some(self.attribute_row(attribute)),
                None => {
                    debug!(
                        object = %object_id,
                        attribute = %link.attribute_id,
                        "Skipping link to unknown attribute"
                    );
                    None
                }
            })
            .collect();

        Ok(detail(object, attributes))
    }

    fn attribute_row(&self, attribute: &Attribute) -> AttributeRow {
        AttributeRow {
            id: attribute.id.clone(),
            name: attribute.name.clone(),
            definition: attribute.definition.clone(),
            type_label: attribute.type_label.clone(),
            domain: self.domain_repr(attribute),
            notes: attribute.notes.clone(),
        }
    }

    fn domain_repr(&self, attribute: &Attribute) -> DomainRepr {
        if attribute.has_domain {
            let entries = self
                .store
                .domain_of(&attribute.id)
                .map(|value| DomainEntry {
                    code: value.code.clone(),
                    label: value.label.clone(),
                })
                .collect();
            DomainRepr::Enumerated(entries)
        } else {
            let tag = attribute
                .type_label
                .clone()
                .unwrap_or_else(|| self.store.options().unspecified_type_label.clone());
            DomainRepr::Scalar(tag)
        }
    }
}

fn detail(object: &Object, attributes: Vec<AttributeRow>) -> ObjectDetail {
    ObjectDetail {
        id: object.id.clone(),
        name: object.name.clone(),
        definition: object.definition.clone(),
        geometry: object.geometry.clone(),
        attributes,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::CatalogOptions;
    use crate::source::{RawRecord, RawTables};
    use serde_json::{json, Value};

    fn rows(value: Value) -> Vec<RawRecord> {
        serde_json::from_value(value).unwrap()
    }

    fn store_with(options: CatalogOptions) -> CatalogStore {
        let tables = RawTables {
            objects: rows(json!([
                {
                    "ID_Objeto": "O1",
                    "Nombre_Objeto": "Puente",
                    "Definicion": "Estructura sobre un cauce",
                    "Geometria": "Linea",
                    "ID_Subclase_FK": "S1"
                },
                {"ID_Objeto": "O2", "Nombre_Objeto": "Muelle", "ID_Subclase_FK": "S1"}
            ])),
            attributes: rows(json!([
                {"ID_Atributo": "A1", "Nombre_Atributo": "Ancho", "Tipo_Atributo": "Numerico", "Tiene_Dominio": "NO"},
                {"ID_Atributo": "A2", "Nombre_Atributo": "Material", "Tipo_Atributo": "Texto", "Tiene_Dominio": "SI", "Observaciones": "ver norma"},
                {"ID_Atributo": "A3", "Nombre_Atributo": "Estado", "Tiene_Dominio": "SI"},
                {"ID_Atributo": "A5", "Nombre_Atributo": "Nota", "Tiene_Dominio": "NO"}
            ])),
            links: rows(json!([
                {"ID_Objeto_FK": "O1", "ID_Atributo_FK": "A1"},
                {"ID_Objeto_FK": "O1", "ID_Atributo_FK": "A2"},
                {"ID_Objeto_FK": "O1", "ID_Atributo_FK": "A3"},
                {"ID_Objeto_FK": "O1", "ID_Atributo_FK": "A4"},
                {"ID_Objeto_FK": "O2", "ID_Atributo_FK": "A5"}
            ])),
            domains: rows(json!([
                {"ID_Atributo_FK": "A2", "Codigo": "1", "Etiqueta": "Concreto"},
                {"ID_Atributo_FK": "A1", "Codigo": "9", "Etiqueta": "Ignorado"},
                {"ID_Atributo_FK": "A2", "Codigo": "2", "Etiqueta": "Acero"}
            ])),
            ..Default::default()
        };
        CatalogStore::load_with_options(&tables, options)
    }

    #[test]
    fn test_join_drops_dangling_and_keeps_empty_domains() {
        let store = store_with(CatalogOptions::default());
        let detail = DetailResolver::new(&store).resolve_object_detail("O1").unwrap();

        assert_eq!(detail.name, "Puente");
        assert_eq!(detail.definition, "Estructura sobre un cauce");
        assert_eq!(detail.geometry, "Linea");

        let ids: Vec<&str> = detail.attributes.iter().map(|a| a.id.as_str()).collect();
        assert_eq!(ids, vec!["A1", "A2", "A3"]);

        // Non-domain attributes ignore stray domain rows.
        assert_eq!(detail.attributes[0].domain, DomainRepr::Scalar("Numerico".to_string()));

        let material = detail.attributes[1].domain.entries().unwrap();
        assert_eq!(
            material,
            &[
                DomainEntry { code: "1".to_string(), label: "Concreto".to_string() },
                DomainEntry { code: "2".to_string(), label: "Acero".to_string() },
            ]
        );
        assert_eq!(detail.attributes[1].type_label.as_deref(), Some("Texto"));
        assert_eq!(detail.attributes[1].notes.as_deref(), Some("ver norma"));

        assert_eq!(detail.attributes[2].domain, DomainRepr::Enumerated(Vec::new()));
        assert_eq!(detail.attributes[2].domain.scalar_tag(), None);
    }

    #[test]
    fn test_missing_type_uses_unspecified_label() {
        let store = store_with(CatalogOptions::default());
        let detail = DetailResolver::new(&store).resolve_object_detail("O2").unwrap();

        assert_eq!(detail.attributes.len(), 1);
        assert_eq!(detail.attributes[0].domain.scalar_tag(), Some("N/A"));
        assert_eq!(detail.attributes[0].type_label, None);

        let store = store_with(CatalogOptions::default().with_unspecified_type_label("sin tipo"));
        let detail = DetailResolver::new(&store).resolve_object_detail("O2").unwrap();
        assert_eq!(detail.attributes[0].domain.scalar_tag(), Some("sin tipo"));
    }

    #[test]
    fn test_unknown_object_is_not_found() {
        let store = store_with(CatalogOptions::default());
        let err = DetailResolver::new(&store)
            .resolve_object_detail("does-not-exist")
            .unwrap_err();

        assert!(err.is_not_found());
    }

    #[test]
    fn test_domain_repr_serializes_tagged() {
        let scalar = serde_json::to_value(DomainRepr::Scalar("Numerico".to_string())).unwrap();
        assert_eq!(scalar, json!({"kind": "scalar", "value": "Numerico"}));

        let empty = serde_json::to_value(DomainRepr::Enumerated(Vec::new())).unwrap();
        assert_eq!(empty, json!({"kind": "enumerated", "value": []}));
    }
}
