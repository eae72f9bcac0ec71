//! Integration tests for catalog navigation and detail resolution.

use std::fs;
use std::sync::Arc;
use std::thread;

use catview_core::{
    open_catalog, open_with_config, CatalogOptions, CatalogStore, DirectorySource, DomainRepr,
    Error, ExplorerConfig, Navigator, RawRecord, RawTables, TableKind,
};
use serde_json::{json, Value};

fn rows(value: Value) -> Vec<RawRecord> {
    serde_json::from_value(value).unwrap()
}

fn catalog_tables() -> RawTables {
    RawTables {
        classes: rows(json!([
            {"ID_Clase": "C1", "Nombre_Clase": "Infraestructura"},
            {"ID_Clase": "C2", "Nombre_Clase": "Hidrografia"}
        ])),
        subclasses: rows(json!([
            {"ID_Subclase": "S1", "Nombre_Subclase": "Transporte", "ID_Clase_FK": "C1"},
            {"ID_Subclase": "S2", "Nombre_Subclase": "Drenaje", "ID_Clase_FK": "C2"}
        ])),
        objects: rows(json!([
            {
                "ID_Objeto": "O1",
                "Nombre_Objeto": "Via",
                "Definicion": "Franja destinada al transito",
                "Geometria": "Linea",
                "ID_Subclase_FK": "S1"
            },
            {
                "ID_Objeto": "O2",
                "Nombre_Objeto": "Puente",
                "Definicion": "Estructura sobre un obstaculo",
                "Geometria": "Poligono",
                "ID_Subclase_FK": "S1"
            }
        ])),
        attributes: rows(json!([
            {
                "ID_Atributo": "A1",
                "Nombre_Atributo": "Longitud",
                "Definicion": "Longitud en metros",
                "Tipo_Atributo": "Numeric",
                "Tiene_Dominio": "NO",
                "Observaciones": ""
            },
            {
                "ID_Atributo": "A2",
                "Nombre_Atributo": "Material",
                "Definicion": "Material de construccion",
                "Tipo_Atributo": "Texto",
                "Tiene_Dominio": "SI",
                "Observaciones": "Ver norma tecnica"
            },
            {
                "ID_Atributo": "A3",
                "Nombre_Atributo": "Estado",
                "Definicion": "Estado de conservacion",
                "Tipo_Atributo": "Texto",
                "Tiene_Dominio": "SI"
            }
        ])),
        links: rows(json!([
            {"ID_Objeto_FK": "O1", "ID_Atributo_FK": "A1"},
            {"ID_Objeto_FK": "O2", "ID_Atributo_FK": "A1"},
            {"ID_Objeto_FK": "O2", "ID_Atributo_FK": "A2"},
            {"ID_Objeto_FK": "O2", "ID_Atributo_FK": "A3"},
            {"ID_Objeto_FK": "O2", "ID_Atributo_FK": "A4"}
        ])),
        domains: rows(json!([
            {"ID_Atributo_FK": "A2", "Codigo": "1", "Etiqueta": "Concreto"},
            {"ID_Atributo_FK": "A2", "Codigo": "2", "Etiqueta": "Acero"}
        ])),
    }
}

fn navigator() -> Navigator {
    Navigator::new(Arc::new(CatalogStore::load(&catalog_tables())))
}

// ============== Tests ==============

#[test]
fn test_end_to_end_drill_down() {
    let mut nav = navigator();

    let subclasses = nav.select_class("C1");
    assert_eq!(subclasses.len(), 1);
    assert_eq!(subclasses[0].id, "S1");

    let objects = nav.select_subclass("S1");
    let ids: Vec<&str> = objects.iter().map(|o| o.id.as_str()).collect();
    assert_eq!(ids, vec!["O1", "O2"]);

    let detail = nav.open_object("O1").unwrap();
    assert_eq!(detail.name, "Via");
    assert_eq!(detail.geometry, "Linea");
    assert_eq!(detail.attributes.len(), 1);

    let row = &detail.attributes[0];
    assert_eq!(row.domain, DomainRepr::Scalar("Numeric".to_string()));
    assert!(row.domain.entries().is_none());
    assert_eq!(row.notes, None);

    let selection = nav.current_selection();
    assert_eq!(selection.class.as_deref(), Some("C1"));
    assert_eq!(selection.subclass.as_deref(), Some("S1"));
    assert_eq!(selection.object.as_deref(), Some("O1"));
}

#[test]
fn test_join_is_best_effort() {
    let nav = navigator();
    let detail = nav.resolve_object_detail("O2").unwrap();

    let ids: Vec<&str> = detail.attributes.iter().map(|a| a.id.as_str()).collect();
    assert_eq!(ids, vec!["A1", "A2", "A3"]);

    assert_eq!(detail.attributes[0].domain.scalar_tag(), Some("Numeric"));

    let material = detail.attributes[1].domain.entries().unwrap();
    let pairs: Vec<(&str, &str)> = material
        .iter()
        .map(|e| (e.code.as_str(), e.label.as_str()))
        .collect();
    assert_eq!(pairs, vec![("1", "Concreto"), ("2", "Acero")]);

    let estado = &detail.attributes[2].domain;
    assert!(estado.is_enumerated());
    assert_eq!(estado.entries().map(<[_]>::len), Some(0));
}

#[test]
fn test_detail_not_found_produces_no_record() {
    let nav = navigator();

    match nav.resolve_object_detail("does-not-exist") {
        Err(Error::NotFound(id)) => assert_eq!(id, "does-not-exist"),
        other => panic!("expected NotFound, got {other:?}"),
    }
}

#[test]
fn test_cascading_reset_across_sequences() {
    let mut nav = navigator();
    let sequences: &[&[(&str, &str)]] = &[
        &[("class", "C1"), ("subclass", "S1"), ("object", "O1"), ("class", "C2")],
        &[("class", "C2"), ("subclass", "S2"), ("class", "C1")],
        &[("object", "O2"), ("class", "C1")],
        &[("subclass", "S1"), ("object", "O1"), ("subclass", "S2")],
    ];

    for steps in sequences {
        nav.reset();
        for (level, id) in steps.iter() {
            let before = nav.current_selection().clone();
            match *level {
                "class" => {
                    nav.select_class(id);
                    let after = nav.current_selection();
                    assert_eq!(after.class.as_deref(), Some(*id));
                    assert_eq!(after.subclass, None);
                    assert_eq!(after.object, None);
                }
                "subclass" => {
                    nav.select_subclass(id);
                    let after = nav.current_selection();
                    assert_eq!(after.class, before.class);
                    assert_eq!(after.subclass.as_deref(), Some(*id));
                    assert_eq!(after.object, None);
                }
                _ => {
                    nav.select_object(id);
                    assert_eq!(nav.current_selection().object.as_deref(), Some(*id));
                }
            }
        }
    }
}

#[test]
fn test_filter_correctness_for_every_class() {
    let tables = catalog_tables();
    let store = Arc::new(CatalogStore::load(&tables));
    let mut nav = Navigator::new(Arc::clone(&store));

    for class in store.classes() {
        let expected: Vec<String> = tables
            .subclasses
            .iter()
            .filter(|r| r["ID_Clase_FK"] == class.id.as_str())
            .map(|r| r["ID_Subclase"].as_str().unwrap().to_string())
            .collect();

        let actual: Vec<String> = nav
            .select_class(&class.id)
            .into_iter()
            .map(|s| s.id)
            .collect();

        assert_eq!(actual, expected, "class {}", class.id);
    }
}

#[test]
fn test_unknown_subclass_is_safe() {
    let mut nav = navigator();
    assert!(nav.select_subclass("does-not-exist").is_empty());
    assert!(nav.current_selection().is_empty());
}

#[test]
fn test_store_shared_across_navigators() {
    let store = Arc::new(CatalogStore::load(&catalog_tables()));

    let handles: Vec<_> = ["C1", "C2"]
        .into_iter()
        .map(|class_id| {
            let store = Arc::clone(&store);
            thread::spawn(move || {
                let mut nav = Navigator::new(store);
                let subclasses = nav.select_class(class_id);
                (nav.current_selection().clone(), subclasses.len())
            })
        })
        .collect();

    for handle in handles {
        let (selection, count) = handle.join().unwrap();
        assert!(selection.class.is_some());
        assert_eq!(count, 1);
    }
}

#[test]
fn test_open_catalog_from_directory() {
    let dir = tempfile::tempdir().unwrap();
    let tables = catalog_tables();
    for kind in TableKind::ALL {
        let text = serde_json::to_string_pretty(tables.table(kind)).unwrap();
        fs::write(dir.path().join(kind.default_file_name()), text).unwrap();
    }

    let source = DirectorySource::open(dir.path());
    let store = open_catalog(&source, CatalogOptions::default()).unwrap();
    assert_eq!(store.classes().len(), 2);
    assert_eq!(store.report().ignored_total(), 0);

    let config = ExplorerConfig::new(dir.path());
    let store = open_with_config(&config).unwrap();
    let detail = Navigator::new(store).resolve_object_detail("O2").unwrap();
    assert_eq!(detail.attributes.len(), 3);
}

#[test]
fn test_open_catalog_fails_as_a_whole() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("clases.json"), "[]").unwrap();

    let err = open_with_config(&ExplorerConfig::new(dir.path())).unwrap_err();
    match err {
        Error::LoadFailed { failures } => assert_eq!(failures.len(), 5),
        other => panic!("expected LoadFailed, got {other:?}"),
    }
}
