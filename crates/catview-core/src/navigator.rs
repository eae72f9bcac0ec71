//! Hierarchy navigation over a loaded catalog.
//!
//! The navigator owns the per-level selection (class, subclass, object).
//! Selecting at one level clears every deeper level. Unknown class and
//! subclass ids are ignored and yield an empty list.

use std::sync::Arc;

use serde::Serialize;
use tracing::debug;

use crate::catalog::{CatalogStore, Class, Object, Subclass};
use crate::detail::{DetailResolver, ObjectDetail};
use crate::error::Result;

/// Current selection, one optional id per level.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Selection {
    pub class: Option<String>,
    pub subclass: Option<String>,
    pub object: Option<String>,
}

impl Selection {
    /// Check if nothing is selected.
    pub fn is_empty(&self) -> bool {
        self.class.is_none() && self.subclass.is_none() && self.object.is_none()
    }
}

/// Drives class -> subclass -> object selection for one viewer.
///
/// Each viewer owns its navigator; the store behind it can be shared.
#[derive(Debug, Clone)]
pub struct Navigator {
    store: Arc<CatalogStore>,
    selection: Selection,
}

impl Navigator {
    /// Create a navigator with nothing selected.
    pub fn new(store: Arc<CatalogStore>) -> Self {
        Self {
            store,
            selection: Selection::default(),
        }
    }

    /// The store this navigator reads from.
    pub fn store(&self) -> &Arc<CatalogStore> {
        &self.store
    }

    /// The top-level list: every class in source order.
    pub fn classes(&self) -> &[Class] {
        self.store.classes()
    }

    /// Select a class and return its subclasses.
    ///
    /// Clears the subclass and object selection. An unknown id leaves the
    /// selection untouched and returns an empty list.
    pub fn select_class(&mut self, id: &str) -> Vec<Subclass> {
        if self.store.class(id).is_none() {
            debug!(class = %id, "Ignoring selection of unknown class");
            return Vec::new();
        }

        self.selection = Selection {
            class: Some(id.to_string()),
            subclass: None,
            object: None,
        };
        debug!(class = %id, "Class selected");

        self.store.subclasses_of(id).cloned().collect()
    }

    /// Select a subclass and return its objects.
    ///
    /// Clears the object selection and leaves the class selection as is. The
    /// subclass is not checked against the selected class. An unknown id
    /// leaves the selection untouched and returns an empty list.
    pub fn select_subclass(&mut self, id: &str) -> Vec<Object> {
        if self.store.subclass(id).is_none() {
            debug!(subclass = %id, "Ignoring selection of unknown subclass");
            return Vec::new();
        }

        self.selection.subclass = Some(id.to_string());
        self.selection.object = None;
        debug!(subclass = %id, "Subclass selected");

        self.store.objects_of(id).cloned().collect()
    }

    /// Select an object. Returns the id for the caller to resolve.
    pub fn select_object<'i>(&mut self, id: &'i str) -> &'i str {
        self.selection.object = Some(id.to_string());
        debug!(object = %id, "Object selected");
        id
    }

    /// Select an object and resolve its detail.
    ///
    /// The selection is recorded even when the object turns out to be unknown.
    pub fn open_object(&mut self, id: &str) -> Result<ObjectDetail> {
        let id = self.select_object(id);
        DetailResolver::new(&self.store).resolve_object_detail(id)
    }

    /// Resolve an object's detail without changing the selection.
    pub fn resolve_object_detail(&self, id: &str) -> Result<ObjectDetail> {
        DetailResolver::new(&self.store).resolve_object_detail(id)
    }

    /// The current selection.
    pub fn current_selection(&self) -> &Selection {
        &self.selection
    }

    /// Clear every level.
    pub fn reset(&mut self) {
        self.selection = Selection::default();
    }
}
