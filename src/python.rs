use crate::dnd::{self, DropIntent};
use crate::flow::{Action, FlowStore};
use crate::graph::{self, LayeredLayout, LayoutConfig};
use crate::step::{StepId, StepKind};
use crate::storage::MemoryStorage;
use pyo3::exceptions::PyValueError;
use pyo3::prelude::*;

fn value_error(e: impl std::fmt::Display) -> PyErr {
    PyErr::new::<PyValueError, _>(e.to_string())
}

/// An in-memory chatbot flow editor.
///
/// Each instance starts from the seed flow (a welcome step followed by an
/// email question). Mutations are applied immediately; use `export_json` to
/// obtain the document consumed by the chat widget.
#[pyclass(name = "FlowEditor", unsendable)]
struct FlowEditorPy {
    store: FlowStore<MemoryStorage>,
}

#[pymethods]
impl FlowEditorPy {
    /// Creates an editor, optionally restoring a persisted snapshot.
    ///
    /// Args:
    ///     snapshot_json (str | None): A snapshot previously returned by
    ///         `snapshot_json`. Incompatible snapshots fall back to the seed flow.
    #[new]
    #[pyo3(signature = (snapshot_json=None))]
    fn new(snapshot_json: Option<&str>) -> Self {
        let storage = match snapshot_json {
            Some(json) => MemoryStorage::with_slot(crate::flow::DEFAULT_SLOT, json),
            None => MemoryStorage::new(),
        };
        Self {
            store: FlowStore::open(storage, crate::flow::DEFAULT_SLOT),
        }
    }

    /// Appends a step of the given kind (e.g. "email") and returns its id.
    ///
    /// Raises:
    ///     ValueError: If the kind is not part of the step catalog.
    fn add_step(&mut self, kind: &str) -> PyResult<Option<String>> {
        let kind: StepKind = kind.parse().map_err(value_error)?;
        Ok(self.store.add_step(kind).map(|id| id.to_string()))
    }

    fn insert_step(&mut self, kind: &str, index: usize) -> PyResult<Option<String>> {
        let kind: StepKind = kind.parse().map_err(value_error)?;
        Ok(self.store.insert_step(kind, index).map(|id| id.to_string()))
    }

    fn delete_step(&mut self, id: &str) {
        self.store.delete_step(&StepId::from(id));
    }

    fn duplicate_step(&mut self, id: &str) -> Option<String> {
        self.store
            .duplicate_step(&StepId::from(id))
            .map(|id| id.to_string())
    }

    /// Applies any store action given as JSON, e.g.
    /// `{"action": "updateStep", "id": "email-1", "patch": {"title": "Email?"}}`.
    ///
    /// Raises:
    ///     ValueError: If the JSON is malformed or the action fails validation.
    fn dispatch(&mut self, action_json: &str) -> PyResult<()> {
        let action: Action = serde_json::from_str(action_json).map_err(value_error)?;
        self.store.dispatch(action).map_err(value_error)?;
        Ok(())
    }

    /// Translates a drop intent given as JSON and applies it.
    ///
    /// Returns:
    ///     bool: Whether the drop changed the flow.
    fn drop_item(&mut self, intent_json: &str) -> PyResult<bool> {
        let intent: DropIntent = serde_json::from_str(intent_json).map_err(value_error)?;
        match dnd::translate(self.store.flow(), &intent) {
            Some(action) => {
                self.store.dispatch(action).map_err(value_error)?;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Returns the laid-out graph view as JSON.
    fn graph_json(&self) -> PyResult<String> {
        let projection =
            graph::project(self.store.flow()).layout(&LayeredLayout, &LayoutConfig::default());
        serde_json::to_string(&projection).map_err(value_error)
    }

    /// Returns the pretty-printed step array for the chat widget.
    fn export_json(&self) -> PyResult<String> {
        self.store.export_json().map_err(value_error)
    }

    /// Returns the full persisted snapshot, edges included.
    fn snapshot_json(&self) -> PyResult<String> {
        crate::storage::snapshot::encode(self.store.flow()).map_err(value_error)
    }
}

/// Flow-state core for a visual chatbot designer.
///
/// This module provides Python bindings to the chatflow Rust library.
#[pymodule]
fn chatflow(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_class::<FlowEditorPy>()?;
    Ok(())
}
