use super::action::Action;
use super::edge::{Edge, EdgeChange};
use super::model::Flow;
use crate::error::FlowError;
use crate::export;
use crate::step::{Step, StepId, StepKind, StepPatch};
use crate::storage::{Storage, snapshot};

/// Default storage slot for the editing session's flow.
pub const DEFAULT_SLOT: &str = "chatbot-flow";

/// The authoritative owner of the current `Flow`.
///
/// Every mutation goes through [`FlowStore::dispatch`], which swaps in the next
/// snapshot and then persists it. Saving is fire-and-forget: a failed save is
/// logged and never undoes or blocks the in-memory change.
pub struct FlowStore<S: Storage> {
    flow: Flow,
    storage: S,
    slot: String,
    revision: u64,
}

impl<S: Storage> FlowStore<S> {
    /// Opens the store, loading the snapshot in `slot` or starting from the seed flow.
    ///
    /// Unreadable or incompatible snapshots are logged and replaced by the seed
    /// flow; they are not overwritten until the first mutation.
    pub fn open(storage: S, slot: impl Into<String>) -> Self {
        let slot = slot.into();
        let flow = match storage.load(&slot) {
            Ok(Some(json)) => snapshot::decode(&json).unwrap_or_else(|e| {
                tracing::warn!(slot = %slot, error = %e, "discarding persisted flow");
                Flow::seed()
            }),
            Ok(None) => {
                tracing::debug!(slot = %slot, "no persisted flow, starting from seed");
                Flow::seed()
            }
            Err(e) => {
                tracing::warn!(slot = %slot, error = %e, "could not load persisted flow");
                Flow::seed()
            }
        };
        Self::with_flow(flow, storage, slot)
    }

    /// Creates a store around an existing flow without loading anything.
    pub fn with_flow(flow: Flow, storage: S, slot: impl Into<String>) -> Self {
        Self {
            flow,
            storage,
            slot: slot.into(),
            revision: 0,
        }
    }

    pub fn flow(&self) -> &Flow {
        &self.flow
    }

    pub fn steps(&self) -> &[Step] {
        self.flow.steps()
    }

    pub fn edges(&self) -> &[Edge] {
        self.flow.edges()
    }

    /// Number of snapshots swapped in since the store was opened.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn slot(&self) -> &str {
        &self.slot
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    pub fn into_storage(self) -> S {
        self.storage
    }

    /// Applies `action` and persists the resulting snapshot.
    ///
    /// A validation failure leaves the current snapshot in place and skips the save.
    pub fn dispatch(&mut self, action: Action) -> Result<&Flow, FlowError> {
        let name = action.name();
        let next = self.flow.reduce(action).inspect_err(|e| {
            tracing::debug!(action = name, error = %e, "action rejected");
        })?;
        self.flow = next;
        self.revision += 1;
        tracing::debug!(
            action = name,
            revision = self.revision,
            steps = self.flow.len(),
            edges = self.flow.edges().len(),
            "flow updated"
        );
        self.persist();
        Ok(&self.flow)
    }

    /// Writes the current snapshot to storage. Failures are logged, not returned.
    pub fn persist(&mut self) {
        let result = snapshot::encode(&self.flow)
            .map_err(|e| e.to_string())
            .and_then(|json| {
                self.storage
                    .save(&self.slot, &json)
                    .map_err(|e| e.to_string())
            });
        if let Err(error) = result {
            tracing::warn!(slot = %self.slot, %error, "failed to persist flow");
        }
    }

    /// The export document for the current steps.
    pub fn export_json(&self) -> Result<String, serde_json::Error> {
        export::export_steps(self.flow.steps())
    }

    // --- Convenience wrappers ---

    /// Appends a step and returns its id.
    pub fn add_step(&mut self, kind: StepKind) -> Option<StepId> {
        self.dispatch(Action::AddStep { kind })
            .ok()
            .and_then(|flow| flow.steps().last())
            .map(|step| step.id().clone())
    }

    /// Inserts a step at `index` (clamped) and returns its id.
    pub fn insert_step(&mut self, kind: StepKind, index: usize) -> Option<StepId> {
        let index = index.min(self.flow.len());
        self.dispatch(Action::InsertStep { kind, index })
            .ok()
            .and_then(|flow| flow.steps().get(index))
            .map(|step| step.id().clone())
    }

    pub fn delete_step(&mut self, id: &StepId) {
        let _ = self.dispatch(Action::DeleteStep { id: id.clone() });
    }

    pub fn update_step(&mut self, id: &StepId, patch: StepPatch) {
        let _ = self.dispatch(Action::UpdateStep {
            id: id.clone(),
            patch,
        });
    }

    /// Duplicates a step and returns the id of the copy.
    pub fn duplicate_step(&mut self, id: &StepId) -> Option<StepId> {
        let index = self.flow.position(id)?;
        self.dispatch(Action::DuplicateStep { id: id.clone() })
            .ok()
            .and_then(|flow| flow.steps().get(index + 1))
            .map(|step| step.id().clone())
    }

    pub fn reorder_steps(&mut self, steps: Vec<Step>) -> Result<(), FlowError> {
        self.dispatch(Action::ReorderSteps { steps }).map(|_| ())
    }

    pub fn add_edge(&mut self, edge: Edge) {
        let _ = self.dispatch(Action::AddEdge { edge });
    }

    pub fn apply_edge_changes(&mut self, changes: Vec<EdgeChange>) {
        let _ = self.dispatch(Action::ApplyEdgeChanges { changes });
    }

    pub fn set_edges(&mut self, edges: Vec<Edge>) -> Result<(), FlowError> {
        self.dispatch(Action::SetEdges { edges }).map(|_| ())
    }
}
