use super::edge::{Edge, EdgeChange};
use super::model::Flow;
use crate::error::FlowError;
use crate::step::{Step, StepId, StepKind, StepPatch};
use serde::{Deserialize, Serialize};

/// Every mutation the flow store understands.
///
/// Actions are plain data so that gesture translators, tooling and bindings can
/// produce them without touching the store directly.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "camelCase")]
pub enum Action {
    AddStep { kind: StepKind },
    InsertStep { kind: StepKind, index: usize },
    DeleteStep { id: StepId },
    UpdateStep { id: StepId, patch: StepPatch },
    DuplicateStep { id: StepId },
    ReorderSteps { steps: Vec<Step> },
    AddEdge { edge: Edge },
    ApplyEdgeChanges { changes: Vec<EdgeChange> },
    SetEdges { edges: Vec<Edge> },
}

impl Action {
    /// Short name used in log records.
    pub fn name(&self) -> &'static str {
        match self {
            Action::AddStep { .. } => "add_step",
            Action::InsertStep { .. } => "insert_step",
            Action::DeleteStep { .. } => "delete_step",
            Action::UpdateStep { .. } => "update_step",
            Action::DuplicateStep { .. } => "duplicate_step",
            Action::ReorderSteps { .. } => "reorder_steps",
            Action::AddEdge { .. } => "add_edge",
            Action::ApplyEdgeChanges { .. } => "apply_edge_changes",
            Action::SetEdges { .. } => "set_edges",
        }
    }
}

impl Flow {
    /// Applies one action and returns the next snapshot.
    pub fn reduce(&self, action: Action) -> Result<Flow, FlowError> {
        match action {
            Action::AddStep { kind } => Ok(self.add_step(kind)),
            Action::InsertStep { kind, index } => Ok(self.insert_step(kind, index)),
            Action::DeleteStep { id } => Ok(self.delete_step(&id)),
            Action::UpdateStep { id, patch } => Ok(self.update_step(&id, &patch)),
            Action::DuplicateStep { id } => Ok(self.duplicate_step(&id)),
            Action::ReorderSteps { steps } => self.reorder_steps(steps),
            Action::AddEdge { edge } => Ok(self.add_edge(edge)),
            Action::ApplyEdgeChanges { changes } => Ok(self.apply_edge_changes(&changes)),
            Action::SetEdges { edges } => self.set_edges(edges),
        }
    }
}
