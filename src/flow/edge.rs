use crate::step::StepId;
use serde::{Deserialize, Serialize};

/// A directed connection: after completing `source`, proceed to `target`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Edge {
    pub source: StepId,
    pub target: StepId,
}

impl Edge {
    pub fn new(source: impl Into<StepId>, target: impl Into<StepId>) -> Self {
        Self {
            source: source.into(),
            target: target.into(),
        }
    }

    /// Display identifier used by graph editors, e.g. `ewelcome-1-email-1`.
    ///
    /// Not unique when step ids contain `-`; edge changes address edges by
    /// their endpoints instead.
    pub fn id(&self) -> String {
        format!("e{}-{}", self.source, self.target)
    }

    pub fn touches(&self, step_id: &StepId) -> bool {
        &self.source == step_id || &self.target == step_id
    }

    pub fn connects(&self, source: &StepId, target: &StepId) -> bool {
        &self.source == source && &self.target == target
    }
}

/// One entry of an edge-change batch emitted by a graph editor.
///
/// Existing edges are addressed by their `(source, target)` pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum EdgeChange {
    Add { edge: Edge },
    Remove { edge: Edge },
    Replace { edge: Edge, replacement: Edge },
}
