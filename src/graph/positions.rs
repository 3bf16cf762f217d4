use super::layout::Position;
use crate::flow::Action;
use crate::step::StepId;
use ahash::AHashMap;
use serde::{Deserialize, Serialize};

/// One entry of a node-change batch emitted by a graph editor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum NodeChange {
    Position { id: StepId, position: Position },
    Remove { id: StepId },
}

/// Positions the user dragged nodes to since the last layout.
///
/// Purely visual: nothing here is persisted, and the cache is cleared whenever
/// the graph is re-projected from the store.
#[derive(Debug, Clone, Default)]
pub struct PositionCache {
    overrides: AHashMap<StepId, Position>,
}

impl PositionCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Caches position changes and returns the store actions for removals.
    pub fn apply(&mut self, changes: &[NodeChange]) -> Vec<Action> {
        let mut actions = Vec::new();
        for change in changes {
            match change {
                NodeChange::Position { id, position } => {
                    self.overrides.insert(id.clone(), *position);
                }
                NodeChange::Remove { id } => {
                    self.overrides.remove(id);
                    actions.push(Action::DeleteStep { id: id.clone() });
                }
            }
        }
        actions
    }

    pub fn get(&self, id: &StepId) -> Option<Position> {
        self.overrides.get(id).copied()
    }

    pub fn len(&self) -> usize {
        self.overrides.len()
    }

    pub fn is_empty(&self) -> bool {
        self.overrides.is_empty()
    }

    pub fn clear(&mut self) {
        self.overrides.clear();
    }
}
