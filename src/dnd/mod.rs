//! Drag/drop intent translation.
//!
//! The gesture library reports where an item was picked up and where it was
//! dropped. [`translate`] maps that report onto a single store [`Action`].

use crate::flow::{Action, Flow};
use crate::step::StepKind;
use serde::{Deserialize, Serialize};

/// Container id of the linear step list.
pub const CANVAS: &str = "flow-canvas";
/// Container id of the block palette.
pub const PALETTE: &str = "sidebar-blocks";
/// Container id of the graph view.
pub const GRAPH: &str = "flow-map";

/// The drop targets and sources the translator knows about.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Container {
    Canvas,
    Palette,
    Graph,
}

impl Container {
    /// Exact-string lookup; no prefix or case-insensitive matching.
    pub fn from_id(id: &str) -> Option<Self> {
        match id {
            CANVAS => Some(Container::Canvas),
            PALETTE => Some(Container::Palette),
            GRAPH => Some(Container::Graph),
            _ => None,
        }
    }

    pub fn id(&self) -> &'static str {
        match self {
            Container::Canvas => CANVAS,
            Container::Palette => PALETTE,
            Container::Graph => GRAPH,
        }
    }
}

/// A position inside a container.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DragLocation {
    pub container_id: String,
    pub index: usize,
}

impl DragLocation {
    pub fn new(container_id: impl Into<String>, index: usize) -> Self {
        Self {
            container_id: container_id.into(),
            index,
        }
    }
}

/// The result of a finished drag gesture.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DropIntent {
    pub source: DragLocation,
    /// `None` when the item was dropped outside every container.
    pub destination: Option<DragLocation>,
    pub dragged_item_id: String,
}

impl DropIntent {
    pub fn new(
        source: DragLocation,
        destination: Option<DragLocation>,
        dragged_item_id: impl Into<String>,
    ) -> Self {
        Self {
            source,
            destination,
            dragged_item_id: dragged_item_id.into(),
        }
    }

    /// Shorthand for a palette block dropped onto the canvas at `index`.
    pub fn palette_to_canvas(kind: StepKind, index: usize) -> Self {
        Self::new(
            DragLocation::new(PALETTE, kind_index(kind)),
            Some(DragLocation::new(CANVAS, index)),
            kind.palette_id(),
        )
    }

    /// Shorthand for moving a canvas item from one index to another.
    pub fn canvas_move(item_id: impl Into<String>, from: usize, to: usize) -> Self {
        Self::new(
            DragLocation::new(CANVAS, from),
            Some(DragLocation::new(CANVAS, to)),
            item_id,
        )
    }
}

fn kind_index(kind: StepKind) -> usize {
    StepKind::ALL.iter().position(|k| *k == kind).unwrap_or(0)
}

/// Removes the item at `from` and reinserts it at `to`.
///
/// Returns `None` when `from` is out of range. `to` is clamped to the end.
pub fn move_item<T: Clone>(items: &[T], from: usize, to: usize) -> Option<Vec<T>> {
    if from >= items.len() {
        return None;
    }
    let mut next = items.to_vec();
    let item = next.remove(from);
    let to = to.min(next.len());
    next.insert(to, item);
    Some(next)
}

/// Decides which store action, if any, a drop gesture stands for.
pub fn translate(flow: &Flow, intent: &DropIntent) -> Option<Action> {
    let Some(destination) = &intent.destination else {
        return None;
    };
    let source_container = Container::from_id(&intent.source.container_id);
    let destination_container = Container::from_id(&destination.container_id);

    match (source_container, destination_container) {
        (Some(Container::Canvas), Some(Container::Canvas)) => {
            if intent.source.index == destination.index {
                return None;
            }
            let steps = move_item(flow.steps(), intent.source.index, destination.index)?;
            Some(Action::ReorderSteps { steps })
        }
        (Some(Container::Palette), Some(Container::Canvas)) => {
            let kind = palette_kind(&intent.dragged_item_id)?;
            Some(Action::InsertStep {
                kind,
                index: destination.index,
            })
        }
        (Some(Container::Palette), Some(Container::Graph)) => {
            let kind = palette_kind(&intent.dragged_item_id)?;
            Some(Action::InsertStep {
                kind,
                index: flow.len(),
            })
        }
        _ => {
            tracing::debug!(
                source = %intent.source.container_id,
                destination = %destination.container_id,
                "unhandled drop combination"
            );
            None
        }
    }
}

fn palette_kind(item_id: &str) -> Option<StepKind> {
    StepKind::from_palette_id(item_id)
        .inspect_err(|e| tracing::debug!(error = %e, "dropped palette item has no step kind"))
        .ok()
}
