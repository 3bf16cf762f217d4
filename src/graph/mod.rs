//! Graph projection of a flow.
//!
//! The projection turns the store's steps and explicit edges into a node/edge
//! view. Edges are never synthesized from step order here; the store keeps the
//! edge set itself. Position assignment is delegated to a [`LayoutEngine`].

pub mod layout;
pub mod positions;

pub use layout::*;
pub use positions::*;

use crate::flow::{Action, Edge, Flow};
use crate::step::{StepId, StepKind};
use serde::Serialize;

/// Display data for one step in the graph view.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GraphNode {
    pub id: StepId,
    pub kind: StepKind,
    pub label: String,
    pub index: usize,
    /// The first step draws no inbound connection point.
    pub is_first: bool,
    /// The last step draws no outbound connection point.
    pub is_last: bool,
    /// Top-left corner on the canvas.
    pub position: Position,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GraphEdge {
    pub id: String,
    pub source: StepId,
    pub target: StepId,
}

impl From<&Edge> for GraphEdge {
    fn from(edge: &Edge) -> Self {
        Self {
            id: edge.id(),
            source: edge.source.clone(),
            target: edge.target.clone(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct GraphProjection {
    pub nodes: Vec<GraphNode>,
    pub edges: Vec<GraphEdge>,
}

/// Projects the flow into graph nodes and edges, all nodes at the origin.
pub fn project(flow: &Flow) -> GraphProjection {
    let last = flow.len().saturating_sub(1);
    let nodes = flow
        .steps()
        .iter()
        .enumerate()
        .map(|(index, step)| GraphNode {
            id: step.id().clone(),
            kind: step.kind(),
            label: step.title.clone(),
            index,
            is_first: index == 0,
            is_last: index == last,
            position: Position::default(),
        })
        .collect();
    let edges = flow.edges().iter().map(GraphEdge::from).collect();
    GraphProjection { nodes, edges }
}

impl GraphProjection {
    /// Positions every node with `engine`, converting centres to top-left corners.
    pub fn layout(mut self, engine: &dyn LayoutEngine, config: &LayoutConfig) -> Self {
        let centres = engine.layout(&self.nodes, &self.edges, config);
        let footprint = config.footprint();
        for node in &mut self.nodes {
            if let Some(centre) = centres.get(&node.id) {
                node.position = Position::new(
                    centre.x - footprint.width / 2.0,
                    centre.y - footprint.height / 2.0,
                );
            }
        }
        self
    }

    pub fn node(&self, id: &StepId) -> Option<&GraphNode> {
        self.nodes.iter().find(|n| &n.id == id)
    }
}

/// The store action for a user-initiated connect gesture.
pub fn connect(source: StepId, target: StepId) -> Action {
    Action::AddEdge {
        edge: Edge { source, target },
    }
}

/// A laid-out graph plus the transient positions the user dragged nodes to.
pub struct GraphView<L: LayoutEngine> {
    engine: L,
    config: LayoutConfig,
    projection: GraphProjection,
    cache: PositionCache,
}

impl<L: LayoutEngine> GraphView<L> {
    pub fn new(engine: L, config: LayoutConfig) -> Self {
        Self {
            engine,
            config,
            projection: GraphProjection::default(),
            cache: PositionCache::new(),
        }
    }

    /// Re-derives the graph from the flow. Dragged positions are discarded.
    pub fn refresh(&mut self, flow: &Flow) {
        self.projection = project(flow).layout(&self.engine, &self.config);
        self.cache.clear();
    }

    /// The current view: laid-out positions overridden by dragged ones.
    pub fn projection(&self) -> GraphProjection {
        let mut projection = self.projection.clone();
        for node in &mut projection.nodes {
            if let Some(position) = self.cache.get(&node.id) {
                node.position = position;
            }
        }
        projection
    }

    /// Applies a node-change batch; returns store actions for removed nodes.
    pub fn apply_node_changes(&mut self, changes: &[NodeChange]) -> Vec<Action> {
        self.cache.apply(changes)
    }

    pub fn config(&self) -> &LayoutConfig {
        &self.config
    }
}
