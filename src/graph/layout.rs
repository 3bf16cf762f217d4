use super::{GraphEdge, GraphNode};
use crate::step::StepId;
use ahash::AHashMap;
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

/// A point on the graph canvas.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

impl Position {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// The fixed on-screen size of every node, used for spacing.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NodeFootprint {
    pub width: f64,
    pub height: f64,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum LayoutDirection {
    #[default]
    #[serde(rename = "LR")]
    LeftToRight,
    #[serde(rename = "TB")]
    TopToBottom,
}

/// Layout parameters handed to the layout engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LayoutConfig {
    pub direction: LayoutDirection,
    pub node_width: f64,
    pub node_height: f64,
    /// Gap between consecutive ranks.
    pub rank_sep: f64,
    /// Gap between nodes sharing a rank.
    pub node_sep: f64,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            direction: LayoutDirection::LeftToRight,
            node_width: 300.0,
            node_height: 120.0,
            rank_sep: 100.0,
            node_sep: 30.0,
        }
    }
}

impl LayoutConfig {
    pub fn footprint(&self) -> NodeFootprint {
        NodeFootprint {
            width: self.node_width,
            height: self.node_height,
        }
    }
}

/// Assigns 2-D positions to graph nodes.
///
/// Implementations return node *centres*; the projection converts them to
/// top-left corners using the footprint.
pub trait LayoutEngine {
    fn layout(
        &self,
        nodes: &[GraphNode],
        edges: &[GraphEdge],
        config: &LayoutConfig,
    ) -> AHashMap<StepId, Position>;
}

/// A small layered layout: longest-path ranks along edges, nodes within a
/// rank stacked in sequence order.
///
/// Cycles are broken by forcing the earliest unranked node in sequence order.
#[derive(Debug, Clone, Copy, Default)]
pub struct LayeredLayout;

impl LayeredLayout {
    /// Computes a rank per node, indexed like `nodes`.
    pub fn ranks(nodes: &[GraphNode], edges: &[GraphEdge]) -> Vec<usize> {
        let index: AHashMap<&StepId, usize> =
            nodes.iter().enumerate().map(|(i, n)| (&n.id, i)).collect();
        let n = nodes.len();
        let mut outgoing: Vec<Vec<usize>> = vec![Vec::new(); n];
        let mut indegree = vec![0usize; n];
        for edge in edges {
            if let (Some(&s), Some(&t)) = (index.get(&edge.source), index.get(&edge.target)) {
                if s != t {
                    outgoing[s].push(t);
                    indegree[t] += 1;
                }
            }
        }

        let mut rank = vec![0usize; n];
        let mut placed = vec![false; n];
        let mut queue: VecDeque<usize> = (0..n).filter(|&i| indegree[i] == 0).collect();
        loop {
            while let Some(u) = queue.pop_front() {
                if placed[u] {
                    continue;
                }
                placed[u] = true;
                for &v in &outgoing[u] {
                    if placed[v] {
                        continue;
                    }
                    rank[v] = rank[v].max(rank[u] + 1);
                    indegree[v] -= 1;
                    if indegree[v] == 0 {
                        queue.push_back(v);
                    }
                }
            }
            match (0..n).find(|&i| !placed[i]) {
                Some(i) => queue.push_back(i),
                None => break,
            }
        }
        rank
    }
}

impl LayoutEngine for LayeredLayout {
    fn layout(
        &self,
        nodes: &[GraphNode],
        edges: &[GraphEdge],
        config: &LayoutConfig,
    ) -> AHashMap<StepId, Position> {
        let ranks = Self::ranks(nodes, edges);
        let mut slots_used: AHashMap<usize, usize> = AHashMap::new();
        let mut positions = AHashMap::with_capacity(nodes.len());

        for (node, &rank) in nodes.iter().zip(&ranks) {
            let slot = slots_used.entry(rank).or_insert(0);
            let (along, across) = (rank as f64, *slot as f64);
            *slot += 1;

            let centre = match config.direction {
                LayoutDirection::LeftToRight => Position::new(
                    along * (config.node_width + config.rank_sep) + config.node_width / 2.0,
                    across * (config.node_height + config.node_sep) + config.node_height / 2.0,
                ),
                LayoutDirection::TopToBottom => Position::new(
                    across * (config.node_width + config.node_sep) + config.node_width / 2.0,
                    along * (config.node_height + config.rank_sep) + config.node_height / 2.0,
                ),
            };
            positions.insert(node.id.clone(), centre);
        }
        positions
    }
}
