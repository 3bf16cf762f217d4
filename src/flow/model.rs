use super::edge::{Edge, EdgeChange};
use crate::error::FlowError;
use crate::step::{Step, StepId, StepKind, StepPatch};
use ahash::{AHashMap, AHashSet};
use itertools::Itertools;

/// The aggregate: an ordered sequence of steps plus a set of edges.
///
/// A `Flow` is an immutable snapshot. Every operation takes `&self` and returns
/// the next snapshot, leaving the input untouched.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Flow {
    steps: Vec<Step>,
    edges: Vec<Edge>,
}

impl Flow {
    /// Builds a flow from parts, checking every invariant.
    pub fn new(steps: Vec<Step>, edges: Vec<Edge>) -> Result<Self, FlowError> {
        let flow = Self { steps, edges };
        flow.validate()?;
        Ok(flow)
    }

    /// Builds a flow whose edges connect each step to the next one.
    pub fn sequential(steps: Vec<Step>) -> Result<Self, FlowError> {
        let edges = steps
            .iter()
            .tuple_windows()
            .map(|(a, b)| Edge::new(a.id().clone(), b.id().clone()))
            .collect();
        Self::new(steps, edges)
    }

    /// The flow a new editing session starts with when nothing is persisted.
    pub fn seed() -> Self {
        let welcome = Step::with_id("welcome-1", StepKind::Welcome)
            .titled("Welcome to our service! How can we help you?")
            .with_required(true);
        let mut email = Step::with_id("email-1", StepKind::Email)
            .titled("Please enter your email address:")
            .with_required(true);
        email.placeholder = Some("name@example.com".to_string());
        let edge = Edge::new(welcome.id().clone(), email.id().clone());
        Self {
            steps: vec![welcome, email],
            edges: vec![edge],
        }
    }

    pub fn steps(&self) -> &[Step] {
        &self.steps
    }

    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    pub fn step(&self, id: &StepId) -> Option<&Step> {
        self.steps.iter().find(|s| s.id() == id)
    }

    pub fn position(&self, id: &StepId) -> Option<usize> {
        self.steps.iter().position(|s| s.id() == id)
    }

    pub fn contains(&self, id: &StepId) -> bool {
        self.position(id).is_some()
    }

    pub fn outgoing<'a>(&'a self, id: &'a StepId) -> impl Iterator<Item = &'a Edge> + 'a {
        self.edges.iter().filter(move |e| &e.source == id)
    }

    pub fn incoming<'a>(&'a self, id: &'a StepId) -> impl Iterator<Item = &'a Edge> + 'a {
        self.edges.iter().filter(move |e| &e.target == id)
    }

    pub fn into_parts(self) -> (Vec<Step>, Vec<Edge>) {
        (self.steps, self.edges)
    }

    /// Checks id uniqueness, option shapes and edge endpoints.
    ///
    /// Choice steps need at least one option; every other kind carries none.
    pub fn validate(&self) -> Result<(), FlowError> {
        let mut seen = AHashSet::with_capacity(self.steps.len());
        for step in &self.steps {
            if !seen.insert(step.id()) {
                return Err(FlowError::DuplicateStepId(step.id().clone()));
            }
            match (step.kind().is_choice(), step.options.as_ref()) {
                (true, Some(options)) if !options.is_empty() => {}
                (true, _) => {
                    return Err(FlowError::EmptyOptions {
                        step_id: step.id().clone(),
                    });
                }
                (false, Some(_)) => {
                    return Err(FlowError::UnexpectedOptions {
                        step_id: step.id().clone(),
                        kind: step.kind(),
                    });
                }
                (false, None) => {}
            }
        }
        self.check_edges(&self.edges)
    }

    fn check_edges(&self, edges: &[Edge]) -> Result<(), FlowError> {
        match edges
            .iter()
            .find(|e| !self.contains(&e.source) || !self.contains(&e.target))
        {
            Some(edge) => Err(FlowError::DanglingEdge {
                source_id: edge.source.clone(),
                target_id: edge.target.clone(),
            }),
            None => Ok(()),
        }
    }

    fn with_steps(&self, steps: Vec<Step>) -> Self {
        Self {
            steps,
            edges: self.edges.clone(),
        }
    }

    fn with_edges(&self, edges: Vec<Edge>) -> Self {
        Self {
            steps: self.steps.clone(),
            edges,
        }
    }

    // --- Step operations ---

    /// Appends a new step of `kind`, connected from the previous last step.
    pub fn add_step(&self, kind: StepKind) -> Self {
        self.push_step(Step::new(kind))
    }

    /// Appends an existing step record. The previous last step, if any, gets
    /// a sequential edge to it. A step whose id is already present is ignored.
    pub fn push_step(&self, step: Step) -> Self {
        if self.contains(step.id()) {
            tracing::warn!(step = %step.id(), "refusing to append a duplicate step id");
            return self.clone();
        }
        let mut next = self.clone();
        if let Some(last) = self.steps.last() {
            next.edges
                .push(Edge::new(last.id().clone(), step.id().clone()));
        }
        next.steps.push(step);
        next
    }

    /// Inserts a new step of `kind` at `index`, clamped to `[0, len]`.
    pub fn insert_step(&self, kind: StepKind, index: usize) -> Self {
        self.insert_step_record(Step::new(kind), index)
    }

    /// Inserts an existing step record at `index`. Inserting at the end is an
    /// append and follows the same auto-connect rule as [`Flow::push_step`];
    /// positional inserts leave the new step unconnected.
    pub fn insert_step_record(&self, step: Step, index: usize) -> Self {
        if index >= self.steps.len() {
            return self.push_step(step);
        }
        if self.contains(step.id()) {
            tracing::warn!(step = %step.id(), "refusing to insert a duplicate step id");
            return self.clone();
        }
        let mut steps = self.steps.clone();
        steps.insert(index, step);
        self.with_steps(steps)
    }

    /// Removes the step and, in the same snapshot, every edge touching it.
    pub fn delete_step(&self, id: &StepId) -> Self {
        if !self.contains(id) {
            tracing::debug!(step = %id, "delete of unknown step ignored");
            return self.clone();
        }
        Self {
            steps: self
                .steps
                .iter()
                .filter(|s| s.id() != id)
                .cloned()
                .collect(),
            edges: self
                .edges
                .iter()
                .filter(|e| !e.touches(id))
                .cloned()
                .collect(),
        }
    }

    pub fn update_step(&self, id: &StepId, patch: &StepPatch) -> Self {
        let Some(index) = self.position(id) else {
            tracing::debug!(step = %id, "update of unknown step ignored");
            return self.clone();
        };
        let mut steps = self.steps.clone();
        steps[index] = steps[index].patched(patch);
        self.with_steps(steps)
    }

    /// Inserts a copy of the step right after it. The copy has no edges.
    pub fn duplicate_step(&self, id: &StepId) -> Self {
        let Some(index) = self.position(id) else {
            tracing::debug!(step = %id, "duplicate of unknown step ignored");
            return self.clone();
        };
        let mut steps = self.steps.clone();
        steps.insert(index + 1, self.steps[index].duplicate());
        self.with_steps(steps)
    }

    /// Rearranges the steps into the order of `new_sequence`, which must be a
    /// permutation of the current steps (compared by id).
    ///
    /// Only the order is taken from `new_sequence`; the stored step records
    /// are kept as they are.
    pub fn reorder_steps(&self, new_sequence: Vec<Step>) -> Result<Self, FlowError> {
        let ids: Vec<StepId> = new_sequence.iter().map(|s| s.id().clone()).collect();
        self.reorder_ids(&ids)
    }

    /// Rearranges the steps into the order given by `ids`, a permutation of
    /// the current step ids.
    pub fn reorder_ids(&self, ids: &[StepId]) -> Result<Self, FlowError> {
        let not_permutation = FlowError::NotAPermutation {
            expected: self.steps.len(),
            found: ids.len(),
        };
        if ids.len() != self.steps.len() {
            return Err(not_permutation);
        }
        let current: AHashMap<&StepId, &Step> =
            self.steps.iter().map(|s| (s.id(), s)).collect();
        let mut seen = AHashSet::with_capacity(ids.len());
        let mut steps = Vec::with_capacity(ids.len());
        for id in ids {
            match current.get(id) {
                Some(step) if seen.insert(id) => steps.push((*step).clone()),
                _ => return Err(not_permutation),
            }
        }
        Ok(self.with_steps(steps))
    }

    // --- Edge operations ---

    /// Connects `source` to `target` unless that exact edge exists already.
    /// Endpoints that are not in the flow make this a no-op.
    pub fn add_edge(&self, edge: Edge) -> Self {
        if !self.contains(&edge.source) || !self.contains(&edge.target) {
            tracing::debug!(edge = %edge.id(), "edge to unknown step ignored");
            return self.clone();
        }
        if self.edges.contains(&edge) {
            return self.clone();
        }
        let mut edges = self.edges.clone();
        edges.push(edge);
        self.with_edges(edges)
    }

    /// Removes the `source -> target` edge, if present.
    pub fn remove_edge(&self, edge: &Edge) -> Self {
        if !self.edges.contains(edge) {
            return self.clone();
        }
        self.with_edges(self.edges.iter().filter(|e| e != &edge).cloned().collect())
    }

    /// Applies a batch of graph-editor edge changes, in order.
    pub fn apply_edge_changes(&self, changes: &[EdgeChange]) -> Self {
        changes.iter().fold(self.clone(), |flow, change| match change {
            EdgeChange::Add { edge } => flow.add_edge(edge.clone()),
            EdgeChange::Remove { edge } => flow.remove_edge(edge),
            EdgeChange::Replace { edge, replacement } => {
                let Some(index) = flow.edges.iter().position(|e| e == edge) else {
                    return flow;
                };
                if !flow.contains(&replacement.source) || !flow.contains(&replacement.target) {
                    return flow;
                }
                let mut edges = flow.edges.clone();
                edges[index] = replacement.clone();
                let edges = edges.into_iter().unique().collect();
                flow.with_edges(edges)
            }
        })
    }

    /// Replaces the edge set. Every edge must reference steps in the flow;
    /// duplicate pairs are collapsed.
    pub fn set_edges(&self, edges: Vec<Edge>) -> Result<Self, FlowError> {
        self.check_edges(&edges)?;
        Ok(self.with_edges(edges.into_iter().unique().collect()))
    }
}
