//! Common test utilities for building flows, stores and drop intents.
use chatflow::prelude::*;

/// A two-step flow: an informational greeting followed by a choice.
///
/// `welcome("Hi")` -> `mcq("Pick one", ["A", "B"])`
#[allow(dead_code)]
pub fn create_greeting_flow() -> Flow {
    Flow::sequential(vec![
        Step::with_id("w", StepKind::Welcome).titled("Hi"),
        Step::with_id("q", StepKind::Mcq)
            .titled("Pick one")
            .with_options(["A", "B"]),
    ])
    .expect("greeting flow is valid")
}

/// A linear flow with one step of every listed kind, ids `s0`, `s1`, ...
#[allow(dead_code)]
pub fn create_linear_flow(kinds: &[StepKind]) -> Flow {
    let steps = kinds
        .iter()
        .enumerate()
        .map(|(i, kind)| Step::with_id(format!("s{}", i), *kind))
        .collect();
    Flow::sequential(steps).expect("linear flow is valid")
}

/// A lead-capture style flow covering every interaction class.
///
/// welcome -> name (required) -> yesno -> rating -> statement -> end
#[allow(dead_code)]
pub fn create_lead_flow() -> Flow {
    Flow::sequential(vec![
        Step::with_id("welcome", StepKind::Welcome).titled("Welcome aboard!"),
        Step::with_id("name", StepKind::Name)
            .titled("What's your name?")
            .with_required(true),
        Step::with_id("newsletter", StepKind::YesNo)
            .titled("Subscribe to our newsletter?")
            .with_options(["Yes", "No"]),
        Step::with_id("rating", StepKind::Rating).titled("Rate us"),
        Step::with_id("note", StepKind::Statement).titled("Thanks, almost done."),
        Step::with_id("end", StepKind::End),
    ])
    .expect("lead flow is valid")
}

/// A store backed by memory storage, holding `flow` under the default slot.
#[allow(dead_code)]
pub fn create_store(flow: Flow) -> FlowStore<MemoryStorage> {
    FlowStore::with_flow(flow, MemoryStorage::new(), DEFAULT_SLOT)
}

/// Ids of the flow's steps, in order.
#[allow(dead_code)]
pub fn step_ids(flow: &Flow) -> Vec<String> {
    flow.steps().iter().map(|s| s.id().to_string()).collect()
}

/// `(source, target)` pairs of the flow's edges, in order.
#[allow(dead_code)]
pub fn edge_pairs(flow: &Flow) -> Vec<(String, String)> {
    flow.edges()
        .iter()
        .map(|e| (e.source.to_string(), e.target.to_string()))
        .collect()
}

/// A palette block dropped onto the graph view.
#[allow(dead_code)]
pub fn palette_to_graph(kind: StepKind) -> DropIntent {
    DropIntent::new(
        DragLocation::new(dnd::PALETTE, 0),
        Some(DragLocation::new(dnd::GRAPH, 0)),
        kind.palette_id(),
    )
}
