//! Property tests for the flow store
//!
//! Random edit sequences must never break a flow's invariants, and every
//! reachable flow must survive a snapshot round trip unchanged.
//!
use chatflow::prelude::*;
use chatflow::storage::snapshot;
use proptest::prelude::*;
use proptest::sample::Index;

#[derive(Debug, Clone)]
enum Edit {
    Add(usize),
    Insert(usize, usize),
    Delete(Index),
    Duplicate(Index),
    SetOptions(Index, Vec<String>),
    Move(Index, Index),
    Connect(Index, Index),
    Disconnect(Index),
}

fn kind_strategy() -> impl Strategy<Value = usize> {
    0..StepKind::ALL.len()
}

fn edit_strategy() -> impl Strategy<Value = Edit> {
    prop_oneof![
        kind_strategy().prop_map(Edit::Add),
        (kind_strategy(), 0usize..12).prop_map(|(k, i)| Edit::Insert(k, i)),
        any::<Index>().prop_map(Edit::Delete),
        any::<Index>().prop_map(Edit::Duplicate),
        (
            any::<Index>(),
            prop::collection::vec("[A-Za-z ]{1,8}", 0..4)
        )
            .prop_map(|(i, o)| Edit::SetOptions(i, o)),
        (any::<Index>(), any::<Index>()).prop_map(|(a, b)| Edit::Move(a, b)),
        (any::<Index>(), any::<Index>()).prop_map(|(a, b)| Edit::Connect(a, b)),
        any::<Index>().prop_map(Edit::Disconnect),
    ]
}

fn pick<'a>(flow: &'a Flow, index: &Index) -> Option<&'a Step> {
    (!flow.is_empty()).then(|| &flow.steps()[index.index(flow.len())])
}

fn apply(flow: &Flow, edit: &Edit) -> Flow {
    match edit {
        Edit::Add(k) => flow.add_step(StepKind::ALL[*k]),
        Edit::Insert(k, i) => flow.insert_step(StepKind::ALL[*k], *i),
        Edit::Delete(i) => match pick(flow, i) {
            Some(step) => flow.delete_step(step.id()),
            None => flow.clone(),
        },
        Edit::Duplicate(i) => match pick(flow, i) {
            Some(step) => flow.duplicate_step(step.id()),
            None => flow.clone(),
        },
        Edit::SetOptions(i, options) => match pick(flow, i) {
            Some(step) => flow.update_step(step.id(), &StepPatch::options(options.clone())),
            None => flow.clone(),
        },
        Edit::Move(a, b) if !flow.is_empty() => {
            let from = a.index(flow.len());
            let to = b.index(flow.len());
            let steps = dnd::move_item(flow.steps(), from, to).expect("index in range");
            flow.reorder_steps(steps).expect("move is a permutation")
        }
        Edit::Move(..) => flow.clone(),
        Edit::Connect(a, b) => match (pick(flow, a), pick(flow, b)) {
            (Some(s), Some(t)) => flow.add_edge(Edge::new(s.id().clone(), t.id().clone())),
            _ => flow.clone(),
        },
        Edit::Disconnect(i) if !flow.edges().is_empty() => {
            let edge = flow.edges()[i.index(flow.edges().len())].clone();
            flow.apply_edge_changes(&[EdgeChange::Remove { edge }])
        }
        Edit::Disconnect(_) => flow.clone(),
    }
}

proptest! {
    #[test]
    fn edits_preserve_flow_invariants(edits in prop::collection::vec(edit_strategy(), 0..40)) {
        let mut flow = Flow::seed();
        for edit in &edits {
            flow = apply(&flow, edit);
            prop_assert!(flow.validate().is_ok(), "{:?} after {:?}", flow.validate(), edit);
            for step in flow.steps() {
                if step.kind().is_choice() {
                    prop_assert!(!step.options().is_empty());
                } else {
                    prop_assert!(step.options.is_none());
                }
            }
            let mut pairs: Vec<_> = flow.edges().iter().map(|e| (&e.source, &e.target)).collect();
            let total = pairs.len();
            pairs.sort();
            pairs.dedup();
            prop_assert_eq!(pairs.len(), total, "duplicate edge");
        }
    }

    #[test]
    fn snapshots_round_trip(edits in prop::collection::vec(edit_strategy(), 0..25)) {
        let flow = edits.iter().fold(Flow::seed(), |flow, edit| apply(&flow, edit));
        let restored = snapshot::decode(&snapshot::encode(&flow).unwrap()).unwrap();
        prop_assert_eq!(restored, flow);
    }

    #[test]
    fn moves_keep_steps_and_edges(
        edits in prop::collection::vec(edit_strategy(), 0..15),
        from in any::<Index>(),
        to in any::<Index>(),
    ) {
        let flow = edits.iter().fold(Flow::seed(), |flow, edit| apply(&flow, edit));
        let moved = apply(&flow, &Edit::Move(from, to));

        let mut before: Vec<_> = flow.steps().iter().map(|s| s.id().clone()).collect();
        let mut after: Vec<_> = moved.steps().iter().map(|s| s.id().clone()).collect();
        before.sort();
        after.sort();
        prop_assert_eq!(before, after);
        prop_assert_eq!(moved.edges(), flow.edges());
    }

    #[test]
    fn duplicates_are_independent(index in any::<Index>(), title in "[a-z]{1,10}") {
        let flow = Flow::seed().add_step(StepKind::Mcq).add_step(StepKind::Rating);
        let original = flow.steps()[index.index(flow.len())].clone();
        let duplicated = flow.duplicate_step(original.id());

        let position = duplicated.position(original.id()).unwrap();
        let copy = duplicated.steps()[position + 1].clone();
        prop_assert_ne!(copy.id(), original.id());

        let edited = duplicated.update_step(copy.id(), &StepPatch::title(title.clone()));
        prop_assert_eq!(edited.step(original.id()), Some(&original));
        prop_assert_eq!(&edited.step(copy.id()).unwrap().title, &title);
    }
}
