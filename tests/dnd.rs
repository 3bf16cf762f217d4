//! Drag/drop translation tests
//!
//! Feeds gesture reports through `dnd::translate` and the store, the way the
//! editing surface does.
//!
mod common;
use chatflow::prelude::*;
use common::*;

#[cfg(test)]
mod drop_translation_tests {
    use super::*;

    fn apply(store: &mut FlowStore<MemoryStorage>, intent: &DropIntent) -> bool {
        match dnd::translate(store.flow(), intent) {
            Some(action) => {
                store.dispatch(action).unwrap();
                true
            }
            None => false,
        }
    }

    #[test]
    fn test_palette_drop_on_canvas_inserts_at_drop_index() {
        let mut store = create_store(Flow::seed());
        let intent = DropIntent::new(
            DragLocation::new("sidebar-blocks", 4),
            Some(DragLocation::new("flow-canvas", 1)),
            "sidebar-email",
        );

        assert!(apply(&mut store, &intent));
        assert_eq!(store.flow().len(), 3);
        assert_eq!(store.steps()[1].kind(), StepKind::Email);
        assert_eq!(store.steps()[0].id(), "welcome-1");
        assert_eq!(store.steps()[2].id(), "email-1");
    }

    #[test]
    fn test_palette_drop_on_graph_appends() {
        let mut store = create_store(Flow::seed());
        assert!(apply(&mut store, &palette_to_graph(StepKind::Rating)));

        let last = store.steps().last().unwrap();
        assert_eq!(last.kind(), StepKind::Rating);
        assert!(store.edges().iter().any(|e| e.target == *last.id()));
    }

    #[test]
    fn test_canvas_move_reorders_steps() {
        let mut store = create_store(create_linear_flow(&[
            StepKind::Welcome,
            StepKind::Text,
            StepKind::Email,
            StepKind::End,
        ]));

        assert!(apply(&mut store, &DropIntent::canvas_move("s0", 0, 2)));
        assert_eq!(step_ids(store.flow()), vec!["s1", "s2", "s0", "s3"]);

        assert!(apply(&mut store, &DropIntent::canvas_move("s3", 3, 0)));
        assert_eq!(step_ids(store.flow()), vec!["s3", "s1", "s2", "s0"]);
    }

    #[test]
    fn test_drop_in_place_is_ignored() {
        let flow = Flow::seed();
        assert_eq!(
            dnd::translate(&flow, &DropIntent::canvas_move("email-1", 1, 1)),
            None
        );
    }

    #[test]
    fn test_drop_outside_any_container_is_ignored() {
        let flow = Flow::seed();
        let intent = DropIntent::new(DragLocation::new(dnd::CANVAS, 0), None, "welcome-1");
        assert_eq!(dnd::translate(&flow, &intent), None);
    }

    #[test]
    fn test_unhandled_combinations_are_ignored() {
        let flow = Flow::seed();
        let cases = [
            // canvas -> palette
            DropIntent::new(
                DragLocation::new(dnd::CANVAS, 0),
                Some(DragLocation::new(dnd::PALETTE, 0)),
                "welcome-1",
            ),
            // palette -> palette
            DropIntent::new(
                DragLocation::new(dnd::PALETTE, 0),
                Some(DragLocation::new(dnd::PALETTE, 3)),
                "sidebar-text",
            ),
            // unknown container ids, including near-misses
            DropIntent::new(
                DragLocation::new("flow-canvas-2", 0),
                Some(DragLocation::new(dnd::CANVAS, 1)),
                "welcome-1",
            ),
            DropIntent::new(
                DragLocation::new(dnd::PALETTE, 0),
                Some(DragLocation::new("FLOW-CANVAS", 1)),
                "sidebar-text",
            ),
        ];
        for intent in &cases {
            assert_eq!(dnd::translate(&flow, intent), None, "{:?}", intent);
        }
    }

    #[test]
    fn test_unknown_palette_item_is_ignored() {
        let flow = Flow::seed();
        let intent = DropIntent::new(
            DragLocation::new(dnd::PALETTE, 0),
            Some(DragLocation::new(dnd::CANVAS, 0)),
            "sidebar-hologram",
        );
        assert_eq!(dnd::translate(&flow, &intent), None);
    }

    #[test]
    fn test_canvas_move_from_stale_index_is_ignored() {
        let flow = Flow::seed();
        assert_eq!(
            dnd::translate(&flow, &DropIntent::canvas_move("gone", 5, 0)),
            None
        );
    }

    #[test]
    fn test_every_palette_block_can_be_dropped() {
        let flow = Flow::seed();
        for (kind, _label) in chatflow::step::catalog() {
            let action = dnd::translate(&flow, &DropIntent::palette_to_canvas(kind, 0));
            assert_eq!(action, Some(Action::InsertStep { kind, index: 0 }));
        }
    }

    #[test]
    fn test_drop_intent_from_gesture_json() {
        let intent: DropIntent = serde_json::from_str(
            r#"{
                "source": { "containerId": "sidebar-blocks", "index": 2 },
                "destination": { "containerId": "flow-canvas", "index": 0 },
                "draggedItemId": "sidebar-mcq"
            }"#,
        )
        .unwrap();
        assert_eq!(
            dnd::translate(&Flow::seed(), &intent),
            Some(Action::InsertStep {
                kind: StepKind::Mcq,
                index: 0
            })
        );
    }
}
