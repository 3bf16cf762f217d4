//! # chatflow - Flow-State Core for a Visual Chatbot Designer
//!
//! **chatflow** holds the state behind a drag-and-drop chatbot conversation
//! builder. A conversation is a `Flow`: an ordered list of steps (welcome
//! message, text/email/phone input, multiple choice, rating, ...) plus an
//! explicit set of directed edges between them.
//!
//! ## Core Workflow
//!
//! 1.  **Open a store**: `FlowStore::open` loads the last snapshot from a `Storage`
//!     slot, or starts from the seed flow.
//! 2.  **Translate gestures**: drops from the palette or within the canvas go
//!     through `dnd::translate`, graph-editor events through `graph`. Both produce
//!     `Action`s.
//! 3.  **Dispatch**: `FlowStore::dispatch` reduces the action into the next
//!     immutable snapshot and persists it.
//! 4.  **Derive views**: `graph::project` lays the flow out as a graph,
//!     `ChatSimulator` walks it as a chat preview, and `export` writes the step
//!     array for the chat widget.
//!
//! ## Quick Start
//!
//! ```rust
//! use chatflow::prelude::*;
//!
//! let mut store = FlowStore::open(MemoryStorage::new(), DEFAULT_SLOT);
//! assert_eq!(store.flow().len(), 2); // seed: welcome + email
//!
//! // A palette block dropped onto the canvas between the two seed steps.
//! let intent = DropIntent::palette_to_canvas(StepKind::Mcq, 1);
//! if let Some(action) = dnd::translate(store.flow(), &intent) {
//!     store.dispatch(action).expect("insert never fails validation");
//! }
//! assert_eq!(store.flow().steps()[1].kind(), StepKind::Mcq);
//!
//! // Preview the conversation.
//! let (mut sim, _timer) = ChatSimulator::start(store.steps(), SimulationConfig::default());
//! sim.run_until_blocked();
//! sim.select_option("Option 1").unwrap();
//! println!("{}", TranscriptFormatter::format_transcript(sim.transcript()));
//! ```

pub mod config;
pub mod dnd;
pub mod editing;
pub mod error;
pub mod export;
pub mod flow;
pub mod graph;
pub mod prelude;
pub mod simulation;
pub mod step;
pub mod storage;

#[cfg(feature = "python-bindings")]
mod python;
