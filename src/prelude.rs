//! Prelude module for convenient imports
//!
//! This module re-exports the most commonly used types and traits from the chatflow crate.
//!
//! # Example
//!
//! ```rust
//! use chatflow::prelude::*;
//!
//! let flow = Flow::seed().add_step(StepKind::Rating);
//! let graph = graph::project(&flow).layout(&LayeredLayout, &LayoutConfig::default());
//! assert_eq!(graph.edges.len(), 2);
//! ```

// Store and reducer
pub use crate::flow::{Action, DEFAULT_SLOT, Edge, EdgeChange, Flow, FlowStore, IntoFlow};

// Steps
pub use crate::step::{Interaction, Step, StepId, StepIssue, StepKind, StepPatch, ValueRange};

// Persistence
pub use crate::storage::{DirStorage, MemoryStorage, Storage};

// Gestures and derived views
pub use crate::dnd::{self, DragLocation, DropIntent};
pub use crate::graph::{
    self, GraphProjection, GraphView, LayeredLayout, LayoutConfig, LayoutDirection, LayoutEngine,
    NodeChange, Position,
};
pub use crate::simulation::{
    ChatSimulator, Role, ScheduledAdvance, SimState, SimulationConfig, TranscriptFormatter, Turn,
};

// Configuration and errors
pub use crate::config::EditorConfig;
pub use crate::error::{
    ConfigError, EditError, FlowError, SimulationError, SnapshotError, StepError, StorageError,
};
