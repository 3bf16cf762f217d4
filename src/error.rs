use crate::step::{StepId, StepKind};
use thiserror::Error;

/// Errors raised by structural edits that fail validation in the flow store.
///
/// Stale references are never reported here: operations on an id that no
/// longer exists are silent no-ops.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FlowError {
    #[error(
        "Reordered sequence is not a permutation of the current steps (expected {expected} steps, got {found})"
    )]
    NotAPermutation { expected: usize, found: usize },

    #[error("Step '{0}' appears more than once in the flow")]
    DuplicateStepId(StepId),

    #[error("Edge '{source_id}' -> '{target_id}' references a step that is not in the flow")]
    DanglingEdge {
        source_id: StepId,
        target_id: StepId,
    },

    #[error("Choice step '{step_id}' has no options")]
    EmptyOptions { step_id: StepId },

    #[error("Step '{step_id}' of kind '{kind}' does not take options")]
    UnexpectedOptions { step_id: StepId, kind: StepKind },
}

/// Errors that can occur while parsing step kinds from their wire names.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StepError {
    #[error("Unknown step kind: '{0}'")]
    UnknownKind(String),
}

/// Refusals raised at the editing-surface boundary, before a patch reaches the store.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EditError {
    #[error("Step '{step_id}' must keep at least one option")]
    OptionFloor { step_id: StepId },

    #[error("Step '{step_id}' does not take options")]
    NotAChoice { step_id: StepId },

    #[error("Option index {index} is out of range for step '{step_id}' ({len} options)")]
    OptionOutOfRange {
        step_id: StepId,
        index: usize,
        len: usize,
    },
}

/// Errors that can occur when decoding a persisted flow snapshot.
#[derive(Error, Debug)]
pub enum SnapshotError {
    #[error("Failed to parse flow snapshot JSON: {0}")]
    JsonParseError(#[from] serde_json::Error),

    #[error("Snapshot schema version {found} is newer than the supported version {supported}")]
    UnsupportedVersion { found: u64, supported: u32 },

    #[error("Snapshot failed validation: {0}")]
    Invalid(#[from] FlowError),
}

/// Errors raised by storage backends.
#[derive(Error, Debug)]
pub enum StorageError {
    #[error("Storage I/O failed for slot '{slot}': {source}")]
    Io {
        slot: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Storage slot name '{0}' is not allowed")]
    InvalidSlot(String),
}

/// Errors returned by the chat simulation when input does not fit its current state.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SimulationError {
    #[error("The chat has ended; no further input is accepted")]
    Ended,

    #[error("The chat is not waiting for user input")]
    NotAwaitingInput,

    #[error("Step '{0}' requires an answer")]
    EmptyAnswer(StepId),

    #[error("Step '{0}' is not a choice step")]
    NotAChoice(StepId),

    #[error("'{option}' is not an option of step '{step_id}'")]
    UnknownOption { step_id: StepId, option: String },
}

/// Errors that can occur when loading editor configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Could not read config file '{path}': {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config JSON: {0}")]
    JsonParseError(#[from] serde_json::Error),
}
