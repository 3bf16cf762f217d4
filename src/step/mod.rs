//! The step entity model: the closed catalog of step kinds and the `Step` record.

pub mod kind;
pub mod model;

pub use kind::*;
pub use model::*;

/// The palette blocks offered to the user, in display order.
pub fn catalog() -> impl Iterator<Item = (StepKind, &'static str)> {
    StepKind::ALL.iter().map(|kind| (*kind, kind.label()))
}
