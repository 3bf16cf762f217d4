//! The flow store: the ordered step sequence, its edge set, and the reducer
//! operations that move from one snapshot to the next.

pub mod action;
pub mod conversion;
pub mod edge;
pub mod model;
pub mod store;

pub use action::*;
pub use conversion::*;
pub use edge::*;
pub use model::*;
pub use store::*;
