use super::model::Flow;
use crate::error::FlowError;

/// A trait for data models that can be converted into a `Flow`.
///
/// This is the extension point for importing flows from formats other than
/// the current persisted snapshot: older snapshot shapes, exports from other
/// tools, or fixtures built in code. Implementations must return a flow that
/// satisfies every invariant, which `Flow::new` checks for them.
///
/// # Example
///
/// ```rust
/// use chatflow::prelude::*;
///
/// struct Script(Vec<(&'static str, &'static str)>);
///
/// impl IntoFlow for Script {
///     fn into_flow(self) -> Result<Flow, FlowError> {
///         let steps = self
///             .0
///             .into_iter()
///             .map(|(kind, title)| {
///                 let kind = kind.parse().unwrap_or(StepKind::Statement);
///                 Step::new(kind).titled(title)
///             })
///             .collect();
///         Flow::sequential(steps)
///     }
/// }
///
/// let flow = Script(vec![("welcome", "Hi"), ("email", "Your email?")])
///     .into_flow()
///     .unwrap();
/// assert_eq!(flow.edges().len(), 1);
/// ```
pub trait IntoFlow {
    /// Consumes the object and converts it into a validated flow.
    fn into_flow(self) -> Result<Flow, FlowError>;
}

impl IntoFlow for Flow {
    fn into_flow(self) -> Result<Flow, FlowError> {
        self.validate()?;
        Ok(self)
    }
}
