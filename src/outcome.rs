use crate::StateId;

/// What happened on a single [`StateMachine::tick`](crate::StateMachine::tick)
/// or [`StateMachine::send_event`](crate::StateMachine::send_event) call.
///
/// Mirrors the shape of statig's `Outcome`, scaled down to this crate's
/// simpler handled/not-handled question: there is no sub-outcome to chain
/// since a chart has exactly one active leaf per level, not a stack of
/// independently-resumable states.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// No transition fired anywhere on the active path; the innermost
    /// active state's `on_run` (if any) was invoked.
    Ran(StateId),
    /// A transition fired. `from` is the leaf that was active before the
    /// tick, `to` is the leaf now active after entry (if `to` is itself
    /// composite, its declared initial chain was followed all the way to
    /// a leaf).
    Transitioned { from: StateId, to: StateId },
}
