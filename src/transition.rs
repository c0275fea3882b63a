use crate::callback::{ActionFn, GuardFn};
use crate::StateId;

/// A directed edge from an implicit source (its owner state) to an
/// explicit target state.
///
/// Transitions are evaluated in the order they were added to their
/// source state; the first one whose guard returns `true` fires, and the
/// rest are skipped for that tick. Priority is stable declaration order,
/// not guard complexity or specificity.
pub struct Transition {
    pub(crate) target: StateId,
    pub(crate) guard: GuardFn,
    pub(crate) action: Option<ActionFn>,
}

impl Transition {
    pub(crate) fn new(target: StateId, guard: GuardFn, action: Option<ActionFn>) -> Self {
        Transition {
            target,
            guard,
            action,
        }
    }

    pub(crate) fn fires(&mut self) -> bool {
        (self.guard)()
    }
}
