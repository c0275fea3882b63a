use crate::callback::{EntryFn, EventFn, ExitFn, RunFn};
use crate::transition::Transition;
use crate::StateId;

/// The nested-substructure a composite state owns.
///
/// Conceptually this *is* the recursive "submachine" the data model talks
/// about (spec.md §3: "a composite state's submachine is itself a
/// StateMachine"); it is stored inline on the composite's arena node
/// rather than as a separate owned `StateMachine` so the whole chart can
/// live in one flat arena (see `SPEC_FULL.md` §3.1).
pub(crate) struct Composite {
    pub(crate) children: Vec<StateId>,
    pub(crate) initial: StateId,
    pub(crate) current: Option<StateId>,
    pub(crate) previous: Option<StateId>,
}

/// A node in the chart tree.
///
/// Everything here except `composite.current`/`composite.previous` is
/// immutable once the owning `StateMachine` is built. The chart is
/// configured once and treated as read-only at runtime (spec.md §5).
pub(crate) struct StateNode {
    pub(crate) parent: Option<StateId>,
    pub(crate) on_entry: Option<EntryFn>,
    pub(crate) on_run: Option<RunFn>,
    pub(crate) on_exit: Option<ExitFn>,
    pub(crate) on_event: Option<EventFn>,
    pub(crate) transitions: Vec<Transition>,
    pub(crate) composite: Option<Composite>,
}
