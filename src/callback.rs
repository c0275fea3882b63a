use crate::StateId;

/// Called once when a state is entered, with the identity of the state
/// being entered.
pub type EntryFn = Box<dyn FnMut(StateId)>;

/// Called every tick that the state is current and no transition fires.
pub type RunFn = Box<dyn FnMut(StateId)>;

/// Called once when a state is exited, with the identity of the state
/// being exited.
pub type ExitFn = Box<dyn FnMut(StateId)>;

/// Called whenever an event is dispatched while the state is on the
/// active stack, with the state's identity and the event code.
pub type EventFn = Box<dyn FnMut(StateId, i32)>;

/// A nullary predicate deciding whether a transition may fire.
pub type GuardFn = Box<dyn FnMut() -> bool>;

/// A nullary side effect invoked as a transition fires, after exit and
/// before entry.
pub type ActionFn = Box<dyn FnMut()>;
