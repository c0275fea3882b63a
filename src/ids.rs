use core::fmt;

/// An index into a [`StateMachine`](crate::StateMachine)'s state arena.
///
/// `StateId`s are handed out by a [`StateMachineBuilder`](crate::StateMachineBuilder)
/// in the order states are added and are only meaningful for the
/// `StateMachine` that produced them. Passing one to a different
/// `StateMachine` is a programmer error the builder panics on rather than
/// silently mis-indexing into the wrong arena.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct StateId {
    pub(crate) index: u32,
    pub(crate) owner: u32,
}

impl StateId {
    pub(crate) fn new(index: u32, owner: u32) -> Self {
        StateId { index, owner }
    }

    pub(crate) fn index(self) -> usize {
        self.index as usize
    }
}

impl fmt::Debug for StateId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "StateId({})", self.index)
    }
}
