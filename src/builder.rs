use std::sync::atomic::{AtomicU32, Ordering};

use crate::callback::{ActionFn, EntryFn, EventFn, ExitFn, GuardFn, RunFn};
use crate::machine::StateMachine;
use crate::node::{Composite, StateNode};
use crate::transition::Transition;
use crate::StateId;

static NEXT_OWNER: AtomicU32 = AtomicU32::new(1);

const DEFAULT_MAX_DEPTH: usize = 16;

/// Assembles a [`StateMachine`]'s chart: states, parent links, composite
/// substructure, transitions, and callbacks.
///
/// This is the crate's one intentionally-fallible surface. Chart assembly
/// happens once, off the hot path, so, unlike `init`/`tick`/`send_event`
/// (which never panic), the builder panics on two classes of programmer
/// error: passing a [`StateId`] that didn't come from `self` (§3.4), and
/// building a chart deeper than the configured maximum depth. It performs
/// no other validation: cycle detection, reachability, and "is `initial`
/// actually reachable from the root" are all left to the caller, matching
/// spec.md §6's "does not validate... no cycle detection, no reachability
/// check" non-goal.
pub struct StateMachineBuilder {
    owner: u32,
    nodes: Vec<StateNode>,
    depths: Vec<usize>,
    max_depth: usize,
    initial: Option<StateId>,
}

impl StateMachineBuilder {
    /// Starts a new, empty chart with the default maximum depth of 16
    /// levels, the bound the predecessor of this crate's HSM core used
    /// for nesting on resource-constrained targets.
    pub fn new() -> Self {
        StateMachineBuilder {
            owner: NEXT_OWNER.fetch_add(1, Ordering::Relaxed),
            nodes: Vec::new(),
            depths: Vec::new(),
            max_depth: DEFAULT_MAX_DEPTH,
            initial: None,
        }
    }

    /// Overrides the maximum chart nesting depth. Exceeding it, whether
    /// via `add_state` parent chains or a composite's declared-initial
    /// chain at runtime, is a panic rather than a silent truncation.
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    fn check_owner(&self, id: StateId) {
        assert_eq!(
            id.owner, self.owner,
            "StateId belongs to a different StateMachineBuilder/StateMachine; \
             StateIds are only valid for the builder that created them"
        );
    }

    /// Adds a new state, optionally nested under `parent`, and returns its
    /// identity. Panics if `parent` was not produced by `self`, or if the
    /// resulting nesting depth exceeds the configured maximum.
    pub fn add_state(&mut self, parent: Option<StateId>) -> StateId {
        if let Some(p) = parent {
            self.check_owner(p);
        }

        let depth = match parent {
            Some(p) => self.depths[p.index()] + 1,
            None => 1,
        };
        assert!(
            depth <= self.max_depth,
            "chart nesting depth {depth} exceeds configured max depth of {}; \
             raise it with StateMachineBuilder::with_max_depth if this chart \
             is intentionally this deep",
            self.max_depth
        );

        let id = StateId::new(self.nodes.len() as u32, self.owner);
        self.nodes.push(StateNode {
            parent,
            on_entry: None,
            on_run: None,
            on_exit: None,
            on_event: None,
            transitions: Vec::new(),
            composite: None,
        });
        self.depths.push(depth);
        id
    }

    /// Marks `state` as composite with the given declared initial child.
    /// `initial` must already have been added with `state` as its parent.
    /// Panics if either `StateId` belongs to a different builder.
    pub fn set_composite(&mut self, state: StateId, initial: StateId) {
        self.check_owner(state);
        self.check_owner(initial);
        assert_eq!(
            self.nodes[initial.index()].parent,
            Some(state),
            "a composite's declared initial child must be a direct child of it"
        );

        self.nodes[state.index()].composite = Some(Composite {
            children: Vec::new(),
            initial,
            current: None,
            previous: None,
        });
    }

    /// Sets the top-level state the chart enters on `init`.
    pub fn set_initial(&mut self, state: StateId) {
        self.check_owner(state);
        self.initial = Some(state);
    }

    /// Registers an entry callback, invoked once when `state` is entered.
    pub fn on_entry(&mut self, state: StateId, f: impl FnMut(StateId) + 'static) {
        self.check_owner(state);
        self.nodes[state.index()].on_entry = Some(Box::new(f) as EntryFn);
    }

    /// Registers a run callback, invoked every tick `state` is current and
    /// no transition fires anywhere on the active path.
    pub fn on_run(&mut self, state: StateId, f: impl FnMut(StateId) + 'static) {
        self.check_owner(state);
        self.nodes[state.index()].on_run = Some(Box::new(f) as RunFn);
    }

    /// Registers an exit callback, invoked once when `state` is exited.
    pub fn on_exit(&mut self, state: StateId, f: impl FnMut(StateId) + 'static) {
        self.check_owner(state);
        self.nodes[state.index()].on_exit = Some(Box::new(f) as ExitFn);
    }

    /// Registers an event callback, invoked whenever an event is
    /// dispatched while `state` is on the active path.
    pub fn on_event(&mut self, state: StateId, f: impl FnMut(StateId, i32) + 'static) {
        self.check_owner(state);
        self.nodes[state.index()].on_event = Some(Box::new(f) as EventFn);
    }

    /// Adds a transition from `source` to `target`, guarded by `guard`.
    /// Transitions on a state are evaluated in the order they were added;
    /// the first whose guard returns `true` at tick time fires.
    pub fn add_transition(
        &mut self,
        source: StateId,
        target: StateId,
        guard: impl FnMut() -> bool + 'static,
    ) {
        self.add_transition_with_action(source, target, guard, None::<fn()>);
    }

    /// Like [`add_transition`](Self::add_transition), but with an action
    /// invoked after exit and before entry if the transition fires.
    pub fn add_transition_with_action(
        &mut self,
        source: StateId,
        target: StateId,
        guard: impl FnMut() -> bool + 'static,
        action: Option<impl FnMut() + 'static>,
    ) {
        self.check_owner(source);
        self.check_owner(target);
        let action = action.map(|a| Box::new(a) as ActionFn);
        self.nodes[source.index()]
            .transitions
            .push(Transition::new(target, Box::new(guard) as GuardFn, action));
    }

    /// Finalizes the chart into a runnable [`StateMachine`].
    ///
    /// Populates each composite's `children` list from the parent links
    /// recorded by `add_state`. This is the only bookkeeping `build`
    /// performs beyond moving the assembled nodes into the machine; the
    /// builder otherwise writes directly into each node as it's called.
    pub fn build(mut self) -> StateMachine {
        for index in 0..self.nodes.len() {
            if let Some(parent) = self.nodes[index].parent {
                let child = StateId::new(index as u32, self.owner);
                if let Some(composite) = self.nodes[parent.index()].composite.as_mut() {
                    composite.children.push(child);
                }
            }
        }

        StateMachine {
            owner: self.owner,
            nodes: self.nodes,
            max_depth: self.max_depth,
            initial: self.initial,
            current: None,
            previous: None,
        }
    }
}

impl Default for StateMachineBuilder {
    fn default() -> Self {
        Self::new()
    }
}
