use crate::lca::{common_ancestor, path_to_ancestor};
use crate::node::StateNode;
use crate::outcome::TickOutcome;
use crate::StateId;

/// A configured, runnable hierarchical state chart.
///
/// Built once via [`StateMachineBuilder`](crate::StateMachineBuilder) and
/// then driven by repeated calls to [`tick`](StateMachine::tick) and
/// [`send_event`](StateMachine::send_event). The chart topology (states,
/// transitions, parent links, composite substructure) is immutable after
/// construction; only each composite's `current`/`previous` pointers and
/// the machine's own top-level `current`/`previous` mutate at runtime.
///
/// `StateMachine` is neither `Send` nor `Sync`: callbacks, guards, and
/// actions are boxed `FnMut` trait objects with no such bound, so a chart
/// built with `Rc`-captured state (the common case for sharing state
/// across callbacks on one machine) stays on the thread that built it.
/// Running one instance from two threads is a caller error this type does
/// not prevent, matching the single-logical-driver ownership model the
/// chart's runtime semantics assume.
pub struct StateMachine {
    pub(crate) owner: u32,
    pub(crate) nodes: Vec<StateNode>,
    pub(crate) max_depth: usize,
    pub(crate) initial: Option<StateId>,
    pub(crate) current: Option<StateId>,
    pub(crate) previous: Option<StateId>,
}

impl StateMachine {
    /// Activates the chart: sets `previous = None` and `current = initial`,
    /// then runs a full entry walk from the chart root down to `initial`
    /// (and, if `initial` is itself composite, recursively down through
    /// its declared-initial chain to a leaf).
    ///
    /// A no-op if no initial state was configured: the machine remains
    /// inert with `current = None`, per the permissive "null initial"
    /// handling this crate's hot path adopts for every absent-configuration
    /// case.
    pub fn init(&mut self) {
        let Some(initial) = self.initial else {
            return;
        };

        self.previous = None;
        self.current = Some(initial);

        let path = path_to_ancestor(&self.nodes, Some(initial), None, self.max_depth);
        for &state in path.iter().rev() {
            self.call_entry(state);
        }
        self.init_composite(initial);
    }

    /// Advances the machine by one step.
    ///
    /// Walks the active path from the root down, evaluating each level's
    /// transition list in declaration order. The first transition whose
    /// guard returns `true` fires and the walk stops there. Ticking never
    /// lets more than one transition fire, and never fires a deeper-level
    /// transition once an outer one has already fired this tick (§8
    /// invariant 2: single-fire-per-tick).
    ///
    /// If no transition anywhere on the path fires, `on_run` is invoked at
    /// every active state from the outermost to the innermost, and
    /// [`TickOutcome::Ran`] reports the innermost one. If a transition
    /// does fire, [`TickOutcome::Transitioned`] is returned and no
    /// `on_run` is invoked anywhere this tick (§8 invariant 3).
    ///
    /// Returns `None` if the machine has no `current` state: ticking an
    /// uninitialized or inert machine is a no-op.
    pub fn tick(&mut self) -> Option<TickOutcome> {
        let mut scope = self.current?;
        let mut ran_path = Vec::new();

        loop {
            if let Some(index) = self.first_firing_transition(scope) {
                let target = self.nodes[scope.index()].transitions[index].target;
                self.fire_transition(scope, index, target);
                return Some(TickOutcome::Transitioned { from: scope, to: target });
            }

            ran_path.push(scope);

            match self.nodes[scope.index()].composite.as_ref().and_then(|c| c.current) {
                Some(next) => scope = next,
                None => break,
            }
        }

        for &state in &ran_path {
            self.call_run(state);
        }
        Some(TickOutcome::Ran(*ran_path.last().expect("current checked at loop entry")))
    }

    /// Dispatches an integer-coded event across the active path,
    /// innermost state first.
    ///
    /// Every state on the active path receives the event unconditionally.
    /// There is no "handled" signal that halts propagation to outer
    /// states (spec §9's open question on event consumption, left as the
    /// permissive default since no implementer has asked to tighten it
    /// here). A no-op if the machine has no `current` state.
    pub fn send_event(&mut self, event: i32) {
        let Some(mut scope) = self.current else {
            #[cfg(feature = "log")]
            log::trace!("send_event({event}) dropped: machine has no current state");
            return;
        };

        let mut path = vec![scope];
        while let Some(next) = self.nodes[scope.index()].composite.as_ref().and_then(|c| c.current) {
            path.push(next);
            scope = next;
        }

        for &state in path.iter().rev() {
            self.call_event(state, event);
        }
    }

    /// Runs `state`'s declared-initial chain all the way to a leaf,
    /// invoking `on_entry` at each level along the way. Called once at
    /// the end of `init` and once at the end of a transition whose target
    /// is composite. Never on every tick, since a composite's `current`
    /// persists between ticks once set.
    fn init_composite(&mut self, state: StateId) {
        let mut depth = 0;
        let mut cur = state;
        loop {
            let Some(initial) = self.nodes[cur.index()].composite.as_ref().map(|c| c.initial) else {
                break;
            };

            depth += 1;
            assert!(
                depth <= self.max_depth,
                "chart nesting exceeded configured max depth of {}; \
                 is a composite's declared initial chain cyclic?",
                self.max_depth
            );

            if let Some(composite) = self.nodes[cur.index()].composite.as_mut() {
                composite.previous = None;
                composite.current = Some(initial);
            }
            self.call_entry(initial);
            cur = initial;
        }
    }

    /// Returns the index of the first transition on `state` whose guard
    /// fires, without yet performing exit/entry. A pure query so `tick`
    /// can decide whether to descend further before committing to a walk.
    fn first_firing_transition(&mut self, state: StateId) -> Option<usize> {
        let transitions = &mut self.nodes[state.index()].transitions;
        transitions.iter_mut().position(|t| t.fires())
    }

    /// Executes one transition from `source` to `target`: exit from
    /// `source` up to their lowest common ancestor, the transition's
    /// action (if any), then entry from the ancestor down to `target`,
    /// finishing with a submachine init if `target` was freshly entered
    /// and is composite.
    ///
    /// This is the corrected, unified version of the original's
    /// exit-then-enter split: rather than re-running each intermediate
    /// composite's own declared-initial cascade while descending toward
    /// `target` (which double-enters states already on the direct path),
    /// every composite strictly between the LCA and `target` has its
    /// `current`/`previous` set directly to the next hop on *this*
    /// transition's path, and the declared-initial cascade only runs when
    /// `target` itself is freshly entered.
    ///
    /// A transition whose target is the lowest common ancestor itself (a
    /// leaf transitioning back to a composite that already contains it) is
    /// not a fresh entry: `target` was never exited, so it must not be
    /// re-cascaded into its declared-initial child, which would both
    /// re-enter a state just exited and skip `target`'s own `on_entry`
    /// (which correctly does not fire either, since `target` was never
    /// exited in the first place).
    ///
    /// Bookkeeping only ever rewrites the active-child pointer of states
    /// strictly between the LCA and `target` (see `relink_path`); a
    /// transition entirely nested under some composite (e.g. switching
    /// between two of its children) never touches this machine's own
    /// top-level `current`/`previous`. Those track the top-level active
    /// branch, not whichever leaf most recently changed underneath it.
    fn fire_transition(&mut self, source: StateId, transition_index: usize, target: StateId) {
        let ancestor = if source == target {
            Some(source)
        } else {
            common_ancestor(&self.nodes, Some(source), Some(target))
        };
        #[cfg(feature = "log")]
        log::trace!("transition {:?} -> {:?}, lca = {:?}", source, target, ancestor);

        if source != target {
            let exit_path = path_to_ancestor(&self.nodes, Some(source), ancestor, self.max_depth);
            for &state in &exit_path {
                self.call_exit(state);
            }
        }

        if let Some(action) = self.nodes[source.index()].transitions[transition_index]
            .action
            .as_mut()
        {
            action();
        }

        if source == target {
            return;
        }

        let entry_path = path_to_ancestor(&self.nodes, Some(target), ancestor, self.max_depth);
        for &state in entry_path.iter().rev() {
            self.call_entry(state);
        }

        self.relink_path(ancestor, &entry_path);

        let target_has_current = self.nodes[target.index()]
            .composite
            .as_ref()
            .map_or(false, |c| c.current.is_some());
        if !entry_path.is_empty() || !target_has_current {
            self.init_composite(target);
        }
    }

    /// Sets the active-child pointer at each level from `ancestor`
    /// (exclusive) down through `target` (inclusive) to the next hop on
    /// *this* transition's path, rather than letting a later
    /// `init_composite` call re-derive it from a composite's declared
    /// initial. That would be correct for the target's own submachine
    /// but wrong for every composite strictly between the LCA and the
    /// target, whose active child this transition is explicitly
    /// overriding. When `ancestor` is `None` the first hop updates this
    /// machine's own top-level `current`/`previous` instead of a
    /// composite's, conceptually the "virtual root" one level above
    /// every top-level state.
    fn relink_path(&mut self, ancestor: Option<StateId>, entry_path: &[StateId]) {
        let mut parent = ancestor;
        for &state in entry_path.iter().rev() {
            self.set_active_child(parent, state);
            parent = Some(state);
        }
    }

    fn set_active_child(&mut self, parent: Option<StateId>, child: StateId) {
        match parent {
            None => {
                self.previous = self.current;
                self.current = Some(child);
            }
            Some(p) => {
                if let Some(composite) = self.nodes[p.index()].composite.as_mut() {
                    composite.previous = composite.current;
                    composite.current = Some(child);
                }
            }
        }
    }

    fn call_entry(&mut self, state: StateId) {
        #[cfg(feature = "log")]
        log::trace!("enter {:?}", state);
        if let Some(f) = self.nodes[state.index()].on_entry.as_mut() {
            f(state);
        }
    }

    fn call_exit(&mut self, state: StateId) {
        #[cfg(feature = "log")]
        log::trace!("exit {:?}", state);
        if let Some(f) = self.nodes[state.index()].on_exit.as_mut() {
            f(state);
        }
    }

    fn call_run(&mut self, state: StateId) {
        if let Some(f) = self.nodes[state.index()].on_run.as_mut() {
            f(state);
        }
    }

    fn call_event(&mut self, state: StateId, event: i32) {
        if let Some(f) = self.nodes[state.index()].on_event.as_mut() {
            f(state, event);
        }
    }

    /// The state currently active at the top level of the chart.
    pub fn current(&self) -> Option<StateId> {
        self.current
    }

    /// The state that was active at the top level before the most recent
    /// transition, or `None` if no transition has fired yet.
    pub fn previous(&self) -> Option<StateId> {
        self.previous
    }

    /// Whether `state` is composite (owns a submachine) in this chart.
    ///
    /// Panics if `state` belongs to a different `StateMachine`.
    pub fn is_composite(&self, state: StateId) -> bool {
        self.check_owner(state);
        self.nodes[state.index()].composite.is_some()
    }

    /// A borrowing view onto `state`'s nested submachine, or `None` if
    /// `state` is a leaf.
    ///
    /// This is the recursive "a composite's submachine is itself a
    /// StateMachine" relationship (spec.md §3) surfaced at the API level:
    /// the nested current/previous/children live inline on the arena node
    /// (§3.1), but callers who want to drill into the hierarchy without
    /// reaching into crate-internal fields get an addressable value here.
    ///
    /// Panics if `state` belongs to a different `StateMachine`.
    pub fn submachine(&self, state: StateId) -> Option<Submachine<'_>> {
        self.check_owner(state);
        self.nodes[state.index()].composite.as_ref().map(|composite| Submachine {
            machine: self,
            children: &composite.children,
            current: composite.current,
            previous: composite.previous,
        })
    }

    fn check_owner(&self, state: StateId) {
        assert_eq!(
            state.owner, self.owner,
            "StateId belongs to a different StateMachine; StateIds are only \
             valid for the StateMachine (or the builder that produced it) \
             they were handed out by"
        );
    }
}

/// A read-only view onto a composite state's nested submachine.
///
/// Borrowed from the owning [`StateMachine`] via
/// [`StateMachine::submachine`]; it exposes the same `current`/`previous`
/// shape the top-level machine does; `states()` is the nested machine's
/// own constituent set, not the whole chart's.
pub struct Submachine<'a> {
    machine: &'a StateMachine,
    children: &'a [StateId],
    current: Option<StateId>,
    previous: Option<StateId>,
}

impl<'a> Submachine<'a> {
    /// The state currently active within this submachine.
    pub fn current(&self) -> Option<StateId> {
        self.current
    }

    /// The state that was active within this submachine before its most
    /// recent transition, or `None` if none has fired yet.
    pub fn previous(&self) -> Option<StateId> {
        self.previous
    }

    /// The states that make up this submachine, in the order they were
    /// added to the chart.
    pub fn states(&self) -> &'a [StateId] {
        self.children
    }

    /// Recurses into the active child's own submachine, if it is itself
    /// composite. Mirrors [`StateMachine::submachine`] one level down.
    pub fn active_submachine(&self) -> Option<Submachine<'a>> {
        self.current.and_then(|id| self.machine.submachine(id))
    }
}
