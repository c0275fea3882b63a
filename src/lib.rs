//! # hsm-runtime
//!
//! A tick-driven hierarchical state machine (HSM) runtime for embedded
//! controllers, device menus, and protocol handlers.
//!
//! A hierarchical state machine extends a traditional flat state machine
//! by letting states nest: a *composite* state owns a submachine of its
//! own, with its own current/previous pointers and its own declared
//! initial child. Transitioning between states anywhere in the chart
//! exits and enters only the states strictly between the source and
//! target and their lowest common ancestor, never the ancestor itself,
//! and never any state outside that span.
//!
//! ```
//! use hsm_runtime::StateMachineBuilder;
//!
//! let mut builder = StateMachineBuilder::new();
//! let off = builder.add_state(None);
//! let on = builder.add_state(None);
//! builder.add_transition(off, on, || true);
//! builder.set_initial(off);
//!
//! let mut machine = builder.build();
//! machine.init();
//! assert_eq!(machine.current(), Some(off));
//! machine.tick();
//! assert_eq!(machine.current(), Some(on));
//! ```
//!
//! ## Driving the machine
//!
//! The caller owns the clock: [`StateMachine::tick`] advances the chart by
//! one step, evaluating transitions and running the active leaf's `on_run`
//! callback if none fired. [`StateMachine::send_event`] dispatches an
//! integer-coded event across the active path, innermost state first,
//! unconditionally. There is no "handled" signal that stops propagation.
//! Neither method blocks or schedules anything; both run synchronously to
//! completion, matching the cooperative, non-preemptive model the engine
//! assumes (see the crate's `SPEC_FULL.md` for the full concurrency
//! write-up, kept alongside the source rather than duplicated here).
//!
//! ## Configuration vs. hot path
//!
//! Chart assembly ([`StateMachineBuilder`]) is the crate's one
//! intentionally-fallible surface: it panics on a handful of programmer
//! errors (a [`StateId`] from the wrong builder, a chart deeper than the
//! configured maximum). Once built, `init`/`tick`/`send_event` are
//! infallible by design: absent callbacks, absent initial states, and
//! disjoint-tree transitions all degrade to "nothing happens," never a
//! panic, matching the realtime-control use case this crate targets.
//!
//! When built with the `log` feature, the runtime emits `trace`-level
//! diagnostics for entry, exit, and transition events, on top of (not
//! instead of) the callbacks application code registers.

mod builder;
mod callback;
mod ids;
mod lca;
mod machine;
mod node;
mod outcome;
mod transition;

pub use builder::StateMachineBuilder;
pub use ids::StateId;
pub use machine::{StateMachine, Submachine};
pub use outcome::TickOutcome;
