//! Cross-cutting invariants from the testable-properties list that aren't
//! tied to one specific scenario: priority stability, self-transition
//! no-ops, inert-machine no-ops, and the builder's two panicking
//! programmer-error checks.

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use hsm_runtime::StateMachineBuilder;

    type Trace = Rc<RefCell<Vec<String>>>;

    fn trace_fn(trace: &Trace, label: &str) -> impl FnMut(hsm_runtime::StateId) {
        let trace = Rc::clone(trace);
        let label = label.to_string();
        move |_| trace.borrow_mut().push(label.clone())
    }

    #[test]
    fn priority_stability_first_declared_firing_guard_wins() {
        let trace = Rc::new(RefCell::new(Vec::new()));

        let mut builder = StateMachineBuilder::new();
        let start = builder.add_state(None);
        let first = builder.add_state(None);
        let second = builder.add_state(None);

        builder.on_entry(first, trace_fn(&trace, "entry_first"));
        builder.on_entry(second, trace_fn(&trace, "entry_second"));

        // Both transitions' guards return true; priority is declaration order.
        builder.add_transition(start, first, || true);
        builder.add_transition(start, second, || true);
        builder.set_initial(start);

        let mut machine = builder.build();
        machine.init();
        machine.tick();

        assert_eq!(machine.current(), Some(first));
        assert_eq!(*trace.borrow(), vec!["entry_first"]);
    }

    #[test]
    fn self_transition_invokes_neither_exit_nor_entry() {
        let trace = Rc::new(RefCell::new(Vec::new()));

        let mut builder = StateMachineBuilder::new();
        let looping = builder.add_state(None);
        builder.on_entry(looping, trace_fn(&trace, "entry"));
        builder.on_exit(looping, trace_fn(&trace, "exit"));
        builder.add_transition(looping, looping, || true);
        builder.set_initial(looping);

        let mut machine = builder.build();
        machine.init();
        trace.borrow_mut().clear();

        machine.tick();

        assert!(trace.borrow().is_empty());
        assert_eq!(machine.current(), Some(looping));
    }

    #[test]
    fn self_transition_still_invokes_its_action() {
        let fired = Rc::new(RefCell::new(0));

        let mut builder = StateMachineBuilder::new();
        let looping = builder.add_state(None);

        let fired_in_action = Rc::clone(&fired);
        builder.add_transition_with_action(
            looping,
            looping,
            || true,
            Some(move || *fired_in_action.borrow_mut() += 1),
        );
        builder.set_initial(looping);

        let mut machine = builder.build();
        machine.init();

        machine.tick();
        machine.tick();

        assert_eq!(*fired.borrow(), 2);
        assert_eq!(machine.current(), Some(looping));
    }

    #[test]
    fn transitioning_back_to_the_containing_composite_does_not_recascade() {
        // A leaf transitioning to the composite it is already nested under
        // (the "b" = back-to-submenu command in demos/device_menu.rs) is its
        // own LCA. The composite was never exited, so it must not be
        // re-entered and its declared-initial child must not fire again.
        let trace = Rc::new(RefCell::new(Vec::new()));

        let mut builder = StateMachineBuilder::new();
        let about_menu = builder.add_state(None);
        let home_screen = builder.add_state(Some(about_menu));
        let info_screen = builder.add_state(Some(about_menu));
        builder.set_composite(about_menu, home_screen);

        for (state, label) in [
            (about_menu, "about_menu"),
            (home_screen, "home_screen"),
            (info_screen, "info_screen"),
        ] {
            builder.on_entry(state, trace_fn(&trace, &format!("entry_{label}")));
            builder.on_exit(state, trace_fn(&trace, &format!("exit_{label}")));
        }
        builder.add_transition(home_screen, info_screen, || true);
        builder.add_transition(info_screen, about_menu, || true);
        builder.set_initial(about_menu);

        let mut machine = builder.build();
        machine.init();
        trace.borrow_mut().clear();

        machine.tick(); // home_screen -> info_screen
        assert_eq!(*trace.borrow(), vec!["exit_home_screen", "entry_info_screen"]);
        trace.borrow_mut().clear();

        machine.tick(); // info_screen -> about_menu (about_menu is its own LCA)
        assert_eq!(*trace.borrow(), vec!["exit_info_screen"]);
        assert_eq!(machine.current(), Some(about_menu));

        let sub = machine.submachine(about_menu).expect("about_menu is composite");
        assert_eq!(sub.current(), Some(info_screen));
        assert_eq!(sub.previous(), Some(home_screen));
    }

    #[test]
    fn ticking_an_uninitialized_machine_is_a_no_op() {
        let mut builder = StateMachineBuilder::new();
        builder.add_state(None);
        let mut machine = builder.build();

        assert_eq!(machine.tick(), None);
        assert_eq!(machine.current(), None);
    }

    #[test]
    fn init_with_no_declared_initial_leaves_current_null() {
        let mut builder = StateMachineBuilder::new();
        builder.add_state(None);
        let mut machine = builder.build();

        machine.init();

        assert_eq!(machine.current(), None);
    }

    #[test]
    #[should_panic(expected = "different StateMachineBuilder")]
    fn state_id_from_another_builder_panics() {
        let mut builder_a = StateMachineBuilder::new();
        let state_a = builder_a.add_state(None);

        let mut builder_b = StateMachineBuilder::new();
        let state_b = builder_b.add_state(None);

        builder_b.add_transition(state_b, state_a, || true);
    }

    #[test]
    #[should_panic(expected = "exceeds configured max depth")]
    fn exceeding_the_configured_max_depth_panics() {
        let mut builder = StateMachineBuilder::new().with_max_depth(2);
        let root = builder.add_state(None);
        let child = builder.add_state(Some(root));
        builder.add_state(Some(child));
    }

    #[test]
    fn submachine_view_reflects_nested_current_without_exposing_the_arena() {
        let mut builder = StateMachineBuilder::new();
        let main_menu = builder.add_state(None);
        let about_menu = builder.add_state(None);
        let home_screen = builder.add_state(Some(about_menu));
        let info_screen = builder.add_state(Some(about_menu));
        builder.set_composite(about_menu, home_screen);
        builder.add_transition(home_screen, info_screen, || true);
        builder.set_initial(about_menu);

        let mut machine = builder.build();
        assert!(machine.submachine(main_menu).is_none());
        assert!(!machine.is_composite(main_menu));
        assert!(machine.is_composite(about_menu));

        machine.init();
        let sub = machine.submachine(about_menu).expect("about_menu is composite");
        assert_eq!(sub.current(), Some(home_screen));
        assert_eq!(sub.previous(), None);
        assert_eq!(sub.states(), &[home_screen, info_screen]);
        assert!(sub.active_submachine().is_none());

        machine.tick(); // home_screen -> info_screen
        let sub = machine.submachine(about_menu).expect("about_menu is composite");
        assert_eq!(sub.current(), Some(info_screen));
        assert_eq!(sub.previous(), Some(home_screen));
    }

    #[test]
    fn balanced_entry_exit_over_a_sequence_of_ticks() {
        let entries: Rc<RefCell<i32>> = Rc::new(RefCell::new(0));
        let exits: Rc<RefCell<i32>> = Rc::new(RefCell::new(0));

        let mut builder = StateMachineBuilder::new();
        let a = builder.add_state(None);
        let b = builder.add_state(None);

        let entries_a = Rc::clone(&entries);
        builder.on_entry(a, move |_| *entries_a.borrow_mut() += 1);
        let exits_a = Rc::clone(&exits);
        builder.on_exit(a, move |_| *exits_a.borrow_mut() += 1);

        builder.add_transition(a, b, || true);
        builder.add_transition(b, a, || true);
        builder.set_initial(a);

        let mut machine = builder.build();
        machine.init();
        for _ in 0..5 {
            machine.tick();
        }

        // After an odd number of hops away from `a` (5 ticks, alternating a/b),
        // `a` was entered once (init) and exited and re-entered twice more, so
        // entries - exits must be 0 or 1.
        let diff = *entries.borrow() - *exits.borrow();
        assert!(diff == 0 || diff == 1, "entries - exits was {diff}");
    }
}
