//! Scenario A: a flat chain of six states spelling out "HELLO", driven by
//! an externally-set input character, matching the classic recognizer
//! shape this crate's core algorithm is grounded on.

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use hsm_runtime::StateMachineBuilder;

    fn trace_fn(trace: &Rc<RefCell<Vec<String>>>, label: &str) -> impl FnMut(hsm_runtime::StateId) {
        let trace = Rc::clone(trace);
        let label = label.to_string();
        move |_| trace.borrow_mut().push(label.clone())
    }

    #[test]
    fn spells_hello_one_character_at_a_time() {
        let trace = Rc::new(RefCell::new(Vec::new()));
        let input = Rc::new(RefCell::new('\0'));

        let mut builder = StateMachineBuilder::new();
        let h = builder.add_state(None);
        let e = builder.add_state(None);
        let l1 = builder.add_state(None);
        let l2 = builder.add_state(None);
        let o = builder.add_state(None);
        let done = builder.add_state(None);

        for (state, label) in [
            (h, "H"),
            (e, "E"),
            (l1, "L1"),
            (l2, "L2"),
            (o, "O"),
            (done, "DONE"),
        ] {
            builder.on_entry(state, trace_fn(&trace, &format!("entry_{label}")));
            builder.on_exit(state, trace_fn(&trace, &format!("exit_{label}")));
        }

        let guard = |input: &Rc<RefCell<char>>, want: char| {
            let input = Rc::clone(input);
            move || *input.borrow() == want
        };

        builder.add_transition(h, e, guard(&input, 'H'));
        builder.add_transition(e, l1, guard(&input, 'E'));
        builder.add_transition(l1, l2, guard(&input, 'L'));
        builder.add_transition(l2, o, guard(&input, 'L'));
        builder.add_transition(o, done, guard(&input, 'O'));
        builder.set_initial(h);

        let mut machine = builder.build();
        machine.init();
        assert_eq!(machine.current(), Some(h));
        assert_eq!(*trace.borrow(), vec!["entry_H"]);
        trace.borrow_mut().clear();

        for ch in "HELLO".chars() {
            *input.borrow_mut() = ch;
            machine.tick();
        }

        assert_eq!(machine.current(), Some(done));
        assert_eq!(
            *trace.borrow(),
            vec![
                "exit_H", "entry_E", "exit_E", "entry_L1", "exit_L1", "entry_L2", "exit_L2",
                "entry_O", "exit_O", "entry_DONE",
            ]
        );
    }
}
