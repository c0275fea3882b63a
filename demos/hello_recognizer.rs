//! Types "HELLO" one character at a time using a flat chain of six states,
//! driven from stdin one line at a time.
//!
//! ```text
//! cargo run --example hello_recognizer
//! ```

use std::cell::Cell;
use std::io::{self, BufRead, Write};
use std::rc::Rc;

use hsm_runtime::StateMachineBuilder;

fn main() {
    let input: Rc<Cell<char>> = Rc::new(Cell::new('\0'));

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
        (l1, "first L"),
        (l2, "second L"),
        (o, "O"),
    ] {
        let entry_label = label.to_string();
        builder.on_entry(state, move |_| print!("Enter {entry_label}: "));
        let exit_label = label.to_string();
        builder.on_exit(state, move |_| println!("Received {exit_label}"));
    }
    builder.on_entry(done, |_| println!("Success! You spelled HELLO."));

    let guard = |input: &Rc<Cell<char>>, want: char| {
        let input = Rc::clone(input);
        move || input.get() == want
    };

    builder.add_transition(h, e, guard(&input, 'H'));
    builder.add_transition(e, l1, guard(&input, 'E'));
    builder.add_transition(l1, l2, guard(&input, 'L'));
    builder.add_transition(l2, o, guard(&input, 'L'));
    builder.add_transition(o, done, guard(&input, 'O'));

    builder.set_initial(h);

    let mut machine = builder.build();
    machine.init();

    let stdin = io::stdin();
    for line in stdin.lock().lines() {
        let Ok(line) = line else { break };
        let Some(ch) = line.chars().next() else {
            continue;
        };
        input.set(ch);
        machine.tick();

        if machine.current() == Some(done) {
            break;
        }
    }

    io::stdout().flush().ok();
}
