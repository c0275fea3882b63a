//! An interactive device menu driven by a genuinely nested chart: three
//! top-level composite submenus (About, Settings, Diagnostics), each with
//! two leaf screens.
//!
//! ```text
//! cargo run --example device_menu
//! ```
//!
//! Commands (one character per line, Enter to submit):
//!   a - go to About         s - go to Settings       d - go to Diagnostics
//!   1 - select first screen 2 - select second screen
//!   b - go back to the submenu        q - quit to the main menu

use std::cell::Cell;
use std::io::{self, BufRead};
use std::rc::Rc;

use hsm_runtime::StateMachineBuilder;

fn main() {
    let input: Rc<Cell<char>> = Rc::new(Cell::new('\0'));
    let key = |input: &Rc<Cell<char>>, want: char| {
        let input = Rc::clone(input);
        move || input.get() == want
    };

    let mut builder = StateMachineBuilder::new();

    let main_menu = builder.add_state(None);
    let about_menu = builder.add_state(None);
    let settings_menu = builder.add_state(None);
    let diagnostics_menu = builder.add_state(None);

    let home_screen = builder.add_state(Some(about_menu));
    let info_screen = builder.add_state(Some(about_menu));
    let brightness_screen = builder.add_state(Some(settings_menu));
    let volume_screen = builder.add_state(Some(settings_menu));
    let selftest_screen = builder.add_state(Some(diagnostics_menu));
    let logview_screen = builder.add_state(Some(diagnostics_menu));

    builder.set_composite(about_menu, home_screen);
    builder.set_composite(settings_menu, brightness_screen);
    builder.set_composite(diagnostics_menu, selftest_screen);

    for (state, name) in [
        (main_menu, "Main Menu"),
        (about_menu, "About"),
        (settings_menu, "Settings"),
        (diagnostics_menu, "Diagnostics"),
        (home_screen, "Home"),
        (info_screen, "Info"),
        (brightness_screen, "Brightness"),
        (volume_screen, "Volume"),
        (selftest_screen, "Self Test"),
        (logview_screen, "Log View"),
    ] {
        let entered = name.to_string();
        builder.on_entry(state, move |_| println!("Entered {entered}"));
        let exited = name.to_string();
        builder.on_exit(state, move |_| println!("Exited {exited}"));
    }

    builder.add_transition(main_menu, about_menu, key(&input, 'a'));
    builder.add_transition(main_menu, settings_menu, key(&input, 's'));
    builder.add_transition(main_menu, diagnostics_menu, key(&input, 'd'));

    for (first, second, submenu) in [
        (home_screen, info_screen, about_menu),
        (brightness_screen, volume_screen, settings_menu),
        (selftest_screen, logview_screen, diagnostics_menu),
    ] {
        builder.add_transition(first, second, key(&input, '2'));
        builder.add_transition(second, first, key(&input, '1'));
        for screen in [first, second] {
            builder.add_transition(screen, submenu, key(&input, 'b'));
            builder.add_transition(screen, main_menu, key(&input, 'q'));
        }
    }

    builder.set_initial(main_menu);

    let mut machine = builder.build();
    machine.init();

    println!("a/s/d to open a submenu, 1/2 to pick a screen, b back, q quit to Main Menu");

    let stdin = io::stdin();
    for line in stdin.lock().lines() {
        let Ok(line) = line else { break };
        let Some(ch) = line.chars().next() else {
            continue;
        };
        input.set(ch);
        machine.tick();
    }
}
