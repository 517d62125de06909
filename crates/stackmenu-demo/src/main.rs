//! Demo driving the stackmenu engine against a real terminal.
//!
//! This example shows:
//! - A bordered selection list with named items
//! - An `on_select` handler that spawns a child message box, exercising
//!   the parent/child continuation protocol
//! - The return channel carrying the selection back to the caller
//! - Redrawing only when the render cache reports a change
//!
//! Controls:
//! - Up/Down or letter shortcuts: move/select
//! - Enter: select the highlighted item
//! - q/Esc: cancel or dismiss

mod terminal;

use std::thread;
use std::time::Duration;

use crossterm::event::{self, Event, KeyEventKind};
use stackmenu_fwk::{FrameTemplate, Gui, MenuInput, MenuItem, SelectOutcome};

use terminal::{install_panic_hook, Terminal, TerminalError};

fn equipment_menu() -> FrameTemplate {
    let items = vec![
        MenuItem::new("sword"),
        MenuItem::new("bow"),
        MenuItem::new("torch"),
    ];

    FrameTemplate::select_list(items)
        .names(["Sword", "Bow", "Torch"])
        .title("Choose your equipment")
        .bordered(true)
        .on_select(|ctx, item| {
            let picked = item.downcast_ref::<&str>().copied().unwrap_or("");
            if picked == "torch" {
                // The torch is a trap: show a child box instead of
                // accepting the selection.
                ctx.spawn(
                    FrameTemplate::message_box([
                        "The torch sputters and dies the moment",
                        "you touch it. You leave empty-handed.",
                    ])
                    .title("A poor choice")
                    .bordered(true),
                );
                return SelectOutcome::SpawnChild;
            }
            ctx.push_return(item.clone());
            SelectOutcome::Success
        })
}

fn farewell_box() -> FrameTemplate {
    FrameTemplate::message_box([
        "Thanks for trying the stackmenu demo. Every frame you",
        "just saw was rendered into a plain character grid and",
        "blitted by the caller; the engine never touched the",
        "terminal itself.",
    ])
    .title("About this demo")
    .bordered(true)
}

/// Drive the controller until its frame stack runs empty.
fn run_menu(gui: &mut Gui, term: &mut Terminal) -> Result<(), TerminalError> {
    if let Some(menu) = gui.render() {
        term.draw(&menu)?;
    }

    while gui.has_frames() {
        let input = match event::read()? {
            Event::Key(key) if key.kind == KeyEventKind::Press => MenuInput::from(&key),
            _ => MenuInput::Invalid,
        };

        gui.update(input);

        match gui.render() {
            Some(menu) if menu.changed => term.draw(&menu)?,
            Some(_) => {}
            None => break,
        }
    }

    Ok(())
}

fn main() -> Result<(), TerminalError> {
    install_panic_hook();
    let mut term = Terminal::new()?;
    let mut gui = Gui::new();

    gui.push(&equipment_menu());
    run_menu(&mut gui, &mut term)?;

    let picked = gui
        .pop_return()
        .and_then(|value| value.downcast::<MenuItem>().ok())
        .and_then(|item| item.downcast_ref::<&str>().copied());

    match picked {
        Some(name) => term.message(&format!("You picked the {name}."))?,
        None => term.message("You leave with nothing.")?,
    }
    thread::sleep(Duration::from_secs(2));

    gui.push(&farewell_box());
    run_menu(&mut gui, &mut term)?;

    Ok(())
}
