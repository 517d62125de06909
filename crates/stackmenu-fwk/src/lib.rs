//! # stackmenu-fwk
//!
//! A frame-stack engine for keyboard-driven, multi-widget menus on a
//! character-cell surface.
//!
//! The engine manages a push-down stack of frames (selection lists,
//! static lists, message boxes), dispatches abstract input codes to the
//! active frame's state machine, and lazily renders the active frame into
//! a flat character buffer. Frames can spawn child frames from their own
//! selection callbacks; the child's eventual outcome flows back to the
//! parent through a continuation recorded at spawn time, and selected
//! values travel up a separate return stack.
//!
//! ## Features
//!
//! - **Terminal-agnostic core**: abstract input in, character grid out —
//!   raw mode, input polling, and blitting stay with the caller
//! - **Reusable templates**: every push copies the template, so one
//!   description can produce any number of independent frames
//! - **Lazy rendering**: the buffer is rebuilt only after a visible-state
//!   change, and callers redraw only when told to
//! - **Typed return channel**: selections travel back as checked
//!   `Any` payloads, with empty-stack always distinguishable from a value
//! - **Parent/child protocol**: a frame's `on_select` can push a child
//!   whose completion completes the parent and whose cancellation resumes
//!   it
//!
//! ## Quick Start
//!
//! ```ignore
//! use stackmenu_fwk::{FrameTemplate, Gui, MenuInput, MenuItem, Transition};
//!
//! let items = vec![MenuItem::new("sword"), MenuItem::new("bow")];
//! let template = FrameTemplate::select_list(items)
//!     .names(["Sword", "Bow"])
//!     .title("Equipment")
//!     .bordered(true);
//!
//! let mut gui = Gui::new();
//! gui.push(&template);
//!
//! loop {
//!     let input: MenuInput = read_key().into(); // caller-owned translation
//!     gui.update(input);
//!     match gui.render() {
//!         Some(menu) if menu.changed => blit(&menu),
//!         Some(_) => {}
//!         None => break, // stack ran empty
//!     }
//! }
//!
//! if let Some(value) = gui.pop_return() {
//!     let picked = value.downcast::<MenuItem>().unwrap();
//! }
//! ```

pub mod buffer;
pub mod context;
pub mod frame;
pub mod gui;
pub mod input;
pub mod item;
mod render;
pub mod stack;

// Re-export main types at crate root for convenience
pub use buffer::{MenuBuffer, RenderedMenu};
pub use context::{Callbacks, FrameContext, FrameHandler, SelectHandler, SelectOutcome};
pub use frame::{FrameTemplate, NameProvider, Transition};
pub use gui::Gui;
pub use input::MenuInput;
pub use item::{MenuItem, ReturnValue};
pub use stack::Stack;
