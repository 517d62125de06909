//! The GUI controller: frame stack, return stack, and render cache.

use std::any::Any;

use crate::buffer::RenderedMenu;
use crate::context::Effects;
use crate::frame::{ChildOutcome, Frame, FrameTemplate, Transition};
use crate::input::MenuInput;
use crate::item::ReturnValue;
use crate::render::RenderCache;
use crate::stack::Stack;

/// The menu engine: owns every pushed frame, the return channel, and the
/// cached render buffer.
///
/// One sequential caller-owned loop drives the controller: translate an
/// input, feed it to [`update`](Gui::update), redraw from
/// [`render`](Gui::render) when the snapshot reports a change. Only the
/// top frame receives input.
pub struct Gui {
    frames: Stack<Frame>,
    returns: Stack<ReturnValue>,
    cache: RenderCache,
}

impl Gui {
    /// Create a controller with empty stacks and an empty cache.
    pub fn new() -> Self {
        Self {
            frames: Stack::new(),
            returns: Stack::new(),
            cache: RenderCache::new(),
        }
    }

    /// Push a frame built from the template.
    ///
    /// The template is copied: it is never mutated and can be pushed again
    /// to produce an independent instance.
    pub fn push(&mut self, template: &FrameTemplate) {
        self.frames.push(Frame::init(template));
        self.cache.mark_dirty();
    }

    /// Dispatch one input to the active frame.
    ///
    /// `Invalid` input and an empty frame stack are no-ops. When the
    /// active frame reports `Done`, its `on_complete` and `cleanup`
    /// handlers fire (in that order) and it is popped; `Canceled` fires
    /// `cleanup` only. A parent waiting on the popped frame has the
    /// outcome recorded for its next update.
    ///
    /// # Panics
    ///
    /// Panics if an `on_select` handler reports
    /// [`SelectOutcome::SpawnChild`](crate::context::SelectOutcome) without
    /// spawning a frame; that is a broken handler protocol, not a runtime
    /// condition.
    pub fn update(&mut self, input: MenuInput) -> Transition {
        if input.is_invalid() {
            return Transition::Continue;
        }
        let Some(frame) = self.frames.top_mut() else {
            return Transition::Continue;
        };

        let mut effects = Effects::default();
        let transition = frame.update(input, &mut effects);
        let armed = frame.is_waiting_on_child();

        if effects.dirty {
            self.cache.mark_dirty();
        }

        match transition {
            Transition::Continue => {}
            Transition::Done | Transition::Canceled => {
                let mut finished = self.frames.pop().expect("active frame was just updated");
                if transition == Transition::Done {
                    finished.fire_on_complete(&mut effects);
                }
                finished.fire_cleanup(&mut effects);
                self.cache.mark_dirty();

                let outcome = if transition == Transition::Done {
                    ChildOutcome::Done
                } else {
                    ChildOutcome::Canceled
                };
                if let Some(parent) = self.frames.top_mut() {
                    parent.notify_child_returned(outcome);
                }
            }
        }

        if armed && effects.spawns.is_empty() {
            panic!("on_select reported SpawnChild but no child frame was spawned");
        }

        for value in effects.returns.drain(..) {
            self.returns.push(value);
        }
        for template in effects.spawns.drain(..) {
            self.push(&template);
        }

        transition
    }

    /// Get the active frame's buffer, rebuilding it only if invalidated.
    ///
    /// Returns `None` while no frame is on the stack.
    pub fn render(&mut self) -> Option<RenderedMenu<'_>> {
        let frame = self.frames.top()?;
        Some(self.cache.snapshot(frame))
    }

    /// Push a value onto the return stack.
    pub fn push_return<T: Any + Send>(&mut self, value: T) {
        self.returns.push(ReturnValue::new(value));
    }

    /// Pop the most recent return value, or `None` if the stack is empty.
    pub fn pop_return(&mut self) -> Option<ReturnValue> {
        self.returns.pop()
    }

    /// Number of frames on the stack.
    #[inline]
    pub fn depth(&self) -> usize {
        self.frames.len()
    }

    /// Check if any frame is on the stack.
    #[inline]
    pub fn has_frames(&self) -> bool {
        !self.frames.is_empty()
    }
}

impl Default for Gui {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for Gui {
    /// Deep-clean teardown: every remaining frame's cleanup handler fires,
    /// top down. Effects queued during teardown are discarded; the return
    /// stack drops shallowly.
    fn drop(&mut self) {
        let mut effects = Effects::default();
        while let Some(mut frame) = self.frames.pop() {
            frame.fire_cleanup(&mut effects);
            effects.spawns.clear();
            effects.returns.clear();
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use super::*;
    use crate::context::SelectOutcome;
    use crate::frame::FrameBody;
    use crate::item::MenuItem;

    fn items(names: &[&str]) -> Vec<MenuItem> {
        names.iter().map(|n| MenuItem::new(n.to_string())).collect()
    }

    fn highlighted(frame: &Frame) -> Option<usize> {
        match &frame.body {
            FrameBody::SelectList(body) => body.highlighted,
            _ => panic!("not a selection list"),
        }
    }

    #[test]
    fn test_return_stack_lifo() {
        let mut gui = Gui::new();
        gui.push_return("a");
        gui.push_return("b");

        assert_eq!(gui.pop_return().unwrap().downcast::<&str>().ok(), Some("b"));
        assert_eq!(gui.pop_return().unwrap().downcast::<&str>().ok(), Some("a"));
        assert!(gui.pop_return().is_none());
    }

    #[test]
    fn test_pushed_frames_are_independent_copies() {
        let template = FrameTemplate::select_list(items(&["a", "b", "c"]));
        let mut gui = Gui::new();
        gui.push(&template);
        gui.push(&template);

        // Only the top frame receives input.
        gui.update(MenuInput::Down);
        gui.update(MenuInput::Down);

        let frames: Vec<_> = gui.frames.iter().collect();
        assert_eq!(highlighted(frames[1]), Some(1));
        assert_eq!(highlighted(frames[0]), None);

        // The template still produces fresh, unhighlighted instances.
        gui.push(&template);
        assert_eq!(highlighted(gui.frames.top().unwrap()), None);
    }

    #[test]
    fn test_render_cache_changed_semantics() {
        let template = FrameTemplate::select_list(items(&["a"])).names(["a"]);
        let mut gui = Gui::new();
        gui.push(&template);

        let first = gui.render().unwrap();
        assert!(first.changed);
        let first_cells: Vec<char> = first.cells.to_vec();

        let second = gui.render().unwrap();
        assert!(!second.changed);
        assert_eq!(second.cells, first_cells.as_slice());

        gui.update(MenuInput::Down);
        assert!(gui.render().unwrap().changed);
    }

    #[test]
    fn test_render_empty_controller() {
        let mut gui = Gui::new();
        assert!(gui.render().is_none());
        assert_eq!(gui.update(MenuInput::Select), Transition::Continue);
    }

    #[test]
    fn test_clamped_movement_keeps_cache_valid() {
        let template = FrameTemplate::select_list(items(&["a", "b"]));
        let mut gui = Gui::new();
        gui.push(&template);
        gui.update(MenuInput::Down);
        gui.render().unwrap();

        // Highlight already at 0; Up cannot move it.
        gui.update(MenuInput::Up);
        assert!(!gui.render().unwrap().changed);
    }

    #[test]
    fn test_default_on_select_yields_selection() {
        let template = FrameTemplate::select_list(items(&["a", "b", "c"])).bordered(true);
        let mut gui = Gui::new();
        gui.push(&template);

        assert_eq!(gui.update(MenuInput::Down), Transition::Continue);
        assert_eq!(gui.update(MenuInput::Select), Transition::Done);
        assert!(!gui.has_frames());

        let item = gui.pop_return().unwrap().downcast::<MenuItem>().unwrap();
        assert_eq!(item.downcast_ref::<String>().unwrap(), "a");
    }

    #[test]
    fn test_child_done_completes_parent_on_next_update() {
        let child = FrameTemplate::message_box(["pick confirmed"]);
        let parent = FrameTemplate::select_list(items(&["a"])).on_select(move |ctx, _| {
            ctx.spawn(child.clone());
            SelectOutcome::SpawnChild
        });

        let mut gui = Gui::new();
        gui.push(&parent);
        gui.update(MenuInput::Down);

        // Selection spawns the child; the parent stays on the stack below it.
        assert_eq!(gui.update(MenuInput::Select), Transition::Continue);
        assert_eq!(gui.depth(), 2);

        // The message box completes on escape.
        assert_eq!(gui.update(MenuInput::Escape), Transition::Done);
        assert_eq!(gui.depth(), 1);

        // The parent's very next update reports done, whatever the input.
        assert_eq!(gui.update(MenuInput::PageUp), Transition::Done);
        assert_eq!(gui.depth(), 0);
    }

    #[test]
    fn test_child_cancel_resumes_parent() {
        let child = FrameTemplate::select_list(items(&["x"]));
        let parent = FrameTemplate::select_list(items(&["a", "b"])).on_select(move |ctx, _| {
            ctx.spawn(child.clone());
            SelectOutcome::SpawnChild
        });

        let mut gui = Gui::new();
        gui.push(&parent);
        gui.update(MenuInput::Down);
        gui.update(MenuInput::Select);
        assert_eq!(gui.depth(), 2);

        // Child cancels; the parent consumes one update, then interacts
        // normally again.
        assert_eq!(gui.update(MenuInput::Escape), Transition::Canceled);
        assert_eq!(gui.update(MenuInput::Down), Transition::Continue);
        assert_eq!(highlighted(gui.frames.top().unwrap()), Some(0));

        gui.update(MenuInput::Down);
        assert_eq!(highlighted(gui.frames.top().unwrap()), Some(1));
    }

    #[test]
    fn test_parent_on_complete_fires_after_child_done() {
        let log = Arc::new(Mutex::new(Vec::new()));

        let child = FrameTemplate::message_box(["ok"]);
        let parent_log = log.clone();
        let parent = FrameTemplate::select_list(items(&["a"]))
            .on_select(move |ctx, _| {
                ctx.spawn(child.clone());
                SelectOutcome::SpawnChild
            })
            .on_complete({
                let log = parent_log.clone();
                move |_| log.lock().unwrap().push("complete")
            })
            .cleanup({
                let log = parent_log;
                move |_| log.lock().unwrap().push("cleanup")
            });

        let mut gui = Gui::new();
        gui.push(&parent);
        gui.update(MenuInput::Index(0));
        gui.update(MenuInput::Escape);
        assert!(log.lock().unwrap().is_empty());

        gui.update(MenuInput::Select);
        assert_eq!(*log.lock().unwrap(), vec!["complete", "cleanup"]);
    }

    #[test]
    fn test_escape_fires_cleanup_but_not_on_complete() {
        let log = Arc::new(Mutex::new(Vec::new()));
        let template = FrameTemplate::select_list(items(&["a"]))
            .on_complete({
                let log = log.clone();
                move |_| log.lock().unwrap().push("complete")
            })
            .cleanup({
                let log = log.clone();
                move |_| log.lock().unwrap().push("cleanup")
            });

        let mut gui = Gui::new();
        gui.push(&template);
        assert_eq!(gui.update(MenuInput::Escape), Transition::Canceled);
        assert_eq!(*log.lock().unwrap(), vec!["cleanup"]);
    }

    #[test]
    fn test_invalid_input_is_dropped_without_dispatch() {
        let template = FrameTemplate::select_list(items(&["a"]));
        let mut gui = Gui::new();
        gui.push(&template);
        gui.render().unwrap();

        assert_eq!(gui.update(MenuInput::Invalid), Transition::Continue);
        assert!(!gui.render().unwrap().changed);
    }

    #[test]
    #[should_panic(expected = "no child frame was spawned")]
    fn test_spawn_report_without_spawn_panics() {
        let template =
            FrameTemplate::select_list(items(&["a"])).on_select(|_, _| SelectOutcome::SpawnChild);
        let mut gui = Gui::new();
        gui.push(&template);
        gui.update(MenuInput::Index(0));
    }

    #[test]
    fn test_custom_on_select_pushes_return() {
        let template = FrameTemplate::select_list(items(&["a"]))
            .state(42u32)
            .on_select(|ctx, _| {
                let bonus = *ctx.state_as::<u32>().unwrap();
                ctx.push_return(bonus);
                SelectOutcome::Success
            });

        let mut gui = Gui::new();
        gui.push(&template);
        assert_eq!(gui.update(MenuInput::Index(0)), Transition::Done);
        assert_eq!(gui.pop_return().unwrap().downcast::<u32>().ok(), Some(42));
    }

    #[test]
    fn test_teardown_cleans_remaining_frames() {
        let log = Arc::new(Mutex::new(Vec::new()));

        let make = |tag: &'static str| {
            let log = log.clone();
            FrameTemplate::select_list(vec![MenuItem::new(tag)])
                .cleanup(move |_| log.lock().unwrap().push(tag))
        };

        let mut gui = Gui::new();
        gui.push(&make("bottom"));
        gui.push(&make("top"));
        drop(gui);

        // Top down, like popping.
        assert_eq!(*log.lock().unwrap(), vec!["top", "bottom"]);
    }
}
