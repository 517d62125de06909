//! Frame templates, pushed frame instances, and the per-variant state
//! machine.
//!
//! Clients describe a menu as a [`FrameTemplate`]: plain data that is never
//! mutated by the engine and can be pushed any number of times. Each push
//! copies the template into a private [`Frame`] instance with resolved
//! display names and computed geometry. The three variants are a closed
//! enum, so init, update, and render dispatch by exhaustive match.

use std::any::Any;
use std::sync::Arc;

use crate::buffer::{index_letter, MenuBuffer, HIGHLIGHT_MARKER};
use crate::context::{Callbacks, Effects, FrameContext, SelectOutcome};
use crate::input::MenuInput;
use crate::item::{MenuItem, ReturnValue};

/// Cells taken by the `(a) ` marker in front of every list row.
const MARKER_WIDTH: usize = 4;

/// Result of dispatching one input to the active frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    /// The frame stays active.
    Continue,
    /// The frame completed with a result and was popped.
    Done,
    /// The frame was aborted without a result and was popped.
    Canceled,
}

/// Lazy display-name resolver, given the items and the frame's opaque
/// state.
pub type NameProvider =
    Arc<dyn Fn(&[MenuItem], Option<&(dyn Any + Send + Sync)>) -> Vec<String> + Send + Sync>;

/// Items plus display names, shared by both list variants.
#[derive(Clone)]
pub(crate) struct ListSpec {
    pub(crate) items: Vec<MenuItem>,
    pub(crate) names: Option<Vec<String>>,
    pub(crate) name_provider: Option<NameProvider>,
}

impl ListSpec {
    fn new(items: Vec<MenuItem>) -> Self {
        Self {
            items,
            names: None,
            name_provider: None,
        }
    }

    /// Resolve display names: precomputed names win, then the provider,
    /// then blanks. The resolved list always matches the item count.
    fn resolve(self, state: Option<&(dyn Any + Send + Sync)>) -> ListBody {
        let ListSpec {
            items,
            names,
            name_provider,
        } = self;

        let mut names = match names {
            Some(names) => names,
            None => match name_provider {
                Some(provider) => provider(&items, state),
                None => Vec::new(),
            },
        };
        names.resize(items.len(), String::new());

        ListBody { items, names }
    }
}

#[derive(Clone)]
pub(crate) enum FrameVariant {
    List(ListSpec),
    SelectList(ListSpec),
    MessageBox(Vec<String>),
}

/// A reusable frame description supplied by client code.
///
/// Built with the variant constructors and chained configuration methods:
///
/// ```ignore
/// let template = FrameTemplate::select_list(items)
///     .names(["Sword", "Bow", "Torch"])
///     .title("Choose your equipment")
///     .bordered(true)
///     .on_select(|ctx, item| { /* ... */ SelectOutcome::Success });
/// ```
#[derive(Clone)]
pub struct FrameTemplate {
    pub(crate) variant: FrameVariant,
    pub(crate) bordered: bool,
    pub(crate) title: Option<String>,
    pub(crate) state: Option<Arc<dyn Any + Send + Sync>>,
    pub(crate) callbacks: Callbacks,
}

impl FrameTemplate {
    fn with_variant(variant: FrameVariant) -> Self {
        Self {
            variant,
            bordered: false,
            title: None,
            state: None,
            callbacks: Callbacks::new(),
        }
    }

    /// A static list: displays items, completes on any selection or escape,
    /// produces no value.
    pub fn list(items: Vec<MenuItem>) -> Self {
        Self::with_variant(FrameVariant::List(ListSpec::new(items)))
    }

    /// An interactive selection list with a movable highlight.
    pub fn select_list(items: Vec<MenuItem>) -> Self {
        Self::with_variant(FrameVariant::SelectList(ListSpec::new(items)))
    }

    /// A static message box: displays lines, completes on escape.
    pub fn message_box<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let lines = lines.into_iter().map(Into::into).collect();
        Self::with_variant(FrameVariant::MessageBox(lines))
    }

    /// Draw a box-drawing border around the frame.
    pub fn bordered(mut self, bordered: bool) -> Self {
        self.bordered = bordered;
        self
    }

    /// Set the title row.
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Attach opaque client state, visible to every handler through
    /// [`FrameContext::state`](crate::context::FrameContext::state).
    pub fn state<T: Any + Send + Sync>(mut self, state: T) -> Self {
        self.state = Some(Arc::new(state));
        self
    }

    /// Set precomputed display names. Only meaningful for list variants;
    /// ignored on a message box.
    pub fn names<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        if let FrameVariant::List(spec) | FrameVariant::SelectList(spec) = &mut self.variant {
            spec.names = Some(names.into_iter().map(Into::into).collect());
        }
        self
    }

    /// Set a lazy display-name provider, consulted at push time when no
    /// precomputed names were given. Only meaningful for list variants.
    pub fn name_provider<F>(mut self, provider: F) -> Self
    where
        F: Fn(&[MenuItem], Option<&(dyn Any + Send + Sync)>) -> Vec<String>
            + Send
            + Sync
            + 'static,
    {
        if let FrameVariant::List(spec) | FrameVariant::SelectList(spec) = &mut self.variant {
            spec.name_provider = Some(Arc::new(provider));
        }
        self
    }

    /// Set the selection handler.
    pub fn on_select<F>(mut self, handler: F) -> Self
    where
        F: Fn(&mut FrameContext<'_>, &MenuItem) -> SelectOutcome + Send + Sync + 'static,
    {
        self.callbacks = self.callbacks.on_select(handler);
        self
    }

    /// Set the completion handler.
    pub fn on_complete<F>(mut self, handler: F) -> Self
    where
        F: Fn(&mut FrameContext<'_>) + Send + Sync + 'static,
    {
        self.callbacks = self.callbacks.on_complete(handler);
        self
    }

    /// Set the cleanup handler.
    pub fn cleanup<F>(mut self, handler: F) -> Self
    where
        F: Fn(&mut FrameContext<'_>) + Send + Sync + 'static,
    {
        self.callbacks = self.callbacks.cleanup(handler);
        self
    }
}

pub(crate) struct ListBody {
    pub(crate) items: Vec<MenuItem>,
    pub(crate) names: Vec<String>,
}

pub(crate) struct SelectListBody {
    pub(crate) list: ListBody,
    pub(crate) highlighted: Option<usize>,
}

pub(crate) struct MessageBoxBody {
    pub(crate) lines: Vec<String>,
}

pub(crate) enum FrameBody {
    List(ListBody),
    SelectList(SelectListBody),
    MessageBox(MessageBoxBody),
}

impl FrameBody {
    /// Compute the frame extent from the resolved content.
    fn measure(&self, title: Option<&str>, bordered: bool) -> (usize, usize) {
        let (x_pad, y_pad) = if bordered { (4, 2) } else { (0, 0) };
        let title_len = title.map_or(0, |t| t.chars().count());

        let (content_width, rows) = match self {
            FrameBody::List(list) => (longest(&list.names) + MARKER_WIDTH, list.names.len()),
            FrameBody::SelectList(body) => {
                (longest(&body.list.names) + MARKER_WIDTH, body.list.names.len())
            }
            FrameBody::MessageBox(body) => (longest(&body.lines), body.lines.len()),
        };

        let width = content_width.max(title_len) + x_pad;
        let height = rows + usize::from(title.is_some()) + y_pad;
        (width, height)
    }
}

fn longest(lines: &[String]) -> usize {
    lines.iter().map(|line| line.chars().count()).max().unwrap_or(0)
}

/// Outcome of a popped child, recorded on its parent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ChildOutcome {
    Done,
    Canceled,
}

/// Continuation slot for the parent/child handoff.
///
/// Armed when the frame's `on_select` spawns a child, resolved by the
/// controller when that child pops, consumed by the frame's next update.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ChildWait {
    Idle,
    Waiting,
    Returned(ChildOutcome),
}

/// What the state machine decided before any callback runs.
enum Action {
    Transition(Transition),
    SelectItem(MenuItem),
}

/// A pushed frame instance, privately owned by the controller.
pub(crate) struct Frame {
    pub(crate) bordered: bool,
    pub(crate) title: Option<String>,
    pub(crate) state: Option<Arc<dyn Any + Send + Sync>>,
    pub(crate) callbacks: Callbacks,
    pub(crate) width: usize,
    pub(crate) height: usize,
    pub(crate) body: FrameBody,
    pub(crate) child_wait: ChildWait,
}

impl Frame {
    /// Copy and initialize a template: resolve names, compute geometry.
    pub(crate) fn init(template: &FrameTemplate) -> Self {
        let FrameTemplate {
            variant,
            bordered,
            title,
            state,
            callbacks,
        } = template.clone();

        let body = match variant {
            FrameVariant::List(spec) => FrameBody::List(spec.resolve(state.as_deref())),
            FrameVariant::SelectList(spec) => FrameBody::SelectList(SelectListBody {
                list: spec.resolve(state.as_deref()),
                highlighted: None,
            }),
            FrameVariant::MessageBox(lines) => FrameBody::MessageBox(MessageBoxBody { lines }),
        };
        let (width, height) = body.measure(title.as_deref(), bordered);

        Self {
            bordered,
            title,
            state,
            callbacks,
            width,
            height,
            body,
            child_wait: ChildWait::Idle,
        }
    }

    /// Dispatch one input to the variant state machine.
    pub(crate) fn update(&mut self, input: MenuInput, effects: &mut Effects) -> Transition {
        // A resolved continuation preempts normal input handling: the
        // input that arrives here is consumed either way.
        if let ChildWait::Returned(outcome) = self.child_wait {
            self.child_wait = ChildWait::Idle;
            return match outcome {
                ChildOutcome::Done => Transition::Done,
                ChildOutcome::Canceled => Transition::Continue,
            };
        }

        let action = match &mut self.body {
            FrameBody::List(list) => {
                let n = list.items.len();
                match input {
                    MenuInput::Select | MenuInput::Escape => Action::Transition(Transition::Done),
                    MenuInput::Index(i) if i < n => Action::Transition(Transition::Done),
                    _ => Action::Transition(Transition::Continue),
                }
            }
            FrameBody::MessageBox(_) => match input {
                MenuInput::Escape => Action::Transition(Transition::Done),
                _ => Action::Transition(Transition::Continue),
            },
            FrameBody::SelectList(body) => {
                let n = body.list.items.len();
                match input {
                    MenuInput::Up if n > 0 => {
                        let next = body.highlighted.map_or(0, |i| i.saturating_sub(1));
                        if body.highlighted != Some(next) {
                            body.highlighted = Some(next);
                            effects.dirty = true;
                        }
                        Action::Transition(Transition::Continue)
                    }
                    MenuInput::Down if n > 0 => {
                        let next = body.highlighted.map_or(0, |i| (i + 1).min(n - 1));
                        if body.highlighted != Some(next) {
                            body.highlighted = Some(next);
                            effects.dirty = true;
                        }
                        Action::Transition(Transition::Continue)
                    }
                    MenuInput::Index(i) if i < n => Action::SelectItem(body.list.items[i].clone()),
                    MenuInput::Select => match body.highlighted {
                        Some(i) => Action::SelectItem(body.list.items[i].clone()),
                        None => Action::Transition(Transition::Continue),
                    },
                    MenuInput::Escape => Action::Transition(Transition::Canceled),
                    _ => Action::Transition(Transition::Continue),
                }
            }
        };

        match action {
            Action::Transition(transition) => transition,
            Action::SelectItem(item) => self.handle_selection(item, effects),
        }
    }

    /// Run the selection protocol for one item.
    fn handle_selection(&mut self, item: MenuItem, effects: &mut Effects) -> Transition {
        let outcome = match self.callbacks.on_select.clone() {
            Some(handler) => {
                let mut ctx =
                    FrameContext::new(self.title.as_deref(), self.state.as_deref(), effects);
                handler(&mut ctx, &item)
            }
            None => {
                // Default: hand the selected item up the return channel.
                effects.returns.push(ReturnValue::new(item));
                SelectOutcome::Success
            }
        };

        match outcome {
            SelectOutcome::Success => Transition::Done,
            SelectOutcome::Failure => Transition::Continue,
            SelectOutcome::SpawnChild => {
                self.child_wait = ChildWait::Waiting;
                Transition::Continue
            }
        }
    }

    pub(crate) fn fire_on_complete(&mut self, effects: &mut Effects) {
        if let Some(handler) = self.callbacks.on_complete.clone() {
            let mut ctx = FrameContext::new(self.title.as_deref(), self.state.as_deref(), effects);
            handler(&mut ctx);
        }
    }

    pub(crate) fn fire_cleanup(&mut self, effects: &mut Effects) {
        if let Some(handler) = self.callbacks.cleanup.clone() {
            let mut ctx = FrameContext::new(self.title.as_deref(), self.state.as_deref(), effects);
            handler(&mut ctx);
        }
    }

    #[inline]
    pub(crate) fn is_waiting_on_child(&self) -> bool {
        self.child_wait == ChildWait::Waiting
    }

    pub(crate) fn notify_child_returned(&mut self, outcome: ChildOutcome) {
        if self.child_wait == ChildWait::Waiting {
            self.child_wait = ChildWait::Returned(outcome);
        }
    }

    /// Rebuild the frame's character buffer: border, title row, body rows.
    pub(crate) fn render(&self) -> MenuBuffer {
        let mut buf = MenuBuffer::new(self.width, self.height);
        let (x, mut y) = if self.bordered { (2, 1) } else { (0, 0) };

        if self.bordered {
            buf.draw_border();
        }
        if let Some(title) = &self.title {
            buf.write_str(x, y, title);
            y += 1;
        }

        match &self.body {
            FrameBody::List(list) => render_rows(&mut buf, x, y, &list.names, None),
            FrameBody::SelectList(body) => {
                render_rows(&mut buf, x, y, &body.list.names, body.highlighted)
            }
            FrameBody::MessageBox(body) => {
                for (i, line) in body.lines.iter().enumerate() {
                    buf.write_str(x, y + i, line);
                }
            }
        }

        buf
    }
}

/// Write `(marker) name` rows; the highlighted row gets the highlight
/// marker instead of its letter.
fn render_rows(
    buf: &mut MenuBuffer,
    x: usize,
    y: usize,
    names: &[String],
    highlighted: Option<usize>,
) {
    for (i, name) in names.iter().enumerate() {
        let marker = if highlighted == Some(i) {
            HIGHLIGHT_MARKER
        } else {
            index_letter(i)
        };
        buf.write_str(x, y + i, &format!("({marker}) {name}"));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn items(names: &[&str]) -> Vec<MenuItem> {
        names.iter().map(|n| MenuItem::new(n.to_string())).collect()
    }

    fn row_string(buf: &MenuBuffer, y: usize) -> String {
        buf.row(y).iter().collect()
    }

    fn highlighted(frame: &Frame) -> Option<usize> {
        match &frame.body {
            FrameBody::SelectList(body) => body.highlighted,
            _ => panic!("not a selection list"),
        }
    }

    #[test]
    fn test_unbordered_message_box_geometry() {
        let template = FrameTemplate::message_box(["one", "three", "xy"]);
        let frame = Frame::init(&template);

        assert_eq!(frame.height, 3);
        assert_eq!(frame.width, 5);

        let buf = frame.render();
        assert_eq!(row_string(&buf, 0), "one  ");
        assert_eq!(row_string(&buf, 1), "three");
        assert_eq!(row_string(&buf, 2), "xy   ");
    }

    #[test]
    fn test_bordered_list_geometry() {
        let template = FrameTemplate::select_list(items(&["One", "Two"]))
            .names(["One", "Two"])
            .title("Title")
            .bordered(true);
        let frame = Frame::init(&template);

        // longest name 3 + 4-cell marker = 7, title 5, plus 4 border cells.
        assert_eq!(frame.width, 11);
        // 2 rows + title + 2 border rows.
        assert_eq!(frame.height, 5);

        let buf = frame.render();
        assert_eq!(row_string(&buf, 0), "┌─────────┐");
        assert_eq!(row_string(&buf, 1), "│ Title   │");
        assert_eq!(row_string(&buf, 2), "│ (a) One │");
        assert_eq!(row_string(&buf, 3), "│ (b) Two │");
        assert_eq!(row_string(&buf, 4), "└─────────┘");
    }

    #[test]
    fn test_highlight_marker_replaces_letter() {
        let template = FrameTemplate::select_list(items(&["a", "b"])).names(["a", "b"]);
        let mut frame = Frame::init(&template);
        let mut effects = Effects::default();

        frame.update(MenuInput::Down, &mut effects);
        let buf = frame.render();
        assert_eq!(row_string(&buf, 0), "(>) a");
        assert_eq!(row_string(&buf, 1), "(b) b");
    }

    #[test]
    fn test_highlight_clamps_at_both_ends() {
        let template = FrameTemplate::select_list(items(&["a", "b", "c"]));
        let mut frame = Frame::init(&template);
        let mut effects = Effects::default();

        assert_eq!(highlighted(&frame), None);
        for _ in 0..10 {
            frame.update(MenuInput::Down, &mut effects);
        }
        assert_eq!(highlighted(&frame), Some(2));

        for _ in 0..10 {
            frame.update(MenuInput::Up, &mut effects);
        }
        assert_eq!(highlighted(&frame), Some(0));
    }

    #[test]
    fn test_first_movement_lands_on_first_item() {
        let template = FrameTemplate::select_list(items(&["a", "b"]));

        let mut frame = Frame::init(&template);
        let mut effects = Effects::default();
        frame.update(MenuInput::Down, &mut effects);
        assert_eq!(highlighted(&frame), Some(0));

        let mut frame = Frame::init(&template);
        frame.update(MenuInput::Up, &mut effects);
        assert_eq!(highlighted(&frame), Some(0));
    }

    #[test]
    fn test_movement_marks_dirty_only_on_change() {
        let template = FrameTemplate::select_list(items(&["a", "b"]));
        let mut frame = Frame::init(&template);

        let mut effects = Effects::default();
        frame.update(MenuInput::Down, &mut effects);
        assert!(effects.dirty);

        let mut effects = Effects::default();
        frame.update(MenuInput::Up, &mut effects);
        assert!(!effects.dirty);
    }

    #[test]
    fn test_select_without_highlight_is_noop() {
        let template = FrameTemplate::select_list(items(&["a"]));
        let mut frame = Frame::init(&template);
        let mut effects = Effects::default();

        assert_eq!(frame.update(MenuInput::Select, &mut effects), Transition::Continue);
        assert!(effects.returns.is_empty());
    }

    #[test]
    fn test_out_of_range_index_is_noop() {
        let template = FrameTemplate::select_list(items(&["a", "b"]));
        let mut frame = Frame::init(&template);
        let mut effects = Effects::default();

        assert_eq!(frame.update(MenuInput::Index(5), &mut effects), Transition::Continue);
        assert!(effects.returns.is_empty());
    }

    #[test]
    fn test_default_on_select_returns_item() {
        let template = FrameTemplate::select_list(items(&["a", "b"]));
        let mut frame = Frame::init(&template);
        let mut effects = Effects::default();

        assert_eq!(frame.update(MenuInput::Index(1), &mut effects), Transition::Done);
        let value = effects.returns.pop().unwrap();
        let item = value.downcast::<MenuItem>().unwrap();
        assert_eq!(item.downcast_ref::<String>().unwrap(), "b");
    }

    #[test]
    fn test_failure_keeps_frame_active() {
        let template = FrameTemplate::select_list(items(&["a"]))
            .on_select(|_, _| SelectOutcome::Failure);
        let mut frame = Frame::init(&template);
        let mut effects = Effects::default();

        assert_eq!(frame.update(MenuInput::Index(0), &mut effects), Transition::Continue);
        assert_eq!(frame.child_wait, ChildWait::Idle);
    }

    #[test]
    fn test_escape_cancels_selection_list() {
        let template = FrameTemplate::select_list(items(&["a"]));
        let mut frame = Frame::init(&template);
        let mut effects = Effects::default();

        assert_eq!(frame.update(MenuInput::Escape, &mut effects), Transition::Canceled);
    }

    #[test]
    fn test_static_list_completes_without_value() {
        let template = FrameTemplate::list(items(&["a", "b"]));
        let mut effects = Effects::default();

        for input in [MenuInput::Select, MenuInput::Escape, MenuInput::Index(1)] {
            let mut frame = Frame::init(&template);
            assert_eq!(frame.update(input, &mut effects), Transition::Done);
        }
        assert!(effects.returns.is_empty());

        let mut frame = Frame::init(&template);
        assert_eq!(frame.update(MenuInput::Down, &mut effects), Transition::Continue);
    }

    #[test]
    fn test_message_box_only_escape_completes() {
        let template = FrameTemplate::message_box(["line"]);
        let mut frame = Frame::init(&template);
        let mut effects = Effects::default();

        for input in [
            MenuInput::Select,
            MenuInput::Up,
            MenuInput::Down,
            MenuInput::PageUp,
            MenuInput::PageDown,
            MenuInput::Index(0),
        ] {
            assert_eq!(frame.update(input, &mut effects), Transition::Continue);
        }
        assert_eq!(frame.update(MenuInput::Escape, &mut effects), Transition::Done);
    }

    #[test]
    fn test_name_provider_resolves_lazily() {
        let template = FrameTemplate::select_list(items(&["a", "b"]))
            .name_provider(|items, _| (1..=items.len()).map(|i| format!("Item {i}")).collect());
        let frame = Frame::init(&template);

        match &frame.body {
            FrameBody::SelectList(body) => {
                assert_eq!(body.list.names, vec!["Item 1", "Item 2"]);
            }
            _ => unreachable!(),
        }
    }

    #[test]
    fn test_missing_names_default_to_blanks() {
        let template = FrameTemplate::select_list(items(&["a", "b"]));
        let frame = Frame::init(&template);

        match &frame.body {
            FrameBody::SelectList(body) => {
                assert_eq!(body.list.names, vec!["", ""]);
            }
            _ => unreachable!(),
        }
    }
}
