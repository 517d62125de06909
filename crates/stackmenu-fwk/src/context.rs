//! Frame callbacks and the context they run against.
//!
//! Handlers cannot touch the controller directly: the frame they belong to
//! is borrowed out of the controller's own stack while they run. Instead
//! every handler receives a [`FrameContext`] that exposes the frame's
//! opaque state and queues effects (return values, child frames) for the
//! controller to apply once the frame's update returns.

use std::any::Any;
use std::fmt;
use std::sync::Arc;

use crate::frame::FrameTemplate;
use crate::item::{MenuItem, ReturnValue};

/// Outcome reported by an `on_select` handler.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectOutcome {
    /// The selection was accepted; the frame completes.
    Success,
    /// The selection was rejected; the frame stays active for a retry.
    Failure,
    /// The handler pushed a child frame via [`FrameContext::spawn`]; the
    /// frame stays active and completes or resumes when the child returns.
    SpawnChild,
}

/// Handler invoked when an item is selected.
pub type SelectHandler =
    Arc<dyn Fn(&mut FrameContext<'_>, &MenuItem) -> SelectOutcome + Send + Sync>;

/// Handler invoked on completion or during cleanup.
pub type FrameHandler = Arc<dyn Fn(&mut FrameContext<'_>) + Send + Sync>;

/// The optional callback set attached to a frame.
///
/// Every slot has a defined default: `on_select` pushes the selected item
/// onto the return stack and succeeds, `on_complete` and `cleanup` do
/// nothing.
#[derive(Clone, Default)]
pub struct Callbacks {
    pub(crate) on_select: Option<SelectHandler>,
    pub(crate) on_complete: Option<FrameHandler>,
    pub(crate) cleanup: Option<FrameHandler>,
}

impl Callbacks {
    /// Create an empty callback set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the selection handler.
    pub fn on_select<F>(mut self, handler: F) -> Self
    where
        F: Fn(&mut FrameContext<'_>, &MenuItem) -> SelectOutcome + Send + Sync + 'static,
    {
        self.on_select = Some(Arc::new(handler));
        self
    }

    /// Set the completion handler.
    pub fn on_complete<F>(mut self, handler: F) -> Self
    where
        F: Fn(&mut FrameContext<'_>) + Send + Sync + 'static,
    {
        self.on_complete = Some(Arc::new(handler));
        self
    }

    /// Set the cleanup handler, fired when the frame is popped for any
    /// reason, including controller teardown.
    pub fn cleanup<F>(mut self, handler: F) -> Self
    where
        F: Fn(&mut FrameContext<'_>) + Send + Sync + 'static,
    {
        self.cleanup = Some(Arc::new(handler));
        self
    }
}

impl fmt::Debug for Callbacks {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Callbacks")
            .field("on_select", &self.on_select.is_some())
            .field("on_complete", &self.on_complete.is_some())
            .field("cleanup", &self.cleanup.is_some())
            .finish()
    }
}

/// Effects queued by handlers, applied by the controller after dispatch.
#[derive(Default)]
pub(crate) struct Effects {
    pub(crate) returns: Vec<ReturnValue>,
    pub(crate) spawns: Vec<FrameTemplate>,
    pub(crate) dirty: bool,
}

/// Context passed to frame callbacks.
pub struct FrameContext<'a> {
    title: Option<&'a str>,
    state: Option<&'a (dyn Any + Send + Sync)>,
    effects: &'a mut Effects,
}

impl<'a> FrameContext<'a> {
    pub(crate) fn new(
        title: Option<&'a str>,
        state: Option<&'a (dyn Any + Send + Sync)>,
        effects: &'a mut Effects,
    ) -> Self {
        Self {
            title,
            state,
            effects,
        }
    }

    /// The frame's title, if it has one.
    #[inline]
    pub fn title(&self) -> Option<&str> {
        self.title
    }

    /// The frame's opaque client state, if it has any.
    #[inline]
    pub fn state(&self) -> Option<&(dyn Any + Send + Sync)> {
        self.state
    }

    /// The frame's client state downcast to a specific type.
    pub fn state_as<T: Any>(&self) -> Option<&T> {
        self.state.and_then(|state| state.downcast_ref())
    }

    /// Queue a value for the return stack.
    ///
    /// Ownership transfers to the controller once the current dispatch
    /// finishes; the value becomes visible to `pop_return` immediately
    /// after.
    pub fn push_return<T: Any + Send>(&mut self, value: T) {
        self.effects.returns.push(ReturnValue::new(value));
    }

    /// Queue a child frame to be pushed above the current one.
    ///
    /// An `on_select` handler that returns [`SelectOutcome::SpawnChild`]
    /// must call this; the controller treats the combination of a spawn
    /// report with no spawned frame as a broken protocol and panics.
    pub fn spawn(&mut self, template: FrameTemplate) {
        self.effects.spawns.push(template);
    }
}
