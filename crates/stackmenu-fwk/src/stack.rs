//! Push-down stack primitive.
//!
//! This module provides the LIFO container used for both the frame stack
//! and the return-value stack.

use smallvec::SmallVec;

/// An ownership-transferring push-down stack.
///
/// `push` takes ownership of the value and makes it the new top; `pop`
/// removes the top and hands ownership back to the caller. Menus nest
/// shallowly in practice, so the storage keeps a few entries inline.
///
/// Dropping a `Stack` is the shallow teardown mode: nodes and payloads are
/// released, but no per-element cleanup hooks run. The deep mode (firing
/// each frame's cleanup callback) lives in [`Gui`](crate::gui::Gui), which
/// is the only place a handler context can be built.
pub struct Stack<T> {
    entries: SmallVec<[T; 4]>,
}

impl<T> Stack<T> {
    /// Create a new empty stack.
    pub fn new() -> Self {
        Self {
            entries: SmallVec::new(),
        }
    }

    /// Push a value, making it the new top.
    pub fn push(&mut self, value: T) {
        self.entries.push(value);
    }

    /// Remove and return the top value, or `None` if the stack is empty.
    pub fn pop(&mut self) -> Option<T> {
        self.entries.pop()
    }

    /// Get a reference to the top value.
    #[inline]
    pub fn top(&self) -> Option<&T> {
        self.entries.last()
    }

    /// Get a mutable reference to the top value.
    #[inline]
    pub fn top_mut(&mut self) -> Option<&mut T> {
        self.entries.last_mut()
    }

    /// Number of values on the stack.
    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if the stack holds no values.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate over the stack from bottom to top.
    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.entries.iter()
    }
}

impl<T> Default for Stack<T> {
    fn default() -> Self {
        Self::new()
    }
}
