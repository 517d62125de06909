//! Lazy render cache for the active frame.

use crate::buffer::{MenuBuffer, RenderedMenu};
use crate::frame::Frame;

/// Memoized buffer of the active frame, invalidated by any
/// appearance-affecting state change.
pub(crate) struct RenderCache {
    buffer: MenuBuffer,
    dirty: bool,
}

impl RenderCache {
    pub(crate) fn new() -> Self {
        Self {
            buffer: MenuBuffer::empty(),
            dirty: false,
        }
    }

    /// Invalidate the cached buffer.
    #[inline]
    pub(crate) fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    /// Get the current buffer, rebuilding from the frame if invalidated.
    ///
    /// Reports `changed = true` only on the snapshot that rebuilt.
    pub(crate) fn snapshot(&mut self, frame: &Frame) -> RenderedMenu<'_> {
        let changed = self.dirty;
        if self.dirty {
            self.buffer = frame.render();
            self.dirty = false;
        }

        RenderedMenu {
            width: self.buffer.width(),
            height: self.buffer.height(),
            cells: self.buffer.cells(),
            changed,
        }
    }
}
