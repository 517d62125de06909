//! Flat character-grid buffers and the rendered-menu snapshot.
//!
//! A frame renders into a [`MenuBuffer`]: a `width × height` grid of
//! `char` cells with no embedded terminator. Callers rely solely on the
//! reported extent.

/// Per-row shortcut letters, in marker order.
const INDEX_LETTERS: &str = "abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ";

/// Marker drawn in place of the row letter on the highlighted row.
pub(crate) const HIGHLIGHT_MARKER: char = '>';

const BOX_H: char = '─';
const BOX_V: char = '│';
const BOX_TL: char = '┌';
const BOX_TR: char = '┐';
const BOX_BL: char = '└';
const BOX_BR: char = '┘';

/// The shortcut letter for a row index, `?` past the letter supply.
pub(crate) fn index_letter(index: usize) -> char {
    INDEX_LETTERS.chars().nth(index).unwrap_or('?')
}

/// A flat character grid, blank-filled on creation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MenuBuffer {
    width: usize,
    height: usize,
    cells: Vec<char>,
}

impl MenuBuffer {
    /// Create a blank buffer of the given extent.
    pub(crate) fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            cells: vec![' '; width * height],
        }
    }

    /// Create a zero-extent buffer.
    pub(crate) fn empty() -> Self {
        Self::new(0, 0)
    }

    /// Width of the grid in cells.
    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    /// Height of the grid in rows.
    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    /// The full grid in row-major order.
    #[inline]
    pub fn cells(&self) -> &[char] {
        &self.cells
    }

    /// One row of the grid.
    pub fn row(&self, y: usize) -> &[char] {
        let start = y * self.width;
        &self.cells[start..start + self.width]
    }

    /// Set a single cell. Out-of-extent writes are dropped.
    pub(crate) fn set(&mut self, x: usize, y: usize, ch: char) {
        if x < self.width && y < self.height {
            self.cells[y * self.width + x] = ch;
        }
    }

    /// Write a string left-aligned at `(x, y)`, clamped at the right edge.
    pub(crate) fn write_str(&mut self, x: usize, y: usize, text: &str) {
        for (i, ch) in text.chars().enumerate() {
            if x + i >= self.width {
                break;
            }
            self.set(x + i, y, ch);
        }
    }

    /// Draw a box-drawing border along the grid's outer cells.
    pub(crate) fn draw_border(&mut self) {
        if self.width < 2 || self.height < 2 {
            return;
        }

        let (w, h) = (self.width, self.height);
        self.set(0, 0, BOX_TL);
        self.set(w - 1, 0, BOX_TR);
        self.set(0, h - 1, BOX_BL);
        self.set(w - 1, h - 1, BOX_BR);

        for x in 1..w - 1 {
            self.set(x, 0, BOX_H);
            self.set(x, h - 1, BOX_H);
        }
        for y in 1..h - 1 {
            self.set(0, y, BOX_V);
            self.set(w - 1, y, BOX_V);
        }
    }
}

/// A snapshot of the active frame's rendered buffer.
///
/// `changed` is true only when the buffer was rebuilt since the previous
/// snapshot; callers redraw only then.
#[derive(Debug, Clone, Copy)]
pub struct RenderedMenu<'a> {
    /// Width of the buffer in cells.
    pub width: usize,
    /// Height of the buffer in rows.
    pub height: usize,
    /// The buffer in row-major order, `width * height` cells.
    pub cells: &'a [char],
    /// Whether the buffer contents changed since the last snapshot.
    pub changed: bool,
}

impl<'a> RenderedMenu<'a> {
    /// Iterate over the buffer row by row, for blitting.
    pub fn rows(&self) -> std::slice::Chunks<'a, char> {
        self.cells.chunks(self.width.max(1))
    }
}
