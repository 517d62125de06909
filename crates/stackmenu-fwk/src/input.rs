//! Abstract input codes for the menu engine.
//!
//! The engine never reads the terminal itself; the driving loop translates
//! whatever it receives (key events, escape sequences) into a [`MenuInput`]
//! and feeds it to [`Gui::update`](crate::gui::Gui::update).

/// One abstract input code consumed by the active frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuInput {
    /// Direct selection of the item at this index (letter shortcut).
    Index(usize),
    /// Move the highlight up.
    Up,
    /// Move the highlight down.
    Down,
    /// Reserved; accepted and ignored by every frame variant.
    PageUp,
    /// Reserved; accepted and ignored by every frame variant.
    PageDown,
    /// Select the highlighted item.
    Select,
    /// Abort the active frame.
    Escape,
    /// Untranslatable input; dropped by the controller without dispatch.
    Invalid,
}

impl MenuInput {
    /// Check if this input is the ignored sentinel.
    #[inline]
    pub fn is_invalid(&self) -> bool {
        matches!(self, MenuInput::Invalid)
    }

    /// Get the direct-selection index, if this is an `Index` input.
    #[inline]
    pub fn index(&self) -> Option<usize> {
        match self {
            MenuInput::Index(i) => Some(*i),
            _ => None,
        }
    }
}

#[cfg(feature = "crossterm")]
mod convert {
    use crossterm::event::{KeyCode, KeyEvent};

    use super::MenuInput;

    impl From<&KeyEvent> for MenuInput {
        /// Translate a key event into an abstract input code.
        ///
        /// Lowercase letters map to direct indices 0..25 and uppercase to
        /// 26..51, matching the per-row letter markers. `q` is reserved as
        /// an escape key, so index 16 is only reachable via highlighting.
        fn from(key: &KeyEvent) -> Self {
            match key.code {
                KeyCode::Char('q') => MenuInput::Escape,
                KeyCode::Char(c @ 'a'..='z') => MenuInput::Index(c as usize - 'a' as usize),
                KeyCode::Char(c @ 'A'..='Z') => MenuInput::Index(c as usize - 'A' as usize + 26),
                KeyCode::Enter => MenuInput::Select,
                KeyCode::Esc => MenuInput::Escape,
                KeyCode::Up => MenuInput::Up,
                KeyCode::Down => MenuInput::Down,
                KeyCode::PageUp => MenuInput::PageUp,
                KeyCode::PageDown => MenuInput::PageDown,
                _ => MenuInput::Invalid,
            }
        }
    }

    impl From<KeyEvent> for MenuInput {
        fn from(key: KeyEvent) -> Self {
            MenuInput::from(&key)
        }
    }
}
