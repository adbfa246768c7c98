//! Keyboard shortcuts for the editor.
//!
//! Maps key presses to editor actions. Mode hotkeys can be customized by
//! the embedding layer; the undo/redo/delete/cancel chords are fixed.

use crate::event::{Key, Modifiers};
use crate::mode::EditMode;

/// Actions a key press can trigger.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditorAction {
    /// Undo the last committed edit.
    Undo,
    /// Redo a previously undone edit.
    Redo,
    /// Delete the selected polygon.
    DeleteSelected,
    /// Cancel the in-progress operation and return to View.
    Cancel,
    /// Switch to an edit mode.
    SetMode(EditMode),
}

/// Keybinding configuration for the editor.
#[derive(Debug, Clone)]
pub struct KeyBindings {
    /// Hotkey for View mode
    pub mode_view: char,
    /// Hotkey for Create Polygon mode
    pub mode_create: char,
    /// Hotkey for Edit Vertices mode
    pub mode_edit: char,
    /// Hotkey for Add Points mode
    pub mode_add_points: char,
    /// Hotkey for Slice mode
    pub mode_slice: char,
    /// Hotkey for Delete Polygon mode
    pub mode_delete: char,
}

impl Default for KeyBindings {
    fn default() -> Self {
        Self {
            mode_view: 'v',
            mode_create: 'n',
            mode_edit: 'e',
            mode_add_points: 'a',
            mode_slice: 's',
            mode_delete: 'd',
        }
    }
}

impl KeyBindings {
    /// Create new keybindings with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Resolve a key press to an editor action, if any.
    ///
    /// Ctrl/Cmd+Z undoes, Ctrl/Cmd+Shift+Z redoes; Delete removes the
    /// selected polygon; Escape cancels. Plain letters switch modes.
    pub fn action_for_key(&self, key: Key, modifiers: Modifiers) -> Option<EditorAction> {
        match key {
            Key::Char(c) if modifiers.command() => {
                if c.eq_ignore_ascii_case(&'z') {
                    if modifiers.shift {
                        Some(EditorAction::Redo)
                    } else {
                        Some(EditorAction::Undo)
                    }
                } else {
                    None
                }
            }
            Key::Delete | Key::Backspace => Some(EditorAction::DeleteSelected),
            Key::Escape => Some(EditorAction::Cancel),
            Key::Char(c) => self.mode_for_char(c).map(EditorAction::SetMode),
            _ => None,
        }
    }

    /// Resolve a plain letter to a mode hotkey.
    fn mode_for_char(&self, c: char) -> Option<EditMode> {
        let c = c.to_ascii_lowercase();
        if c == self.mode_view {
            Some(EditMode::View)
        } else if c == self.mode_create {
            Some(EditMode::CreatePolygon)
        } else if c == self.mode_edit {
            Some(EditMode::EditVertices)
        } else if c == self.mode_add_points {
            Some(EditMode::AddPoints)
        } else if c == self.mode_slice {
            Some(EditMode::Slice)
        } else if c == self.mode_delete {
            Some(EditMode::DeletePolygon)
        } else {
            None
        }
    }
}
