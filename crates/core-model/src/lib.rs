//! Editor session model: state + layout + view, and the render query.
//!
//! `EditorModel` is the single owned session object handed to every command
//! handler. It keeps the derived [`Layout`] in step with the document: every
//! mutation goes through a helper here that edits `EditorState` by char
//! offset, rebuilds the layout, and repositions the cursor.
//!
//! Core invariants (hold after every public call):
//! * `layout` reflects the current document at the current wrap width.
//! * The cursor is a valid layout position and inside the viewport.
//! * An active selection is cleared by any edit that consumes it and by
//!   history replay. A rewrap (resize or wrap cap change) keeps the cursor
//!   and the anchor on the same chars by remapping them through offsets.

use core_state::{EditorState, SelectionRange};
use core_text::{Document, Position, TextError};
use thiserror::Error;
use tracing::{debug, trace};

pub mod layout;
pub mod view;

pub use layout::{Layout, Row};
pub use view::{View, Viewport};

/// Terminal rows reserved below the text area for the status strip.
pub const STATUS_ROWS: usize = 1;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ViewError {
    #[error("terminal too small ({width}x{height}); need at least 1 column and 2 rows")]
    ViewportTooSmall { width: usize, height: usize },
}

/// One character cell handed to the renderer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VisibleCell {
    pub ch: char,
    pub selected: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VisibleRow {
    /// Layout row index.
    pub row: usize,
    pub cells: Vec<VisibleCell>,
}

/// Everything the renderer needs for one frame of the text area.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VisibleFrame {
    pub rows: Vec<VisibleRow>,
    /// Screen rows below the document end (drawn as `~`).
    pub filler_rows: usize,
    /// Cursor cell on screen, (x, y) from the top-left of the text area.
    pub cursor_screen: (usize, usize),
}

pub struct EditorModel {
    state: EditorState,
    view: View,
    layout: Layout,
    width: usize,
    height: usize,
    /// Upper bound on the wrap width; 0 means "terminal width".
    max_wrap: usize,
}

impl EditorModel {
    /// Start a session over `text` for a terminal of `width` x `height` cells.
    pub fn load(text: &str, display_name: impl Into<String>, width: usize, height: usize) -> Self {
        let state = EditorState::new(Document::from_text(text), display_name);
        let mut model = Self {
            layout: Layout::rebuild(state.document(), width),
            state,
            view: View::new(height.saturating_sub(STATUS_ROWS)),
            width,
            height,
            max_wrap: 0,
        };
        model.relayout();
        debug!(target: "model", chars = text.chars().count(), rows = model.layout.row_count(), width, height, "load");
        model
    }

    pub fn state(&self) -> &EditorState {
        &self.state
    }

    pub fn state_mut(&mut self) -> &mut EditorState {
        &mut self.state
    }

    pub fn view(&self) -> &View {
        &self.view
    }

    pub fn layout(&self) -> &Layout {
        &self.layout
    }

    /// Disjoint borrows for motion handlers: the view mutably, the layout shared.
    pub fn split_view_and_layout(&mut self) -> (&mut View, &Layout) {
        (&mut self.view, &self.layout)
    }

    pub fn current_text(&self) -> String {
        self.state.current_text()
    }

    pub fn cursor(&self) -> Position {
        self.view.cursor()
    }

    /// Char offset of the cursor in the document.
    pub fn cursor_offset(&self) -> usize {
        self.layout.position_to_offset(self.view.cursor())
    }

    /// Terminal size the session was last given, (columns, rows).
    pub fn size(&self) -> (usize, usize) {
        (self.width, self.height)
    }

    /// Wrap width currently in effect.
    pub fn wrap_width(&self) -> usize {
        self.layout.width()
    }

    /// Cap the wrap width below the terminal width (0 removes the cap).
    pub fn set_max_wrap(&mut self, max_wrap: usize) {
        self.max_wrap = max_wrap;
        self.rewrap();
    }

    /// Adopt a new terminal size. The layout is rebuilt either way; an error
    /// tells the host the text area cannot be drawn.
    pub fn resize(&mut self, width: usize, height: usize) -> Result<(), ViewError> {
        self.width = width;
        self.height = height;
        self.view
            .set_visible_height(height.saturating_sub(STATUS_ROWS));
        self.rewrap();
        debug!(target: "model", width, height, rows = self.layout.row_count(), "resize");
        self.check_viewport()
    }

    pub fn check_viewport(&self) -> Result<(), ViewError> {
        if self.width == 0 || self.height <= STATUS_ROWS {
            return Err(ViewError::ViewportTooSmall {
                width: self.width,
                height: self.height,
            });
        }
        Ok(())
    }

    pub fn selection_range(&self) -> Option<SelectionRange> {
        self.state.selection.range(self.view.cursor())
    }

    /// Flip selection mode, anchoring at the cursor. Returns the new state.
    pub fn toggle_selection(&mut self) -> bool {
        let cursor = self.view.cursor();
        self.state.selection.toggle(cursor)
    }

    /// Text covered by the active selection, if any.
    pub fn copy_selection(&self) -> Option<String> {
        let (start, end) = self.selection_offsets()?;
        Some(self.state.document().slice(start, end))
    }

    /// Remove the selected text and return it. The selection is consumed.
    pub fn cut_selection(&mut self) -> Result<Option<String>, TextError> {
        self.delete_selection()
    }

    pub fn paste_text(&mut self, text: &str) -> Result<(), TextError> {
        self.insert_text(text)
    }

    /// Insert at the cursor, replacing the active selection first.
    pub fn insert_text(&mut self, text: &str) -> Result<(), TextError> {
        self.delete_selection()?;
        if text.is_empty() {
            return Ok(());
        }
        let offset = self.cursor_offset();
        self.state.insert(offset, text)?;
        self.relayout();
        let pos = self.layout.offset_to_position(offset + text.chars().count());
        self.view.set_position(&self.layout, pos);
        trace!(target: "model", offset, chars = text.chars().count(), "insert_text");
        Ok(())
    }

    pub fn insert_newline(&mut self) -> Result<(), TextError> {
        self.insert_text("\n")
    }

    /// Backspace: delete the selection if active, else the char before the cursor.
    pub fn delete_backward(&mut self) -> Result<(), TextError> {
        if self.delete_selection()?.is_some() {
            return Ok(());
        }
        let offset = self.cursor_offset();
        if offset == 0 {
            return Ok(());
        }
        self.state.delete(offset - 1, 1)?;
        self.relayout();
        let pos = self.layout.offset_to_position(offset - 1);
        self.view.set_position(&self.layout, pos);
        Ok(())
    }

    /// Reverse the last recorded edit. Returns false when there was nothing to undo.
    pub fn undo(&mut self) -> Result<bool, TextError> {
        let start = self.state.undo()?;
        Ok(self.after_history_replay(start))
    }

    /// Replay the next edit along the redo path. Returns false when there was nothing to redo.
    pub fn redo(&mut self) -> Result<bool, TextError> {
        let start = self.state.redo()?;
        Ok(self.after_history_replay(start))
    }

    /// Render query: the rows inside the viewport with selection flags and
    /// the cursor's screen cell.
    pub fn visible_rows(&self) -> Result<VisibleFrame, ViewError> {
        self.check_viewport()?;
        let viewport = self.view.viewport();
        let cursor = self.view.cursor();
        let first = viewport.scroll_offset.min(self.layout.row_count());
        let last = (first + viewport.height).min(self.layout.row_count());
        let selection = &self.state.selection;
        let rows = (first..last)
            .map(|row| VisibleRow {
                row,
                cells: self.layout.rows()[row]
                    .chars()
                    .iter()
                    .enumerate()
                    .map(|(col, &ch)| VisibleCell {
                        ch,
                        selected: selection.contains(cursor, row, col),
                    })
                    .collect(),
            })
            .collect::<Vec<_>>();
        let filler_rows = viewport.height.saturating_sub(rows.len());
        let cell = self.layout.display_cell(cursor);
        let x = cell.col.min(self.width.saturating_sub(1));
        let y = cell.row.saturating_sub(first);
        Ok(VisibleFrame {
            rows,
            filler_rows,
            cursor_screen: (x, y),
        })
    }

    fn selection_offsets(&self) -> Option<(usize, usize)> {
        let range = self.selection_range()?;
        let a = self.layout.position_to_offset(range.start);
        let b = self.layout.position_to_offset(range.end);
        Some((a.min(b), a.max(b)))
    }

    /// Delete the selected span (if any), leaving the cursor at its start.
    fn delete_selection(&mut self) -> Result<Option<String>, TextError> {
        let Some((start, end)) = self.selection_offsets() else {
            return Ok(None);
        };
        let removed = self.state.delete(start, end - start)?;
        self.state.selection.clear();
        self.relayout();
        let pos = self.layout.offset_to_position(start);
        self.view.set_position(&self.layout, pos);
        debug!(target: "model", start, chars = end - start, "delete_selection");
        Ok(Some(removed))
    }

    fn after_history_replay(&mut self, start: Option<usize>) -> bool {
        let Some(start) = start else {
            return false;
        };
        self.state.selection.clear();
        self.relayout();
        let pos = self.layout.offset_to_position(start);
        self.view.set_position(&self.layout, pos);
        true
    }

    /// Rebuild at a new wrap width, carrying the cursor and the selection
    /// anchor over by char offset.
    fn rewrap(&mut self) {
        let cursor = self.cursor_offset();
        let anchor = self
            .state
            .selection
            .anchor()
            .map(|pos| self.layout.position_to_offset(pos));
        self.relayout();
        let wrap = self.layout.width();
        if self.max_wrap > wrap {
            debug!(target: "model", max_wrap = self.max_wrap, wrap, "max_wrap_clamped");
        }
        if let Some(offset) = anchor {
            let pos = self.layout.offset_to_position(offset);
            self.state.selection.reanchor(pos);
        }
        let pos = self.layout.offset_to_position(cursor);
        self.view.set_position(&self.layout, pos);
    }

    fn relayout(&mut self) {
        let wrap = match self.max_wrap {
            0 => self.width,
            cap => cap.min(self.width),
        };
        self.layout = Layout::rebuild(self.state.document(), wrap);
        self.view.clamp_to_layout(&self.layout);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn model(text: &str) -> EditorModel {
        EditorModel::load(text, "t", 80, 24)
    }

    #[test]
    fn typing_advances_cursor() {
        let mut m = model("");
        m.insert_text("a").unwrap();
        m.insert_text("b").unwrap();
        assert_eq!(m.current_text(), "ab");
        assert_eq!(m.cursor(), Position::new(0, 2));
    }

    #[test]
    fn newline_moves_to_next_row_start() {
        let mut m = model("abcd");
        let (view, layout) = m.split_view_and_layout();
        view.set_position(layout, Position::new(0, 2));
        m.insert_newline().unwrap();
        assert_eq!(m.current_text(), "ab\ncd");
        assert_eq!(m.cursor(), Position::new(1, 0));
    }

    #[test]
    fn backspace_joins_rows() {
        let mut m = model("ab\ncd");
        let (view, layout) = m.split_view_and_layout();
        view.set_position(layout, Position::new(1, 0));
        m.delete_backward().unwrap();
        assert_eq!(m.current_text(), "abcd");
        assert_eq!(m.cursor(), Position::new(0, 2));
    }

    #[test]
    fn backspace_at_start_is_noop() {
        let mut m = model("ab");
        m.delete_backward().unwrap();
        assert_eq!(m.current_text(), "ab");
        assert!(!m.state().history().can_undo());
    }

    #[test]
    fn undo_repositions_cursor_at_edit_start() {
        let mut m = model("hello\nworld");
        let (view, layout) = m.split_view_and_layout();
        view.set_position(layout, Position::new(1, 5));
        m.insert_text("!!").unwrap();
        let (view, layout) = m.split_view_and_layout();
        view.set_position(layout, Position::origin());
        assert!(m.undo().unwrap());
        assert_eq!(m.current_text(), "hello\nworld");
        assert_eq!(m.cursor(), Position::new(1, 5));
        assert!(!m.undo().unwrap());
    }

    #[test]
    fn resize_rewraps_and_reports_tiny_terminal() {
        let mut m = model("abcdefgh");
        assert!(m.resize(5, 10).is_ok());
        assert_eq!(m.layout().row_count(), 2);
        assert_eq!(
            m.resize(5, 1),
            Err(ViewError::ViewportTooSmall {
                width: 5,
                height: 1
            })
        );
        assert!(m.visible_rows().is_err());
    }

    #[test]
    fn max_wrap_caps_terminal_width() {
        let mut m = model("abcdefgh");
        m.set_max_wrap(3);
        assert_eq!(m.wrap_width(), 3);
        assert_eq!(m.layout().row_count(), 3);
        m.set_max_wrap(0);
        assert_eq!(m.wrap_width(), 80);
    }

    #[test]
    fn visible_rows_reports_filler_and_cursor() {
        let mut m = EditorModel::load("a\nb\nc\nd\ne", "t", 10, 4);
        let frame = m.visible_rows().unwrap();
        assert_eq!(frame.rows.len(), 3);
        assert_eq!(frame.filler_rows, 0);
        for _ in 0..4 {
            let (view, layout) = m.split_view_and_layout();
            view.move_down(layout);
        }
        let frame = m.visible_rows().unwrap();
        assert_eq!(frame.rows.first().map(|r| r.row), Some(2));
        assert_eq!(frame.cursor_screen, (0, 2));

        let short = EditorModel::load("x", "t", 10, 4);
        assert_eq!(short.visible_rows().unwrap().filler_rows, 2);
    }

    #[test]
    fn one_row_viewport_follows_cursor_past_full_last_row() {
        let mut m = EditorModel::load("abcdefgh", "t", 4, 2);
        let (view, layout) = m.split_view_and_layout();
        view.move_down(layout);
        view.move_line_end(layout);
        assert_eq!(m.cursor(), Position::new(1, 4));
        let frame = m.visible_rows().unwrap();
        assert!(frame.rows.is_empty());
        assert_eq!(frame.filler_rows, 1);
        assert_eq!(frame.cursor_screen, (0, 0));
    }
}
