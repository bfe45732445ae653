//! Cursor and viewport controller.
//!
//! Every cursor transition goes through [`View::move_to`], which owns the
//! clamping, wrap-across-rows, and sticky column rules. The thin motion
//! helpers only compute a target. After each move the viewport scrolls by the
//! smallest amount that keeps the cursor row visible.

use crate::layout::Layout;
use core_text::Position;
use tracing::trace;

/// Visible vertical window into the layout rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    /// Index of the first visible layout row.
    pub scroll_offset: usize,
    /// Rows available for text (terminal height minus the status row).
    pub height: usize,
}

impl Viewport {
    pub fn new(height: usize) -> Self {
        Self {
            scroll_offset: 0,
            height,
        }
    }

    /// Minimal scroll keeping `row` inside `[scroll_offset, scroll_offset + height)`.
    /// Returns true when the offset changed.
    pub fn ensure_visible(&mut self, row: usize) -> bool {
        if self.height == 0 {
            return false;
        }
        let before = self.scroll_offset;
        if row < self.scroll_offset {
            self.scroll_offset = row;
        } else if row >= self.scroll_offset + self.height {
            self.scroll_offset = row + 1 - self.height;
        }
        before != self.scroll_offset
    }
}

#[derive(Debug, Clone)]
pub struct View {
    cursor: Position,
    /// Column remembered across vertical moves.
    desired_col: usize,
    viewport: Viewport,
}

impl View {
    pub fn new(visible_height: usize) -> Self {
        Self {
            cursor: Position::origin(),
            desired_col: 0,
            viewport: Viewport::new(visible_height),
        }
    }

    pub fn cursor(&self) -> Position {
        self.cursor
    }

    pub fn desired_col(&self) -> usize {
        self.desired_col
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn set_visible_height(&mut self, height: usize) {
        self.viewport.height = height;
        self.viewport.ensure_visible(self.cursor.row);
    }

    /// Move toward (`target_row`, `target_col`), applying the navigation rules:
    ///
    /// * negative column: end of the previous row, one more step left when
    ///   that row is a wrap row (no break char occupies a column there);
    /// * row past the end: end of the last row;
    /// * negative row: document start;
    /// * new row in bounds: column snaps to `min(desired, row width)`;
    /// * column past the row end on the same row: start of the next row, or
    ///   nothing on the last row;
    /// * otherwise the column is taken as is and becomes the desired column.
    pub fn move_to(&mut self, layout: &Layout, target_row: isize, target_col: isize) {
        let before = self.cursor;
        let last = layout.last_row();
        if target_col < 0 {
            if target_row > 0 {
                let prev = (target_row as usize - 1).min(last);
                let mut col = layout.row_width(prev);
                if !layout.is_explicit(prev) {
                    col = col.saturating_sub(1);
                }
                self.cursor = Position::new(prev, col);
                self.desired_col = col;
            }
        } else if target_row < 0 {
            self.cursor = Position::origin();
        } else if target_row as usize > last {
            self.cursor = Position::new(last, layout.row_width(last));
        } else {
            let row = target_row as usize;
            let col = target_col as usize;
            if row != self.cursor.row {
                self.cursor = Position::new(row, self.desired_col.min(layout.row_width(row)));
            } else if col > layout.row_width(row) {
                if row < last {
                    self.cursor = Position::new(row + 1, 0);
                    self.desired_col = 0;
                }
            } else {
                self.cursor = Position::new(row, col);
                self.desired_col = col;
            }
        }
        let scrolled = self.viewport.ensure_visible(layout.display_cell(self.cursor).row);
        trace!(
            target: "model.view",
            from_row = before.row,
            from_col = before.col,
            to_row = self.cursor.row,
            to_col = self.cursor.col,
            desired = self.desired_col,
            scroll = self.viewport.scroll_offset,
            scrolled,
            "move_to"
        );
    }

    pub fn move_left(&mut self, layout: &Layout) {
        let (r, c) = self.signed();
        self.move_to(layout, r, c - 1);
    }

    pub fn move_right(&mut self, layout: &Layout) {
        let (r, c) = self.signed();
        self.move_to(layout, r, c + 1);
    }

    pub fn move_up(&mut self, layout: &Layout) {
        let (r, c) = self.signed();
        self.move_to(layout, r - 1, c);
    }

    pub fn move_down(&mut self, layout: &Layout) {
        let (r, c) = self.signed();
        self.move_to(layout, r + 1, c);
    }

    pub fn move_line_start(&mut self, layout: &Layout) {
        let (r, _) = self.signed();
        self.move_to(layout, r, 0);
    }

    pub fn move_line_end(&mut self, layout: &Layout) {
        let (r, _) = self.signed();
        self.move_to(layout, r, layout.row_width(self.cursor.row) as isize);
    }

    /// Explicit positioning (after edits and history replay): clamp into the
    /// layout and adopt the column as the desired column.
    pub fn set_position(&mut self, layout: &Layout, pos: Position) {
        let row = pos.row.min(layout.last_row());
        let col = pos.col.min(layout.row_width(row));
        self.cursor = Position::new(row, col);
        self.desired_col = col;
        self.viewport.ensure_visible(layout.display_cell(self.cursor).row);
    }

    /// Re-establish cursor bounds after a layout rebuild without touching the
    /// desired column.
    pub fn clamp_to_layout(&mut self, layout: &Layout) {
        let row = self.cursor.row.min(layout.last_row());
        let col = self.cursor.col.min(layout.row_width(row));
        self.cursor = Position::new(row, col);
        self.viewport.ensure_visible(layout.display_cell(self.cursor).row);
    }

    fn signed(&self) -> (isize, isize) {
        (self.cursor.row as isize, self.cursor.col as isize)
    }
}
