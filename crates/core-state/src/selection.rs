//! Selection anchored at a layout position and closed by the live cursor.
//!
//! The tracker stores only the anchor; the other end is always the cursor
//! supplied by the caller, so the range follows navigation without any
//! bookkeeping. Coordinates are layout (row, col) pairs and go stale when the
//! layout is rebuilt: consumers clear the selection on edits and history
//! replay, and move the anchor with [`Selection::reanchor`] on a rewrap.

use core_text::Position;
use tracing::trace;

/// Normalized selection bounds; `start` never sorts after `end`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SelectionRange {
    pub start: Position,
    pub end: Position,
}

#[derive(Debug, Default, Clone)]
pub struct Selection {
    anchor: Option<Position>,
}

impl Selection {
    pub fn is_active(&self) -> bool {
        self.anchor.is_some()
    }

    pub fn anchor(&self) -> Option<Position> {
        self.anchor
    }

    /// Flip selection mode. Activation anchors at `cursor`. Returns the new state.
    pub fn toggle(&mut self, cursor: Position) -> bool {
        self.anchor = match self.anchor {
            Some(_) => None,
            None => Some(cursor),
        };
        trace!(target: "state.selection", active = self.anchor.is_some(), row = cursor.row, col = cursor.col, "toggle");
        self.anchor.is_some()
    }

    /// Move an active anchor to `pos`; an inactive selection stays inactive.
    pub fn reanchor(&mut self, pos: Position) {
        if let Some(anchor) = self.anchor.as_mut() {
            *anchor = pos;
        }
    }

    pub fn clear(&mut self) {
        self.anchor = None;
    }

    /// Ordered range between anchor and cursor.
    ///
    /// Rows decide the order first. Columns are compared only when both ends
    /// share a row; across rows each end keeps its own column.
    pub fn range(&self, cursor: Position) -> Option<SelectionRange> {
        let anchor = self.anchor?;
        let (start, end) = if anchor.row == cursor.row {
            let row = anchor.row;
            (
                Position::new(row, anchor.col.min(cursor.col)),
                Position::new(row, anchor.col.max(cursor.col)),
            )
        } else if anchor.row < cursor.row {
            (anchor, cursor)
        } else {
            (cursor, anchor)
        };
        Some(SelectionRange { start, end })
    }

    /// Whether the cell at (`row`, `col`) is highlighted. Both end columns are
    /// inclusive.
    pub fn contains(&self, cursor: Position, row: usize, col: usize) -> bool {
        let Some(SelectionRange { start, end }) = self.range(cursor) else {
            return false;
        };
        if row < start.row || row > end.row {
            return false;
        }
        if start.row == end.row {
            start.col <= col && col <= end.col
        } else if row == start.row {
            start.col <= col
        } else if row == end.row {
            col <= end.col
        } else {
            true
        }
    }
}
