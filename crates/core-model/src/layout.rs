//! Wrapped row layout derived from a document and a display width.
//!
//! The layout is a pure function of `(Document, width)` and is rebuilt
//! wholesale after every mutation or resize. Rendering and history
//! repositioning share this single implementation so the two never disagree
//! about where a row starts.
//!
//! Invariants:
//! * `rows.len() >= 1` (an empty document has one empty row).
//! * A row ends either at an explicit `\n` (stored as `explicit = true`, the
//!   break itself is not part of any row) or because it reached `width`
//!   chars (a wrap row).
//! * Joining all rows and inserting `\n` after each explicit row reproduces
//!   the document exactly.
//! * `position_to_offset(offset_to_position(o)) == o` for every
//!   `o <= len_chars`.

use core_text::{Document, Position};
use tracing::trace;

/// One display row.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Row {
    chars: Vec<char>,
    explicit: bool,
}

impl Row {
    pub fn len(&self) -> usize {
        self.chars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chars.is_empty()
    }

    pub fn chars(&self) -> &[char] {
        &self.chars
    }

    /// True when the row was closed by a literal line break rather than a wrap.
    pub fn is_explicit(&self) -> bool {
        self.explicit
    }

    pub fn text(&self) -> String {
        self.chars.iter().collect()
    }
}

#[derive(Debug, Clone)]
pub struct Layout {
    rows: Vec<Row>,
    width: usize,
}

impl Layout {
    /// Walk the document once, splitting on `\n` and on width overflow.
    pub fn rebuild(document: &Document, width: usize) -> Self {
        let width = width.max(1);
        let mut rows = vec![Row::default()];
        for c in document.chars() {
            let last = rows.len() - 1;
            if c == '\n' {
                rows[last].explicit = true;
                rows.push(Row::default());
                continue;
            }
            if rows[last].chars.len() >= width {
                rows.push(Row::default());
            }
            let last = rows.len() - 1;
            rows[last].chars.push(c);
        }
        trace!(target: "model.layout", rows = rows.len(), width, "rebuild");
        Self { rows, width }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn last_row(&self) -> usize {
        self.rows.len() - 1
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    pub fn row(&self, idx: usize) -> Option<&Row> {
        self.rows.get(idx)
    }

    /// Char count of a row; 0 for rows past the end.
    pub fn row_width(&self, idx: usize) -> usize {
        self.rows.get(idx).map(Row::len).unwrap_or(0)
    }

    pub fn is_explicit(&self, idx: usize) -> bool {
        self.rows.get(idx).map(Row::is_explicit).unwrap_or(false)
    }

    /// Map a flat char offset to the first row whose cumulative length covers it.
    ///
    /// At a wrap boundary this yields the end of the earlier row. Offsets past
    /// the document end degrade to the end of the last row.
    pub fn offset_to_position(&self, offset: usize) -> Position {
        let mut row_start = 0usize;
        for (idx, row) in self.rows.iter().enumerate() {
            let row_end = row_start + row.len();
            if row_end >= offset {
                return Position::new(idx, offset.saturating_sub(row_start));
            }
            row_start = row_end + usize::from(row.explicit);
        }
        let last = self.last_row();
        Position::new(last, self.row_width(last))
    }

    /// Screen cell a position is drawn in. The end of a full wrap row shares
    /// its cell with the start of the row below, since both address the same
    /// offset.
    pub fn display_cell(&self, pos: Position) -> Position {
        if pos.col >= self.width && !self.is_explicit(pos.row) {
            Position::new(pos.row + 1, 0)
        } else {
            pos
        }
    }

    /// Flat char offset of a (row, col) position: every row above contributes
    /// its length plus one for an explicit break.
    pub fn position_to_offset(&self, pos: Position) -> usize {
        let above: usize = self
            .rows
            .iter()
            .take(pos.row)
            .map(|r| r.len() + usize::from(r.explicit))
            .sum();
        above + pos.col
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn texts(l: &Layout) -> Vec<String> {
        l.rows().iter().map(Row::text).collect()
    }

    fn explicit(l: &Layout) -> Vec<bool> {
        l.rows().iter().map(Row::is_explicit).collect()
    }

    #[test]
    fn wraps_at_width() {
        let l = Layout::rebuild(&Document::from_text("abcdefgh"), 5);
        assert_eq!(texts(&l), vec!["abcde", "fgh"]);
        assert_eq!(explicit(&l), vec![false, false]);
        assert_eq!(l.position_to_offset(Position::new(1, 0)), 5);
    }

    #[test]
    fn explicit_break_is_not_stored() {
        let l = Layout::rebuild(&Document::from_text("ab\ncd"), 80);
        assert_eq!(texts(&l), vec!["ab", "cd"]);
        assert_eq!(explicit(&l), vec![true, false]);
        assert_eq!(l.position_to_offset(Position::new(1, 0)), 3);
    }

    #[test]
    fn empty_document_has_one_empty_row() {
        let l = Layout::rebuild(&Document::new(), 10);
        assert_eq!(l.row_count(), 1);
        assert!(l.rows()[0].is_empty());
        assert_eq!(l.offset_to_position(0), Position::origin());
    }

    #[test]
    fn trailing_newline_opens_empty_row() {
        let l = Layout::rebuild(&Document::from_text("abc\n"), 10);
        assert_eq!(texts(&l), vec!["abc", ""]);
        assert_eq!(l.offset_to_position(4), Position::new(1, 0));
    }

    #[test]
    fn full_row_followed_by_break_does_not_add_wrap_row() {
        let l = Layout::rebuild(&Document::from_text("abcde\nf"), 5);
        assert_eq!(texts(&l), vec!["abcde", "f"]);
        assert_eq!(explicit(&l), vec![true, false]);
    }

    #[test]
    fn exact_width_row_without_break_stays_single() {
        let l = Layout::rebuild(&Document::from_text("abcde"), 5);
        assert_eq!(texts(&l), vec!["abcde"]);
        assert_eq!(l.offset_to_position(5), Position::new(0, 5));
    }

    #[test]
    fn mixed_wraps_and_breaks() {
        let l = Layout::rebuild(&Document::from_text("abcdefg\n\nxy"), 3);
        assert_eq!(texts(&l), vec!["abc", "def", "g", "", "xy"]);
        assert_eq!(explicit(&l), vec![false, false, true, true, false]);
        assert_eq!(l.position_to_offset(Position::new(4, 1)), 10);
        assert_eq!(l.offset_to_position(9), Position::new(4, 0));
        assert_eq!(l.offset_to_position(8), Position::new(3, 0));
    }

    #[test]
    fn offset_at_wrap_boundary_maps_to_earlier_row_end() {
        let l = Layout::rebuild(&Document::from_text("abcdefgh"), 5);
        assert_eq!(l.offset_to_position(5), Position::new(0, 5));
        assert_eq!(l.offset_to_position(6), Position::new(1, 1));
    }

    #[test]
    fn wrap_row_end_draws_at_next_row_start() {
        let l = Layout::rebuild(&Document::from_text("abcdefgh"), 5);
        assert_eq!(l.display_cell(Position::new(0, 5)), Position::new(1, 0));
        assert_eq!(l.display_cell(Position::new(1, 0)), Position::new(1, 0));
        assert_eq!(l.display_cell(Position::new(0, 4)), Position::new(0, 4));

        let broken = Layout::rebuild(&Document::from_text("abcde\nf"), 5);
        assert_eq!(broken.display_cell(Position::new(0, 5)), Position::new(0, 5));
    }

    #[test]
    fn offset_past_end_degrades_to_last_row_end() {
        let l = Layout::rebuild(&Document::from_text("ab\ncd"), 80);
        assert_eq!(l.offset_to_position(99), Position::new(1, 2));
    }

    #[test]
    fn zero_width_is_treated_as_one() {
        let l = Layout::rebuild(&Document::from_text("abc"), 0);
        assert_eq!(l.width(), 1);
        assert_eq!(texts(&l), vec!["a", "b", "c"]);
    }
}
