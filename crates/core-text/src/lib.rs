//! Rope-backed document storage.
//!
//! The document is a flat sequence of Unicode scalar values addressed by char
//! offset. It knows nothing about rows or wrapping; line structure is derived
//! by the layout engine in `core-model`. Callers own history bookkeeping and
//! layout invalidation after every mutation.

use ropey::Rope;
use thiserror::Error;
use tracing::trace;

/// Errors raised by document mutation.
///
/// These indicate broken coordinate math in a caller rather than bad user
/// input; the editor treats them as fatal.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TextError {
    #[error("edit range {offset}..{end} out of bounds for document of {len} chars")]
    OutOfRangeOffset {
        offset: usize,
        end: usize,
        len: usize,
    },
}

/// A position in the wrapped layout expressed as (row index, column within row).
///
/// `col` may equal the row length, meaning "after the last character".
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Position {
    pub row: usize,
    pub col: usize,
}

impl Position {
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }
    pub const fn origin() -> Self {
        Self { row: 0, col: 0 }
    }
}

/// Editable text content owned by a single editor session.
#[derive(Clone, Default)]
pub struct Document {
    rope: Rope,
}

impl std::fmt::Debug for Document {
    // Content is never logged; only its size.
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Document")
            .field("len_chars", &self.rope.len_chars())
            .finish()
    }
}

impl Document {
    pub fn new() -> Self {
        Self::default()
    }

    /// Construct a document from an in-memory string slice.
    pub fn from_text(content: &str) -> Self {
        Self {
            rope: Rope::from_str(content),
        }
    }

    /// Total number of scalar values.
    pub fn len_chars(&self) -> usize {
        self.rope.len_chars()
    }

    pub fn is_empty(&self) -> bool {
        self.rope.len_chars() == 0
    }

    /// Iterate the content one scalar value at a time.
    pub fn chars(&self) -> impl Iterator<Item = char> + '_ {
        self.rope.chars()
    }

    /// Copy out the chars in `[start, end)`, clamped to the document.
    pub fn slice(&self, start: usize, end: usize) -> String {
        let len = self.rope.len_chars();
        let s = start.min(len);
        let e = end.min(len);
        if s >= e {
            return String::new();
        }
        self.rope.slice(s..e).to_string()
    }

    /// Insert `text` so that its first char lands at `offset`.
    pub fn insert(&mut self, offset: usize, text: &str) -> Result<(), TextError> {
        let len = self.rope.len_chars();
        if offset > len {
            return Err(TextError::OutOfRangeOffset {
                offset,
                end: offset,
                len,
            });
        }
        self.rope.insert(offset, text);
        trace!(target: "text.edit", offset, inserted = text.chars().count(), len_after = self.rope.len_chars(), "insert");
        Ok(())
    }

    /// Remove `count` chars starting at `offset`, returning the removed text.
    pub fn delete(&mut self, offset: usize, count: usize) -> Result<String, TextError> {
        let len = self.rope.len_chars();
        let end = offset.saturating_add(count);
        if offset > len || end > len {
            return Err(TextError::OutOfRangeOffset { offset, end, len });
        }
        if count == 0 {
            return Ok(String::new());
        }
        let removed = self.rope.slice(offset..end).to_string();
        self.rope.remove(offset..end);
        trace!(target: "text.edit", offset, removed = count, len_after = self.rope.len_chars(), "delete");
        Ok(removed)
    }
}

impl std::fmt::Display for Document {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for chunk in self.rope.chunks() {
            f.write_str(chunk)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insert_shifts_tail_right() {
        let mut d = Document::from_text("held");
        d.insert(3, "lo wor").unwrap();
        assert_eq!(d.to_string(), "hello world");
        assert_eq!(d.len_chars(), 11);
    }

    #[test]
    fn insert_at_end_is_valid() {
        let mut d = Document::from_text("ab");
        d.insert(2, "c").unwrap();
        assert_eq!(d.to_string(), "abc");
    }

    #[test]
    fn insert_past_end_fails() {
        let mut d = Document::from_text("ab");
        let err = d.insert(3, "x").unwrap_err();
        assert_eq!(
            err,
            TextError::OutOfRangeOffset {
                offset: 3,
                end: 3,
                len: 2
            }
        );
        assert_eq!(d.to_string(), "ab", "failed insert leaves content untouched");
    }

    #[test]
    fn delete_returns_removed_text() {
        let mut d = Document::from_text("ab\ncd");
        let removed = d.delete(1, 3).unwrap();
        assert_eq!(removed, "b\nc");
        assert_eq!(d.to_string(), "ad");
    }

    #[test]
    fn delete_range_past_end_fails() {
        let mut d = Document::from_text("abc");
        assert!(d.delete(2, 2).is_err());
        assert!(d.delete(4, 0).is_err());
        assert_eq!(d.to_string(), "abc");
    }

    #[test]
    fn offsets_count_scalar_values_not_bytes() {
        let mut d = Document::from_text("añb😀");
        assert_eq!(d.len_chars(), 4);
        d.insert(3, "é").unwrap();
        assert_eq!(d.to_string(), "añbé😀");
        assert_eq!(d.delete(4, 1).unwrap(), "😀");
        assert_eq!(d.slice(1, 3), "ñb");
    }

    #[test]
    fn slice_clamps_out_of_range() {
        let d = Document::from_text("abc");
        assert_eq!(d.slice(1, 10), "bc");
        assert_eq!(d.slice(5, 9), "");
        assert_eq!(d.slice(2, 1), "");
    }
}
