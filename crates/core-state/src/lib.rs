//! Editor state: document, history tree, selection, and file metadata.
//!
//! `EditorState` is offset-based: it knows nothing about rows or wrapping.
//! The session layer in `core-model` converts cursor positions to char
//! offsets through the layout, then calls into this crate. Every mutation
//! entry point here records a history node; `undo`/`redo` replay recorded
//! nodes without recording new ones.
//!
//! Telemetry: history events are emitted on target `state.undo`, selection
//! toggles on `state.selection`. Neither ever logs document text.

use core_text::{Document, TextError};
use std::path::PathBuf;
use tracing::debug;

pub mod selection;
pub mod undo;

pub use selection::{Selection, SelectionRange};
pub use undo::{EditKind, EditOp, NodeId, UndoTree};

/// Short-lived status message shown on the status strip until the next command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EphemeralMessage {
    pub text: String,
}

#[derive(Debug)]
pub struct EditorState {
    document: Document,
    history: UndoTree,
    pub selection: Selection,
    /// Name shown on the status strip (base file name).
    pub display_name: String,
    /// Backing file, if the document was opened from or saved to a path.
    pub file_name: Option<PathBuf>,
    pub dirty: bool,
    pub ephemeral_status: Option<EphemeralMessage>,
}

impl EditorState {
    pub fn new(document: Document, display_name: impl Into<String>) -> Self {
        Self {
            document,
            history: UndoTree::new(),
            selection: Selection::default(),
            display_name: display_name.into(),
            file_name: None,
            dirty: false,
            ephemeral_status: None,
        }
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    pub fn history(&self) -> &UndoTree {
        &self.history
    }

    /// Current flat document contents.
    pub fn current_text(&self) -> String {
        self.document.to_string()
    }

    /// Insert `text` at `offset` and record it. Empty text is not recorded.
    pub fn insert(&mut self, offset: usize, text: &str) -> Result<(), TextError> {
        if text.is_empty() {
            return Ok(());
        }
        self.document.insert(offset, text)?;
        self.history.record(EditKind::Insert, text, offset);
        self.dirty = true;
        Ok(())
    }

    /// Delete `count` chars at `offset` and record the removed text.
    pub fn delete(&mut self, offset: usize, count: usize) -> Result<String, TextError> {
        if count == 0 {
            return Ok(String::new());
        }
        let removed = self.document.delete(offset, count)?;
        self.history.record(EditKind::Delete, removed.clone(), offset);
        self.dirty = true;
        Ok(removed)
    }

    /// Reverse the head operation. Returns its start offset when something was undone.
    pub fn undo(&mut self) -> Result<Option<usize>, TextError> {
        let Some(op) = self.history.undo() else {
            return Ok(None);
        };
        match op.kind {
            EditKind::Insert => {
                self.document.delete(op.start, op.char_len())?;
            }
            EditKind::Delete => self.document.insert(op.start, &op.text)?,
        }
        self.dirty = true;
        debug!(target: "state.undo", kind = ?op.kind, start = op.start, chars = op.char_len(), "undo_applied");
        Ok(Some(op.start))
    }

    /// Replay the operation in the head's redo slot. Returns its start offset when applied.
    pub fn redo(&mut self) -> Result<Option<usize>, TextError> {
        let Some(op) = self.history.redo() else {
            return Ok(None);
        };
        match op.kind {
            EditKind::Insert => self.document.insert(op.start, &op.text)?,
            EditKind::Delete => {
                self.document.delete(op.start, op.char_len())?;
            }
        }
        self.dirty = true;
        debug!(target: "state.undo", kind = ?op.kind, start = op.start, chars = op.char_len(), "redo_applied");
        Ok(Some(op.start))
    }

    pub fn set_ephemeral(&mut self, text: impl Into<String>) {
        self.ephemeral_status = Some(EphemeralMessage { text: text.into() });
    }

    /// Drop any pending status message. Returns true when one was present.
    pub fn clear_ephemeral(&mut self) -> bool {
        self.ephemeral_status.take().is_some()
    }
}
