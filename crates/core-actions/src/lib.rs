//! Editor commands and the collaborators they reach.
//!
//! Keys become [`Action`]s in `key_translator`; `dispatch` applies an action
//! to the [`core_model::EditorModel`] session, reaching the clipboard and the
//! file system only through the [`ClipboardProvider`] and [`Persistence`]
//! traits. Provider failures never abort the session: they are turned into an
//! ephemeral status message. Only a document offset error escapes `dispatch`.

use std::path::PathBuf;
use thiserror::Error;

pub mod clipboard;
mod dispatcher;
pub mod io_ops;
mod key_translator;

pub use clipboard::{ClipboardProvider, MemoryClipboard, SystemClipboard, open_clipboard};
pub use dispatcher::{DispatchResult, dispatch};
pub use io_ops::{FsPersistence, Persistence};
pub use key_translator::translate_key;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MotionKind {
    Left,
    Right,
    Up,
    Down,
    LineStart,
    LineEnd,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    Motion(MotionKind),
    InsertText(String),
    InsertNewline,
    DeleteBackward,
    ToggleSelection,
    Copy,
    Cut,
    Paste,
    Undo,
    Redo,
    Save,
    Quit,
}

/// Failures of the outside world. Reported to the user, never fatal.
#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("clipboard unavailable: {0}")]
    ClipboardUnavailable(String),
    #[error("cannot access {}: {source}", .path.display())]
    PersistenceFailure {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
