//! Dispatcher applying `Action` to the editor session.
//!
//! Sub-modules group the handlers by concern:
//! * `motion`    - cursor movement through the view controller
//! * `edit`      - text insertion and backspace
//! * `selection` - selection toggle
//! * `clipboard` - copy / cut / paste through a `ClipboardProvider`
//! * `undo`      - history replay
//! * `file`      - save through a `Persistence` provider
//!
//! Any pending ephemeral status message is dropped before the action runs,
//! so a message lives exactly until the next command.

use crate::{Action, ClipboardProvider, Persistence};
use core_model::EditorModel;
use core_text::TextError;

mod clipboard;
mod edit;
mod file;
mod motion;
mod selection;
mod undo;

/// Result of dispatching a single `Action`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DispatchResult {
    /// Screen content may have changed; the host should redraw.
    pub dirty: bool,
    pub quit: bool,
}

impl DispatchResult {
    pub fn dirty() -> Self {
        Self {
            dirty: true,
            quit: false,
        }
    }
    pub fn clean() -> Self {
        Self {
            dirty: false,
            quit: false,
        }
    }
    pub fn quit() -> Self {
        Self {
            dirty: true,
            quit: true,
        }
    }

    fn or_dirty(self, dirty: bool) -> Self {
        Self {
            dirty: self.dirty || dirty,
            ..self
        }
    }
}

/// Apply an action to the session. `Err` only for document offset errors,
/// which mean the session state is inconsistent and the host should stop.
pub fn dispatch(
    action: Action,
    model: &mut EditorModel,
    clipboard: &mut dyn ClipboardProvider,
    persistence: &dyn Persistence,
) -> Result<DispatchResult, TextError> {
    let cleared_message = model.state_mut().clear_ephemeral();
    tracing::trace!(target: "actions.dispatch", action = action_name(&action), "dispatch");

    let result = match action {
        Action::Motion(kind) => motion::handle_motion(kind, model),
        Action::InsertText(text) => edit::handle_insert(&text, model)?,
        Action::InsertNewline => edit::handle_newline(model)?,
        Action::DeleteBackward => edit::handle_backspace(model)?,
        Action::ToggleSelection => selection::handle_toggle(model),
        Action::Copy => clipboard::handle_copy(model, clipboard),
        Action::Cut => clipboard::handle_cut(model, clipboard)?,
        Action::Paste => clipboard::handle_paste(model, clipboard)?,
        Action::Undo => undo::handle_undo(model)?,
        Action::Redo => undo::handle_redo(model)?,
        Action::Save => file::handle_save(model, persistence),
        Action::Quit => DispatchResult::quit(),
    };
    Ok(result.or_dirty(cleared_message))
}

/// Stable label for logs; never carries inserted text.
fn action_name(action: &Action) -> &'static str {
    match action {
        Action::Motion(_) => "motion",
        Action::InsertText(_) => "insert_text",
        Action::InsertNewline => "insert_newline",
        Action::DeleteBackward => "delete_backward",
        Action::ToggleSelection => "toggle_selection",
        Action::Copy => "copy",
        Action::Cut => "cut",
        Action::Paste => "paste",
        Action::Undo => "undo",
        Action::Redo => "redo",
        Action::Save => "save",
        Action::Quit => "quit",
    }
}
