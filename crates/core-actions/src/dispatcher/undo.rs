//! Undo / Redo dispatch over the history tree.

use super::DispatchResult;
use core_model::EditorModel;
use core_text::TextError;

pub(crate) fn handle_undo(model: &mut EditorModel) -> Result<DispatchResult, TextError> {
    let applied = model.undo()?;
    tracing::trace!(target: "actions.dispatch", op = "undo", applied, "undo");
    Ok(if applied {
        DispatchResult::dirty()
    } else {
        DispatchResult::clean()
    })
}

pub(crate) fn handle_redo(model: &mut EditorModel) -> Result<DispatchResult, TextError> {
    let applied = model.redo()?;
    tracing::trace!(target: "actions.dispatch", op = "redo", applied, "redo");
    Ok(if applied {
        DispatchResult::dirty()
    } else {
        DispatchResult::clean()
    })
}
