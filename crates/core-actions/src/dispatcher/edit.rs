//! Text edits at the cursor. Each replaces an active selection first.

use super::DispatchResult;
use core_model::EditorModel;
use core_text::TextError;

pub(crate) fn handle_insert(text: &str, model: &mut EditorModel) -> Result<DispatchResult, TextError> {
    if text.is_empty() {
        return Ok(DispatchResult::clean());
    }
    model.insert_text(text)?;
    tracing::trace!(target: "actions.dispatch", op = "insert_text", chars = text.chars().count(), "edit");
    Ok(DispatchResult::dirty())
}

pub(crate) fn handle_newline(model: &mut EditorModel) -> Result<DispatchResult, TextError> {
    model.insert_newline()?;
    let cursor = model.cursor();
    tracing::trace!(target: "actions.dispatch", op = "insert_newline", to_row = cursor.row, to_col = cursor.col, "edit");
    Ok(DispatchResult::dirty())
}

pub(crate) fn handle_backspace(model: &mut EditorModel) -> Result<DispatchResult, TextError> {
    let before_len = model.state().document().len_chars();
    model.delete_backward()?;
    let removed = before_len - model.state().document().len_chars();
    tracing::trace!(target: "actions.dispatch", op = "backspace", removed, "edit");
    Ok(if removed > 0 {
        DispatchResult::dirty()
    } else {
        DispatchResult::clean()
    })
}
