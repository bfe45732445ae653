//! Copy / cut / paste.
//!
//! Clipboard failures become an ephemeral status message. A cut whose copy
//! step fails leaves the document untouched so no text is lost.

use super::DispatchResult;
use crate::ClipboardProvider;
use core_model::EditorModel;
use core_text::TextError;

pub(crate) fn handle_copy(model: &mut EditorModel, clipboard: &mut dyn ClipboardProvider) -> DispatchResult {
    let Some(text) = model.copy_selection() else {
        return DispatchResult::clean();
    };
    match clipboard.write(&text) {
        Ok(()) => {
            tracing::trace!(target: "actions.dispatch", op = "copy", chars = text.chars().count(), "clipboard");
            DispatchResult::clean()
        }
        Err(e) => report(model, &e),
    }
}

pub(crate) fn handle_cut(
    model: &mut EditorModel,
    clipboard: &mut dyn ClipboardProvider,
) -> Result<DispatchResult, TextError> {
    let Some(text) = model.copy_selection() else {
        return Ok(DispatchResult::clean());
    };
    if let Err(e) = clipboard.write(&text) {
        return Ok(report(model, &e));
    }
    model.cut_selection()?;
    tracing::trace!(target: "actions.dispatch", op = "cut", chars = text.chars().count(), "clipboard");
    Ok(DispatchResult::dirty())
}

pub(crate) fn handle_paste(
    model: &mut EditorModel,
    clipboard: &mut dyn ClipboardProvider,
) -> Result<DispatchResult, TextError> {
    let text = match clipboard.read() {
        Ok(text) => text,
        Err(e) => return Ok(report(model, &e)),
    };
    if text.is_empty() {
        return Ok(DispatchResult::clean());
    }
    model.paste_text(&text)?;
    tracing::trace!(target: "actions.dispatch", op = "paste", chars = text.chars().count(), "clipboard");
    Ok(DispatchResult::dirty())
}

fn report(model: &mut EditorModel, err: &crate::ProviderError) -> DispatchResult {
    tracing::warn!(target: "clipboard", error = %err, "clipboard_failed");
    model.state_mut().set_ephemeral(err.to_string());
    DispatchResult::dirty()
}
