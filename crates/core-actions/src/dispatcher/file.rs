//! Save the document to its backing file.

use super::DispatchResult;
use crate::Persistence;
use core_model::EditorModel;

pub(crate) fn handle_save(model: &mut EditorModel, persistence: &dyn Persistence) -> DispatchResult {
    let Some(path) = model.state().file_name.clone() else {
        model.state_mut().set_ephemeral("No file name");
        return DispatchResult::dirty();
    };
    let text = model.current_text();
    let state = model.state_mut();
    match persistence.save(&path, &text) {
        Ok(()) => {
            state.dirty = false;
            state.set_ephemeral(format!("Saved {} bytes", text.len()));
        }
        Err(e) => state.set_ephemeral(format!("Save failed: {e}")),
    }
    DispatchResult::dirty()
}
