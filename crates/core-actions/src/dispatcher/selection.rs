//! Selection mode toggle.

use super::DispatchResult;
use core_model::EditorModel;

pub(crate) fn handle_toggle(model: &mut EditorModel) -> DispatchResult {
    let active = model.toggle_selection();
    tracing::trace!(target: "actions.dispatch", op = "toggle_selection", active, "selection");
    DispatchResult::dirty()
}
