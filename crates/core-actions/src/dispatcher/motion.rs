//! Cursor movement. All rules live in `View::move_to`; this only picks the
//! helper and reports whether anything visible changed.

use super::DispatchResult;
use crate::MotionKind;
use core_model::EditorModel;

pub(crate) fn handle_motion(kind: MotionKind, model: &mut EditorModel) -> DispatchResult {
    let selecting = model.state().selection.is_active();
    let (view, layout) = model.split_view_and_layout();
    let before = (view.cursor(), view.viewport().scroll_offset);
    match kind {
        MotionKind::Left => view.move_left(layout),
        MotionKind::Right => view.move_right(layout),
        MotionKind::Up => view.move_up(layout),
        MotionKind::Down => view.move_down(layout),
        MotionKind::LineStart => view.move_line_start(layout),
        MotionKind::LineEnd => view.move_line_end(layout),
    }
    let after = (view.cursor(), view.viewport().scroll_offset);
    tracing::trace!(target: "actions.dispatch", op = "motion", ?kind, row = after.0.row, col = after.0.col, "motion");
    // Selection highlighting follows the cursor, so a move always repaints then.
    if before != after || selecting {
        DispatchResult::dirty()
    } else {
        DispatchResult::clean()
    }
}
