//! Full-frame render pass.
//!
//! Translates a composed `Frame` into writer commands: one `MoveTo` per row,
//! then runs of cells sharing the same reverse-video state. Every row is
//! painted to the full width so no stale text survives a shrink.

use crate::Frame;
use crate::writer::Writer;

#[derive(Debug, Default)]
pub struct RenderEngine {
    frames: u64,
}

impl RenderEngine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn frames_rendered(&self) -> u64 {
        self.frames
    }

    /// Writer commands for `frame` without touching the terminal.
    pub fn emit(&mut self, frame: &Frame) -> Writer {
        let mut w = Writer::new();
        w.hide_cursor();
        if frame.width == 0 || frame.height == 0 {
            w.clear_all();
        }
        for y in 0..frame.height {
            w.move_to(0, y);
            let mut run = String::new();
            let mut run_reverse = false;
            for cell in frame.row(y) {
                let reverse = cell.flags.is_reverse();
                if reverse != run_reverse && !run.is_empty() {
                    w.print(std::mem::take(&mut run), run_reverse);
                }
                run_reverse = reverse;
                run.push(cell.ch);
            }
            w.print(run, run_reverse);
        }
        if let Some((x, y)) = frame.cursor {
            w.show_cursor_at(x, y);
        }
        self.frames += 1;
        tracing::trace!(target: "render", frame = self.frames, width = frame.width, height = frame.height, cursor = ?frame.cursor, "full_frame");
        w
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compose_frame;
    use crate::writer::Command;
    use core_model::EditorModel;
    use core_text::Position;
    use pretty_assertions::assert_eq;

    #[test]
    fn rows_split_into_reverse_runs() {
        let mut model = EditorModel::load("abcd", "f", 6, 2);
        let (view, layout) = model.split_view_and_layout();
        view.set_position(layout, Position::new(0, 1));
        model.toggle_selection();
        let (view, layout) = model.split_view_and_layout();
        view.set_position(layout, Position::new(0, 2));

        let mut engine = RenderEngine::new();
        let w = engine.emit(&compose_frame(&model));
        let cmds = w.commands();
        assert_eq!(cmds[0], Command::HideCursor);
        assert_eq!(
            &cmds[1..5],
            &[
                Command::MoveTo(0, 0),
                Command::Print("a".into()),
                Command::PrintReverse("bc".into()),
                Command::Print("d  ".into()),
            ]
        );
        // Status row is a single reverse run padded to the width.
        assert_eq!(cmds[5], Command::MoveTo(0, 1));
        match &cmds[6] {
            Command::PrintReverse(s) => assert_eq!(s.chars().count(), 6),
            other => panic!("expected reverse status run, got {other:?}"),
        }
        assert_eq!(cmds.last(), Some(&Command::ShowCursorAt(2, 0)));
        assert_eq!(engine.frames_rendered(), 1);
    }

    #[test]
    fn too_small_frame_hides_cursor() {
        let model = EditorModel::load("abc", "f", 10, 1);
        let w = RenderEngine::new().emit(&compose_frame(&model));
        assert!(
            !w.commands()
                .iter()
                .any(|c| matches!(c, Command::ShowCursorAt(..)))
        );
    }
}
