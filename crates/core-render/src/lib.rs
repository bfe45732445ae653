//! Frame assembly and terminal emission.
//!
//! Each redraw is a full frame: `compose_frame` projects the session's
//! [`core_model::VisibleFrame`] and status strip onto a `Frame` grid, then
//! `RenderEngine` walks it row by row through the `Writer`. Columns count
//! chars; one char occupies one terminal cell.
//!
//! Layout of a frame of height `h`:
//! * rows `0..h-1`: visible layout rows, then `~` filler rows;
//! * row `h-1`: the status strip, reverse video, padded to the full width.
//!
//! When the terminal is too small for the text area a one-line notice is
//! drawn instead and the cursor is hidden.

use bitflags::bitflags;
use core_model::{EditorModel, STATUS_ROWS, VisibleFrame};

pub mod render_engine;
pub mod status;
pub mod writer;

pub use render_engine::RenderEngine;

bitflags! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct CellFlags: u8 {
        const SELECTED = 0b0000_0001; // inside the active selection
        const STATUS   = 0b0000_0010; // part of the status strip
        const FILLER   = 0b0000_0100; // `~` marker past the document end
    }
}

impl CellFlags {
    /// Cells drawn in reverse video.
    pub fn is_reverse(self) -> bool {
        self.intersects(CellFlags::SELECTED | CellFlags::STATUS)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cell {
    pub ch: char,
    pub flags: CellFlags,
}

impl Cell {
    pub fn new(ch: char, flags: CellFlags) -> Self {
        Self { ch, flags }
    }
}

impl Default for Cell {
    fn default() -> Self {
        Cell {
            ch: ' ',
            flags: CellFlags::empty(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Frame {
    pub width: u16,
    pub height: u16,
    pub cells: Vec<Cell>,
    /// Terminal cursor cell, or `None` to hide it.
    pub cursor: Option<(u16, u16)>,
}

impl Frame {
    pub fn new(width: u16, height: u16) -> Self {
        Self {
            width,
            height,
            cells: vec![Cell::default(); (width as usize) * (height as usize)],
            cursor: None,
        }
    }

    #[inline]
    fn index(&self, x: u16, y: u16) -> Option<usize> {
        if x < self.width && y < self.height {
            Some(y as usize * self.width as usize + x as usize)
        } else {
            None
        }
    }

    pub fn set(&mut self, x: u16, y: u16, cell: Cell) {
        if let Some(i) = self.index(x, y) {
            self.cells[i] = cell;
        }
    }

    pub fn get(&self, x: u16, y: u16) -> Option<&Cell> {
        self.index(x, y).map(|i| &self.cells[i])
    }

    pub fn row(&self, y: u16) -> &[Cell] {
        let w = self.width as usize;
        let start = (y as usize * w).min(self.cells.len());
        let end = (start + w).min(self.cells.len());
        &self.cells[start..end]
    }

    /// Row text, trailing blanks trimmed.
    pub fn row_text(&self, y: u16) -> String {
        let s: String = self.row(y).iter().map(|c| c.ch).collect();
        s.trim_end().to_string()
    }

    /// Write `text` from column `x`, clipped at the frame edge.
    pub fn put_str(&mut self, x: u16, y: u16, text: &str, flags: CellFlags) {
        for (i, ch) in text.chars().enumerate() {
            let Ok(col) = u16::try_from(x as usize + i) else {
                break;
            };
            if col >= self.width {
                break;
            }
            self.set(col, y, Cell::new(ch, flags));
        }
    }

    /// Fill a whole row with blanks carrying `flags`.
    pub fn fill_row(&mut self, y: u16, flags: CellFlags) {
        for x in 0..self.width {
            self.set(x, y, Cell::new(' ', flags));
        }
    }
}

/// Project the session onto a frame of the session's terminal size.
pub fn compose_frame(model: &EditorModel) -> Frame {
    let (w, h) = model.size();
    let width = u16::try_from(w).unwrap_or(u16::MAX);
    let height = u16::try_from(h).unwrap_or(u16::MAX);
    let mut frame = Frame::new(width, height);
    match model.visible_rows() {
        Ok(visible) => {
            paint_text_area(&mut frame, &visible);
            paint_status(&mut frame, model);
        }
        Err(e) => {
            tracing::debug!(target: "render", width, height, "viewport_too_small");
            frame.put_str(0, 0, &e.to_string(), CellFlags::empty());
        }
    }
    frame
}

fn paint_text_area(frame: &mut Frame, visible: &VisibleFrame) {
    let mut y: u16 = 0;
    for row in &visible.rows {
        for (x, cell) in row.cells.iter().enumerate() {
            let Ok(x) = u16::try_from(x) else { break };
            let flags = if cell.selected {
                CellFlags::SELECTED
            } else {
                CellFlags::empty()
            };
            frame.set(x, y, Cell::new(cell.ch, flags));
        }
        y = y.saturating_add(1);
    }
    for _ in 0..visible.filler_rows {
        frame.set(0, y, Cell::new('~', CellFlags::FILLER));
        y = y.saturating_add(1);
    }
    let (cx, cy) = visible.cursor_screen;
    frame.cursor = Some((
        u16::try_from(cx).unwrap_or(u16::MAX),
        u16::try_from(cy).unwrap_or(u16::MAX),
    ));
}

fn paint_status(frame: &mut Frame, model: &EditorModel) {
    let Some(y) = frame.height.checked_sub(STATUS_ROWS as u16) else {
        return;
    };
    let state = model.state();
    let cursor = model.cursor();
    let ctx = status::StatusContext {
        row: cursor.row,
        col: cursor.col,
        name: &state.display_name,
        dirty: state.dirty,
        selection_active: state.selection.is_active(),
        ephemeral: state.ephemeral_status.as_ref().map(|m| m.text.as_str()),
    };
    let line = status::format_status(&status::compose_status(&ctx));
    frame.fill_row(y, CellFlags::STATUS);
    frame.put_str(0, y, &line, CellFlags::STATUS);
}
