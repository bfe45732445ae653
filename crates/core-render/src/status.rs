//! Status strip composition.
//!
//! Format: `<col>,<row> | <name>[*] | Selection (Ctrl+Q): <bool>` followed by
//! ` | <message>` while an ephemeral message is pending. Coordinates are the
//! zero-based layout position of the cursor.
//!
//! Two stages: `compose_status` produces ordered segments and `format_status`
//! joins them, so tests can inspect either.

/// What the status strip needs to know about the session.
pub struct StatusContext<'a> {
    pub row: usize,
    pub col: usize,
    pub name: &'a str,
    pub dirty: bool,
    pub selection_active: bool,
    pub ephemeral: Option<&'a str>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StatusSegment<'a> {
    Position { col: usize, row: usize },
    FileName { name: &'a str, dirty: bool },
    Selection(bool),
    Message(&'a str),
}

pub fn compose_status<'a>(ctx: &StatusContext<'a>) -> Vec<StatusSegment<'a>> {
    let mut out = Vec::with_capacity(4);
    out.push(StatusSegment::Position {
        col: ctx.col,
        row: ctx.row,
    });
    out.push(StatusSegment::FileName {
        name: ctx.name,
        dirty: ctx.dirty,
    });
    out.push(StatusSegment::Selection(ctx.selection_active));
    if let Some(msg) = ctx.ephemeral.filter(|m| !m.is_empty()) {
        out.push(StatusSegment::Message(msg));
    }
    out
}

pub fn format_status(segments: &[StatusSegment<'_>]) -> String {
    use std::fmt::Write as _;
    let mut s = String::with_capacity(48);
    for (i, seg) in segments.iter().enumerate() {
        if i > 0 {
            s.push_str(" | ");
        }
        let _ = match seg {
            StatusSegment::Position { col, row } => write!(s, "{col},{row}"),
            StatusSegment::FileName { name, dirty } => {
                write!(s, "{name}{}", if *dirty { "*" } else { "" })
            }
            StatusSegment::Selection(active) => write!(s, "Selection (Ctrl+Q): {active}"),
            StatusSegment::Message(msg) => write!(s, "{msg}"),
        };
    }
    s
}
