//! The synchronous editor loop.
//!
//! One event is read, handled to completion, and followed by a full redraw
//! when anything visible changed. A document offset error is fatal: it is
//! logged and returned so the host can restore the terminal and exit.

use anyhow::{Context, Result};
use core_actions::{ClipboardProvider, Persistence, dispatch, translate_key};
use core_events::{Event, InputEvent, KeyEvent};
use core_input::EventSource;
use core_model::EditorModel;
use core_render::{RenderEngine, compose_frame};
use std::fmt;
use std::io::Write;
use tracing::{debug, error, info};

pub(crate) enum LoopControl {
    Continue { redraw: bool },
    Break { reason: ShutdownReason },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ShutdownReason {
    ActionQuit,
    InputClosed,
}

impl ShutdownReason {
    fn as_str(&self) -> &'static str {
        match self {
            ShutdownReason::ActionQuit => "action_quit",
            ShutdownReason::InputClosed => "input_closed",
        }
    }
}

impl fmt::Display for ShutdownReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

pub(crate) struct EditorRuntime<E: EventSource, W: Write> {
    model: EditorModel,
    clipboard: Box<dyn ClipboardProvider>,
    persistence: Box<dyn Persistence>,
    render_engine: RenderEngine,
    events: E,
    out: W,
}

impl<E: EventSource, W: Write> EditorRuntime<E, W> {
    pub(crate) fn new(
        model: EditorModel,
        clipboard: Box<dyn ClipboardProvider>,
        persistence: Box<dyn Persistence>,
        events: E,
        out: W,
    ) -> Self {
        Self {
            model,
            clipboard,
            persistence,
            render_engine: RenderEngine::new(),
            events,
            out,
        }
    }

    pub(crate) fn run(&mut self) -> Result<ShutdownReason> {
        self.render()?;
        let span = tracing::debug_span!(target: "runtime", "event_loop");
        let _enter = span.enter();
        loop {
            let event = self.events.next_event().context("reading terminal input")?;
            let control = match event {
                Event::Input(InputEvent::Key(key)) => self.handle_key(&key)?,
                Event::Input(InputEvent::Resize(w, h)) => self.handle_resize(w, h),
                Event::Shutdown => LoopControl::Break {
                    reason: ShutdownReason::InputClosed,
                },
            };
            match control {
                LoopControl::Break { reason } => {
                    info!(target: "runtime", reason = reason.as_str(), dirty = self.model.state().dirty, "shutdown");
                    return Ok(reason);
                }
                LoopControl::Continue { redraw } => {
                    if redraw {
                        self.render()?;
                    }
                }
            }
        }
    }

    fn handle_key(&mut self, key: &KeyEvent) -> Result<LoopControl> {
        let Some(action) = translate_key(key) else {
            return Ok(LoopControl::Continue { redraw: false });
        };
        match dispatch(
            action,
            &mut self.model,
            &mut *self.clipboard,
            &*self.persistence,
        ) {
            Ok(res) if res.quit => Ok(LoopControl::Break {
                reason: ShutdownReason::ActionQuit,
            }),
            Ok(res) => Ok(LoopControl::Continue { redraw: res.dirty }),
            Err(e) => {
                error!(target: "runtime", error = %e, "fatal_text_error");
                Err(anyhow::Error::new(e).context("editor state is inconsistent"))
            }
        }
    }

    fn handle_resize(&mut self, width: u16, height: u16) -> LoopControl {
        let before = self.model.wrap_width();
        if let Err(e) = self.model.resize(width.into(), height.into()) {
            debug!(target: "runtime", error = %e, "viewport_too_small");
        }
        let wrap = self.model.wrap_width();
        if wrap != before {
            debug!(target: "runtime", before, wrap, "wrap_width_changed");
        }
        LoopControl::Continue { redraw: true }
    }

    fn render(&mut self) -> Result<()> {
        let frame = compose_frame(&self.model);
        self.render_engine.emit(&frame).flush_to(&mut self.out)
    }

    #[cfg(test)]
    pub(crate) fn model(&self) -> &EditorModel {
        &self.model
    }

    #[cfg(test)]
    pub(crate) fn frames_rendered(&self) -> u64 {
        self.render_engine.frames_rendered()
    }
}
