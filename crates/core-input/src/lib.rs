//! Blocking terminal input.
//!
//! One crossterm event is read per call and normalized into
//! [`core_events::Event`]. Key releases and keys the editor has no use for
//! are skipped so the loop only wakes for meaningful input.

use core_events::{Event, InputEvent, KeyCode, KeyEvent, KeyModifiers};
use crossterm::event::{
    self, Event as CEvent, KeyCode as CKeyCode, KeyEvent as CKeyEvent, KeyEventKind as CKind,
    KeyModifiers as CMods,
};
use std::io;

/// Source of editor events. The terminal implementation blocks; tests feed a
/// scripted queue.
pub trait EventSource {
    fn next_event(&mut self) -> io::Result<Event>;
}

/// Reads from the controlling terminal via `crossterm::event::read`.
#[derive(Debug, Default)]
pub struct TerminalEvents;

impl EventSource for TerminalEvents {
    fn next_event(&mut self) -> io::Result<Event> {
        loop {
            let raw = event::read()?;
            if let Some(ev) = translate(raw) {
                return Ok(ev);
            }
        }
    }
}

/// Replays a fixed list of events, then reports `Shutdown`.
#[derive(Debug, Default)]
pub struct ScriptedEvents {
    queue: std::collections::VecDeque<Event>,
}

impl ScriptedEvents {
    pub fn new(events: impl IntoIterator<Item = Event>) -> Self {
        Self {
            queue: events.into_iter().collect(),
        }
    }
}

impl EventSource for ScriptedEvents {
    fn next_event(&mut self) -> io::Result<Event> {
        Ok(self.queue.pop_front().unwrap_or(Event::Shutdown))
    }
}

/// Normalize one crossterm event. Returns `None` for events that carry no
/// editor meaning (mouse, focus, releases, unsupported keys).
pub fn translate(raw: CEvent) -> Option<Event> {
    match raw {
        CEvent::Key(key) => map_key(&key).map(|k| Event::Input(InputEvent::Key(k))),
        CEvent::Resize(w, h) => {
            tracing::debug!(target: "input", width = w, height = h, "resize");
            Some(Event::Input(InputEvent::Resize(w, h)))
        }
        _ => None,
    }
}

pub(crate) fn map_key(key: &CKeyEvent) -> Option<KeyEvent> {
    if matches!(key.kind, CKind::Release) {
        return None;
    }
    let code = match key.code {
        CKeyCode::Char(c) => KeyCode::Char(c),
        CKeyCode::Enter => KeyCode::Enter,
        CKeyCode::Esc => KeyCode::Esc,
        CKeyCode::Backspace => KeyCode::Backspace,
        CKeyCode::Tab => KeyCode::Tab,
        CKeyCode::Up => KeyCode::Up,
        CKeyCode::Down => KeyCode::Down,
        CKeyCode::Left => KeyCode::Left,
        CKeyCode::Right => KeyCode::Right,
        _ => return None,
    };
    let mods = map_mods(key.modifiers);
    log_key(code, mods);
    Some(KeyEvent::new(code, mods))
}

#[inline]
fn log_key(code: KeyCode, mods: KeyModifiers) {
    let printable = matches!(code, KeyCode::Char(_)) && !mods.contains(KeyModifiers::CTRL);
    if printable {
        tracing::trace!(target: "input", printable, "key");
    } else {
        tracing::trace!(target: "input", code = ?code, mods = ?mods, "key");
    }
}

pub(crate) fn map_mods(m: CMods) -> KeyModifiers {
    let mut out = KeyModifiers::empty();
    if m.contains(CMods::CONTROL) {
        out |= KeyModifiers::CTRL;
    }
    if m.contains(CMods::ALT) {
        out |= KeyModifiers::ALT;
    }
    if m.contains(CMods::SHIFT) {
        out |= KeyModifiers::SHIFT;
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyEventState;
    use std::fmt;
    use std::sync::{Arc, Mutex};
    use tracing::Subscriber;
    use tracing::dispatcher::Dispatch;
    use tracing::field::{Field, Visit};
    use tracing_subscriber::layer::Context;
    use tracing_subscriber::layer::Layer;
    use tracing_subscriber::layer::SubscriberExt;
    use tracing_subscriber::registry::Registry;

    fn press(code: CKeyCode, mods: CMods) -> CKeyEvent {
        CKeyEvent {
            code,
            modifiers: mods,
            kind: CKind::Press,
            state: KeyEventState::NONE,
        }
    }

    #[test]
    fn ctrl_char_maps_modifier() {
        let k = map_key(&press(CKeyCode::Char('s'), CMods::CONTROL)).unwrap();
        assert_eq!(k, KeyEvent::ctrl('s'));
    }

    #[test]
    fn release_and_unsupported_keys_are_dropped() {
        let mut release = press(CKeyCode::Char('a'), CMods::NONE);
        release.kind = CKind::Release;
        assert!(map_key(&release).is_none());
        assert!(map_key(&press(CKeyCode::F(5), CMods::NONE)).is_none());
        assert!(translate(CEvent::FocusGained).is_none());
    }

    #[test]
    fn resize_passes_through() {
        assert_eq!(
            translate(CEvent::Resize(100, 40)),
            Some(Event::Input(InputEvent::Resize(100, 40)))
        );
    }

    #[test]
    fn scripted_source_ends_with_shutdown() {
        let mut src = ScriptedEvents::new([Event::Input(InputEvent::Resize(1, 2))]);
        assert_eq!(
            src.next_event().unwrap(),
            Event::Input(InputEvent::Resize(1, 2))
        );
        assert_eq!(src.next_event().unwrap(), Event::Shutdown);
    }

    #[derive(Clone, Default)]
    struct Capture {
        events: Arc<Mutex<Vec<CapturedEvent>>>,
    }

    #[derive(Clone, Debug)]
    struct CapturedEvent {
        target: String,
        fields: Vec<(String, String)>,
    }

    #[derive(Default)]
    struct FieldCollector {
        fields: Vec<(String, String)>,
    }

    impl Visit for FieldCollector {
        fn record_debug(&mut self, field: &Field, value: &dyn fmt::Debug) {
            self.fields
                .push((field.name().to_string(), format!("{:?}", value)));
        }
    }

    impl<S> Layer<S> for Capture
    where
        S: Subscriber,
    {
        fn on_event(&self, event: &tracing::Event<'_>, _ctx: Context<'_, S>) {
            let mut collector = FieldCollector::default();
            event.record(&mut collector);
            let meta = event.metadata();
            self.events.lock().unwrap().push(CapturedEvent {
                target: meta.target().to_string(),
                fields: collector.fields,
            });
        }
    }

    #[test]
    fn typed_characters_are_not_logged() {
        let capture = Capture::default();
        let events = capture.events.clone();
        let dispatch = Dispatch::new(Registry::default().with(capture));

        tracing::dispatcher::with_default(&dispatch, || {
            map_key(&press(CKeyCode::Char('Z'), CMods::SHIFT));
        });

        let events = events.lock().unwrap();
        let event = events
            .iter()
            .find(|e| e.target == "input")
            .expect("missing input event");
        assert!(event.fields.iter().any(|(name, _)| name == "printable"));
        for (_, value) in &event.fields {
            assert!(!value.contains('Z'), "event leaked typed text: {value}");
        }
    }
}
