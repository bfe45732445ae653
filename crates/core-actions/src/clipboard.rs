//! Clipboard providers.
//!
//! The system provider wraps `arboard`, which can fail on headless or
//! unusual terminals; `open_clipboard` falls back to the in-memory provider
//! so copy/paste still work inside the session.

use crate::ProviderError;
use core_config::ClipboardProviderKind;
use tracing::{debug, warn};

pub trait ClipboardProvider {
    fn write(&mut self, text: &str) -> Result<(), ProviderError>;
    fn read(&mut self) -> Result<String, ProviderError>;
}

pub struct SystemClipboard {
    inner: arboard::Clipboard,
}

impl SystemClipboard {
    pub fn open() -> Result<Self, ProviderError> {
        let inner = arboard::Clipboard::new()
            .map_err(|e| ProviderError::ClipboardUnavailable(e.to_string()))?;
        Ok(Self { inner })
    }
}

impl std::fmt::Debug for SystemClipboard {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SystemClipboard").finish_non_exhaustive()
    }
}

impl ClipboardProvider for SystemClipboard {
    fn write(&mut self, text: &str) -> Result<(), ProviderError> {
        self.inner
            .set_text(text.to_owned())
            .map_err(|e| ProviderError::ClipboardUnavailable(e.to_string()))?;
        debug!(target: "clipboard", provider = "system", chars = text.chars().count(), "write");
        Ok(())
    }

    fn read(&mut self) -> Result<String, ProviderError> {
        let text = self
            .inner
            .get_text()
            .map_err(|e| ProviderError::ClipboardUnavailable(e.to_string()))?;
        debug!(target: "clipboard", provider = "system", chars = text.chars().count(), "read");
        Ok(text)
    }
}

/// Session-local clipboard. Reading before any write yields an empty string.
#[derive(Debug, Default, Clone)]
pub struct MemoryClipboard {
    contents: String,
}

impl MemoryClipboard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contents(&self) -> &str {
        &self.contents
    }
}

impl ClipboardProvider for MemoryClipboard {
    fn write(&mut self, text: &str) -> Result<(), ProviderError> {
        self.contents.clear();
        self.contents.push_str(text);
        debug!(target: "clipboard", provider = "memory", chars = text.chars().count(), "write");
        Ok(())
    }

    fn read(&mut self) -> Result<String, ProviderError> {
        Ok(self.contents.clone())
    }
}

/// Build the configured provider, falling back to memory when the system
/// clipboard cannot be opened.
pub fn open_clipboard(kind: ClipboardProviderKind) -> Box<dyn ClipboardProvider> {
    match kind {
        ClipboardProviderKind::Memory => Box::new(MemoryClipboard::new()),
        ClipboardProviderKind::System => match SystemClipboard::open() {
            Ok(cb) => Box::new(cb),
            Err(e) => {
                warn!(target: "clipboard", error = %e, "system_unavailable_using_memory");
                Box::new(MemoryClipboard::new())
            }
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn memory_clipboard_round_trip() {
        let mut cb = MemoryClipboard::new();
        assert_eq!(cb.read().unwrap(), "");
        cb.write("one\ntwo").unwrap();
        assert_eq!(cb.read().unwrap(), "one\ntwo");
        cb.write("x").unwrap();
        assert_eq!(cb.contents(), "x");
    }

    #[test]
    fn memory_kind_never_touches_the_system() {
        let mut cb = open_clipboard(ClipboardProviderKind::Memory);
        cb.write("held").unwrap();
        assert_eq!(cb.read().unwrap(), "held");
    }
}
