//! Configuration loading and parsing.
//!
//! Parses `scribe.toml` (or an override path provided by the binary):
//!
//! ```toml
//! [layout]
//! max_width = 72        # 0 = wrap at the terminal width
//!
//! [clipboard]
//! provider = "system"   # or "memory"
//! ```
//!
//! The wrap cap is handed to the editor model as parsed; the model combines it
//! with the terminal width on every resize. Unknown fields are ignored and a
//! malformed file falls back to defaults so a bad config never prevents
//! editing.

use anyhow::Result;
use serde::Deserialize;
use std::{fs, path::PathBuf};
use tracing::{info, warn};

pub const CONFIG_FILE_NAME: &str = "scribe.toml";

#[derive(Debug, Deserialize, Default, Clone)]
pub struct LayoutConfig {
    #[serde(default)]
    pub max_width: u16,
}

/// Which clipboard backend the editor should try first.
#[derive(Debug, Deserialize, Default, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ClipboardProviderKind {
    #[default]
    System,
    Memory,
}

#[derive(Debug, Deserialize, Default, Clone)]
pub struct ClipboardConfig {
    #[serde(default)]
    pub provider: ClipboardProviderKind,
}

#[derive(Debug, Deserialize, Default, Clone)]
pub struct ConfigFile {
    #[serde(default)]
    pub layout: LayoutConfig,
    #[serde(default)]
    pub clipboard: ClipboardConfig,
}

#[derive(Debug, Clone, Default)]
pub struct Config {
    pub file: ConfigFile,
    /// Where the settings came from; `None` when running on defaults.
    pub source: Option<PathBuf>,
}

/// Local `scribe.toml` first, then the platform config dir.
pub fn discover() -> PathBuf {
    let local = PathBuf::from(CONFIG_FILE_NAME);
    if local.exists() {
        return local;
    }
    if let Some(dir) = dirs::config_dir() {
        return dir.join("scribe").join(CONFIG_FILE_NAME);
    }
    local
}

pub fn load_from(path: Option<PathBuf>) -> Result<Config> {
    let path = path.unwrap_or_else(discover);
    let Ok(content) = fs::read_to_string(&path) else {
        return Ok(Config::default());
    };
    match toml::from_str::<ConfigFile>(&content) {
        Ok(file) => {
            info!(target: "config", path = %path.display(), "loaded");
            Ok(Config {
                file,
                source: Some(path),
            })
        }
        Err(e) => {
            warn!(target: "config", path = %path.display(), error = %e, "parse_failed_using_defaults");
            Ok(Config::default())
        }
    }
}

impl Config {
    pub fn clipboard_provider(&self) -> ClipboardProviderKind {
        self.file.clipboard.provider
    }

    /// Wrap cap in columns; 0 wraps at the terminal width.
    pub fn max_width(&self) -> u16 {
        self.file.layout.max_width
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use std::path::PathBuf;
    use std::sync::{Arc, Mutex, MutexGuard};
    use tracing::Level;
    use tracing::subscriber::with_default;
    use tracing_subscriber::fmt::MakeWriter;

    #[derive(Clone)]
    struct BufferWriter {
        inner: Arc<Mutex<Vec<u8>>>,
    }

    impl BufferWriter {
        fn new() -> (Self, Arc<Mutex<Vec<u8>>>) {
            let buf = Arc::new(Mutex::new(Vec::new()));
            (Self { inner: buf.clone() }, buf)
        }
    }

    struct LockedWriter<'a> {
        guard: MutexGuard<'a, Vec<u8>>,
    }

    impl<'a> Write for LockedWriter<'a> {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.guard.extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    impl<'a> MakeWriter<'a> for BufferWriter {
        type Writer = LockedWriter<'a>;

        fn make_writer(&'a self) -> Self::Writer {
            LockedWriter {
                guard: self.inner.lock().expect("log buffer poisoned"),
            }
        }
    }

    fn config_with(body: &str) -> Config {
        let tmp = tempfile::NamedTempFile::new().unwrap();
        std::fs::write(tmp.path(), body).unwrap();
        load_from(Some(tmp.path().to_path_buf())).unwrap()
    }

    #[test]
    fn default_config_when_missing_file() {
        let cfg = load_from(Some(PathBuf::from("__nonexistent_hopefully__.toml"))).unwrap();
        assert_eq!(cfg.file.layout.max_width, 0);
        assert_eq!(cfg.clipboard_provider(), ClipboardProviderKind::System);
        assert!(cfg.source.is_none());
    }

    #[test]
    fn parses_layout_and_clipboard_sections() {
        let cfg = config_with("[layout]\nmax_width = 72\n[clipboard]\nprovider = \"memory\"\n");
        assert_eq!(cfg.file.layout.max_width, 72);
        assert_eq!(cfg.clipboard_provider(), ClipboardProviderKind::Memory);
    }

    #[test]
    fn malformed_file_falls_back_to_defaults() {
        let cfg = config_with("[layout\nmax_width = = 3");
        assert_eq!(cfg.file.layout.max_width, 0);
        assert!(cfg.source.is_none());
    }

    #[test]
    fn unknown_provider_is_a_parse_error_and_falls_back() {
        let cfg = config_with("[clipboard]\nprovider = \"carrier-pigeon\"\n");
        assert_eq!(cfg.clipboard_provider(), ClipboardProviderKind::System);
    }

    #[test]
    fn loaded_config_remembers_its_path() {
        let cfg = config_with("[layout]\nmax_width = 60\n");
        assert_eq!(cfg.max_width(), 60);
        assert!(cfg.source.is_some());
    }

    #[test]
    fn parse_failure_is_logged_under_config_target() {
        let tmp = tempfile::NamedTempFile::new().unwrap();
        std::fs::write(tmp.path(), "[layout]\nmax_width = \"wide\"\n").unwrap();
        let (writer, buffer) = BufferWriter::new();
        let subscriber = tracing_subscriber::fmt()
            .with_max_level(Level::INFO)
            .with_target(true)
            .with_ansi(false)
            .without_time()
            .with_writer(writer)
            .finish();

        let cfg = with_default(subscriber, || load_from(Some(tmp.path().to_path_buf())).unwrap());

        let log_output = String::from_utf8(buffer.lock().unwrap().clone()).unwrap();
        assert!(log_output.contains("WARN config:"));
        assert!(log_output.contains("parse_failed_using_defaults"));
        assert_eq!(cfg.max_width(), 0);
    }
}
