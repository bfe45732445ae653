//! Session bootstrap: config, file load, and the initial model.

use anyhow::{Context, Result};
use core_actions::Persistence;
use core_actions::io_ops::display_name;
use core_config::{Config, load_from};
use core_model::EditorModel;
use std::path::{Path, PathBuf};
use tracing::info;

pub(crate) struct EditorBootstrap {
    pub model: EditorModel,
    pub config: Config,
    /// The path did not exist; it will be created on first save.
    pub new_file: bool,
}

pub(crate) fn load_session(
    path: &Path,
    config_path: Option<PathBuf>,
    persistence: &dyn Persistence,
    (columns, rows): (u16, u16),
) -> Result<EditorBootstrap> {
    let config = load_from(config_path)?;

    let loaded = persistence
        .load(path)
        .with_context(|| format!("opening {}", path.display()))?;
    let new_file = loaded.is_none();
    let text = loaded.unwrap_or_default();

    let mut model = EditorModel::load(&text, display_name(path), columns.into(), rows.into());
    model.set_max_wrap(config.max_width().into());
    let state = model.state_mut();
    state.file_name = Some(path.to_path_buf());
    if new_file {
        state.set_ephemeral("New file");
    }
    info!(
        target: "runtime",
        path = %path.display(),
        new_file,
        chars = text.chars().count(),
        wrap = model.wrap_width(),
        config = ?config.source,
        clipboard = ?config.clipboard_provider(),
        "bootstrap_complete"
    );
    Ok(EditorBootstrap {
        model,
        config,
        new_file,
    })
}
