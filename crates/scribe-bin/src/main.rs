//! Scribe entrypoint.
use anyhow::Result;
use clap::Parser;
use core_actions::{FsPersistence, open_clipboard};
use core_input::TerminalEvents;
use core_terminal::Terminal;
use std::path::{Path, PathBuf};
use std::sync::Once;
use tracing::info;
use tracing_appender::non_blocking::WorkerGuard;

mod bootstrap;
mod runtime;

use bootstrap::load_session;
use runtime::EditorRuntime;

const LOG_FILE: &str = "scribe.log";

/// CLI arguments.
#[derive(Parser, Debug)]
#[command(name = "scribe", version, about = "Scribe plain-text editor")]
struct Args {
    /// File to edit. Created on first save if it does not exist.
    pub path: PathBuf,
    /// Configuration file path (overrides discovery of `scribe.toml`).
    #[arg(long = "config")]
    pub config: Option<PathBuf>,
    /// Write a trace log to `scribe.log` in the working directory.
    #[arg(long)]
    pub debug: bool,
}

struct AppStartup {
    terminal: Terminal,
    log_guard: Option<WorkerGuard>,
}

impl AppStartup {
    fn new() -> Self {
        Self {
            terminal: Terminal::new(),
            log_guard: None,
        }
    }

    fn configure_logging(&mut self) -> Result<()> {
        let log_dir = Path::new(".");
        let log_path = log_dir.join(LOG_FILE);
        if log_path.exists() {
            let _ = std::fs::remove_file(&log_path);
        }

        let file_appender = tracing_appender::rolling::never(log_dir, LOG_FILE);
        let (nb_writer, guard) = tracing_appender::non_blocking(file_appender);
        let filter = tracing_subscriber::EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("debug"));
        match tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_ansi(false)
            .with_writer(nb_writer)
            .try_init()
        {
            Ok(_) => {
                self.log_guard = Some(guard);
            }
            Err(_err) => {
                // Global tracing subscriber already installed; drop guard so writer shuts down.
            }
        }
        Ok(())
    }

    fn install_panic_hook() {
        static HOOK: Once = Once::new();
        HOOK.call_once(|| {
            let default_panic = std::panic::take_hook();
            std::panic::set_hook(Box::new(move |info| {
                tracing::error!(target: "runtime.panic", ?info, "panic");
                default_panic(info);
            }));
        });
    }

    fn run(&mut self, args: Args) -> Result<()> {
        if args.debug {
            self.configure_logging()?;
        }
        Self::install_panic_hook();
        info!(target: "runtime", "startup");

        let size = self.terminal.size()?;
        let boot = load_session(&args.path, args.config, &FsPersistence, size)?;
        let clipboard = open_clipboard(boot.config.clipboard_provider());
        info!(target: "runtime", new_file = boot.new_file, columns = size.0, rows = size.1, "session_ready");

        self.terminal.set_title(&format!("scribe - {}", boot.model.state().display_name))?;
        let _guard = self.terminal.enter_guard()?;
        let mut runtime = EditorRuntime::new(
            boot.model,
            clipboard,
            Box::new(FsPersistence),
            TerminalEvents,
            std::io::stdout(),
        );
        runtime.run()?;
        Ok(())
    }
}

fn main() -> Result<()> {
    let args = Args::parse();
    let mut startup = AppStartup::new();
    startup.run(args)
}
