//! oxed entrypoint.
use anyhow::Result;
use clap::Parser;
use core_actions::handle_key;
use core_config::{Config, load_from};
use core_events::KeySource;
use core_model::EditorModel;
use core_render::{compose_frame, paint};
use core_state::EditorState;
use core_terminal::{
    CrosstermBackend, CrosstermKeySource, TerminalBackend, TerminalSession, session_title,
};
use core_text::Buffer;
use std::io::stdout;
use std::path::{Path, PathBuf};
use std::sync::Once;
use tracing::{error, info, warn};
use tracing_appender::non_blocking::WorkerGuard;

const STATUS_ROWS: u16 = 1;
const LOG_FILE: &str = "oxed.log";

/// CLI arguments.
#[derive(Parser, Debug)]
#[command(name = "oxed", version, about = "Minimal modal text editor")]
struct Args {
    /// File to edit. Created on first write if it does not exist.
    pub path: Option<PathBuf>,
    /// Configuration file path (overrides discovery of `oxed.toml`).
    #[arg(long = "config")]
    pub config: Option<PathBuf>,
}

fn configure_logging() -> Option<WorkerGuard> {
    let log_dir = Path::new(".");
    let log_path = log_dir.join(LOG_FILE);
    if log_path.exists() {
        let _ = std::fs::remove_file(&log_path);
    }

    let file_appender = tracing_appender::rolling::never(log_dir, LOG_FILE);
    let (nb_writer, guard) = tracing_appender::non_blocking(file_appender);
    match tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_ansi(false)
        .with_writer(nb_writer)
        .try_init()
    {
        Ok(_) => Some(guard),
        // Global subscriber already installed; dropping the guard shuts the writer down.
        Err(_) => None,
    }
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

/// Build the initial session from the CLI path and configuration.
fn open_session(path: Option<&Path>, config: &Config) -> EditorState {
    let mut state = match path {
        Some(p) => core_actions::load(p),
        None => EditorState::new(Buffer::new()),
    };
    state.messages.set_capacity(config.message_capacity());
    if state.mixed_line_endings {
        warn!(target: "io", line_ending = ?state.line_ending, "mixed_line_endings_detected_startup");
    }
    info!(
        target: "runtime.startup",
        path = ?state.file_name,
        lines = state.buffer().line_count(),
        config = ?config.source,
        "bootstrap_complete"
    );
    state
}

struct EditorRuntime {
    model: EditorModel,
    config: Config,
}

impl EditorRuntime {
    fn new(state: EditorState, config: Config) -> Self {
        Self {
            model: EditorModel::new(state),
            config,
        }
    }

    /// Render, read one key, dispatch; repeat until a quit is accepted.
    fn run(&mut self, backend: &dyn TerminalBackend, keys: &mut dyn KeySource) -> Result<()> {
        let mut out = stdout();
        loop {
            let (cols, rows) = backend.size()?;
            {
                let (state, view) = self.model.split();
                view.viewport
                    .resize(rows.saturating_sub(STATUS_ROWS) as usize, cols as usize);
                view.resync(state.buffer());
            }
            let frame = compose_frame(&self.model, &self.config, cols, rows);
            paint(&mut out, &frame)?;

            let key = keys.read_key()?;
            let result = handle_key(&mut self.model, key, keys, &self.config)?;
            if result.quit {
                info!(target: "runtime", "quit");
                return Ok(());
            }
        }
    }
}

fn main() -> Result<()> {
    let args = Args::parse();
    let _log_guard = configure_logging();
    install_panic_hook();
    info!(target: "runtime", "startup");

    let config = load_from(args.config.clone())?;
    let state = open_session(args.path.as_deref(), &config);
    let mut runtime = EditorRuntime::new(state, config);

    let name = args
        .path
        .as_deref()
        .and_then(Path::file_name)
        .map(|n| n.to_string_lossy().into_owned());
    let session = TerminalSession::open(CrosstermBackend::new(), &session_title(name.as_deref()))?;
    let result = runtime.run(session.backend(), &mut CrosstermKeySource);
    drop(session);

    if let Err(e) = &result {
        error!(target: "runtime", error = %e, "runtime_failed");
    }
    result
}
