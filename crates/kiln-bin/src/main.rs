//! kiln entrypoint.
use anyhow::{Context, Result};
use clap::Parser;
use core_actions::{Dispatcher, open_file};
use core_config::Config;
use core_input::KeyDecoder;
use core_render::RenderEngine;
use core_state::{EditorState, STATUS_ROWS};
use core_terminal::{CrosstermBackend, StdinBytes, ioctl_size, restore_terminal, window_size};
use core_text::RowStore;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::sync::Once;
use tracing::{error, info};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

const LOG_FILE: &str = "kiln.log";
const DEFAULT_LOG_FILTER: &str = "info";
const HELP_MESSAGE: &str = "HELP: Ctrl-S = save | Ctrl-Q = quit | Ctrl-F = find";

/// CLI arguments.
#[derive(Parser, Debug)]
#[command(name = "kiln", version, about = "A small terminal text editor")]
struct Args {
    /// File to open at startup. Without it an empty unnamed buffer is used.
    pub path: Option<PathBuf>,
    /// Configuration file (TOML). Defaults apply when omitted.
    #[arg(long = "config")]
    pub config: Option<PathBuf>,
}

/// `KILN_LOG` wins over `RUST_LOG`; blank values fall through to the default.
fn filter_directive(kiln_log: Option<String>, rust_log: Option<String>) -> String {
    [kiln_log, rust_log]
        .into_iter()
        .flatten()
        .find(|d| !d.trim().is_empty())
        .unwrap_or_else(|| DEFAULT_LOG_FILTER.to_string())
}

fn configure_logging() -> Option<WorkerGuard> {
    let log_dir = Path::new(".");
    let log_path = log_dir.join(LOG_FILE);
    if log_path.exists() {
        let _ = std::fs::remove_file(&log_path);
    }

    let directive = filter_directive(
        std::env::var("KILN_LOG").ok(),
        std::env::var("RUST_LOG").ok(),
    );
    let filter = EnvFilter::try_new(&directive).unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));

    let file_appender = tracing_appender::rolling::never(log_dir, LOG_FILE);
    let (nb_writer, guard) = tracing_appender::non_blocking(file_appender);
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_ansi(false)
        .with_writer(nb_writer)
        .try_init()
        .ok()
        .map(|_| guard)
}

fn install_panic_hook() {
    static HOOK: Once = Once::new();
    HOOK.call_once(|| {
        let default_panic = std::panic::take_hook();
        std::panic::set_hook(Box::new(move |info| {
            restore_terminal();
            tracing::error!(target: "runtime.panic", ?info, "panic");
            default_panic(info);
        }));
    });
}

/// Build the initial editor state from configuration and the optional path.
fn load_editor_state(args: &Args, config: &Config) -> Result<EditorState> {
    let mut state = EditorState::new(RowStore::new(config.tab_stop()));
    state.message_ttl = config.message_timeout();
    if let Some(path) = args.path.as_deref() {
        open_file(&mut state, path).with_context(|| format!("cannot open {}", path.display()))?;
    }
    state.set_ephemeral(HELP_MESSAGE);
    Ok(state)
}

struct EditorRuntime {
    state: EditorState,
    config: Config,
    dispatcher: Dispatcher,
    engine: RenderEngine,
    decoder: KeyDecoder<StdinBytes>,
    screen: Option<(u16, u16)>,
}

impl EditorRuntime {
    fn new(state: EditorState, config: Config) -> Self {
        Self {
            dispatcher: Dispatcher::new(config.quit_times()),
            state,
            config,
            engine: RenderEngine::new(),
            decoder: KeyDecoder::new(StdinBytes::new()),
            screen: None,
        }
    }

    /// Apply a terminal size when it differs from the current one.
    fn apply_screen_size(&mut self, size: (u16, u16)) {
        if self.screen == Some(size) {
            return;
        }
        let (rows, cols) = size;
        self.state.set_screen_size(rows as usize, cols as usize);
        let text_rows = rows.saturating_sub(STATUS_ROWS as u16);
        if let Some(margin) = self.config.recompute_after_resize(text_rows) {
            self.state.scroll_margin = margin as usize;
        }
        info!(target: "runtime", rows, cols, "screen_size");
        self.screen = Some(size);
    }

    fn run(&mut self) -> Result<()> {
        let stdout = std::io::stdout();
        let mut out = stdout.lock();
        let initial = window_size(&mut self.decoder, &mut out)?;
        self.apply_screen_size(initial);
        loop {
            // Resize checks never read stdin; a failed query keeps the last size.
            if let Some(size) = ioctl_size() {
                self.apply_screen_size(size);
            }
            self.engine
                .render(&mut self.state, &mut out)
                .context("failed to draw frame")?;
            let key = self.decoder.read_key()?;
            if self.dispatcher.handle_key(key, &mut self.state).quit {
                info!(target: "runtime", frames = self.engine.frames(), "shutdown");
                return Ok(());
            }
        }
    }
}

fn run(args: &Args, backend: &mut CrosstermBackend) -> Result<()> {
    let config = core_config::load_from(args.config.as_deref())?;
    let _guard = backend.enter_guard()?;
    let state = load_editor_state(args, &config)?;
    info!(
        target: "runtime",
        path = args.path.as_ref().map(|p| p.display().to_string()),
        config = config.source.as_ref().map(|p| p.display().to_string()),
        tab_stop = config.tab_stop(),
        "startup"
    );
    EditorRuntime::new(state, config).run()
}

fn main() -> ExitCode {
    let args = Args::parse();
    let _log_guard = configure_logging();
    install_panic_hook();

    let mut backend = CrosstermBackend::new();
    let result = run(&args, &mut backend);
    drop(backend);

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!(target: "runtime", error = ?err, "fatal");
            eprintln!("kiln: {err:#}");
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kiln_log_takes_precedence() {
        assert_eq!(
            filter_directive(Some("debug".into()), Some("warn".into())),
            "debug"
        );
        assert_eq!(filter_directive(None, Some("warn".into())), "warn");
        assert_eq!(filter_directive(Some("  ".into()), None), DEFAULT_LOG_FILTER);
        assert_eq!(filter_directive(None, None), DEFAULT_LOG_FILTER);
    }

    #[test]
    fn args_parse_path_and_config() {
        let args = Args::try_parse_from(["kiln", "main.c", "--config", "k.toml"]).unwrap();
        assert_eq!(args.path.as_deref(), Some(Path::new("main.c")));
        assert_eq!(args.config.as_deref(), Some(Path::new("k.toml")));
        let args = Args::try_parse_from(["kiln"]).unwrap();
        assert!(args.path.is_none());
    }

    #[test]
    fn initial_state_uses_config_and_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("a.rs");
        std::fs::write(&path, "fn main() {}\n").unwrap();
        let config = Config {
            file: core_config::from_toml_str("[editor]\ntab_stop = 8\nmessage_timeout_secs = 2\n")
                .unwrap(),
            ..Config::default()
        };
        let args = Args {
            path: Some(path),
            config: None,
        };
        let state = load_editor_state(&args, &config).unwrap();
        assert_eq!(state.rows.tab_stop(), 8);
        assert_eq!(state.message_ttl, std::time::Duration::from_secs(2));
        assert_eq!(state.file_type(), Some("rust"));
        assert_eq!(
            state.visible_status(std::time::Instant::now()),
            Some(HELP_MESSAGE)
        );
    }

    #[test]
    fn screen_size_updates_viewport_and_margin() {
        let config = Config {
            file: core_config::from_toml_str("[scroll.margin]\nvertical = 10\n").unwrap(),
            ..Config::default()
        };
        let mut rt = EditorRuntime::new(EditorState::default(), config);
        rt.apply_screen_size((50, 120));
        assert_eq!(rt.state.viewport.height, 48);
        assert_eq!(rt.state.viewport.width, 120);
        assert_eq!(rt.state.scroll_margin, 10);

        rt.apply_screen_size((12, 40));
        assert_eq!(rt.state.viewport.height, 10);
        assert_eq!(rt.state.scroll_margin, 4);

        rt.apply_screen_size((12, 40));
        assert_eq!(rt.screen, Some((12, 40)));
        assert_eq!(rt.state.scroll_margin, 4);
    }

    #[test]
    fn missing_file_is_fatal() {
        let dir = tempfile::tempdir().unwrap();
        let args = Args {
            path: Some(dir.path().join("absent.txt")),
            config: None,
        };
        let err = load_editor_state(&args, &Config::default()).unwrap_err();
        assert!(format!("{err:#}").starts_with("cannot open "));
    }
}
