mod actions;
mod app;
mod input;
mod surface;
mod view;

use anyhow::{Context, Result};
use app::{App, UiLocale};
use crossterm::event::{self, Event as CEvent, KeyEventKind};
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use crossterm::{execute, ExecutableCommand};
use ratatui::backend::{Backend, CrosstermBackend};
use ratatui::Terminal;
use sp21_client::HttpEngine;
use sp21_core::Engine;
use sp21_data::{apply_overrides, env_overrides, load_catalog, load_client_config, ConfigOverrides};
use std::fs::OpenOptions;
use std::io::{self, stdout, IsTerminal};
use std::path::PathBuf;
use std::sync::Mutex;
use std::time::Duration;
use surface::{Surface, UiState};
use tracing::info;
use tracing_subscriber::EnvFilter;

const DEFAULT_ASSETS_DIR: &str = "assets";
const LOG_FILTER_ENV: &str = "SP21_LOG";
const LOG_FILE_ENV: &str = "SP21_LOG_FILE";
const DEFAULT_LOG_FILE: &str = "sp21.log";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LaunchOptions {
    pub engine_url: Option<String>,
    pub locale: Option<String>,
    pub assets_dir: Option<PathBuf>,
}

pub fn run(options: LaunchOptions) -> Result<()> {
    init_tracing()?;

    let assets = options
        .assets_dir
        .clone()
        .unwrap_or_else(|| PathBuf::from(DEFAULT_ASSETS_DIR));
    let catalog = load_catalog(&assets).context("load special card catalog")?;
    let file_config = load_client_config(&assets).context("load client config")?;
    let flags = ConfigOverrides {
        engine_url: options.engine_url,
        locale: options.locale,
    };
    let config = apply_overrides(file_config, env_overrides().then(flags))?;
    let engine = HttpEngine::new(&config.engine_url, config.timeout_secs.map(Duration::from_secs))
        .context("create engine client")?;
    let locale = UiLocale::from_opt(config.locale.as_deref());
    info!(engine = %engine.base_url(), locale = locale.code(), "starting table client");

    ensure_interactive_terminal()?;

    enable_raw_mode().map_err(|err| {
        anyhow::anyhow!(
            "failed to enable raw mode; ensure the process owns an interactive terminal: {err}"
        )
    })?;
    let mut stdout = stdout();
    stdout
        .execute(EnterAlternateScreen)
        .context("enter alternate screen")?;
    let backend = CrosstermBackend::new(stdout);
    let terminal = Terminal::new(backend).context("create terminal")?;
    let surface = Surface::new(terminal, UiState::new(locale, config.engine_url.clone()));
    let mut app = App::new(engine, catalog, surface);

    let run_result = run_loop(&mut app);
    restore_terminal(app.table.shell_mut().terminal_mut())?;
    run_result
}

pub fn run_with_args(args: &[String]) -> Result<()> {
    let options = parse_options(args);
    run(options)
}

fn parse_options(args: &[String]) -> LaunchOptions {
    let mut options = LaunchOptions::default();
    let mut idx = 0usize;
    while idx < args.len() {
        match args[idx].as_str() {
            "--engine" | "-e" => {
                if let Some(value) = args.get(idx + 1) {
                    options.engine_url = Some(value.clone());
                    idx += 1;
                }
            }
            "--lang" | "-l" => {
                if let Some(value) = args.get(idx + 1) {
                    options.locale = Some(value.clone());
                    idx += 1;
                }
            }
            "--assets" | "-a" => {
                if let Some(value) = args.get(idx + 1) {
                    options.assets_dir = Some(PathBuf::from(value));
                    idx += 1;
                }
            }
            _ => {}
        }
        idx += 1;
    }
    options
}

/// Logs go to a file; the terminal belongs to the alternate screen.
fn init_tracing() -> Result<()> {
    let path = std::env::var(LOG_FILE_ENV).unwrap_or_else(|_| DEFAULT_LOG_FILE.to_string());
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .with_context(|| format!("open log file {path}"))?;
    let filter = EnvFilter::try_from_env(LOG_FILTER_ENV).unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .try_init()
        .map_err(|err| anyhow::anyhow!(err))
        .context("install tracing subscriber")?;
    Ok(())
}

fn run_loop<E: Engine, B: Backend>(app: &mut App<E, B>) -> Result<()> {
    let tick_rate = Duration::from_millis(120);
    while !app.should_quit {
        app.redraw();
        if event::poll(tick_rate)? {
            if let CEvent::Key(key) = event::read()? {
                if key.kind != KeyEventKind::Press {
                    continue;
                }
                let action = input::map_key(key);
                actions::dispatch(app, action);
            }
        }
    }
    Ok(())
}

fn restore_terminal(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>) -> Result<()> {
    disable_raw_mode().context("disable raw mode")?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen).context("leave alternate screen")?;
    terminal.show_cursor().context("show cursor")?;
    Ok(())
}

fn ensure_interactive_terminal() -> Result<()> {
    if io::stdin().is_terminal() && io::stdout().is_terminal() {
        return Ok(());
    }
    anyhow::bail!(
        "sp21-cui requires an interactive TTY (run directly in a terminal, not a piped/headless shell)"
    );
}
