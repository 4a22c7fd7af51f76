use std::io;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use clap::Parser;
use ratatui::Terminal;
use ratatui::crossterm::event::{
    self, DisableBracketedPaste, DisableMouseCapture, EnableBracketedPaste, EnableMouseCapture,
    Event,
};
use ratatui::crossterm::execute;
use ratatui::crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::prelude::CrosstermBackend;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing_subscriber::EnvFilter;

use jdmatch_core::config_file::{self, ENDPOINT_ENV};
use jdmatch_core::{HttpMatcher, InputMode, MatchService};

mod action;
mod app;
mod backend;
mod input;
mod model;
mod theme;
mod tui_event;
mod view;

use app::App;

/// Jdmatch TUI - match a resume against a job description from the terminal.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Resume file to upload (PDF)
    #[arg(long, conflicts_with = "resume_text_file")]
    resume: Option<PathBuf>,

    /// Read pasted resume text from this file and start in paste mode
    #[arg(long)]
    resume_text_file: Option<PathBuf>,

    /// Read the job description from this file
    #[arg(long)]
    jd_file: Option<PathBuf>,

    /// Matching service URL (overrides JDMATCH_ENDPOINT and the config file)
    #[arg(long)]
    endpoint: Option<String>,

    /// Color theme: hacker (default) or modern
    #[arg(long)]
    theme: Option<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let args = Args::parse();

    // The terminal belongs to the UI, so logs go to a file.
    let _log_guard = init_logging();

    // Resolve config: CLI flags > env vars > config file > defaults
    let file_config = config_file::load_config();
    let config = file_config.resolve(args.endpoint.clone(), std::env::var(ENDPOINT_ENV).ok());
    let matcher = HttpMatcher::from_config(&config)?;
    tracing::info!(endpoint = %matcher.endpoint(), "jdmatch-tui starting");
    let service: Arc<dyn MatchService> = Arc::new(matcher);

    let theme_name = args
        .theme
        .as_deref()
        .or(file_config.theme())
        .unwrap_or("hacker");
    let mut app = App::new(theme::Theme::by_name(theme_name));

    // Prefill the form from files given on the command line
    if let Some(path) = &args.resume {
        app.resume_path.set(&path.display().to_string());
        app.commit_resume_path();
    }
    if let Some(path) = &args.resume_text_file {
        let text = std::fs::read_to_string(path)
            .map_err(|e| anyhow::anyhow!("could not read {}: {e}", path.display()))?;
        app.form.set_input_mode(InputMode::Text);
        app.resume_text.set(&text);
        app.form.set_resume_text(text);
    }
    if let Some(path) = &args.jd_file {
        let text = std::fs::read_to_string(path)
            .map_err(|e| anyhow::anyhow!("could not read {}: {e}", path.display()))?;
        app.job_description.set(&text);
        app.form.set_job_description(text);
    }

    // Initialize terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(
        stdout,
        EnterAlternateScreen,
        EnableMouseCapture,
        EnableBracketedPaste
    )?;

    // Install panic hook that restores terminal before printing panic
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        let _ = disable_raw_mode();
        let _ = execute!(
            io::stdout(),
            LeaveAlternateScreen,
            DisableMouseCapture,
            DisableBracketedPaste
        );
        original_hook(panic_info);
    }));

    let backend_terminal = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend_terminal)?;

    // Drain any stray input events (e.g. Enter keypress from launching the command)
    while event::poll(Duration::from_millis(50)).unwrap_or(false) {
        let _ = event::read();
    }

    let (event_tx, mut event_rx) = mpsc::unbounded_channel();
    let (cmd_tx, cmd_rx) = mpsc::unbounded_channel::<tui_event::BackendCommand>();
    let cancel = CancellationToken::new();
    app.backend_cmd_tx = Some(cmd_tx);

    tokio::spawn(backend::run_command_loop(
        service,
        cmd_rx,
        event_tx,
        cancel.clone(),
    ));

    // Also handle Ctrl+C at the OS level for clean shutdown
    let cancel_for_signal = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            cancel_for_signal.cancel();
        }
    });

    let fps = file_config.fps().unwrap_or(10);
    let tick_rate = Duration::from_millis(1000 / u64::from(fps));

    loop {
        terminal.draw(|f| app.view(f))?;

        while let Ok(evt) = event_rx.try_recv() {
            app.handle_backend_event(evt);
        }

        if event::poll(tick_rate).unwrap_or(false) {
            match event::read() {
                Ok(Event::Paste(text)) => app.paste(&text),
                Ok(evt) => {
                    let action = input::map_event(&evt, app.key_mode);
                    app.update(action);
                }
                Err(e) => tracing::warn!(error = %e, "failed to read terminal event"),
            }
        }

        app.update(action::Action::Tick);

        if app.should_quit || cancel.is_cancelled() {
            cancel.cancel();
            break;
        }
    }

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture,
        DisableBracketedPaste
    )?;

    Ok(())
}

/// Send tracing output to `<cache>/jdmatch/logs/jdmatch-tui.log`. Logging is
/// skipped when no cache directory exists.
fn init_logging() -> Option<tracing_appender::non_blocking::WorkerGuard> {
    let dir = dirs::cache_dir()?.join("jdmatch").join("logs");
    if let Err(e) = std::fs::create_dir_all(&dir) {
        eprintln!("Warning: could not create log directory {}: {e}", dir.display());
        return None;
    }
    let appender = tracing_appender::rolling::never(dir, "jdmatch-tui.log");
    let (writer, guard) = tracing_appender::non_blocking(appender);
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(writer)
        .with_ansi(false)
        .init();
    Some(guard)
}
