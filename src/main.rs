//! artworks-tui - a terminal table for the Art Institute of Chicago catalog
//!
//! Loads configuration, sets up logging and the terminal, then runs the event
//! loop: spawn pending fetches, apply finished ones, draw, handle the next
//! input event.

use std::io::{self, Stdout};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::Parser;
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tracing::{debug, error, info};

use artworks_tui::api::ArticClient;
use artworks_tui::app::App;
use artworks_tui::config::Config;
use artworks_tui::error::{AppError, Result};
use artworks_tui::events::EventHandler;
use artworks_tui::logging;
use artworks_tui::tasks::create_task_channel;

type Tui = Terminal<CrosstermBackend<Stdout>>;

#[derive(Parser)]
#[command(name = "artworks-tui", version)]
#[command(about = "Browse and select artworks from the Art Institute of Chicago", long_about = None)]
struct Cli {
    /// API base URL (overrides the config file)
    #[arg(long, value_name = "URL")]
    base_url: Option<String>,

    /// Request timeout in seconds (overrides the config file)
    #[arg(long, value_name = "SECS")]
    timeout: Option<u64>,

    /// Read configuration from this file instead of the default location
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Write log files to this directory (overrides the config file)
    #[arg(long, value_name = "DIR")]
    log_dir: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    // Logging follows the config, so a config error can only go to stderr
    let config = match load_config(cli) {
        Ok(config) => config,
        Err(e) => return report(&e, None),
    };

    let log_dir = match logging::init(&config.settings) {
        Ok(dir) => Some(dir),
        Err(e) => {
            eprintln!("Warning: could not initialize logging: {:#}", e);
            None
        }
    };

    let result = run(config);
    logging::shutdown();

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!(error = %e, "Exiting with error");
            report(&e, log_dir.as_deref())
        }
    }
}

/// Print a fatal error for the user.
fn report(e: &AppError, log_dir: Option<&Path>) -> ExitCode {
    eprintln!("Error: {}", e.user_message());
    if let Some(action) = e.suggested_action() {
        eprintln!("{}", action);
    }
    if let Some(dir) = log_dir {
        eprintln!("Logs: {}", dir.display());
    }
    ExitCode::FAILURE
}

/// Load the configuration file and apply command-line overrides.
fn load_config(cli: Cli) -> Result<Config> {
    let mut config = match &cli.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };
    config.apply_overrides(cli.base_url, cli.timeout, cli.log_dir)?;
    Ok(config)
}

/// Build the client and run the UI until the user quits.
fn run(config: Config) -> Result<()> {
    let client = ArticClient::new(&config.settings)?;
    info!(base_url = client.base_url(), "Catalog client ready");

    let events = EventHandler::with_tick_rate(config.settings.tick_rate_ms);
    let mut app = App::with_config(config);

    let mut terminal = setup_terminal()?;
    let result = run_loop(&mut terminal, &mut app, &client, &events);
    restore_terminal(&mut terminal)?;
    result
}

/// The main event loop.
fn run_loop(
    terminal: &mut Tui,
    app: &mut App,
    client: &ArticClient,
    events: &EventHandler,
) -> Result<()> {
    let (mut rx, spawner) = create_task_channel();

    while !app.should_quit() {
        if let Some(request) = app.take_pending_fetch() {
            debug!(page = request.page, request_id = request.request_id, "Spawning fetch");
            spawner.spawn_fetch_artworks(client, request);
        }

        while let Ok(message) = rx.try_recv() {
            app.handle_api_message(message);
        }

        terminal.draw(|frame| app.view(frame))?;

        let event = events.next()?;
        app.update(event);
    }

    Ok(())
}

/// Enter raw mode and the alternate screen.
fn setup_terminal() -> Result<Tui> {
    enable_raw_mode().map_err(|e| AppError::terminal(format!("cannot enable raw mode: {}", e)))?;
    execute!(io::stdout(), EnterAlternateScreen)
        .map_err(|e| AppError::terminal(format!("cannot enter alternate screen: {}", e)))?;

    // Put the terminal back before the panic message is printed
    let default_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
        default_hook(info);
    }));

    let terminal = Terminal::new(CrosstermBackend::new(io::stdout()))?;
    debug!("Terminal initialized");
    Ok(terminal)
}

/// Leave the alternate screen and raw mode.
fn restore_terminal(terminal: &mut Tui) -> Result<()> {
    disable_raw_mode()
        .map_err(|e| AppError::terminal(format!("cannot disable raw mode: {}", e)))?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;
    debug!("Terminal restored");
    Ok(())
}
