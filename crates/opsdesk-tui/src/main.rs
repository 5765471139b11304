//! opsdesk - a terminal client for a role-based ERP/CRM backend.
//!
//! The shell signs users in, keeps their session alive across restarts, and
//! shows each role the menu and pages it is allowed to see.

mod app;
mod ui;
mod utils;

use std::io::{self, Write};
use std::path::PathBuf;
use std::time::Duration;

use anyhow::Result;
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tracing::{info, warn};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use opsdesk_core::config::{Config, TokenBackend, ENV_EMAIL, ENV_PASSWORD};
use opsdesk_core::SessionStatus;

use app::{App, AppState};
use ui::icons::{AsciiIcons, IconRegistry, SymbolIcons};
use ui::input::handle_input;
use ui::render::render;

// ============================================================================
// Constants
// ============================================================================

/// Timeout for polling terminal events (in milliseconds)
const EVENT_POLL_TIMEOUT_MS: u64 = 100;

const LOG_FILE_PREFIX: &str = "opsdesk.log";

const USAGE: &str = "\
Usage: opsdesk [OPTIONS]

Options:
  --login       Sign in from the command line and store the token
  --logout      Forget the stored token
  --whoami      Show who the stored token belongs to
  --ephemeral   Keep the token in memory only for this run
  --ascii       Use ASCII menu icons
  -h, --help    Show this help";

/// Command-line switches.
#[derive(Debug, Default)]
struct Cli {
    login: bool,
    logout: bool,
    whoami: bool,
    ephemeral: bool,
    ascii: bool,
    help: bool,
}

impl Cli {
    fn parse(args: impl Iterator<Item = String>) -> Result<Self> {
        let mut cli = Cli::default();
        for arg in args {
            match arg.as_str() {
                "--login" => cli.login = true,
                "--logout" => cli.logout = true,
                "--whoami" => cli.whoami = true,
                "--ephemeral" => cli.ephemeral = true,
                "--ascii" => cli.ascii = true,
                "-h" | "--help" => cli.help = true,
                other => anyhow::bail!("Unknown option '{}'\n\n{}", other, USAGE),
            }
        }
        Ok(cli)
    }
}

/// Log to a daily file; the terminal belongs to the UI.
/// Use RUST_LOG to control the level (e.g., RUST_LOG=opsdesk_core=debug).
fn init_tracing(log_dir: PathBuf) -> WorkerGuard {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let file_appender = tracing_appender::rolling::daily(log_dir, LOG_FILE_PREFIX);
    let (writer, guard) = tracing_appender::non_blocking(file_appender);

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(writer).with_ansi(false))
        .with(filter)
        .init();

    guard
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present (silently ignore if not found)
    let _ = dotenvy::dotenv();

    let cli = Cli::parse(std::env::args().skip(1))?;
    if cli.help {
        println!("{}", USAGE);
        return Ok(());
    }

    let mut config = match Config::load() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Warning: failed to load config ({}), using defaults", e);
            Config::default()
        }
    };
    if cli.ephemeral {
        config.token_backend = TokenBackend::Memory;
    }

    let log_dir = config
        .data_dir()
        .map(|dir| dir.join("logs"))
        .unwrap_or_else(|_| PathBuf::from("./logs"));
    let _log_guard = init_tracing(log_dir);
    info!(base_url = %config.base_url(), "opsdesk starting");

    let icons: Box<dyn IconRegistry> = if cli.ascii {
        Box::new(AsciiIcons)
    } else {
        Box::new(SymbolIcons)
    };
    let mut app = App::new(config, icons)?;

    if cli.login {
        return login_interactive(&mut app).await;
    }
    if cli.logout {
        app.session().sign_out();
        println!("Signed out.");
        return Ok(());
    }
    if cli.whoami {
        return whoami(&app).await;
    }

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    app.start();

    // Main loop
    let result = run_app(&mut terminal, &mut app).await;

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    if let Err(e) = result {
        eprintln!("Error: {}", e);
    }

    info!("opsdesk shutting down");
    Ok(())
}

/// Sign in from the command line (used by `--login`).
async fn login_interactive(app: &mut App) -> Result<()> {
    println!("\n=== opsdesk sign-in ({}) ===\n", app.config.base_url());

    let default_email = std::env::var(ENV_EMAIL).ok().or_else(|| app.config.last_email.clone());
    let email = prompt_email(default_email.as_deref())?;
    let password = match std::env::var(ENV_PASSWORD) {
        Ok(password) if !password.is_empty() => password,
        _ => rpassword::prompt_password("Password: ")?,
    };

    println!("\nAuthenticating...");
    let session = app.session().sign_in(&email, &password).await?;

    app.config.last_email = Some(session.email.clone());
    if let Err(e) = app.config.save() {
        warn!(error = %e, "Failed to save config");
    }

    println!("Signed in as {} ({}).\n", session.label(), session.role);
    Ok(())
}

fn prompt_email(default: Option<&str>) -> Result<String> {
    match default {
        Some(last) => print!("Email [{}]: ", last),
        None => print!("Email: "),
    }
    io::stdout().flush()?;

    let mut input = String::new();
    io::stdin().read_line(&mut input)?;
    let input = input.trim();

    Ok(match default {
        Some(last) if input.is_empty() => last.to_string(),
        _ => input.to_string(),
    })
}

/// Validate the stored token and report whose it is (used by `--whoami`).
async fn whoami(app: &App) -> Result<()> {
    match app.session().initialize().await {
        SessionStatus::Authenticated => {
            if let Some(session) = app.session().current_session() {
                println!("{} <{}>", session.label(), session.email);
                println!("role: {}", session.role);
                println!("user id: {}", session.user_id);
            }
        }
        _ => {
            let snapshot = app.snapshot();
            match snapshot.error {
                Some(ref e) => println!("Not signed in ({}).", e),
                None => println!("Not signed in."),
            }
        }
    }
    Ok(())
}

async fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
) -> Result<()> {
    loop {
        // Apply guard outcomes before drawing
        app.sync_route();

        // Draw UI
        terminal.draw(|f| render(f, app))?;

        // Poll for events with timeout to allow background updates
        if event::poll(Duration::from_millis(EVENT_POLL_TIMEOUT_MS))? {
            if let Event::Key(key) = event::read()? {
                // Ctrl+C to quit
                if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
                    return Ok(());
                }

                if handle_input(app, key)? {
                    return Ok(());
                }
            }
        }

        // Check for completed background tasks
        app.check_background_tasks();

        // Check if we should quit
        if matches!(app.state, AppState::Quitting) {
            return Ok(());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> impl Iterator<Item = String> {
        list.iter().map(|s| s.to_string()).collect::<Vec<_>>().into_iter()
    }

    #[test]
    fn test_cli_flags() {
        let cli = Cli::parse(args(&["--ephemeral", "--ascii"])).unwrap();
        assert!(cli.ephemeral && cli.ascii);
        assert!(!cli.login && !cli.logout && !cli.whoami);
    }

    #[test]
    fn test_cli_rejects_unknown() {
        assert!(Cli::parse(args(&["--frobnicate"])).is_err());
    }
}
