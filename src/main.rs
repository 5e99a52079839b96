use std::io;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use power_connect_four::config::AppConfig;
use power_connect_four::game::Player;
use power_connect_four::logging;
use power_connect_four::ui::App;
use ratatui::{backend::CrosstermBackend, Terminal};

/// Two-player Connect Four with power shots and special pieces.
#[derive(Parser)]
#[command(name = "power-connect-four", about = "Play Power Connect Four in the terminal")]
struct Cli {
    /// Path to TOML configuration file
    #[arg(long, default_value = "power_connect_four.toml")]
    config: PathBuf,

    /// Print a configuration file with all defaults and exit
    #[arg(long)]
    print_config: bool,

    /// Override the log file location
    #[arg(long)]
    log_file: Option<PathBuf>,
}

fn main() {
    if let Err(err) = run() {
        eprintln!("Error: {err:#}");
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();

    if cli.print_config {
        print!("{}", AppConfig::default_toml());
        return Ok(());
    }

    let mut config = AppConfig::load_or_default(&cli.config)
        .with_context(|| format!("loading config from {}", cli.config.display()))?;
    if let Some(path) = cli.log_file {
        config.logging.file = path;
    }

    logging::init(&config.logging).context("initializing logging")?;
    if !cli.config.exists() {
        tracing::warn!(path = %cli.config.display(), "config file not found, using defaults");
    }
    tracing::info!(rules = ?config.rules, "starting session");

    let mut app = App::new(config.ui.clone(), config.rules);
    play(&mut app).context("running terminal UI")?;

    let session = app.session();
    tracing::info!(
        rounds = session.round(),
        score_one = session.player(Player::One).score,
        score_two = session.player(Player::Two).score,
        "session ended"
    );
    Ok(())
}

fn play(app: &mut App) -> io::Result<()> {
    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    undo_on_err(
        execute!(stdout, EnterAlternateScreen, EnableMouseCapture),
        || {
            let _ = disable_raw_mode();
        },
    )?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = undo_on_err(Terminal::new(backend), || {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen, DisableMouseCapture);
    })?;

    let res = app.run(&mut terminal);

    // Restore terminal, even on error
    let _ = disable_raw_mode();
    let _ = execute!(terminal.backend_mut(), LeaveAlternateScreen, DisableMouseCapture);
    let _ = terminal.show_cursor();

    res
}

/// Run `undo` before handing back a failed setup step.
fn undo_on_err<T>(result: io::Result<T>, undo: impl FnOnce()) -> io::Result<T> {
    if result.is_err() {
        undo();
    }
    result
}
