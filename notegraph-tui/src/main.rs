mod app;
mod input;
mod view;

use anyhow::{Context, Result};
use app::App;
use clap::Parser;
use crossterm::event::{self, Event, KeyCode, KeyEventKind, KeyModifiers};
use crossterm::execute;
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use notegraph_core::Store;
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;
use std::io;
use std::path::PathBuf;
use std::time::Duration;

#[derive(Parser)]
#[command(
    name = "notegraph",
    about = "A personal note graph with wikilink navigation"
)]
struct Cli {
    /// Store file to open (defaults to the per-user data directory)
    #[arg(long)]
    db: Option<PathBuf>,

    /// Cap the back-navigation history at this many entries (unbounded by default)
    #[arg(long)]
    history_limit: Option<usize>,
}

fn default_db_path() -> Result<PathBuf> {
    let base = dirs::data_dir()
        .or_else(dirs::home_dir)
        .context("could not determine a data directory")?;
    Ok(base.join("notegraph").join("notegraph.db"))
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let db_path = match cli.db {
        Some(path) => path,
        None => default_db_path()?,
    };
    if let Some(parent) = db_path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("creating data directory {}", parent.display()))?;
    }

    // Startup failures are fatal: there is no session without a store.
    let store = Store::open(&db_path)
        .with_context(|| format!("opening store at {}", db_path.display()))?;
    let app = App::new(store, cli.history_limit).context("listing projects")?;
    log::info!("opened store at {}", db_path.display());

    run(app)
}

fn run(mut app: App) -> Result<()> {
    let mut stdout = io::stdout();
    enable_raw_mode()?;
    execute!(stdout, EnterAlternateScreen)?;
    let _guard = TerminalGuard;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    loop {
        terminal.draw(|f| view::draw(f, &app))?;
        if !event::poll(Duration::from_millis(200))? {
            continue;
        }
        if let Event::Key(key) = event::read()? {
            if matches!(key.kind, KeyEventKind::Release | KeyEventKind::Repeat) {
                continue;
            }
            // ctrl+c quits from any screen.
            if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
                break;
            }
            if app.handle_key(key) {
                break;
            }
        }
    }
    Ok(())
}

struct TerminalGuard;

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
        let mut stdout = io::stdout();
        let _ = execute!(stdout, LeaveAlternateScreen);
    }
}
