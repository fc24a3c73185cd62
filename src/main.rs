use std::io;
use std::path::PathBuf;
use std::time::Duration;

use anyhow::Context;
use clap::Parser;
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tokio::sync::mpsc;

use courtside::config::AppConfig;
use courtside::core::catalog::WorldSnapshot;
use courtside::core::loader::DataLoader;
use courtside::core::logging;
use courtside::core::prefs::PreferenceStore;
use courtside::tui::AppState;

/// Terminal roster browser for volleyball game characters.
#[derive(Debug, Parser)]
#[command(name = "courtside", version, about)]
struct Cli {
    /// Open this character's detail view directly after loading.
    #[arg(short = 'c', long)]
    character: Option<String>,

    /// Path to an alternate config file.
    #[arg(long)]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => AppConfig::load_from(path),
        None => AppConfig::load(),
    };

    let _log_guard = logging::init_tui(&config.data_dir());
    log::info!("{} v{} starting", courtside::NAME, courtside::VERSION);

    let loader = DataLoader::new(config.data_source());

    let roster_ids = if config.data.roster.is_empty() {
        loader.discover_roster()
    } else {
        config.data.roster.clone()
    };
    if roster_ids.is_empty() {
        anyhow::bail!(
            "no hay personajes configurados: añade ids a `data.roster` \
             o apunta `data.source_dir` a un directorio con characters/*.json"
        );
    }

    // Load everything before touching the terminal so startup failures
    // print normally.
    let world = WorldSnapshot::load(&loader, &roster_ids).await;

    // A requested character that did not load is a hard error, not a
    // degraded view.
    if let Some(id) = &cli.character {
        if world.character(id).is_none() {
            anyhow::bail!("Personaje no encontrado: {id}");
        }
    }

    let prefs = PreferenceStore::open(config.prefs_path());

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let (event_tx, event_rx) = mpsc::unbounded_channel();
    let mut app = AppState::new(event_rx, event_tx, world, prefs, loader, roster_ids);
    if let Some(id) = &cli.character {
        app.open_character(id);
    }

    let tick_rate = Duration::from_millis(config.tui.tick_rate_ms);
    let result = app.run(&mut terminal, tick_rate).await;

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result.context("la interfaz terminó con un error")?;
    log::info!("{} shutting down", courtside::NAME);
    Ok(())
}
