//! # docfind-tui
//!
//! A terminal user interface for browsing a doctor listing with synced
//! filter, sort, and search state.

use anyhow::Result;
use clap::Parser;
use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind, KeyModifiers},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use docfind_tui::app_core::input::{AppKeyCode, AppKeyEvent};
use docfind_tui::app_core::reducer;
use docfind_tui::app_core::state::AppState;
use docfind_tui::controller::SelectionController;
use docfind_tui::query::{MemoryParams, decode_query_line};
use docfind_tui::records::RecordStore;
use docfind_tui::{data, theme, ui};
use ratatui::{Terminal, backend::CrosstermBackend};

use std::fs;
use std::io;
use std::time::Duration;

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about,
    long_about = "docfind-tui: a terminal user interface for browsing a doctor listing.\n\
                  Filters, sort, and search are one shared state, restored between runs."
)]
struct Args {
    /// Listing endpoint to fetch
    #[arg(short, long, default_value = data::DEFAULT_LISTING_URL)]
    url: String,

    /// Path to a local listing JSON file (skips the fetch)
    #[arg(short, long)]
    file: Option<String>,

    /// Start from this view state instead of the persisted one,
    /// e.g. "search=an&mode=video&sortOrder=desc"
    #[arg(short, long)]
    params: Option<String>,

    /// Force download of the listing even if cached
    #[arg(long)]
    force: bool,

    /// UI theme (dracula, solarized)
    #[arg(short, long)]
    theme: Option<String>,

    /// Show all paths used by the application (cache, data, view state)
    #[arg(long)]
    config: bool,

    /// Clear the persisted view state
    #[arg(long)]
    clear_state: bool,
}

// ---------------------------------------------------------------------------
// Crossterm → shared-reducer adapter
// ---------------------------------------------------------------------------

fn crossterm_to_app_key_event(
    code: KeyCode,
    modifiers: KeyModifiers,
    kind: KeyEventKind,
) -> Option<AppKeyEvent> {
    if matches!(kind, KeyEventKind::Release) {
        return None;
    }

    let ctrl = modifiers.contains(KeyModifiers::CONTROL);

    let key_code = match code {
        KeyCode::Char(c) => AppKeyCode::Char(c),
        KeyCode::Backspace => AppKeyCode::Backspace,
        KeyCode::Delete => AppKeyCode::Delete,
        KeyCode::Enter => AppKeyCode::Enter,
        KeyCode::Esc => AppKeyCode::Esc,
        KeyCode::Up => AppKeyCode::Up,
        KeyCode::Down => AppKeyCode::Down,
        KeyCode::Left => AppKeyCode::Left,
        KeyCode::Right => AppKeyCode::Right,
        KeyCode::Home => AppKeyCode::Home,
        KeyCode::End => AppKeyCode::End,
        KeyCode::PageUp => AppKeyCode::PageUp,
        KeyCode::PageDown => AppKeyCode::PageDown,
        KeyCode::Tab => AppKeyCode::Tab,
        KeyCode::BackTab => AppKeyCode::BackTab,
        _ => return None,
    };

    Some(AppKeyEvent {
        code: key_code,
        ctrl,
        is_release: false,
    })
}

// ---------------------------------------------------------------------------
// Entry point
// ---------------------------------------------------------------------------

fn main() -> Result<()> {
    let args = Args::parse();

    let theme_name = args.theme.as_deref().unwrap_or("dracula");
    let theme = theme::by_name(theme_name);

    if args.config {
        println!("App Paths:");
        println!("  Cache:      {}", data::get_cache_dir()?.display());
        println!("  Data:       {}", data::get_data_dir()?.display());
        println!("  View state: {}", data::params_path()?.display());
        return Ok(());
    }

    if args.clear_state {
        let path = data::params_path()?;
        if path.exists() {
            fs::remove_file(&path)?;
            println!("View state cleared.");
        } else {
            println!("View state is already empty.");
        }
        return Ok(());
    }

    // Restore view state: an explicit --params line wins over the persisted one.
    let params = match &args.params {
        Some(line) => decode_query_line(line),
        None => data::load_params(),
    };
    let controller = SelectionController::with_store(MemoryParams::with_params(params));

    // Load the listing before touching the terminal. A failed fetch leaves the
    // view empty but alive, with a notice in the card area.
    let mut load_notice = None;
    let (doctors, source_label) = if let Some(file) = &args.file {
        (data::load_doctors_from_file(file)?, file.clone())
    } else {
        match data::fetch_doctors(&args.url, args.force) {
            Ok(doctors) => (doctors, args.url.clone()),
            Err(err) => {
                load_notice = Some(format!("Could not load listing: {err}"));
                (Vec::new(), args.url.clone())
            }
        }
    };

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = AppState::new(RecordStore::new(doctors), controller, theme, source_label);
    app.load_notice = load_notice;

    let res = run_app(&mut terminal, &mut app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    // Persist the final view state so the next run resumes it.
    data::save_params(&app.controller.params_snapshot());

    res
}

fn run_app<B: ratatui::backend::Backend>(terminal: &mut Terminal<B>, app: &mut AppState) -> Result<()>
where
    B::Error: Send + Sync + 'static,
{
    let mut saved_version = app.controller.store_version();

    loop {
        terminal.draw(|f| ui::render(f, app))?;

        if event::poll(Duration::from_millis(50))?
            && let Event::Key(key) = event::read()?
            && let Some(event) = crossterm_to_app_key_event(key.code, key.modifiers, key.kind)
        {
            reducer::handle_key_event(app, event);
        }

        // Persist whenever the applied state moved, not just at exit.
        let version = app.controller.store_version();
        if version != saved_version {
            data::save_params(&app.controller.params_snapshot());
            saved_version = version;
        }

        if app.should_quit {
            return Ok(());
        }
    }
}
