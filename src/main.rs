mod agenda;
mod app;
mod config;
mod page;
mod ui;

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;
use std::path::{Path, PathBuf};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use agenda::Agenda;
use app::App;
use config::Config;

#[derive(Parser, Debug)]
#[command(name = "agenda")]
#[command(about = "TUI conference agenda viewer")]
#[command(version)]
struct Cli {
    /// Config file path (default: ~/.config/agenda-tui/config.toml)
    #[arg(long)]
    config: Option<String>,

    /// Agenda JSON file (default: the built-in agenda)
    #[arg(long)]
    agenda: Option<PathBuf>,

    /// Theme preset override
    #[arg(long)]
    theme: Option<String>,
}

fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "agenda_tui=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    let cli = Cli::parse();

    // Load config
    let config_path = cli
        .config
        .unwrap_or_else(|| Config::default_path().display().to_string());
    let mut config = Config::load(&config_path)?;
    if let Some(theme) = cli.theme {
        config.appearance.theme = theme;
    }

    // Load agenda data
    let agenda = load_agenda(cli.agenda.as_deref(), &config)?;
    tracing::info!(
        "Loaded agenda: {} sections, {} clickable sessions",
        agenda.sections.len(),
        agenda.clickable_items().len()
    );

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Create app state
    let mut app = App::new(agenda, config);

    // Run main loop
    let result = run_app(&mut terminal, &mut app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    result
}

/// CLI path wins, then the configured path, then the bundled agenda.
fn load_agenda(cli_path: Option<&Path>, config: &Config) -> Result<Agenda> {
    if let Some(path) = cli_path {
        return Agenda::load(path)
            .with_context(|| format!("Failed to load agenda from {}", path.display()));
    }
    if let Some(ref path) = config.agenda_path {
        let expanded = shellexpand::tilde(path);
        let path = Path::new(expanded.as_ref());
        return Agenda::load(path)
            .with_context(|| format!("Failed to load agenda from {}", path.display()));
    }
    Agenda::bundled().context("Built-in agenda is invalid")
}

fn run_app<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    app: &mut App,
) -> Result<()> {
    loop {
        terminal.draw(|f| ui::draw(f, app))?;

        if event::poll(std::time::Duration::from_millis(100))? {
            match event::read()? {
                Event::Key(key) => {
                    if key.kind != KeyEventKind::Press {
                        continue;
                    }
                    if key.code == KeyCode::Char('c')
                        && key.modifiers.contains(event::KeyModifiers::CONTROL)
                    {
                        return Ok(());
                    }

                    if app.is_modal_open() {
                        match key.code {
                            KeyCode::Char('q') => return Ok(()),
                            code => {
                                app.modal_key(code);
                            }
                        }
                    } else {
                        match key.code {
                            KeyCode::Esc | KeyCode::Char('q') => return Ok(()),
                            KeyCode::Enter => app.open_selected(),
                            KeyCode::Up | KeyCode::Char('k') => app.select_prev(),
                            KeyCode::Down | KeyCode::Char('j') => app.select_next(),
                            KeyCode::Tab => app.select_next_wrap(),
                            KeyCode::BackTab => app.select_prev_wrap(),
                            KeyCode::PageUp => app.scroll_page(-3),
                            KeyCode::PageDown => app.scroll_page(3),
                            KeyCode::Home | KeyCode::Char('g') => app.scroll_home(),
                            KeyCode::End | KeyCode::Char('G') => app.scroll_end(),
                            _ => {}
                        }
                    }
                }
                Event::Mouse(mouse) => app.handle_mouse(mouse),
                Event::Resize(_, _) => {
                    // Next draw recomputes the layout from the new size.
                }
                _ => {}
            }
        }
    }
}
