mod app;
mod audio;
mod dictation;
mod domain;
mod editor;
mod input;
mod notify;
mod persistence;
mod reminder;
mod repository;
mod resource;
mod ticker;
mod ui;

use anyhow::Result;
use app::AppState;
use audio::SystemAudio;
use clap::{Parser, Subcommand};
use crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use dictation::NullDictation;
use notify::SystemNotifier;
use persistence::{ensure_data_dir, init_local_dir, FileStore};
use ratatui::{backend::CrosstermBackend, Terminal};
use reminder::ReminderScheduler;
use repository::TaskRepository;
use std::io;

#[derive(Parser)]
#[command(name = "tasktide")]
#[command(about = "A terminal-based personal task manager with a today list, month calendar and reminders", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Initialize a local .tasktide directory in the current directory
    Init,
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Init) => {
            let data_dir = init_local_dir()?;
            println!("Initialized tasktide directory: {}", data_dir.display());
            println!();
            println!("Tasktide will now use this local directory for task storage.");
            println!("Run 'tasktide' to start managing tasks.");
            Ok(())
        }
        None => run_tui(),
    }
}

fn run_tui() -> Result<()> {
    let data_dir = ensure_data_dir()?;
    eprintln!("Using tasktide directory: {}", data_dir.display());

    let store = FileStore::new(data_dir);
    let repository = TaskRepository::load(Box::new(store));
    let scheduler = ReminderScheduler::new(
        Box::new(SystemNotifier::default()),
        Box::new(SystemAudio::default()),
    );
    let mut app = AppState::new(repository, scheduler, Box::new(NullDictation::default()));

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Run app
    let result = run_app(&mut terminal, &mut app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    // Pending reminders are in-memory only and are dropped here
    if let Err(err) = result {
        eprintln!("Error: {}", err);
    }

    Ok(())
}

fn run_app(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>, app: &mut AppState) -> Result<()> {
    let tick_rate = ticker::tick_duration();

    loop {
        // Render
        terminal.draw(|f| ui::render(f, app))?;

        // Handle events with timeout for ticking
        if event::poll(tick_rate)? {
            if let Event::Key(key) = event::read()? {
                // Only process key press events (ignore key release)
                if key.kind == KeyEventKind::Press {
                    let should_quit = input::handle_key(app, key)?;
                    if should_quit {
                        return Ok(());
                    }
                }
            }
        }

        // Stream dictation and fire due reminders
        app.tick();
    }
}
