mod ui;

use std::io;
use std::time::Duration;

use anyhow::Result;
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};

use termod_config::{defaults, Config};
use termod_core::{Event, EventHandler};
use termod_logger::LogLevel;
use termod_session::Session;

fn main() -> Result<()> {
    // Load config first; a broken or missing config never blocks startup
    let config = Config::load().unwrap_or_default();

    if let Ok(log_path) = config.log_file_path() {
        let min_level = config.logging.min_level.parse().unwrap_or(LogLevel::Info);
        termod_logger::init(log_path, defaults::LOG_MAX_ENTRIES, min_level);
    }
    log::info!("termod {} starting", env!("CARGO_PKG_VERSION"));

    let mut session = match std::env::args().nth(1) {
        Some(path) => Session::with_file(config.editor.clone(), path)?,
        None => Session::new(config.editor.clone()),
    };

    // Initialize terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let events = EventHandler::new(Duration::from_millis(250));
    let result = run(&mut terminal, &mut session, &events);

    // Restore the terminal even when the loop errored
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    log::info!("termod exiting");
    result
}

fn run(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    session: &mut Session,
    events: &EventHandler,
) -> Result<()> {
    loop {
        // The text-area viewport depends on the gutter width, which in
        // turn depends on the line count, so it is refreshed every frame.
        let size = terminal.size()?;
        let (width, height) = ui::text_viewport(session, size.width, size.height);
        session.set_viewport(width, height);

        terminal.draw(|frame| ui::draw(frame, session))?;

        match events.next()? {
            Event::Key(key) => session.handle_key(key)?,
            Event::Resize(_, _) | Event::Tick => {}
        }

        if session.should_quit() {
            return Ok(());
        }
    }
}
